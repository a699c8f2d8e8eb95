//! Dependency classpath indexing: turns jars and class directories into
//! [`ClassStubEntity`] values keyed by JVM binary name, for classes that live
//! outside the project being scanned.
#![forbid(unsafe_code)]

use std::fs::File;
use std::io::Read as _;
use std::path::{Path, PathBuf};

use autoimport_classfile::{ClassFile, ClassStub};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClasspathError {
    #[error("io error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("zip error in {path}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },
    #[error("classfile error in {path}: {source}")]
    Classfile {
        path: PathBuf,
        #[source]
        source: autoimport_classfile::Error,
    },
}

pub type Result<T> = std::result::Result<T, ClasspathError>;

/// A single class found on the classpath, keyed by its JVM internal (binary)
/// name, e.g. `com/example/Outer$Inner`.
#[derive(Debug, Clone)]
pub struct ClassStubEntity {
    pub binary_name: String,
    pub stub: ClassStub,
}

/// A location contributing classes to the classpath: either a directory of
/// `.class` files or a jar archive.
#[derive(Debug, Clone)]
pub enum ClasspathEntry {
    ClassDir(PathBuf),
    Jar(PathBuf),
}

impl ClasspathEntry {
    pub fn classes(&self) -> Result<Vec<ClassStubEntity>> {
        match self {
            ClasspathEntry::ClassDir(dir) => classes_in_dir(dir),
            ClasspathEntry::Jar(jar) => classes_in_jar(jar),
        }
    }
}

fn classes_in_dir(dir: &Path) -> Result<Vec<ClassStubEntity>> {
    let mut out = Vec::new();
    for entry in walkdir::WalkDir::new(dir)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter(|e| e.path().extension().and_then(|e| e.to_str()) == Some("class"))
    {
        let path = entry.path();
        let bytes = std::fs::read(path).map_err(|source| ClasspathError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let class = ClassFile::parse(&bytes).map_err(|source| ClasspathError::Classfile {
            path: path.to_path_buf(),
            source,
        })?;
        let binary_name = class.this_class.clone();
        let stub = class.stub().map_err(|source| ClasspathError::Classfile {
            path: path.to_path_buf(),
            source,
        })?;
        out.push(ClassStubEntity { binary_name, stub });
    }
    Ok(out)
}

fn classes_in_jar(jar_path: &Path) -> Result<Vec<ClassStubEntity>> {
    let file = File::open(jar_path).map_err(|source| ClasspathError::Io {
        path: jar_path.to_path_buf(),
        source,
    })?;
    let mut archive = zip::ZipArchive::new(file).map_err(|source| ClasspathError::Zip {
        path: jar_path.to_path_buf(),
        source,
    })?;

    let mut out = Vec::with_capacity(archive.len());
    for index in 0..archive.len() {
        let mut entry = archive
            .by_index(index)
            .map_err(|source| ClasspathError::Zip {
                path: jar_path.to_path_buf(),
                source,
            })?;
        if entry.is_dir() || !entry.name().ends_with(".class") {
            continue;
        }
        let mut bytes = Vec::with_capacity(entry.size() as usize);
        entry
            .read_to_end(&mut bytes)
            .map_err(|source| ClasspathError::Io {
                path: jar_path.to_path_buf(),
                source,
            })?;
        let class = ClassFile::parse(&bytes).map_err(|source| ClasspathError::Classfile {
            path: jar_path.to_path_buf(),
            source,
        })?;
        let binary_name = class.this_class.clone();
        let stub = class.stub().map_err(|source| ClasspathError::Classfile {
            path: jar_path.to_path_buf(),
            source,
        })?;
        out.push(ClassStubEntity { binary_name, stub });
    }
    Ok(out)
}

/// Aggregate index over every [`ClasspathEntry`] in a project's dependency
/// set, keyed by JVM binary name for `ClassHierarchy` lookups.
#[derive(Debug, Default, Clone)]
pub struct ClasspathIndex {
    by_binary_name: std::collections::HashMap<String, ClassStubEntity>,
}

impl ClasspathIndex {
    pub fn build(entries: &[ClasspathEntry]) -> Result<Self> {
        let mut by_binary_name = std::collections::HashMap::new();
        for entry in entries {
            for class in entry.classes()? {
                by_binary_name.insert(class.binary_name.clone(), class);
            }
        }
        Ok(Self { by_binary_name })
    }

    pub fn lookup_binary(&self, binary_name: &str) -> Option<&ClassStubEntity> {
        self.by_binary_name.get(binary_name)
    }

    pub fn len(&self) -> usize {
        self.by_binary_name.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_binary_name.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn class_dir_with_no_class_files_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let entry = ClasspathEntry::ClassDir(dir.path().to_path_buf());
        let classes = entry.classes().unwrap();
        assert!(classes.is_empty());
    }

    #[test]
    fn jar_with_non_class_entries_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let jar_path = dir.path().join("empty.jar");
        let file = File::create(&jar_path).unwrap();
        let mut writer = zip::ZipWriter::new(file);
        writer
            .start_file("META-INF/MANIFEST.MF", zip::write::FileOptions::default())
            .unwrap();
        writer.write_all(b"Manifest-Version: 1.0\n").unwrap();
        writer.finish().unwrap();

        let entry = ClasspathEntry::Jar(jar_path);
        let classes = entry.classes().unwrap();
        assert!(classes.is_empty());
    }

    #[test]
    fn index_is_empty_when_built_from_no_entries() {
        let index = ClasspathIndex::build(&[]).unwrap();
        assert!(index.is_empty());
        assert_eq!(index.lookup_binary("com/example/Foo"), None);
    }
}
