//! Filesystem path utilities shared across Nova.

use std::ops::Deref;
use std::path::{Path, PathBuf};

/// An absolute filesystem path.
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct AbsPathBuf(PathBuf);

impl AbsPathBuf {
    pub fn new(path: PathBuf) -> Result<Self, AbsPathError> {
        if path.is_absolute() {
            Ok(Self(path))
        } else {
            Err(AbsPathError::NotAbsolute(path))
        }
    }

    /// Canonicalize a path on disk.
    ///
    /// This resolves symlinks and normalizes platform-specific path quirks.
    pub fn canonicalize(path: impl AsRef<Path>) -> std::io::Result<Self> {
        let path = dunce::canonicalize(path)?;
        Ok(Self(path))
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }

    pub fn join(&self, segment: impl AsRef<Path>) -> Self {
        Self(self.0.join(segment))
    }
}

impl Deref for AbsPathBuf {
    type Target = Path;

    fn deref(&self) -> &Self::Target {
        self.as_path()
    }
}

impl std::fmt::Debug for AbsPathBuf {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("AbsPathBuf").field(&self.0).finish()
    }
}

impl TryFrom<PathBuf> for AbsPathBuf {
    type Error = AbsPathError;

    fn try_from(value: PathBuf) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug)]
pub enum AbsPathError {
    NotAbsolute(PathBuf),
}

impl std::fmt::Display for AbsPathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AbsPathError::NotAbsolute(path) => {
                write!(f, "path is not absolute: {}", path.display())
            }
        }
    }
}

impl std::error::Error for AbsPathError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_relative_paths() {
        assert!(AbsPathBuf::new(PathBuf::from("rel/path")).is_err());
    }

    #[test]
    fn accepts_absolute_paths() {
        let abs = AbsPathBuf::new(PathBuf::from("/tmp/foo")).unwrap();
        assert_eq!(abs.as_path(), Path::new("/tmp/foo"));
    }
}
