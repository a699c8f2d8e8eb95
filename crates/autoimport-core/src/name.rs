//! Shared name types and string interning.

use lasso::{Key, Rodeo, Spur};
use smol_str::SmolStr;

/// A lightweight owned name.
///
/// This is backed by [`smol_str::SmolStr`], which stores short strings inline
/// and avoids heap allocation in many common cases.
#[derive(Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct Name(SmolStr);

impl Name {
    #[inline]
    pub fn new(text: impl Into<SmolStr>) -> Self {
        Self(text.into())
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl std::fmt::Debug for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Name").field(&self.0.as_str()).finish()
    }
}

impl std::fmt::Display for Name {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<&str> for Name {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Name {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

/// A symbolic identifier for a name stored in a [`NameInterner`].
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
#[repr(transparent)]
pub struct InternedName(Spur);

impl InternedName {
    #[inline]
    pub fn to_raw(self) -> u32 {
        self.0.into_usize() as u32
    }
}

impl std::fmt::Debug for InternedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "InternedName({})", self.to_raw())
    }
}

/// A thread-safe string interner for frequently repeated identifiers.
#[derive(Default)]
pub struct NameInterner {
    rodeo: Rodeo,
}

impl NameInterner {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn intern(&mut self, text: &str) -> InternedName {
        InternedName(self.rodeo.get_or_intern(text))
    }

    #[inline]
    pub fn resolve(&self, name: InternedName) -> &str {
        self.rodeo.resolve(&name.0)
    }
}

/// Alias for use sites that prefer the `SymbolName` spelling.
pub type SymbolName = Name;

/// A dotted sequence of [`Name`]s, e.g. `java.util.List` or `com.example.Outer.Inner`.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct QualifiedName(Vec<Name>);

impl QualifiedName {
    pub fn new(segments: impl IntoIterator<Item = Name>) -> Self {
        Self(segments.into_iter().collect())
    }

    /// Split a dotted string such as `"java.util.List"` into segments.
    pub fn parse(text: &str) -> Self {
        Self(text.split('.').map(Name::new).collect())
    }

    pub fn segments(&self) -> &[Name] {
        &self.0
    }

    /// The final segment, e.g. `List` in `java.util.List`.
    pub fn last(&self) -> Option<&Name> {
        self.0.last()
    }

    /// Every segment but the last, e.g. `java.util` in `java.util.List`.
    pub fn prefix(&self) -> &[Name] {
        self.0.split_last().map(|(_, rest)| rest).unwrap_or(&[])
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (i, segment) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(segment.as_str())?;
        }
        Ok(())
    }
}

/// A Java package name, e.g. `com.example.app`. The empty package is the
/// unnamed (default) package.
#[derive(Debug, Clone, Eq, PartialEq, Hash, Default)]
pub struct PackageName(QualifiedName);

impl PackageName {
    pub fn new(segments: impl IntoIterator<Item = Name>) -> Self {
        Self(QualifiedName::new(segments))
    }

    pub fn parse(text: &str) -> Self {
        if text.is_empty() {
            Self(QualifiedName::default())
        } else {
            Self(QualifiedName::parse(text))
        }
    }

    pub fn segments(&self) -> &[Name] {
        self.0.segments()
    }

    pub fn is_default_package(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for PackageName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod name_tests {
    use super::*;

    #[test]
    fn qualified_name_splits_on_dots() {
        let q = QualifiedName::parse("java.util.List");
        assert_eq!(q.last().unwrap().as_str(), "List");
        assert_eq!(
            q.prefix().iter().map(Name::as_str).collect::<Vec<_>>(),
            vec!["java", "util"]
        );
        assert_eq!(q.to_string(), "java.util.List");
    }

    #[test]
    fn default_package_is_empty() {
        let pkg = PackageName::parse("");
        assert!(pkg.is_default_package());
        assert_eq!(pkg.to_string(), "");
    }
}
