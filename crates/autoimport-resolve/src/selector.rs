//! `ClassSelector` — a singly-linked, head-first, acyclic chain of name
//! segments denoting a dotted qualified name.

use autoimport_core::Name;
use autoimport_syntax::TypeRef;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ClassSelector {
    head: Name,
    tail: Option<Box<ClassSelector>>,
}

impl ClassSelector {
    pub fn single(head: Name) -> Self {
        Self { head, tail: None }
    }

    /// Builds a chain from an ordered, non-empty list of segments.
    /// Returns `None` for an empty list.
    pub fn from_segments(segments: impl IntoIterator<Item = Name>) -> Option<Self> {
        let segments: Vec<Name> = segments.into_iter().collect();
        Self::from_vec(&segments)
    }

    fn from_vec(segments: &[Name]) -> Option<Self> {
        let (head, rest) = segments.split_first()?;
        Some(Self {
            head: head.clone(),
            tail: Self::from_vec(rest).map(Box::new),
        })
    }

    /// Builds a selector from a parsed type reference, discarding every
    /// type-argument subtree (`Pkg.Class<T, R>` yields `Pkg.Class`) —
    /// `PathSegment` never exposes its `TypeArgList`, so this falls out of
    /// just reading segment names.
    pub fn from_type_ref(type_ref: &TypeRef) -> Option<Self> {
        let path = type_ref.path()?;
        let segments: Vec<Name> = path
            .segments()
            .filter_map(|seg| seg.name())
            .map(|tok| Name::new(tok.text()))
            .collect();
        Self::from_vec(&segments)
    }

    pub fn head(&self) -> &Name {
        &self.head
    }

    pub fn tail(&self) -> Option<&ClassSelector> {
        self.tail.as_deref()
    }

    pub fn len(&self) -> usize {
        1 + self.tail.as_ref().map_or(0, |t| t.len())
    }

    pub fn is_empty(&self) -> bool {
        false
    }

    pub fn segments(&self) -> Vec<&Name> {
        let mut out = vec![&self.head];
        let mut cur = self.tail.as_deref();
        while let Some(t) = cur {
            out.push(&t.head);
            cur = t.tail.as_deref();
        }
        out
    }
}

impl std::fmt::Display for ClassSelector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let segs = self.segments();
        for (i, seg) in segs.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(seg.as_str())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_segment_has_no_tail() {
        let s = ClassSelector::single(Name::new("Foo"));
        assert_eq!(s.head().as_str(), "Foo");
        assert!(s.tail().is_none());
        assert_eq!(s.len(), 1);
    }

    #[test]
    fn from_segments_builds_head_first_chain() {
        let s = ClassSelector::from_segments(["a", "b", "C"].map(Name::new)).unwrap();
        assert_eq!(s.head().as_str(), "a");
        assert_eq!(s.tail().unwrap().head().as_str(), "b");
        assert_eq!(s.tail().unwrap().tail().unwrap().head().as_str(), "C");
        assert_eq!(s.to_string(), "a.b.C");
        assert_eq!(s.len(), 3);
    }

    #[test]
    fn equality_is_structural() {
        let a = ClassSelector::from_segments(["a", "b"].map(Name::new)).unwrap();
        let b = ClassSelector::from_segments(["a", "b"].map(Name::new)).unwrap();
        let c = ClassSelector::from_segments(["a", "c"].map(Name::new)).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
