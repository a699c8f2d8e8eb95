//! Arena-indexed scope tree.
//!
//! Modeled as an arena keyed by integer index with child->parent links,
//! rather than `Rc<RefCell<_>>` nodes — the scanner only ever walks the tree
//! it owns, so there's no need for shared ownership or interior mutability
//! at the node level.

use std::collections::HashMap;

use autoimport_core::{Arena, Idx, Name};

use crate::entity::Entity;

pub type ScopeId = Idx<ScopeData>;

#[derive(Debug, Default)]
pub struct ScopeData {
    parent: Option<ScopeId>,
    bindings: HashMap<Name, Entity>,
    /// Names used in this scope that never resolved against it or any
    /// ancestor at the time of use. Bubbled into the parent's set when this
    /// scope closes.
    unresolved: Vec<Name>,
}

impl ScopeData {
    pub fn parent(&self) -> Option<ScopeId> {
        self.parent
    }

    pub fn bindings(&self) -> impl Iterator<Item = (&Name, &Entity)> {
        self.bindings.iter()
    }
}

#[derive(Debug, Default)]
pub struct ScopeTree {
    arena: Arena<ScopeData>,
}

impl ScopeTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, parent: Option<ScopeId>) -> ScopeId {
        self.arena.alloc(ScopeData {
            parent,
            bindings: HashMap::new(),
            unresolved: Vec::new(),
        })
    }

    /// Binds `name` in `scope`. A second `declare` of the same name shadows
    /// the first — this is how a param or local shadows an outer binding of
    /// the same name within its own scope.
    pub fn declare(&mut self, scope: ScopeId, name: Name, entity: Entity) {
        self.arena[scope].bindings.insert(name, entity);
    }

    /// Walks `scope` and its ancestors, innermost first, returning the first
    /// binding found.
    pub fn resolve(&self, scope: ScopeId, name: &Name) -> Option<&Entity> {
        let mut cur = Some(scope);
        while let Some(id) = cur {
            let data = &self.arena[id];
            if let Some(entity) = data.bindings.get(name) {
                return Some(entity);
            }
            cur = data.parent;
        }
        None
    }

    /// Records `name` as unresolved in `scope`. A name already recorded in
    /// this scope is not added again — the unresolved set is conceptually a
    /// set, not a usage count.
    pub fn record_unresolved(&mut self, scope: ScopeId, name: Name) {
        let unresolved = &mut self.arena[scope].unresolved;
        if !unresolved.contains(&name) {
            unresolved.push(name);
        }
    }

    pub fn unresolved(&self, scope: ScopeId) -> &[Name] {
        &self.arena[scope].unresolved
    }

    pub fn parent(&self, scope: ScopeId) -> Option<ScopeId> {
        self.arena[scope].parent
    }

    pub fn bindings(&self, scope: ScopeId) -> impl Iterator<Item = (&Name, &Entity)> {
        self.arena[scope].bindings()
    }

    /// Moves a scope's unresolved names up into its parent's, draining the
    /// child. Call when a scope closes; the scanner calls this bottom-up so
    /// a name unresolved deep in a block chain ends up recorded on the
    /// file/package scope if nothing along the way bound it.
    pub fn bubble_unresolved(&mut self, scope: ScopeId) {
        let Some(parent) = self.arena[scope].parent else {
            return;
        };
        let names = std::mem::take(&mut self.arena[scope].unresolved);
        for name in names {
            self.record_unresolved(parent, name);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entity::VarEntity;

    fn var(name: &str) -> Entity {
        Entity::Variable(VarEntity {
            name: Name::new(name),
            is_param: false,
        })
    }

    #[test]
    fn resolves_through_ancestor_chain() {
        let mut tree = ScopeTree::new();
        let root = tree.push(None);
        let child = tree.push(Some(root));
        tree.declare(root, Name::new("x"), var("x"));
        assert!(tree.resolve(child, &Name::new("x")).is_some());
        assert!(tree.resolve(child, &Name::new("y")).is_none());
    }

    #[test]
    fn inner_declaration_shadows_outer() {
        let mut tree = ScopeTree::new();
        let root = tree.push(None);
        let child = tree.push(Some(root));
        tree.declare(root, Name::new("x"), var("x"));
        tree.declare(child, Name::new("x"), var("x"));
        let Entity::Variable(v) = tree.resolve(child, &Name::new("x")).unwrap() else {
            panic!("expected variable");
        };
        assert_eq!(v.name.as_str(), "x");
        // Outer binding is untouched after the inner scope closes.
        tree.bubble_unresolved(child);
        assert!(tree.resolve(root, &Name::new("x")).is_some());
    }

    #[test]
    fn unresolved_bubbles_to_parent_on_close() {
        let mut tree = ScopeTree::new();
        let root = tree.push(None);
        let child = tree.push(Some(root));
        tree.record_unresolved(child, Name::new("mystery"));
        tree.bubble_unresolved(child);
        assert_eq!(tree.unresolved(root), &[Name::new("mystery")]);
        assert!(tree.unresolved(child).is_empty());
    }
}
