//! The Class Extender: resolves an [`OrphanClass`]'s unresolved identifiers
//! against its superclass chain, one hop at a time.

use std::collections::HashSet;

use autoimport_core::Name;

use crate::hierarchy::ClassHierarchy;
use crate::scanner::OrphanClass;
use crate::selector::ClassSelector;

/// Outcome of one `extend` call.
#[derive(Debug, Clone)]
pub struct ExtendResult {
    /// Names that matched a member somewhere along the chain walked so far
    /// and are no longer unresolved.
    pub newly_resolved: Vec<Name>,
    /// `true` once the chain has been walked to its end: either a class with
    /// no declared superclass, or a superclass the hierarchy can't find.
    pub fully_extended: bool,
}

/// Walks an orphan's superclass chain against `hierarchy`, removing any of
/// its still-unresolved names that match a member along the way.
///
/// Each call advances by exactly one hop and shrinks `orphan.unresolved`
/// monotonically — it never grows, and a name once removed is never added
/// back. The walk is guarded against cycles (a class that is its own
/// ancestor) with a visited-selector set, and terminates either when the
/// chain runs out, the hierarchy can't resolve the next link, or a cycle is
/// detected — all three leave `fully_extended` true.
pub struct ClassExtender {
    visited: HashSet<String>,
}

impl ClassExtender {
    pub fn new() -> Self {
        Self {
            visited: HashSet::new(),
        }
    }

    pub fn is_fully_extended(&self, orphan: &OrphanClass) -> bool {
        orphan.superclass.is_none()
    }

    /// Resolves as much of `orphan` as the chain currently reachable in
    /// `hierarchy` allows, stopping at the first unresolvable or cyclic hop.
    pub fn extend(&mut self, orphan: &mut OrphanClass, hierarchy: &ClassHierarchy) -> ExtendResult {
        self.visited.clear();
        self.visited.insert(orphan.name.to_string());

        let mut newly_resolved = Vec::new();
        let mut current = orphan.superclass.clone();

        while let Some(selector) = current.take() {
            let key = selector.to_string();
            if self.visited.contains(&key) {
                break;
            }
            self.visited.insert(key);

            let Some(resolved) = hierarchy.lookup(&selector) else {
                break;
            };

            orphan.unresolved.retain(|name| {
                if resolved.members.iter().any(|m| m == name) {
                    newly_resolved.push(name.clone());
                    false
                } else {
                    true
                }
            });

            current = resolved.superclass;
        }

        orphan.superclass = current;
        ExtendResult {
            newly_resolved,
            fully_extended: self.is_fully_extended(orphan),
        }
    }
}

impl Default for ClassExtender {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoimport_hir::{lower_item_tree, AstIdMap};
    use autoimport_syntax::{parse_java, AstNode, CompilationUnit, SyntaxNode};

    fn tree_from(text: &str) -> autoimport_hir::ItemTree {
        let parse = parse_java(text);
        let root = SyntaxNode::new_root(parse.green_node);
        let cu = CompilationUnit::cast(root.clone()).unwrap();
        let ast_id_map = AstIdMap::new(&root);
        lower_item_tree(&cu, &ast_id_map)
    }

    fn orphan(name: &str, superclass: &str, unresolved: &[&str]) -> OrphanClass {
        OrphanClass {
            name: Name::new(name),
            superclass: Some(ClassSelector::single(Name::new(superclass))),
            unresolved: unresolved.iter().map(|n| Name::new(*n)).collect(),
        }
    }

    #[test]
    fn resolves_member_declared_on_direct_superclass() {
        let tree = tree_from("class Parent { public int a; }\nclass Child extends Parent {}\n");
        let mut hierarchy = ClassHierarchy::new(None);
        hierarchy.add_item_tree(&tree);

        let mut child = orphan("Child", "Parent", &["a", "mystery"]);
        let mut extender = ClassExtender::new();
        let result = extender.extend(&mut child, &hierarchy);

        assert_eq!(result.newly_resolved, vec![Name::new("a")]);
        assert_eq!(child.unresolved, vec![Name::new("mystery")]);
        assert!(result.fully_extended);
    }

    #[test]
    fn walks_multiple_hops_up_the_chain() {
        let tree = tree_from(
            "class Grandparent { public int g; }\n\
             class Parent extends Grandparent { public int p; }\n\
             class Child extends Parent {}\n",
        );
        let mut hierarchy = ClassHierarchy::new(None);
        hierarchy.add_item_tree(&tree);

        let mut child = orphan("Child", "Parent", &["g", "p", "mystery"]);
        let mut extender = ClassExtender::new();
        let result = extender.extend(&mut child, &hierarchy);

        assert!(result.newly_resolved.contains(&Name::new("g")));
        assert!(result.newly_resolved.contains(&Name::new("p")));
        assert_eq!(child.unresolved, vec![Name::new("mystery")]);
        assert!(result.fully_extended);
    }

    #[test]
    fn stops_at_unknown_superclass_without_resolving() {
        let hierarchy = ClassHierarchy::new(None);
        let mut child = orphan("Child", "SomeFrameworkBase", &["mystery"]);
        let mut extender = ClassExtender::new();
        let result = extender.extend(&mut child, &hierarchy);

        assert!(result.newly_resolved.is_empty());
        assert_eq!(child.unresolved, vec![Name::new("mystery")]);
        assert!(result.fully_extended);
    }

    #[test]
    fn cycle_terminates_instead_of_looping_forever() {
        let tree = tree_from("class A extends B { public int a; }\nclass B extends A { public int b; }\n");
        let mut hierarchy = ClassHierarchy::new(None);
        hierarchy.add_item_tree(&tree);

        let mut a = orphan("A", "B", &["b", "mystery"]);
        let mut extender = ClassExtender::new();
        let result = extender.extend(&mut a, &hierarchy);

        assert!(result.fully_extended);
        assert_eq!(result.newly_resolved, vec![Name::new("b")]);
        assert_eq!(a.unresolved, vec![Name::new("mystery")]);
    }
}
