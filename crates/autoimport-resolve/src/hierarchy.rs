//! Read-through lookup from a [`ClassSelector`] to the superclass chain and
//! member names of a class, whether that class lives in the project being
//! scanned or on the dependency classpath.

use std::collections::HashMap;

use autoimport_classfile::ClassStub;
use autoimport_classpath::ClasspathIndex;
use autoimport_core::Name;
use autoimport_hir::{ClassItem, ClassItemIdx, ItemTree};

use crate::selector::ClassSelector;

/// The subset of a class's shape the extender needs: its non-private member
/// names and its declared superclass, if any.
#[derive(Debug, Clone)]
pub struct ResolvedClass {
    pub members: Vec<Name>,
    pub superclass: Option<ClassSelector>,
}

fn dotted_name(tree: &ItemTree, idx: ClassItemIdx) -> String {
    let item = tree.get(idx);
    match item.parent {
        Some(parent) => format!("{}.{}", dotted_name(tree, parent), item.name.as_str()),
        None => item.name.as_str().to_string(),
    }
}

fn resolved_from_item(item: &ClassItem) -> ResolvedClass {
    ResolvedClass {
        members: item.members.clone(),
        superclass: item
            .superclass
            .as_ref()
            .and_then(|segs| ClassSelector::from_segments(segs.iter().cloned())),
    }
}

fn resolved_from_stub(stub: &ClassStub) -> ResolvedClass {
    const ACC_PUBLIC: u16 = 0x0001;
    const ACC_PROTECTED: u16 = 0x0004;
    const ACC_PRIVATE: u16 = 0x0002;
    let visible = |flags: u16| flags & ACC_PRIVATE == 0 && (flags & (ACC_PUBLIC | ACC_PROTECTED) != 0);

    let members = stub
        .fields
        .iter()
        .filter(|f| visible(f.access_flags))
        .map(|f| Name::new(f.name.clone()))
        .chain(
            stub.methods
                .iter()
                .filter(|m| visible(m.access_flags))
                .map(|m| Name::new(m.name.clone())),
        )
        .collect();

    let superclass = stub.super_class.as_deref().and_then(binary_name_to_selector);

    ResolvedClass { members, superclass }
}

/// `com/example/Outer$Inner` -> `com.example.Outer.Inner`.
fn binary_name_to_selector(binary_name: &str) -> Option<ClassSelector> {
    let segments = binary_name
        .split('/')
        .flat_map(|part| part.split('$'))
        .filter(|s| !s.is_empty())
        .map(Name::new);
    ClassSelector::from_segments(segments)
}

#[derive(Debug, Default)]
pub struct ClassHierarchy {
    project: HashMap<String, ResolvedClass>,
    classpath: Option<ClasspathIndex>,
}

impl ClassHierarchy {
    pub fn new(classpath: Option<ClasspathIndex>) -> Self {
        Self {
            project: HashMap::new(),
            classpath,
        }
    }

    /// Indexes every class-like item (top-level and nested) in `tree` under
    /// its dotted qualified name.
    pub fn add_item_tree(&mut self, tree: &ItemTree) {
        for i in 0..tree.classes.len() {
            let idx = ClassItemIdx(i as u32);
            let key = dotted_name(tree, idx);
            self.project.insert(key, resolved_from_item(tree.get(idx)));
        }
    }

    /// Looks up a class by its selector: an exact dotted-name match against
    /// project classes first, then a binary-name match (with one level of
    /// `$`-nesting tried at the tail) against the classpath index.
    pub fn lookup(&self, selector: &ClassSelector) -> Option<ResolvedClass> {
        let dotted = selector.to_string();
        if let Some(resolved) = self.project.get(&dotted) {
            return Some(resolved.clone());
        }

        let classpath = self.classpath.as_ref()?;
        let segments = selector.segments();
        if let Some(entry) = classpath.lookup_binary(&dotted.replace('.', "/")) {
            return Some(resolved_from_stub(&entry.stub));
        }
        if segments.len() >= 2 {
            let (last, init) = segments.split_last().expect("len >= 2");
            let package_and_outer = init
                .iter()
                .map(|n| n.as_str())
                .collect::<Vec<_>>()
                .join("/");
            let binary = format!("{}${}", package_and_outer, last.as_str());
            if let Some(entry) = classpath.lookup_binary(&binary) {
                return Some(resolved_from_stub(&entry.stub));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoimport_hir::{lower_item_tree, AstIdMap};
    use autoimport_syntax::{parse_java, AstNode, CompilationUnit, SyntaxNode};

    fn tree_from(text: &str) -> ItemTree {
        let parse = parse_java(text);
        let root = SyntaxNode::new_root(parse.green_node);
        let cu = CompilationUnit::cast(root.clone()).unwrap();
        let ast_id_map = AstIdMap::new(&root);
        lower_item_tree(&cu, &ast_id_map)
    }

    #[test]
    fn looks_up_project_class_by_dotted_name() {
        let tree = tree_from("class Parent { public int a; }\nclass Child extends Parent {}\n");
        let mut hierarchy = ClassHierarchy::new(None);
        hierarchy.add_item_tree(&tree);

        let resolved = hierarchy
            .lookup(&ClassSelector::single(Name::new("Parent")))
            .unwrap();
        assert!(resolved.members.iter().any(|n| n.as_str() == "a"));
    }

    #[test]
    fn looks_up_nested_project_class_by_dotted_path() {
        let tree = tree_from("class Outer { class Inner { public int x; } }\n");
        let mut hierarchy = ClassHierarchy::new(None);
        hierarchy.add_item_tree(&tree);

        let selector =
            ClassSelector::from_segments([Name::new("Outer"), Name::new("Inner")]).unwrap();
        let resolved = hierarchy.lookup(&selector).unwrap();
        assert!(resolved.members.iter().any(|n| n.as_str() == "x"));
    }
}
