//! The package-scope view of a single file's item tree: what it imports and
//! what top-level/nested classes it declares, keyed for lookup by the
//! scanner's package scope.

use std::collections::HashMap;

use autoimport_core::{Name, PackageName};
use autoimport_hir::{ClassItemIdx, ImportItem, ItemTree};

#[derive(Debug, Clone)]
pub struct DefMap {
    package: Option<PackageName>,
    imports: Vec<ImportItem>,
    top_level: HashMap<Name, ClassItemIdx>,
}

impl DefMap {
    pub fn from_item_tree(tree: &ItemTree) -> Self {
        let top_level = tree
            .top_level()
            .map(|(idx, item)| (item.name.clone(), idx))
            .collect();
        Self {
            package: tree.package.clone(),
            imports: tree.imports.clone(),
            top_level,
        }
    }

    pub fn package(&self) -> Option<&PackageName> {
        self.package.as_ref()
    }

    pub fn imports(&self) -> &[ImportItem] {
        &self.imports
    }

    /// The top-level class/interface/enum declared in this file under
    /// `name`, if any.
    pub fn lookup_top_level(&self, name: &Name) -> Option<ClassItemIdx> {
        self.top_level.get(name).copied()
    }

    /// A nested class reached by walking `path` (e.g. `["Outer", "Inner"]`)
    /// from this file's top-level declarations.
    pub fn lookup_nested(&self, tree: &ItemTree, path: &[Name]) -> Option<ClassItemIdx> {
        let (head, rest) = path.split_first()?;
        let mut current = self.lookup_top_level(head)?;
        for segment in rest {
            current = tree
                .get(current)
                .nested
                .iter()
                .find(|&&n| tree.get(n).name == *segment)
                .copied()?;
        }
        Some(current)
    }

    /// The single name an import binds into this file's package scope, if
    /// it's a single-type (not on-demand) import.
    pub fn imported_simple_names(&self) -> impl Iterator<Item = &Name> {
        self.imports.iter().filter_map(|i| i.bound_name())
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
    fn finds_top_level_and_nested_classes() {
        let tree = tree_from("class Outer { class Inner {} }\nclass Sibling {}\n");
        let def_map = DefMap::from_item_tree(&tree);

        assert!(def_map.lookup_top_level(&Name::new("Outer")).is_some());
        assert!(def_map.lookup_top_level(&Name::new("Sibling")).is_some());
        assert!(def_map
            .lookup_nested(&tree, &[Name::new("Outer"), Name::new("Inner")])
            .is_some());
        assert!(def_map
            .lookup_nested(&tree, &[Name::new("Outer"), Name::new("Missing")])
            .is_none());
    }

    #[test]
    fn exposes_single_type_import_bindings() {
        let tree = tree_from("import a.b.C;\nimport a.b.*;\nclass Foo {}\n");
        let def_map = DefMap::from_item_tree(&tree);
        let names: Vec<_> = def_map.imported_simple_names().map(Name::as_str).collect();
        assert_eq!(names, vec!["C"]);
    }
}
