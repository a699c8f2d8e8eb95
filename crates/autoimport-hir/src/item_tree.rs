//! A flat, file-scoped listing of top-level and nested class-like items.
//!
//! This is what `DefMap::from_item_tree` (in `autoimport-resolve`) is built
//! from. Bodies are not lowered here: everything below item granularity is
//! scanned directly over the AST View.

use autoimport_core::{Name, PackageName};
use autoimport_syntax::{AstNode, ClassDecl, CompilationUnit, FieldDecl, MethodDecl, SyntaxKind, SyntaxNode};

use crate::ast_id::{AstId, AstIdMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Enum,
    Annotation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportKind {
    TypeSingle,
    TypeStar,
    StaticSingle,
    StaticStar,
}

#[derive(Debug, Clone)]
pub struct ImportItem {
    pub segments: Vec<Name>,
    pub kind: ImportKind,
}

impl ImportItem {
    /// The simple (last-segment) name this import binds, if it binds one at
    /// all (wildcard imports bind nothing).
    pub fn bound_name(&self) -> Option<&Name> {
        match self.kind {
            ImportKind::TypeStar | ImportKind::StaticStar => None,
            ImportKind::TypeSingle | ImportKind::StaticSingle => self.segments.last(),
        }
    }
}

/// Index of a [`ClassItem`] within an [`ItemTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ClassItemIdx(pub u32);

#[derive(Debug, Clone)]
pub struct ClassItem {
    pub name: Name,
    pub kind: ClassKind,
    /// Segments of the declared superclass, as written (generic arguments
    /// already discarded by the AST View). Only ever populated for
    /// `ClassKind::Class`; interfaces' `extends` lists name interfaces, not a
    /// single superclass, and are outside the extender's walk.
    pub superclass: Option<Vec<Name>>,
    /// Non-private field and method names declared directly on this item —
    /// the identifiers visible to a subclass.
    pub members: Vec<Name>,
    pub nested: Vec<ClassItemIdx>,
    pub parent: Option<ClassItemIdx>,
    pub ast_id: AstId<SyntaxNode>,
}

#[derive(Debug, Clone, Default)]
pub struct ItemTree {
    pub package: Option<PackageName>,
    pub imports: Vec<ImportItem>,
    pub classes: Vec<ClassItem>,
}

impl ItemTree {
    pub fn top_level(&self) -> impl Iterator<Item = (ClassItemIdx, &ClassItem)> {
        self.classes
            .iter()
            .enumerate()
            .filter(|(_, c)| c.parent.is_none())
            .map(|(i, c)| (ClassItemIdx(i as u32), c))
    }

    pub fn get(&self, idx: ClassItemIdx) -> &ClassItem {
        &self.classes[idx.0 as usize]
    }

    pub fn find_top_level(&self, name: &str) -> Option<ClassItemIdx> {
        self.top_level()
            .find(|(_, c)| c.name.as_str() == name)
            .map(|(i, _)| i)
    }

    /// The JVM-style binary name (`Outer$Inner`) for an item.
    pub fn binary_name(&self, idx: ClassItemIdx) -> String {
        let item = self.get(idx);
        match item.parent {
            Some(parent) => format!("{}${}", self.binary_name(parent), item.name.as_str()),
            None => item.name.as_str().to_string(),
        }
    }
}

pub fn lower_item_tree(cu: &CompilationUnit, ast_id_map: &AstIdMap) -> ItemTree {
    let mut tree = ItemTree::default();

    tree.package = cu.package().and_then(|pkg| pkg.path()).map(|path| {
        PackageName::new(
            path.segments()
                .filter_map(|seg| seg.name())
                .map(|tok| Name::new(tok.text())),
        )
    });

    for import in cu.imports() {
        let Some(path) = import.path() else { continue };
        let segments: Vec<Name> = path
            .segments()
            .filter_map(|seg| seg.name())
            .map(|tok| Name::new(tok.text()))
            .collect();
        if segments.is_empty() {
            continue;
        }
        let kind = match (import.is_static(), import.is_on_demand()) {
            (false, false) => ImportKind::TypeSingle,
            (false, true) => ImportKind::TypeStar,
            (true, false) => ImportKind::StaticSingle,
            (true, true) => ImportKind::StaticStar,
        };
        tree.imports.push(ImportItem { segments, kind });
    }

    for class in cu.classes() {
        lower_class_like(class.syntax().clone(), ClassKind::Class, None, ast_id_map, &mut tree);
    }
    for iface in cu.interfaces() {
        lower_class_like(
            iface.syntax().clone(),
            ClassKind::Interface,
            None,
            ast_id_map,
            &mut tree,
        );
    }
    for en in cu.enums() {
        lower_class_like(en.syntax().clone(), ClassKind::Enum, None, ast_id_map, &mut tree);
    }

    tree
}

fn name_token(node: &SyntaxNode) -> Option<String> {
    node.children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == SyntaxKind::IDENT)
        .map(|t| t.text().to_string())
}

fn member_container(node: &SyntaxNode) -> SyntaxNode {
    match node.kind() {
        SyntaxKind::CLASS_DECL | SyntaxKind::INTERFACE_DECL | SyntaxKind::ANNOTATION_DECL => node
            .children()
            .find(|c| c.kind() == SyntaxKind::CLASS_BODY)
            .unwrap_or_else(|| node.clone()),
        // Enum bodies have no `CLASS_BODY` wrapper; members sit directly
        // under the `ENUM_DECL` node alongside the constant list.
        _ => node.clone(),
    }
}

fn modifiers_are_private(modifiers: Option<&SyntaxNode>) -> bool {
    modifiers.is_some_and(|m| {
        m.children_with_tokens()
            .filter_map(|it| it.into_token())
            .any(|t| t.kind() == SyntaxKind::PRIVATE_KW)
    })
}

fn lower_class_like(
    node: SyntaxNode,
    kind: ClassKind,
    parent: Option<ClassItemIdx>,
    ast_id_map: &AstIdMap,
    tree: &mut ItemTree,
) -> ClassItemIdx {
    let name = Name::new(name_token(&node).unwrap_or_default());

    let superclass = (kind == ClassKind::Class)
        .then(|| ClassDecl::cast(node.clone()))
        .flatten()
        .and_then(|c| c.extends_clause())
        .and_then(|ec| ec.types().next())
        .and_then(|t| t.path())
        .map(|p| {
            p.segments()
                .filter_map(|s| s.name())
                .map(|t| Name::new(t.text()))
                .collect::<Vec<_>>()
        })
        .filter(|segs| !segs.is_empty());

    let ast_id = ast_id_map
        .ast_id(&node)
        .unwrap_or_else(|| panic!("item node missing from AstIdMap"));

    let idx = ClassItemIdx(tree.classes.len() as u32);
    tree.classes.push(ClassItem {
        name,
        kind,
        superclass,
        members: Vec::new(),
        nested: Vec::new(),
        parent,
        ast_id,
    });

    let mut members = Vec::new();
    let mut nested = Vec::new();
    let mut pending_modifiers: Option<SyntaxNode> = None;

    for child in member_container(&node).children() {
        if child.kind() == SyntaxKind::MODIFIER_LIST {
            pending_modifiers = Some(child);
            continue;
        }

        let is_private = modifiers_are_private(pending_modifiers.as_ref());
        match child.kind() {
            SyntaxKind::FIELD_DECL if !is_private => {
                if let Some(field) = FieldDecl::cast(child.clone()) {
                    for decl in field.declarators() {
                        if let Some(n) = decl.name() {
                            members.push(Name::new(n.text()));
                        }
                    }
                }
            }
            SyntaxKind::METHOD_DECL if !is_private => {
                if let Some(method) = MethodDecl::cast(child.clone()) {
                    if let Some(n) = method.name() {
                        members.push(Name::new(n.text()));
                    }
                }
            }
            SyntaxKind::CLASS_DECL => {
                nested.push(lower_class_like(child, ClassKind::Class, Some(idx), ast_id_map, tree));
            }
            SyntaxKind::INTERFACE_DECL => {
                nested.push(lower_class_like(
                    child,
                    ClassKind::Interface,
                    Some(idx),
                    ast_id_map,
                    tree,
                ));
            }
            SyntaxKind::ENUM_DECL => {
                nested.push(lower_class_like(child, ClassKind::Enum, Some(idx), ast_id_map, tree));
            }
            _ => {}
        }
        pending_modifiers = None;
    }

    tree.classes[idx.0 as usize].members = members;
    tree.classes[idx.0 as usize].nested = nested;
    idx
}

#[cfg(test)]
mod tests {
    use super::*;
    use autoimport_syntax::parse_java;

    fn lower(text: &str) -> (ItemTree, AstIdMap) {
        let parse = parse_java(text);
        let root = autoimport_syntax::SyntaxNode::new_root(parse.green_node);
        let cu = CompilationUnit::cast(root.clone()).unwrap();
        let ast_id_map = AstIdMap::new(&root);
        (lower_item_tree(&cu, &ast_id_map), ast_id_map)
    }

    #[test]
    fn lowers_package_and_imports() {
        let (tree, _) = lower("package a.b;\nimport a.b.C;\nimport a.b.*;\nclass Foo {}\n");
        assert_eq!(tree.package.unwrap().to_string(), "a.b");
        assert_eq!(tree.imports.len(), 2);
        assert_eq!(tree.imports[0].kind, ImportKind::TypeSingle);
        assert_eq!(tree.imports[1].kind, ImportKind::TypeStar);
    }

    #[test]
    fn lowers_superclass_and_members_excluding_private() {
        let (tree, _) = lower(
            "class Parent { public int a; private int hidden; void g() {} }\n\
             class Child extends Parent { int b; }\n",
        );
        let parent = tree.find_top_level("Parent").unwrap();
        let parent_item = tree.get(parent);
        let member_names: Vec<_> = parent_item.members.iter().map(Name::as_str).collect();
        assert!(member_names.contains(&"a"));
        assert!(member_names.contains(&"g"));
        assert!(!member_names.contains(&"hidden"));

        let child = tree.find_top_level("Child").unwrap();
        let child_item = tree.get(child);
        let superclass: Vec<_> = child_item
            .superclass
            .as_ref()
            .unwrap()
            .iter()
            .map(Name::as_str)
            .collect();
        assert_eq!(superclass, vec!["Parent"]);
    }

    #[test]
    fn lowers_nested_class_binary_name() {
        let (tree, _) = lower("class Outer { class Inner {} }\n");
        let outer = tree.find_top_level("Outer").unwrap();
        let inner = tree.get(outer).nested[0];
        assert_eq!(tree.binary_name(inner), "Outer$Inner");
    }
}
