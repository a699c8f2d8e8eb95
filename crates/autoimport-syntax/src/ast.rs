//! Typed views over the untyped [`SyntaxNode`] tree.
//!
//! Each wrapper is a thin, `Copy`-free handle around a `SyntaxNode`; they are
//! cheap to construct and re-derive their fields on each accessor call,
//! matching the rust-analyzer `AstNode` idiom this crate follows.

use crate::syntax_kind::{SyntaxKind, SyntaxNode, SyntaxToken};

/// A typed wrapper that can be cast from an untyped [`SyntaxNode`].
pub trait AstNode: Sized {
    fn can_cast(kind: SyntaxKind) -> bool;
    fn cast(node: SyntaxNode) -> Option<Self>;
    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($name:ident, $kind:expr) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                kind == $kind
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then(|| Self(node))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }
    };
}

ast_node!(CompilationUnit, SyntaxKind::COMPILATION_UNIT);
ast_node!(PackageDecl, SyntaxKind::PACKAGE_DECL);
ast_node!(ImportDecl, SyntaxKind::IMPORT_DECL);
ast_node!(ClassDecl, SyntaxKind::CLASS_DECL);
ast_node!(InterfaceDecl, SyntaxKind::INTERFACE_DECL);
ast_node!(EnumDecl, SyntaxKind::ENUM_DECL);
ast_node!(ClassBody, SyntaxKind::CLASS_BODY);
ast_node!(ExtendsClause, SyntaxKind::EXTENDS_CLAUSE);
ast_node!(ImplementsClause, SyntaxKind::IMPLEMENTS_CLAUSE);
ast_node!(FieldDecl, SyntaxKind::FIELD_DECL);
ast_node!(MethodDecl, SyntaxKind::METHOD_DECL);
ast_node!(ConstructorDecl, SyntaxKind::CONSTRUCTOR_DECL);
ast_node!(ParamList, SyntaxKind::PARAM_LIST);
ast_node!(Param, SyntaxKind::PARAM);
ast_node!(Block, SyntaxKind::BLOCK);
ast_node!(TypeRef, SyntaxKind::TYPE_REF);
ast_node!(PathType, SyntaxKind::PATH_TYPE);
ast_node!(PathSegment, SyntaxKind::PATH_SEGMENT);
ast_node!(TypeArgList, SyntaxKind::TYPE_ARG_LIST);
ast_node!(TypeParamList, SyntaxKind::TYPE_PARAM_LIST);
ast_node!(TypeParam, SyntaxKind::TYPE_PARAM);
ast_node!(VariableDeclaratorList, SyntaxKind::VARIABLE_DECLARATOR_LIST);
ast_node!(VariableDeclarator, SyntaxKind::VARIABLE_DECLARATOR);
ast_node!(LocalVarDecl, SyntaxKind::LOCAL_VAR_DECL);
ast_node!(ArgList, SyntaxKind::ARG_LIST);

/// First child of `self.syntax()` that casts to `N`.
fn child<N: AstNode>(parent: &SyntaxNode) -> Option<N> {
    parent.children().find_map(N::cast)
}

/// All children of `self.syntax()` that cast to `N`.
fn children<N: AstNode>(parent: &SyntaxNode) -> impl Iterator<Item = N> {
    parent.children().filter_map(N::cast)
}

fn token(parent: &SyntaxNode, kind: SyntaxKind) -> Option<SyntaxToken> {
    parent
        .children_with_tokens()
        .filter_map(|it| it.into_token())
        .find(|t| t.kind() == kind)
}

impl CompilationUnit {
    pub fn package(&self) -> Option<PackageDecl> {
        child(self.syntax())
    }

    pub fn imports(&self) -> impl Iterator<Item = ImportDecl> {
        children(self.syntax())
    }

    pub fn classes(&self) -> impl Iterator<Item = ClassDecl> {
        children(self.syntax())
    }

    pub fn interfaces(&self) -> impl Iterator<Item = InterfaceDecl> {
        children(self.syntax())
    }

    pub fn enums(&self) -> impl Iterator<Item = EnumDecl> {
        children(self.syntax())
    }
}

impl PackageDecl {
    pub fn path(&self) -> Option<PathType> {
        child(self.syntax())
    }
}

impl ImportDecl {
    pub fn path(&self) -> Option<PathType> {
        child(self.syntax())
    }

    pub fn is_static(&self) -> bool {
        token(self.syntax(), SyntaxKind::STATIC_KW).is_some()
    }

    pub fn is_on_demand(&self) -> bool {
        token(self.syntax(), SyntaxKind::STAR).is_some()
    }
}

impl PathType {
    pub fn segments(&self) -> impl Iterator<Item = PathSegment> {
        children(self.syntax())
    }
}

impl PathSegment {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(self.syntax(), SyntaxKind::IDENT)
    }

    pub fn type_args(&self) -> Option<TypeArgList> {
        child(self.syntax())
    }
}

impl TypeArgList {
    pub fn type_refs(&self) -> impl Iterator<Item = TypeRef> {
        children(self.syntax())
    }
}

impl TypeParamList {
    pub fn type_params(&self) -> impl Iterator<Item = TypeParam> {
        children(self.syntax())
    }
}

impl TypeParam {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(self.syntax(), SyntaxKind::IDENT)
    }

    /// The `extends` bound, if present (`<T extends Foo>`).
    pub fn bound(&self) -> Option<TypeRef> {
        child(self.syntax())
    }
}

impl ClassDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(self.syntax(), SyntaxKind::IDENT)
    }

    pub fn type_params(&self) -> Option<TypeParamList> {
        child(self.syntax())
    }

    pub fn extends_clause(&self) -> Option<ExtendsClause> {
        child(self.syntax())
    }

    pub fn implements_clause(&self) -> Option<ImplementsClause> {
        child(self.syntax())
    }

    pub fn body(&self) -> Option<ClassBody> {
        child(self.syntax())
    }
}

impl InterfaceDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(self.syntax(), SyntaxKind::IDENT)
    }

    pub fn extends_clause(&self) -> Option<ExtendsClause> {
        child(self.syntax())
    }

    pub fn body(&self) -> Option<ClassBody> {
        child(self.syntax())
    }
}

impl EnumDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(self.syntax(), SyntaxKind::IDENT)
    }

    pub fn implements_clause(&self) -> Option<ImplementsClause> {
        child(self.syntax())
    }
}

impl ExtendsClause {
    pub fn types(&self) -> impl Iterator<Item = TypeRef> {
        children(self.syntax())
    }
}

impl ImplementsClause {
    pub fn types(&self) -> impl Iterator<Item = TypeRef> {
        children(self.syntax())
    }
}

impl ClassBody {
    pub fn methods(&self) -> impl Iterator<Item = MethodDecl> {
        children(self.syntax())
    }

    pub fn constructors(&self) -> impl Iterator<Item = ConstructorDecl> {
        children(self.syntax())
    }

    pub fn fields(&self) -> impl Iterator<Item = FieldDecl> {
        children(self.syntax())
    }

    pub fn classes(&self) -> impl Iterator<Item = ClassDecl> {
        children(self.syntax())
    }

    pub fn interfaces(&self) -> impl Iterator<Item = InterfaceDecl> {
        children(self.syntax())
    }

    pub fn enums(&self) -> impl Iterator<Item = EnumDecl> {
        children(self.syntax())
    }
}

impl FieldDecl {
    pub fn ty(&self) -> Option<TypeRef> {
        child(self.syntax())
    }

    pub fn declarators(&self) -> impl Iterator<Item = VariableDeclarator> {
        self.syntax()
            .children()
            .find_map(VariableDeclaratorList::cast)
            .into_iter()
            .flat_map(|list| children::<VariableDeclarator>(list.syntax()).collect::<Vec<_>>())
    }
}

impl VariableDeclarator {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(self.syntax(), SyntaxKind::IDENT)
    }

    pub fn initializer(&self) -> Option<SyntaxNode> {
        self.syntax().children().last()
    }
}

impl MethodDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(self.syntax(), SyntaxKind::IDENT)
    }

    pub fn return_type(&self) -> Option<TypeRef> {
        child(self.syntax())
    }

    pub fn params(&self) -> Option<ParamList> {
        child(self.syntax())
    }

    pub fn body(&self) -> Option<Block> {
        child(self.syntax())
    }
}

impl ConstructorDecl {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(self.syntax(), SyntaxKind::IDENT)
    }

    pub fn params(&self) -> Option<ParamList> {
        child(self.syntax())
    }

    pub fn body(&self) -> Option<Block> {
        child(self.syntax())
    }
}

impl ParamList {
    pub fn params(&self) -> impl Iterator<Item = Param> {
        children(self.syntax())
    }
}

impl Param {
    pub fn name(&self) -> Option<SyntaxToken> {
        token(self.syntax(), SyntaxKind::IDENT)
    }

    pub fn ty(&self) -> Option<TypeRef> {
        child(self.syntax())
    }

    pub fn is_varargs(&self) -> bool {
        token(self.syntax(), SyntaxKind::DOTDOTDOT).is_some()
    }
}

impl Block {
    pub fn statements(&self) -> impl Iterator<Item = Stmt> {
        self.syntax().children().filter_map(Stmt::cast)
    }
}

impl LocalVarDecl {
    pub fn ty(&self) -> Option<TypeRef> {
        child(self.syntax())
    }

    pub fn declarators(&self) -> impl Iterator<Item = VariableDeclarator> {
        self.syntax()
            .children()
            .find_map(VariableDeclaratorList::cast)
            .into_iter()
            .flat_map(|list| children::<VariableDeclarator>(list.syntax()).collect::<Vec<_>>())
    }
}

impl TypeRef {
    pub fn path(&self) -> Option<PathType> {
        child(self.syntax())
    }

    pub fn array_dims(&self) -> usize {
        self.syntax()
            .children_with_tokens()
            .filter(|it| it.kind() == SyntaxKind::LBRACKET)
            .count()
    }
}

/// Any statement-kind node. Kept as a thin enum over [`SyntaxNode`] rather
/// than one struct per kind: most callers only need the kind and the span,
/// not per-kind accessors.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Stmt {
    Block(Block),
    LocalVarDecl(LocalVarDecl),
    Other(SyntaxNode),
}

const STMT_KINDS: &[SyntaxKind] = &[
    SyntaxKind::BLOCK,
    SyntaxKind::LOCAL_VAR_DECL,
    SyntaxKind::EXPR_STMT,
    SyntaxKind::IF_STMT,
    SyntaxKind::WHILE_STMT,
    SyntaxKind::DO_WHILE_STMT,
    SyntaxKind::FOR_STMT,
    SyntaxKind::FOR_EACH_STMT,
    SyntaxKind::RETURN_STMT,
    SyntaxKind::BREAK_STMT,
    SyntaxKind::CONTINUE_STMT,
    SyntaxKind::THROW_STMT,
    SyntaxKind::TRY_STMT,
    SyntaxKind::SWITCH_STMT,
    SyntaxKind::ASSERT_STMT,
    SyntaxKind::YIELD_STMT,
    SyntaxKind::EMPTY_STMT,
    SyntaxKind::LOCAL_CLASS_STMT,
];

impl AstNode for Stmt {
    fn can_cast(kind: SyntaxKind) -> bool {
        STMT_KINDS.contains(&kind)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        if !Self::can_cast(node.kind()) {
            return None;
        }
        Some(match node.kind() {
            SyntaxKind::BLOCK => Stmt::Block(Block::cast(node)?),
            SyntaxKind::LOCAL_VAR_DECL => Stmt::LocalVarDecl(LocalVarDecl::cast(node)?),
            _ => Stmt::Other(node),
        })
    }

    fn syntax(&self) -> &SyntaxNode {
        match self {
            Stmt::Block(it) => it.syntax(),
            Stmt::LocalVarDecl(it) => it.syntax(),
            Stmt::Other(it) => it,
        }
    }
}

/// Any expression-kind node; see [`Stmt`] for why this is a thin enum rather
/// than one struct per kind.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Expr(SyntaxNode);

const EXPR_KINDS: &[SyntaxKind] = &[
    SyntaxKind::LAMBDA_EXPR,
    SyntaxKind::METHOD_CALL_EXPR,
    SyntaxKind::FIELD_ACCESS_EXPR,
    SyntaxKind::NAME_REF_EXPR,
    SyntaxKind::THIS_EXPR,
    SyntaxKind::SUPER_EXPR,
    SyntaxKind::NEW_EXPR,
    SyntaxKind::ARRAY_ACCESS_EXPR,
    SyntaxKind::CAST_EXPR,
    SyntaxKind::PAREN_EXPR,
    SyntaxKind::BIN_EXPR,
    SyntaxKind::UNARY_EXPR,
    SyntaxKind::ASSIGN_EXPR,
    SyntaxKind::INSTANCEOF_EXPR,
    SyntaxKind::TERNARY_EXPR,
    SyntaxKind::LITERAL_EXPR,
];

impl AstNode for Expr {
    fn can_cast(kind: SyntaxKind) -> bool {
        EXPR_KINDS.contains(&kind)
    }

    fn cast(node: SyntaxNode) -> Option<Self> {
        Self::can_cast(node.kind()).then(|| Self(node))
    }

    fn syntax(&self) -> &SyntaxNode {
        &self.0
    }
}

impl Expr {
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind()
    }

    /// For `NAME_REF_EXPR` and `FIELD_ACCESS_EXPR` nodes, the identifier
    /// token naming the referenced symbol.
    pub fn name_ref(&self) -> Option<SyntaxToken> {
        token(&self.0, SyntaxKind::IDENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_java;

    fn root(text: &str) -> SyntaxNode {
        SyntaxNode::new_root(parse_java(text).green_node)
    }

    #[test]
    fn compilation_unit_exposes_package_and_imports() {
        let node = root("package a.b;\nimport a.b.C;\nclass Foo {}\n");
        let cu = CompilationUnit::cast(node).unwrap();
        let pkg = cu.package().unwrap();
        let segs: Vec<_> = pkg
            .path()
            .unwrap()
            .segments()
            .filter_map(|s| s.name().map(|t| t.text().to_string()))
            .collect();
        assert_eq!(segs, vec!["a", "b"]);
        assert_eq!(cu.imports().count(), 1);
        assert_eq!(cu.classes().count(), 1);
    }

    #[test]
    fn class_decl_exposes_extends_and_members() {
        let node = root("class Foo extends Bar { int x; void m() {} }");
        let cu = CompilationUnit::cast(node).unwrap();
        let class = cu.classes().next().unwrap();
        assert_eq!(class.name().unwrap().text(), "Foo");
        let extends = class.extends_clause().unwrap();
        let super_name = extends
            .types()
            .next()
            .unwrap()
            .path()
            .unwrap()
            .segments()
            .next()
            .unwrap()
            .name()
            .unwrap()
            .text()
            .to_string();
        assert_eq!(super_name, "Bar");
        let body = class.body().unwrap();
        assert_eq!(body.fields().count(), 1);
        assert_eq!(body.methods().count(), 1);
    }

    #[test]
    fn method_params_are_typed() {
        let node = root("class Foo { void m(int a, String... b) {} }");
        let cu = CompilationUnit::cast(node).unwrap();
        let method = cu.classes().next().unwrap().body().unwrap().methods().next().unwrap();
        let params: Vec<_> = method.params().unwrap().params().collect();
        assert_eq!(params.len(), 2);
        assert!(params[1].is_varargs());
    }
}
