//! Lexing and lossless parsing for the Java subset this workspace analyzes.
//!
//! The tree produced by [`parse_java`] is untyped `rowan` green/red nodes
//! keyed by [`SyntaxKind`]; [`ast`] layers typed accessors on top of it.

mod ast;
mod lexer;
mod parser;
mod syntax_kind;

pub use ast::{
    ArgList, AstNode, Block, ClassBody, ClassDecl, CompilationUnit, ConstructorDecl, EnumDecl,
    Expr, ExtendsClause, FieldDecl, ImplementsClause, ImportDecl, InterfaceDecl, LocalVarDecl,
    MethodDecl, PackageDecl, Param, ParamList, PathSegment, PathType, Stmt, TypeArgList, TypeParam,
    TypeParamList, TypeRef, VariableDeclarator, VariableDeclaratorList,
};
pub use lexer::{lex, Token};
pub use parser::{parse_java, Parse, SyntaxError};
pub use syntax_kind::{JavaLang, SyntaxElement, SyntaxKind, SyntaxNode, SyntaxToken};
