//! The flat token/node kind set used by the lossless syntax tree.

#![allow(non_camel_case_types)]

/// Every kind of token or node that can appear in the green tree.
///
/// Mirrors the subset of Java's grammar this parser understands. Kept as a
/// single flat enum (rust-analyzer's `SyntaxKind` idiom) rather than a tree of
/// sum types, so the tree stays lossless and untyped at the rowan layer; the
/// `ast` module layers typed views on top.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // Tokens
    WHITESPACE,
    COMMENT,
    IDENT,
    INT_LIT,
    FLOAT_LIT,
    STRING_LIT,
    CHAR_LIT,
    TRUE_KW,
    FALSE_KW,
    NULL_KW,
    THIS_KW,
    SUPER_KW,
    CLASS_KW,
    INTERFACE_KW,
    ENUM_KW,
    AT_INTERFACE_KW,
    EXTENDS_KW,
    IMPLEMENTS_KW,
    PACKAGE_KW,
    IMPORT_KW,
    STATIC_KW,
    PUBLIC_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    FINAL_KW,
    ABSTRACT_KW,
    SYNCHRONIZED_KW,
    NATIVE_KW,
    TRANSIENT_KW,
    VOLATILE_KW,
    STRICTFP_KW,
    DEFAULT_KW,
    VOID_KW,
    NEW_KW,
    RETURN_KW,
    IF_KW,
    ELSE_KW,
    FOR_KW,
    WHILE_KW,
    DO_KW,
    SWITCH_KW,
    CASE_KW,
    BREAK_KW,
    CONTINUE_KW,
    TRY_KW,
    CATCH_KW,
    FINALLY_KW,
    THROW_KW,
    THROWS_KW,
    INSTANCEOF_KW,
    VAR_KW,
    ASSERT_KW,
    YIELD_KW,

    LPAREN,
    RPAREN,
    LBRACE,
    RBRACE,
    LBRACKET,
    RBRACKET,
    SEMI,
    COMMA,
    DOT,
    DOTDOTDOT,
    COLON,
    COLONCOLON,
    AT,
    EQ,
    EQEQ,
    NEQ,
    LT,
    GT,
    LTEQ,
    GTEQ,
    PLUS,
    MINUS,
    STAR,
    SLASH,
    PERCENT,
    AMP,
    PIPE,
    CARET,
    BANG,
    TILDE,
    QUESTION,
    AMPAMP,
    PIPEPIPE,
    ARROW,
    PLUSPLUS,
    MINUSMINUS,
    PLUSEQ,
    MINUSEQ,
    STAREQ,
    SLASHEQ,

    ERROR_TOKEN,

    // Nodes
    COMPILATION_UNIT,
    PACKAGE_DECL,
    IMPORT_DECL,
    CLASS_DECL,
    INTERFACE_DECL,
    ENUM_DECL,
    ANNOTATION_DECL,
    MODIFIER_LIST,
    ANNOTATION,
    ANNOTATION_ARG_LIST,
    ANNOTATION_ARG,
    EXTENDS_CLAUSE,
    IMPLEMENTS_CLAUSE,
    TYPE_PARAM_LIST,
    TYPE_PARAM,
    TYPE_ARG_LIST,
    TYPE_REF,
    PATH_TYPE,
    PATH_SEGMENT,
    ARRAY_TYPE,
    CLASS_BODY,
    FIELD_DECL,
    VARIABLE_DECLARATOR_LIST,
    VARIABLE_DECLARATOR,
    METHOD_DECL,
    CONSTRUCTOR_DECL,
    PARAM_LIST,
    PARAM,
    THROWS_CLAUSE,
    BLOCK,
    LOCAL_VAR_DECL,
    EXPR_STMT,
    IF_STMT,
    WHILE_STMT,
    DO_WHILE_STMT,
    FOR_STMT,
    FOR_EACH_STMT,
    RETURN_STMT,
    BREAK_STMT,
    CONTINUE_STMT,
    THROW_STMT,
    TRY_STMT,
    RESOURCE_LIST,
    RESOURCE,
    CATCH_CLAUSE,
    FINALLY_CLAUSE,
    SWITCH_STMT,
    SWITCH_CASE,
    ASSERT_STMT,
    YIELD_STMT,
    EMPTY_STMT,
    LOCAL_CLASS_STMT,

    LAMBDA_EXPR,
    LAMBDA_PARAM_LIST,
    METHOD_CALL_EXPR,
    FIELD_ACCESS_EXPR,
    NAME_REF_EXPR,
    THIS_EXPR,
    SUPER_EXPR,
    NEW_EXPR,
    ARRAY_ACCESS_EXPR,
    CAST_EXPR,
    PAREN_EXPR,
    BIN_EXPR,
    UNARY_EXPR,
    ASSIGN_EXPR,
    INSTANCEOF_EXPR,
    TERNARY_EXPR,
    LITERAL_EXPR,
    ARG_LIST,

    ERROR,

    #[doc(hidden)]
    __LAST,
}

impl SyntaxKind {
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::WHITESPACE | SyntaxKind::COMMENT)
    }

    fn from_raw(raw: u16) -> SyntaxKind {
        use SyntaxKind::*;
        const ALL: &[SyntaxKind] = &[
            WHITESPACE, COMMENT, IDENT, INT_LIT, FLOAT_LIT, STRING_LIT, CHAR_LIT, TRUE_KW,
            FALSE_KW, NULL_KW, THIS_KW, SUPER_KW, CLASS_KW, INTERFACE_KW, ENUM_KW,
            AT_INTERFACE_KW, EXTENDS_KW, IMPLEMENTS_KW, PACKAGE_KW, IMPORT_KW, STATIC_KW,
            PUBLIC_KW, PRIVATE_KW, PROTECTED_KW, FINAL_KW, ABSTRACT_KW, SYNCHRONIZED_KW,
            NATIVE_KW, TRANSIENT_KW, VOLATILE_KW, STRICTFP_KW, DEFAULT_KW, VOID_KW, NEW_KW,
            RETURN_KW, IF_KW, ELSE_KW, FOR_KW, WHILE_KW, DO_KW, SWITCH_KW, CASE_KW, BREAK_KW,
            CONTINUE_KW, TRY_KW, CATCH_KW, FINALLY_KW, THROW_KW, THROWS_KW, INSTANCEOF_KW,
            VAR_KW, ASSERT_KW, YIELD_KW, LPAREN, RPAREN, LBRACE, RBRACE, LBRACKET, RBRACKET,
            SEMI, COMMA, DOT, DOTDOTDOT, COLON, COLONCOLON, AT, EQ, EQEQ, NEQ, LT, GT, LTEQ,
            GTEQ, PLUS, MINUS, STAR, SLASH, PERCENT, AMP, PIPE, CARET, BANG, TILDE, QUESTION,
            AMPAMP, PIPEPIPE, ARROW, PLUSPLUS, MINUSMINUS, PLUSEQ, MINUSEQ, STAREQ, SLASHEQ,
            ERROR_TOKEN, COMPILATION_UNIT, PACKAGE_DECL, IMPORT_DECL, CLASS_DECL,
            INTERFACE_DECL, ENUM_DECL, ANNOTATION_DECL, MODIFIER_LIST, ANNOTATION,
            ANNOTATION_ARG_LIST, ANNOTATION_ARG, EXTENDS_CLAUSE, IMPLEMENTS_CLAUSE,
            TYPE_PARAM_LIST, TYPE_PARAM, TYPE_ARG_LIST, TYPE_REF, PATH_TYPE, PATH_SEGMENT,
            ARRAY_TYPE, CLASS_BODY, FIELD_DECL, VARIABLE_DECLARATOR_LIST, VARIABLE_DECLARATOR,
            METHOD_DECL, CONSTRUCTOR_DECL, PARAM_LIST, PARAM, THROWS_CLAUSE, BLOCK,
            LOCAL_VAR_DECL, EXPR_STMT, IF_STMT, WHILE_STMT, DO_WHILE_STMT, FOR_STMT,
            FOR_EACH_STMT, RETURN_STMT, BREAK_STMT, CONTINUE_STMT, THROW_STMT, TRY_STMT,
            RESOURCE_LIST, RESOURCE, CATCH_CLAUSE, FINALLY_CLAUSE, SWITCH_STMT, SWITCH_CASE,
            ASSERT_STMT, YIELD_STMT, EMPTY_STMT, LOCAL_CLASS_STMT, LAMBDA_EXPR,
            LAMBDA_PARAM_LIST, METHOD_CALL_EXPR, FIELD_ACCESS_EXPR, NAME_REF_EXPR, THIS_EXPR,
            SUPER_EXPR, NEW_EXPR, ARRAY_ACCESS_EXPR, CAST_EXPR, PAREN_EXPR, BIN_EXPR,
            UNARY_EXPR, ASSIGN_EXPR, INSTANCEOF_EXPR, TERNARY_EXPR, LITERAL_EXPR, ARG_LIST,
            ERROR,
        ];
        ALL[raw as usize]
    }
}

/// The [`rowan::Language`] marker for this grammar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum JavaLang {}

impl rowan::Language for JavaLang {
    type Kind = SyntaxKind;

    fn kind_from_raw(raw: rowan::SyntaxKind) -> Self::Kind {
        SyntaxKind::from_raw(raw.0)
    }

    fn kind_to_raw(kind: Self::Kind) -> rowan::SyntaxKind {
        rowan::SyntaxKind(kind as u16)
    }
}

pub type SyntaxNode = rowan::SyntaxNode<JavaLang>;
pub type SyntaxToken = rowan::SyntaxToken<JavaLang>;
pub type SyntaxElement = rowan::NodeOrToken<SyntaxNode, SyntaxToken>;
