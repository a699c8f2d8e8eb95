//! Hand-written recursive-descent parser producing a lossless `rowan` tree.
//!
//! Unrecognized constructs are wrapped in an `ERROR` node and traversal
//! continues; the parser never aborts outright. Callers decide what to do
//! with a non-empty error list.

use rowan::{GreenNode, GreenNodeBuilder};
use text_size::TextRange;

use crate::lexer::{lex, Token};
use crate::syntax_kind::SyntaxKind::{self, *};

#[derive(Debug, Clone)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

pub struct Parse {
    pub green_node: GreenNode,
    pub errors: Vec<SyntaxError>,
}

pub fn parse_java(text: &str) -> Parse {
    let tokens = lex(text);
    let mut parser = Parser {
        source: text,
        tokens,
        pos: 0,
        builder: GreenNodeBuilder::new(),
        errors: Vec::new(),
    };
    parser.parse_compilation_unit();
    Parse {
        green_node: parser.builder.finish(),
        errors: parser.errors,
    }
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

const MODIFIER_KINDS: &[SyntaxKind] = &[
    PUBLIC_KW,
    PRIVATE_KW,
    PROTECTED_KW,
    STATIC_KW,
    FINAL_KW,
    ABSTRACT_KW,
    SYNCHRONIZED_KW,
    NATIVE_KW,
    TRANSIENT_KW,
    VOLATILE_KW,
    STRICTFP_KW,
    DEFAULT_KW,
];

impl<'a> Parser<'a> {
    // --- low-level token access -------------------------------------------------

    fn nth_raw(&self, n: usize) -> usize {
        let mut i = self.pos;
        let mut seen = 0;
        while i < self.tokens.len() {
            if !self.tokens[i].kind.is_trivia() {
                if seen == n {
                    return i;
                }
                seen += 1;
            }
            i += 1;
        }
        self.tokens.len()
    }

    fn nth(&self, n: usize) -> SyntaxKind {
        let i = self.nth_raw(n);
        self.tokens
            .get(i)
            .map(|t| t.kind)
            .unwrap_or(SyntaxKind::ERROR_TOKEN)
    }

    fn current(&self) -> SyntaxKind {
        self.nth(0)
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == kind
    }

    fn at_eof(&self) -> bool {
        self.nth_raw(0) >= self.tokens.len()
    }

    fn start_node(&mut self, kind: SyntaxKind) {
        self.builder.start_node(kind.into());
    }

    fn finish_node(&mut self) {
        self.builder.finish_node();
    }

    /// Consume trivia and the current raw token, pushing their text.
    fn bump(&mut self) {
        self.bump_trivia();
        if self.pos < self.tokens.len() {
            let tok = self.tokens[self.pos];
            self.builder.token(tok.kind.into(), &self.source[tok.range]);
            self.pos += 1;
        }
    }

    fn bump_trivia(&mut self) {
        while self.pos < self.tokens.len() && self.tokens[self.pos].kind.is_trivia() {
            let tok = self.tokens[self.pos];
            self.builder.token(tok.kind.into(), &self.source[tok.range]);
            self.pos += 1;
        }
    }

    fn eat(&mut self, kind: SyntaxKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: SyntaxKind) {
        if !self.eat(kind) {
            self.error(format!("expected {kind:?}, found {:?}", self.current()));
        }
    }

    fn error(&mut self, message: String) {
        let range = self
            .tokens
            .get(self.nth_raw(0))
            .map(|t| t.range)
            .unwrap_or_else(|| TextRange::empty(0.into()));
        self.errors.push(SyntaxError { message, range });
    }

    /// Recover from an unparseable construct: consume tokens into an `ERROR`
    /// node until one of `stop` is seen at bracket depth 0, or EOF.
    fn error_recover(&mut self, stop: &[SyntaxKind]) {
        self.start_node(ERROR);
        self.error(format!("unexpected token {:?}", self.current()));
        let mut depth = 0i32;
        loop {
            self.bump_trivia();
            if self.pos >= self.tokens.len() {
                break;
            }
            let kind = self.tokens[self.pos].kind;
            if depth == 0 && stop.contains(&kind) {
                break;
            }
            match kind {
                LBRACE | LPAREN | LBRACKET => depth += 1,
                RBRACE | RPAREN | RBRACKET => depth -= 1,
                _ => {}
            }
            self.bump();
        }
        self.finish_node();
    }

    // --- compilation unit ----------------------------------------------------

    fn parse_compilation_unit(&mut self) {
        self.start_node(COMPILATION_UNIT);
        self.skip_annotations_before_package();
        if self.at(PACKAGE_KW) {
            self.parse_package_decl();
        }
        while self.at(IMPORT_KW) {
            self.parse_import_decl();
        }
        while !self.at_eof() {
            if self.at(SEMI) {
                self.bump();
                continue;
            }
            self.parse_type_decl();
        }
        self.bump_trivia();
        self.finish_node();
    }

    fn skip_annotations_before_package(&mut self) {
        while self.at(AT) && self.nth(1) != INTERFACE_KW {
            self.parse_annotation();
        }
    }

    fn parse_package_decl(&mut self) {
        self.start_node(PACKAGE_DECL);
        self.bump(); // package
        self.parse_qualified_name_path();
        self.expect(SEMI);
        self.finish_node();
    }

    fn parse_import_decl(&mut self) {
        self.start_node(IMPORT_DECL);
        self.bump(); // import
        self.eat(STATIC_KW);
        self.parse_qualified_name_path();
        if self.at(DOT) && self.nth(1) == STAR {
            self.bump();
            self.bump();
        }
        self.expect(SEMI);
        self.finish_node();
    }

    /// A dotted name used in package/import declarations: `a.b.c`.
    fn parse_qualified_name_path(&mut self) {
        self.start_node(PATH_TYPE);
        self.expect_ident_segment();
        while self.at(DOT) && self.nth(1) == IDENT {
            self.bump();
            self.expect_ident_segment();
        }
        self.finish_node();
    }

    fn expect_ident_segment(&mut self) {
        self.start_node(PATH_SEGMENT);
        self.expect(IDENT);
        self.finish_node();
    }

    // --- type declarations ---------------------------------------------------

    fn parse_type_decl(&mut self) {
        self.parse_modifiers_and_annotations();

        match self.current() {
            CLASS_KW => self.parse_class_like(CLASS_DECL, CLASS_KW),
            INTERFACE_KW => self.parse_class_like(INTERFACE_DECL, INTERFACE_KW),
            ENUM_KW => self.parse_enum_decl(),
            AT_INTERFACE_KW => self.parse_class_like(ANNOTATION_DECL, AT_INTERFACE_KW),
            _ if self.at(AT) && self.nth(1) == INTERFACE_KW => {
                self.bump(); // @
                self.parse_class_like(ANNOTATION_DECL, INTERFACE_KW);
            }
            _ => self.error_recover(&[SEMI, RBRACE]),
        }
    }

    fn at_modifier_or_annotation(&self) -> bool {
        MODIFIER_KINDS.contains(&self.current())
            || (self.at(AT) && self.nth(1) != INTERFACE_KW)
    }

    fn skip_one_modifier_or_annotation(&mut self) {
        if self.at(AT) {
            self.parse_annotation();
        } else {
            self.bump();
        }
    }

    fn parse_modifiers_and_annotations(&mut self) {
        self.start_node(MODIFIER_LIST);
        while self.at_modifier_or_annotation() {
            self.skip_one_modifier_or_annotation();
        }
        self.finish_node();
    }

    fn parse_annotation(&mut self) {
        self.start_node(ANNOTATION);
        self.bump(); // @
        self.parse_qualified_name_path();
        if self.at(LPAREN) {
            self.start_node(ANNOTATION_ARG_LIST);
            self.bump();
            while !self.at(RPAREN) && !self.at_eof() {
                self.start_node(ANNOTATION_ARG);
                if self.at(IDENT) && self.nth(1) == EQ {
                    self.bump();
                    self.bump();
                }
                self.parse_annotation_value();
                self.finish_node();
                if !self.eat(COMMA) {
                    break;
                }
            }
            self.expect(RPAREN);
            self.finish_node();
        }
        self.finish_node();
    }

    fn parse_annotation_value(&mut self) {
        if self.at(AT) {
            self.parse_annotation();
        } else if self.at(LBRACE) {
            self.bump();
            while !self.at(RBRACE) && !self.at_eof() {
                self.parse_annotation_value();
                if !self.eat(COMMA) {
                    break;
                }
            }
            self.expect(RBRACE);
        } else {
            self.parse_expr();
        }
    }

    fn parse_class_like(&mut self, node: SyntaxKind, keyword: SyntaxKind) {
        self.start_node(node);
        self.expect(keyword);
        self.expect(IDENT);
        if self.at(LT) {
            self.parse_type_param_list();
        }
        if self.at(EXTENDS_KW) {
            self.start_node(EXTENDS_CLAUSE);
            self.bump();
            self.parse_type_ref();
            while self.eat(COMMA) {
                self.parse_type_ref();
            }
            self.finish_node();
        }
        if self.at(IMPLEMENTS_KW) {
            self.start_node(IMPLEMENTS_CLAUSE);
            self.bump();
            self.parse_type_ref();
            while self.eat(COMMA) {
                self.parse_type_ref();
            }
            self.finish_node();
        }
        self.parse_class_body();
        self.finish_node();
    }

    fn parse_enum_decl(&mut self) {
        self.start_node(ENUM_DECL);
        self.expect(ENUM_KW);
        self.expect(IDENT);
        if self.at(IMPLEMENTS_KW) {
            self.start_node(IMPLEMENTS_CLAUSE);
            self.bump();
            self.parse_type_ref();
            while self.eat(COMMA) {
                self.parse_type_ref();
            }
            self.finish_node();
        }
        self.expect(LBRACE);
        // enum constants
        while self.at(IDENT) {
            self.start_node(VARIABLE_DECLARATOR);
            self.bump();
            if self.at(LPAREN) {
                self.parse_arg_list();
            }
            if self.at(LBRACE) {
                self.parse_class_body();
            }
            self.finish_node();
            if !self.eat(COMMA) {
                break;
            }
        }
        self.eat(SEMI);
        while !self.at(RBRACE) && !self.at_eof() {
            self.parse_member();
        }
        self.expect(RBRACE);
        self.finish_node();
    }

    fn parse_class_body(&mut self) {
        self.start_node(CLASS_BODY);
        self.expect(LBRACE);
        while !self.at(RBRACE) && !self.at_eof() {
            if self.at(SEMI) {
                self.bump();
                continue;
            }
            self.parse_member();
        }
        self.expect(RBRACE);
        self.finish_node();
    }

    /// A member of a class/interface/enum body: nested type, field, method,
    /// constructor, or static/instance initializer block.
    fn parse_member(&mut self) {
        // static/instance initializer block: { ... } possibly preceded by `static`
        if self.at(LBRACE) {
            self.parse_block();
            return;
        }
        if self.at(STATIC_KW) && self.nth(1) == LBRACE {
            self.bump();
            self.parse_block();
            return;
        }

        self.parse_modifiers_and_annotations();

        match self.current() {
            CLASS_KW => self.parse_class_like(CLASS_DECL, CLASS_KW),
            INTERFACE_KW => self.parse_class_like(INTERFACE_DECL, INTERFACE_KW),
            ENUM_KW => self.parse_enum_decl(),
            _ if self.at(AT) && self.nth(1) == INTERFACE_KW => {
                self.bump();
                self.parse_class_like(ANNOTATION_DECL, INTERFACE_KW);
            }
            LT => {
                // generic method/constructor: <T> T foo(...)
                self.parse_type_param_list();
                self.parse_member_after_modifiers();
            }
            _ => self.parse_member_after_modifiers(),
        }
    }

    fn parse_member_after_modifiers(&mut self) {
        // constructor: IDENT ( ... )
        if self.at(IDENT) && self.nth(1) == LPAREN {
            self.start_node(CONSTRUCTOR_DECL);
            self.bump();
            self.parse_param_list();
            if self.at(THROWS_KW) {
                self.parse_throws_clause();
            }
            if self.at(LBRACE) {
                self.parse_block();
            } else {
                self.expect(SEMI);
            }
            self.finish_node();
            return;
        }

        self.parse_type_ref();

        if !self.at(IDENT) {
            self.error_recover(&[SEMI, RBRACE]);
            return;
        }

        if self.nth(1) == LPAREN {
            self.start_node(METHOD_DECL);
            self.bump(); // name
            self.parse_param_list();
            while self.eat(LBRACKET) {
                self.expect(RBRACKET);
            }
            if self.at(THROWS_KW) {
                self.parse_throws_clause();
            }
            if self.at(LBRACE) {
                self.parse_block();
            } else {
                self.eat(DEFAULT_KW);
                if self.at(LBRACE) {
                    self.parse_block();
                } else {
                    self.expect(SEMI);
                }
            }
            self.finish_node();
        } else {
            self.start_node(FIELD_DECL);
            self.start_node(VARIABLE_DECLARATOR_LIST);
            self.parse_variable_declarator();
            while self.eat(COMMA) {
                self.parse_variable_declarator();
            }
            self.finish_node();
            self.expect(SEMI);
            self.finish_node();
        }
    }

    fn parse_variable_declarator(&mut self) {
        self.start_node(VARIABLE_DECLARATOR);
        self.expect(IDENT);
        while self.eat(LBRACKET) {
            self.expect(RBRACKET);
        }
        if self.eat(EQ) {
            self.parse_var_initializer();
        }
        self.finish_node();
    }

    fn parse_var_initializer(&mut self) {
        if self.at(LBRACE) {
            self.bump();
            while !self.at(RBRACE) && !self.at_eof() {
                self.parse_var_initializer();
                if !self.eat(COMMA) {
                    break;
                }
            }
            self.expect(RBRACE);
        } else {
            self.parse_expr();
        }
    }

    fn parse_throws_clause(&mut self) {
        self.start_node(THROWS_CLAUSE);
        self.bump();
        self.parse_type_ref();
        while self.eat(COMMA) {
            self.parse_type_ref();
        }
        self.finish_node();
    }

    fn parse_param_list(&mut self) {
        self.start_node(PARAM_LIST);
        self.expect(LPAREN);
        while !self.at(RPAREN) && !self.at_eof() {
            self.parse_param();
            if !self.eat(COMMA) {
                break;
            }
        }
        self.expect(RPAREN);
        self.finish_node();
    }

    fn parse_param(&mut self) {
        self.start_node(PARAM);
        self.parse_modifiers_and_annotations();
        self.parse_type_ref();
        self.eat(DOTDOTDOT);
        if self.at(IDENT) {
            self.bump();
        }
        while self.eat(LBRACKET) {
            self.expect(RBRACKET);
        }
        self.finish_node();
    }

    fn parse_type_param_list(&mut self) {
        self.start_node(TYPE_PARAM_LIST);
        self.expect(LT);
        while !self.at(GT) && !self.at_eof() {
            self.start_node(TYPE_PARAM);
            self.expect(IDENT);
            if self.eat(EXTENDS_KW) {
                self.parse_type_ref();
                while self.eat(AMP) {
                    self.parse_type_ref();
                }
            }
            self.finish_node();
            if !self.eat(COMMA) {
                break;
            }
        }
        self.expect(GT);
        self.finish_node();
    }

    // --- types ---------------------------------------------------------------

    fn parse_type_ref(&mut self) {
        self.start_node(TYPE_REF);
        self.parse_path_type();
        while self.eat(LBRACKET) {
            self.expect(RBRACKET);
        }
        self.finish_node();
    }

    fn parse_path_type(&mut self) {
        self.start_node(PATH_TYPE);
        self.parse_path_segment();
        while self.at(DOT) && self.nth(1) == IDENT {
            self.bump();
            self.parse_path_segment();
        }
        self.finish_node();
    }

    fn parse_path_segment(&mut self) {
        self.start_node(PATH_SEGMENT);
        self.expect(IDENT);
        if self.at(LT) {
            self.parse_type_arg_list();
        }
        self.finish_node();
    }

    fn parse_type_arg_list(&mut self) {
        self.start_node(TYPE_ARG_LIST);
        self.expect(LT);
        while !self.at(GT) && !self.at_eof() {
            if self.eat(QUESTION) {
                if self.eat(EXTENDS_KW) || self.eat(SUPER_KW) {
                    self.parse_type_ref();
                }
            } else {
                self.parse_type_ref();
            }
            if !self.eat(COMMA) {
                break;
            }
        }
        self.expect(GT);
        self.finish_node();
    }

    // --- statements ------------------------------------------------------------

    fn parse_block(&mut self) {
        self.start_node(BLOCK);
        self.expect(LBRACE);
        while !self.at(RBRACE) && !self.at_eof() {
            self.parse_stmt();
        }
        self.expect(RBRACE);
        self.finish_node();
    }

    fn parse_stmt(&mut self) {
        match self.current() {
            LBRACE => self.parse_block(),
            SEMI => {
                self.start_node(EMPTY_STMT);
                self.bump();
                self.finish_node();
            }
            IF_KW => self.parse_if_stmt(),
            WHILE_KW => self.parse_while_stmt(),
            DO_KW => self.parse_do_while_stmt(),
            FOR_KW => self.parse_for_stmt(),
            RETURN_KW => {
                self.start_node(RETURN_STMT);
                self.bump();
                if !self.at(SEMI) {
                    self.parse_expr();
                }
                self.expect(SEMI);
                self.finish_node();
            }
            BREAK_KW => {
                self.start_node(BREAK_STMT);
                self.bump();
                self.eat(IDENT);
                self.expect(SEMI);
                self.finish_node();
            }
            CONTINUE_KW => {
                self.start_node(CONTINUE_STMT);
                self.bump();
                self.eat(IDENT);
                self.expect(SEMI);
                self.finish_node();
            }
            THROW_KW => {
                self.start_node(THROW_STMT);
                self.bump();
                self.parse_expr();
                self.expect(SEMI);
                self.finish_node();
            }
            TRY_KW => self.parse_try_stmt(),
            SWITCH_KW => self.parse_switch_stmt(),
            ASSERT_KW => {
                self.start_node(ASSERT_STMT);
                self.bump();
                self.parse_expr();
                if self.eat(COLON) {
                    self.parse_expr();
                }
                self.expect(SEMI);
                self.finish_node();
            }
            YIELD_KW if self.nth(1) != EQ && self.nth(1) != DOT && self.nth(1) != LPAREN => {
                self.start_node(YIELD_STMT);
                self.bump();
                self.parse_expr();
                self.expect(SEMI);
                self.finish_node();
            }
            CLASS_KW => {
                self.start_node(LOCAL_CLASS_STMT);
                self.parse_class_like(CLASS_DECL, CLASS_KW);
                self.finish_node();
            }
            FINAL_KW => {
                self.parse_local_var_or_expr_stmt();
            }
            _ if self.at(AT) && self.nth(1) != INTERFACE_KW => {
                self.parse_local_var_or_expr_stmt();
            }
            _ => self.parse_local_var_or_expr_stmt(),
        }
    }

    /// Disambiguate `Type name = ...;` from an expression statement.
    fn parse_local_var_or_expr_stmt(&mut self) {
        if self.looks_like_local_var_decl() {
            self.start_node(LOCAL_VAR_DECL);
            self.parse_modifiers_and_annotations();
            self.parse_type_ref();
            self.start_node(VARIABLE_DECLARATOR_LIST);
            self.parse_variable_declarator();
            while self.eat(COMMA) {
                self.parse_variable_declarator();
            }
            self.finish_node();
            self.expect(SEMI);
            self.finish_node();
            return;
        }

        self.start_node(EXPR_STMT);
        self.parse_expr();
        self.expect(SEMI);
        self.finish_node();
    }

    /// Best-effort lookahead: modifiers/annotations, then a type-looking
    /// token, then an identifier, then `=`, `;`, `,`, or `[` — treat as a
    /// local variable declaration (including `var x = ...;`).
    fn looks_like_local_var_decl(&self) -> bool {
        let mut n = 0;
        while MODIFIER_KINDS.contains(&self.nth(n)) || self.nth(n) == AT {
            n += 1;
            if self.nth(n - 1) == AT {
                // skip a minimal annotation: @Name( ... )? — best effort, just
                // skip the name; arguments are rare enough in this position
                // that over-consuming here is an acceptable tradeoff.
                n += 1;
            }
        }
        if self.nth(n) == VAR_KW {
            return self.nth(n + 1) == IDENT;
        }
        if !matches!(self.nth(n), IDENT) {
            return false;
        }
        n += 1;
        while self.nth(n) == DOT && self.nth(n + 1) == IDENT {
            n += 2;
        }
        if self.nth(n) == LT {
            // generic type args: skip to matching GT best-effort.
            let mut depth = 0i32;
            loop {
                match self.nth(n) {
                    LT => depth += 1,
                    GT => {
                        depth -= 1;
                        if depth == 0 {
                            n += 1;
                            break;
                        }
                    }
                    SEMI | LBRACE | RBRACE | ERROR_TOKEN => return false,
                    _ => {}
                }
                n += 1;
                if n > 200 {
                    return false;
                }
            }
        }
        while self.nth(n) == LBRACKET && self.nth(n + 1) == RBRACKET {
            n += 2;
        }
        matches!(self.nth(n), IDENT) && matches!(self.nth(n + 1), EQ | SEMI | COMMA | COLON)
    }

    fn parse_if_stmt(&mut self) {
        self.start_node(IF_STMT);
        self.bump();
        self.expect(LPAREN);
        self.parse_expr();
        self.expect(RPAREN);
        self.parse_stmt();
        if self.eat(ELSE_KW) {
            self.parse_stmt();
        }
        self.finish_node();
    }

    fn parse_while_stmt(&mut self) {
        self.start_node(WHILE_STMT);
        self.bump();
        self.expect(LPAREN);
        self.parse_expr();
        self.expect(RPAREN);
        self.parse_stmt();
        self.finish_node();
    }

    fn parse_do_while_stmt(&mut self) {
        self.start_node(DO_WHILE_STMT);
        self.bump();
        self.parse_stmt();
        self.expect(WHILE_KW);
        self.expect(LPAREN);
        self.parse_expr();
        self.expect(RPAREN);
        self.expect(SEMI);
        self.finish_node();
    }

    fn parse_for_stmt(&mut self) {
        let checkpoint_is_foreach = self.looks_like_for_each();
        if checkpoint_is_foreach {
            self.start_node(FOR_EACH_STMT);
            self.bump(); // for
            self.expect(LPAREN);
            self.parse_modifiers_and_annotations();
            self.parse_type_ref();
            self.expect(IDENT);
            self.expect(COLON);
            self.parse_expr();
            self.expect(RPAREN);
            self.parse_stmt();
            self.finish_node();
            return;
        }

        self.start_node(FOR_STMT);
        self.bump(); // for
        self.expect(LPAREN);
        if !self.at(SEMI) {
            if self.looks_like_local_var_decl() {
                self.start_node(LOCAL_VAR_DECL);
                self.parse_modifiers_and_annotations();
                self.parse_type_ref();
                self.start_node(VARIABLE_DECLARATOR_LIST);
                self.parse_variable_declarator();
                while self.eat(COMMA) {
                    self.parse_variable_declarator();
                }
                self.finish_node();
                self.finish_node();
            } else {
                self.parse_expr();
                while self.eat(COMMA) {
                    self.parse_expr();
                }
            }
        }
        self.expect(SEMI);
        if !self.at(SEMI) {
            self.parse_expr();
        }
        self.expect(SEMI);
        if !self.at(RPAREN) {
            self.parse_expr();
            while self.eat(COMMA) {
                self.parse_expr();
            }
        }
        self.expect(RPAREN);
        self.parse_stmt();
        self.finish_node();
    }

    /// `for (Type name : expr)` — look past modifiers/type/name for a `:`
    /// before the matching `)`.
    fn looks_like_for_each(&self) -> bool {
        debug_assert!(self.at(FOR_KW));
        let mut n = 1; // skip `for`
        if self.nth(n) != LPAREN {
            return false;
        }
        n += 1;
        while MODIFIER_KINDS.contains(&self.nth(n)) || self.nth(n) == AT {
            n += 1;
        }
        if !matches!(self.nth(n), IDENT | VAR_KW) {
            return false;
        }
        n += 1;
        while self.nth(n) == DOT && self.nth(n + 1) == IDENT {
            n += 2;
        }
        if self.nth(n) == LT {
            let mut depth = 0i32;
            loop {
                match self.nth(n) {
                    LT => depth += 1,
                    GT => {
                        depth -= 1;
                        if depth == 0 {
                            n += 1;
                            break;
                        }
                    }
                    SEMI | LBRACE | RBRACE | ERROR_TOKEN => return false,
                    _ => {}
                }
                n += 1;
                if n > 200 {
                    return false;
                }
            }
        }
        while self.nth(n) == LBRACKET && self.nth(n + 1) == RBRACKET {
            n += 2;
        }
        if self.nth(n) != IDENT {
            return false;
        }
        n += 1;
        self.nth(n) == COLON
    }

    fn parse_try_stmt(&mut self) {
        self.start_node(TRY_STMT);
        self.bump();
        if self.at(LPAREN) {
            self.start_node(RESOURCE_LIST);
            self.bump();
            while !self.at(RPAREN) && !self.at_eof() {
                self.start_node(RESOURCE);
                self.parse_modifiers_and_annotations();
                if self.looks_like_local_var_decl() {
                    self.parse_type_ref();
                    self.expect(IDENT);
                    self.expect(EQ);
                    self.parse_expr();
                } else {
                    self.parse_expr();
                }
                self.finish_node();
                if !self.eat(SEMI) {
                    break;
                }
            }
            self.expect(RPAREN);
            self.finish_node();
        }
        self.parse_block();
        while self.at(CATCH_KW) {
            self.start_node(CATCH_CLAUSE);
            self.bump();
            self.expect(LPAREN);
            self.parse_modifiers_and_annotations();
            self.parse_type_ref();
            while self.eat(PIPE) {
                self.parse_type_ref();
            }
            self.expect(IDENT);
            self.expect(RPAREN);
            self.parse_block();
            self.finish_node();
        }
        if self.eat(FINALLY_KW) {
            self.start_node(FINALLY_CLAUSE);
            self.parse_block();
            self.finish_node();
        }
        self.finish_node();
    }

    fn parse_switch_stmt(&mut self) {
        self.start_node(SWITCH_STMT);
        self.bump();
        self.expect(LPAREN);
        self.parse_expr();
        self.expect(RPAREN);
        self.expect(LBRACE);
        while !self.at(RBRACE) && !self.at_eof() {
            self.start_node(SWITCH_CASE);
            if self.eat(CASE_KW) {
                self.parse_expr();
                while self.eat(COMMA) {
                    self.parse_expr();
                }
            } else {
                self.expect(DEFAULT_KW);
            }
            if self.eat(ARROW) {
                if self.at(LBRACE) {
                    self.parse_block();
                } else if self.at(THROW_KW) {
                    self.parse_stmt();
                } else {
                    self.parse_expr();
                    self.expect(SEMI);
                }
            } else {
                self.expect(COLON);
                while !matches!(self.current(), CASE_KW | DEFAULT_KW | RBRACE) && !self.at_eof() {
                    self.parse_stmt();
                }
            }
            self.finish_node();
        }
        self.expect(RBRACE);
        self.finish_node();
    }

    // --- expressions -----------------------------------------------------------

    fn parse_expr(&mut self) {
        self.parse_assignment_expr();
    }

    fn parse_assignment_expr(&mut self) {
        if self.looks_like_lambda() {
            self.parse_lambda_expr();
            return;
        }

        let checkpoint = self.builder.checkpoint();
        self.parse_ternary_expr();
        if matches!(self.current(), EQ | PLUSEQ | MINUSEQ | STAREQ | SLASHEQ) {
            self.bump();
            self.parse_assignment_expr();
            self.builder.start_node_at(checkpoint, ASSIGN_EXPR.into());
            self.finish_node();
        }
    }

    fn looks_like_lambda(&self) -> bool {
        if self.at(IDENT) && self.nth(1) == ARROW {
            return true;
        }
        if self.at(LPAREN) {
            let mut n = 1;
            let mut depth = 1i32;
            loop {
                match self.nth(n) {
                    LPAREN => depth += 1,
                    RPAREN => {
                        depth -= 1;
                        if depth == 0 {
                            return self.nth(n + 1) == ARROW;
                        }
                    }
                    ERROR_TOKEN => return false,
                    _ => {}
                }
                n += 1;
                if n > 256 {
                    return false;
                }
            }
        }
        false
    }

    fn parse_lambda_expr(&mut self) {
        self.start_node(LAMBDA_EXPR);
        if self.at(IDENT) {
            self.start_node(LAMBDA_PARAM_LIST);
            self.start_node(PARAM);
            self.bump();
            self.finish_node();
            self.finish_node();
        } else {
            self.start_node(LAMBDA_PARAM_LIST);
            self.expect(LPAREN);
            while !self.at(RPAREN) && !self.at_eof() {
                self.start_node(PARAM);
                self.parse_modifiers_and_annotations();
                if self.nth(1) == COMMA || self.nth(1) == RPAREN {
                    // bare name, no declared type
                    self.expect(IDENT);
                } else {
                    self.parse_type_ref();
                    self.expect(IDENT);
                }
                self.finish_node();
                if !self.eat(COMMA) {
                    break;
                }
            }
            self.expect(RPAREN);
            self.finish_node();
        }
        self.expect(ARROW);
        if self.at(LBRACE) {
            self.parse_block();
        } else {
            self.parse_expr();
        }
        self.finish_node();
    }

    fn parse_ternary_expr(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.parse_bin_expr(0);
        if self.at(QUESTION) {
            self.bump();
            self.parse_expr();
            self.expect(COLON);
            self.parse_expr();
            self.builder.start_node_at(checkpoint, TERNARY_EXPR.into());
            self.finish_node();
        }
    }

    /// Precedence-climbing binary expression parser. `checkpoint` marks the
    /// position immediately before the left operand at this precedence
    /// level, so each binary operator found can retroactively wrap
    /// everything parsed so far into a `BIN_EXPR`/`INSTANCEOF_EXPR` node via
    /// `rowan`'s checkpoint mechanism (the same checkpoint is reused for
    /// every wrap at this level; left-associativity falls out naturally).
    fn parse_bin_expr(&mut self, min_bp: u8) {
        let checkpoint = self.builder.checkpoint();
        self.parse_unary_expr();
        loop {
            let Some(op_bp) = binop_binding_power(self.current()) else {
                break;
            };
            if op_bp < min_bp {
                break;
            }
            if self.current() == INSTANCEOF_KW {
                self.bump();
                self.parse_type_ref();
                if self.at(IDENT) {
                    self.bump();
                }
                self.builder.start_node_at(checkpoint, INSTANCEOF_EXPR.into());
                self.finish_node();
                continue;
            }
            self.bump();
            self.parse_bin_expr(op_bp + 1);
            self.builder.start_node_at(checkpoint, BIN_EXPR.into());
            self.finish_node();
        }
    }

    fn parse_unary_expr(&mut self) {
        if matches!(self.current(), BANG | TILDE | MINUS | PLUS | PLUSPLUS | MINUSMINUS) {
            self.start_node(UNARY_EXPR);
            self.bump();
            self.parse_unary_expr();
            self.finish_node();
            return;
        }
        if self.at(LPAREN) && self.looks_like_cast() {
            self.start_node(CAST_EXPR);
            self.bump();
            self.parse_type_ref();
            self.expect(RPAREN);
            self.parse_unary_expr();
            self.finish_node();
            return;
        }
        self.parse_postfix_expr();
    }

    fn looks_like_cast(&self) -> bool {
        debug_assert!(self.at(LPAREN));
        let mut n = 1;
        if !matches!(self.nth(n), IDENT | VOID_KW) {
            return false;
        }
        n += 1;
        while self.nth(n) == DOT && self.nth(n + 1) == IDENT {
            n += 2;
        }
        if self.nth(n) == LT {
            let mut depth = 0i32;
            loop {
                match self.nth(n) {
                    LT => depth += 1,
                    GT => {
                        depth -= 1;
                        if depth == 0 {
                            n += 1;
                            break;
                        }
                    }
                    SEMI | LBRACE | RBRACE | ERROR_TOKEN | RPAREN => return false,
                    _ => {}
                }
                n += 1;
                if n > 200 {
                    return false;
                }
            }
        }
        while self.nth(n) == LBRACKET && self.nth(n + 1) == RBRACKET {
            n += 2;
        }
        if self.nth(n) != RPAREN {
            return false;
        }
        n += 1;
        matches!(
            self.nth(n),
            IDENT | THIS_KW | SUPER_KW | INT_LIT | FLOAT_LIT | STRING_LIT | CHAR_LIT | LPAREN
                | BANG | TILDE | NEW_KW
        )
    }

    fn parse_postfix_expr(&mut self) {
        let checkpoint = self.builder.checkpoint();
        self.parse_primary_expr();
        loop {
            match self.current() {
                DOT => {
                    self.bump();
                    self.eat(THIS_KW);
                    if self.current() != THIS_KW {
                        self.expect(IDENT);
                    }
                    self.builder.start_node_at(checkpoint, FIELD_ACCESS_EXPR.into());
                    self.finish_node();
                    // a following `(` turns the just-built field access into a call
                    if self.at(LPAREN) {
                        self.parse_arg_list();
                        self.builder.start_node_at(checkpoint, METHOD_CALL_EXPR.into());
                        self.finish_node();
                    }
                }
                LPAREN => {
                    self.parse_arg_list();
                    self.builder.start_node_at(checkpoint, METHOD_CALL_EXPR.into());
                    self.finish_node();
                }
                LBRACKET => {
                    self.bump();
                    self.parse_expr();
                    self.expect(RBRACKET);
                    self.builder.start_node_at(checkpoint, ARRAY_ACCESS_EXPR.into());
                    self.finish_node();
                }
                PLUSPLUS | MINUSMINUS => {
                    self.bump();
                    self.builder.start_node_at(checkpoint, UNARY_EXPR.into());
                    self.finish_node();
                }
                _ => break,
            }
        }
    }

    fn parse_arg_list(&mut self) {
        self.start_node(ARG_LIST);
        self.expect(LPAREN);
        while !self.at(RPAREN) && !self.at_eof() {
            self.parse_expr();
            if !self.eat(COMMA) {
                break;
            }
        }
        self.expect(RPAREN);
        self.finish_node();
    }

    fn parse_primary_expr(&mut self) {
        match self.current() {
            THIS_KW => {
                self.start_node(THIS_EXPR);
                self.bump();
                self.finish_node();
            }
            SUPER_KW => {
                self.start_node(SUPER_EXPR);
                self.bump();
                self.finish_node();
            }
            TRUE_KW | FALSE_KW | NULL_KW | INT_LIT | FLOAT_LIT | STRING_LIT | CHAR_LIT => {
                self.start_node(LITERAL_EXPR);
                self.bump();
                self.finish_node();
            }
            LPAREN => {
                self.start_node(PAREN_EXPR);
                self.bump();
                self.parse_expr();
                self.expect(RPAREN);
                self.finish_node();
            }
            NEW_KW => self.parse_new_expr(),
            IDENT => {
                self.start_node(NAME_REF_EXPR);
                self.bump();
                self.finish_node();
            }
            VOID_KW | IF_KW | ELSE_KW | FOR_KW | WHILE_KW => {
                // Shouldn't normally appear in expression position; recover.
                self.error_recover(&[SEMI, RBRACE, RPAREN, COMMA]);
            }
            _ => {
                self.error_recover(&[SEMI, RBRACE, RPAREN, COMMA]);
            }
        }
    }

    fn parse_new_expr(&mut self) {
        self.start_node(NEW_EXPR);
        self.bump(); // new
        if self.at(LT) {
            self.parse_type_arg_list();
        }
        self.parse_path_type();
        if self.at(LBRACKET) {
            while self.eat(LBRACKET) {
                if !self.at(RBRACKET) {
                    self.parse_expr();
                }
                self.expect(RBRACKET);
            }
            if self.at(LBRACE) {
                self.parse_var_initializer();
            }
        } else {
            self.parse_arg_list();
            if self.at(LBRACE) {
                self.parse_class_body();
            }
        }
        self.finish_node();
    }
}

/// Binding power table for binary operators, loosely following Java's
/// operator precedence (higher binds tighter). `instanceof` sits at the
/// relational tier.
fn binop_binding_power(kind: SyntaxKind) -> Option<u8> {
    Some(match kind {
        PIPEPIPE => 1,
        AMPAMP => 2,
        PIPE => 3,
        CARET => 4,
        AMP => 5,
        EQEQ | NEQ => 6,
        LT | GT | LTEQ | GTEQ | INSTANCEOF_KW => 7,
        PLUS | MINUS => 9,
        STAR | SLASH | PERCENT => 10,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_ok(text: &str) -> Parse {
        let parse = parse_java(text);
        assert!(
            parse.errors.is_empty(),
            "unexpected parse errors for {text:?}: {:?}",
            parse.errors
        );
        parse
    }

    fn dump(text: &str) -> String {
        format!("{:#?}", crate::syntax_kind::SyntaxNode::new_root(parse_ok(text).green_node))
    }

    #[test]
    fn parses_empty_compilation_unit() {
        let parse = parse_java("");
        assert!(parse.errors.is_empty());
    }

    #[test]
    fn parses_package_and_import() {
        parse_ok("package com.example;\nimport java.util.List;\nimport java.util.*;\n");
    }

    #[test]
    fn parses_simple_class_with_field_and_method() {
        let tree = dump(
            "package p;\nclass Foo {\n  int x;\n  int bar(int y) { return x + y; }\n}\n",
        );
        assert!(tree.contains("CLASS_DECL"));
        assert!(tree.contains("FIELD_DECL"));
        assert!(tree.contains("METHOD_DECL"));
        assert!(tree.contains("BIN_EXPR"));
    }

    #[test]
    fn parses_generics_and_nested_class() {
        parse_ok(
            "class Box<T> {\n  static class Inner<U extends T> {\n    java.util.List<U> items;\n  }\n}\n",
        );
    }

    #[test]
    fn parses_enhanced_for_and_try_with_resources() {
        parse_ok(
            "class C {\n  void m() {\n    for (String s : names) {}\n    try (AutoCloseable c = open()) {} catch (Exception e) {} finally {}\n  }\n}\n",
        );
    }

    #[test]
    fn parses_lambda_and_method_reference_call() {
        parse_ok("class C {\n  void m() {\n    Runnable r = () -> { doThing(); };\n    Runnable r2 = x -> x.run();\n  }\n}\n");
    }

    #[test]
    fn parses_switch_arrow_and_colon_forms() {
        parse_ok(
            "class C {\n  int m(int x) {\n    switch (x) {\n      case 1 -> { yield 1; }\n      default: return 0;\n    }\n    return 0;\n  }\n}\n",
        );
    }

    #[test]
    fn error_recovery_still_produces_a_tree_for_garbage_input() {
        let parse = parse_java("class C { !!! }");
        assert!(!parse.errors.is_empty());
    }

    #[test]
    fn parses_annotations_and_varargs() {
        parse_ok(
            "class C {\n  @Deprecated\n  void m(@MyAnno String... args) {}\n}\n",
        );
    }
}
