//! A hand-written lexer producing a flat token stream.
//!
//! Trivia (whitespace, comments) is kept as real tokens so the resulting
//! tree stays lossless; the parser attaches it to neighbouring nodes.

use text_size::{TextRange, TextSize};

use crate::syntax_kind::SyntaxKind;

#[derive(Debug, Clone, Copy)]
pub struct Token {
    pub kind: SyntaxKind,
    pub range: TextRange,
}

pub fn lex(text: &str) -> Vec<Token> {
    let mut lexer = Lexer {
        text,
        bytes: text.as_bytes(),
        pos: 0,
        tokens: Vec::new(),
    };
    lexer.run();
    lexer.tokens
}

struct Lexer<'a> {
    text: &'a str,
    bytes: &'a [u8],
    pos: usize,
    tokens: Vec<Token>,
}

impl<'a> Lexer<'a> {
    fn run(&mut self) {
        while self.pos < self.bytes.len() {
            let start = self.pos;
            let kind = self.next_kind();
            let end = self.pos;
            debug_assert!(end > start, "lexer must make progress");
            self.tokens.push(Token {
                kind,
                range: TextRange::new(TextSize::from(start as u32), TextSize::from(end as u32)),
            });
        }
    }

    fn peek(&self) -> u8 {
        self.bytes.get(self.pos).copied().unwrap_or(0)
    }

    fn peek_at(&self, offset: usize) -> u8 {
        self.bytes.get(self.pos + offset).copied().unwrap_or(0)
    }

    fn rest(&self) -> &str {
        &self.text[self.pos..]
    }

    fn next_kind(&mut self) -> SyntaxKind {
        let c = self.rest().chars().next().unwrap();

        if c.is_whitespace() {
            while self.rest().chars().next().is_some_and(char::is_whitespace) {
                self.pos += self.rest().chars().next().unwrap().len_utf8();
            }
            return SyntaxKind::WHITESPACE;
        }

        if self.peek() == b'/' && self.peek_at(1) == b'/' {
            while self.pos < self.bytes.len() && self.peek() != b'\n' {
                self.pos += 1;
            }
            return SyntaxKind::COMMENT;
        }

        if self.peek() == b'/' && self.peek_at(1) == b'*' {
            self.pos += 2;
            while self.pos < self.bytes.len()
                && !(self.peek() == b'*' && self.peek_at(1) == b'/')
            {
                self.pos += 1;
            }
            self.pos = (self.pos + 2).min(self.bytes.len());
            return SyntaxKind::COMMENT;
        }

        if c == '"' {
            return self.lex_string();
        }

        if c == '\'' {
            return self.lex_char();
        }

        if c.is_ascii_digit() {
            return self.lex_number();
        }

        if unicode_ident::is_xid_start(c) || c == '_' || c == '$' {
            return self.lex_ident_or_keyword();
        }

        self.lex_punct()
    }

    fn lex_string(&mut self) -> SyntaxKind {
        self.pos += 1; // opening quote
        while self.pos < self.bytes.len() {
            match self.peek() {
                b'"' => {
                    self.pos += 1;
                    break;
                }
                b'\\' => {
                    self.pos += 1;
                    if self.pos < self.bytes.len() {
                        self.pos += 1;
                    }
                }
                _ => self.pos += 1,
            }
        }
        SyntaxKind::STRING_LIT
    }

    fn lex_char(&mut self) -> SyntaxKind {
        self.pos += 1;
        while self.pos < self.bytes.len() {
            match self.peek() {
                b'\'' => {
                    self.pos += 1;
                    break;
                }
                b'\\' => {
                    self.pos += 1;
                    if self.pos < self.bytes.len() {
                        self.pos += 1;
                    }
                }
                _ => self.pos += 1,
            }
        }
        SyntaxKind::CHAR_LIT
    }

    fn lex_number(&mut self) -> SyntaxKind {
        let mut is_float = false;
        while self.peek().is_ascii_digit() || self.peek() == b'_' {
            self.pos += 1;
        }
        if self.peek() == b'.' && self.peek_at(1).is_ascii_digit() {
            is_float = true;
            self.pos += 1;
            while self.peek().is_ascii_digit() || self.peek() == b'_' {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), b'e' | b'E') {
            is_float = true;
            self.pos += 1;
            if matches!(self.peek(), b'+' | b'-') {
                self.pos += 1;
            }
            while self.peek().is_ascii_digit() {
                self.pos += 1;
            }
        }
        if matches!(self.peek(), b'f' | b'F' | b'd' | b'D') {
            is_float = true;
            self.pos += 1;
        } else if matches!(self.peek(), b'l' | b'L') {
            self.pos += 1;
        }
        if is_float {
            SyntaxKind::FLOAT_LIT
        } else {
            SyntaxKind::INT_LIT
        }
    }

    fn lex_ident_or_keyword(&mut self) -> SyntaxKind {
        let start = self.pos;
        while let Some(c) = self.rest().chars().next() {
            if unicode_ident::is_xid_continue(c) || c == '_' || c == '$' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
        let word = &self.text[start..self.pos];
        keyword_kind(word).unwrap_or(SyntaxKind::IDENT)
    }

    fn lex_punct(&mut self) -> SyntaxKind {
        macro_rules! two {
            ($a:expr, $b:expr, $kind:expr) => {
                if self.peek() == $a && self.peek_at(1) == $b {
                    self.pos += 2;
                    return $kind;
                }
            };
        }
        macro_rules! three {
            ($a:expr, $b:expr, $c:expr, $kind:expr) => {
                if self.peek() == $a && self.peek_at(1) == $b && self.peek_at(2) == $c {
                    self.pos += 3;
                    return $kind;
                }
            };
        }

        three!(b'.', b'.', b'.', SyntaxKind::DOTDOTDOT);
        two!(b':', b':', SyntaxKind::COLONCOLON);
        two!(b'=', b'=', SyntaxKind::EQEQ);
        two!(b'!', b'=', SyntaxKind::NEQ);
        two!(b'<', b'=', SyntaxKind::LTEQ);
        two!(b'>', b'=', SyntaxKind::GTEQ);
        two!(b'&', b'&', SyntaxKind::AMPAMP);
        two!(b'|', b'|', SyntaxKind::PIPEPIPE);
        two!(b'+', b'+', SyntaxKind::PLUSPLUS);
        two!(b'-', b'-', SyntaxKind::MINUSMINUS);
        two!(b'+', b'=', SyntaxKind::PLUSEQ);
        two!(b'-', b'=', SyntaxKind::MINUSEQ);
        two!(b'*', b'=', SyntaxKind::STAREQ);
        two!(b'/', b'=', SyntaxKind::SLASHEQ);
        if self.peek() == b'-' && self.peek_at(1) == b'>' {
            self.pos += 2;
            return SyntaxKind::ARROW;
        }

        let kind = match self.peek() {
            b'(' => SyntaxKind::LPAREN,
            b')' => SyntaxKind::RPAREN,
            b'{' => SyntaxKind::LBRACE,
            b'}' => SyntaxKind::RBRACE,
            b'[' => SyntaxKind::LBRACKET,
            b']' => SyntaxKind::RBRACKET,
            b';' => SyntaxKind::SEMI,
            b',' => SyntaxKind::COMMA,
            b'.' => SyntaxKind::DOT,
            b':' => SyntaxKind::COLON,
            b'@' => SyntaxKind::AT,
            b'=' => SyntaxKind::EQ,
            b'<' => SyntaxKind::LT,
            b'>' => SyntaxKind::GT,
            b'+' => SyntaxKind::PLUS,
            b'-' => SyntaxKind::MINUS,
            b'*' => SyntaxKind::STAR,
            b'/' => SyntaxKind::SLASH,
            b'%' => SyntaxKind::PERCENT,
            b'&' => SyntaxKind::AMP,
            b'|' => SyntaxKind::PIPE,
            b'^' => SyntaxKind::CARET,
            b'!' => SyntaxKind::BANG,
            b'~' => SyntaxKind::TILDE,
            b'?' => SyntaxKind::QUESTION,
            _ => {
                self.pos += 1;
                return SyntaxKind::ERROR_TOKEN;
            }
        };
        self.pos += 1;
        kind
    }
}

fn keyword_kind(word: &str) -> Option<SyntaxKind> {
    use SyntaxKind::*;
    Some(match word {
        "true" => TRUE_KW,
        "false" => FALSE_KW,
        "null" => NULL_KW,
        "this" => THIS_KW,
        "super" => SUPER_KW,
        "class" => CLASS_KW,
        "interface" => INTERFACE_KW,
        "enum" => ENUM_KW,
        "extends" => EXTENDS_KW,
        "implements" => IMPLEMENTS_KW,
        "package" => PACKAGE_KW,
        "import" => IMPORT_KW,
        "static" => STATIC_KW,
        "public" => PUBLIC_KW,
        "private" => PRIVATE_KW,
        "protected" => PROTECTED_KW,
        "final" => FINAL_KW,
        "abstract" => ABSTRACT_KW,
        "synchronized" => SYNCHRONIZED_KW,
        "native" => NATIVE_KW,
        "transient" => TRANSIENT_KW,
        "volatile" => VOLATILE_KW,
        "strictfp" => STRICTFP_KW,
        "default" => DEFAULT_KW,
        "new" => NEW_KW,
        "return" => RETURN_KW,
        "if" => IF_KW,
        "else" => ELSE_KW,
        "for" => FOR_KW,
        "while" => WHILE_KW,
        "do" => DO_KW,
        "switch" => SWITCH_KW,
        "case" => CASE_KW,
        "break" => BREAK_KW,
        "continue" => CONTINUE_KW,
        "try" => TRY_KW,
        "catch" => CATCH_KW,
        "finally" => FINALLY_KW,
        "throw" => THROW_KW,
        "throws" => THROWS_KW,
        "instanceof" => INSTANCEOF_KW,
        "var" => VAR_KW,
        "assert" => ASSERT_KW,
        "yield" => YIELD_KW,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<SyntaxKind> {
        lex(text).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn lexes_package_and_import() {
        let ks = kinds("package a.b;\nimport a.b.C;\n");
        assert_eq!(ks[0], SyntaxKind::PACKAGE_KW);
        assert!(ks.contains(&SyntaxKind::IMPORT_KW));
        assert!(ks.contains(&SyntaxKind::DOT));
        assert!(ks.contains(&SyntaxKind::SEMI));
    }

    #[test]
    fn lexes_dollar_and_underscore_identifiers() {
        let ks = kinds("$foo _bar");
        assert_eq!(ks[0], SyntaxKind::IDENT);
    }

    #[test]
    fn lexes_line_and_block_comments_as_trivia() {
        let toks = lex("// hi\n/* block */ x");
        assert_eq!(toks[0].kind, SyntaxKind::COMMENT);
        assert!(toks.iter().any(|t| t.kind == SyntaxKind::COMMENT));
        assert!(toks.iter().any(|t| t.kind == SyntaxKind::IDENT));
    }

    #[test]
    fn lexes_arrow_for_lambdas() {
        let ks = kinds("x -> x");
        assert!(ks.contains(&SyntaxKind::ARROW));
    }
}
