// ── Predicate tokenizer ──
//
// Turns WHERE-clause text into a flat token list. Every token remembers its
// byte span so syntax errors can quote the offending fragment.

use std::ops::Range;

use super::ast::CmpOp;
use super::error::FilterError;

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    Ident(String),
    Str(String),
    Int(i64),
    Float(f64),
    Cmp(CmpOp),
    LParen,
    RParen,
    Comma,
    And,
    Or,
    Not,
    Between,
    In,
    Like,
    True,
    False,
    Eof,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Range<usize>,
}

/// Build a syntax error pointing at `span` inside `source`.
pub(crate) fn syntax_error(source: &str, span: Range<usize>, message: impl Into<String>) -> FilterError {
    let fragment = match source.get(span.clone()) {
        Some(text) if !text.is_empty() => text.to_owned(),
        _ => "end of input".to_owned(),
    };
    let column = source
        .get(..span.start)
        .map_or(span.start, |prefix| prefix.chars().count())
        + 1;
    FilterError::Syntax {
        message: message.into(),
        fragment,
        column,
    }
}

pub fn tokenize(source: &str) -> Result<Vec<Token>, FilterError> {
    Lexer {
        source,
        chars: source.char_indices().collect(),
        pos: 0,
    }
    .run()
}

struct Lexer<'a> {
    source: &'a str,
    chars: Vec<(usize, char)>,
    pos: usize,
}

impl Lexer<'_> {
    fn run(mut self) -> Result<Vec<Token>, FilterError> {
        let mut tokens = Vec::new();
        loop {
            self.skip_whitespace();
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).map(|&(_, c)| c)
    }

    fn peek_at(&self, ahead: usize) -> Option<char> {
        self.chars.get(self.pos + ahead).map(|&(_, c)| c)
    }

    /// Byte offset of the current character (or end of input).
    fn offset(&self) -> usize {
        self.chars
            .get(self.pos)
            .map_or(self.source.len(), |&(i, _)| i)
    }

    fn skip_whitespace(&mut self) {
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
    }

    fn next_token(&mut self) -> Result<Token, FilterError> {
        let start = self.offset();
        let Some(c) = self.peek() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                span: start..start,
            });
        };

        let kind = match c {
            '(' => self.single(TokenKind::LParen),
            ')' => self.single(TokenKind::RParen),
            ',' => self.single(TokenKind::Comma),
            '=' => {
                self.pos += 1;
                // `==` is accepted as a synonym for `=`
                if self.peek() == Some('=') {
                    self.pos += 1;
                }
                TokenKind::Cmp(CmpOp::Eq)
            }
            '!' => {
                if self.peek_at(1) == Some('=') {
                    self.pos += 2;
                    TokenKind::Cmp(CmpOp::Ne)
                } else {
                    self.pos += 1;
                    return Err(syntax_error(
                        self.source,
                        start..self.offset(),
                        "unexpected character '!' (did you mean '!='?)",
                    ));
                }
            }
            '<' => match self.peek_at(1) {
                Some('=') => self.double(TokenKind::Cmp(CmpOp::Le)),
                Some('>') => self.double(TokenKind::Cmp(CmpOp::Ne)),
                _ => self.single(TokenKind::Cmp(CmpOp::Lt)),
            },
            '>' => match self.peek_at(1) {
                Some('=') => self.double(TokenKind::Cmp(CmpOp::Ge)),
                _ => self.single(TokenKind::Cmp(CmpOp::Gt)),
            },
            '\'' | '"' => self.string(c, start)?,
            c if c.is_ascii_digit() => self.number(start)?,
            '-' | '.' if self.peek_at(1).is_some_and(|n| n.is_ascii_digit()) => self.number(start)?,
            '-' if self.peek_at(1) == Some('.')
                && self.peek_at(2).is_some_and(|n| n.is_ascii_digit()) =>
            {
                self.number(start)?
            }
            c if c.is_alphabetic() || c == '_' => self.word(),
            other => {
                self.pos += 1;
                return Err(syntax_error(
                    self.source,
                    start..self.offset(),
                    format!("unrecognized character '{other}'"),
                ));
            }
        };

        Ok(Token {
            kind,
            span: start..self.offset(),
        })
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 1;
        kind
    }

    fn double(&mut self, kind: TokenKind) -> TokenKind {
        self.pos += 2;
        kind
    }

    /// Quoted string; a doubled quote inside is a literal quote.
    fn string(&mut self, quote: char, start: usize) -> Result<TokenKind, FilterError> {
        self.pos += 1;
        let mut value = String::new();
        loop {
            match self.peek() {
                None => {
                    return Err(syntax_error(
                        self.source,
                        start..self.offset(),
                        "unterminated string literal",
                    ));
                }
                Some(c) if c == quote => {
                    self.pos += 1;
                    if self.peek() == Some(quote) {
                        value.push(quote);
                        self.pos += 1;
                    } else {
                        return Ok(TokenKind::Str(value));
                    }
                }
                Some(c) => {
                    value.push(c);
                    self.pos += 1;
                }
            }
        }
    }

    fn number(&mut self, start: usize) -> Result<TokenKind, FilterError> {
        if self.peek() == Some('-') {
            self.pos += 1;
        }
        let mut is_float = false;
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.pos += 1;
            } else if c == '.' && !is_float {
                is_float = true;
                self.pos += 1;
            } else {
                break;
            }
        }
        // `5abc` is one bad token, not a number followed by a field
        if self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
                self.pos += 1;
            }
            return Err(syntax_error(
                self.source,
                start..self.offset(),
                "malformed number",
            ));
        }

        let span = start..self.offset();
        let text = self.source.get(span.clone()).unwrap_or_default();
        if is_float {
            text.parse()
                .map(TokenKind::Float)
                .map_err(|_| syntax_error(self.source, span, "malformed number"))
        } else {
            text.parse()
                .map(TokenKind::Int)
                .map_err(|_| syntax_error(self.source, span, "integer out of range"))
        }
    }

    fn word(&mut self) -> TokenKind {
        let start = self.pos;
        while self.peek().is_some_and(|c| c.is_alphanumeric() || c == '_') {
            self.pos += 1;
        }
        let word: String = self.chars[start..self.pos].iter().map(|&(_, c)| c).collect();
        match word.to_ascii_uppercase().as_str() {
            "AND" => TokenKind::And,
            "OR" => TokenKind::Or,
            "NOT" => TokenKind::Not,
            "BETWEEN" => TokenKind::Between,
            "IN" => TokenKind::In,
            "LIKE" => TokenKind::Like,
            "TRUE" => TokenKind::True,
            "FALSE" => TokenKind::False,
            _ => TokenKind::Ident(word),
        }
    }
}
