// ── Recursive-descent predicate parser ──
//
// Precedence, lowest first: OR, AND, NOT, comparison, parenthesized group.
// Parsing resolves every field name; a second pass then checks operand
// types over the finished tree, so an unknown field is always reported
// ahead of any type mismatch and a compiled tree never meets a type error
// at evaluation time.

use std::ops::Range;

use super::ast::{Expr, Literal, Operand};
use super::error::FilterError;
use super::lexer::{Token, TokenKind, syntax_error, tokenize};
use super::like::LikePattern;
use super::schema::Field;

/// Deepest allowed nesting of parentheses and `NOT`.
const MAX_DEPTH: usize = 128;

pub fn parse(source: &str) -> Result<Expr, FilterError> {
    let tokens = tokenize(source)?;
    let mut parser = Parser {
        source,
        tokens,
        pos: 0,
        depth: 0,
    };

    if parser.peek() == &TokenKind::Eof {
        return Err(parser.error_here("empty predicate"));
    }
    let expr = parser.or()?;
    match parser.peek() {
        TokenKind::Eof => check(expr),
        TokenKind::RParen => Err(parser.error_here("unmatched ')'")),
        _ => Err(parser.error_here("unexpected trailing input")),
    }
}

struct Parser<'a> {
    source: &'a str,
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser<'_> {
    fn current(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek(&self) -> &TokenKind {
        self.current().map_or(&TokenKind::Eof, |t| &t.kind)
    }

    fn span(&self) -> Range<usize> {
        self.current()
            .map_or(self.source.len()..self.source.len(), |t| t.span.clone())
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.pos).cloned();
        if token.as_ref().is_some_and(|t| t.kind != TokenKind::Eof) {
            self.pos += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek() == kind {
            self.advance();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind, what: &str) -> Result<(), FilterError> {
        if self.eat(kind) {
            Ok(())
        } else {
            Err(self.error_here(format!("expected {what}")))
        }
    }

    fn error_here(&self, message: impl Into<String>) -> FilterError {
        syntax_error(self.source, self.span(), message)
    }

    /// Run `f` one nesting level deeper, refusing to go past `MAX_DEPTH`.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, FilterError>,
    ) -> Result<T, FilterError> {
        if self.depth >= MAX_DEPTH {
            return Err(self.error_here("expression nested too deeply"));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    fn or(&mut self) -> Result<Expr, FilterError> {
        let mut left = self.and()?;
        while self.eat(&TokenKind::Or) {
            let right = self.and()?;
            left = Expr::Or(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn and(&mut self) -> Result<Expr, FilterError> {
        let mut left = self.not()?;
        while self.eat(&TokenKind::And) {
            let right = self.not()?;
            left = Expr::And(Box::new(left), Box::new(right));
        }
        Ok(left)
    }

    fn not(&mut self) -> Result<Expr, FilterError> {
        if self.peek() == &TokenKind::Not {
            return self.nested(|p| {
                p.advance();
                Ok(Expr::Not(Box::new(p.not()?)))
            });
        }
        self.predicate()
    }

    fn predicate(&mut self) -> Result<Expr, FilterError> {
        if self.peek() == &TokenKind::LParen {
            return self.nested(|p| {
                p.advance();
                let inner = p.or()?;
                p.expect(&TokenKind::RParen, "')'")?;
                Ok(inner)
            });
        }

        let subject = self.operand()?;
        if let TokenKind::Cmp(op) = *self.peek() {
            self.advance();
            let right = self.operand()?;
            return Ok(Expr::Compare {
                left: subject,
                op,
                right,
            });
        }

        let negated = self.eat(&TokenKind::Not);
        match self.peek() {
            TokenKind::Between => {
                self.advance();
                self.between(subject, negated)
            }
            TokenKind::In => {
                self.advance();
                self.in_list(subject, negated)
            }
            TokenKind::Like => {
                self.advance();
                self.like(subject, negated)
            }
            _ if negated => Err(self.error_here("expected BETWEEN, IN or LIKE after NOT")),
            _ => Err(self.error_here("expected comparison operator")),
        }
    }

    fn between(&mut self, subject: Operand, negated: bool) -> Result<Expr, FilterError> {
        let low = self.operand()?;
        self.expect(&TokenKind::And, "AND in BETWEEN")?;
        let high = self.operand()?;
        Ok(Expr::Between {
            subject,
            low,
            high,
            negated,
        })
    }

    fn in_list(&mut self, subject: Operand, negated: bool) -> Result<Expr, FilterError> {
        self.expect(&TokenKind::LParen, "'(' after IN")?;
        let mut list = vec![self.operand()?];
        while self.eat(&TokenKind::Comma) {
            list.push(self.operand()?);
        }
        self.expect(&TokenKind::RParen, "')' to close IN list")?;
        Ok(Expr::In {
            subject,
            list,
            negated,
        })
    }

    fn like(&mut self, subject: Operand, negated: bool) -> Result<Expr, FilterError> {
        let TokenKind::Str(pattern) = self.peek().clone() else {
            return Err(self.error_here("LIKE pattern must be a string literal"));
        };
        self.advance();
        Ok(Expr::Like {
            subject,
            pattern: LikePattern::compile(&pattern),
            negated,
        })
    }

    fn operand(&mut self) -> Result<Operand, FilterError> {
        let operand = match self.peek() {
            TokenKind::Ident(name) => Operand::Field(Field::lookup(name)?),
            TokenKind::Str(s) => Operand::Literal(Literal::Text(s.clone())),
            TokenKind::Int(n) => Operand::Literal(Literal::Int(*n)),
            TokenKind::Float(x) => Operand::Literal(Literal::Float(*x)),
            TokenKind::True => Operand::Literal(Literal::Int(1)),
            TokenKind::False => Operand::Literal(Literal::Int(0)),
            _ => return Err(self.error_here("expected a field name or literal")),
        };
        self.advance();
        Ok(operand)
    }
}

// ── Type checking ──

/// Second pass: make every comparison well-typed, coercing numeric-looking
/// string literals that face a numeric operand.
fn check(expr: Expr) -> Result<Expr, FilterError> {
    Ok(match expr {
        Expr::Compare { left, op, right } => {
            let (left, right) = unify(left, right)?;
            Expr::Compare { left, op, right }
        }
        Expr::Between {
            subject,
            low,
            high,
            negated,
        } => {
            // settle the subject against both bounds before coercing either
            let subject = unify(unify(subject, low.clone())?.0, high.clone())?.0;
            let (subject, low) = unify(subject, low)?;
            let (subject, high) = unify(subject, high)?;
            Expr::Between {
                subject,
                low,
                high,
                negated,
            }
        }
        Expr::In {
            subject,
            list,
            negated,
        } => {
            let (subject, list) = unify_all(subject, list)?;
            Expr::In {
                subject,
                list,
                negated,
            }
        }
        Expr::Like {
            subject,
            pattern,
            negated,
        } => {
            if class(&subject) == Class::Number {
                return Err(FilterError::TypeMismatch {
                    subject: subject_name(&subject),
                    expected: describe_kind(&subject),
                    found: format!("LIKE pattern {pattern}"),
                });
            }
            Expr::Like {
                subject,
                pattern,
                negated,
            }
        }
        Expr::And(a, b) => Expr::And(Box::new(check(*a)?), Box::new(check(*b)?)),
        Expr::Or(a, b) => Expr::Or(Box::new(check(*a)?), Box::new(check(*b)?)),
        Expr::Not(inner) => Expr::Not(Box::new(check(*inner)?)),
    })
}

/// Settle the subject's type against every item first, then bring each
/// item in line with that final type.
fn unify_all(
    mut subject: Operand,
    items: Vec<Operand>,
) -> Result<(Operand, Vec<Operand>), FilterError> {
    for item in &items {
        subject = unify(subject, item.clone())?.0;
    }
    let items = items
        .into_iter()
        .map(|item| unify(subject.clone(), item).map(|(_, item)| item))
        .collect::<Result<Vec<_>, _>>()?;
    Ok((subject, items))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Class {
    Text,
    Number,
}

fn class(operand: &Operand) -> Class {
    match operand {
        Operand::Field(field) if field.kind().is_numeric() => Class::Number,
        Operand::Literal(Literal::Int(_) | Literal::Float(_)) => Class::Number,
        _ => Class::Text,
    }
}

/// Numeric reading of a quoted literal, e.g. `'-45'`.
fn coerce(operand: &Operand) -> Option<Operand> {
    let Operand::Literal(Literal::Text(text)) = operand else {
        return None;
    };
    let text = text.trim();
    if let Ok(n) = text.parse::<i64>() {
        return Some(Operand::Literal(Literal::Int(n)));
    }
    text.parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .map(|x| Operand::Literal(Literal::Float(x)))
}

/// Make two operands comparable, coercing a numeric-looking string literal
/// when the other side is numeric.
fn unify(left: Operand, right: Operand) -> Result<(Operand, Operand), FilterError> {
    match (class(&left), class(&right)) {
        (a, b) if a == b => Ok((left, right)),
        (Class::Number, Class::Text) => match coerce(&right) {
            Some(right) => Ok((left, right)),
            None => Err(mismatch(&left, &right)),
        },
        _ => match coerce(&left) {
            Some(left) => Ok((left, right)),
            None => Err(mismatch(&left, &right)),
        },
    }
}

fn mismatch(left: &Operand, right: &Operand) -> FilterError {
    // name the field side when there is one
    let (subject, other) = match (left, right) {
        (Operand::Literal(_), Operand::Field(_)) => (right, left),
        _ => (left, right),
    };
    FilterError::TypeMismatch {
        subject: subject_name(subject),
        expected: describe_kind(subject),
        found: describe(other),
    }
}

fn subject_name(operand: &Operand) -> String {
    operand.to_string()
}

fn describe_kind(operand: &Operand) -> String {
    match operand {
        Operand::Field(field) => field.kind().to_string(),
        Operand::Literal(Literal::Text(_)) => "string".into(),
        Operand::Literal(Literal::Int(_)) => "integer".into(),
        Operand::Literal(Literal::Float(_)) => "numeric".into(),
    }
}

fn describe(operand: &Operand) -> String {
    match operand {
        Operand::Field(field) => format!("{field} ({})", field.kind()),
        Operand::Literal(Literal::Text(s)) => format!("string '{s}'"),
        Operand::Literal(lit) => format!("number {lit}"),
    }
}
