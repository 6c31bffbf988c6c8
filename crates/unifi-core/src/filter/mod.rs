//! WHERE-clause filtering over connected clients.
//!
//! A predicate such as `is_wired = 0 AND signal BETWEEN -70 AND -50` is
//! compiled once into an [`Expr`] tree (field names resolved, operand types
//! checked) and then evaluated against each [`ClientRecord`].
//!
//! [`ClientRecord`]: crate::model::ClientRecord

pub mod apply;
pub mod ast;
pub mod error;
mod eval;
pub mod flags;
mod lexer;
pub mod like;
mod parser;
pub mod schema;

use std::fmt;
use std::str::FromStr;

pub use apply::{filter_clients, retain_matching};
pub use ast::{CmpOp, Expr, Literal, Operand};
pub use error::FilterError;
pub use flags::{ClientFlags, quote_literal};
pub use like::LikePattern;
pub use schema::{Field, FieldKind, Value};

use crate::model::ClientRecord;

/// A compiled, immutable predicate.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    expr: Expr,
    source: String,
}

impl Predicate {
    /// Compile `source`. Blank input is a syntax error; callers that want
    /// "match everything" should skip compilation instead.
    pub fn parse(source: &str) -> Result<Self, FilterError> {
        let expr = parser::parse(source)?;
        Ok(Self {
            expr,
            source: source.to_owned(),
        })
    }

    pub(crate) fn from_parts(expr: Expr, source: String) -> Self {
        Self { expr, source }
    }

    pub fn matches(&self, record: &ClientRecord) -> bool {
        self.expr.matches(record)
    }

    /// The text this predicate was compiled from.
    pub fn as_str(&self) -> &str {
        &self.source
    }
}

impl FromStr for Predicate {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Canonical form of the compiled tree.
impl fmt::Display for Predicate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.expr.fmt(f)
    }
}
