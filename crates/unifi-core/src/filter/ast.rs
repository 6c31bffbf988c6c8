// ── Compiled predicate tree ──

use std::cmp::Ordering;
use std::fmt;

use super::like::LikePattern;
use super::schema::{Field, Value};

/// Comparison operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CmpOp {
    Eq,
    Ne,
    Lt,
    Le,
    Gt,
    Ge,
}

impl CmpOp {
    /// Whether `ordering` (left compared to right) satisfies this operator.
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::Ne => ordering != Ordering::Equal,
            Self::Lt => ordering == Ordering::Less,
            Self::Le => ordering != Ordering::Greater,
            Self::Gt => ordering == Ordering::Greater,
            Self::Ge => ordering != Ordering::Less,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::Ne => "!=",
            Self::Lt => "<",
            Self::Le => "<=",
            Self::Gt => ">",
            Self::Ge => ">=",
        }
    }
}

impl fmt::Display for CmpOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Constant value written in the predicate. `TRUE`/`FALSE` are stored as `Int(1)`/`Int(0)`.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Text(String),
    Int(i64),
    Float(f64),
}

impl Literal {
    pub fn value(&self) -> Value<'_> {
        match self {
            Self::Text(s) => Value::Text(s),
            Self::Int(n) => Value::Int(*n),
            Self::Float(x) => Value::Float(*x),
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(s) => write!(f, "'{}'", s.replace('\'', "''")),
            Self::Int(n) => write!(f, "{n}"),
            Self::Float(x) => write!(f, "{x}"),
        }
    }
}

/// One side of a comparison: a record field or a constant.
#[derive(Debug, Clone, PartialEq)]
pub enum Operand {
    Field(Field),
    Literal(Literal),
}

impl fmt::Display for Operand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(field) => write!(f, "{field}"),
            Self::Literal(lit) => write!(f, "{lit}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Compare {
        left: Operand,
        op: CmpOp,
        right: Operand,
    },
    /// Inclusive on both bounds.
    Between {
        subject: Operand,
        low: Operand,
        high: Operand,
        negated: bool,
    },
    In {
        subject: Operand,
        list: Vec<Operand>,
        negated: bool,
    },
    Like {
        subject: Operand,
        pattern: LikePattern,
        negated: bool,
    },
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

fn not_kw(negated: bool) -> &'static str {
    if negated { "NOT " } else { "" }
}

/// Renders the canonical, fully parenthesized form used in debug logs.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compare { left, op, right } => write!(f, "{left} {op} {right}"),
            Self::Between {
                subject,
                low,
                high,
                negated,
            } => write!(f, "{subject} {}BETWEEN {low} AND {high}", not_kw(*negated)),
            Self::In {
                subject,
                list,
                negated,
            } => {
                write!(f, "{subject} {}IN (", not_kw(*negated))?;
                for (i, item) in list.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
            Self::Like {
                subject,
                pattern,
                negated,
            } => write!(f, "{subject} {}LIKE {pattern}", not_kw(*negated)),
            Self::And(l, r) => write!(f, "({l} AND {r})"),
            Self::Or(l, r) => write!(f, "({l} OR {r})"),
            Self::Not(inner) => write!(f, "NOT {inner}"),
        }
    }
}
