// ── Predicate evaluation ──

use std::cmp::Ordering;

use super::ast::{CmpOp, Expr, Operand};
use super::schema::Value;
use crate::model::ClientRecord;

impl Operand {
    fn resolve<'a>(&'a self, record: &'a ClientRecord) -> Value<'a> {
        match self {
            Self::Field(field) => record.field_value(*field),
            Self::Literal(lit) => lit.value(),
        }
    }
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn widen(n: i64) -> f64 {
    n as f64
}

/// Order two values. `None` for pairs that never compare (NaN, or text
/// against a number, which compilation already rules out).
pub fn compare(left: Value<'_>, right: Value<'_>) -> Option<Ordering> {
    match (left, right) {
        (Value::Text(a), Value::Text(b)) => Some(a.cmp(b)),
        (Value::Int(a), Value::Int(b)) => Some(a.cmp(&b)),
        (Value::Int(a), Value::Float(b)) => widen(a).partial_cmp(&b),
        (Value::Float(a), Value::Int(b)) => a.partial_cmp(&widen(b)),
        (Value::Float(a), Value::Float(b)) => a.partial_cmp(&b),
        _ => None,
    }
}

fn holds(op: CmpOp, left: Value<'_>, right: Value<'_>) -> bool {
    compare(left, right).is_some_and(|ordering| op.holds(ordering))
}

impl Expr {
    pub fn matches(&self, record: &ClientRecord) -> bool {
        match self {
            Self::Compare { left, op, right } => {
                holds(*op, left.resolve(record), right.resolve(record))
            }
            Self::Between {
                subject,
                low,
                high,
                negated,
            } => {
                let value = subject.resolve(record);
                let inside = holds(CmpOp::Ge, value, low.resolve(record))
                    && holds(CmpOp::Le, value, high.resolve(record));
                inside != *negated
            }
            Self::In {
                subject,
                list,
                negated,
            } => {
                let value = subject.resolve(record);
                let found = list
                    .iter()
                    .any(|item| holds(CmpOp::Eq, value, item.resolve(record)));
                found != *negated
            }
            Self::Like {
                subject,
                pattern,
                negated,
            } => {
                let hit = match subject.resolve(record) {
                    Value::Text(text) => pattern.matches(text),
                    _ => false,
                };
                hit != *negated
            }
            Self::And(l, r) => l.matches(record) && r.matches(record),
            Self::Or(l, r) => l.matches(record) || r.matches(record),
            Self::Not(inner) => !inner.matches(record),
        }
    }
}
