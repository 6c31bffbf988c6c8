// ── Filter orchestration ──

use tracing::debug;

use super::Predicate;
use super::error::FilterError;
use crate::model::ClientRecord;

/// Keep the records matching `predicate`, in input order.
///
/// Blank predicate text is the identity and is never compiled. Otherwise the
/// predicate is compiled once before any record is looked at, so a bad
/// predicate fails without partial output.
pub fn filter_clients(
    records: Vec<ClientRecord>,
    predicate: &str,
) -> Result<Vec<ClientRecord>, FilterError> {
    if predicate.trim().is_empty() {
        debug!(total = records.len(), "no client filter, returning all records");
        return Ok(records);
    }

    let compiled = Predicate::parse(predicate)?;
    Ok(retain_matching(records, &compiled))
}

/// Keep the records matching an already compiled predicate, in input order.
pub fn retain_matching(records: Vec<ClientRecord>, predicate: &Predicate) -> Vec<ClientRecord> {
    let total = records.len();
    let matched: Vec<ClientRecord> = records
        .into_iter()
        .filter(|record| predicate.matches(record))
        .collect();

    debug!(
        %predicate,
        total,
        matched = matched.len(),
        "applied client filter"
    );
    matched
}
