use thiserror::Error;

/// Everything that can stop a filter pass before it produces a result.
///
/// An empty match set is not an error.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FilterError {
    // ── Configuration ────────────────────────────────────────────────
    #[error("--wired and --wireless are mutually exclusive")]
    ConflictingFlags,

    // ── Syntax ───────────────────────────────────────────────────────
    #[error("syntax error at column {column}: {message} (near `{fragment}`)")]
    Syntax {
        message: String,
        fragment: String,
        /// 1-based character column of the offending token.
        column: usize,
    },

    // ── Semantic ─────────────────────────────────────────────────────
    #[error("unknown field '{name}' (valid fields: {})", valid.join(", "))]
    UnknownField {
        name: String,
        valid: Vec<&'static str>,
    },

    #[error("type mismatch: cannot compare {subject} ({expected}) with {found}")]
    TypeMismatch {
        subject: String,
        expected: String,
        found: String,
    },
}
