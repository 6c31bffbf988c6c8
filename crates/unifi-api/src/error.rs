use thiserror::Error;

/// Top-level error type for the `unifi-api` crate.
///
/// Covers transport, HTTP status, and legacy envelope failures.
/// `unifi-core` maps these into user-facing diagnostics.
#[derive(Debug, Error)]
pub enum Error {
    // ── Authentication ──────────────────────────────────────────────
    /// API key rejected by the controller (HTTP 401/403).
    #[error("Invalid API key (HTTP {status})")]
    InvalidApiKey { status: u16 },

    /// The API key could not be turned into a header value.
    #[error("API key contains characters not allowed in an HTTP header")]
    MalformedApiKey,

    // ── Transport ───────────────────────────────────────────────────
    /// HTTP transport error (connection refused, DNS failure, etc.)
    #[error("HTTP transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// URL parsing error.
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// TLS handshake or certificate error.
    #[error("TLS error: {0}")]
    Tls(String),

    /// Non-success HTTP status with the response body.
    #[error("API request failed with status {status}: {body}")]
    Http { status: u16, body: String },

    // ── Legacy API ──────────────────────────────────────────────────
    /// Error from the legacy API (parsed from the `{meta: {rc, msg}}` envelope).
    #[error("Legacy API error: {message}")]
    LegacyApi { message: String },

    // ── Data ────────────────────────────────────────────────────────
    /// JSON deserialization failed, with the raw body for debugging.
    #[error("Deserialization error: {message}")]
    Deserialization { message: String, body: String },
}
