// ── Core error types ──
//
// User-facing errors from unifi-core. Consumers never see raw HTTP statuses
// or JSON failures; `From<unifi_api::Error>` maps them into these variants.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Connection errors ────────────────────────────────────────────
    #[error("Cannot connect to controller at {url}: {reason}")]
    ConnectionFailed { url: String, reason: String },

    #[error("Authentication failed: {message}")]
    AuthenticationFailed { message: String },

    #[error("Controller request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    // ── Data errors ──────────────────────────────────────────────────
    #[error("Not found: {resource}")]
    NotFound { resource: String },

    #[error("API error: {message}")]
    Api {
        message: String,
        /// HTTP status code, when there was one.
        status: Option<u16>,
    },

    // ── Configuration errors ─────────────────────────────────────────
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Rewrite a transport timeout with the configured limit.
    pub(crate) fn with_timeout(self, timeout_secs: u64) -> Self {
        match self {
            Self::Timeout { .. } => Self::Timeout { timeout_secs },
            other => other,
        }
    }
}

// ── Conversion from transport-layer errors ───────────────────────────

impl From<unifi_api::Error> for CoreError {
    fn from(err: unifi_api::Error) -> Self {
        match err {
            unifi_api::Error::InvalidApiKey { status } => Self::AuthenticationFailed {
                message: format!("controller rejected the API key (HTTP {status})"),
            },
            unifi_api::Error::MalformedApiKey => Self::AuthenticationFailed {
                message: "API key contains characters not allowed in an HTTP header".into(),
            },
            unifi_api::Error::Transport(ref e) => {
                if e.is_timeout() {
                    Self::Timeout { timeout_secs: 0 }
                } else if e.is_connect() {
                    Self::ConnectionFailed {
                        url: e
                            .url()
                            .map_or_else(|| "<unknown>".into(), ToString::to_string),
                        reason: e.to_string(),
                    }
                } else {
                    Self::Api {
                        message: e.to_string(),
                        status: e.status().map(|s| s.as_u16()),
                    }
                }
            }
            unifi_api::Error::InvalidUrl(e) => Self::Config {
                message: format!("Invalid URL: {e}"),
            },
            unifi_api::Error::Tls(msg) => Self::ConnectionFailed {
                url: String::new(),
                reason: format!("TLS error: {msg}"),
            },
            unifi_api::Error::Http { status: 404, body } => Self::NotFound {
                resource: if body.is_empty() {
                    "requested resource".into()
                } else {
                    body
                },
            },
            unifi_api::Error::Http { status, body } => Self::Api {
                message: body,
                status: Some(status),
            },
            unifi_api::Error::LegacyApi { message } => Self::Api {
                message,
                status: None,
            },
            unifi_api::Error::Deserialization { message, body: _ } => {
                Self::Internal(format!("Deserialization error: {message}"))
            }
        }
    }
}
