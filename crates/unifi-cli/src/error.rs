//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with
//! actionable help text and a process exit code.

use miette::Diagnostic;
use strum::IntoEnumIterator;
use thiserror::Error;

use unifi_config::ConfigError;
use unifi_core::{CoreError, Field, FilterError};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const AUTH: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to controller at {url}: {reason}")]
    #[diagnostic(
        code(unifi::connection_failed),
        help(
            "Check that the controller is running and reachable.\n\
             Self-signed certificate? Try --insecure (-k)."
        )
    )]
    ConnectionFailed { url: String, reason: String },

    // ── Authentication ───────────────────────────────────────────────
    #[error("Authentication failed: {message}")]
    #[diagnostic(
        code(unifi::auth_failed),
        help(
            "Verify the API key (Settings > Control Plane > Integrations on the controller).\n\
             Reconfigure with: unifi config init"
        )
    )]
    AuthFailed { message: String },

    #[error("No API key configured for profile '{profile}'")]
    #[diagnostic(
        code(unifi::no_credentials),
        help(
            "Configure credentials with: unifi config init\n\
             Or pass --api-key / set UNIFI_API_KEY."
        )
    )]
    NoCredentials { profile: String },

    // ── Resources ────────────────────────────────────────────────────
    #[error("Not found: {resource}")]
    #[diagnostic(
        code(unifi::not_found),
        help("Check the site name. Run: unifi sites list")
    )]
    NotFound { resource: String },

    // ── API ──────────────────────────────────────────────────────────
    #[error("API error: {message}")]
    #[diagnostic(code(unifi::api_error))]
    ApiError { message: String },

    #[error("Request timed out after {seconds}s")]
    #[diagnostic(
        code(unifi::timeout),
        help("Increase timeout with --timeout or check controller responsiveness.")
    )]
    Timeout { seconds: u64 },

    // ── Filtering ────────────────────────────────────────────────────
    #[error("--wired and --wireless are mutually exclusive")]
    #[diagnostic(
        code(unifi::conflicting_flags),
        help("Use either --wired or --wireless, not both.")
    )]
    ConflictingFlags,

    #[error("failed to apply client filter")]
    #[diagnostic(code(unifi::filter), help("{hint}"))]
    Filter {
        #[source]
        source: FilterError,
        hint: String,
    },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(unifi::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Profile '{name}' not found in configuration")]
    #[diagnostic(
        code(unifi::profile_not_found),
        help(
            "Available profiles: {available}\n\
             Create one with: unifi config init"
        )
    )]
    ProfileNotFound { name: String, available: String },

    #[error("No controller configured")]
    #[diagnostic(
        code(unifi::no_config),
        help(
            "Create a profile with: unifi config init\n\
             Or pass --controller / set UNIFI_HOST.\n\
             Config file: {path}"
        )
    )]
    NoConfig { path: String },

    #[error(transparent)]
    #[diagnostic(code(unifi::config))]
    Config(ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    #[diagnostic(code(unifi::io))]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(unifi::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(unifi::yaml))]
    Yaml(#[from] serde_yaml::Error),

    #[error("Internal error: {0}")]
    #[diagnostic(code(unifi::internal))]
    Internal(String),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::AuthFailed { .. } | Self::NoCredentials { .. } => exit_code::AUTH,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Timeout { .. } => exit_code::TIMEOUT,
            Self::ConflictingFlags
            | Self::Filter { .. }
            | Self::Validation { .. }
            | Self::ProfileNotFound { .. } => exit_code::USAGE,
            _ => exit_code::GENERAL,
        }
    }
}

// ── FilterError → CliError ───────────────────────────────────────────

fn filter_hint(err: &FilterError) -> String {
    match err {
        FilterError::ConflictingFlags => "Use either --wired or --wireless, not both.".into(),
        FilterError::Syntax { column, .. } => format!(
            "Check the expression around column {column}.\n\
             Strings use single quotes: essid = 'HomeWiFi'"
        ),
        FilterError::UnknownField { valid, .. } => format!(
            "Valid fields: {}\nRun `unifi clients fields` to see their types.",
            valid.join(", ")
        ),
        FilterError::TypeMismatch { .. } => {
            let text: Vec<_> = Field::iter()
                .filter(|f| !f.kind().is_numeric())
                .map(Field::as_str)
                .collect();
            format!(
                "Only {} are text fields; compare them with quoted strings.\n\
                 Every other field is numeric: signal >= -65, is_wired = 1",
                text.join(", ")
            )
        }
    }
}

impl From<FilterError> for CliError {
    fn from(source: FilterError) -> Self {
        if matches!(source, FilterError::ConflictingFlags) {
            return Self::ConflictingFlags;
        }
        let hint = filter_hint(&source);
        Self::Filter { source, hint }
    }
}

// ── CoreError → CliError ─────────────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => Self::ConnectionFailed { url, reason },
            CoreError::AuthenticationFailed { message } => Self::AuthFailed { message },
            CoreError::Timeout { timeout_secs } => Self::Timeout {
                seconds: timeout_secs,
            },
            CoreError::NotFound { resource } => Self::NotFound { resource },
            CoreError::Api { message, status } => Self::ApiError {
                message: match status {
                    Some(code) => format!("HTTP {code}: {message}"),
                    None => message,
                },
            },
            CoreError::Config { message } => Self::Validation {
                field: "controller".into(),
                reason: message,
            },
            CoreError::Internal(message) => Self::Internal(message),
        }
    }
}

// ── ConfigError → CliError ───────────────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::NoCredentials { profile } => Self::NoCredentials { profile },
            ConfigError::UnknownProfile { name, available } => Self::ProfileNotFound {
                name,
                available: if available.is_empty() {
                    "(none)".into()
                } else {
                    available.join(", ")
                },
            },
            ConfigError::Validation { field, reason } => Self::Validation { field, reason },
            err @ ConfigError::UnknownKey { .. } => Self::Validation {
                field: "key".into(),
                reason: err.to_string(),
            },
            other => Self::Config(other),
        }
    }
}
