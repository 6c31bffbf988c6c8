// ── Runtime connection configuration ──
//
// Describes *how* to reach a controller. Carries credentials and tuning but
// never touches disk: the CLI builds a `ControllerConfig` and hands it in.

use std::path::PathBuf;
use std::time::Duration;

use secrecy::SecretString;
use unifi_api::ControllerPlatform;
use url::Url;

/// TLS verification strategy.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum TlsVerification {
    /// System CA store (strict).
    SystemDefaults,
    /// Custom CA certificate file.
    CustomCa(PathBuf),
    /// Skip verification (self-signed certs). Default for local controllers.
    #[default]
    DangerAcceptInvalid,
}

/// Configuration for connecting to a single controller.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Controller URL (e.g., `https://192.168.1.1`).
    pub url: Url,
    /// Sent as `X-API-KEY` on every request.
    pub api_key: SecretString,
    /// Site to operate on (defaults to "default").
    pub site: String,
    pub platform: ControllerPlatform,
    pub tls: TlsVerification,
    pub timeout: Duration,
}

impl ControllerConfig {
    pub fn new(url: Url, api_key: SecretString) -> Self {
        Self {
            url,
            api_key,
            site: "default".into(),
            platform: ControllerPlatform::default(),
            tls: TlsVerification::default(),
            timeout: Duration::from_secs(30),
        }
    }
}
