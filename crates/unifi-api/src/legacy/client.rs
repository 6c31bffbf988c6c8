// Legacy API HTTP client
//
// Wraps `reqwest::Client` with UniFi-specific URL construction, envelope
// unwrapping, and platform-aware path prefixing. Endpoint modules (clients,
// sites) are implemented as inherent methods in separate files.

use secrecy::SecretString;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::legacy::models::LegacyResponse;
use crate::platform::ControllerPlatform;
use crate::transport::TransportConfig;

/// Raw HTTP client for the UniFi controller's legacy API.
///
/// Handles the `{ data: [], meta: { rc, msg } }` envelope, site-scoped
/// URL construction, and platform-aware path prefixing. All methods return
/// unwrapped `data` payloads.
pub struct LegacyClient {
    http: reqwest::Client,
    base_url: Url,
    site: String,
    platform: ControllerPlatform,
}

impl LegacyClient {
    /// Create a new legacy client authenticated with an API key.
    ///
    /// The `base_url` should be the controller root (e.g. `https://192.168.1.1`
    /// for UniFi OS or `https://controller:8443` for standalone).
    pub fn new(
        base_url: Url,
        site: String,
        platform: ControllerPlatform,
        api_key: &SecretString,
        transport: &TransportConfig,
    ) -> Result<Self, Error> {
        let http = transport.build_client(api_key)?;
        Ok(Self {
            http,
            base_url,
            site,
            platform,
        })
    }

    /// Create a legacy client with a pre-built `reqwest::Client`.
    pub fn with_client(
        http: reqwest::Client,
        base_url: Url,
        site: String,
        platform: ControllerPlatform,
    ) -> Self {
        Self {
            http,
            base_url,
            site,
            platform,
        }
    }

    /// The current site identifier.
    pub fn site(&self) -> &str {
        &self.site
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Build a full URL for a controller-level API path.
    ///
    /// On UniFi OS: `https://host/proxy/network/api/{path}`
    pub(crate) fn api_url(&self, path: &str) -> Result<Url, Error> {
        let full = format!(
            "{}{}/api/{}",
            self.base_url.as_str().trim_end_matches('/'),
            self.platform.legacy_prefix(),
            path
        );
        Ok(Url::parse(&full)?)
    }

    /// Build a site-scoped URL: `{base}{prefix}/api/s/{site}/{path}`
    pub(crate) fn site_url(&self, path: &str) -> Result<Url, Error> {
        self.api_url(&format!("s/{}/{}", self.site, path))
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request and unwrap the legacy envelope.
    pub(crate) async fn get<T: DeserializeOwned>(&self, url: Url) -> Result<Vec<T>, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).send().await.map_err(Error::Transport)?;

        Self::parse_envelope(resp).await
    }

    /// Parse the `{ meta, data }` envelope, returning `data` on success
    /// or an `Error::LegacyApi` if `meta.rc != "ok"`.
    async fn parse_envelope<T: DeserializeOwned>(resp: reqwest::Response) -> Result<Vec<T>, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN
        {
            return Err(Error::InvalidApiKey {
                status: status.as_u16(),
            });
        }

        let body = resp.text().await.map_err(Error::Transport)?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                body,
            });
        }

        let envelope: LegacyResponse<T> =
            serde_json::from_str(&body).map_err(|e| Error::Deserialization {
                message: e.to_string(),
                body: body.clone(),
            })?;

        match envelope.meta.rc.as_str() {
            "ok" => Ok(envelope.data),
            _ => Err(Error::LegacyApi {
                message: envelope
                    .meta
                    .msg
                    .unwrap_or_else(|| format!("rc={}", envelope.meta.rc)),
            }),
        }
    }
}
