// ── Controller façade ──
//
// Builds the legacy API client from a `ControllerConfig` and hands back
// domain records. Filtering happens after retrieval, in `crate::filter`.

use tracing::{debug, info};

use unifi_api::LegacyClient;
use unifi_api::transport::{TlsMode, TransportConfig};

use crate::config::{ControllerConfig, TlsVerification};
use crate::error::CoreError;
use crate::filter::{Predicate, retain_matching};
use crate::model::{ClientRecord, Site};

/// Read-only access to one controller site.
pub struct Controller {
    config: ControllerConfig,
    client: LegacyClient,
}

impl Controller {
    /// Build the HTTP client. Does not contact the controller.
    pub fn new(config: ControllerConfig) -> Result<Self, CoreError> {
        let transport = build_transport(&config);
        let client = LegacyClient::new(
            config.url.clone(),
            config.site.clone(),
            config.platform,
            &config.api_key,
            &transport,
        )?;
        Ok(Self { config, client })
    }

    /// Every client currently connected to the configured site.
    pub async fn list_clients(&self) -> Result<Vec<ClientRecord>, CoreError> {
        let entries = self
            .client
            .list_clients()
            .await
            .map_err(|e| self.map_err(e))?;
        info!(count = entries.len(), site = %self.config.site, "fetched clients");
        Ok(entries.into_iter().map(ClientRecord::from).collect())
    }

    /// Fetch clients and keep those matching `predicate`; `None` keeps all.
    pub async fn filtered_clients(
        &self,
        predicate: Option<&Predicate>,
    ) -> Result<Vec<ClientRecord>, CoreError> {
        let records = self.list_clients().await?;
        Ok(match predicate {
            Some(predicate) => retain_matching(records, predicate),
            None => records,
        })
    }

    pub async fn list_sites(&self) -> Result<Vec<Site>, CoreError> {
        let sites = self
            .client
            .list_sites()
            .await
            .map_err(|e| self.map_err(e))?;
        debug!(count = sites.len(), "fetched sites");
        Ok(sites.into_iter().map(Site::from).collect())
    }

    fn map_err(&self, err: unifi_api::Error) -> CoreError {
        CoreError::from(err).with_timeout(self.config.timeout.as_secs())
    }
}

fn build_transport(config: &ControllerConfig) -> TransportConfig {
    TransportConfig {
        tls: tls_to_transport(&config.tls),
        timeout: config.timeout,
    }
}

fn tls_to_transport(tls: &TlsVerification) -> TlsMode {
    match tls {
        TlsVerification::SystemDefaults => TlsMode::System,
        TlsVerification::CustomCa(path) => TlsMode::CustomCa(path.clone()),
        TlsVerification::DangerAcceptInvalid => TlsMode::DangerAcceptInvalid,
    }
}
