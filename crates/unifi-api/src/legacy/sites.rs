// Legacy API site endpoints

use tracing::debug;

use crate::error::Error;
use crate::legacy::client::LegacyClient;
use crate::legacy::models::LegacySite;

impl LegacyClient {
    /// List sites visible to the API key.
    ///
    /// `GET /api/self/sites` -- controller-level, not site-scoped.
    pub async fn list_sites(&self) -> Result<Vec<LegacySite>, Error> {
        let url = self.api_url("self/sites")?;
        debug!("listing sites");
        self.get(url).await
    }
}
