// Legacy API response types
//
// Models for the UniFi controller's legacy JSON API. All responses are wrapped
// in the `LegacyResponse<T>` envelope. Fields use `#[serde(default)]` liberally
// because the API is inconsistent about field presence across firmware versions.

use serde::{Deserialize, Serialize};

// ── Response Envelope ────────────────────────────────────────────────

/// Standard UniFi legacy API response envelope.
///
/// Every legacy endpoint wraps its payload:
/// ```json
/// { "meta": { "rc": "ok", "msg": "optional" }, "data": [...] }
/// ```
#[derive(Debug, Deserialize)]
pub struct LegacyResponse<T> {
    pub meta: Meta,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Metadata from the legacy envelope. `rc` == `"ok"` means success.
#[derive(Debug, Deserialize)]
pub struct Meta {
    pub rc: String,
    #[serde(default)]
    pub msg: Option<String>,
}

// ── Client (Station) ─────────────────────────────────────────────────

/// Connected client from `stat/sta`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LegacyClientEntry {
    #[serde(rename = "_id", default)]
    pub id: Option<String>,
    pub mac: String,
    #[serde(default)]
    pub site_id: Option<String>,
    #[serde(default)]
    pub assoc_time: Option<i64>,
    #[serde(default)]
    pub latest_assoc_time: Option<i64>,
    #[serde(default)]
    pub oui: Option<String>,
    #[serde(default)]
    pub user_id: Option<String>,
    #[serde(default)]
    pub uptime: Option<i64>,
    #[serde(default)]
    pub last_seen: Option<i64>,
    #[serde(default)]
    pub is_wired: Option<bool>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub ip: Option<String>,
    #[serde(default)]
    pub essid: Option<String>,
    #[serde(default)]
    pub bssid: Option<String>,
    #[serde(default)]
    pub channel: Option<i64>,
    #[serde(default)]
    pub radio: Option<String>,
    #[serde(default)]
    pub radio_name: Option<String>,
    #[serde(default)]
    pub radio_proto: Option<String>,
    #[serde(default)]
    pub rssi: Option<i64>,
    #[serde(default)]
    pub signal: Option<i64>,
    #[serde(default)]
    pub noise: Option<i64>,
    #[serde(default)]
    pub tx_rate: Option<i64>,
    #[serde(default)]
    pub rx_rate: Option<i64>,
    #[serde(default)]
    pub tx_bytes: Option<i64>,
    #[serde(default)]
    pub rx_bytes: Option<i64>,
    #[serde(default)]
    pub tx_packets: Option<i64>,
    #[serde(default)]
    pub rx_packets: Option<i64>,
    #[serde(default, rename = "tx_bytes-r")]
    pub tx_bytes_r: Option<f64>,
    #[serde(default, rename = "rx_bytes-r")]
    pub rx_bytes_r: Option<f64>,
    #[serde(default)]
    pub satisfaction: Option<i64>,
    #[serde(default)]
    pub note: Option<String>,
    #[serde(default)]
    pub ap_mac: Option<String>,
    #[serde(default)]
    pub sw_mac: Option<String>,
    #[serde(default)]
    pub sw_port: Option<i64>,
    #[serde(default)]
    pub network: Option<String>,
    #[serde(default)]
    pub network_id: Option<String>,
    #[serde(default, rename = "use_fixedip")]
    pub use_fixed_ip: Option<bool>,
    #[serde(default)]
    pub fixed_ip: Option<String>,
    #[serde(default, rename = "deviceIdOverride")]
    pub device_id_override: Option<i64>,
    #[serde(default)]
    pub blocked: Option<bool>,
    #[serde(default)]
    pub qos_policy_applied: Option<bool>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

// ── Site ─────────────────────────────────────────────────────────────

/// Site object from `/api/self/sites`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LegacySite {
    #[serde(rename = "_id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub desc: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Catch-all for undocumented fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}
