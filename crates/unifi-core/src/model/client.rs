// ── Client domain types ──

use serde::{Deserialize, Serialize};

use super::format::fmt_uptime;

/// One connected-device snapshot from the controller's station list.
///
/// Every attribute is concrete: missing wire fields collapse to empty
/// strings, zero, or `false`, so the filter engine never sees a null.
/// Serialized names match the controller's JSON so `--output json`
/// round-trips with what the API returned.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientRecord {
    #[serde(rename = "_id")]
    pub id: String,
    pub mac: String,
    pub site_id: String,
    pub assoc_time: i64,
    pub latest_assoc_time: i64,
    pub oui: String,
    pub user_id: String,
    pub uptime: i64,
    pub last_seen: i64,
    pub is_wired: bool,
    pub hostname: String,
    pub name: String,
    pub ip: String,

    // Wireless
    pub essid: String,
    pub bssid: String,
    pub channel: i64,
    pub radio: String,
    pub radio_name: String,
    pub radio_proto: String,
    pub rssi: i64,
    pub signal: i64,
    pub noise: i64,

    // Traffic
    pub tx_rate: i64,
    pub rx_rate: i64,
    pub tx_bytes: i64,
    pub rx_bytes: i64,
    pub tx_packets: i64,
    pub rx_packets: i64,
    #[serde(rename = "tx_bytes-r")]
    pub tx_bytes_r: f64,
    #[serde(rename = "rx_bytes-r")]
    pub rx_bytes_r: f64,
    pub satisfaction: i64,

    // Uplink
    pub note: String,
    pub ap_mac: String,
    pub sw_mac: String,
    pub sw_port: i64,
    pub network: String,
    pub network_id: String,

    // Policy
    #[serde(rename = "use_fixedip")]
    pub use_fixed_ip: bool,
    pub fixed_ip: String,
    #[serde(rename = "deviceIdOverride")]
    pub device_id_override: i64,
    pub blocked: bool,
    pub qos_policy_applied: bool,
}

impl ClientRecord {
    /// Best available label: name, then hostname, then OUI vendor, then MAC.
    pub fn display_name(&self) -> &str {
        [&self.name, &self.hostname, &self.oui]
            .into_iter()
            .find(|s| !s.is_empty())
            .unwrap_or(&self.mac)
    }

    pub fn connection_type(&self) -> &'static str {
        if self.is_wired { "Wired" } else { "Wireless" }
    }

    /// SSID for wireless clients, empty for wired ones.
    pub fn ssid(&self) -> &str {
        if self.is_wired { "" } else { self.essid.as_str() }
    }

    /// Signal strength as `"-45 dBm"`; empty for wired clients or no reading.
    pub fn signal_text(&self) -> String {
        if !self.is_wired && self.signal != 0 {
            format!("{} dBm", self.signal)
        } else {
            String::new()
        }
    }

    pub fn uptime_text(&self) -> String {
        fmt_uptime(self.uptime)
    }
}
