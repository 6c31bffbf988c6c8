// ── API-to-domain type conversions ──
//
// Wire types carry `Option` everywhere because the controller omits fields
// freely across firmware versions. Domain types do not: a missing value
// becomes "", 0 or false.

use unifi_api::legacy::models::{LegacyClientEntry, LegacySite};

use crate::model::{ClientRecord, Site};

impl From<LegacyClientEntry> for ClientRecord {
    fn from(c: LegacyClientEntry) -> Self {
        Self {
            id: c.id.unwrap_or_default(),
            mac: c.mac,
            site_id: c.site_id.unwrap_or_default(),
            assoc_time: c.assoc_time.unwrap_or_default(),
            latest_assoc_time: c.latest_assoc_time.unwrap_or_default(),
            oui: c.oui.unwrap_or_default(),
            user_id: c.user_id.unwrap_or_default(),
            uptime: c.uptime.unwrap_or_default(),
            last_seen: c.last_seen.unwrap_or_default(),
            is_wired: c.is_wired.unwrap_or_default(),
            hostname: c.hostname.unwrap_or_default(),
            name: c.name.unwrap_or_default(),
            ip: c.ip.unwrap_or_default(),
            essid: c.essid.unwrap_or_default(),
            bssid: c.bssid.unwrap_or_default(),
            channel: c.channel.unwrap_or_default(),
            radio: c.radio.unwrap_or_default(),
            radio_name: c.radio_name.unwrap_or_default(),
            radio_proto: c.radio_proto.unwrap_or_default(),
            rssi: c.rssi.unwrap_or_default(),
            signal: c.signal.unwrap_or_default(),
            noise: c.noise.unwrap_or_default(),
            tx_rate: c.tx_rate.unwrap_or_default(),
            rx_rate: c.rx_rate.unwrap_or_default(),
            tx_bytes: c.tx_bytes.unwrap_or_default(),
            rx_bytes: c.rx_bytes.unwrap_or_default(),
            tx_packets: c.tx_packets.unwrap_or_default(),
            rx_packets: c.rx_packets.unwrap_or_default(),
            tx_bytes_r: c.tx_bytes_r.unwrap_or_default(),
            rx_bytes_r: c.rx_bytes_r.unwrap_or_default(),
            satisfaction: c.satisfaction.unwrap_or_default(),
            note: c.note.unwrap_or_default(),
            ap_mac: c.ap_mac.unwrap_or_default(),
            sw_mac: c.sw_mac.unwrap_or_default(),
            sw_port: c.sw_port.unwrap_or_default(),
            network: c.network.unwrap_or_default(),
            network_id: c.network_id.unwrap_or_default(),
            use_fixed_ip: c.use_fixed_ip.unwrap_or_default(),
            fixed_ip: c.fixed_ip.unwrap_or_default(),
            device_id_override: c.device_id_override.unwrap_or_default(),
            blocked: c.blocked.unwrap_or_default(),
            qos_policy_applied: c.qos_policy_applied.unwrap_or_default(),
        }
    }
}

impl From<LegacySite> for Site {
    fn from(s: LegacySite) -> Self {
        Self {
            id: s.id,
            name: s.name,
            description: s.desc.filter(|d| !d.is_empty()),
            role: s.role,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_collapse_to_defaults() {
        let entry: LegacyClientEntry =
            serde_json::from_str(r#"{ "mac": "aa:bb:cc:dd:ee:ff" }"#).unwrap();
        let record = ClientRecord::from(entry);
        assert_eq!(record.mac, "aa:bb:cc:dd:ee:ff");
        assert_eq!(record.name, "");
        assert_eq!(record.signal, 0);
        assert!(!record.is_wired);
        assert!(record.rx_bytes_r.abs() < f64::EPSILON);
    }

    #[test]
    fn present_fields_carry_over() {
        let entry: LegacyClientEntry = serde_json::from_str(
            r#"{
                "mac": "aa:bb:cc:dd:ee:01",
                "name": "iPhone",
                "is_wired": false,
                "essid": "HomeWiFi",
                "signal": -45,
                "rx_bytes-r": 1024.5,
                "use_fixedip": true,
                "ap_mac": "11:22:33:44:55:66"
            }"#,
        )
        .unwrap();
        let record = ClientRecord::from(entry);
        assert_eq!(record.name, "iPhone");
        assert_eq!(record.essid, "HomeWiFi");
        assert_eq!(record.signal, -45);
        assert!((record.rx_bytes_r - 1024.5).abs() < f64::EPSILON);
        assert!(record.use_fixed_ip);
        assert_eq!(record.ap_mac, "11:22:33:44:55:66");
    }

    #[test]
    fn site_blank_description_is_none() {
        let site: LegacySite = serde_json::from_str(
            r#"{ "_id": "s1", "name": "default", "desc": "", "role": "admin" }"#,
        )
        .unwrap();
        let site = Site::from(site);
        assert_eq!(site.name, "default");
        assert_eq!(site.description, None);
        assert_eq!(site.role.as_deref(), Some("admin"));
    }
}
