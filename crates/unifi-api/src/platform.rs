use serde::{Deserialize, Serialize};

/// The platform type of the UniFi controller.
///
/// Determines the URL prefix in front of the legacy API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ControllerPlatform {
    /// UniFi OS device (UDM, UCG, Cloud Key Gen2+) -- `/proxy/network/` prefix.
    #[default]
    UnifiOs,
    /// Standalone Network Application (Java) -- port 8443, no prefix.
    ClassicController,
}

impl ControllerPlatform {
    /// The path prefix for legacy API endpoints.
    pub fn legacy_prefix(self) -> &'static str {
        match self {
            Self::UnifiOs => "/proxy/network",
            Self::ClassicController => "",
        }
    }
}

impl std::str::FromStr for ControllerPlatform {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "unifi-os" | "unifios" | "udm" => Ok(Self::UnifiOs),
            "classic-controller" | "classic" | "standalone" => Ok(Self::ClassicController),
            other => Err(format!(
                "expected 'unifi-os' or 'classic', got '{other}'"
            )),
        }
    }
}
