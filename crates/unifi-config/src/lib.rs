//! Configuration for the `unifi` CLI.
//!
//! TOML profiles, layered loading (defaults, config file, environment),
//! API key resolution (env var, keyring, plaintext), and translation of a
//! profile into a `unifi_core::ControllerConfig`.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use unifi_core::{ControllerConfig, ControllerPlatform, TlsVerification};

/// Overrides the config file location.
pub const CONFIG_ENV: &str = "UNIFI_CONFIG";

const KEYRING_SERVICE: &str = "unifi-cli";

/// Keys accepted by [`Profile::set`].
pub const PROFILE_KEYS: &[&str] = &[
    "controller",
    "site",
    "api_key",
    "api_key_env",
    "platform",
    "ca_cert",
    "insecure",
    "timeout",
];

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("no API key configured for profile '{profile}'")]
    NoCredentials { profile: String },

    #[error("profile '{name}' not found")]
    UnknownProfile { name: String, available: Vec<String> },

    #[error("unknown config key '{key}' (valid keys: {})", PROFILE_KEYS.join(", "))]
    UnknownKey { key: String },

    #[error("keyring error: {0}")]
    Keyring(String),

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Config {
    /// Profile used when `--profile` is not given.
    pub default_profile: Option<String>,

    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_profile: Some("default".into()),
            defaults: Defaults::default(),
            profiles: BTreeMap::new(),
        }
    }
}

impl Config {
    /// The explicitly requested profile, else the configured default.
    pub fn profile_name<'a>(&'a self, requested: Option<&'a str>) -> &'a str {
        requested
            .or(self.default_profile.as_deref())
            .unwrap_or("default")
    }

    pub fn profile(&self, name: &str) -> Result<&Profile, ConfigError> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::UnknownProfile {
                name: name.into(),
                available: self.profiles.keys().cloned().collect(),
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Defaults {
    #[serde(default = "default_output")]
    pub output: String,

    #[serde(default = "default_color")]
    pub color: String,

    /// Local controllers usually run self-signed certificates.
    #[serde(default = "default_insecure")]
    pub insecure: bool,

    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            output: default_output(),
            color: default_color(),
            insecure: default_insecure(),
            timeout: default_timeout(),
        }
    }
}

fn default_output() -> String {
    "table".into()
}
fn default_color() -> String {
    "auto".into()
}
fn default_insecure() -> bool {
    true
}
fn default_timeout() -> u64 {
    30
}

/// A named controller profile.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Profile {
    /// Controller base URL (e.g., "https://192.168.1.1").
    pub controller: String,

    #[serde(default = "default_site")]
    pub site: String,

    /// API key (plaintext; prefer keyring or env var).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Environment variable name containing the API key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    #[serde(default)]
    pub platform: ControllerPlatform,

    /// Path to custom CA certificate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ca_cert: Option<PathBuf>,

    /// Overrides `defaults.insecure`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,

    /// Overrides `defaults.timeout` (seconds).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout: Option<u64>,
}

fn default_site() -> String {
    "default".into()
}

impl Profile {
    pub fn new(controller: impl Into<String>) -> Self {
        Self {
            controller: controller.into(),
            site: default_site(),
            api_key: None,
            api_key_env: None,
            platform: ControllerPlatform::default(),
            ca_cert: None,
            insecure: None,
            timeout: None,
        }
    }

    /// Update one setting from its textual form (`config set KEY VALUE`).
    pub fn set(&mut self, key: &str, value: &str) -> Result<(), ConfigError> {
        let invalid = |reason: String| ConfigError::Validation {
            field: key.into(),
            reason,
        };
        match key {
            "controller" => {
                url::Url::parse(value).map_err(|e| invalid(format!("{e}: {value}")))?;
                self.controller = value.into();
            }
            "site" => self.site = value.into(),
            "api_key" => self.api_key = Some(value.into()),
            "api_key_env" => self.api_key_env = Some(value.into()),
            "platform" => self.platform = value.parse().map_err(invalid)?,
            "ca_cert" => self.ca_cert = Some(PathBuf::from(value)),
            "insecure" => {
                self.insecure = Some(
                    value
                        .parse()
                        .map_err(|_| invalid(format!("expected true or false, got '{value}'")))?,
                );
            }
            "timeout" => {
                self.timeout = Some(
                    value
                        .parse()
                        .map_err(|_| invalid(format!("expected seconds, got '{value}'")))?,
                );
            }
            other => return Err(ConfigError::UnknownKey { key: other.into() }),
        }
        Ok(())
    }

    /// TLS strategy: an explicit CA wins unless the profile opts into
    /// `insecure`; otherwise the `insecure` setting picks.
    pub fn tls(&self, defaults: &Defaults) -> TlsVerification {
        match (&self.ca_cert, self.insecure) {
            (Some(_), Some(true)) => TlsVerification::DangerAcceptInvalid,
            (Some(path), _) => TlsVerification::CustomCa(path.clone()),
            (None, insecure) if insecure.unwrap_or(defaults.insecure) => {
                TlsVerification::DangerAcceptInvalid
            }
            (None, _) => TlsVerification::SystemDefaults,
        }
    }
}

// ── Config file path ────────────────────────────────────────────────

/// `$UNIFI_CONFIG`, else the platform config dir (`~/.config/unifi-cli/config.toml` on Linux).
pub fn config_path() -> PathBuf {
    if let Some(path) = std::env::var_os(CONFIG_ENV).filter(|p| !p.is_empty()) {
        return PathBuf::from(path);
    }
    ProjectDirs::from("com", "unifi-cli", "unifi-cli").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("unifi-cli");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical path plus environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Defaults, then `path` (if it exists), then `UNIFI_*` variables with `__`
/// as the nesting separator (`UNIFI_DEFAULTS__OUTPUT=json`).
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("UNIFI_").split("__"));

    let config: Config = figment.extract()?;
    debug!(path = %path.display(), profiles = config.profiles.len(), "loaded config");
    Ok(config)
}

// ── Config saving ───────────────────────────────────────────────────

/// Write to the canonical config path, returning it.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    debug!(path = %path.display(), "saved config");
    Ok(())
}

// ── Credentials ─────────────────────────────────────────────────────

fn keyring_entry(profile_name: &str) -> Result<keyring::Entry, ConfigError> {
    keyring::Entry::new(KEYRING_SERVICE, &format!("{profile_name}/api-key"))
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

/// Save an API key in the system keyring.
pub fn store_api_key(profile_name: &str, api_key: &str) -> Result<(), ConfigError> {
    keyring_entry(profile_name)?
        .set_password(api_key)
        .map_err(|e| ConfigError::Keyring(e.to_string()))
}

/// Resolve an API key from the profile's credential chain: the variable
/// named by `api_key_env`, the system keyring, then the plaintext key.
pub fn resolve_api_key(profile: &Profile, profile_name: &str) -> Result<SecretString, ConfigError> {
    if let Some(ref env_name) = profile.api_key_env {
        if let Ok(val) = std::env::var(env_name) {
            if !val.is_empty() {
                return Ok(SecretString::from(val));
            }
        }
    }

    if let Ok(secret) = keyring_entry(profile_name).and_then(|entry| {
        entry
            .get_password()
            .map_err(|e| ConfigError::Keyring(e.to_string()))
    }) {
        return Ok(SecretString::from(secret));
    }

    if let Some(ref key) = profile.api_key {
        return Ok(SecretString::from(key.clone()));
    }

    Err(ConfigError::NoCredentials {
        profile: profile_name.into(),
    })
}

/// Build a `ControllerConfig` from a profile, with no CLI overrides.
pub fn profile_to_controller_config(
    profile: &Profile,
    profile_name: &str,
    defaults: &Defaults,
) -> Result<ControllerConfig, ConfigError> {
    let url: url::Url = profile
        .controller
        .parse()
        .map_err(|_| ConfigError::Validation {
            field: "controller".into(),
            reason: format!("invalid URL: {}", profile.controller),
        })?;

    let api_key = resolve_api_key(profile, profile_name)?;

    Ok(ControllerConfig {
        url,
        api_key,
        site: profile.site.clone(),
        platform: profile.platform,
        tls: profile.tls(defaults),
        timeout: Duration::from_secs(profile.timeout.unwrap_or(defaults.timeout)),
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use figment::Jail;
    use pretty_assertions::assert_eq;
    use secrecy::ExposeSecret;

    use super::*;

    const SAMPLE: &str = r#"
        default_profile = "home"

        [defaults]
        output = "json"
        timeout = 10

        [profiles.home]
        controller = "https://192.168.1.1"
        api_key = "plain-key"

        [profiles.lab]
        controller = "https://lab.example:8443"
        site = "lab"
        platform = "classic-controller"
        api_key_env = "LAB_UNIFI_KEY"
        insecure = false
        timeout = 5
    "#;

    #[test]
    fn loads_profiles_and_defaults_from_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            let cfg = load_config_from(Path::new("config.toml")).unwrap();

            assert_eq!(cfg.profile_name(None), "home");
            assert_eq!(cfg.profile_name(Some("lab")), "lab");
            assert_eq!(cfg.defaults.output, "json");
            assert_eq!(cfg.defaults.color, "auto");
            assert!(cfg.defaults.insecure);

            let lab = cfg.profile("lab").unwrap();
            assert_eq!(lab.platform, ControllerPlatform::ClassicController);
            assert_eq!(cfg.profile("home").unwrap().site, "default");
            Ok(())
        });
    }

    #[test]
    fn missing_file_yields_defaults() {
        Jail::expect_with(|_jail| {
            let cfg = load_config_from(Path::new("nope.toml")).unwrap();
            assert_eq!(cfg, Config::default());
            Ok(())
        });
    }

    #[test]
    fn env_overrides_file() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            jail.set_env("UNIFI_DEFAULTS__OUTPUT", "yaml");
            jail.set_env("UNIFI_DEFAULT_PROFILE", "lab");
            let cfg = load_config_from(Path::new("config.toml")).unwrap();
            assert_eq!(cfg.defaults.output, "yaml");
            assert_eq!(cfg.profile_name(None), "lab");
            Ok(())
        });
    }

    #[test]
    fn unknown_profile_lists_available() {
        let cfg = Config::default();
        assert!(matches!(
            cfg.profile("ghost"),
            Err(ConfigError::UnknownProfile { ref name, .. }) if name == "ghost"
        ));
    }

    #[test]
    fn api_key_env_wins_over_plaintext() {
        Jail::expect_with(|jail| {
            jail.set_env("LAB_UNIFI_KEY", "from-env");
            let mut profile = Profile::new("https://10.0.0.1");
            profile.api_key_env = Some("LAB_UNIFI_KEY".into());
            profile.api_key = Some("plain".into());
            let key = resolve_api_key(&profile, "unit-test-env").unwrap();
            assert_eq!(key.expose_secret(), "from-env");
            Ok(())
        });
    }

    #[test]
    fn missing_credentials_is_an_error() {
        let profile = Profile::new("https://10.0.0.1");
        assert!(matches!(
            resolve_api_key(&profile, "unit-test-none"),
            Err(ConfigError::NoCredentials { .. })
        ));
    }

    #[test]
    fn profile_builds_controller_config() {
        Jail::expect_with(|jail| {
            jail.create_file("config.toml", SAMPLE)?;
            jail.set_env("LAB_UNIFI_KEY", "lab-secret");
            let cfg = load_config_from(Path::new("config.toml")).unwrap();

            let lab = profile_to_controller_config(cfg.profile("lab").unwrap(), "lab", &cfg.defaults)
                .unwrap();
            assert_eq!(lab.url.as_str(), "https://lab.example:8443/");
            assert_eq!(lab.site, "lab");
            assert_eq!(lab.platform, ControllerPlatform::ClassicController);
            assert_eq!(lab.tls, TlsVerification::SystemDefaults);
            assert_eq!(lab.timeout, Duration::from_secs(5));
            assert_eq!(lab.api_key.expose_secret(), "lab-secret");

            let home =
                profile_to_controller_config(cfg.profile("home").unwrap(), "home", &cfg.defaults)
                    .unwrap();
            assert_eq!(home.tls, TlsVerification::DangerAcceptInvalid);
            assert_eq!(home.timeout, Duration::from_secs(10));
            Ok(())
        });
    }

    #[test]
    fn tls_selection() {
        let defaults = Defaults::default();
        let mut profile = Profile::new("https://10.0.0.1");
        profile.ca_cert = Some("/etc/ca.pem".into());
        assert_eq!(
            profile.tls(&defaults),
            TlsVerification::CustomCa("/etc/ca.pem".into())
        );
        profile.insecure = Some(true);
        assert_eq!(profile.tls(&defaults), TlsVerification::DangerAcceptInvalid);
        profile.ca_cert = None;
        profile.insecure = Some(false);
        assert_eq!(profile.tls(&defaults), TlsVerification::SystemDefaults);
    }

    #[test]
    fn set_parses_and_validates() {
        let mut profile = Profile::new("https://10.0.0.1");
        profile.set("site", "lab").unwrap();
        profile.set("timeout", "12").unwrap();
        profile.set("insecure", "false").unwrap();
        profile.set("platform", "classic").unwrap();
        assert_eq!(profile.site, "lab");
        assert_eq!(profile.timeout, Some(12));
        assert_eq!(profile.insecure, Some(false));
        assert_eq!(profile.platform, ControllerPlatform::ClassicController);

        assert!(matches!(
            profile.set("timeout", "soon"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            profile.set("controller", "not a url"),
            Err(ConfigError::Validation { .. })
        ));
        assert!(matches!(
            profile.set("colour", "red"),
            Err(ConfigError::UnknownKey { .. })
        ));
    }

    #[test]
    fn save_then_load_preserves_profiles() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut cfg = Config::default();
        let mut profile = Profile::new("https://192.168.1.1");
        profile.api_key_env = Some("HOME_KEY".into());
        cfg.profiles.insert("default".into(), profile);
        save_config_to(&cfg, &path).unwrap();

        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.contains("[profiles.default]"));
        assert!(!written.contains("api_key ="));

        let loaded = load_config_from(&path).unwrap();
        assert_eq!(loaded.profiles, cfg.profiles);
    }
}
