//! Layers CLI flags over the loaded configuration.
//!
//! Precedence for every setting: flag, then environment (via clap `env`),
//! then the active profile, then `[defaults]`.

use std::time::Duration;

use clap::ValueEnum;
use secrecy::SecretString;
use tracing::debug;

use unifi_config::{Config, Profile};
use unifi_core::{ControllerConfig, ControllerPlatform, TlsVerification};

use crate::cli::{ColorMode, GlobalOpts, OutputFormat};
use crate::error::CliError;
use crate::output::{self, OutputOpts};

/// Legacy spelling of `UNIFI_CONTROLLER`.
const HOST_ENV: &str = "UNIFI_HOST";

pub fn load() -> Result<Config, CliError> {
    Ok(unifi_config::load_config()?)
}

pub fn active_profile_name<'a>(global: &'a GlobalOpts, cfg: &'a Config) -> &'a str {
    cfg.profile_name(global.profile.as_deref())
}

/// Output settings: flags first, then `[defaults]` from the config file.
pub fn output_opts(global: &GlobalOpts, cfg: &Config) -> OutputOpts {
    let format = global.output.unwrap_or_else(|| {
        OutputFormat::from_str(&cfg.defaults.output, true).unwrap_or(OutputFormat::Table)
    });
    let color = global.color.unwrap_or_else(|| {
        ColorMode::from_str(&cfg.defaults.color, true).unwrap_or(ColorMode::Auto)
    });
    OutputOpts {
        format,
        color: output::should_color(color),
        quiet: global.quiet,
    }
}

fn controller_override(global: &GlobalOpts) -> Option<String> {
    global
        .controller
        .clone()
        .or_else(|| std::env::var(HOST_ENV).ok())
        .filter(|c| !c.is_empty())
}

fn parse_url(raw: &str) -> Result<url::Url, CliError> {
    raw.parse().map_err(|_| CliError::Validation {
        field: "controller".into(),
        reason: format!("invalid URL: {raw}"),
    })
}

/// Build the `ControllerConfig` for this invocation.
pub fn controller_config(global: &GlobalOpts, cfg: &Config) -> Result<ControllerConfig, CliError> {
    let profile_name = active_profile_name(global, cfg);

    // an explicitly requested profile must exist
    if global.profile.is_some() || cfg.profiles.contains_key(profile_name) {
        let profile = cfg.profile(profile_name)?;
        return from_profile(profile, profile_name, global, cfg);
    }
    from_flags(global, cfg, profile_name)
}

fn from_profile(
    profile: &Profile,
    profile_name: &str,
    global: &GlobalOpts,
    cfg: &Config,
) -> Result<ControllerConfig, CliError> {
    let url_str = controller_override(global).unwrap_or_else(|| profile.controller.clone());
    if url_str.is_empty() {
        return Err(CliError::Validation {
            field: "controller".into(),
            reason: format!("profile '{profile_name}' has no controller URL"),
        });
    }
    let url = parse_url(&url_str)?;

    let api_key = match global.api_key {
        Some(ref key) => SecretString::from(key.clone()),
        None => unifi_config::resolve_api_key(profile, profile_name)?,
    };

    let tls = if global.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        profile.tls(&cfg.defaults)
    };

    let timeout = global
        .timeout
        .or(profile.timeout)
        .unwrap_or(cfg.defaults.timeout);

    let site = global.site.clone().unwrap_or_else(|| profile.site.clone());

    debug!(profile = profile_name, %url, %site, "resolved profile");
    Ok(ControllerConfig {
        url,
        api_key,
        site,
        platform: profile.platform,
        tls,
        timeout: Duration::from_secs(timeout),
    })
}

/// No profile on disk: everything must come from flags / environment.
fn from_flags(
    global: &GlobalOpts,
    cfg: &Config,
    profile_name: &str,
) -> Result<ControllerConfig, CliError> {
    let url_str = controller_override(global).ok_or_else(|| CliError::NoConfig {
        path: unifi_config::config_path().display().to_string(),
    })?;
    let url = parse_url(&url_str)?;

    let api_key = global
        .api_key
        .clone()
        .filter(|k| !k.is_empty())
        .map(SecretString::from)
        .ok_or_else(|| CliError::NoCredentials {
            profile: profile_name.into(),
        })?;

    let tls = if global.insecure || cfg.defaults.insecure {
        TlsVerification::DangerAcceptInvalid
    } else {
        TlsVerification::SystemDefaults
    };

    Ok(ControllerConfig {
        url,
        api_key,
        site: global.site.clone().unwrap_or_else(|| "default".into()),
        platform: ControllerPlatform::default(),
        tls,
        timeout: Duration::from_secs(global.timeout.unwrap_or(cfg.defaults.timeout)),
    })
}
