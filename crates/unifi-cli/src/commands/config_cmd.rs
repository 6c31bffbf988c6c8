//! Config subcommand handlers.

use dialoguer::{Confirm, Input, Select};
use unifi_config::{Config, Profile};
use unifi_core::ControllerPlatform;

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

const MASK: &str = "********";

/// Map a dialoguer / interactive I/O failure into CliError.
fn prompt_err(e: impl std::fmt::Display) -> CliError {
    CliError::Validation {
        field: "interactive".into(),
        reason: format!("prompt failed: {e}"),
    }
}

/// Copy of `cfg` safe to print: plaintext keys replaced by a mask.
fn masked(cfg: &Config) -> Config {
    let mut cfg = cfg.clone();
    for profile in cfg.profiles.values_mut() {
        if profile.api_key.is_some() {
            profile.api_key = Some(MASK.into());
        }
    }
    cfg
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ConfigCommand::Init => init(),

        ConfigCommand::Show => {
            let cfg = config::load()?;
            let opts = config::output_opts(global, &cfg);
            let shown = masked(&cfg);
            let text = toml::to_string_pretty(&shown)
                .map_err(|e| CliError::Internal(format!("failed to render config: {e}")))?;
            let out = output::render_single(opts.format, &shown, |_| text.clone())?;
            output::print_output(&out, opts.quiet);
            Ok(())
        }

        ConfigCommand::Path => {
            println!("{}", unifi_config::config_path().display());
            Ok(())
        }

        ConfigCommand::Profiles => {
            let cfg = config::load()?;
            if cfg.profiles.is_empty() {
                eprintln!("No profiles configured. Run: unifi config init");
                return Ok(());
            }
            let default = cfg.profile_name(None);
            for name in cfg.profiles.keys() {
                let marker = if name == default { " *" } else { "" };
                println!("{name}{marker}");
            }
            Ok(())
        }

        ConfigCommand::Use { name } => {
            let mut cfg = config::load()?;
            cfg.profile(&name)?;
            cfg.default_profile = Some(name.clone());
            unifi_config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Default profile set to '{name}'");
            }
            Ok(())
        }

        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load()?;
            let profile_name = config::active_profile_name(global, &cfg).to_owned();
            cfg.profiles
                .entry(profile_name.clone())
                .or_insert_with(|| Profile::new(""))
                .set(&key, &value)?;
            unifi_config::save_config(&cfg)?;
            if !global.quiet {
                eprintln!("✓ Set {key} on profile '{profile_name}'");
            }
            Ok(())
        }
    }
}

// ── Init: interactive wizard ────────────────────────────────────────

fn init() -> Result<(), CliError> {
    let mut cfg = config::load()?;
    let config_path = unifi_config::config_path();
    eprintln!("UniFi CLI configuration");
    eprintln!("   Config path: {}\n", config_path.display());

    let profile_name: String = Input::new()
        .with_prompt("Profile name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    if cfg.profiles.contains_key(&profile_name)
        && !Confirm::new()
            .with_prompt(format!("Profile '{profile_name}' exists. Overwrite?"))
            .default(false)
            .interact()
            .map_err(prompt_err)?
    {
        eprintln!("Aborted.");
        return Ok(());
    }

    let controller: String = Input::new()
        .with_prompt("Controller URL")
        .default("https://192.168.1.1".into())
        .validate_with(|input: &String| -> Result<(), String> {
            url::Url::parse(input).map(|_| ()).map_err(|e| e.to_string())
        })
        .interact_text()
        .map_err(prompt_err)?;

    let platforms = &[
        "UniFi OS (UDM, UCG, Cloud Key Gen2+)",
        "Standalone Network Application",
    ];
    let platform = match Select::new()
        .with_prompt("Controller type")
        .items(platforms)
        .default(0)
        .interact()
        .map_err(prompt_err)?
    {
        0 => ControllerPlatform::UnifiOs,
        _ => ControllerPlatform::ClassicController,
    };

    let key = rpassword::prompt_password("API key: ").map_err(prompt_err)?;
    if key.is_empty() {
        return Err(CliError::Validation {
            field: "api_key".into(),
            reason: "API key cannot be empty".into(),
        });
    }

    let store_choices = &[
        "Store in system keyring (recommended)",
        "Save to config file (plaintext)",
    ];
    let use_keyring = Select::new()
        .with_prompt("Where to store the API key?")
        .items(store_choices)
        .default(0)
        .interact()
        .map_err(prompt_err)?
        == 0;

    let site: String = Input::new()
        .with_prompt("Site name")
        .default("default".into())
        .interact_text()
        .map_err(prompt_err)?;

    let mut profile = Profile::new(controller);
    profile.site = site;
    profile.platform = platform;
    if use_keyring {
        unifi_config::store_api_key(&profile_name, &key)?;
        eprintln!("   ✓ API key stored in system keyring");
    } else {
        profile.api_key = Some(key);
    }

    cfg.profiles.insert(profile_name.clone(), profile);
    cfg.default_profile = Some(profile_name.clone());
    let path = unifi_config::save_config(&cfg)?;

    eprintln!("\n✓ Configuration written to {}", path.display());
    eprintln!("  Active profile: {profile_name}");
    eprintln!("\n  Test it: unifi clients list");
    Ok(())
}
