//! Clap derive structures for the `unifi` CLI.
//!
//! Defines the command tree, global flags, and shared value enums. Also
//! compiled by `build.rs` for man pages, so it depends on clap only.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// unifi -- query a UniFi Network controller from the command line
#[derive(Debug, Parser)]
#[command(
    name = "unifi",
    version,
    about = "Query your UniFi network from the command line",
    long_about = "A command-line interface for UniFi Network controllers.\n\n\
        Lists connected clients and sites through the controller's API key \
        authenticated endpoints, with SQL-style WHERE filtering of clients.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Controller profile to use
    #[arg(long, short = 'p', env = "UNIFI_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Controller URL, e.g. https://192.168.1.1 (overrides profile; UNIFI_HOST also works)
    #[arg(
        long,
        short = 'c',
        visible_alias = "host",
        env = "UNIFI_CONTROLLER",
        global = true
    )]
    pub controller: Option<String>,

    /// Site name
    #[arg(long, short = 's', env = "UNIFI_SITE", global = true)]
    pub site: Option<String>,

    /// Controller API key
    #[arg(long, env = "UNIFI_API_KEY", global = true, hide_env_values = true)]
    pub api_key: Option<String>,

    /// Output format [default: table]
    #[arg(long, short = 'o', env = "UNIFI_OUTPUT", global = true)]
    pub output: Option<OutputFormat>,

    /// When to use color output [default: auto]
    #[arg(long, env = "UNIFI_COLOR", global = true)]
    pub color: Option<ColorMode>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Accept self-signed TLS certificates
    #[arg(long, short = 'k', env = "UNIFI_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds [default: 30]
    #[arg(long, env = "UNIFI_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// View connected clients
    #[command(alias = "cl")]
    Clients(ClientsArgs),

    /// View sites
    Sites(SitesArgs),

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CLIENTS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ClientsArgs {
    #[command(subcommand)]
    pub command: ClientsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ClientsCommand {
    /// List connected clients
    #[command(alias = "ls")]
    List(ClientListArgs),

    /// List the fields usable in --filter expressions
    Fields,
}

#[derive(Debug, Args)]
#[command(after_help = "Examples:\n  \
    unifi clients list --wireless --filter \"signal >= -65\"\n  \
    unifi clients list --filter \"essid = 'HomeWiFi' AND name LIKE 'i%'\"\n  \
    unifi clients list --filter \"signal BETWEEN -70 AND -50 OR is_wired = 1\"")]
pub struct ClientListArgs {
    /// Show only wired clients
    #[arg(long)]
    pub wired: bool,

    /// Show only wireless clients
    #[arg(long)]
    pub wireless: bool,

    /// Show only blocked clients
    #[arg(long)]
    pub blocked: bool,

    /// Show only clients associated with this access point MAC
    #[arg(long, value_name = "MAC")]
    pub ap: Option<String>,

    /// SQL-style WHERE clause, e.g. "signal >= -65 AND essid = 'HomeWiFi'"
    #[arg(long, short = 'f', value_name = "WHERE", visible_alias = "where")]
    pub filter: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SITES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SitesArgs {
    #[command(subcommand)]
    pub command: SitesCommand,
}

#[derive(Debug, Subcommand)]
pub enum SitesCommand {
    /// List sites visible to the API key
    #[command(alias = "ls")]
    List,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create initial config file with guided setup
    Init,

    /// Display the current configuration (secrets masked)
    Show,

    /// Print the config file location
    Path,

    /// List configured profiles
    Profiles,

    /// Set the default profile
    Use {
        /// Profile name to set as default
        name: String,
    },

    /// Set a value on the active profile
    Set {
        /// Profile key: controller, site, api_key, api_key_env, platform, ca_cert, insecure, timeout
        key: String,

        /// Value to set
        value: String,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
