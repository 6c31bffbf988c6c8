//! Client command handlers.

use serde::Serialize;
use strum::IntoEnumIterator;
use tabled::Tabled;
use tracing::debug;

use unifi_core::model::fmt_bytes;
use unifi_core::{ClientFlags, ClientRecord, Field};

use crate::cli::{ClientListArgs, ClientsArgs, ClientsCommand, GlobalOpts, OutputFormat};
use crate::config;
use crate::error::CliError;
use crate::output::{self, OutputOpts};

const NO_MATCHES: &str = "No clients match the specified filters";

// ── Table rows ──────────────────────────────────────────────────────

#[derive(Tabled)]
struct ClientRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "IP")]
    ip: String,
    #[tabled(rename = "Type")]
    kind: &'static str,
    #[tabled(rename = "SSID")]
    ssid: String,
    #[tabled(rename = "Signal")]
    signal: String,
    #[tabled(rename = "Uptime")]
    uptime: String,
    #[tabled(rename = "RX/TX")]
    traffic: String,
}

impl ClientRow {
    fn new(c: &ClientRecord, color: bool) -> Self {
        Self {
            name: format!("{} ({})", c.display_name(), c.mac),
            ip: c.ip.clone(),
            kind: c.connection_type(),
            ssid: c.ssid().to_owned(),
            signal: output::paint_signal(&c.signal_text(), c.signal, color),
            uptime: c.uptime_text(),
            traffic: format!("{} / {}", fmt_bytes(c.rx_bytes), fmt_bytes(c.tx_bytes)),
        }
    }
}

#[derive(Serialize)]
struct FieldInfo {
    name: &'static str,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Tabled)]
struct FieldRow {
    #[tabled(rename = "Field")]
    name: &'static str,
    #[tabled(rename = "Type")]
    kind: String,
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(args: ClientsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        ClientsCommand::List(list) => list_clients(list, global).await,
        ClientsCommand::Fields => {
            let cfg = config::load()?;
            let opts = config::output_opts(global, &cfg);
            let fields: Vec<FieldInfo> = Field::iter()
                .map(|f| FieldInfo {
                    name: f.as_str(),
                    kind: f.kind().to_string(),
                })
                .collect();
            let out = output::render_list(
                opts.format,
                &fields,
                |f| FieldRow {
                    name: f.name,
                    kind: f.kind.clone(),
                },
                |f| f.name.to_owned(),
            )?;
            output::print_output(&out, opts.quiet);
            Ok(())
        }
    }
}

async fn list_clients(args: ClientListArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let flags = ClientFlags {
        wired: args.wired,
        wireless: args.wireless,
        blocked: args.blocked,
        ap: args.ap,
        filter: args.filter,
    };

    // Bad flags or predicates fail before config or network is touched.
    let predicate = flags.predicate()?;
    if let Some(predicate) = &predicate {
        debug!(%predicate, "compiled client filter");
    }

    let cfg = config::load()?;
    let opts = config::output_opts(global, &cfg);
    let controller = super::connect(global, &cfg)?;

    let clients = controller.filtered_clients(predicate.as_ref()).await?;
    render_clients(&clients, opts)
}

fn render_clients(clients: &[ClientRecord], opts: OutputOpts) -> Result<(), CliError> {
    let structured = matches!(
        opts.format,
        OutputFormat::Json | OutputFormat::JsonCompact | OutputFormat::Yaml
    );
    if clients.is_empty() && !structured {
        output::print_output(NO_MATCHES, opts.quiet);
        return Ok(());
    }

    let out = output::render_list(
        opts.format,
        clients,
        |c| ClientRow::new(c, opts.color),
        |c| c.mac.clone(),
    )?;
    output::print_output(&out, opts.quiet);
    Ok(())
}
