//! Site command handlers.

use tabled::Tabled;
use unifi_core::Site;

use crate::cli::{GlobalOpts, SitesArgs, SitesCommand};
use crate::config;
use crate::error::CliError;
use crate::output;

#[derive(Tabled)]
struct SiteRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Role")]
    role: String,
}

impl From<&Site> for SiteRow {
    fn from(s: &Site) -> Self {
        Self {
            name: s.name.clone(),
            description: s.description.clone().unwrap_or_default(),
            role: s.role.clone().unwrap_or_default(),
        }
    }
}

pub async fn handle(args: SitesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        SitesCommand::List => {
            let cfg = config::load()?;
            let opts = config::output_opts(global, &cfg);
            let controller = super::connect(global, &cfg)?;

            let sites = controller.list_sites().await?;
            let out = output::render_list(opts.format, &sites, |s| SiteRow::from(s), |s| s.name.clone())?;
            output::print_output(&out, opts.quiet);
            Ok(())
        }
    }
}
