//! Output formatting: table, JSON, YAML, plain.
//!
//! Renders data in the format selected by `--output`. Table uses `tabled`,
//! structured formats use serde, plain emits one identifier per line.

use std::io::{self, IsTerminal, Write};

use owo_colors::OwoColorize;
use tabled::{Table, Tabled, settings::Style};

use crate::cli::{ColorMode, OutputFormat};
use crate::error::CliError;

/// Resolved presentation settings for one invocation.
#[derive(Debug, Clone, Copy)]
pub struct OutputOpts {
    pub format: OutputFormat,
    pub color: bool,
    pub quiet: bool,
}

// ── Color helpers ────────────────────────────────────────────────────

/// Determine whether color output should be enabled.
pub fn should_color(mode: ColorMode) -> bool {
    match mode {
        ColorMode::Always => true,
        ColorMode::Never => false,
        ColorMode::Auto => io::stdout().is_terminal() && std::env::var_os("NO_COLOR").is_none(),
    }
}

/// Green for strong, yellow for fair, red for weak signal.
pub fn paint_signal(text: &str, dbm: i64, color: bool) -> String {
    if !color || text.is_empty() {
        return text.to_owned();
    }
    match dbm {
        -60.. => text.green().to_string(),
        -70..=-61 => text.yellow().to_string(),
        _ => text.red().to_string(),
    }
}

// ── Render dispatchers ───────────────────────────────────────────────

/// Render a list of serde-serializable + tabled items in the chosen format.
///
/// - `table`: uses the `Tabled` derive to build a pretty table
/// - `json` / `json-compact`: serializes the original data via serde
/// - `yaml`: serializes via serde_yaml
/// - `plain`: calls `id_fn` on each item to emit one identifier per line
pub fn render_list<T, R>(
    format: OutputFormat,
    data: &[T],
    to_row: impl Fn(&T) -> R,
    id_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
    R: Tabled,
{
    match format {
        OutputFormat::Table => {
            let rows: Vec<R> = data.iter().map(to_row).collect();
            Ok(render_table(&rows))
        }
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
        OutputFormat::Plain => Ok(data.iter().map(id_fn).collect::<Vec<_>>().join("\n")),
    }
}

/// Render a single item. `detail_fn` provides the human (table/plain) view.
pub fn render_single<T>(
    format: OutputFormat,
    data: &T,
    detail_fn: impl Fn(&T) -> String,
) -> Result<String, CliError>
where
    T: serde::Serialize,
{
    match format {
        OutputFormat::Table | OutputFormat::Plain => Ok(detail_fn(data)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(data)?),
        OutputFormat::JsonCompact => Ok(serde_json::to_string(data)?),
        OutputFormat::Yaml => Ok(serde_yaml::to_string(data)?),
    }
}

/// Print the rendered output to stdout, respecting quiet mode.
pub fn print_output(output: &str, quiet: bool) {
    if quiet || output.is_empty() {
        return;
    }
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{}", output.trim_end_matches('\n'));
}

fn render_table<R: Tabled>(rows: &[R]) -> String {
    Table::new(rows).with(Style::rounded()).to_string()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde::Serialize;

    use super::*;

    #[derive(Serialize)]
    struct Item {
        id: &'static str,
        size: u32,
    }

    #[derive(Tabled)]
    struct ItemRow {
        #[tabled(rename = "ID")]
        id: String,
    }

    fn items() -> Vec<Item> {
        vec![Item { id: "a", size: 1 }, Item { id: "b", size: 2 }]
    }

    fn render(format: OutputFormat) -> String {
        render_list(
            format,
            &items(),
            |i| ItemRow { id: i.id.into() },
            |i| i.id.to_string(),
        )
        .unwrap()
    }

    #[test]
    fn plain_is_one_id_per_line() {
        assert_eq!(render(OutputFormat::Plain), "a\nb");
    }

    #[test]
    fn json_variants() {
        assert_eq!(
            render(OutputFormat::JsonCompact),
            r#"[{"id":"a","size":1},{"id":"b","size":2}]"#
        );
        assert!(render(OutputFormat::Json).contains("\n  {"));
    }

    #[test]
    fn table_has_header_and_rows() {
        let table = render(OutputFormat::Table);
        assert!(table.contains("ID"));
        assert!(table.contains('╭'));
        assert_eq!(table.lines().count(), 6);
    }

    #[test]
    fn signal_is_plain_without_color() {
        assert_eq!(paint_signal("-45 dBm", -45, false), "-45 dBm");
        assert!(paint_signal("-45 dBm", -45, true).contains("\u{1b}["));
        assert_eq!(paint_signal("", 0, true), "");
    }
}
