// cellpreview CLI - resolve cell values into embeddable preview URLs, headless

mod exit_codes;
mod table;

use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde::Serialize;

use cellpreview_config::{ConfigError, PreviewSettings, INVALID_SETTINGS_MESSAGE};
use cellpreview_core::CursorState;
use cellpreview_panel::{PanelStatus, PreviewPanel};
use cellpreview_resolver::{
    resolve, supported_services_summary, Service, REQUEST_SERVICE_URL, SHARE_LINK_HELP_URL,
};

use exit_codes::{EXIT_ERROR, EXIT_IO, EXIT_NO_PREVIEW, EXIT_PARSE, EXIT_SUCCESS, EXIT_USAGE};

#[derive(Parser)]
#[command(name = "cpv")]
#[command(about = "Resolve cell values into embeddable preview URLs")]
#[command(long_version = long_version())]
#[command(version)]
#[command(subcommand_required = false)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve values given as arguments (or one per stdin line)
    #[command(after_help = "\
Examples:
  cpv resolve https://youtu.be/KYz2wyBy3kc
  cpv resolve 'spotify.com/track/abc123' 'https://vimeo.com/12345' --json
  cut -d, -f3 links.csv | cpv resolve")]
    Resolve {
        /// Candidate values (omit to read stdin)
        inputs: Vec<String>,

        /// Emit JSON instead of one URL per line
        #[arg(long)]
        json: bool,
    },

    /// Preview every row of a CSV column, as the panel would show it
    #[command(after_help = "\
Examples:
  cpv scan links.csv --column Link
  cpv scan links.csv --column C --json
  cpv scan links.csv --settings preview.toml --strict")]
    Scan {
        /// CSV file; the first row holds field names
        file: PathBuf,

        /// Field to preview: header name or column letter
        #[arg(long, short = 'c')]
        column: Option<String>,

        /// Settings file (.json or .toml); defaults to the user config
        #[arg(long, env = "CELLPREVIEW_SETTINGS")]
        settings: Option<PathBuf>,

        /// CSV delimiter
        #[arg(long, default_value = ",")]
        delimiter: char,

        /// Emit JSON rows
        #[arg(long)]
        json: bool,

        /// Exit with code 3 if any row has no preview
        #[arg(long)]
        strict: bool,

        /// Suppress the stderr summary
        #[arg(long, short = 'q')]
        quiet: bool,
    },

    /// List supported services in resolution order
    Services {
        #[arg(long)]
        json: bool,
    },
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();

    let result = match cli.command {
        None => {
            // No subcommand = show help
            eprintln!("Usage: cpv <command> [options]");
            eprintln!("       cpv --help for more information");
            Ok(())
        }
        Some(Commands::Resolve { inputs, json }) => cmd_resolve(inputs, json),
        Some(Commands::Scan { file, column, settings, delimiter, json, strict, quiet }) => {
            cmd_scan(file, column, settings, delimiter, json, strict, quiet)
        }
        Some(Commands::Services { json }) => cmd_services(json),
    };

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(CliError { code, message, hint }) => {
            if !message.is_empty() {
                eprintln!("error: {}", message);
            }
            if let Some(hint) = hint {
                eprintln!("hint:  {}", hint);
            }
            ExitCode::from(code)
        }
    }
}

fn long_version() -> &'static str {
    if cfg!(debug_assertions) {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nresolver: cellpreview-resolver ", env!("CARGO_PKG_VERSION"),
            "\nbuild:    debug",
        )
    } else {
        concat!(
            env!("CARGO_PKG_VERSION"),
            "\nresolver: cellpreview-resolver ", env!("CARGO_PKG_VERSION"),
            "\nbuild:    release",
        )
    }
}

/// Log to stderr; `RUST_LOG` overrides the default `warn` level.
fn init_logging() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .try_init();
}

#[derive(Debug)]
pub struct CliError {
    pub code: u8,
    pub message: String,
    pub hint: Option<String>,
}

impl CliError {
    pub fn args(msg: impl Into<String>) -> Self {
        Self { code: EXIT_USAGE, message: msg.into(), hint: None }
    }

    pub fn io(msg: impl Into<String>) -> Self {
        Self { code: EXIT_IO, message: msg.into(), hint: None }
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        Self { code: EXIT_PARSE, message: msg.into(), hint: None }
    }

    pub fn general(msg: impl Into<String>) -> Self {
        Self { code: EXIT_ERROR, message: msg.into(), hint: None }
    }

    /// Some inputs had no preview.
    pub fn no_preview(missing: usize, total: usize) -> Self {
        Self {
            code: EXIT_NO_PREVIEW,
            message: format!("{missing} of {total} input(s) have no preview"),
            hint: None,
        }
    }

    /// Add a hint to an existing error.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

fn write_json<T: Serialize>(out: &mut impl Write, value: &T) -> Result<(), CliError> {
    let json = serde_json::to_string_pretty(value).map_err(|e| CliError::general(e.to_string()))?;
    writeln!(out, "{}", json).map_err(|e| CliError::io(e.to_string()))
}

// ============================================================================
// resolve
// ============================================================================

#[derive(Serialize)]
struct ResolveRow<'a> {
    input: &'a str,
    service: Option<Service>,
    embed_url: Option<String>,
}

fn cmd_resolve(inputs: Vec<String>, json: bool) -> Result<(), CliError> {
    let inputs = if inputs.is_empty() {
        read_stdin_lines()?
    } else {
        inputs
    };

    let rows: Vec<ResolveRow> = inputs
        .iter()
        .map(|input| {
            let preview = resolve(input.as_str());
            ResolveRow {
                input: input.as_str(),
                service: preview.as_ref().map(|p| p.service),
                embed_url: preview.map(|p| p.embed_url),
            }
        })
        .collect();

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if json {
        write_json(&mut handle, &rows)?;
    } else {
        for row in &rows {
            let line = row.embed_url.as_deref().unwrap_or("no preview");
            writeln!(handle, "{}", line).map_err(|e| CliError::io(e.to_string()))?;
        }
    }

    let missing = rows.iter().filter(|r| r.embed_url.is_none()).count();
    if missing > 0 {
        return Err(CliError::no_preview(missing, rows.len()));
    }
    Ok(())
}

fn read_stdin_lines() -> Result<Vec<String>, CliError> {
    let stdin = io::stdin();
    let mut lines = Vec::new();
    for line in stdin.lock().lines() {
        let line = line.map_err(|e| CliError::io(format!("stdin: {e}")))?;
        let line = line.trim_end_matches('\r');
        if !line.trim().is_empty() {
            lines.push(line.to_string());
        }
    }
    if lines.is_empty() {
        return Err(CliError::args("no input")
            .with_hint("pass values as arguments or pipe one per line"));
    }
    Ok(lines)
}

// ============================================================================
// scan
// ============================================================================

#[derive(Serialize)]
struct ScanRow {
    row: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    result: PanelStatus,
}

fn cmd_scan(
    file: PathBuf,
    column: Option<String>,
    settings_path: Option<PathBuf>,
    delimiter: char,
    json: bool,
    strict: bool,
    quiet: bool,
) -> Result<(), CliError> {
    let settings = match &settings_path {
        Some(path) => PreviewSettings::from_path(path).map_err(|e| match e {
            ConfigError::Io { .. } => CliError::io(e.to_string()),
            _ => CliError::parse(e.to_string()),
        })?,
        None => PreviewSettings::load(),
    };

    let csv = table::load_csv(&file, delimiter)?;

    let field_id = if settings.enforced {
        let validation = settings.validate(&csv.base);
        let Some(field) = validation.field else {
            return Err(CliError::parse(INVALID_SETTINGS_MESSAGE).with_hint(format!(
                "preview.tableId must be \"{}\" and preview.urlFieldId a header of {}",
                csv.table_id,
                file.display()
            )));
        };
        if column.is_some() {
            log::warn!("--column ignored: settings enforce the \"{}\" field", field.name);
        }
        field.id
    } else {
        let spec = column.ok_or_else(|| {
            CliError::args("--column is required").with_hint("name a header or a column letter, e.g. --column B")
        })?;
        csv.column(&spec)
            .map(|f| f.id.clone())
            .ok_or_else(|| CliError::args(format!("no column '{}' in {}", spec, file.display())))?
    };

    let mut panel = PreviewPanel::new();
    let mut rows = Vec::new();
    for (row, record_id) in csv.rows() {
        let cursor = CursorState::new(&csv.table_id, table::GRID_VIEW_ID).with_cell(&record_id, &field_id);
        panel.observe_cursor(&cursor);
        let status = panel.status(&cursor, &settings, &csv.base);
        rows.push(ScanRow { row, message: status.message(), result: status });
    }

    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if json {
        write_json(&mut handle, &rows)?;
    } else {
        for r in &rows {
            let text = match r.result.embed_url() {
                Some(url) => url.to_string(),
                None => r.message.clone().unwrap_or_default(),
            };
            writeln!(handle, "{}\t{}", r.row, text).map_err(|e| CliError::io(e.to_string()))?;
        }
    }

    let previews = rows.iter().filter(|r| r.result.embed_url().is_some()).count();
    if !quiet {
        eprintln!("{} of {} row(s) have a preview", previews, rows.len());
    }
    if strict && previews < rows.len() {
        return Err(CliError::no_preview(rows.len() - previews, rows.len()));
    }
    Ok(())
}

// ============================================================================
// services
// ============================================================================

#[derive(Serialize)]
struct ServiceRow {
    id: &'static str,
    label: &'static str,
    precedence: usize,
}

fn cmd_services(json: bool) -> Result<(), CliError> {
    let stdout = io::stdout();
    let mut handle = stdout.lock();

    if json {
        let rows: Vec<ServiceRow> = Service::ALL
            .iter()
            .enumerate()
            .map(|(i, s)| ServiceRow { id: s.id(), label: s.label(), precedence: i + 1 })
            .collect();
        return write_json(&mut handle, &rows);
    }

    for service in Service::ALL {
        writeln!(handle, "{}\t{}", service.id(), service.label()).map_err(|e| CliError::io(e.to_string()))?;
    }
    writeln!(handle).map_err(|e| CliError::io(e.to_string()))?;
    writeln!(handle, "Previews are supported for these services: {}", supported_services_summary())
        .map_err(|e| CliError::io(e.to_string()))?;
    writeln!(handle, "Creating Airtable share links: {}", SHARE_LINK_HELP_URL)
        .map_err(|e| CliError::io(e.to_string()))?;
    writeln!(handle, "Request a new service: {}", REQUEST_SERVICE_URL)
        .map_err(|e| CliError::io(e.to_string()))?;
    Ok(())
}
