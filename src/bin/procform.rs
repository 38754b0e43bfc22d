//! CLI binary for procform.
//!
//! A thin shim over the library crate: flags become a `ClientConfig`,
//! `--file`/`--text` fill an in-memory view, and the result display prints
//! to the terminal.

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::{ProgressBar, ProgressStyle};
use procform::ui::memory::{MemoryDownloadLink, MemoryFileInput, MemoryTextInput};
use procform::{
    save_download, ClientConfig, FileUpload, FormHandler, FormView, ProgressCallback,
    ResultDisplay, SubmitGuard, SubmitOutcome, SubmitProgressCallback, SubmitReport,
};
use std::io;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing_subscriber::EnvFilter;

// ── ANSI colour helpers (no extra deps) ──────────────────────────────────────

fn green(s: &str) -> String {
    format!("\x1b[32m{s}\x1b[0m")
}
fn red(s: &str) -> String {
    format!("\x1b[31m{s}\x1b[0m")
}
fn dim(s: &str) -> String {
    format!("\x1b[2m{s}\x1b[0m")
}
fn bold(s: &str) -> String {
    format!("\x1b[1m{s}\x1b[0m")
}

// ── Terminal view ────────────────────────────────────────────────────────────

/// Result display writing paragraphs to stdout and messages to stderr.
/// Silent when `--json` owns stdout.
struct TerminalDisplay {
    enabled: bool,
}

impl ResultDisplay for TerminalDisplay {
    fn show_paragraphs(&self, lines: &[String]) {
        if self.enabled {
            for line in lines {
                println!("{line}");
            }
        }
    }

    fn show_text(&self, text: &str) {
        if self.enabled {
            eprintln!("{} {}", red("✘"), text);
        }
    }

    fn clear(&self) {}
}

// ── Spinner progress callback ────────────────────────────────────────────────

/// Spinner shown while the request is in flight.
struct CliProgressCallback {
    bar: ProgressBar,
}

impl CliProgressCallback {
    fn new() -> Arc<Self> {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {prefix:.bold}  {msg}  {elapsed}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏", "⠿"]);
        bar.set_style(style);
        bar.set_prefix("Submitting");
        Arc::new(Self { bar })
    }
}

impl SubmitProgressCallback for CliProgressCallback {
    fn on_submit_start(&self, parts: &[&'static str]) {
        let msg = if parts.is_empty() {
            "no parts".to_string()
        } else {
            parts.join(" + ")
        };
        self.bar.set_message(msg);
        self.bar.enable_steady_tick(Duration::from_millis(80));
    }

    fn on_response(&self, _status: u16) {
        self.bar.finish_and_clear();
    }

    fn on_failed(&self, _message: String) {
        self.bar.finish_and_clear();
    }
}

const AFTER_HELP: &str = r#"EXAMPLES:
  # Submit a CSV file
  procform --file people.csv

  # Submit free text (one "Name, Address" per line)
  procform --text $'Ivan Ivanov, \'ul. Test 10, Sofia\'\nMaria Ivanova, \'Berlin\''

  # Save the grouped result
  procform --file people.csv -o grouped.txt

  # JSON report for scripting
  procform --file people.csv --json

EXIT STATUS:
  0  result rendered
  1  server rejected the submission or the request failed

ENVIRONMENT VARIABLES:
  PROCFORM_SERVER     Server base URL (default http://127.0.0.1:8000)
  PROCFORM_TIMEOUT    Request timeout in seconds (default: none)
  RUST_LOG            Overrides the log filter
"#;

/// Submit a CSV file or text to a /process-data endpoint and print the result.
#[derive(Parser, Debug)]
#[command(
    name = "procform",
    version,
    about = "Submit a CSV file or text to a /process-data endpoint and print the result",
    color = clap::ColorChoice::Auto,
    after_long_help = AFTER_HELP
)]
struct Cli {
    /// File sent as the `csv_file` part.
    #[arg(short, long, env = "PROCFORM_FILE")]
    file: Option<PathBuf>,

    /// Text sent as the `text_input` part.
    #[arg(short, long, env = "PROCFORM_TEXT", conflicts_with = "text_file")]
    text: Option<String>,

    /// Read the `text_input` part from this file.
    #[arg(long, env = "PROCFORM_TEXT_FILE")]
    text_file: Option<PathBuf>,

    /// Server base URL.
    #[arg(long, env = "PROCFORM_SERVER", default_value = procform::config::DEFAULT_SERVER_URL)]
    server: String,

    /// Endpoint path on the server.
    #[arg(long, env = "PROCFORM_ENDPOINT", default_value = procform::config::DEFAULT_ENDPOINT_PATH)]
    endpoint: String,

    /// Request timeout in seconds. Without it the request waits indefinitely.
    #[arg(long, env = "PROCFORM_TIMEOUT",
          value_parser = clap::value_parser!(u64).range(1..))]
    timeout: Option<u64>,

    /// Reject overlapping submissions instead of letting them race.
    #[arg(long, env = "PROCFORM_SINGLE_FLIGHT")]
    single_flight: bool,

    /// Save the downloadable result to this file.
    #[arg(short, long, env = "PROCFORM_OUTPUT")]
    output: Option<PathBuf>,

    /// Print the download link (`data:text/plain` URI) after the result.
    #[arg(long)]
    data_uri: bool,

    /// Output a JSON report instead of paragraphs.
    #[arg(long, env = "PROCFORM_JSON")]
    json: bool,

    /// Disable the spinner.
    #[arg(long, env = "PROCFORM_NO_PROGRESS")]
    no_progress: bool,

    /// Enable DEBUG-level tracing logs.
    #[arg(short, long, env = "PROCFORM_VERBOSE")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, env = "PROCFORM_QUIET")]
    quiet: bool,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    // ── Logging setup ────────────────────────────────────────────────────
    // The spinner covers the only slow step; keep INFO logs out of its way.
    let show_progress = !cli.quiet && !cli.no_progress && !cli.json;
    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet || show_progress {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
        )
        .with_writer(io::stderr)
        .init();

    // ── Build view ───────────────────────────────────────────────────────
    let file_input = Arc::new(MemoryFileInput::default());
    if let Some(ref path) = cli.file {
        let upload = FileUpload::from_path(path)
            .await
            .context("Failed to load --file")?;
        file_input.select(upload);
    }

    let text_input = Arc::new(MemoryTextInput::default());
    if let Some(ref text) = cli.text {
        text_input.set(text.clone());
    } else if let Some(ref path) = cli.text_file {
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read text from {:?}", path))?;
        text_input.set(text);
    }

    let download_link = Arc::new(MemoryDownloadLink::default());
    let view = FormView::new(
        file_input,
        text_input,
        Arc::new(TerminalDisplay {
            enabled: !cli.json && !cli.quiet,
        }),
        download_link.clone(),
    );

    // ── Build config ─────────────────────────────────────────────────────
    let progress: Option<ProgressCallback> = if show_progress {
        Some(CliProgressCallback::new() as Arc<dyn SubmitProgressCallback>)
    } else {
        None
    };
    let config = build_config(&cli, progress)?;
    let handler = FormHandler::new(view, config).context("Failed to create HTTP client")?;

    // ── Submit ───────────────────────────────────────────────────────────
    let parts = handler.pending_parts();
    let start = Instant::now();
    let outcome = handler.submit().await;
    let duration_ms = start.elapsed().as_millis() as u64;

    if let (SubmitOutcome::Rendered(state), Some(path)) = (&outcome, &cli.output) {
        save_download(&state.processed_data, path)
            .await
            .context("Failed to save result")?;
        if !cli.quiet && !cli.json {
            eprintln!("{} saved to {}", green("✔"), bold(&path.display().to_string()));
        }
    }

    if cli.json {
        let report = SubmitReport::new(&outcome, &parts, duration_ms);
        println!(
            "{}",
            serde_json::to_string_pretty(&report).context("Failed to serialise report")?
        );
    } else {
        if cli.data_uri {
            if let Some(uri) = download_link.target() {
                println!("{uri}");
            }
        }
        if !cli.quiet {
            match &outcome {
                SubmitOutcome::Rendered(state) => eprintln!(
                    "{}",
                    dim(&format!("{} lines in {}ms", state.lines.len(), duration_ms))
                ),
                SubmitOutcome::Rejected { status } => {
                    eprintln!("{}", dim(&format!("server answered HTTP {status}")))
                }
                SubmitOutcome::Failed(e) => eprintln!("{}", dim(&e.to_string())),
                SubmitOutcome::Busy => {}
            }
        }
    }

    Ok(if outcome.is_rendered() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Map CLI args to `ClientConfig`.
fn build_config(cli: &Cli, progress: Option<ProgressCallback>) -> Result<ClientConfig> {
    let mut builder = ClientConfig::builder()
        .server_url(&cli.server)
        .endpoint_path(&cli.endpoint)
        .submit_guard(if cli.single_flight {
            SubmitGuard::SingleFlight
        } else {
            SubmitGuard::Race
        });

    if let Some(secs) = cli.timeout {
        builder = builder.request_timeout_secs(secs);
    }
    if let Some(cb) = progress {
        builder = builder.progress_callback(cb);
    }

    builder.build().context("Invalid configuration")
}
