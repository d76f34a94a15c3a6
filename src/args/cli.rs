use clap::Parser;
use tracing::warn;

use super::parsers::parse_header;
use super::types::OutputMode;

pub const DEFAULT_CONFIG_FILE: &str = "vitals.toml";

#[derive(Debug, Parser, Clone)]
#[clap(
    version,
    about = "Concurrent HTTP health checks for named groups of endpoints, with table, JSON, HTML, and live terminal output."
)]
pub struct VitalsArgs {
    /// Path to a configuration file (repeatable; .toml or .json)
    #[arg(long, short = 'c', default_value = DEFAULT_CONFIG_FILE)]
    pub config: Vec<String>,

    /// Request timeout in seconds (overrides global.timeout; 0 keeps the config value)
    #[arg(long, short = 't')]
    pub timeout: Option<u64>,

    /// Enable verbose logging and include response bodies (sets log level to debug unless overridden by VITALS_LOG/RUST_LOG)
    #[arg(long, short = 'v')]
    pub verbose: bool,

    /// Maximum number of requests in flight across all targets (0 means unlimited)
    #[arg(long, default_value_t = 0)]
    pub concurrency: usize,

    /// Print results as JSON instead of a table
    #[arg(long, short = 'j', conflicts_with = "html")]
    pub json: bool,

    /// Print results as a self-contained HTML report
    #[arg(long)]
    pub html: bool,

    /// Show per-request progress while checks run (terminal only)
    #[arg(long, short = 'l')]
    pub live: bool,

    /// Disable colored output
    #[arg(long = "no-color")]
    pub no_color: bool,

    /// Exit with a non-zero status when any check fails
    #[arg(long = "fail-on-error")]
    pub fail_on_error: bool,

    /// Extra HTTP header in 'Key: Value' format sent to every target (repeatable)
    #[arg(long = "header", short = 'H', value_parser = parse_header)]
    pub headers: Vec<(String, String)>,
}

impl VitalsArgs {
    /// Picks the presentation for this run. Live output needs a terminal on
    /// stdout and never mixes with JSON or HTML.
    #[must_use]
    pub fn output_mode(&self, stdout_is_terminal: bool) -> OutputMode {
        let mode = if self.json {
            OutputMode::Json
        } else if self.html {
            OutputMode::Html
        } else {
            OutputMode::Table
        };
        if !self.live {
            return mode;
        }
        if mode != OutputMode::Table {
            warn!("Ignoring --live together with --json/--html.");
            return mode;
        }
        if !stdout_is_terminal {
            warn!("Ignoring --live because stdout is not a terminal.");
            return mode;
        }
        if self.verbose {
            warn!("Holding log output until each live block is drawn.");
        }
        OutputMode::Live
    }
}
