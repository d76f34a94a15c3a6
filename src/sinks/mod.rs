//! Presentation of finished target reports.
mod format;
mod html;
mod json;
mod table;


use crate::args::OutputMode;
use crate::error::AppResult;
use crate::http::EndpointResult;
use crate::metrics::{TargetSummary, summarize};

pub use format::{DEFAULT_TERMINAL_WIDTH, summary_line};
pub use html::render_html;
pub use json::{JsonReport, JsonResult, JsonSummary, JsonTarget, render_json};
pub use table::render_table;

/// Results of one target from one configuration file.
#[derive(Debug)]
pub struct TargetReport {
    pub source: String,
    pub key: String,
    pub name: String,
    pub results: Vec<EndpointResult>,
    pub summary: TargetSummary,
}

impl TargetReport {
    #[must_use]
    pub fn new(source: String, key: String, name: String, results: Vec<EndpointResult>) -> Self {
        let summary = summarize(&results);
        Self {
            source,
            key,
            name,
            results,
            summary,
        }
    }

    /// `<config file>::<target key>`, unique across a run.
    #[must_use]
    pub fn report_key(&self) -> String {
        format!("{}::{}", self.source, self.key)
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RenderOptions {
    pub verbose: bool,
    pub no_color: bool,
    pub terminal_width: usize,
}

/// Renders every report for `mode`. Live output was already written while
/// the checks ran, so it renders nothing here.
///
/// # Errors
///
/// Returns an error when formatting or JSON serialization fails.
pub fn render(
    mode: OutputMode,
    reports: &[TargetReport],
    options: &RenderOptions,
) -> AppResult<String> {
    match mode {
        OutputMode::Table => {
            let mut output = String::from("\n");
            for report in reports {
                output.push_str(&render_table(report, options)?);
                output.push('\n');
            }
            Ok(output)
        }
        OutputMode::Json => {
            let mut output = render_json(reports, options.verbose)?;
            output.push('\n');
            Ok(output)
        }
        OutputMode::Html => render_html(reports, options.verbose),
        OutputMode::Live => Ok(String::new()),
    }
}
