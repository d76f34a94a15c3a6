use std::fmt::Write as _;
use std::time::Duration;

use crossterm::style::{Color, Stylize, style};

use crate::error::AppResult;
use crate::metrics::TargetSummary;

pub const DEFAULT_TERMINAL_WIDTH: usize = 80;
const ELLIPSIS: &str = "...";

pub(super) fn write_line(output: &mut String, line: &str) -> AppResult<()> {
    writeln!(output, "{}", line)?;
    Ok(())
}

pub(super) fn format_secs(duration: Duration) -> String {
    format!("{:.2}s", duration.as_secs_f64())
}

/// `Total: N, Success: S, Failed: F, Avg: X.XXs`
#[must_use]
pub fn summary_line(summary: &TargetSummary) -> String {
    format!(
        "Total: {}, Success: {}, Failed: {}, Avg: {:.2}s",
        summary.total,
        summary.successful,
        summary.failed,
        summary.avg_duration_secs()
    )
}

/// Shortens `text` to at most `width` characters, marking the cut with `...`.
pub(super) fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_owned();
    }
    if width <= ELLIPSIS.len() {
        return text.chars().take(width).collect();
    }
    let mut cut: String = text
        .chars()
        .take(width.saturating_sub(ELLIPSIS.len()))
        .collect();
    cut.push_str(ELLIPSIS);
    cut
}

// Bodies are printed on a single table row.
pub(super) fn single_line(text: &str) -> String {
    text.chars()
        .map(|ch| if ch.is_control() { ' ' } else { ch })
        .collect()
}

pub(super) fn paint(text: &str, color: Color, no_color: bool) -> String {
    if no_color {
        return text.to_owned();
    }
    style(text).with(color).to_string()
}
