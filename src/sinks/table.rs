use crossterm::style::Color;

use crate::error::AppResult;
use crate::http::{EndpointResult, Outcome};

use super::format::{format_secs, paint, single_line, summary_line, truncate, write_line};
use super::{RenderOptions, TargetReport};

const HEADERS: [&str; 5] = ["METHOD", "URL", "STATUS", "DURATION", "RESULT"];
const MIN_URL_WIDTH: usize = 20;
const MAX_URL_WIDTH: usize = 60;
const MAX_RESULT_WIDTH: usize = 48;
const BODY_LABEL: &str = "Response: ";

struct Row {
    url: String,
    status: String,
    duration: String,
    result: String,
    success: bool,
    body: Option<String>,
}

impl Row {
    /// Any error shows `ERROR` as its status, even a body read failure that
    /// did receive a status line.
    fn from_result(result: &EndpointResult) -> Self {
        let label = match result.outcome() {
            Outcome::Success => "Success".to_owned(),
            Outcome::Failure => "Failed".to_owned(),
            Outcome::Error => result
                .error
                .as_ref()
                .map_or_else(|| "Error".to_owned(), |err| format!("Error: {}", err)),
        };
        Self {
            url: result.url.clone(),
            status: result
                .status
                .map_or_else(|| "ERROR".to_owned(), |status| status.to_string()),
            duration: format_secs(result.duration),
            result: truncate(&single_line(&label), MAX_RESULT_WIDTH),
            success: result.success,
            body: result
                .body
                .as_ref()
                .filter(|body| result.error.is_none() && !body.is_empty())
                .cloned(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Columns {
    method: usize,
    url: usize,
    status: usize,
    duration: usize,
    result: usize,
}

impl Columns {
    const fn header() -> Self {
        Self {
            method: 6,
            url: 3,
            status: 6,
            duration: 10,
            result: 6,
        }
    }

    fn fit(&mut self, row: &Row) {
        self.url = self.url.max(row.url.chars().count());
        self.status = self.status.max(row.status.chars().count());
        self.duration = self.duration.max(row.duration.chars().count());
        self.result = self.result.max(row.result.chars().count());
    }

    const fn widths(&self) -> [usize; 5] {
        [self.method, self.url, self.status, self.duration, self.result]
    }

    /// Border plus, per column, the cell, its two padding spaces and a
    /// separator.
    fn total_width(&self) -> usize {
        self.widths()
            .iter()
            .fold(1usize, |sum, width| sum.saturating_add(width.saturating_add(3)))
    }

    fn shrink_url(&mut self, terminal_width: usize) {
        if self.url <= MAX_URL_WIDTH && self.total_width() <= terminal_width {
            return;
        }
        let fixed = self.total_width().saturating_sub(self.url);
        let available = terminal_width
            .saturating_sub(fixed)
            .max(MIN_URL_WIDTH)
            .min(MAX_URL_WIDTH);
        self.url = available.min(self.url);
    }
}

/// Renders one target as a box-drawing table with a summary footer.
///
/// # Errors
///
/// Returns an error when formatting the output fails.
pub fn render_table(report: &TargetReport, options: &RenderOptions) -> AppResult<String> {
    let rows: Vec<Row> = report.results.iter().map(Row::from_result).collect();
    let mut columns = Columns::header();
    for row in &rows {
        columns.fit(row);
    }
    columns.shrink_url(options.terminal_width);
    let total_width = columns.total_width();
    let inner = total_width.saturating_sub(2);
    let no_color = options.no_color;

    let mut output = String::new();
    let title = truncate(&format!("[{}] from {}", report.name, report.source), inner);
    let title_len = title.chars().count();
    let left = inner.saturating_sub(title_len).checked_div(2).unwrap_or(0);
    let right = inner.saturating_sub(title_len).saturating_sub(left);
    write_line(&mut output, &format!("┌{}┐", "─".repeat(inner)))?;
    write_line(
        &mut output,
        &format!("│{}{}{}│", " ".repeat(left), title, " ".repeat(right)),
    )?;
    write_line(&mut output, &format!("├{}┤", "─".repeat(inner)))?;
    write_line(&mut output, &row_line(&HEADERS, &columns, None, no_color))?;
    write_line(&mut output, &divider(&columns, '├', '┼', '┤'))?;

    let body_width = total_width.saturating_sub(4);
    for row in &rows {
        let url = truncate(&row.url, columns.url);
        let cells = [
            "GET",
            url.as_str(),
            row.status.as_str(),
            row.duration.as_str(),
            row.result.as_str(),
        ];
        let color = if row.success { Color::Green } else { Color::Red };
        write_line(&mut output, &row_line(&cells, &columns, Some(color), no_color))?;

        if let Some(body) = row.body.as_ref().filter(|_| options.verbose) {
            let room = body_width.saturating_sub(BODY_LABEL.len());
            let body = truncate(&single_line(body), room);
            write_line(&mut output, &format!("│ {} │", " ".repeat(body_width)))?;
            write_line(
                &mut output,
                &format!("│ {}{:<room$} │", BODY_LABEL, body, room = room),
            )?;
        }
    }

    let summary = &report.summary;
    if summary.total > 0 {
        write_line(&mut output, &divider(&columns, '├', '┴', '┤'))?;
        let line = truncate(&summary_line(summary), body_width);
        let color = if summary.all_succeeded() {
            Color::Green
        } else {
            Color::Red
        };
        let padded = format!("{:<width$}", line, width = body_width);
        write_line(
            &mut output,
            &format!("│ {} │", paint(&padded, color, no_color)),
        )?;
    }
    write_line(&mut output, &format!("└{}┘", "─".repeat(inner)))?;
    Ok(output)
}

fn row_line(cells: &[&str; 5], columns: &Columns, color: Option<Color>, no_color: bool) -> String {
    let parts: Vec<String> = cells
        .iter()
        .zip(columns.widths())
        .map(|(cell, width)| {
            let padded = format!(" {:<width$} ", cell, width = width);
            match color {
                Some(color) => paint(&padded, color, no_color),
                None => padded,
            }
        })
        .collect();
    format!("│{}│", parts.join("│"))
}

fn divider(columns: &Columns, left: char, joint: char, right: char) -> String {
    let segments: Vec<String> = columns
        .widths()
        .iter()
        .map(|width| "─".repeat(width.saturating_add(2)))
        .collect();
    format!("{}{}{}", left, segments.join(&joint.to_string()), right)
}
