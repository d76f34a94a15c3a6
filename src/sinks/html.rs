use askama::Template;

use crate::error::AppResult;

use super::TargetReport;
use super::json::{JsonReport, JsonResult, JsonTarget};

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate {
    sections: Vec<SectionView>,
}

struct SectionView {
    key: String,
    name: String,
    source: String,
    summary_class: &'static str,
    summary: String,
    rows: Vec<RowView>,
}

struct RowView {
    kind: &'static str,
    method: String,
    url: String,
    status: String,
    duration: String,
    label: String,
    body: String,
}

impl SectionView {
    fn new(key: &str, target: &JsonTarget) -> Self {
        let summary = &target.summary;
        Self {
            key: key.to_owned(),
            name: target.target.clone(),
            source: target.config_file.clone(),
            summary_class: if summary.failed == 0 { "ok" } else { "bad" },
            summary: format!(
                "Total: {}, Success: {}, Failed: {}, Avg: {:.2}s",
                summary.total,
                summary.successful,
                summary.failed,
                summary.avg_duration_seconds
            ),
            rows: target.results.iter().map(RowView::new).collect(),
        }
    }
}

impl RowView {
    fn new(result: &JsonResult) -> Self {
        let label = match (&result.error, result.success) {
            (Some(error), _) => format!("Error: {}", error),
            (None, true) => "Success".to_owned(),
            (None, false) => "Failed".to_owned(),
        };
        Self {
            kind: if result.success { "success" } else { "failure" },
            method: result.method.clone(),
            url: result.url.clone(),
            status: result
                .status_code
                .map_or_else(|| "ERROR".to_owned(), |status| status.to_string()),
            duration: format!("{:.2}s", result.duration_seconds),
            label,
            body: result.response_body.clone().unwrap_or_default(),
        }
    }
}

/// Self-contained HTML report with one section per target. Every field is
/// escaped by the template.
///
/// # Errors
///
/// Returns an error when the template fails to render.
pub fn render_html(reports: &[TargetReport], verbose: bool) -> AppResult<String> {
    let document = JsonReport::from_reports(reports, verbose);
    let template = ReportTemplate {
        sections: document
            .targets
            .iter()
            .map(|(key, target)| SectionView::new(key, target))
            .collect(),
    };
    Ok(template.render()?)
}
