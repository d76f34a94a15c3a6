use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::AppResult;
use crate::http::EndpointResult;

use super::TargetReport;

/// Machine-readable run report, keyed by `<config file>::<target key>`.
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonReport {
    pub targets: BTreeMap<String, JsonTarget>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonTarget {
    pub target: String,
    pub config_file: String,
    pub results: Vec<JsonResult>,
    pub summary: JsonSummary,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonResult {
    pub url: String,
    pub method: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    pub duration_seconds: f64,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct JsonSummary {
    pub total: usize,
    pub successful: usize,
    pub failed: usize,
    pub avg_duration_seconds: f64,
}

impl JsonResult {
    fn from_result(result: &EndpointResult, verbose: bool) -> Self {
        Self {
            url: result.url.clone(),
            method: "GET".to_owned(),
            status_code: result.status,
            duration_seconds: result.duration.as_secs_f64(),
            success: result.success,
            error: result.error.as_ref().map(ToString::to_string),
            response_body: result
                .body
                .as_ref()
                .filter(|body| verbose && result.error.is_none() && !body.is_empty())
                .cloned(),
        }
    }
}

impl JsonTarget {
    #[must_use]
    pub fn from_report(report: &TargetReport, verbose: bool) -> Self {
        Self {
            target: report.name.clone(),
            config_file: report.source.clone(),
            results: report
                .results
                .iter()
                .map(|result| JsonResult::from_result(result, verbose))
                .collect(),
            summary: JsonSummary {
                total: report.summary.total,
                successful: report.summary.successful,
                failed: report.summary.failed,
                avg_duration_seconds: report.summary.avg_duration_secs(),
            },
        }
    }
}

impl JsonReport {
    #[must_use]
    pub fn from_reports(reports: &[TargetReport], verbose: bool) -> Self {
        Self {
            targets: reports
                .iter()
                .map(|report| (report.report_key(), JsonTarget::from_report(report, verbose)))
                .collect(),
        }
    }
}

/// Pretty-printed JSON document for the whole run. Response bodies are
/// included only when `verbose` is set.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn render_json(reports: &[TargetReport], verbose: bool) -> AppResult<String> {
    Ok(serde_json::to_string_pretty(&JsonReport::from_reports(
        reports, verbose,
    ))?)
}
