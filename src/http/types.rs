use std::collections::BTreeMap;
use std::time::Duration;

use crate::error::ProbeError;
use crate::policy::AcceptancePolicy;

use super::url::resolve_url;

/// A named group of base URLs and endpoint paths checked under one policy.
#[derive(Debug, Clone)]
pub struct Target {
    pub name: String,
    pub base_urls: Vec<String>,
    pub endpoints: Vec<String>,
    pub headers: BTreeMap<String, String>,
    pub policy: AcceptancePolicy,
}

impl Target {
    /// Enumerates the target's jobs: base URLs outer, endpoints inner.
    ///
    /// The order is stable across calls, so `Job::index` can address a
    /// fixed output line.
    #[must_use]
    pub fn jobs(&self) -> Vec<Job> {
        self.base_urls
            .iter()
            .flat_map(|base_url| {
                self.endpoints
                    .iter()
                    .map(move |endpoint| (base_url, endpoint))
            })
            .enumerate()
            .map(|(index, (base_url, endpoint))| Job {
                index,
                url: resolve_url(base_url, endpoint),
            })
            .collect()
    }

    #[must_use]
    pub fn job_count(&self) -> usize {
        self.base_urls.len().saturating_mul(self.endpoints.len())
    }
}

/// One (base URL, endpoint) pair resolved to a single URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Job {
    pub index: usize,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    Failure,
    Error,
}

/// Outcome of one job. Holds either a status code or an error, never both.
#[derive(Debug)]
pub struct EndpointResult {
    pub url: String,
    pub status: Option<u16>,
    pub body: Option<String>,
    pub error: Option<ProbeError>,
    pub duration: Duration,
    pub success: bool,
}

impl EndpointResult {
    #[must_use]
    pub fn completed(
        url: String,
        status: u16,
        body: String,
        duration: Duration,
        success: bool,
    ) -> Self {
        Self {
            url,
            status: Some(status),
            body: Some(body),
            error: None,
            duration,
            success,
        }
    }

    #[must_use]
    pub const fn failed(url: String, error: ProbeError, duration: Duration) -> Self {
        Self {
            url,
            status: None,
            body: None,
            error: Some(error),
            duration,
            success: false,
        }
    }

    #[must_use]
    pub const fn outcome(&self) -> Outcome {
        if self.error.is_some() {
            Outcome::Error
        } else if self.success {
            Outcome::Success
        } else {
            Outcome::Failure
        }
    }

    /// Status code received from the server, including the one kept on a
    /// body read failure.
    #[must_use]
    pub fn observed_status(&self) -> Option<u16> {
        match &self.error {
            Some(ProbeError::BodyRead { status, .. }) => Some(*status),
            Some(_) | None => self.status,
        }
    }
}
