use std::collections::BTreeMap;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Url};
use tokio::time::Instant;
use tracing::debug;

use crate::error::ProbeError;

use super::types::{EndpointResult, Job, Target};

/// Executes one job and reports exactly one result. Implementations never
/// retry and never fail outright: every problem is recorded on the result.
#[async_trait]
pub trait Probe: Send + Sync {
    async fn probe(&self, job: &Job, target: &Target) -> EndpointResult;
}

/// Probe issuing a single GET through a shared `reqwest` client.
#[derive(Debug, Clone)]
pub struct HttpProbe {
    client: Client,
}

impl HttpProbe {
    #[must_use]
    pub const fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Probe for HttpProbe {
    async fn probe(&self, job: &Job, target: &Target) -> EndpointResult {
        let url = match Url::parse(&job.url) {
            Ok(url) => url,
            Err(err) => {
                return EndpointResult::failed(
                    job.url.clone(),
                    ProbeError::InvalidUrl {
                        url: job.url.clone(),
                        source: err,
                    },
                    Duration::ZERO,
                );
            }
        };
        let headers = match build_header_map(&target.headers) {
            Ok(headers) => headers,
            Err(err) => {
                return EndpointResult::failed(job.url.clone(), err, Duration::ZERO);
            }
        };

        debug!("Sending request to {}", job.url);
        let start = Instant::now();
        let response = match self.client.get(url).headers(headers).send().await {
            Ok(response) => response,
            Err(err) => {
                let duration = start.elapsed();
                debug!(
                    url = %job.url,
                    timed_out = err.is_timeout(),
                    "Request failed: {}",
                    err
                );
                return EndpointResult::failed(
                    job.url.clone(),
                    ProbeError::Transport { source: err },
                    duration,
                );
            }
        };

        let status = response.status().as_u16();
        let duration = start.elapsed();
        match read_body(response).await {
            Ok(body) => {
                let success = target.policy.accepts(status);
                debug!(url = %job.url, status, success, "Response received");
                EndpointResult::completed(job.url.clone(), status, body, duration, success)
            }
            Err(err) => {
                let error = ProbeError::BodyRead {
                    status,
                    source: err,
                };
                debug!(
                    url = %job.url,
                    timed_out = error.is_timeout(),
                    "Failed to read response body: {}",
                    error
                );
                EndpointResult::failed(job.url.clone(), error, duration)
            }
        }
    }
}

fn build_header_map(headers: &BTreeMap<String, String>) -> Result<HeaderMap, ProbeError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (key, value) in headers {
        let invalid = || ProbeError::InvalidHeader { name: key.clone() };
        let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_err| invalid())?;
        let value = HeaderValue::from_str(value).map_err(|_err| invalid())?;
        map.append(name, value);
    }
    Ok(map)
}

async fn read_body(response: reqwest::Response) -> Result<String, reqwest::Error> {
    let mut stream = response.bytes_stream();
    let mut buffer: Vec<u8> = Vec::new();
    while let Some(chunk) = stream.next().await {
        buffer.extend_from_slice(&chunk?);
    }
    Ok(String::from_utf8_lossy(&buffer).into_owned())
}
