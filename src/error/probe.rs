use thiserror::Error;

/// Failure of a single probe. Stored on the result instead of being
/// propagated, so one failing endpoint never aborts its siblings.
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("error creating request: invalid URL '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
    #[error("error creating request: invalid header '{name}'")]
    InvalidHeader { name: String },
    #[error("{source}")]
    Transport {
        #[source]
        source: reqwest::Error,
    },
    #[error("error reading response body (status {status}): {source}")]
    BodyRead {
        status: u16,
        #[source]
        source: reqwest::Error,
    },
    #[error("probe task aborted before reporting")]
    Aborted,
}

impl ProbeError {
    #[must_use]
    pub fn is_timeout(&self) -> bool {
        match self {
            ProbeError::Transport { source } | ProbeError::BodyRead { source, .. } => {
                source.is_timeout()
            }
            ProbeError::InvalidUrl { .. } | ProbeError::InvalidHeader { .. } | ProbeError::Aborted => {
                false
            }
        }
    }
}
