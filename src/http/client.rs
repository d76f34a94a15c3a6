use std::time::Duration;

use reqwest::Client;

use crate::error::{AppError, AppResult, HttpError};

pub const DEFAULT_USER_AGENT: &str = concat!("vitals/", env!("CARGO_PKG_VERSION"));

/// Builds the client shared by every probe of one configuration source.
///
/// The timeout covers the whole exchange, body included.
///
/// # Errors
///
/// Returns an error when the TLS backend cannot be initialised.
pub fn build_client(timeout: Duration) -> AppResult<Client> {
    Client::builder()
        .timeout(timeout)
        .user_agent(DEFAULT_USER_AGENT)
        .build()
        .map_err(|err| AppError::http(HttpError::BuildClientFailed { source: err }))
}
