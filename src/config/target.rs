use std::collections::BTreeMap;
use std::time::Duration;

use crate::http::Target;
use crate::policy::AcceptancePolicy;

use super::types::{GlobalConfig, TargetConfig};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

/// CLI timeout first, then the file's, then [`DEFAULT_TIMEOUT`]. Zero
/// counts as unset on both sides.
#[must_use]
pub fn resolve_timeout(global: &GlobalConfig, cli_secs: Option<u64>) -> Duration {
    cli_secs
        .filter(|secs| *secs > 0)
        .or_else(|| global.timeout.filter(|secs| *secs > 0))
        .map_or(DEFAULT_TIMEOUT, Duration::from_secs)
}

impl TargetConfig {
    /// Builds the runtime target. Headers from the file override
    /// `extra_headers` with the same name.
    #[must_use]
    pub fn to_target(&self, key: &str, extra_headers: &[(String, String)]) -> Target {
        let mut headers: BTreeMap<String, String> = extra_headers.iter().cloned().collect();
        headers.extend(
            self.headers
                .iter()
                .map(|(name, value)| (name.clone(), value.clone())),
        );
        Target {
            name: self
                .name
                .clone()
                .filter(|name| !name.trim().is_empty())
                .unwrap_or_else(|| key.to_owned()),
            base_urls: self.base_urls.clone(),
            endpoints: self.endpoints.clone(),
            headers,
            policy: AcceptancePolicy::from_config(&self.status_codes, &self.status_ranges),
        }
    }
}
