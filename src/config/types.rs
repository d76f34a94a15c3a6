use std::collections::BTreeMap;

use serde::Deserialize;

/// One configuration file: shared settings plus targets keyed by name.
#[derive(Debug, Default, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub targets: BTreeMap<String, TargetConfig>,
}

#[derive(Debug, Default, Deserialize)]
pub struct GlobalConfig {
    /// Request timeout in seconds; `0` or absent means unset.
    pub timeout: Option<u64>,
}

#[derive(Debug, Default, Clone, Deserialize)]
pub struct TargetConfig {
    pub name: Option<String>,
    #[serde(default)]
    pub base_urls: Vec<String>,
    #[serde(default)]
    pub endpoints: Vec<String>,
    #[serde(default)]
    pub headers: BTreeMap<String, String>,
    #[serde(default)]
    pub status_codes: Vec<u16>,
    #[serde(default)]
    pub status_ranges: Vec<String>,
}
