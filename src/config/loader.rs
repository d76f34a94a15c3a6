use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{AppError, AppResult, ConfigError};

use super::types::ConfigFile;

/// A parsed configuration together with the path it was read from.
#[derive(Debug)]
pub struct ConfigSource {
    pub path: String,
    pub config: ConfigFile,
}

/// Loads every listed configuration file, keeping each one separate.
///
/// # Errors
///
/// Returns an error when the list is empty or any file cannot be read or
/// parsed. No partial result is returned.
pub fn load_config_sources(paths: &[String]) -> AppResult<Vec<ConfigSource>> {
    if paths.is_empty() {
        return Err(AppError::config(ConfigError::NoConfigFiles));
    }
    paths
        .iter()
        .map(|path| {
            let config = load_config_file(Path::new(path))?;
            debug!(
                path = %path,
                targets = config.targets.len(),
                "Loaded config"
            );
            Ok(ConfigSource {
                path: path.clone(),
                config,
            })
        })
        .collect()
}

/// Parses one file as TOML or JSON, chosen by extension.
///
/// # Errors
///
/// Returns an error when the file cannot be read, has an unsupported
/// extension, or fails to parse.
pub fn load_config_file(path: &Path) -> AppResult<ConfigFile> {
    let content = std::fs::read_to_string(path).map_err(|err| {
        AppError::config(ConfigError::ReadConfig {
            path: path.to_path_buf(),
            source: err,
        })
    })?;
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("toml") => toml::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseToml {
                path: PathBuf::from(path),
                source: err,
            })
        }),
        Some("json") => serde_json::from_str(&content).map_err(|err| {
            AppError::config(ConfigError::ParseJson {
                path: PathBuf::from(path),
                source: err,
            })
        }),
        Some(ext) => Err(AppError::config(ConfigError::UnsupportedExtension {
            ext: ext.to_owned(),
        })),
        None => Err(AppError::config(ConfigError::MissingExtension)),
    }
}
