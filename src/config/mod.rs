//! Configuration loading and conversion into checkable targets.
mod loader;
mod target;
pub mod types;


pub use loader::{ConfigSource, load_config_file, load_config_sources};
pub use target::{DEFAULT_TIMEOUT, resolve_timeout};
