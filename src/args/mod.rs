//! CLI argument types and parsing helpers.
mod cli;
mod parsers;
mod types;


pub use cli::{DEFAULT_CONFIG_FILE, VitalsArgs};
pub use types::OutputMode;
