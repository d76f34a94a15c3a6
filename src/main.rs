mod app;
mod args;
mod config;
mod entry;
mod error;
mod http;
mod logger;
mod metrics;
mod policy;
mod sinks;
mod ui;

use error::AppResult;

fn main() -> AppResult<()> {
    entry::run()
}
