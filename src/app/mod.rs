mod progress;
mod runner;


pub(crate) use runner::{LiveDisplay, RunSettings, run_checks};
