//! Core library for the `vitals` CLI.
//!
//! This crate provides the building blocks used by the binary: CLI argument
//! types, configuration loading, status acceptance policies, the bounded
//! endpoint dispatcher, result aggregation, live progress rendering, and
//! output sinks. The primary user-facing interface is the `vitals`
//! command-line application; library APIs may evolve as the CLI grows.
pub mod args;
pub mod config;
pub mod error;
pub mod http;
pub mod metrics;
pub mod policy;
pub mod sinks;
pub mod ui;
