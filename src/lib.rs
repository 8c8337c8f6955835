//! `issue_tracker` - read-only analytics over an issue/employee snapshot
//!
//! This crate provides the `itr` CLI on top of [`tracker_lib`], which owns
//! the data model, CSV loading and the query engine.
//!
//! # Architecture
//!
//! The crate is organized into the following modules:
//!
//! - [`cli`] - Command-line interface using clap
//! - [`config`] - Layered configuration (defaults, YAML, env, flags)
//! - [`error`] - Error types and handling
//! - [`format`] - Output formatting (text, JSON)
//! - [`logging`] - tracing subscriber setup
//! - [`validation`] - Dataset checks behind `itr check`

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod validation;

pub use error::{AppError, Result};

/// Run the CLI application.
///
/// This is the main entry point called from `main()`.
///
/// # Errors
///
/// Returns an error if configuration, loading or the command fails.
pub fn run() -> anyhow::Result<()> {
    cli::run()
}
