//! Command line front-end for incident Google Meet rooms.
//!
//! This crate provides the `incident-meet` binary.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
pub mod secret;

pub use cli::Cli;
pub use error::{CliError, CliResult};
