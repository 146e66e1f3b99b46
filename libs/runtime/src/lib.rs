//! Process-level plumbing shared by the workspace binaries: layered
//! configuration, logging setup and home directory resolution.

pub mod config;
pub mod logging;
pub mod paths;

pub use config::{AppConfig, AppSection, CliArgs, DatabaseConfig, LoggingConfig, Section};
