//! Command-line interface and orchestration for goblin-report
//!
//! This module implements the CLI commands and wires the metric retrieval in
//! [`crate::facts`] to the renderers in [`crate::reports`]. It handles argument
//! parsing, configuration management, and the high-level workflow.
//!
//! # Implementation Model
//!
//! ## Commands
//!
//! - **report**: Gather artifacts from the command line and/or an artifacts file,
//!   fetch their metrics, and write the requested reports
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! ## Execution Flow
//!
//! The `run` function parses command-line arguments using clap and routes
//! to the appropriate command handler. A report run:
//!
//! 1. Initializes logging and loads configuration, applying command-line overrides
//! 2. Gathers the artifact list and project label
//! 3. Assembles one report row per artifact
//! 4. Emits the console, HTML, CSV and JSON reports that were asked for
//!
//! Configuration is a TOML file (`goblin.toml`) whose defaults are embedded
//! from `default_config.toml`.

mod common;
mod config;
mod host;
mod init;
mod input;
mod progress_reporter;
mod report;
mod run;
mod validate;

#[cfg(debug_assertions)]
pub use config::Config;

pub use host::Host;
pub use init::{InitArgs, init_config};
pub use progress_reporter::ProgressReporter;
pub use report::{ReportArgs, process_report};
pub use run::run;
pub use validate::{ValidateArgs, validate_config};
