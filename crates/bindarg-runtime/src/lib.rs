//! Bindarg Runtime - process-level glue for bindarg applications.
//!
//! This crate provides:
//! - Layered configuration (`RunnerConfig`, `ConfigLoader`)
//! - Logging setup on `tracing-subscriber` (`LoggingBuilder`)
//! - The `Runner`, which binds `std::env::args()` to a command table and
//!   maps the outcome to an exit code
//!
//! # Feature Flags
//!
//! - `toml-config` *(default)*: read `bindarg.toml`
//! - `json-log`: JSON log lines

pub mod config;
pub mod logging;
pub mod runner;

pub use config::{ConfigError, ConfigLoader, ConfigResult, RunnerConfig};
pub use logging::LoggingBuilder;
pub use runner::{Runner, exit_status};

// Re-export tracing for use by applications
pub use tracing;
