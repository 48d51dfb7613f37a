//! Configuration module for bindarg runners.
//!
//! Settings are layered with figment: built-in defaults, an optional
//! `bindarg.toml`, then `BINDARG_*` environment variables.

pub mod error;
pub mod loader;
pub mod schema;

pub use error::{ConfigError, ConfigResult};
pub use loader::{ConfigLoader, load_config};
pub use schema::{LogFormat, LogLevel, LogOutput, LoggingConfig, OptionsConfig, RunnerConfig};
