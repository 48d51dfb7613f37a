//! Configuration loader using figment.
//!
//! # Configuration Priority (lowest to highest)
//!
//! 1. Built-in defaults
//! 2. Programmatic overrides passed to [`ConfigLoader::merge`]
//! 3. Config file (`bindarg.toml`), feature `toml-config`
//! 4. Environment variables (`BINDARG_*`)
//!
//! # Environment Variable Mapping
//!
//! Environment variables are mapped using the `BINDARG_` prefix with `__` as
//! separator:
//!
//! - `BINDARG_LOGGING__LEVEL=debug` → `logging.level = "debug"`
//! - `BINDARG_OPTIONS__ABBREVIATIONS=false` → `options.abbreviations = false`
//!
//! # Example
//!
//! ```rust,ignore
//! use bindarg_runtime::config::ConfigLoader;
//!
//! let config = ConfigLoader::new()
//!     .file("./calc.toml")
//!     .load()?;
//! ```

use std::path::{Path, PathBuf};

use figment::Figment;
#[cfg(feature = "toml-config")]
use figment::providers::{Format, Toml};
use figment::providers::{Env, Serialized};
use tracing::{debug, info, trace};

use super::error::{ConfigError, ConfigResult};
use super::schema::RunnerConfig;

/// File names searched for in each search path.
pub const CONFIG_FILE_NAMES: &[&str] = &["bindarg.toml"];

/// Prefix of recognised environment variables.
pub const ENV_PREFIX: &str = "BINDARG_";

/// Configuration loader with figment-based multi-source support.
pub struct ConfigLoader {
    figment: Figment,
    search_paths: Vec<PathBuf>,
    load_env: bool,
    config_file: Option<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        Self {
            figment: Figment::new(),
            search_paths: Vec::new(),
            load_env: true,
            config_file: None,
        }
    }

    /// Adds a search path for configuration files.
    ///
    /// Without any, the working directory and the user config directory
    /// (`<config>/bindarg`) are searched.
    pub fn search_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.search_paths.push(path.as_ref().to_path_buf());
        self
    }

    /// Sets a specific configuration file to load (skips the search).
    pub fn file<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_file = Some(path.as_ref().to_path_buf());
        self
    }

    /// Disables loading environment variables.
    pub fn without_env(mut self) -> Self {
        self.load_env = false;
        self
    }

    /// Merges additional configuration programmatically.
    pub fn merge(mut self, config: RunnerConfig) -> Self {
        self.figment = self.figment.merge(Serialized::defaults(config));
        self
    }

    /// Loads and returns the configuration.
    pub fn load(self) -> ConfigResult<RunnerConfig> {
        let figment = self.build_figment()?;
        let config: RunnerConfig = figment.extract()?;

        debug!(
            logging_level = %config.logging.level,
            abbreviations = config.options.abbreviations,
            "configuration loaded"
        );

        Ok(config)
    }

    fn build_figment(mut self) -> ConfigResult<Figment> {
        let mut figment = Figment::from(Serialized::defaults(RunnerConfig::default()));
        figment = figment.merge(std::mem::take(&mut self.figment));

        if let Some(path) = &self.config_file {
            if !path.exists() {
                return Err(ConfigError::FileNotFound(path.clone()));
            }
            info!(path = %path.display(), "loading configuration file");
            figment = Self::merge_config_file(figment, path)?;
        } else if let Some(path) = self.find_config_file() {
            info!(path = %path.display(), "loading configuration file");
            figment = Self::merge_config_file(figment, &path)?;
        } else {
            debug!("no configuration file found, using defaults");
        }

        if self.load_env {
            trace!(prefix = ENV_PREFIX, "loading environment variables");
            figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));
        }

        Ok(figment)
    }

    /// Merges a single config file, dispatching on its extension.
    fn merge_config_file(figment: Figment, path: &Path) -> ConfigResult<Figment> {
        let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        match ext {
            #[cfg(feature = "toml-config")]
            "toml" => Ok(figment.merge(Toml::file(path))),
            _ => Err(ConfigError::UnsupportedFormat(ext.to_string())),
        }
    }

    fn resolve_search_paths(&self) -> Vec<PathBuf> {
        if !self.search_paths.is_empty() {
            return self.search_paths.clone();
        }
        let mut paths = Vec::new();
        if let Ok(cwd) = std::env::current_dir() {
            paths.push(cwd);
        }
        if let Some(config_dir) = dirs::config_dir() {
            paths.push(config_dir.join("bindarg"));
        }
        paths
    }

    /// First existing config file across the search paths.
    fn find_config_file(&self) -> Option<PathBuf> {
        if cfg!(not(feature = "toml-config")) {
            return None;
        }
        self.resolve_search_paths()
            .into_iter()
            .flat_map(|dir| CONFIG_FILE_NAMES.iter().map(move |name| dir.join(name)))
            .find(|path| path.exists())
    }
}

/// Loads configuration from the default locations.
pub fn load_config() -> ConfigResult<RunnerConfig> {
    ConfigLoader::new().load()
}

// =============================================================================
// Tests
// =============================================================================
