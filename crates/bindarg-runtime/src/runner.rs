//! Process entry point.
//!
//! A [`Runner`] owns a dispatch target and its configuration and turns one
//! process invocation into an exit code:
//!
//! - every result value is printed to stdout on its own line
//! - an error is printed to stderr as `error: <message>`
//!
//! | Outcome | Exit code |
//! |---------|-----------|
//! | success | 0 |
//! | the callable returned an error | 1 |
//! | bad tokens or unknown sub-command | 2 |
//! | unsupported signature or configuration error | 3 |

use std::ffi::OsString;
use std::io::Write;
use std::process::ExitCode;

use bindarg_core::{Registry, Value};
use bindarg_framework::{Dispatch, RunError, RunResult, Stage, run_with};
use tracing::{debug, error};

use crate::config::{ConfigLoader, ConfigResult, RunnerConfig};
use crate::logging;

/// Runs a dispatch target against process arguments.
///
/// ```rust,ignore
/// use bindarg::prelude::*;
///
/// fn main() -> ExitCode {
///     let app = Commands::new().command("add", |a: i64, b: i64| a + b);
///     Runner::new(app).run_env()
/// }
/// ```
#[derive(Debug)]
pub struct Runner<T> {
    target: T,
    config: Option<RunnerConfig>,
}

impl<T: Dispatch> Runner<T> {
    /// Creates a runner. [`run_env`](Self::run_env) loads configuration
    /// unless one is supplied with [`with_config`](Self::with_config).
    pub fn new(target: T) -> Self {
        Self {
            target,
            config: None,
        }
    }

    /// Uses `config` instead of loading one.
    pub fn with_config(mut self, config: RunnerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Loads configuration from the default locations.
    pub fn load_config(mut self) -> ConfigResult<Self> {
        self.config = Some(ConfigLoader::new().load()?);
        Ok(self)
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    /// The effective configuration, defaults if none was loaded.
    pub fn config(&self) -> RunnerConfig {
        self.config.clone().unwrap_or_default()
    }

    /// A registry configured from the `[options]` section.
    pub fn registry(&self) -> Registry {
        let matching = self
            .config
            .as_ref()
            .map(|config| config.options.matching())
            .unwrap_or_default();
        Registry::new().with_matching(matching)
    }

    /// Installs the global tracing subscriber.
    pub fn init_logging(&self) {
        match &self.config {
            Some(config) => logging::init_from_config(&config.logging),
            None => logging::init_from_config(&Default::default()),
        }
    }

    /// Runs `tokens` against the target.
    pub fn run<I>(&self, tokens: I) -> RunResult<Vec<Value>>
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        run_with(&self.target, &self.registry(), tokens)
    }

    /// Runs the process arguments (without the program name) and reports
    /// the outcome.
    pub fn run_env(self) -> ExitCode {
        let runner = if self.config.is_some() {
            self
        } else {
            match self.load_config() {
                Ok(runner) => runner,
                Err(err) => {
                    eprintln!("error: {err}");
                    return ExitCode::from(3);
                }
            }
        };
        runner.init_logging();

        let args = match unicode_args(std::env::args_os().skip(1)) {
            Ok(args) => args,
            Err(arg) => {
                error!(arg = ?arg, "argument is not valid unicode");
                eprintln!(
                    "error: argument is not valid unicode: {}",
                    arg.to_string_lossy()
                );
                return ExitCode::from(2);
            }
        };
        debug!(args = args.len(), "running process arguments");

        let mut stdout = std::io::stdout().lock();
        match runner.run(args) {
            Ok(values) => {
                for value in values {
                    if writeln!(stdout, "{value}").is_err() {
                        return ExitCode::FAILURE;
                    }
                }
                ExitCode::SUCCESS
            }
            Err(err) => {
                error!(stage = %err.stage(), "run failed");
                eprintln!("error: {err}");
                ExitCode::from(exit_status(&err))
            }
        }
    }
}

/// Converts process arguments to strings, returning the first one that is
/// not valid unicode.
fn unicode_args<I>(args: I) -> Result<Vec<String>, OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter().map(OsString::into_string).collect()
}

/// Process exit status for a failed run.
pub fn exit_status(err: &RunError) -> u8 {
    match err.stage() {
        Stage::Invocation => 1,
        Stage::Dispatch | Stage::Conversion => 2,
        Stage::Signature => 3,
    }
}
