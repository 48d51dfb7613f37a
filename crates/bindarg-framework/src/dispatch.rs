//! The run entry point.

use bindarg_core::{Registry, Value};

use crate::command::{Command, Commands};
use crate::error::RunResult;

/// Anything tokens can be run against.
pub trait Dispatch {
    /// Runs `tokens` against `self` with converters from `registry`.
    fn dispatch(&self, registry: &Registry, tokens: &[String]) -> RunResult<Vec<Value>>;
}

/// A top-level input: a single command or a sub-command table.
#[derive(Debug)]
pub enum Target {
    Command(Command),
    Commands(Commands),
}

impl From<Command> for Target {
    fn from(command: Command) -> Self {
        Self::Command(command)
    }
}

impl From<Commands> for Target {
    fn from(commands: Commands) -> Self {
        Self::Commands(commands)
    }
}

impl Dispatch for Target {
    fn dispatch(&self, registry: &Registry, tokens: &[String]) -> RunResult<Vec<Value>> {
        match self {
            Self::Command(command) => command.dispatch(registry, tokens),
            Self::Commands(commands) => commands.dispatch(registry, tokens),
        }
    }
}

/// Runs `tokens` against `target` with the default registry.
///
/// ```rust,ignore
/// let results = run(&Command::new(|x: isize| x + 1), ["41"])?;
/// assert_eq!(results, vec![Value::Isize(42)]);
/// ```
pub fn run<T, I>(target: &T, tokens: I) -> RunResult<Vec<Value>>
where
    T: Dispatch + ?Sized,
    I: IntoIterator,
    I::Item: Into<String>,
{
    run_with(target, &Registry::default(), tokens)
}

/// Like [`run`], with an explicit registry.
pub fn run_with<T, I>(target: &T, registry: &Registry, tokens: I) -> RunResult<Vec<Value>>
where
    T: Dispatch + ?Sized,
    I: IntoIterator,
    I::Item: Into<String>,
{
    let tokens: Vec<String> = tokens.into_iter().map(Into::into).collect();
    target.dispatch(registry, &tokens)
}
