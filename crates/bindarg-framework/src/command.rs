//! Bound commands and sub-command tables.
//!
//! A [`Command`] erases a [`Callable`] behind its [`Signature`] so that
//! callables of different arities can live side by side in a [`Commands`]
//! table. Tables nest: an entry is either a command or another table.

use std::collections::BTreeMap;
use std::fmt;

use bindarg_core::{
    CallDescriptor, ConversionResult, Registry, ReturnSlot, Returns, Signature, Value,
};
use tracing::debug;

use crate::callable::Callable;
use crate::dispatch::{Dispatch, Target};
use crate::error::{DispatchError, RunError, RunResult};

type InvokeFn = Box<dyn Fn(Vec<Value>) -> ConversionResult<Vec<ReturnSlot>>>;

// ============================================================================
// Command
// ============================================================================

/// A callable together with its statically derived signature.
pub struct Command {
    signature: Signature,
    invoke: InvokeFn,
}

impl Command {
    /// Wraps a typed callable.
    pub fn new<F, Args>(f: F) -> Self
    where
        F: Callable<Args>,
        Args: 'static,
    {
        Self {
            signature: F::signature(),
            invoke: Box::new(move |args| {
                Callable::<Args>::call(&f, args).map(Returns::into_slots)
            }),
        }
    }

    /// Wraps a callable whose shape is only known at runtime.
    ///
    /// `f` receives one value per parameter of `signature` and must produce
    /// slots matching `signature.returns()`.
    pub fn from_signature<F>(signature: Signature, f: F) -> Self
    where
        F: Fn(Vec<Value>) -> Vec<ReturnSlot> + 'static,
    {
        Self {
            signature,
            invoke: Box::new(move |args| Ok(f(args))),
        }
    }

    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Binds `tokens`, calls the command and splits off its error.
    pub fn run_with(&self, registry: &Registry, tokens: &[String]) -> RunResult<Vec<Value>> {
        let descriptor = CallDescriptor::new(&self.signature, registry)?;
        let args = descriptor.parse(tokens)?;
        let slots = (self.invoke)(args)?;

        descriptor.invoker().split(slots).map_err(|err| {
            debug!(error = %err, "command returned an error");
            RunError::Invocation(err)
        })
    }
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

impl Dispatch for Command {
    fn dispatch(&self, registry: &Registry, tokens: &[String]) -> RunResult<Vec<Value>> {
        self.run_with(registry, tokens)
    }
}

// ============================================================================
// Commands
// ============================================================================

/// A sub-command table keyed by the first token.
///
/// ```rust,ignore
/// let app = Commands::new()
///     .command("add", |a: i64, b: i64| a + b)
///     .nest("str", Commands::new().command("len", |s: String| s.len()));
///
/// run(&app, ["str", "len", "hello"])?; // [5]
/// ```
#[derive(Debug, Default)]
pub struct Commands {
    entries: BTreeMap<String, Target>,
}

impl Commands {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a typed callable under `name`.
    pub fn command<F, Args>(mut self, name: impl Into<String>, f: F) -> Self
    where
        F: Callable<Args>,
        Args: 'static,
    {
        self.insert(name, Command::new(f));
        self
    }

    /// Adds a nested table under `name`.
    pub fn nest(mut self, name: impl Into<String>, commands: Commands) -> Self {
        self.insert(name, commands);
        self
    }

    /// Inserts an entry, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, target: impl Into<Target>) -> Option<Target> {
        self.entries.insert(name.into(), target.into())
    }

    pub fn get(&self, name: &str) -> Option<&Target> {
        self.entries.get(name)
    }

    /// Entry names in sorted order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Dispatch for Commands {
    fn dispatch(&self, registry: &Registry, tokens: &[String]) -> RunResult<Vec<Value>> {
        let Some((name, rest)) = tokens.split_first() else {
            return Err(DispatchError::NoSubCommand.into());
        };
        let target = self
            .entries
            .get(name)
            .ok_or_else(|| DispatchError::UnknownSubCommand(name.clone()))?;

        debug!(command = %name, remaining = rest.len(), "selected sub-command");
        target.dispatch(registry, rest)
    }
}
