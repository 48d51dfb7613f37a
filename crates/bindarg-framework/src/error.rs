//! Error types for the bindarg framework.

use bindarg_core::{BoxError, ConversionError, SignatureError};
use thiserror::Error;

/// Errors raised while resolving a sub-command.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DispatchError {
    /// A command table was run without any tokens.
    #[error("no sub-command")]
    NoSubCommand,

    /// The first token names no entry in the table.
    #[error("unknown sub-command: {0}")]
    UnknownSubCommand(String),
}

/// The stage a [`RunError`] was raised in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Sub-command lookup.
    Dispatch,
    /// Analysis of the callable's signature.
    Signature,
    /// Conversion of tokens into arguments.
    Conversion,
    /// The callable itself.
    Invocation,
}

impl Stage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Dispatch => "dispatch",
            Self::Signature => "signature",
            Self::Conversion => "conversion",
            Self::Invocation => "invocation",
        }
    }
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Any failure of a run, tagged by stage.
///
/// Messages are passed through verbatim from the underlying error.
#[derive(Debug, Error)]
pub enum RunError {
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    #[error(transparent)]
    Signature(#[from] SignatureError),

    #[error(transparent)]
    Conversion(#[from] ConversionError),

    /// The error returned by the callable.
    #[error("{0}")]
    Invocation(#[source] BoxError),
}

impl RunError {
    /// Which stage failed.
    pub fn stage(&self) -> Stage {
        match self {
            Self::Dispatch(_) => Stage::Dispatch,
            Self::Signature(_) => Stage::Signature,
            Self::Conversion(_) => Stage::Conversion,
            Self::Invocation(_) => Stage::Invocation,
        }
    }

    /// Creates an invocation error from anything convertible to a boxed error.
    pub fn invocation(err: impl Into<BoxError>) -> Self {
        Self::Invocation(err.into())
    }
}

/// Result type for runs.
pub type RunResult<T> = Result<T, RunError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_pass_through() {
        let err = RunError::from(ConversionError::TooManyArguments);
        assert_eq!(err.to_string(), "too many arguments");
        assert_eq!(err.stage(), Stage::Conversion);

        let err = RunError::invocation("disk full");
        assert_eq!(err.to_string(), "disk full");
        assert_eq!(err.stage(), Stage::Invocation);
    }

    #[test]
    fn test_dispatch_messages() {
        assert_eq!(DispatchError::NoSubCommand.to_string(), "no sub-command");
        assert_eq!(
            DispatchError::UnknownSubCommand("rm".into()).to_string(),
            "unknown sub-command: rm"
        );
    }
}
