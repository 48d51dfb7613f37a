//! Error types for the conversion engine.
//!
//! Errors are split by the stage that raises them: [`SignatureError`] while a
//! callable's parameter list is analysed, [`ConversionError`] while tokens are
//! consumed. Neither is ever retried.

use thiserror::Error;

/// Boxed error produced by a callable itself.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

// =============================================================================
// Signature Errors
// =============================================================================

/// Errors raised while building a call descriptor, before any token is read.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    /// No converter exists for the parameter type.
    #[error("unsupported type: {type_name}")]
    UnsupportedType {
        /// Display name of the offending type.
        type_name: String,
    },

    /// A variadic tail was declared somewhere other than the last parameter.
    #[error("variadic parameter must be last (found at index {index})")]
    VariadicNotLast {
        /// Position of the misplaced variadic parameter.
        index: usize,
    },

    /// Two fields of a named-option group share the same option name.
    #[error("duplicate option '{field}' in group '{group}'")]
    DuplicateField {
        /// The group type name.
        group: String,
        /// The repeated option name.
        field: String,
    },
}

impl SignatureError {
    /// Creates an unsupported type error.
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self::UnsupportedType {
            type_name: type_name.into(),
        }
    }
}

/// Result type for signature analysis.
pub type SignatureResult<T> = Result<T, SignatureError>;

// =============================================================================
// Conversion Errors
// =============================================================================

/// Errors raised while consuming tokens.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversionError {
    #[error("invalid bool literal: {0}")]
    InvalidBool(String),

    #[error("invalid integer: {0}")]
    InvalidInteger(String),

    #[error("invalid float: {0}")]
    InvalidFloat(String),

    /// A token inside a group region was not an option marker, or the
    /// marker matched no field.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// An abbreviated option name matched more than one field.
    #[error("ambiguous option '{name}': matches '{first}' and '{second}'")]
    AmbiguousOption {
        /// The name as written, without the leading `-`.
        name: String,
        /// First matching field in declaration order.
        first: String,
        /// Second matching field in declaration order.
        second: String,
    },

    /// An option marker was the last token.
    #[error("missing value for option: {0}")]
    MissingValue(String),

    #[error("too many arguments")]
    TooManyArguments,

    #[error("too few arguments")]
    TooFewArguments,

    /// A converter was handed an empty stream.
    #[error("unexpected end of input")]
    EndOfInput,

    /// A converted value did not have the shape the parameter declared.
    #[error("expected {expected} value, found {found}")]
    Mismatch {
        /// The declared parameter type.
        expected: String,
        /// The kind of value that was supplied.
        found: &'static str,
    },
}

impl ConversionError {
    /// Creates a mismatch error for a value handed to the wrong parameter.
    pub fn mismatch(expected: impl std::fmt::Display, found: &'static str) -> Self {
        Self::Mismatch {
            expected: expected.to_string(),
            found,
        }
    }
}

/// Result type for token conversion.
pub type ConversionResult<T> = Result<T, ConversionError>;
