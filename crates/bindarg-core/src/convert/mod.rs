//! Converters and the registry that builds them.
//!
//! A [`Converter`] consumes one or more tokens from the front of a stream and
//! produces a single [`Value`], returning the untouched tail. Converters hold
//! no per-call state, so a [`CallDescriptor`](crate::CallDescriptor) builds
//! them once and reuses them for every token group it binds.
//!
//! | Variant | Tokens consumed |
//! |---------|-----------------|
//! | `Bool`, `String`, `Int`, `Uint`, `Float` | exactly one |
//! | `Optional` | `--`, or whatever the inner converter takes |
//! | `Group` | `-<name> <value>` pairs up to end of input or `--` |

mod group;
mod optional;
mod scalar;

pub use group::{FieldDescriptor, GroupConverter};

use crate::error::{ConversionResult, SignatureError, SignatureResult};
use crate::target::{FloatWidth, IntWidth, TargetType};
use crate::value::Value;

/// How option names inside a named-option group are matched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OptionMatching {
    /// Accept unambiguous case-insensitive prefixes of a field name.
    pub abbreviations: bool,
}

impl Default for OptionMatching {
    fn default() -> Self {
        Self {
            abbreviations: true,
        }
    }
}

/// A strategy producing one typed value from the front of a token stream.
#[derive(Debug, Clone)]
pub enum Converter {
    Bool,
    String,
    Int(IntWidth),
    Uint(IntWidth),
    Float(FloatWidth),
    Optional(Box<Converter>),
    Group(GroupConverter),
}

impl Converter {
    /// Converts a value from the front of `tokens`, returning it with the
    /// remaining tail.
    pub fn convert<'a>(&self, tokens: &'a [String]) -> ConversionResult<(Value, &'a [String])> {
        match self {
            Self::Bool => scalar::convert_bool(tokens),
            Self::String => scalar::convert_string(tokens),
            Self::Int(width) => scalar::convert_int(*width, tokens),
            Self::Uint(width) => scalar::convert_uint(*width, tokens),
            Self::Float(width) => scalar::convert_float(*width, tokens),
            Self::Optional(inner) => optional::convert(inner, tokens),
            Self::Group(group) => group.convert(tokens),
        }
    }
}

/// Resolves parameter types to converters.
///
/// The registry is configuration only; it caches nothing and can be shared
/// freely.
#[derive(Debug, Clone, Copy, Default)]
pub struct Registry {
    matching: OptionMatching,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets how group option names are matched.
    pub fn with_matching(mut self, matching: OptionMatching) -> Self {
        self.matching = matching;
        self
    }

    pub fn matching(&self) -> OptionMatching {
        self.matching
    }

    /// Finds a converter for `ty`.
    ///
    /// Optional and group types resolve recursively; a group fails as a
    /// whole if any of its fields is unsupported.
    pub fn find(&self, ty: &TargetType) -> SignatureResult<Converter> {
        match ty {
            TargetType::Bool => Ok(Converter::Bool),
            TargetType::String => Ok(Converter::String),
            TargetType::Int(width) => Ok(Converter::Int(*width)),
            TargetType::Uint(width) => Ok(Converter::Uint(*width)),
            TargetType::Float(width) => Ok(Converter::Float(*width)),
            TargetType::Optional(inner) => {
                let inner = self.find(inner)?;
                Ok(Converter::Optional(Box::new(inner)))
            }
            TargetType::Group(shape) => GroupConverter::new(shape, self).map(Converter::Group),
            TargetType::Variadic(_) | TargetType::Sequence(_) => {
                Err(SignatureError::unsupported(ty.to_string()))
            }
        }
    }
}
