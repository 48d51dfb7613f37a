//! # Bindarg Core
//!
//! The conversion and call-binding engine behind bindarg.
//!
//! This crate turns a flat list of string tokens into the typed arguments of
//! a callable:
//!
//! - [`TargetType`] describes a single parameter shape, produced statically
//!   through the [`Param`] trait
//! - [`Registry`] resolves a [`TargetType`] into a [`Converter`]
//! - [`CallDescriptor`] owns one converter per parameter and parses the token
//!   stream into a bound argument list
//! - [`Invoker`] splits a callable's trailing error slot from its results
//!
//! Higher-level pieces (typed callables, sub-command tables, the `run` entry
//! point) live in `bindarg-framework`.
//!
//! ```rust,ignore
//! use bindarg_core::{CallDescriptor, Param, Registry, ReturnShape, Signature};
//!
//! let signature = Signature::new(vec![<i32 as Param>::target_type()], ReturnShape::NONE);
//! let descriptor = CallDescriptor::new(&signature, &Registry::default())?;
//! let bound = descriptor.parse(&["0x10".to_string()])?;
//! assert_eq!(bound, vec![bindarg_core::Value::I32(16)]);
//! ```

pub mod convert;
pub mod descriptor;
pub mod error;
pub mod invoke;
pub mod param;
pub mod target;
pub mod value;

pub use convert::{Converter, FieldDescriptor, GroupConverter, OptionMatching, Registry};
pub use descriptor::{CallDescriptor, Signature};
pub use error::{
    BoxError, ConversionError, ConversionResult, SignatureError, SignatureResult,
};
pub use invoke::{Invoker, ReturnShape, ReturnSlot, ReturnValues, Returns};
pub use param::{FieldReader, Param, Rest};
pub use target::{FieldShape, FloatWidth, GroupShape, IntWidth, TargetType};
pub use value::{GroupValue, Value};

/// The reserved token meaning "absent" in an optional position and "end of
/// group" inside a named-option group.
pub const TERMINATOR: &str = "--";
