//! The [`Param`] trait: compile-time registration of parameter types.
//!
//! Every type that can appear as a callable parameter implements [`Param`],
//! which gives the registry a [`TargetType`] to work from and converts the
//! resulting [`Value`] back into the Rust type.
//!
//! Implementations are provided for:
//!
//! - `bool`, `String`
//! - `isize`, `i8`, `i16`, `i32`, `i64` and their unsigned counterparts
//! - `f32`, `f64`
//! - `Option<T>` (explicit absence via `--`)
//! - [`Rest<T>`] (variadic tail)
//! - `Vec<T>` (declared, but rejected by the registry)
//!
//! Named-option groups get their implementation from `#[derive(OptionGroup)]`.

use std::ops::{Deref, DerefMut};

use crate::error::{ConversionError, ConversionResult};
use crate::target::{FloatWidth, IntWidth, TargetType};
use crate::value::Value;

/// A type that can be bound from command-line tokens.
pub trait Param: Sized + 'static {
    /// The static shape the registry resolves a converter for.
    fn target_type() -> TargetType;

    /// Extracts `Self` from a converted value.
    fn from_value(value: Value) -> ConversionResult<Self>;

    /// Wraps `Self` as a value, used for return values.
    fn into_value(self) -> Value;
}

macro_rules! impl_scalar_param {
    ($($ty:ty => $variant:ident, $target:expr;)*) => {
        $(
            impl Param for $ty {
                fn target_type() -> TargetType {
                    $target
                }

                fn from_value(value: Value) -> ConversionResult<Self> {
                    match value {
                        Value::$variant(v) => Ok(v),
                        other => Err(ConversionError::mismatch(Self::target_type(), other.kind())),
                    }
                }

                fn into_value(self) -> Value {
                    Value::$variant(self)
                }
            }
        )*
    };
}

impl_scalar_param! {
    bool => Bool, TargetType::Bool;
    String => String, TargetType::String;
    isize => Isize, TargetType::Int(IntWidth::Default);
    i8 => I8, TargetType::Int(IntWidth::W8);
    i16 => I16, TargetType::Int(IntWidth::W16);
    i32 => I32, TargetType::Int(IntWidth::W32);
    i64 => I64, TargetType::Int(IntWidth::W64);
    usize => Usize, TargetType::Uint(IntWidth::Default);
    u8 => U8, TargetType::Uint(IntWidth::W8);
    u16 => U16, TargetType::Uint(IntWidth::W16);
    u32 => U32, TargetType::Uint(IntWidth::W32);
    u64 => U64, TargetType::Uint(IntWidth::W64);
    f32 => F32, TargetType::Float(FloatWidth::W32);
    f64 => F64, TargetType::Float(FloatWidth::W64);
}

impl<T: Param> Param for Option<T> {
    fn target_type() -> TargetType {
        TargetType::Optional(Box::new(T::target_type()))
    }

    fn from_value(value: Value) -> ConversionResult<Self> {
        match value {
            Value::Optional(None) => Ok(None),
            Value::Optional(Some(inner)) => T::from_value(*inner).map(Some),
            other => Err(ConversionError::mismatch(Self::target_type(), other.kind())),
        }
    }

    fn into_value(self) -> Value {
        Value::Optional(self.map(|v| Box::new(v.into_value())))
    }
}

/// Variadic tail of a callable.
///
/// When the last parameter of a callable is `Rest<T>`, tokens left over once
/// every other parameter is bound keep being converted as `T` and collected
/// here. At least one value must be supplied.
///
/// ```rust,ignore
/// fn sum(values: Rest<i64>) -> i64 {
///     values.iter().sum()
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Rest<T>(pub Vec<T>);

impl<T> Rest<T> {
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for Rest<T> {
    type Target = Vec<T>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Rest<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

fn list_from_value<T: Param>(value: Value, expected: TargetType) -> ConversionResult<Vec<T>> {
    match value {
        Value::List(items) => items.into_iter().map(T::from_value).collect(),
        other => Err(ConversionError::mismatch(expected, other.kind())),
    }
}

impl<T: Param> Param for Rest<T> {
    fn target_type() -> TargetType {
        TargetType::Variadic(Box::new(T::target_type()))
    }

    fn from_value(value: Value) -> ConversionResult<Self> {
        list_from_value(value, Self::target_type()).map(Rest)
    }

    fn into_value(self) -> Value {
        Value::List(self.0.into_iter().map(Param::into_value).collect())
    }
}

impl<T: Param> Param for Vec<T> {
    fn target_type() -> TargetType {
        TargetType::Sequence(Box::new(T::target_type()))
    }

    fn from_value(value: Value) -> ConversionResult<Self> {
        list_from_value(value, Self::target_type())
    }

    fn into_value(self) -> Value {
        Value::List(self.into_iter().map(Param::into_value).collect())
    }
}

impl Param for Value {
    /// A bare `Value` binds as a string token.
    fn target_type() -> TargetType {
        TargetType::String
    }

    fn from_value(value: Value) -> ConversionResult<Self> {
        Ok(value)
    }

    fn into_value(self) -> Value {
        self
    }
}

// =============================================================================
// Group field extraction
// =============================================================================

/// Reads the fields of a group value in declaration order.
///
/// Used by `#[derive(OptionGroup)]`-generated code; each call to
/// [`read`](Self::read) consumes the next field and checks its name.
pub struct FieldReader {
    group: String,
    fields: std::vec::IntoIter<(String, Value)>,
}

impl FieldReader {
    /// Opens a group value produced for the group named `group`.
    pub fn open(value: Value, group: &str) -> ConversionResult<Self> {
        match value {
            Value::Group(value) => Ok(Self {
                group: value.name().to_string(),
                fields: value.into_fields().into_iter(),
            }),
            other => Err(ConversionError::mismatch(group, other.kind())),
        }
    }

    /// Reads the next field, which must be named `name`.
    pub fn read<T: Param>(&mut self, name: &str) -> ConversionResult<T> {
        match self.fields.next() {
            Some((field, value)) if field == name => T::from_value(value),
            _ => Err(ConversionError::mismatch(
                format!("field '{name}' of {}", self.group),
                "group",
            )),
        }
    }
}
