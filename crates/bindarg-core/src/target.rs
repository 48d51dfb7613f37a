//! Static descriptions of parameter types.
//!
//! A [`TargetType`] is what the registry looks at when it picks a converter.
//! It is produced once per parameter from [`Param::target_type`](crate::Param)
//! and never changes afterwards.

use std::fmt;

use crate::value::{GroupValue, Value};

/// Bit width of an integer parameter.
///
/// `Default` is the platform-sized integer (`isize`/`usize`); its literals
/// are parsed within 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IntWidth {
    Default,
    W8,
    W16,
    W32,
    W64,
}

impl IntWidth {
    /// Number of bits a literal of this width is parsed within.
    pub fn bits(self) -> u32 {
        match self {
            Self::Default | Self::W32 => 32,
            Self::W8 => 8,
            Self::W16 => 16,
            Self::W64 => 64,
        }
    }
}

/// Bit width of a floating-point parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FloatWidth {
    W32,
    W64,
}

/// One declared field of a named-option group.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldShape {
    /// Option name, matched against `-<name>` markers.
    pub name: String,
    /// Declared type of the field.
    pub ty: TargetType,
}

impl FieldShape {
    pub fn new(name: impl Into<String>, ty: TargetType) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }
}

/// The declared shape of a struct-like parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupShape {
    /// Type name, used in messages and for display.
    pub name: String,
    /// Fields in declaration order.
    pub fields: Vec<FieldShape>,
}

impl GroupShape {
    pub fn new(name: impl Into<String>, fields: Vec<FieldShape>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }
}

/// Static type descriptor of a single callable parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetType {
    Bool,
    String,
    Int(IntWidth),
    Uint(IntWidth),
    Float(FloatWidth),
    /// A value that may be absent, written `--` on the command line.
    Optional(Box<TargetType>),
    /// A struct populated from `-<field> <value>` pairs.
    Group(GroupShape),
    /// Variadic tail; only valid as the last parameter of a callable.
    Variadic(Box<TargetType>),
    /// A homogeneous collection. Declared by `Vec<T>` but not convertible.
    Sequence(Box<TargetType>),
}

impl TargetType {
    /// The value a group field holds when no option sets it.
    pub fn zero_value(&self) -> Value {
        match self {
            Self::Bool => Value::Bool(false),
            Self::String => Value::String(String::new()),
            Self::Int(width) => match width {
                IntWidth::Default => Value::Isize(0),
                IntWidth::W8 => Value::I8(0),
                IntWidth::W16 => Value::I16(0),
                IntWidth::W32 => Value::I32(0),
                IntWidth::W64 => Value::I64(0),
            },
            Self::Uint(width) => match width {
                IntWidth::Default => Value::Usize(0),
                IntWidth::W8 => Value::U8(0),
                IntWidth::W16 => Value::U16(0),
                IntWidth::W32 => Value::U32(0),
                IntWidth::W64 => Value::U64(0),
            },
            Self::Float(FloatWidth::W32) => Value::F32(0.0),
            Self::Float(FloatWidth::W64) => Value::F64(0.0),
            Self::Optional(_) => Value::Optional(None),
            Self::Group(shape) => Value::Group(GroupValue::new(
                shape.name.clone(),
                shape
                    .fields
                    .iter()
                    .map(|field| (field.name.clone(), field.ty.zero_value()))
                    .collect(),
            )),
            Self::Variadic(_) | Self::Sequence(_) => Value::List(Vec::new()),
        }
    }
}

impl fmt::Display for TargetType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool => f.write_str("bool"),
            Self::String => f.write_str("string"),
            Self::Int(IntWidth::Default) => f.write_str("isize"),
            Self::Int(width) => write!(f, "i{}", width.bits()),
            Self::Uint(IntWidth::Default) => f.write_str("usize"),
            Self::Uint(width) => write!(f, "u{}", width.bits()),
            Self::Float(FloatWidth::W32) => f.write_str("f32"),
            Self::Float(FloatWidth::W64) => f.write_str("f64"),
            Self::Optional(inner) => write!(f, "optional {inner}"),
            Self::Group(shape) => f.write_str(&shape.name),
            Self::Variadic(inner) => write!(f, "rest of {inner}"),
            Self::Sequence(inner) => write!(f, "sequence of {inner}"),
        }
    }
}
