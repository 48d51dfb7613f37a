//! Converted values.
//!
//! Converters produce [`Value`]s; the typed layer turns them back into Rust
//! types through [`Param::from_value`](crate::Param::from_value).

use std::fmt;

use crate::TERMINATOR;

/// A populated named-option group: field names paired with their values,
/// in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupValue {
    name: String,
    fields: Vec<(String, Value)>,
}

impl GroupValue {
    pub fn new(name: impl Into<String>, fields: Vec<(String, Value)>) -> Self {
        Self {
            name: name.into(),
            fields,
        }
    }

    /// The group's type name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Looks up a field by its option name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields
            .iter()
            .find(|(name, _)| name == field)
            .map(|(_, value)| value)
    }

    /// Overwrites the field at `index`. Out-of-range indices are ignored.
    pub fn set(&mut self, index: usize, value: Value) {
        if let Some(slot) = self.fields.get_mut(index) {
            slot.1 = value;
        }
    }

    pub fn fields(&self) -> &[(String, Value)] {
        &self.fields
    }

    pub fn into_fields(self) -> Vec<(String, Value)> {
        self.fields
    }
}

/// The dynamically typed result of converting one or more tokens.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Bool(bool),
    String(String),
    Isize(isize),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    Usize(usize),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    F32(f32),
    F64(f64),
    /// `None` is the explicit absence written as `--`.
    Optional(Option<Box<Value>>),
    Group(GroupValue),
    /// The folded overflow of a variadic parameter.
    List(Vec<Value>),
}

impl Value {
    /// Short name of the value's kind, used in mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::String(_) => "string",
            Self::Isize(_) => "isize",
            Self::I8(_) => "i8",
            Self::I16(_) => "i16",
            Self::I32(_) => "i32",
            Self::I64(_) => "i64",
            Self::Usize(_) => "usize",
            Self::U8(_) => "u8",
            Self::U16(_) => "u16",
            Self::U32(_) => "u32",
            Self::U64(_) => "u64",
            Self::F32(_) => "f32",
            Self::F64(_) => "f64",
            Self::Optional(_) => "optional",
            Self::Group(_) => "group",
            Self::List(_) => "list",
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Optional(None))
    }
}

/// Renders the canonical token text: scalars as they would be written on
/// the command line, groups as `-field value` pairs.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bool(v) => write!(f, "{v}"),
            Self::String(v) => f.write_str(v),
            Self::Isize(v) => write!(f, "{v}"),
            Self::I8(v) => write!(f, "{v}"),
            Self::I16(v) => write!(f, "{v}"),
            Self::I32(v) => write!(f, "{v}"),
            Self::I64(v) => write!(f, "{v}"),
            Self::Usize(v) => write!(f, "{v}"),
            Self::U8(v) => write!(f, "{v}"),
            Self::U16(v) => write!(f, "{v}"),
            Self::U32(v) => write!(f, "{v}"),
            Self::U64(v) => write!(f, "{v}"),
            Self::F32(v) => write!(f, "{v}"),
            Self::F64(v) => write!(f, "{v}"),
            Self::Optional(None) => f.write_str(TERMINATOR),
            Self::Optional(Some(inner)) => write!(f, "{inner}"),
            Self::Group(group) => {
                for (i, (name, value)) in group.fields().iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "-{name} {value}")?;
                }
                Ok(())
            }
            Self::List(items) => {
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(" ")?;
                    }
                    write!(f, "{item}")?;
                }
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_scalars() {
        assert_eq!(Value::I64(-42).to_string(), "-42");
        assert_eq!(Value::F64(1.5).to_string(), "1.5");
        assert_eq!(Value::Bool(true).to_string(), "true");
        assert_eq!(Value::Optional(None).to_string(), "--");
    }

    #[test]
    fn test_display_group() {
        let group = GroupValue::new(
            "Opts",
            vec![
                ("name".into(), Value::String("x".into())),
                ("number".into(), Value::Isize(5)),
            ],
        );
        assert_eq!(Value::Group(group).to_string(), "-name x -number 5");
    }

    #[test]
    fn test_group_set_ignores_out_of_range() {
        let mut group = GroupValue::new("Opts", vec![("a".into(), Value::Bool(false))]);
        group.set(3, Value::Bool(true));
        group.set(0, Value::Bool(true));
        assert_eq!(group.get("a"), Some(&Value::Bool(true)));
    }
}
