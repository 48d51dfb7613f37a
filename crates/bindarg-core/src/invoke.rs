//! Return values and the error-splitting invoker.
//!
//! A callable's return type is classified once, through [`Returns::shape`],
//! into a [`ReturnShape`]: how many ordinary values it yields and whether its
//! last slot is an error. [`Invoker::split`] applies that shape to the slots a
//! call actually produced.
//!
//! | Return type | Shape |
//! |-------------|-------|
//! | `()` | no values |
//! | any [`Param`] type, e.g. `i64`, `Option<String>` | one value |
//! | `(A, B)`, `(A, B, C)`, `(A, B, C, D)` | two to four values |
//! | `Result<T, E>` | `T`'s values plus a trailing error slot |

use crate::error::BoxError;
use crate::param::{Param, Rest};
use crate::value::Value;

/// Static classification of a callable's return values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReturnShape {
    values: usize,
    trailing_error: bool,
}

impl ReturnShape {
    /// No return values at all.
    pub const NONE: Self = Self {
        values: 0,
        trailing_error: false,
    };

    /// `values` ordinary return values.
    pub const fn values(values: usize) -> Self {
        Self {
            values,
            trailing_error: false,
        }
    }

    /// Adds a trailing error slot.
    pub const fn with_error(self) -> Self {
        Self {
            values: self.values,
            trailing_error: true,
        }
    }

    /// Number of ordinary values.
    pub fn value_count(&self) -> usize {
        self.values
    }

    pub fn has_error(&self) -> bool {
        self.trailing_error
    }
}

/// One produced return slot.
#[derive(Debug)]
pub enum ReturnSlot {
    Value(Value),
    /// The error slot; `None` means the call succeeded.
    Error(Option<BoxError>),
}

/// Types that yield ordinary return values only.
pub trait ReturnValues {
    /// Number of values produced.
    fn count() -> usize;

    fn into_values(self) -> Vec<Value>;
}

/// Types a callable may return.
pub trait Returns {
    fn shape() -> ReturnShape;

    fn into_slots(self) -> Vec<ReturnSlot>;
}

/// Implements [`ReturnValues`] and [`Returns`] for single-value types.
///
/// Group types receive the same pair of impls from `#[derive(OptionGroup)]`.
#[macro_export]
macro_rules! impl_single_return {
    ($($ty:ty),* $(,)?) => {
        $(
            impl $crate::ReturnValues for $ty {
                fn count() -> usize {
                    1
                }

                fn into_values(self) -> Vec<$crate::Value> {
                    vec![$crate::Param::into_value(self)]
                }
            }

            impl $crate::Returns for $ty {
                fn shape() -> $crate::ReturnShape {
                    $crate::ReturnShape::values(1)
                }

                fn into_slots(self) -> Vec<$crate::ReturnSlot> {
                    vec![$crate::ReturnSlot::Value($crate::Param::into_value(self))]
                }
            }
        )*
    };
}

impl_single_return!(
    bool, String, isize, i8, i16, i32, i64, usize, u8, u16, u32, u64, f32, f64, Value,
);

macro_rules! impl_generic_single_return {
    ($($wrapper:ident),*) => {
        $(
            impl<T: Param> ReturnValues for $wrapper<T> {
                fn count() -> usize {
                    1
                }

                fn into_values(self) -> Vec<Value> {
                    vec![self.into_value()]
                }
            }

            impl<T: Param> Returns for $wrapper<T> {
                fn shape() -> ReturnShape {
                    ReturnShape::values(1)
                }

                fn into_slots(self) -> Vec<ReturnSlot> {
                    vec![ReturnSlot::Value(self.into_value())]
                }
            }
        )*
    };
}

impl_generic_single_return!(Option, Vec, Rest);

impl ReturnValues for () {
    fn count() -> usize {
        0
    }

    fn into_values(self) -> Vec<Value> {
        Vec::new()
    }
}

impl Returns for () {
    fn shape() -> ReturnShape {
        ReturnShape::NONE
    }

    fn into_slots(self) -> Vec<ReturnSlot> {
        Vec::new()
    }
}

macro_rules! impl_tuple_return {
    ($count:literal; $($ty:ident),*) => {
        #[allow(non_snake_case)]
        impl<$($ty: Param,)*> ReturnValues for ($($ty,)*) {
            fn count() -> usize {
                $count
            }

            fn into_values(self) -> Vec<Value> {
                let ($($ty,)*) = self;
                vec![$($ty.into_value(),)*]
            }
        }

        impl<$($ty: Param,)*> Returns for ($($ty,)*) {
            fn shape() -> ReturnShape {
                ReturnShape::values($count)
            }

            fn into_slots(self) -> Vec<ReturnSlot> {
                self.into_values().into_iter().map(ReturnSlot::Value).collect()
            }
        }
    };
}

impl_tuple_return!(2; A, B);
impl_tuple_return!(3; A, B, C);
impl_tuple_return!(4; A, B, C, D);

impl<T, E> Returns for Result<T, E>
where
    T: ReturnValues,
    E: Into<BoxError>,
{
    fn shape() -> ReturnShape {
        ReturnShape::values(T::count()).with_error()
    }

    fn into_slots(self) -> Vec<ReturnSlot> {
        match self {
            Ok(values) => {
                let mut slots: Vec<ReturnSlot> =
                    values.into_values().into_iter().map(ReturnSlot::Value).collect();
                slots.push(ReturnSlot::Error(None));
                slots
            }
            Err(err) => vec![ReturnSlot::Error(Some(err.into()))],
        }
    }
}

/// Splits a trailing error slot from a call's results.
#[derive(Debug, Clone, Copy)]
pub struct Invoker {
    shape: ReturnShape,
}

impl Invoker {
    pub fn new(shape: ReturnShape) -> Self {
        Self { shape }
    }

    pub fn shape(&self) -> ReturnShape {
        self.shape
    }

    /// Returns the ordinary values, or the callable's own error.
    ///
    /// Only the last slot is inspected, and only when the shape declares an
    /// error there. A shape without an error slot never yields an error.
    pub fn split(&self, mut slots: Vec<ReturnSlot>) -> Result<Vec<Value>, BoxError> {
        if self.shape.has_error() {
            match slots.pop() {
                Some(ReturnSlot::Error(Some(err))) => return Err(err),
                Some(ReturnSlot::Value(value)) => slots.push(ReturnSlot::Value(value)),
                Some(ReturnSlot::Error(None)) | None => {}
            }
        }
        Ok(slots
            .into_iter()
            .filter_map(|slot| match slot {
                ReturnSlot::Value(value) => Some(value),
                ReturnSlot::Error(_) => None,
            })
            .collect())
    }
}
