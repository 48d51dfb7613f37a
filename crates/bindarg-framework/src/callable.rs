//! Typed callables.
//!
//! This module defines the [`Callable`] trait. Like an Axum handler, it is
//! implemented via blanket implementations for functions of different
//! arities, so plain functions and closures can be bound without any macro:
//!
//! ```rust,ignore
//! use bindarg::prelude::*;
//!
//! // Positional parameters
//! fn add(a: i64, b: i64) -> i64 {
//!     a + b
//! }
//!
//! // Optional value, written `--` when absent
//! fn greet(name: Option<String>) -> String {
//!     format!("hello, {}", name.as_deref().unwrap_or("world"))
//! }
//!
//! // Variadic tail and a fallible result
//! fn mean(values: Rest<f64>) -> Result<f64, String> {
//!     if values.is_empty() {
//!         return Err("no values".into());
//!     }
//!     Ok(values.iter().sum::<f64>() / values.len() as f64)
//! }
//! ```

use bindarg_core::{
    ConversionError, ConversionResult, Param, Returns, Signature, Value,
};

/// A function whose parameters can be bound from tokens.
///
/// # Blanket Implementation
///
/// Implemented for any `Fn` that:
/// - Takes 0-12 parameters that implement [`Param`]
/// - Returns a type that implements [`Returns`]
///
/// `Args` is the tuple of parameter types and only exists to keep the
/// per-arity implementations apart.
pub trait Callable<Args>: 'static {
    /// The callable's return type.
    type Output: Returns;

    /// Parameter types and return shape, derived from the function type.
    fn signature() -> Signature;

    /// Calls the function with a bound argument list.
    ///
    /// `args` must hold one value per declared parameter, as produced by
    /// [`CallDescriptor::parse`](bindarg_core::CallDescriptor::parse).
    fn call(&self, args: Vec<Value>) -> ConversionResult<Self::Output>;
}

/// Macro to generate Callable implementations for functions with different arities.
macro_rules! impl_callable {
    (
        $($ty:ident),*
    ) => {
        #[allow(non_snake_case, unused_mut, unused_variables)]
        impl<F, R, $($ty,)*> Callable<($($ty,)*)> for F
        where
            F: Fn($($ty,)*) -> R + 'static,
            R: Returns,
            $( $ty: Param, )*
        {
            type Output = R;

            fn signature() -> Signature {
                Signature::new(
                    vec![$( <$ty as Param>::target_type(), )*],
                    R::shape(),
                )
            }

            fn call(&self, args: Vec<Value>) -> ConversionResult<R> {
                let mut args = args.into_iter();
                $(
                    let $ty = <$ty as Param>::from_value(
                        args.next().ok_or(ConversionError::TooFewArguments)?,
                    )?;
                )*
                if args.next().is_some() {
                    return Err(ConversionError::TooManyArguments);
                }
                Ok((self)($($ty,)*))
            }
        }
    };
}

// Generate implementations for 0-12 parameters
impl_callable!();
impl_callable!(T1);
impl_callable!(T1, T2);
impl_callable!(T1, T2, T3);
impl_callable!(T1, T2, T3, T4);
impl_callable!(T1, T2, T3, T4, T5);
impl_callable!(T1, T2, T3, T4, T5, T6);
impl_callable!(T1, T2, T3, T4, T5, T6, T7);
impl_callable!(T1, T2, T3, T4, T5, T6, T7, T8);
impl_callable!(T1, T2, T3, T4, T5, T6, T7, T8, T9);
impl_callable!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10);
impl_callable!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11);
impl_callable!(T1, T2, T3, T4, T5, T6, T7, T8, T9, T10, T11, T12);
