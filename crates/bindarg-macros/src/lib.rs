//! Procedural macros for the bindarg call binder.
//!
//! This crate provides:
//!
//! - `#[derive(OptionGroup)]` - Binds a struct from `-<field> <value>` pairs
//!
//! # OptionGroup Derive Macro
//!
//! A struct deriving `OptionGroup` can be used directly as a callable
//! parameter. Each named field becomes an option, and every field type must
//! itself be bindable:
//!
//! ```rust,ignore
//! use bindarg::OptionGroup;
//!
//! #[derive(Debug, Default, OptionGroup)]
//! pub struct Filter {
//!     pub name: String,
//!     pub limit: Option<u32>,
//!     #[option(rename = "case-sensitive")]
//!     pub case_sensitive: bool,
//! }
//!
//! fn search(filter: Filter, pattern: String) { /* ... */ }
//!
//! // search -name logs -lim 10 -- needle
//! ```

mod group;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Derives `Param`, `ReturnValues` and `Returns` for a named-field struct.
///
/// # Attributes
///
/// - `#[option(rename = "...")]` - Use a different option name for the field
/// - `#[option(skip)]` - Exclude the field; it is filled with `Default::default()`
///
/// Option names default to the field identifier as written.
#[proc_macro_derive(OptionGroup, attributes(option))]
pub fn derive_option_group(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match group::derive_option_group(&input) {
        Ok(tokens) => tokens.into(),
        Err(err) => err.to_compile_error().into(),
    }
}
