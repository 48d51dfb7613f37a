//! # Bindarg
//!
//! Bind a flat list of command-line tokens to the typed parameters of plain
//! Rust functions, call them, and get their results back.
//!
//! ## Overview
//!
//! ```text
//! tokens ──▶ CallDescriptor::parse ──▶ bound values ──▶ callable ──▶ Invoker ──▶ results / error
//!                 │
//!                 └── one Converter per parameter, from the Registry
//! ```
//!
//! - **Scalars**: `bool`, `String`, signed and unsigned integers of every
//!   width, `f32`/`f64`. Integers honour `0x`/`0o`/`0b`/leading-`0` prefixes.
//! - **Optionals**: `Option<T>` takes `--` for `None`.
//! - **Option groups**: a struct deriving `OptionGroup` takes
//!   `-<field> <value>` pairs up to `--` or the end of input. Field names may
//!   be abbreviated to any unambiguous case-insensitive prefix.
//! - **Variadic tail**: a last parameter of type `Rest<T>` collects every
//!   remaining value.
//! - **Errors**: a callable returning `Result<T, E>` has its `Err` reported
//!   as an invocation error.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use bindarg::prelude::*;
//!
//! #[derive(Debug, Default, OptionGroup)]
//! struct Format {
//!     width: Option<usize>,
//!     upper: bool,
//! }
//!
//! fn show(format: Format, words: Rest<String>) -> String {
//!     let line = words.join(" ");
//!     let line = if format.upper { line.to_uppercase() } else { line };
//!     match format.width {
//!         Some(width) => format!("{line:>width$}"),
//!         None => line,
//!     }
//! }
//!
//! fn main() -> ExitCode {
//!     let app = Commands::new()
//!         .command("add", |a: i64, b: i64| a + b)
//!         .command("show", show);
//!     Runner::new(app).run_env()
//! }
//! ```
//!
//! ```text
//! $ app show -up true -- hello world
//! HELLO WORLD
//! ```
//!
//! ## Features
//!
//! - `derive` *(default)*: `#[derive(OptionGroup)]`; generated code refers to
//!   `bindarg_core`, which must then be a direct dependency
//! - `toml-config` *(default)*: read `bindarg.toml`
//! - `json-log`: JSON log lines

pub use bindarg_core as core;
pub use bindarg_framework as framework;
pub use bindarg_runtime as runtime;

pub use bindarg_core::{Rest, TERMINATOR, Value};
pub use bindarg_framework::{Command, Commands, RunError, RunResult, Target, run, run_with};
pub use bindarg_runtime::Runner;

#[cfg(feature = "derive")]
pub use bindarg_macros::OptionGroup;

/// Prelude module for convenient imports.
///
/// ```rust,ignore
/// use bindarg::prelude::*;
/// ```
pub mod prelude {
    // Entry points
    pub use bindarg_framework::{Commands, Command, Target, run, run_with};
    pub use bindarg_runtime::Runner;

    // Parameter and return types
    pub use bindarg_core::{Param, Rest, Returns, Value};

    // Errors
    pub use bindarg_framework::{RunError, RunResult, Stage};

    #[cfg(feature = "derive")]
    pub use bindarg_macros::OptionGroup;

    pub use std::process::ExitCode;
}
