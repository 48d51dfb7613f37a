//! # Bindarg Framework
//!
//! High-level layer on top of `bindarg-core`.
//!
//! This layer provides:
//! - The `Callable` trait for Axum-style binding of plain functions
//! - `Command`, a type-erased callable with its signature
//! - `Commands`, nested sub-command tables selected by the first token
//! - The `run` entry point and the staged `RunError`
//!
//! The core engine only knows about signatures and values; everything that
//! touches concrete Rust functions lives here.

pub mod callable;
pub mod command;
pub mod dispatch;
pub mod error;

pub use callable::Callable;
pub use command::{Command, Commands};
pub use dispatch::{Dispatch, Target, run, run_with};
pub use error::{DispatchError, RunError, RunResult, Stage};
