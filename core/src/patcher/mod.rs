#![deny(missing_docs)]

//! # Code Patching
//!
//! Utilities for injecting guard blocks into route handler source strings.
//! Everything here is line oriented: handlers are found by prefix, `try`
//! blocks by their trimmed opening, and text is inserted as whole lines.
//!
//! - **functions**: Inserting a guard into one handler.
//! - **workflows**: Whole-buffer recipes (first handler per pass, or all handlers).

pub(crate) mod common;

/// Function-level patching operations.
pub mod functions;

/// High-level patching workflows.
pub mod workflows;

pub use functions::add_guard_to_function;
pub use workflows::{patch_all_handlers, patch_first_handler, AllHandlersPatch, PassOutcome};
