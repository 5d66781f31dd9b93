#![deny(missing_docs)]

//! # Route Guard Core
//!
//! Core library for injecting database-availability guards into exported
//! route handlers. Detection is purely line based.

/// Shared error types.
pub mod error;

/// Guard block template and marker.
pub mod guard;

/// Exported handler detection.
pub mod handlers;

/// Code patching utilities.
pub mod patcher;

/// File-level driver.
pub mod runner;

/// Built-in target files.
pub mod targets;

pub use error::{AppError, AppResult};
pub use guard::{GuardBlock, PRISMA_GUARD_MARKER, PRISMA_GUARD_TEMPLATE};
pub use handlers::{HandlerDetector, HandlerMatch, HttpMethod};
pub use patcher::{
    add_guard_to_function, patch_all_handlers, patch_first_handler, AllHandlersPatch, PassOutcome,
};
pub use runner::{
    process_file, run, FileEvent, FileOutcome, FileReport, PassStrategy, Reporter, RunConfig,
    RunSummary, DEFAULT_MAX_PASSES,
};
pub use targets::{default_route_files, DEFAULT_ROUTE_FILES, ROUTE_FILE_NAMES};
