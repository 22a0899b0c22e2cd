//! Core handler infrastructure.
//!
//! This module contains the fundamental types for the command handler
//! system: the per-command [`Context`], the [`Handler`] trait and the
//! [`Registry`] that dispatches to handlers.

pub mod context;
pub mod registry;

// Re-export commonly used types
pub use context::{Context, Handler};
pub use registry::Registry;
