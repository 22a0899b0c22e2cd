//! Configuration loading and management.
//!
//! This module is split into logical submodules:
//! - [`types`]: Core config struct definitions (Config, ServerConfig, ListenConfig, LogsConfig)
//! - [`oper`]: Operator credential blocks (OperBlock)
//! - [`validation`]: Startup sanity checks
//! - [`defaults`]: serde default functions

mod defaults;
mod oper;
mod types;
mod validation;

pub use oper::{OperBlock, authenticate};
pub use types::{Config, ConfigError, ListenConfig, LogsConfig, ServerConfig};
pub use validation::{ValidationError, validate};
