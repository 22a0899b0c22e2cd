//! Configuration validation.
//!
//! Validates configuration at startup to catch common errors early.

use super::Config;
use std::collections::HashSet;
use thiserror::Error;

/// Smallest line length that still fits a useful command.
const MIN_LINE_LENGTH: usize = 64;

/// Validation errors for configuration.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("server.name is required")]
    MissingServerName,
    #[error("server.name must not contain spaces, got '{0}'")]
    InvalidServerName(String),
    #[error("listen.max_line_length must be at least 64, got {0}")]
    LineLengthTooSmall(usize),
    #[error("oper block '{0}' is defined more than once")]
    DuplicateOper(String),
    #[error("oper block '{0}' has an empty password")]
    EmptyOperPassword(String),
}

/// Validate a configuration, returning all errors found.
pub fn validate(config: &Config) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let name = &config.server.name;
    if name.is_empty() {
        errors.push(ValidationError::MissingServerName);
    } else if name.contains(char::is_whitespace) {
        errors.push(ValidationError::InvalidServerName(name.clone()));
    }

    if config.listen.max_line_length < MIN_LINE_LENGTH {
        errors.push(ValidationError::LineLengthTooSmall(config.listen.max_line_length));
    }

    let mut seen = HashSet::new();
    for oper in &config.oper {
        if !seen.insert(oper.name.as_str()) {
            errors.push(ValidationError::DuplicateOper(oper.name.clone()));
        }
        if oper.password.is_empty() {
            errors.push(ValidationError::EmptyOperPassword(oper.name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
