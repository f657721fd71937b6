//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde and the type system handle syntactic)
//! - Check that every format carries the `%p` placeholder
//! - Check referential integrity (declared parents exist and come first)
//! - Detect duplicate logger names
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure: config in, `Result<(), Vec<ValidationError>>` out
//! - Runs before a config is accepted into a logger or registry

use std::collections::HashSet;

use thiserror::Error;

use crate::config::schema::{LabelConfig, LabelOptions, LabelsConfig, PREFIX_PLACEHOLDER};

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("format `{0}` is missing the `%p` placeholder")]
    MissingPlaceholder(String),

    #[error("logger name must not be empty")]
    EmptyLoggerName,

    #[error("logger `{0}` is declared more than once")]
    DuplicateLogger(String),

    #[error("logger `{name}` references unknown parent `{parent}`")]
    UnknownParent { name: String, parent: String },
}

/// Validate the configuration of a single logger.
pub fn validate_label(config: &LabelConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_format(&config.format, &mut errors);
    finish(errors)
}

/// Validate overrides before they are merged into a child config.
pub fn validate_options(options: &LabelOptions) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    if let Some(format) = &options.format {
        check_format(format, &mut errors);
    }
    finish(errors)
}

/// Validate a whole configuration file.
pub fn validate_config(config: &LabelsConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();
    check_format(&config.root.format, &mut errors);

    let mut declared: HashSet<&str> = HashSet::new();
    for logger in &config.loggers {
        if logger.name.is_empty() {
            errors.push(ValidationError::EmptyLoggerName);
        } else if !declared.insert(logger.name.as_str()) {
            errors.push(ValidationError::DuplicateLogger(logger.name.clone()));
        }

        // Parents must be declared before their children.
        if let Some(parent) = &logger.parent {
            if !declared.contains(parent.as_str()) || parent == &logger.name {
                errors.push(ValidationError::UnknownParent {
                    name: logger.name.clone(),
                    parent: parent.clone(),
                });
            }
        }

        if let Some(format) = &logger.format {
            check_format(format, &mut errors);
        }
    }

    finish(errors)
}

fn check_format(format: &str, errors: &mut Vec<ValidationError>) {
    if !format.contains(PREFIX_PLACEHOLDER) {
        errors.push(ValidationError::MissingPlaceholder(format.to_string()));
    }
}

fn finish(errors: Vec<ValidationError>) -> Result<(), Vec<ValidationError>> {
    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
