//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → validation.rs (semantic checks)
//!     → LabelsConfig (validated)
//!     → Registry::from_config builds root + named loggers
//!
//! Child creation via get():
//!     parent LabelConfig + LabelOptions
//!     → LabelConfig::derive_child
//!     → validation.rs
//!     → new LogLabel
//! ```
//!
//! # Design Decisions
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Explicit empty values are honoured, never silently replaced by defaults

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{LabelConfig, LabelOptions, LabelsConfig, NamedLogger};
pub use validation::ValidationError;
