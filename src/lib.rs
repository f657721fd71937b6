//! Labelled console loggers.
//!
//! Wraps five severity outputs (trace, info, log, warn, error) with
//! configurable prefixes and a severity threshold, and keeps a registry of
//! named, hierarchical loggers that inherit their parent's configuration.
//!
//! ```
//! use loglabels::{LabelOptions, Registry, Severity};
//!
//! let registry = Registry::new();
//! let root = registry.root();
//! root.set_level(Severity::Info);
//!
//! let pool = root.get("db").unwrap().get("pool").unwrap();
//! assert_eq!(pool.prefix_for(Severity::Warn).as_deref(), Some("[WARN][db][pool]"));
//!
//! let plain = root
//!     .get_with("audit", LabelOptions::new().inherit_prefixes(false).prefixes(["AUDIT"]))
//!     .unwrap();
//! assert_eq!(plain.prefix_for(Severity::Error).as_deref(), Some("[AUDIT]"));
//! ```

pub mod config;
pub mod error;
pub mod label;
pub mod observability;
pub mod output;
pub mod registry;
pub mod severity;

pub use config::{LabelConfig, LabelOptions, LabelsConfig};
pub use error::{LabelError, LabelResult};
pub use label::LogLabel;
pub use output::{ConsoleFunctions, OutputFn, OutputTable};
pub use registry::Registry;
pub use severity::Severity;
