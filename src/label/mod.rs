//! Label engine subsystem.
//!
//! # Data Flow
//! ```text
//! LabelConfig + level
//!     → template.rs (resolve `$level`, join, apply `%p`)
//!     → dispatch.rs (per-severity Noop / Raw / Labeled entry)
//!     → engine.rs (LogLabel swaps in the new table)
//!
//! logger.info(args)
//!     → current DispatchTable entry for Info
//!     → Emitter forwards prefix + args to the output capability
//! ```

pub mod dispatch;
pub mod engine;
pub mod template;

pub use dispatch::{Dispatch, DispatchTable, Emitter};
pub use engine::LogLabel;

/// Call a severity method of a logger with any `Display` arguments.
///
/// ```
/// use loglabels::{labeled, Registry};
///
/// let registry = Registry::new();
/// let db = registry.get("db").unwrap();
/// labeled!(db, warn, "pool exhausted:", 16, "connections");
/// ```
#[macro_export]
macro_rules! labeled {
    ($logger:expr, $method:ident $(, $arg:expr)* $(,)?) => {
        $logger.$method(&[$(&$arg as &dyn ::std::fmt::Display),*])
    };
}
