//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Library lifecycle events (logger created, table rebuilt, output replaced)
//!     → tracing events under the `loglabels` target
//!     → logging.rs subscriber (CLI) or the host application's subscriber
//!
//! Labelled output routed through ConsoleFunctions::tracing()
//!     → the same subscriber
//! ```

pub mod logging;
