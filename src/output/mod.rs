//! Output capabilities.
//!
//! # Data Flow
//! ```text
//! LogLabel dispatch entry
//!     → Emitter (prefix + caller args)
//!     → OutputFn for that severity
//!         - console.rs (stdout / stderr)
//!         - sink.rs (tracing events)
//!         - any user-supplied closure
//! ```
//!
//! # Design Decisions
//! - One callable per severity, swappable at runtime
//! - The table is shared by every logger of a registry; loggers pick up a
//!   replaced entry on their next `set_level` / `refresh`
//! - Reads never block writers (`ArcSwap`)

pub mod console;
pub mod sink;

use std::fmt;
use std::sync::Arc;

use arc_swap::ArcSwap;

use crate::severity::Severity;

/// A severity output capability: receives the full argument list of one call.
pub type OutputFn = Arc<dyn Fn(&[&dyn fmt::Display]) + Send + Sync>;

/// Wrap a closure as an [`OutputFn`].
pub fn output_fn<F>(f: F) -> OutputFn
where
    F: Fn(&[&dyn fmt::Display]) + Send + Sync + 'static,
{
    Arc::new(f)
}

/// Join call arguments the way a console does: separated by single spaces.
pub fn join_args(args: &[&dyn fmt::Display]) -> String {
    let mut line = String::new();
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            line.push(' ');
        }
        line.push_str(&arg.to_string());
    }
    line
}

/// The five output capabilities, indexed by severity.
#[derive(Clone)]
pub struct ConsoleFunctions {
    fns: [OutputFn; 5],
}

impl ConsoleFunctions {
    /// Build from one callable per severity, in rank order.
    pub fn from_fns(
        trace: OutputFn,
        info: OutputFn,
        log: OutputFn,
        warn: OutputFn,
        error: OutputFn,
    ) -> Self {
        Self {
            fns: [trace, info, log, warn, error],
        }
    }

    /// Standard streams: trace/warn/error to stderr, info/log to stdout.
    pub fn console() -> Self {
        Self::from_fns(
            output_fn(console::trace),
            output_fn(console::stdout),
            output_fn(console::stdout),
            output_fn(console::stderr),
            output_fn(console::stderr),
        )
    }

    /// Route every severity to `tracing` events.
    pub fn tracing() -> Self {
        Self::from_fns(
            output_fn(sink::trace),
            output_fn(sink::info),
            output_fn(sink::info),
            output_fn(sink::warn),
            output_fn(sink::error),
        )
    }

    pub fn get(&self, severity: Severity) -> &OutputFn {
        &self.fns[severity.index()]
    }

    pub fn set(&mut self, severity: Severity, f: OutputFn) {
        self.fns[severity.index()] = f;
    }
}

impl Default for ConsoleFunctions {
    fn default() -> Self {
        Self::console()
    }
}

impl fmt::Debug for ConsoleFunctions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConsoleFunctions").finish_non_exhaustive()
    }
}

/// Shared, swappable [`ConsoleFunctions`].
#[derive(Debug)]
pub struct OutputTable {
    current: ArcSwap<ConsoleFunctions>,
}

impl OutputTable {
    pub fn new(functions: ConsoleFunctions) -> Self {
        Self {
            current: ArcSwap::from_pointee(functions),
        }
    }

    /// Snapshot of the current capabilities.
    pub fn load(&self) -> Arc<ConsoleFunctions> {
        self.current.load_full()
    }

    /// Replace the capability for one severity.
    ///
    /// Existing dispatch tables keep the old callable until rebuilt.
    pub fn replace(&self, severity: Severity, f: OutputFn) {
        self.current.rcu(|functions| {
            let mut next = ConsoleFunctions::clone(functions);
            next.set(severity, f.clone());
            next
        });
        tracing::debug!(%severity, "Output capability replaced");
    }

    /// Replace all five capabilities at once.
    pub fn install(&self, functions: ConsoleFunctions) {
        self.current.store(Arc::new(functions));
        tracing::debug!("Output capabilities installed");
    }
}

impl Default for OutputTable {
    fn default() -> Self {
        Self::new(ConsoleFunctions::default())
    }
}
