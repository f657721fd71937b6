//! Dispatch table: one entry per severity.
//!
//! # Responsibilities
//! - Decide, per severity, between no-op, raw output and labelled output
//! - Hold the resolved prefix so calls only forward arguments
//!
//! # Design Decisions
//! - Table is immutable once built; a level change builds a new one
//! - The level the table was built for is stored with it, so the pair can
//!   never be observed out of sync

use std::fmt;

use crate::config::LabelConfig;
use crate::label::template::render_prefix;
use crate::output::{ConsoleFunctions, OutputFn};
use crate::severity::Severity;

/// An output capability with its prefix fixed as the first argument.
#[derive(Clone)]
pub struct Emitter {
    prefix: String,
    target: OutputFn,
}

impl Emitter {
    pub fn new(prefix: String, target: OutputFn) -> Self {
        Self { prefix, target }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Forward `prefix` followed by `args` to the target.
    pub fn call(&self, args: &[&dyn fmt::Display]) {
        let mut full: Vec<&dyn fmt::Display> = Vec::with_capacity(args.len() + 1);
        full.push(&self.prefix);
        full.extend_from_slice(args);
        (self.target)(&full);
    }
}

impl fmt::Debug for Emitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("prefix", &self.prefix)
            .finish_non_exhaustive()
    }
}

/// What a single severity method does when called.
#[derive(Clone)]
pub enum Dispatch {
    /// Below threshold.
    Noop,
    /// Undecorated output (no prefixes configured).
    Raw(OutputFn),
    Labeled(Emitter),
}

impl Dispatch {
    pub fn call(&self, args: &[&dyn fmt::Display]) {
        match self {
            Dispatch::Noop => {}
            Dispatch::Raw(target) => target(args),
            Dispatch::Labeled(emitter) => emitter.call(args),
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Dispatch::Noop)
    }

    /// Short form used when printing a table: `off`, `raw` or the prefix.
    pub fn describe(&self) -> &str {
        match self {
            Dispatch::Noop => "off",
            Dispatch::Raw(_) => "raw",
            Dispatch::Labeled(emitter) => emitter.prefix(),
        }
    }
}

impl fmt::Debug for Dispatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dispatch::Noop => f.write_str("Noop"),
            Dispatch::Raw(_) => f.write_str("Raw"),
            Dispatch::Labeled(emitter) => f.debug_tuple("Labeled").field(emitter).finish(),
        }
    }
}

/// The five dispatch entries of a logger, built for one level.
#[derive(Debug, Clone)]
pub struct DispatchTable {
    level: Severity,
    entries: [Dispatch; 5],
}

impl DispatchTable {
    /// Build every entry of the table for `level`.
    pub fn build(config: &LabelConfig, level: Severity, outputs: &ConsoleFunctions) -> Self {
        let entries = Severity::ALL.map(|severity| {
            let target = outputs.get(severity).clone();

            if config.prefixes.is_empty() {
                if config.bypass_filter_when_no_prefixes || severity >= level {
                    return Dispatch::Raw(target);
                }
                return Dispatch::Noop;
            }

            if severity < level {
                return Dispatch::Noop;
            }

            Dispatch::Labeled(Emitter::new(render_prefix(config, severity), target))
        });

        Self { level, entries }
    }

    pub fn level(&self) -> Severity {
        self.level
    }

    pub fn get(&self, severity: Severity) -> &Dispatch {
        &self.entries[severity.index()]
    }

    /// Resolved prefix of a labelled entry.
    pub fn prefix(&self, severity: Severity) -> Option<&str> {
        match self.get(severity) {
            Dispatch::Labeled(emitter) => Some(emitter.prefix()),
            _ => None,
        }
    }
}

impl fmt::Display for DispatchTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for severity in Severity::ALL {
            writeln!(f, "{:<5} {}", severity.name(), self.get(severity).describe())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::output::{join_args, output_fn};
    use std::sync::{Arc, Mutex};

    fn recording() -> (ConsoleFunctions, Arc<Mutex<Vec<String>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = seen.clone();
        let f = output_fn(move |args| sink.lock().unwrap().push(join_args(args)));
        let outputs = ConsoleFunctions::from_fns(f.clone(), f.clone(), f.clone(), f.clone(), f);
        (outputs, seen)
    }

    #[test]
    fn test_threshold() {
        let (outputs, _) = recording();
        let table = DispatchTable::build(&LabelConfig::default(), Severity::Log, &outputs);

        assert!(table.get(Severity::Trace).is_noop());
        assert!(table.get(Severity::Info).is_noop());
        assert_eq!(table.prefix(Severity::Log), Some("[LOG]"));
        assert_eq!(table.prefix(Severity::Warn), Some("[WARN]"));
        assert_eq!(table.prefix(Severity::Error), Some("[ERROR]"));
        assert_eq!(table.level(), Severity::Log);
    }

    #[test]
    fn test_emitter_prepends_prefix() {
        let (outputs, seen) = recording();
        let table = DispatchTable::build(&LabelConfig::default(), Severity::Trace, &outputs);

        table.get(Severity::Info).call(&[&"hi", &42]);
        table.get(Severity::Error).call(&[]);

        assert_eq!(*seen.lock().unwrap(), vec!["[INFO] hi 42", "[ERROR]"]);
    }

    #[test]
    fn test_empty_prefixes_bypass_filter() {
        let (outputs, seen) = recording();
        let config = LabelConfig {
            prefixes: Vec::new(),
            ..LabelConfig::default()
        };
        let table = DispatchTable::build(&config, Severity::Error, &outputs);

        for severity in Severity::ALL {
            assert!(matches!(table.get(severity), Dispatch::Raw(_)));
        }
        table.get(Severity::Trace).call(&[&"raw"]);
        assert_eq!(*seen.lock().unwrap(), vec!["raw"]);
    }

    #[test]
    fn test_empty_prefixes_with_filter() {
        let (outputs, _) = recording();
        let config = LabelConfig {
            prefixes: Vec::new(),
            bypass_filter_when_no_prefixes: false,
            ..LabelConfig::default()
        };
        let table = DispatchTable::build(&config, Severity::Warn, &outputs);

        assert!(table.get(Severity::Log).is_noop());
        assert!(matches!(table.get(Severity::Warn), Dispatch::Raw(_)));
        assert!(matches!(table.get(Severity::Error), Dispatch::Raw(_)));
    }
}
