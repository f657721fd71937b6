//! Shared utilities for integration tests.

use std::sync::{Arc, Mutex};

use loglabels::output::output_fn;
use loglabels::{ConsoleFunctions, OutputFn, Severity};

/// One captured output call: severity and the stringified arguments.
pub type Call = (Severity, Vec<String>);

/// Output capabilities that record every call instead of printing.
#[derive(Clone, Default)]
pub struct Recorder {
    calls: Arc<Mutex<Vec<Call>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recording capability for one severity.
    pub fn output(&self, severity: Severity) -> OutputFn {
        let calls = self.calls.clone();
        output_fn(move |args| {
            let args = args.iter().map(|arg| arg.to_string()).collect();
            calls.lock().unwrap().push((severity, args));
        })
    }

    /// A full capability map recording into this recorder.
    pub fn functions(&self) -> ConsoleFunctions {
        ConsoleFunctions::from_fns(
            self.output(Severity::Trace),
            self.output(Severity::Info),
            self.output(Severity::Log),
            self.output(Severity::Warn),
            self.output(Severity::Error),
        )
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

/// Build an expected call.
pub fn call(severity: Severity, args: &[&str]) -> Call {
    (severity, args.iter().map(|arg| arg.to_string()).collect())
}
