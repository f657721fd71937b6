//! Standard stream outputs.

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt;
use std::io::{self, Write};

use crate::output::join_args;

// Write errors (closed pipe, full disk) are dropped: logging must not fail the caller.

pub fn stdout(args: &[&dyn fmt::Display]) {
    let _ = writeln!(io::stdout().lock(), "{}", join_args(args));
}

pub fn stderr(args: &[&dyn fmt::Display]) {
    let _ = writeln!(io::stderr().lock(), "{}", join_args(args));
}

/// Like [`stderr`], followed by a backtrace when `RUST_BACKTRACE` enables one.
pub fn trace(args: &[&dyn fmt::Display]) {
    let backtrace = Backtrace::capture();
    let mut err = io::stderr().lock();
    let _ = writeln!(err, "{}", join_args(args));
    if backtrace.status() == BacktraceStatus::Captured {
        let _ = writeln!(err, "{backtrace}");
    }
}
