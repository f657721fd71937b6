//! Outputs that forward to `tracing` events under the `loglabels` target.

use std::fmt;

use crate::output::join_args;

pub fn trace(args: &[&dyn fmt::Display]) {
    tracing::trace!(target: "loglabels", "{}", join_args(args));
}

pub fn info(args: &[&dyn fmt::Display]) {
    tracing::info!(target: "loglabels", "{}", join_args(args));
}

pub fn warn(args: &[&dyn fmt::Display]) {
    tracing::warn!(target: "loglabels", "{}", join_args(args));
}

pub fn error(args: &[&dyn fmt::Display]) {
    tracing::error!(target: "loglabels", "{}", join_args(args));
}
