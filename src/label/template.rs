//! Prefix resolution.
//!
//! Two pure stages:
//! 1. resolve each prefix token (`$level` → uppercase severity)
//! 2. join the tokens and substitute them into the outer format at `%p`

use crate::config::schema::{LabelConfig, LEVEL_TOKEN, PREFIX_PLACEHOLDER};
use crate::severity::Severity;

/// Stage 1: resolve `$level` tokens for `severity`; other tokens pass through.
pub fn resolve_tokens(prefixes: &[String], severity: Severity) -> Vec<&str> {
    prefixes
        .iter()
        .map(|token| {
            if token == LEVEL_TOKEN {
                severity.label()
            } else {
                token.as_str()
            }
        })
        .collect()
}

/// Join resolved tokens, `separator` between each pair.
pub fn join_tokens<S: AsRef<str>>(tokens: &[S], separator: &str) -> String {
    let mut joined = String::new();
    for token in tokens {
        joined.push_str(separator);
        joined.push_str(token.as_ref());
    }
    // Drop the separator written ahead of the first token.
    joined.split_off(separator.len().min(joined.len()))
}

/// Stage 2: substitute `joined` for the first `%p` in `format`.
pub fn apply_format(format: &str, joined: &str) -> String {
    format.replacen(PREFIX_PLACEHOLDER, joined, 1)
}

/// Full prefix string printed ahead of a `severity` call.
pub fn render_prefix(config: &LabelConfig, severity: Severity) -> String {
    let tokens = resolve_tokens(&config.prefixes, severity);
    apply_format(&config.format, &join_tokens(&tokens, &config.separator))
}
