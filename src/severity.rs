//! Severity levels.
//!
//! # Design Decisions
//! - Ranks are fixed: trace=0, info=1, log=2, warn=3, error=4
//! - Higher rank = more severe; ordering derives from the rank
//! - Config files may name a level or give its rank

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// One of the five output severities, ordered by rank.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase", try_from = "SeverityRepr")]
pub enum Severity {
    #[default]
    Trace = 0,
    Info = 1,
    Log = 2,
    Warn = 3,
    Error = 4,
}

impl Severity {
    /// Every severity in rank order.
    pub const ALL: [Severity; 5] = [
        Severity::Trace,
        Severity::Info,
        Severity::Log,
        Severity::Warn,
        Severity::Error,
    ];

    /// Numeric priority of this severity.
    pub const fn rank(self) -> u8 {
        self as u8
    }

    /// Lowercase method name (`"warn"`).
    pub const fn name(self) -> &'static str {
        match self {
            Severity::Trace => "trace",
            Severity::Info => "info",
            Severity::Log => "log",
            Severity::Warn => "warn",
            Severity::Error => "error",
        }
    }

    /// Uppercase label substituted for `$level` (`"WARN"`).
    pub const fn label(self) -> &'static str {
        match self {
            Severity::Trace => "TRACE",
            Severity::Info => "INFO",
            Severity::Log => "LOG",
            Severity::Warn => "WARN",
            Severity::Error => "ERROR",
        }
    }

    pub(crate) const fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error returned for names or ranks that are not a known severity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseSeverityError {
    #[error("unknown severity `{0}` (expected trace, info, log, warn or error)")]
    Name(String),

    #[error("unknown severity rank {0} (expected 0..=4)")]
    Rank(u64),
}

impl FromStr for Severity {
    type Err = ParseSeverityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Severity::ALL
            .into_iter()
            .find(|sev| sev.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseSeverityError::Name(s.to_string()))
    }
}

impl TryFrom<u8> for Severity {
    type Error = ParseSeverityError;

    fn try_from(rank: u8) -> Result<Self, ParseSeverityError> {
        Severity::ALL
            .get(rank as usize)
            .copied()
            .ok_or(ParseSeverityError::Rank(rank.into()))
    }
}

/// Wire form accepted when deserializing a severity.
#[derive(Deserialize)]
#[serde(untagged)]
enum SeverityRepr {
    Rank(u64),
    Name(String),
}

impl TryFrom<SeverityRepr> for Severity {
    type Error = ParseSeverityError;

    fn try_from(repr: SeverityRepr) -> Result<Self, ParseSeverityError> {
        match repr {
            SeverityRepr::Rank(rank) => u8::try_from(rank)
                .map_err(|_| ParseSeverityError::Rank(rank))
                .and_then(Severity::try_from),
            SeverityRepr::Name(name) => name.parse(),
        }
    }
}
