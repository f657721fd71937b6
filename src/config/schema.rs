//! Configuration schema definitions.
//!
//! This module defines the label configuration of a single logger, the
//! per-child overrides accepted by `get`, and the file layout that declares
//! a root logger plus named loggers. All types derive Serde traits for
//! deserialization from config files.

use serde::{Deserialize, Serialize};

use crate::severity::Severity;

/// Prefix token replaced with the uppercase severity name.
pub const LEVEL_TOKEN: &str = "$level";

/// Placeholder in `format` replaced with the joined prefix string.
pub const PREFIX_PLACEHOLDER: &str = "%p";

pub const DEFAULT_SEPARATOR: &str = "][";
pub const DEFAULT_FORMAT: &str = "[%p]";

/// Label configuration of one logger.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelConfig {
    /// Ordered prefix tokens; `$level` resolves per severity.
    pub prefixes: Vec<String>,

    /// Inserted between successive resolved prefixes.
    pub separator: String,

    /// Outer template; the first `%p` receives the joined prefixes.
    pub format: String,

    /// Active threshold. Severities ranked below it are suppressed.
    pub level: Severity,

    /// With no prefixes, dispatch every severity to its raw output,
    /// ignoring `level`.
    pub bypass_filter_when_no_prefixes: bool,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            prefixes: vec![LEVEL_TOKEN.to_string()],
            separator: DEFAULT_SEPARATOR.to_string(),
            format: DEFAULT_FORMAT.to_string(),
            level: Severity::Trace,
            bypass_filter_when_no_prefixes: true,
        }
    }
}

impl LabelConfig {
    /// Derive the config of the child `name` from this (parent) config.
    ///
    /// `current_level` is the parent's live level, which may differ from
    /// `self.level` after a `set_level` call.
    pub fn derive_child(
        &self,
        current_level: Severity,
        name: &str,
        options: &LabelOptions,
    ) -> LabelConfig {
        let own = options
            .prefixes
            .clone()
            .unwrap_or_else(|| vec![name.to_string()]);

        let prefixes = if options.inherit_prefixes {
            self.prefixes.iter().cloned().chain(own).collect()
        } else {
            own
        };

        LabelConfig {
            prefixes,
            separator: options
                .separator
                .clone()
                .unwrap_or_else(|| self.separator.clone()),
            format: options.format.clone().unwrap_or_else(|| self.format.clone()),
            level: options.level.unwrap_or(current_level),
            bypass_filter_when_no_prefixes: options
                .bypass_filter_when_no_prefixes
                .unwrap_or(self.bypass_filter_when_no_prefixes),
        }
    }
}

/// Overrides applied when a named child logger is first created.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelOptions {
    pub prefixes: Option<Vec<String>>,
    pub separator: Option<String>,
    pub format: Option<String>,
    pub level: Option<Severity>,
    pub bypass_filter_when_no_prefixes: Option<bool>,

    /// Append to the parent's prefixes instead of replacing them.
    pub inherit_prefixes: bool,
}

impl Default for LabelOptions {
    fn default() -> Self {
        Self {
            prefixes: None,
            separator: None,
            format: None,
            level: None,
            bypass_filter_when_no_prefixes: None,
            inherit_prefixes: true,
        }
    }
}

impl LabelOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.prefixes = Some(prefixes.into_iter().map(Into::into).collect());
        self
    }

    pub fn separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = Some(separator.into());
        self
    }

    pub fn format(mut self, format: impl Into<String>) -> Self {
        self.format = Some(format.into());
        self
    }

    pub fn level(mut self, level: Severity) -> Self {
        self.level = Some(level);
        self
    }

    pub fn bypass_filter_when_no_prefixes(mut self, bypass: bool) -> Self {
        self.bypass_filter_when_no_prefixes = Some(bypass);
        self
    }

    pub fn inherit_prefixes(mut self, inherit: bool) -> Self {
        self.inherit_prefixes = inherit;
        self
    }
}

/// Root configuration file.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct LabelsConfig {
    /// Configuration of the root logger.
    pub root: LabelConfig,

    /// Named loggers, created in declaration order.
    pub loggers: Vec<NamedLogger>,
}

/// A named logger declared in a config file.
///
/// The override keys sit next to `name` and `parent` in the file, so they are
/// spelled out here rather than flattened from [`LabelOptions`]; that keeps
/// unknown keys an error.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct NamedLogger {
    /// Registry name.
    pub name: String,

    /// Logger to derive from; the root when absent.
    #[serde(default)]
    pub parent: Option<String>,

    #[serde(default)]
    pub prefixes: Option<Vec<String>>,
    #[serde(default)]
    pub separator: Option<String>,
    #[serde(default)]
    pub format: Option<String>,
    #[serde(default)]
    pub level: Option<Severity>,
    #[serde(default)]
    pub bypass_filter_when_no_prefixes: Option<bool>,

    #[serde(default = "inherit_by_default")]
    pub inherit_prefixes: bool,
}

fn inherit_by_default() -> bool {
    true
}

impl NamedLogger {
    /// Declare `name` under the root with `options` applied on creation.
    pub fn new(name: impl Into<String>, options: LabelOptions) -> Self {
        Self {
            name: name.into(),
            parent: None,
            prefixes: options.prefixes,
            separator: options.separator,
            format: options.format,
            level: options.level,
            bypass_filter_when_no_prefixes: options.bypass_filter_when_no_prefixes,
            inherit_prefixes: options.inherit_prefixes,
        }
    }

    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Overrides passed to `get_with` when the logger is created.
    pub fn options(&self) -> LabelOptions {
        LabelOptions {
            prefixes: self.prefixes.clone(),
            separator: self.separator.clone(),
            format: self.format.clone(),
            level: self.level,
            bypass_filter_when_no_prefixes: self.bypass_filter_when_no_prefixes,
            inherit_prefixes: self.inherit_prefixes,
        }
    }
}
