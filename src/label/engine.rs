//! The label engine: one logger's configuration and live dispatch table.
//!
//! # Responsibilities
//! - Validate configuration on construction
//! - Build the dispatch table immediately and on every level change
//! - Create named children through the owning registry
//!
//! # Design Decisions
//! - The level is stored inside the dispatch table; `set_level` swaps both
//!   in one atomic store so readers never see a stale pair
//! - Loggers hold a weak reference to their registry (the registry owns
//!   the loggers)

use std::fmt;
use std::sync::{Arc, Weak};

use arc_swap::ArcSwap;

use crate::config::validation::validate_label;
use crate::config::{LabelConfig, LabelOptions};
use crate::error::{LabelError, LabelResult};
use crate::label::dispatch::DispatchTable;
use crate::output::OutputTable;
use crate::registry::{RegistryInner, ROOT_NAME};
use crate::severity::Severity;

/// A labelled logger.
pub struct LogLabel {
    name: Option<String>,
    config: LabelConfig,
    table: ArcSwap<DispatchTable>,
    outputs: Arc<OutputTable>,
    registry: Weak<RegistryInner>,
}

impl LogLabel {
    /// Create a standalone logger writing to the standard streams.
    ///
    /// A standalone logger has no registry, so [`LogLabel::get`] on it fails
    /// with [`LabelError::Detached`]. Use [`crate::Registry`] for hierarchies.
    pub fn new(config: LabelConfig) -> LabelResult<Self> {
        Self::with_outputs(config, Arc::new(OutputTable::default()))
    }

    /// Create a standalone logger writing to `outputs`.
    pub fn with_outputs(config: LabelConfig, outputs: Arc<OutputTable>) -> LabelResult<Self> {
        validate_label(&config).map_err(LabelError::Invalid)?;
        Ok(Self::attached(None, config, outputs, Weak::new()))
    }

    /// Build a logger from an already validated config.
    pub(crate) fn attached(
        name: Option<String>,
        config: LabelConfig,
        outputs: Arc<OutputTable>,
        registry: Weak<RegistryInner>,
    ) -> Self {
        let table = DispatchTable::build(&config, config.level, &outputs.load());
        Self {
            name,
            config,
            table: ArcSwap::from_pointee(table),
            outputs,
            registry,
        }
    }

    /// Registry name; `None` for a root or standalone logger.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// Snapshot of the configuration, carrying the current level.
    pub fn config(&self) -> LabelConfig {
        LabelConfig {
            level: self.get_level(),
            ..self.config.clone()
        }
    }

    pub fn prefixes(&self) -> &[String] {
        &self.config.prefixes
    }

    /// Rank of every severity.
    pub fn levels(&self) -> [(Severity, u8); 5] {
        Severity::ALL.map(|severity| (severity, severity.rank()))
    }

    /// Output capabilities this logger binds to.
    pub fn outputs(&self) -> &Arc<OutputTable> {
        &self.outputs
    }

    /// Set the active threshold and rebuild all five dispatch entries.
    pub fn set_level(&self, level: Severity) {
        let table = DispatchTable::build(&self.config, level, &self.outputs.load());
        self.table.store(Arc::new(table));
        tracing::trace!(
            logger = self.name.as_deref().unwrap_or(ROOT_NAME),
            %level,
            "Dispatch table rebuilt"
        );
    }

    pub fn get_level(&self) -> Severity {
        self.table.load().level()
    }

    /// Rebuild the dispatch table at the current level, picking up any
    /// replaced output capability.
    pub fn refresh(&self) {
        self.set_level(self.get_level());
    }

    /// Current dispatch table.
    pub fn dispatch_table(&self) -> Arc<DispatchTable> {
        self.table.load_full()
    }

    /// Resolved prefix for `severity`, or `None` when it is suppressed or raw.
    pub fn prefix_for(&self, severity: Severity) -> Option<String> {
        self.table.load().prefix(severity).map(str::to_string)
    }

    /// Whether a `severity` call produces output.
    pub fn is_enabled(&self, severity: Severity) -> bool {
        !self.table.load().get(severity).is_noop()
    }

    pub fn emit(&self, severity: Severity, args: &[&dyn fmt::Display]) {
        let table = self.table.load();
        table.get(severity).call(args);
    }

    pub fn trace(&self, args: &[&dyn fmt::Display]) {
        self.emit(Severity::Trace, args);
    }

    pub fn info(&self, args: &[&dyn fmt::Display]) {
        self.emit(Severity::Info, args);
    }

    pub fn log(&self, args: &[&dyn fmt::Display]) {
        self.emit(Severity::Log, args);
    }

    pub fn warn(&self, args: &[&dyn fmt::Display]) {
        self.emit(Severity::Warn, args);
    }

    pub fn error(&self, args: &[&dyn fmt::Display]) {
        self.emit(Severity::Error, args);
    }

    /// Get or create the child logger `name`, inheriting this logger's config.
    pub fn get(&self, name: &str) -> LabelResult<Arc<LogLabel>> {
        self.get_with(name, LabelOptions::default())
    }

    /// Get or create the child logger `name`.
    ///
    /// If `name` already exists the cached logger is returned and `options`
    /// are ignored. Otherwise the new logger's config is derived from this
    /// logger's config and current level, with `options` applied on top.
    pub fn get_with(&self, name: &str, options: LabelOptions) -> LabelResult<Arc<LogLabel>> {
        if name.is_empty() {
            return Err(LabelError::EmptyName);
        }
        let registry = self
            .registry
            .upgrade()
            .ok_or_else(|| LabelError::Detached(name.to_string()))?;
        registry.get_or_create(self, name, &options)
    }

    /// Derive the config of a new child from this logger.
    pub(crate) fn child_config(&self, name: &str, options: &LabelOptions) -> LabelConfig {
        self.config.derive_child(self.get_level(), name, options)
    }
}

impl fmt::Debug for LogLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogLabel")
            .field("name", &self.name)
            .field("prefixes", &self.config.prefixes)
            .field("level", &self.get_level())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ValidationError;
    use crate::output::{join_args, output_fn, ConsoleFunctions};
    use std::sync::Mutex;

    type Seen = Arc<Mutex<Vec<(Severity, String)>>>;

    fn recording_outputs() -> (Arc<OutputTable>, Seen) {
        let seen: Seen = Arc::new(Mutex::new(Vec::new()));
        let fns = Severity::ALL.map(|severity| {
            let sink = seen.clone();
            output_fn(move |args| sink.lock().unwrap().push((severity, join_args(args))))
        });
        let [trace, info, log, warn, error] = fns;
        let table = OutputTable::new(ConsoleFunctions::from_fns(trace, info, log, warn, error));
        (Arc::new(table), seen)
    }

    #[test]
    fn test_default_logger_accepts_everything() {
        let (outputs, seen) = recording_outputs();
        let logger = LogLabel::with_outputs(LabelConfig::default(), outputs).unwrap();

        assert_eq!(logger.get_level(), Severity::Trace);
        logger.trace(&[&"t"]);
        logger.error(&[&"e"]);

        assert_eq!(
            *seen.lock().unwrap(),
            vec![
                (Severity::Trace, "[TRACE] t".to_string()),
                (Severity::Error, "[ERROR] e".to_string()),
            ]
        );
    }

    #[test]
    fn test_set_level_suppresses_lower_severities() {
        let (outputs, seen) = recording_outputs();
        let logger = LogLabel::with_outputs(LabelConfig::default(), outputs).unwrap();

        logger.set_level(Severity::Warn);
        assert_eq!(logger.get_level(), Severity::Warn);

        for severity in Severity::ALL {
            logger.emit(severity, &[&"x"]);
            assert_eq!(logger.is_enabled(severity), severity >= Severity::Warn);
        }

        let seen = seen.lock().unwrap();
        let severities: Vec<Severity> = seen.iter().map(|(s, _)| *s).collect();
        assert_eq!(severities, vec![Severity::Warn, Severity::Error]);
    }

    #[test]
    fn test_set_level_is_idempotent() {
        let logger = LogLabel::new(LabelConfig {
            prefixes: vec!["$level".into(), "db".into()],
            level: Severity::Info,
            ..LabelConfig::default()
        })
        .unwrap();

        let before: Vec<Option<String>> =
            Severity::ALL.iter().map(|s| logger.prefix_for(*s)).collect();
        logger.set_level(logger.get_level());
        let after: Vec<Option<String>> =
            Severity::ALL.iter().map(|s| logger.prefix_for(*s)).collect();

        assert_eq!(before, after);
        assert_eq!(logger.get_level(), Severity::Info);
        assert_eq!(before[0], None);
        assert_eq!(before[3].as_deref(), Some("[WARN][db]"));
    }

    #[test]
    fn test_refresh_picks_up_replaced_output() {
        let (outputs, seen) = recording_outputs();
        let logger = LogLabel::with_outputs(LabelConfig::default(), outputs.clone()).unwrap();

        let redirected = Arc::new(Mutex::new(Vec::new()));
        let sink = redirected.clone();
        outputs.replace(
            Severity::Info,
            output_fn(move |args| sink.lock().unwrap().push(join_args(args))),
        );

        // Old binding stays until the table is rebuilt.
        logger.info(&[&"before"]);
        logger.refresh();
        logger.info(&[&"after"]);

        assert_eq!(seen.lock().unwrap().len(), 1);
        assert_eq!(*redirected.lock().unwrap(), vec!["[INFO] after"]);
    }

    #[test]
    fn test_invalid_format_rejected() {
        let err = LogLabel::new(LabelConfig {
            format: "no placeholder".into(),
            ..LabelConfig::default()
        })
        .unwrap_err();

        match err {
            LabelError::Invalid(errors) => assert_eq!(
                errors,
                vec![ValidationError::MissingPlaceholder("no placeholder".into())]
            ),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_standalone_logger_is_detached() {
        let logger = LogLabel::new(LabelConfig::default()).unwrap();
        assert!(matches!(logger.get("db"), Err(LabelError::Detached(name)) if name == "db"));
        assert!(matches!(logger.get(""), Err(LabelError::EmptyName)));
    }

    #[test]
    fn test_config_snapshot_tracks_level() {
        let logger = LogLabel::new(LabelConfig::default()).unwrap();
        logger.set_level(Severity::Error);
        assert_eq!(logger.config().level, Severity::Error);
        assert_eq!(logger.prefixes().to_vec(), vec!["$level"]);
    }

    #[test]
    fn test_levels_map() {
        let logger = LogLabel::new(LabelConfig::default()).unwrap();
        assert_eq!(logger.levels()[4], (Severity::Error, 4));
    }

    #[test]
    fn test_table_display() {
        let logger = LogLabel::new(LabelConfig {
            level: Severity::Log,
            ..LabelConfig::default()
        })
        .unwrap();
        let rendered = logger.dispatch_table().to_string();
        assert_eq!(
            rendered,
            "trace off\ninfo  off\nlog   [LOG]\nwarn  [WARN]\nerror [ERROR]\n"
        );
    }
}
