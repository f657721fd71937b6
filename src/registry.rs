//! Named logger registry.
//!
//! # Responsibilities
//! - Own the root logger and every named logger
//! - Get-or-create by name, deriving new loggers from the calling logger
//! - Share one output table across all loggers
//!
//! # Design Decisions
//! - Explicit value instead of process-global state; clone the handle to share
//! - Names are unique and stable: a name always yields the same `Arc`
//! - Check-then-create runs under the map's entry lock, so concurrent first
//!   access creates exactly one logger per name
//! - No removal; loggers live as long as the registry

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;

use crate::config::validation::{validate_config, validate_label, validate_options};
use crate::config::{
    load_config, ConfigError, LabelConfig, LabelOptions, LabelsConfig, ValidationError,
};
use crate::error::{LabelError, LabelResult};
use crate::label::LogLabel;
use crate::output::{ConsoleFunctions, OutputTable};

/// Path segment naming the root logger.
pub const ROOT_NAME: &str = "root";

/// Shared registry state. Loggers point back here weakly.
pub(crate) struct RegistryInner {
    root: Arc<LogLabel>,
    loggers: DashMap<String, Arc<LogLabel>>,
    outputs: Arc<OutputTable>,
}

impl RegistryInner {
    pub(crate) fn get_or_create(
        self: &Arc<Self>,
        parent: &LogLabel,
        name: &str,
        options: &LabelOptions,
    ) -> LabelResult<Arc<LogLabel>> {
        if let Some(existing) = self.loggers.get(name) {
            return Ok(existing.value().clone());
        }

        // The parent's config is already valid, so only the overrides can
        // break the derived one.
        validate_options(options).map_err(LabelError::Invalid)?;

        match self.loggers.entry(name.to_string()) {
            // Lost a race with another creator.
            Entry::Occupied(entry) => Ok(entry.get().clone()),
            Entry::Vacant(entry) => {
                let config = parent.child_config(name, options);
                let logger = Arc::new(LogLabel::attached(
                    Some(name.to_string()),
                    config,
                    self.outputs.clone(),
                    Arc::downgrade(self),
                ));
                entry.insert(logger.clone());

                tracing::debug!(
                    logger = name,
                    parent = parent.name().unwrap_or(ROOT_NAME),
                    prefixes = ?logger.prefixes(),
                    level = %logger.get_level(),
                    "Logger created"
                );
                Ok(logger)
            }
        }
    }
}

/// Handle to a logger registry. Cloning shares the same registry.
#[derive(Clone)]
pub struct Registry {
    inner: Arc<RegistryInner>,
}

impl Registry {
    /// Create a registry whose root logger has the default configuration.
    pub fn new() -> Self {
        Self::build(LabelConfig::default(), ConsoleFunctions::default())
    }

    /// Create a registry with a configured root logger.
    pub fn with_root(config: LabelConfig) -> LabelResult<Self> {
        Self::with_root_and_outputs(config, ConsoleFunctions::default())
    }

    /// Create a registry with a configured root logger and output capabilities.
    pub fn with_root_and_outputs(config: LabelConfig, outputs: ConsoleFunctions) -> LabelResult<Self> {
        validate_label(&config).map_err(LabelError::Invalid)?;
        Ok(Self::build(config, outputs))
    }

    /// Create a registry from a configuration file's contents.
    ///
    /// Declared loggers are created in order, each derived from its parent
    /// (or the root).
    pub fn from_config(config: &LabelsConfig, outputs: ConsoleFunctions) -> LabelResult<Self> {
        validate_config(config).map_err(|errors| LabelError::Config(ConfigError::Validation(errors)))?;

        let registry = Self::build(config.root.clone(), outputs);
        for declared in &config.loggers {
            let parent = match &declared.parent {
                Some(parent) => registry.lookup(parent).ok_or_else(|| {
                    LabelError::Config(ConfigError::Validation(vec![ValidationError::UnknownParent {
                        name: declared.name.clone(),
                        parent: parent.clone(),
                    }]))
                })?,
                None => registry.root(),
            };
            parent.get_with(&declared.name, declared.options())?;
        }

        tracing::info!(loggers = registry.len(), "Label registry configured");
        Ok(registry)
    }

    /// Load a TOML configuration file and build a registry writing to the
    /// standard streams.
    pub fn load(path: &Path) -> LabelResult<Self> {
        let config = load_config(path)?;
        Self::from_config(&config, ConsoleFunctions::default())
    }

    fn build(root_config: LabelConfig, outputs: ConsoleFunctions) -> Self {
        let outputs = Arc::new(OutputTable::new(outputs));
        let inner = Arc::new_cyclic(|weak| RegistryInner {
            root: Arc::new(LogLabel::attached(None, root_config, outputs.clone(), weak.clone())),
            loggers: DashMap::new(),
            outputs,
        });
        Self { inner }
    }

    /// The root logger.
    pub fn root(&self) -> Arc<LogLabel> {
        self.inner.root.clone()
    }

    /// Get or create `name` as a child of the root.
    pub fn get(&self, name: &str) -> LabelResult<Arc<LogLabel>> {
        self.inner.root.get(name)
    }

    /// Get or create `name` as a child of the root, applying `options` on creation.
    pub fn get_with(&self, name: &str, options: LabelOptions) -> LabelResult<Arc<LogLabel>> {
        self.inner.root.get_with(name, options)
    }

    /// Walk a dotted path from the root, creating missing loggers on the way.
    ///
    /// `"root"` is the root logger itself, and a leading `root.` segment is
    /// skipped, so `"root.db.pool"`, `"db.pool"` and
    /// `root().get("db")?.get("pool")` name the same logger.
    pub fn resolve_path(&self, path: &str) -> LabelResult<Arc<LogLabel>> {
        let mut logger = self.root();
        let rest = match path.strip_prefix(ROOT_NAME) {
            Some("") => return Ok(logger),
            Some(rest) => rest.strip_prefix('.').unwrap_or(path),
            None => path,
        };
        for name in rest.split('.') {
            logger = logger.get(name)?;
        }
        Ok(logger)
    }

    /// Existing logger `name`, without creating it.
    pub fn lookup(&self, name: &str) -> Option<Arc<LogLabel>> {
        self.inner.loggers.get(name).map(|entry| entry.value().clone())
    }

    /// Names of all created loggers, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.inner.loggers.iter().map(|entry| entry.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of named loggers (the root is not counted).
    pub fn len(&self) -> usize {
        self.inner.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.loggers.is_empty()
    }

    /// Output capabilities shared by every logger of this registry.
    pub fn outputs(&self) -> &Arc<OutputTable> {
        &self.inner.outputs
    }

    /// Rebuild every logger's dispatch table at its current level.
    pub fn refresh_all(&self) {
        self.inner.root.refresh();
        for entry in self.inner.loggers.iter() {
            entry.value().refresh();
        }
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("root", &self.inner.root)
            .field("loggers", &self.names())
            .finish()
    }
}
