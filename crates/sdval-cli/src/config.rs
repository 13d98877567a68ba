//! # Validator Configuration
//!
//! Optional YAML file selected with `--config`:
//!
//! ```yaml
//! vocabulary: schemaorg-current-https.jsonld
//! schema_org_checks: true
//! disabled_types: [Event]
//! fail_on_warnings: false
//! ```
//!
//! Every key is optional. A relative `vocabulary` path is looked up next to
//! the configuration file first. Command-line flags override file values.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use sdval_core::VocabularyGraph;
use sdval_engine::{HandlerRegistry, Validator};
use sdval_rules::default_registry;

/// Settings the validator is built from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ValidatorConfig {
    /// schema.org JSON-LD graph enabling inheritance fallback.
    pub vocabulary: Option<PathBuf>,
    /// Run the schema.org conformance rule-set when a vocabulary is loaded.
    pub schema_org_checks: bool,
    /// Types whose built-in rule-sets are removed.
    pub disabled_types: Vec<String>,
    /// Treat warnings as failing issues.
    pub fail_on_warnings: bool,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            vocabulary: None,
            schema_org_checks: true,
            disabled_types: Vec::new(),
            fail_on_warnings: false,
        }
    }
}

impl ValidatorConfig {
    /// Load the configuration file, or the defaults when none is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading configuration: {}", path.display()))?;
        let mut config: Self = serde_yaml::from_str(&content)
            .with_context(|| format!("parsing configuration YAML: {}", path.display()))?;

        if let Some(vocabulary) = config.vocabulary.take() {
            config.vocabulary = Some(crate::resolve_path(&vocabulary, path.parent()));
        }
        tracing::debug!(path = %path.display(), ?config, "loaded configuration");
        Ok(config)
    }

    /// The default registry minus the disabled types.
    pub fn registry(&self) -> HandlerRegistry {
        let mut registry = default_registry();
        for type_name in &self.disabled_types {
            if registry.remove(type_name).is_none() {
                tracing::warn!(%type_name, "disabled type has no registered rule-sets");
            }
        }
        registry
    }

    /// Build the validator, loading the vocabulary graph if configured.
    pub fn build_validator(&self) -> Result<Validator> {
        let registry = self.registry();
        let Some(path) = &self.vocabulary else {
            return Ok(Validator::new(registry));
        };

        let graph = VocabularyGraph::from_path(path)
            .with_context(|| format!("loading vocabulary: {}", path.display()))?;
        tracing::info!(
            classes = graph.class_count(),
            properties = graph.property_count(),
            "loaded schema.org vocabulary"
        );

        let validator = Validator::with_vocabulary(registry, Arc::new(graph));
        Ok(if self.schema_org_checks {
            validator
        } else {
            validator.with_global_rule_sets(Vec::new())
        })
    }
}
