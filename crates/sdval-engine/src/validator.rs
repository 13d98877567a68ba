//! # Validator
//!
//! Top-level entry point. Walks every root entity of every supported
//! format and tags the resulting issues with their document context.
//!
//! ## Processing order
//!
//! 1. Formats in the fixed order `jsonld`, `microdata`, `rdfa`.
//! 2. Root type keys in declaration order, entities in array order.
//! 3. Upstream extraction errors, appended after all structural issues.
//!
//! `@location` is removed from each root entity before it is walked, so a
//! second run over the same document carries no `location` for entities.

use std::sync::Arc;

use serde_json::Value;

use sdval_core::{DataFormat, Document, ExtractionError, Issue, PathSegment, VocabularyGraph};

use crate::resolver::TypeResolver;
use crate::rule_set::{HandlerRegistry, SharedRuleSet};
use crate::schema_org::SchemaOrgRuleSet;
use crate::walker::TreeWalker;

const LOCATION_KEY: &str = "@location";
const SOURCE_KEY: &str = "@source";

/// Structured-data validator.
#[derive(Debug, Clone)]
pub struct Validator {
    registry: HandlerRegistry,
    global: Vec<SharedRuleSet>,
    vocabulary: Option<Arc<VocabularyGraph>>,
}

impl Validator {
    /// Validator with type-specific rule-sets only.
    pub fn new(registry: HandlerRegistry) -> Self {
        Self {
            registry,
            global: Vec::new(),
            vocabulary: None,
        }
    }

    /// Validator with inheritance fallback through `vocabulary` and the
    /// schema.org conformance rule-set.
    pub fn with_vocabulary(registry: HandlerRegistry, vocabulary: Arc<VocabularyGraph>) -> Self {
        Self {
            registry,
            global: vec![Arc::new(SchemaOrgRuleSet)],
            vocabulary: Some(vocabulary),
        }
    }

    /// Replace the global rule-sets run on every typed node.
    pub fn with_global_rule_sets(mut self, global: Vec<SharedRuleSet>) -> Self {
        self.global = global;
        self
    }

    pub fn registry(&self) -> &HandlerRegistry {
        &self.registry
    }

    pub fn vocabulary(&self) -> Option<&VocabularyGraph> {
        self.vocabulary.as_deref()
    }

    /// Validate every entity of `document`.
    ///
    /// Never fails: malformed shapes are skipped and logged.
    pub fn validate(&self, document: &mut Document) -> Vec<Issue> {
        let mut results = Vec::new();

        for data_format in DataFormat::ALL {
            let Some(root_types) = document.format_mut(data_format) else {
                continue;
            };
            if root_types.is_empty() {
                continue;
            }
            tracing::debug!(%data_format, root_types = root_types.len(), "validating format");

            let walker = TreeWalker::new(
                TypeResolver::new(&self.registry, self.vocabulary()),
                &self.global,
                self.vocabulary(),
                data_format,
            );

            for (root_type, entities) in root_types.iter_mut() {
                let Some(entities) = entities.as_array_mut() else {
                    tracing::warn!(%data_format, %root_type, "root type entry is not a list; skipping");
                    continue;
                };
                for (index, entity) in entities.iter_mut().enumerate() {
                    let location = take_location(entity);
                    let issues = walker.walk(entity, &[PathSegment::root(root_type, index)]);
                    if issues.is_empty() {
                        continue;
                    }

                    let source = source_of(entity, data_format);
                    results.extend(issues.into_iter().map(|mut issue| {
                        issue.root_type = Some(root_type.clone());
                        issue.data_format = Some(data_format);
                        issue.location = location.clone();
                        issue.source = source.clone();
                        issue
                    }));
                }
            }
        }

        results.extend(document.errors.iter().filter_map(extraction_issue));

        tracing::debug!(issues = results.len(), "validation finished");
        results
    }
}

/// Remove `@location` from a root entity, returning it as text.
fn take_location(entity: &mut Value) -> Option<String> {
    match entity.as_object_mut()?.shift_remove(LOCATION_KEY)? {
        Value::Null => None,
        Value::String(location) => Some(location),
        other => Some(other.to_string()),
    }
}

/// The entity's own `@source`, else for JSON-LD its serialized form.
fn source_of(entity: &Value, data_format: DataFormat) -> Option<String> {
    let annotated = entity
        .get(SOURCE_KEY)
        .and_then(Value::as_str)
        .filter(|source| !source.is_empty());
    match annotated {
        Some(source) => Some(source.to_string()),
        None if data_format == DataFormat::Jsonld => serde_json::to_string(entity).ok(),
        None => None,
    }
}

/// Synthetic `ERROR` for an extraction error of a supported format.
fn extraction_issue(error: &ExtractionError) -> Option<Issue> {
    let data_format = error.format.parse::<DataFormat>().ok()?;
    let mut issue = Issue::error(error.message.clone(), Vec::new(), Vec::new());
    issue.root_type = Some(error.format.clone());
    issue.data_format = Some(data_format);
    issue.location = error.source_code_location.map(|l| l.to_string());
    issue.source = error.source.clone();
    Some(issue)
}
