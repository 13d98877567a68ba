//! # Validation Issues
//!
//! [`Issue`] is the single output record of the validator. Conditions
//! produce the core fields (`issueMessage`, `severity`, `path`,
//! `fieldNames`); the orchestrator then adds the document context
//! (`rootType`, `dataFormat`, `location`, `source`).
//!
//! ## Invariants
//!
//! - `fieldNames` is always a list, never a bare string.
//! - `severity` is exactly one of `ERROR` and `WARNING`.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::document::DataFormat;
use crate::path::Path;

/// Issue grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    /// Blocks conformance.
    Error,
    /// Advisory only.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "ERROR"),
            Self::Warning => write!(f, "WARNING"),
        }
    }
}

/// A graded finding about one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Human-readable description.
    pub issue_message: String,
    /// Grade of the finding.
    pub severity: Severity,
    /// Location of the entity the finding is about.
    #[serde(default)]
    pub path: Path,
    /// Fields involved, possibly dotted (`offers.price`).
    #[serde(default)]
    pub field_names: Vec<String>,
    /// Primary field, set by checks that single one out (`@type`, `location`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field_name: Option<String>,
    /// Category tag; `schemaOrg` for vocabulary conformance findings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_type: Option<String>,
    /// Root type key the entity was found under.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub root_type: Option<String>,
    /// Markup syntax the entity was extracted from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_format: Option<DataFormat>,
    /// `"start,end"` offsets of the root entity in the source document.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    /// Raw markup of the root entity.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl Issue {
    /// Create an issue with the core fields set.
    pub fn new(
        severity: Severity,
        message: impl Into<String>,
        path: Path,
        field_names: Vec<String>,
    ) -> Self {
        Self {
            issue_message: message.into(),
            severity,
            path,
            field_names,
            field_name: None,
            error_type: None,
            root_type: None,
            data_format: None,
            location: None,
            source: None,
        }
    }

    /// Shorthand for an `ERROR` issue.
    pub fn error(message: impl Into<String>, path: Path, field_names: Vec<String>) -> Self {
        Self::new(Severity::Error, message, path, field_names)
    }

    /// Shorthand for a `WARNING` issue.
    pub fn warning(message: impl Into<String>, path: Path, field_names: Vec<String>) -> Self {
        Self::new(Severity::Warning, message, path, field_names)
    }

    /// Set the primary field name.
    pub fn with_field_name(mut self, field_name: impl Into<String>) -> Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// Set the category tag.
    pub fn with_error_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = Some(error_type.into());
        self
    }

    /// Returns true for `ERROR` issues.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

/// Result of evaluating one condition.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Outcome {
    /// The condition holds.
    #[default]
    Pass,
    /// The condition failed with one issue.
    Issue(Issue),
    /// The condition produced a list of issues; an empty list is a pass.
    Issues(Vec<Issue>),
}

impl Outcome {
    /// True for [`Outcome::Pass`] and for an empty issue list.
    pub fn passes(&self) -> bool {
        match self {
            Self::Pass => true,
            Self::Issue(_) => false,
            Self::Issues(issues) => issues.is_empty(),
        }
    }

    /// The single issue, if this outcome is exactly one issue.
    ///
    /// A one-element list is not a single issue.
    pub fn as_issue(&self) -> Option<&Issue> {
        match self {
            Self::Issue(issue) => Some(issue),
            _ => None,
        }
    }

    /// Iterate over every issue carried by this outcome.
    pub fn iter(&self) -> std::slice::Iter<'_, Issue> {
        match self {
            Self::Pass => std::slice::Iter::default(),
            Self::Issue(issue) => std::slice::from_ref(issue).iter(),
            Self::Issues(issues) => issues.iter(),
        }
    }

    /// Flatten into a list of issues.
    pub fn into_issues(self) -> Vec<Issue> {
        match self {
            Self::Pass => Vec::new(),
            Self::Issue(issue) => vec![issue],
            Self::Issues(issues) => issues,
        }
    }
}

impl From<Issue> for Outcome {
    fn from(issue: Issue) -> Self {
        Self::Issue(issue)
    }
}

impl From<Option<Issue>> for Outcome {
    fn from(issue: Option<Issue>) -> Self {
        issue.map_or(Self::Pass, Self::Issue)
    }
}

impl From<Vec<Issue>> for Outcome {
    fn from(issues: Vec<Issue>) -> Self {
        Self::Issues(issues)
    }
}
