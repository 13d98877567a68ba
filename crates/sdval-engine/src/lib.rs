//! # sdval-engine: Structured-Data Validation Engine
//!
//! Validates extracted JSON-LD, microdata and RDFa entities against
//! pluggable per-type rule-sets and, optionally, the schema.org vocabulary.
//!
//! ## Layers (leaves first)
//!
//! 1. **[`checks`]**: type predicates (`number`, `date`, `url`, ...).
//! 2. **[`conditions`]**: the `required`/`recommended`/`or` combinators
//!    rule-sets are written in, bound to a [`RuleContext`].
//! 3. **[`rule_set`]**: the [`RuleSet`] trait and the [`HandlerRegistry`].
//! 4. **[`resolver`]**: type name to rule-sets, falling back to the
//!    nearest registered ancestor in the vocabulary graph.
//! 5. **[`walker`]**: recursive traversal of one root entity.
//! 6. **[`validator`]**: the [`Validator`] entry point over a whole
//!    [`Document`](sdval_core::Document).
//!
//! [`schema_org`] holds the global vocabulary conformance rule-set that the
//! validator installs when it is given a vocabulary graph.
//!
//! ## Example
//!
//! ```
//! use std::sync::Arc;
//! use sdval_core::Document;
//! use sdval_engine::{Check, Condition, HandlerRegistry, RuleContext, RuleSet, Validator};
//! use serde_json::Value;
//!
//! struct Headline;
//!
//! impl RuleSet for Headline {
//!     fn name(&self) -> &'static str { "headline" }
//!     fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, _: &Value) -> Vec<Condition<'c>> {
//!         vec![ctx.required("headline", Check::String)]
//!     }
//! }
//!
//! let mut registry = HandlerRegistry::new();
//! registry.register("Article", Arc::new(Headline));
//!
//! let mut document = Document::from_json_str(
//!     r#"{"jsonld": {"Article": [{"@type": "Article"}]}}"#,
//! ).unwrap();
//! let issues = Validator::new(registry).validate(&mut document);
//! assert_eq!(issues[0].issue_message, "Required attribute \"headline\" is missing");
//! ```

pub mod checks;
pub mod conditions;
pub mod resolver;
pub mod rule_set;
pub mod schema_org;
pub mod validator;
pub mod walker;

pub use checks::Check;
pub use conditions::{condition, value_by_path, Condition, RuleContext, Subject};
pub use resolver::TypeResolver;
pub use rule_set::{HandlerRegistry, RuleSet, SharedRuleSet};
pub use schema_org::SchemaOrgRuleSet;
pub use validator::Validator;
pub use walker::TreeWalker;
