//! # Rule-Sets and the Handler Registry
//!
//! A [`RuleSet`] bundles the conditions for one semantic type. Rule-sets
//! are stateless: everything that varies per node (format, path, type
//! name, vocabulary) arrives through the [`RuleContext`], so one shared
//! instance serves every node of its type.
//!
//! The [`HandlerRegistry`] maps type names to ordered rule-set lists. It is
//! built eagerly and handed to the [`Validator`](crate::Validator) at
//! construction; tests substitute entries by building their own registry.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;

use sdval_core::Issue;

use crate::conditions::{Condition, RuleContext, Subject};

/// Conditions for one semantic type.
pub trait RuleSet: Send + Sync {
    /// Short identifier, used in logs.
    fn name(&self) -> &'static str;

    /// The conditions to evaluate against `entity`.
    ///
    /// The list may depend on the entity's own values, e.g. to add
    /// conditions only for certain enumeration members.
    fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, entity: &Value) -> Vec<Condition<'c>>;

    /// Evaluate every condition and flatten the results.
    fn validate(&self, ctx: &RuleContext<'_>, entity: &Value) -> Vec<Issue> {
        self.conditions(ctx, entity)
            .iter()
            .flat_map(|condition| condition(Subject::new(entity)).into_issues())
            .collect()
    }
}

impl fmt::Debug for dyn RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A registered rule-set.
pub type SharedRuleSet = Arc<dyn RuleSet>;

/// Type name to rule-set list.
#[derive(Clone, Default)]
pub struct HandlerRegistry {
    handlers: BTreeMap<String, Vec<SharedRuleSet>>,
}

impl HandlerRegistry {
    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `rule_set` to the list for `type_name`.
    pub fn register(&mut self, type_name: &str, rule_set: SharedRuleSet) -> &mut Self {
        self.handlers
            .entry(type_name.to_string())
            .or_default()
            .push(rule_set);
        self
    }

    /// Replace the list for `type_name`.
    pub fn set(&mut self, type_name: &str, rule_sets: Vec<SharedRuleSet>) -> &mut Self {
        self.handlers.insert(type_name.to_string(), rule_sets);
        self
    }

    /// Remove `type_name`, returning its rule-sets.
    pub fn remove(&mut self, type_name: &str) -> Option<Vec<SharedRuleSet>> {
        self.handlers.remove(type_name)
    }

    /// Rule-sets registered directly for `type_name`.
    pub fn get(&self, type_name: &str) -> Option<&[SharedRuleSet]> {
        self.handlers.get(type_name).map(Vec::as_slice)
    }

    /// True if `type_name` has a direct entry.
    pub fn contains(&self, type_name: &str) -> bool {
        self.handlers.contains_key(type_name)
    }

    /// Registered type names, sorted.
    pub fn type_names(&self) -> impl Iterator<Item = &str> {
        self.handlers.keys().map(String::as_str)
    }

    /// Number of registered type names.
    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    /// True if nothing is registered.
    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl fmt::Debug for HandlerRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.handlers.iter().map(|(type_name, rule_sets)| {
                let names: Vec<&str> = rule_sets.iter().map(|r| r.name()).collect();
                (type_name, names)
            }))
            .finish()
    }
}
