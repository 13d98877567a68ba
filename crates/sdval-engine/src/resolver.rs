//! # Type Resolver
//!
//! Maps a type name to the rule-sets that validate it:
//!
//! 1. A direct registry entry always wins.
//! 2. Otherwise, with a vocabulary graph, the parent-class edges are
//!    searched breadth-first and the nearest registered ancestor's list is
//!    used. Among ancestors at the same depth, declaration order decides.
//!    Prefixed names (`schema:NewsArticle`, `https://schema.org/NewsArticle`)
//!    are looked up in the graph by their short name.
//! 3. Otherwise the type has no type-specific rule-sets.

use std::collections::{HashSet, VecDeque};

use sdval_core::vocabulary::short_name;
use sdval_core::VocabularyGraph;

use crate::rule_set::{HandlerRegistry, SharedRuleSet};

/// Resolves type names against a registry and an optional vocabulary.
#[derive(Debug, Clone, Copy)]
pub struct TypeResolver<'a> {
    registry: &'a HandlerRegistry,
    vocabulary: Option<&'a VocabularyGraph>,
}

impl<'a> TypeResolver<'a> {
    pub fn new(registry: &'a HandlerRegistry, vocabulary: Option<&'a VocabularyGraph>) -> Self {
        Self {
            registry,
            vocabulary,
        }
    }

    /// Rule-sets for `type_name`; empty when nothing applies.
    pub fn resolve(&self, type_name: &str) -> Vec<SharedRuleSet> {
        if let Some(direct) = self.registry.get(type_name) {
            return direct.to_vec();
        }
        let Some(vocabulary) = self.vocabulary else {
            return Vec::new();
        };

        let short = short_name(type_name);
        let mut visited = HashSet::from([short]);
        let mut queue: VecDeque<&str> = vocabulary.parents(short).iter().map(String::as_str).collect();

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current) {
                continue;
            }
            if let Some(inherited) = self.registry.get(current) {
                tracing::debug!(
                    type_name,
                    ancestor = current,
                    "using ancestor rule sets for subtype"
                );
                return inherited.to_vec();
            }
            queue.extend(vocabulary.parents(current).iter().map(String::as_str));
        }

        tracing::trace!(type_name, "no rule sets registered for type or its ancestors");
        Vec::new()
    }
}
