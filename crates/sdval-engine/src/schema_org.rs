//! # Vocabulary Conformance
//!
//! The global rule-set run for every type of every typed node when a
//! vocabulary graph is configured:
//!
//! - a type that is not a class of the vocabulary is an `ERROR`;
//! - a data property that none of the node's known types supports is a
//!   `WARNING`.
//!
//! Property findings are reported once per node, under the first declared
//! type the vocabulary knows. Both findings carry `errorType: "schemaOrg"`.

use serde_json::Value;

use sdval_core::vocabulary::short_name;
use sdval_core::{Issue, Outcome, VocabularyGraph};

use crate::conditions::{condition, Condition, RuleContext, Subject};
use crate::rule_set::RuleSet;

/// `errorType` tag of vocabulary findings.
pub const SCHEMA_ORG_ERROR_TYPE: &str = "schemaOrg";

/// Global schema.org conformance rule-set.
#[derive(Debug, Clone, Copy, Default)]
pub struct SchemaOrgRuleSet;

impl RuleSet for SchemaOrgRuleSet {
    fn name(&self) -> &'static str {
        "schemaOrg"
    }

    fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, _entity: &Value) -> Vec<Condition<'c>> {
        let Some(vocabulary) = ctx.vocabulary else {
            return Vec::new();
        };
        vec![
            condition(move |_: Subject<'_>| known_type(ctx, vocabulary).into()),
            condition(move |subject: Subject<'_>| supported_properties(ctx, vocabulary, subject.entity)),
        ]
    }
}

fn known_type(ctx: &RuleContext<'_>, vocabulary: &VocabularyGraph) -> Option<Issue> {
    if vocabulary.is_class(short_name(&ctx.type_name)) {
        return None;
    }
    Some(
        ctx.error(
            format!("Type \"{}\" is not a valid schema.org type", ctx.type_name),
            &["@type"],
        )
        .with_field_name("@type")
        .with_error_type(SCHEMA_ORG_ERROR_TYPE),
    )
}

fn supported_properties(ctx: &RuleContext<'_>, vocabulary: &VocabularyGraph, entity: &Value) -> Outcome {
    let Some(properties) = entity.as_object() else {
        return Outcome::Pass;
    };
    let type_name = short_name(&ctx.type_name);
    let known_types: Vec<&str> = declared_types(entity)
        .into_iter()
        .map(short_name)
        .filter(|t| vocabulary.is_class(t))
        .collect();
    if known_types.first() != Some(&type_name) {
        return Outcome::Pass;
    }

    properties
        .keys()
        .filter(|property| !property.starts_with('@'))
        .filter(|property| {
            let property = short_name(property);
            !known_types
                .iter()
                .any(|t| vocabulary.supports_property(t, property))
        })
        .map(|property| {
            ctx.warning(
                format!(
                    "Property \"{property}\" for type \"{}\" is not supported by the schema.org specification",
                    ctx.type_name
                ),
                &[property.as_str()],
            )
            .with_error_type(SCHEMA_ORG_ERROR_TYPE)
        })
        .collect::<Vec<_>>()
        .into()
}

fn declared_types(entity: &Value) -> Vec<&str> {
    match entity.get("@type") {
        Some(Value::String(name)) => vec![name.as_str()],
        Some(Value::Array(names)) => names.iter().filter_map(Value::as_str).collect(),
        _ => Vec::new(),
    }
}
