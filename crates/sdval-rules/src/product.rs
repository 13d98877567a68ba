//! # Product
//!
//! Product snippets need a name and at least one of ratings, offers or
//! reviews. A listing with offers but without ratings or reviews is
//! valid, yet both are recommended. Review pros and cons, when present,
//! must total at least two notes.

use serde_json::Value;

use sdval_core::{Issue, Outcome};
use sdval_engine::conditions::is_truthy;
use sdval_engine::{condition, Check, Condition, RuleContext, RuleSet, Subject};

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductRuleSet;

impl RuleSet for ProductRuleSet {
    fn name(&self) -> &'static str {
        "product"
    }

    fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, _entity: &Value) -> Vec<Condition<'c>> {
        vec![
            ctx.required("name", Check::Any),
            condition(move |subject: Subject<'_>| rating_review_or_offers(ctx, subject)),
            condition(move |subject: Subject<'_>| notes_count(ctx, subject.entity).into()),
        ]
    }
}

fn rating_review_or_offers(ctx: &RuleContext<'_>, subject: Subject<'_>) -> Outcome {
    let entity = subject.entity;
    let has = |field: &str| is_truthy(entity.get(field));
    let mut issues = Vec::new();

    if !has("aggregateRating") && !has("offers") && !has("review") {
        issues.push(ctx.error(
            "One of the following attributes is required: \"aggregateRating\", \"offers\" or \"review\"",
            &["aggregateRating", "offers", "review"],
        ));
    }

    if has("offers") && (!has("aggregateRating") || !has("review")) {
        for field in ["aggregateRating", "review"] {
            issues.extend(ctx.recommended(field, Check::Object)(subject).into_issues());
        }
    }

    issues.into()
}

fn notes_count(ctx: &RuleContext<'_>, entity: &Value) -> Option<Issue> {
    let reviews: Vec<&Value> = match entity.get("review") {
        review if !is_truthy(review) => return None,
        Some(Value::Array(reviews)) => reviews.iter().collect(),
        Some(review) => vec![review],
        None => return None,
    };

    let notes: usize = reviews
        .iter()
        .map(|review| {
            let positive = review.get("positiveNotes").and_then(|n| n.get("itemListElement"));
            let negative = review.get("negativeNotes").and_then(|n| n.get("itemListElement"));
            if is_truthy(positive) || is_truthy(negative) {
                list_len(positive) + list_len(negative)
            } else {
                0
            }
        })
        .sum();

    (notes == 1).then(|| {
        ctx.warning(
            "At least 2 notes, either positive or negative, are required",
            &["review.positiveNotes", "review.negativeNotes"],
        )
    })
}

fn list_len(value: Option<&Value>) -> usize {
    value.and_then(Value::as_array).map_or(0, Vec::len)
}
