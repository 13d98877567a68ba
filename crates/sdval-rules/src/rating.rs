//! Rating and AggregateRating.

use serde_json::Value;

use sdval_core::Issue;
use sdval_engine::checks::numeric_value;
use sdval_engine::conditions::is_truthy;
use sdval_engine::{condition, Check, Condition, RuleContext, RuleSet, Subject};

const DEFAULT_WORST: f64 = 0.0;
const DEFAULT_BEST: f64 = 5.0;

/// A rating value within `[worstRating, bestRating]`, defaulting to `[0, 5]`.
///
/// Only numeric values are range-checked; textual ratings such as `"4.5"`
/// or `"90%"` are accepted as written.
#[derive(Debug, Clone, Copy, Default)]
pub struct RatingRuleSet;

impl RuleSet for RatingRuleSet {
    fn name(&self) -> &'static str {
        "rating"
    }

    fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, _entity: &Value) -> Vec<Condition<'c>> {
        vec![
            ctx.required("ratingValue", Check::Any),
            condition(move |subject: Subject<'_>| range(ctx, subject.entity).into()),
            ctx.recommended("bestRating", Check::Any),
            ctx.recommended("worstRating", Check::Any),
        ]
    }
}

fn bound(entity: &Value, field: &str, default: f64) -> f64 {
    let value = entity.get(field);
    if is_truthy(value) {
        value.and_then(numeric_value).unwrap_or(f64::NAN)
    } else {
        default
    }
}

fn range(ctx: &RuleContext<'_>, entity: &Value) -> Option<Issue> {
    let value = entity.get("ratingValue")?.as_f64()?;
    let worst = bound(entity, "worstRating", DEFAULT_WORST);
    let best = bound(entity, "bestRating", DEFAULT_BEST);
    (value < worst || value > best).then(|| {
        ctx.error("Rating is outside the specified or default range", &["ratingValue"])
    })
}

/// Rating checks plus a rating or review count.
#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateRatingRuleSet;

impl RuleSet for AggregateRatingRuleSet {
    fn name(&self) -> &'static str {
        "aggregateRating"
    }

    fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, entity: &Value) -> Vec<Condition<'c>> {
        let mut conditions = RatingRuleSet.conditions(ctx, entity);
        conditions.push(ctx.or(vec![
            ctx.required("ratingCount", Check::Number),
            ctx.required("reviewCount", Check::Number),
        ]));
        conditions
    }
}
