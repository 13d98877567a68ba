//! Offer and AggregateOffer.
//!
//! Offers are only checked as part of a product listing; offers nested
//! elsewhere (events, services) follow their parent's rules.

use serde_json::Value;

use sdval_engine::{Check, Condition, RuleContext, RuleSet};

#[derive(Debug, Clone, Copy, Default)]
pub struct OfferRuleSet;

impl RuleSet for OfferRuleSet {
    fn name(&self) -> &'static str {
        "offer"
    }

    fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, _entity: &Value) -> Vec<Condition<'c>> {
        if !ctx.in_type("Product") {
            return Vec::new();
        }
        vec![
            ctx.or(vec![
                ctx.required("price", Check::Number),
                ctx.required("priceSpecification.price", Check::Number),
            ]),
            ctx.or(vec![
                ctx.recommended("priceCurrency", Check::Currency),
                ctx.recommended("priceSpecification.priceCurrency", Check::Currency),
            ]),
            ctx.recommended("availability", Check::Any),
            ctx.recommended("priceValidUntil", Check::Date),
        ]
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AggregateOfferRuleSet;

impl RuleSet for AggregateOfferRuleSet {
    fn name(&self) -> &'static str {
        "aggregateOffer"
    }

    fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, _entity: &Value) -> Vec<Condition<'c>> {
        vec![
            ctx.required("lowPrice", Check::Number),
            ctx.required("priceCurrency", Check::Currency),
            ctx.recommended("highPrice", Check::Number),
            ctx.recommended("offerCount", Check::Number),
        ]
    }
}
