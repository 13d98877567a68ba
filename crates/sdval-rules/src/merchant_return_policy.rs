//! # MerchantReturnPolicy
//!
//! A policy names its country and category, or links to a policy page.
//! The link alone suffices only for a policy an `Organization` declares
//! through `hasMerchantReturnPolicy`.
//!
//! Policies with a return window get recommended window, fee and method
//! fields. Organization-level policies additionally get the extended
//! fee, label and refund fields.

use serde_json::Value;

use sdval_core::Issue;
use sdval_engine::conditions::mentions;
use sdval_engine::{condition, Check, Condition, RuleContext, RuleSet, Subject};

const FINITE_WINDOW: &str = "MerchantReturnFiniteReturnWindow";
const UNLIMITED_WINDOW: &str = "MerchantReturnUnlimitedWindow";

const ORGANIZATION_FIELDS: [&str; 11] = [
    "customerRemorseReturnFees",
    "customerRemorseReturnLabelSource",
    "customerRemorseReturnShippingFeesAmount",
    "itemCondition",
    "itemDefectReturnFees",
    "itemDefectReturnLabelSource",
    "itemDefectReturnShippingFeesAmount",
    "refundType",
    "restockingFee",
    "returnLabelSource",
    "returnPolicyCountry",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct MerchantReturnPolicyRuleSet;

impl RuleSet for MerchantReturnPolicyRuleSet {
    fn name(&self) -> &'static str {
        "merchantReturnPolicy"
    }

    fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, entity: &Value) -> Vec<Condition<'c>> {
        let mut conditions = vec![condition(move |subject: Subject<'_>| {
            country_or_link(ctx, subject.entity).into()
        })];

        let category = entity.get("returnPolicyCategory");
        let finite = mentions(category, FINITE_WINDOW);
        if !finite && !mentions(category, UNLIMITED_WINDOW) {
            return conditions;
        }

        if finite {
            conditions.push(ctx.recommended("merchantReturnDays", Check::Number));
        }
        conditions.push(ctx.recommended("returnFees", Check::Any));
        conditions.push(ctx.recommended("returnMethod", Check::Any));

        if mentions(entity.get("returnFees"), "ReturnShippingFees") {
            conditions.push(ctx.recommended("returnShippingFeesAmount", Check::Any));
        }

        // TODO: also match Organization subtypes such as OnlineStore.
        if declared_by_organization(ctx) {
            conditions.extend(
                ORGANIZATION_FIELDS
                    .iter()
                    .map(|field| ctx.recommended(field, Check::Any)),
            );
        }
        conditions
    }
}

fn declared_by_organization(ctx: &RuleContext<'_>) -> bool {
    ctx.in_type("Organization") && ctx.in_property("hasMerchantReturnPolicy")
}

fn country_or_link(ctx: &RuleContext<'_>, entity: &Value) -> Option<Issue> {
    let passes = |field: &str| ctx.required(field, Check::Any)(Subject::new(entity)).passes();

    let linked = declared_by_organization(ctx) && passes("merchantReturnLink");
    let described = passes("applicableCountry") && passes("returnPolicyCategory");
    if linked || described {
        return None;
    }
    Some(ctx.error(
        "Either applicableCountry and returnPolicyCategory or merchantReturnLink must be present",
        &["applicableCountry", "returnPolicyCategory", "merchantReturnLink"],
    ))
}
