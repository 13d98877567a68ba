//! # Product (merchant listing)
//!
//! Second rule-set for `Product`, covering shopping listings: an image and
//! offers are required, identifying attributes are recommended, and a
//! GTIN-family identifier should be present on the product, on its single
//! offer, or on every one of its offers.

use serde_json::Value;

use sdval_core::Issue;
use sdval_engine::{condition, Check, Condition, RuleContext, RuleSet, Subject};

const GTIN_FIELDS: [&str; 6] = ["gtin", "gtin8", "gtin12", "gtin13", "gtin14", "isbn"];

#[derive(Debug, Clone, Copy, Default)]
pub struct ProductMerchantRuleSet;

impl RuleSet for ProductMerchantRuleSet {
    fn name(&self) -> &'static str {
        "productMerchant"
    }

    fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, _entity: &Value) -> Vec<Condition<'c>> {
        vec![
            ctx.required("image", Check::Any),
            ctx.required("offers", Check::Any),
            ctx.recommended("audience", Check::Any),
            ctx.recommended("brand", Check::Any),
            ctx.recommended("color", Check::String),
            ctx.recommended("description", Check::String),
            ctx.recommended("hasCertification", Check::Any),
            ctx.recommended("inProductGroupWithID", Check::String),
            ctx.recommended("isVariantOf", Check::Any),
            ctx.recommended("material", Check::String),
            ctx.recommended("mpn", Check::String),
            ctx.recommended("pattern", Check::String),
            ctx.recommended("size", Check::Any),
            ctx.recommended("sku", Check::String),
            ctx.recommended("subjectOf", Check::Any),
            condition(move |subject: Subject<'_>| gtin(ctx, subject.entity).into()),
        ]
    }
}

/// True if any GTIN-family field of `entity` is a present string.
fn has_gtin(ctx: &RuleContext<'_>, entity: &Value) -> bool {
    let any_gtin = ctx.or(GTIN_FIELDS
        .iter()
        .map(|field| ctx.recommended(field, Check::String))
        .collect());
    any_gtin(Subject::new(entity)).passes()
}

fn gtin(ctx: &RuleContext<'_>, entity: &Value) -> Option<Issue> {
    let on_product = has_gtin(ctx, entity);
    let on_offers = match entity.get("offers") {
        Some(offer @ Value::Object(_)) => has_gtin(ctx, offer),
        Some(Value::Array(offers)) => offers.iter().all(|offer| has_gtin(ctx, offer)),
        _ => false,
    };
    if on_product || on_offers {
        return None;
    }

    let quoted: Vec<String> = GTIN_FIELDS.iter().map(|f| format!("\"{f}\"")).collect();
    Some(ctx.warning(
        format!(
            "Missing one of field {} on either product or all offers",
            quoted.join(", ")
        ),
        &GTIN_FIELDS,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdval_core::{DataFormat, PathSegment, Severity};
    use serde_json::json;

    fn run(entity: &Value) -> Vec<Issue> {
        let ctx = RuleContext::new(DataFormat::Jsonld, vec![PathSegment::root("Product", 0)], "Product");
        ProductMerchantRuleSet.validate(&ctx, entity)
    }

    fn listing(offers: Value) -> Value {
        json!({
            "@type": "Product",
            "image": "https://example.com/shoe.jpg",
            "offers": offers,
            "audience": {"@type": "PeopleAudience"},
            "brand": {"@type": "Brand", "name": "B"},
            "color": "red",
            "description": "A shoe",
            "hasCertification": {"@type": "Certification"},
            "inProductGroupWithID": "SHOE-1",
            "isVariantOf": {"@type": "ProductGroup"},
            "material": "leather",
            "mpn": "M-1",
            "pattern": "plain",
            "size": "42",
            "sku": "S-1",
            "subjectOf": {"@type": "3DModel"}
        })
    }

    fn gtin_issues(entity: &Value) -> Vec<Issue> {
        run(entity)
            .into_iter()
            .filter(|i| i.field_names.len() == GTIN_FIELDS.len())
            .collect()
    }

    #[test]
    fn gtin_on_the_product_suffices() {
        let mut entity = listing(json!({"price": 1}));
        entity["gtin13"] = json!("4006381333931");
        assert!(run(&entity).is_empty());
    }

    #[test]
    fn gtin_on_a_single_offer_suffices() {
        let entity = listing(json!({"price": 1, "gtin": "4006381333931"}));
        assert!(gtin_issues(&entity).is_empty());
    }

    #[test]
    fn every_offer_needs_a_gtin() {
        let entity = listing(json!([{"gtin8": "12345670"}, {"isbn": "9780131103627"}]));
        assert!(gtin_issues(&entity).is_empty());

        let entity = listing(json!([{"gtin8": "12345670"}, {"price": 1}]));
        let issues = gtin_issues(&entity);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].severity, Severity::Warning);
        assert_eq!(
            issues[0].issue_message,
            "Missing one of field \"gtin\", \"gtin8\", \"gtin12\", \"gtin13\", \"gtin14\", \"isbn\" \
             on either product or all offers"
        );
    }

    #[test]
    fn numeric_gtin_does_not_count() {
        let mut entity = listing(json!({"price": 1}));
        entity["gtin"] = json!(4006381333931_u64);
        assert_eq!(gtin_issues(&entity).len(), 1);
    }

    #[test]
    fn missing_image_and_offers_are_errors() {
        let entity = json!({"@type": "Product", "gtin": "4006381333931"});
        let errors: Vec<Issue> = run(&entity).into_iter().filter(Issue::is_error).collect();
        let fields: Vec<&str> = errors.iter().map(|i| i.field_names[0].as_str()).collect();
        assert_eq!(fields, vec!["image", "offers"]);
    }
}
