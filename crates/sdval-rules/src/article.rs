//! Article, BlogPosting and NewsArticle.

use serde_json::Value;

use sdval_engine::{Check, Condition, RuleContext, RuleSet};

/// Headline plus the recommended authorship and dating fields.
#[derive(Debug, Clone, Copy, Default)]
pub struct ArticleRuleSet;

impl RuleSet for ArticleRuleSet {
    fn name(&self) -> &'static str {
        "article"
    }

    fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, _entity: &Value) -> Vec<Condition<'c>> {
        vec![
            ctx.required("headline", Check::Any),
            ctx.recommended("author", Check::ArrayOrObject),
            ctx.recommended("dateModified", Check::Date),
            ctx.recommended("datePublished", Check::Date),
            ctx.recommended("image", Check::ArrayOrObject),
            ctx.recommended("publisher", Check::Object),
        ]
    }
}
