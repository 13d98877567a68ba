//! ListItem.

use serde_json::Value;

use sdval_engine::{Check, Condition, RuleContext, RuleSet};

/// A list item is named either directly or through the item it links to.
#[derive(Debug, Clone, Copy, Default)]
pub struct ListItemRuleSet;

impl RuleSet for ListItemRuleSet {
    fn name(&self) -> &'static str {
        "listItem"
    }

    fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, _entity: &Value) -> Vec<Condition<'c>> {
        vec![ctx.or(vec![
            ctx.required("name", Check::Any),
            ctx.required("item.name", Check::Any),
        ])]
    }
}
