//! # BreadcrumbList
//!
//! Besides the list itself, every `ListItem` must link to its page. The
//! item with the highest numeric `position` is the current page and may
//! omit the link. When any position is not numeric, no item is treated as
//! the current page.
//!
//! ## Link rules
//!
//! | Format            | Accepted links                                               |
//! |-------------------|--------------------------------------------------------------|
//! | `jsonld`          | absolute URLs only                                           |
//! | `microdata`       | absolute URLs, `/`, and lowercase root-relative paths        |
//! | `rdfa`            | absolute URLs and lowercase root-relative paths              |
//!
//! Query strings and fragments are ignored when matching relative paths.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;
use url::Url;

use sdval_core::{DataFormat, Issue, Outcome, PathSegment, TypeName};
use sdval_engine::checks::{is_number, numeric_value};
use sdval_engine::conditions::is_truthy;
use sdval_engine::{condition, Check, Condition, RuleContext, RuleSet, Subject};

const ITEM_LIST_ELEMENT: &str = "itemListElement";

static RELATIVE_PATH: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^/[a-z0-9\-/]+$").expect("relative path pattern is valid"));

#[derive(Debug, Clone, Copy, Default)]
pub struct BreadcrumbListRuleSet;

impl RuleSet for BreadcrumbListRuleSet {
    fn name(&self) -> &'static str {
        "breadcrumbList"
    }

    fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, _entity: &Value) -> Vec<Condition<'c>> {
        vec![
            ctx.required(ITEM_LIST_ELEMENT, Check::ArrayOrObject),
            condition(move |subject: Subject<'_>| at_least_two_items(ctx, subject.entity).into()),
            condition(move |subject: Subject<'_>| item_urls(ctx, subject.entity)),
        ]
    }
}

fn at_least_two_items(ctx: &RuleContext<'_>, entity: &Value) -> Option<Issue> {
    let too_few = match entity.get(ITEM_LIST_ELEMENT) {
        Some(Value::Array(items)) => items.len() < 2,
        Some(Value::Object(_)) => true,
        _ => false,
    };
    too_few.then(|| ctx.warning("At least two ListItems are required", &[ITEM_LIST_ELEMENT]))
}

fn item_urls(ctx: &RuleContext<'_>, entity: &Value) -> Outcome {
    let items: Vec<&Value> = match entity.get(ITEM_LIST_ELEMENT) {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(item @ Value::Object(_)) => vec![item],
        _ => return Outcome::Pass,
    };
    let last = current_page(&items);

    let mut issues = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let (link, field) = match item.get("item") {
            Some(linked @ Value::Object(_)) => (linked.get("@id"), "item.@id"),
            other if is_truthy(other) => (other, "item"),
            _ => (None, "item"),
        };
        let link = link.filter(|&l| is_truthy(Some(l)));

        let problem = match link {
            None if last == Some(index) => continue,
            None => "Field \"item\" with URL is missing".to_string(),
            Some(link) if link_problem(link, ctx.data_format) => {
                format!("Invalid URL in field \"{field}\"")
            }
            Some(_) => continue,
        };

        let mut path = ctx.path.clone();
        path.push(PathSegment {
            type_name: TypeName::of(item).or_else(|| Some(TypeName::from("ListItem"))),
            index: Some(index),
            length: Some(items.len()),
            property: Some(ITEM_LIST_ELEMENT.to_string()),
        });
        issues.push(Issue::warning(problem, path, vec![field.to_string()]));
    }
    issues.into()
}

/// Index of the item with the highest numeric position; the first one wins
/// ties. `None` when some position is not numeric.
fn current_page(items: &[&Value]) -> Option<usize> {
    let positions: Option<Vec<f64>> = items
        .iter()
        .map(|item| {
            item.get("position")
                .filter(|p| is_number(p))
                .and_then(numeric_value)
        })
        .collect();
    let positions = positions?;

    let mut last = 0;
    for (index, position) in positions.iter().enumerate() {
        if *position > positions[last] {
            last = index;
        }
    }
    (!positions.is_empty()).then_some(last)
}

/// True when a present link is unacceptable for `data_format`.
fn link_problem(link: &Value, data_format: DataFormat) -> bool {
    let Some(link) = link.as_str() else {
        return true;
    };
    if link.starts_with("http://") || link.starts_with("https://") || data_format == DataFormat::Jsonld {
        return Url::parse(link).is_err();
    }
    if link == "/" && data_format == DataFormat::Microdata {
        return false;
    }
    let without_params = link.split(['?', '#']).next().unwrap_or_default();
    !RELATIVE_PATH.is_match(without_params)
}
