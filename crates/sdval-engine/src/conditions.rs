//! # Condition Combinators
//!
//! A [`Condition`] is a boxed predicate over an entity that yields an
//! [`Outcome`]. Rule-sets build their conditions from the combinators on
//! [`RuleContext`], which binds the data format, current path and type
//! name of the node being validated.
//!
//! ## Field lookup
//!
//! Field names may be dotted (`offers.price`, `item.@id`). Each segment
//! indexes into the current value: objects by key, arrays by numeric
//! index. Any missing or non-container intermediate yields no value.
//!
//! ## Presence
//!
//! A field is missing when the lookup yields nothing, `null`, or the empty
//! string. Everything else, including `0`, `false` and empty containers,
//! is present.

use serde_json::Value;

use sdval_core::{DataFormat, Issue, Outcome, Path, Severity, VocabularyGraph};

use crate::checks::Check;

/// The input a condition is evaluated against.
#[derive(Debug, Clone, Copy)]
pub struct Subject<'v> {
    /// The entity (or array element) under test.
    pub entity: &'v Value,
    /// Position of `entity` in its array, when evaluated per element.
    pub index: Option<usize>,
    /// The enclosing entity, when evaluated per element.
    pub root: Option<&'v Value>,
}

impl<'v> Subject<'v> {
    /// Subject for a whole entity.
    pub fn new(entity: &'v Value) -> Self {
        Self {
            entity,
            index: None,
            root: None,
        }
    }

    /// Subject for one element of an array held by `root`.
    pub fn element(entity: &'v Value, index: usize, root: &'v Value) -> Self {
        Self {
            entity,
            index: Some(index),
            root: Some(root),
        }
    }
}

impl<'v> From<&'v Value> for Subject<'v> {
    fn from(entity: &'v Value) -> Self {
        Self::new(entity)
    }
}

/// A single pass/fail check over an entity.
pub type Condition<'c> = Box<dyn Fn(Subject<'_>) -> Outcome + 'c>;

/// Box a closure as a [`Condition`].
pub fn condition<'c, F>(f: F) -> Condition<'c>
where
    F: Fn(Subject<'_>) -> Outcome + 'c,
{
    Box::new(f)
}

/// Resolve a dotted field path inside `entity`.
pub fn value_by_path<'v>(entity: &'v Value, path: &str) -> Option<&'v Value> {
    path.split('.').try_fold(entity, |current, segment| match current {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    })
}

/// True unless the value is absent, `null` or the empty string.
pub fn is_present(value: Option<&Value>) -> bool {
    !matches!(value, None | Some(Value::Null))
        && value.and_then(Value::as_str) != Some("")
}

/// Truthiness of a field value: absent, `null`, `false`, `0` and `""` are
/// falsy; every container is truthy.
pub fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().is_some_and(|f| f != 0.0 && !f.is_nan()),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

/// True if a string value contains `needle`, or an array value has an
/// element equal to it.
///
/// Enumeration members may be written as short names (`InStock`) or full
/// IRIs (`https://schema.org/InStock`), so string values match on
/// substring.
pub fn mentions(value: Option<&Value>, needle: &str) -> bool {
    match value {
        Some(Value::String(s)) => s.contains(needle),
        Some(Value::Array(items)) => items.iter().any(|item| item.as_str() == Some(needle)),
        _ => false,
    }
}

/// Per-node context a rule-set is evaluated with.
#[derive(Debug, Clone)]
pub struct RuleContext<'g> {
    /// Markup syntax of the document being validated.
    pub data_format: DataFormat,
    /// Path from the document root to the node.
    pub path: Path,
    /// The type name the rule-set was resolved for. For multi-typed nodes
    /// this is one of the node's types.
    pub type_name: String,
    /// Vocabulary graph, when one is configured.
    pub vocabulary: Option<&'g VocabularyGraph>,
}

impl<'g> RuleContext<'g> {
    /// Context without a vocabulary.
    pub fn new(data_format: DataFormat, path: Path, type_name: impl Into<String>) -> Self {
        Self {
            data_format,
            path,
            type_name: type_name.into(),
            vocabulary: None,
        }
    }

    /// Attach a vocabulary graph.
    pub fn with_vocabulary(mut self, vocabulary: Option<&'g VocabularyGraph>) -> Self {
        self.vocabulary = vocabulary;
        self
    }

    /// `ERROR` when `field` is missing or fails `check`.
    pub fn required<'c>(&'c self, field: &str, check: Check) -> Condition<'c> {
        self.field_condition(field, check, Severity::Error, |field| {
            format!("Required attribute \"{field}\" is missing")
        })
    }

    /// `WARNING` when `field` is missing or fails `check`.
    pub fn recommended<'c>(&'c self, field: &str, check: Check) -> Condition<'c> {
        self.field_condition(field, check, Severity::Warning, |field| {
            format!("Missing field \"{field}\" (optional)")
        })
    }

    fn field_condition<'c>(
        &'c self,
        field: &str,
        check: Check,
        severity: Severity,
        missing_message: fn(&str) -> String,
    ) -> Condition<'c> {
        let field = field.to_string();
        condition(move |subject: Subject<'_>| {
            let value = value_by_path(subject.entity, &field);
            let message = match value {
                _ if !is_present(value) => missing_message(&field),
                Some(v) if !check.accepts(v) => format!("Invalid type for attribute \"{field}\""),
                _ => return Outcome::Pass,
            };
            Issue::new(severity, message, self.path.clone(), vec![field.clone()]).into()
        })
    }

    /// Passes when at least one of `conditions` passes.
    ///
    /// On failure the combined issue lists every sub-issue's message and
    /// field names in argument order. It is an `ERROR` only when some
    /// condition failed with a single `ERROR` issue; failures reported as
    /// issue lists never raise the severity above `WARNING`, even when the
    /// list holds an `ERROR`. Callers depend on this: severity stays keyed
    /// on single-issue outcomes.
    pub fn or<'c>(&'c self, conditions: Vec<Condition<'c>>) -> Condition<'c> {
        condition(move |subject: Subject<'_>| {
            let outcomes: Vec<Outcome> = conditions.iter().map(|c| c(subject)).collect();
            if outcomes.iter().any(Outcome::passes) {
                return Outcome::Pass;
            }

            let severity = if outcomes
                .iter()
                .filter_map(Outcome::as_issue)
                .any(Issue::is_error)
            {
                Severity::Error
            } else {
                Severity::Warning
            };
            let issues = || outcomes.iter().flat_map(Outcome::iter);
            let field_names = issues().flat_map(|i| i.field_names.iter().cloned()).collect();
            let messages: Vec<&str> = issues().map(|i| i.issue_message.as_str()).collect();

            Issue::new(
                severity,
                format!(
                    "One of the following conditions needs to be met: {}",
                    messages.join(" or ")
                ),
                self.path.clone(),
                field_names,
            )
            .into()
        })
    }

    /// True if the parent entity's path segment records exactly type `name`.
    pub fn in_type(&self, name: &str) -> bool {
        self.path.len() > 1 && self.path[self.path.len() - 2].has_type(name)
    }

    /// True if the node was reached through property `name`.
    pub fn in_property(&self, name: &str) -> bool {
        self.path.len() > 1
            && self
                .path
                .last()
                .and_then(|segment| segment.property.as_deref())
                == Some(name)
    }

    /// An `ERROR` issue at this node.
    pub fn error(&self, message: impl Into<String>, field_names: &[&str]) -> Issue {
        Issue::error(message, self.path.clone(), to_strings(field_names))
    }

    /// A `WARNING` issue at this node.
    pub fn warning(&self, message: impl Into<String>, field_names: &[&str]) -> Issue {
        Issue::warning(message, self.path.clone(), to_strings(field_names))
    }
}

fn to_strings(names: &[&str]) -> Vec<String> {
    names.iter().map(|n| n.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use sdval_core::{PathSegment, TypeName};
    use serde_json::json;

    fn ctx() -> RuleContext<'static> {
        RuleContext::new(DataFormat::Jsonld, vec![PathSegment::root("Product", 0)], "Product")
    }

    #[test]
    fn dotted_lookup_walks_objects_and_arrays() {
        let entity = json!({"offers": [{"price": 5}], "item": {"@id": "/a"}, "name": "x"});
        assert_eq!(value_by_path(&entity, "offers.0.price"), Some(&json!(5)));
        assert_eq!(value_by_path(&entity, "item.@id"), Some(&json!("/a")));
        assert_eq!(value_by_path(&entity, "offers.price"), None);
        assert_eq!(value_by_path(&entity, "name.length"), None);
        assert_eq!(value_by_path(&json!({"a": null}), "a.b"), None);
    }

    #[test]
    fn required_reports_missing_null_and_empty() {
        let ctx = ctx();
        let name = ctx.required("name", Check::Any);
        for entity in [json!({}), json!({"name": null}), json!({"name": ""})] {
            let outcome = name(Subject::new(&entity));
            let issue = outcome.as_issue().unwrap();
            assert_eq!(issue.issue_message, "Required attribute \"name\" is missing");
            assert_eq!(issue.severity, Severity::Error);
            assert_eq!(issue.field_names, vec!["name"]);
            assert_eq!(issue.path, ctx.path);
        }
        assert!(name(Subject::new(&json!({"name": 0}))).passes());
        assert!(name(Subject::new(&json!({"name": false}))).passes());
    }

    #[test]
    fn required_reports_invalid_type() {
        let ctx = ctx();
        let start = ctx.required("startDate", Check::Date);
        let entity = json!({"startDate": "someday"});
        let outcome = start(Subject::new(&entity));
        assert_eq!(
            outcome.as_issue().unwrap().issue_message,
            "Invalid type for attribute \"startDate\""
        );
        assert!(start(Subject::new(&json!({"startDate": "2025-01-01"}))).passes());
    }

    #[test]
    fn recommended_is_a_warning() {
        let ctx = ctx();
        let image = ctx.recommended("image", Check::ArrayOrObject);
        let missing = image(Subject::new(&json!({})));
        let issue = missing.as_issue().unwrap();
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.issue_message, "Missing field \"image\" (optional)");

        let invalid = image(Subject::new(&json!({"image": "a.png"})));
        let issue = invalid.as_issue().unwrap();
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.issue_message, "Invalid type for attribute \"image\"");
    }

    #[test]
    fn or_passes_when_any_branch_passes() {
        let ctx = ctx();
        let price = ctx.or(vec![
            ctx.required("price", Check::Any),
            ctx.required("priceSpecification.price", Check::Any),
        ]);
        assert!(price(Subject::new(&json!({"priceSpecification": {"price": 1}}))).passes());
        assert!(price(Subject::new(&json!({"price": 1}))).passes());
    }

    #[test]
    fn or_combines_failures_in_argument_order() {
        let ctx = ctx();
        let price = ctx.or(vec![
            ctx.required("price", Check::Any),
            ctx.required("priceSpecification.price", Check::Any),
        ]);
        let outcome = price(Subject::new(&json!({})));
        let issue = outcome.as_issue().unwrap();
        assert_eq!(issue.severity, Severity::Error);
        assert_eq!(issue.field_names, vec!["price", "priceSpecification.price"]);
        assert_eq!(
            issue.issue_message,
            "One of the following conditions needs to be met: \
             Required attribute \"price\" is missing or \
             Required attribute \"priceSpecification.price\" is missing"
        );
    }

    #[test]
    fn or_of_warnings_is_a_warning() {
        let ctx = ctx();
        let currency = ctx.or(vec![
            ctx.recommended("priceCurrency", Check::Any),
            ctx.recommended("priceSpecification.priceCurrency", Check::Any),
        ]);
        let outcome = currency(Subject::new(&json!({})));
        assert_eq!(outcome.as_issue().unwrap().severity, Severity::Warning);
    }

    #[test]
    fn or_ignores_severity_of_issue_lists() {
        let ctx = ctx();
        let listed = ctx.or(vec![
            condition(|_| vec![Issue::error("a", vec![], vec!["a".into()])].into()),
            ctx.recommended("b", Check::Any),
        ]);
        let outcome = listed(Subject::new(&json!({})));
        let issue = outcome.as_issue().unwrap();
        assert_eq!(issue.severity, Severity::Warning);
        assert_eq!(issue.field_names, vec!["a", "b"]);
    }

    #[test]
    fn or_treats_empty_issue_list_as_pass() {
        let ctx = ctx();
        let listed = ctx.or(vec![
            condition(|_| Outcome::Issues(vec![])),
            ctx.required("b", Check::Any),
        ]);
        assert!(listed(Subject::new(&json!({}))).passes());
    }

    #[test]
    fn context_predicates_inspect_the_path() {
        let nested = RuleContext::new(
            DataFormat::Jsonld,
            vec![
                PathSegment::root("Organization", 0),
                PathSegment::property(
                    "hasMerchantReturnPolicy",
                    Some(TypeName::from("MerchantReturnPolicy")),
                ),
            ],
            "MerchantReturnPolicy",
        );
        assert!(nested.in_type("Organization"));
        assert!(nested.in_property("hasMerchantReturnPolicy"));
        assert!(!nested.in_type("MerchantReturnPolicy"));

        let root = ctx();
        assert!(!root.in_type("Product"));
        assert!(!root.in_property("offers"));
    }

    #[test]
    fn value_helpers() {
        assert!(is_present(Some(&json!(0))));
        assert!(!is_present(Some(&json!(""))));
        assert!(!is_truthy(Some(&json!(0))));
        assert!(is_truthy(Some(&json!([]))));
        assert!(mentions(
            Some(&json!("https://schema.org/OnlineEventAttendanceMode")),
            "OnlineEventAttendanceMode"
        ));
        assert!(mentions(Some(&json!(["ReturnShippingFees"])), "ReturnShippingFees"));
        assert!(!mentions(Some(&json!(5)), "5"));
    }
}
