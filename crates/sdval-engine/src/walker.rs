//! # Tree Walker
//!
//! Recursive traversal of one root entity. Arrays are walked element by
//! element, typed objects are validated by every rule-set their types
//! resolve to (plus the global rule-sets), and nested objects reached
//! through data properties are walked in turn.
//!
//! Numeric and boolean `@type` values are read as their JSON text, so the
//! global rule-sets still see (and can reject) them.
//!
//! Issue order is deterministic: array index order, then type order of a
//! multi-typed node, then property declaration order. Type-level issues of
//! a node precede the issues of its nested properties.

use std::borrow::Cow;

use serde_json::{Map, Value};

use sdval_core::{DataFormat, Issue, Path, PathSegment, TypeName, VocabularyGraph};

use crate::conditions::RuleContext;
use crate::resolver::TypeResolver;
use crate::rule_set::SharedRuleSet;

/// Reserved-key marker for metadata properties (`@type`, `@id`, ...).
const METADATA_PREFIX: char = '@';

/// Walks entities of one data format.
#[derive(Debug, Clone, Copy)]
pub struct TreeWalker<'a> {
    resolver: TypeResolver<'a>,
    global: &'a [SharedRuleSet],
    vocabulary: Option<&'a VocabularyGraph>,
    data_format: DataFormat,
}

impl<'a> TreeWalker<'a> {
    pub fn new(
        resolver: TypeResolver<'a>,
        global: &'a [SharedRuleSet],
        vocabulary: Option<&'a VocabularyGraph>,
        data_format: DataFormat,
    ) -> Self {
        Self {
            resolver,
            global,
            vocabulary,
            data_format,
        }
    }

    /// Validate `node`, located at `path`, and everything nested in it.
    pub fn walk(&self, node: &Value, path: &[PathSegment]) -> Vec<Issue> {
        match node {
            Value::Array(items) => self.walk_array(items, path),
            Value::Object(entity) => self.walk_object(node, entity, path),
            _ => Vec::new(),
        }
    }

    fn walk_array(&self, items: &[Value], path: &[PathSegment]) -> Vec<Issue> {
        let (parent, last) = match path.split_last() {
            Some((last, parent)) => (parent, last.clone()),
            None => (path, PathSegment::default()),
        };

        items
            .iter()
            .enumerate()
            .flat_map(|(index, item)| {
                let mut element_path = parent.to_vec();
                element_path.push(last.at(index, items.len(), TypeName::of(item)));
                self.walk(item, &element_path)
            })
            .collect()
    }

    fn walk_object(&self, node: &Value, entity: &Map<String, Value>, path: &[PathSegment]) -> Vec<Issue> {
        let Some(type_names) = declared_types(entity) else {
            tracing::debug!(depth = path.len(), "skipping entity without @type");
            return Vec::new();
        };

        let mut issues: Vec<Issue> = type_names
            .iter()
            .flat_map(|type_name| self.validate_type(node, type_name, path))
            .collect();

        for (property, value) in entity {
            if property.starts_with(METADATA_PREFIX) || !is_nested(value) {
                continue;
            }
            let mut child_path: Path = path.to_vec();
            child_path.push(PathSegment::property(property, nested_type(value)));
            issues.extend(self.walk(value, &child_path));
        }

        issues
    }

    fn validate_type(&self, node: &Value, type_name: &str, path: &[PathSegment]) -> Vec<Issue> {
        tracing::debug!(type_name, depth = path.len(), "validating type");

        let mut rule_sets = self.resolver.resolve(type_name);
        rule_sets.extend(self.global.iter().cloned());

        let ctx = RuleContext::new(self.data_format, path.to_vec(), type_name)
            .with_vocabulary(self.vocabulary);
        let issues: Vec<Issue> = rule_sets
            .iter()
            .flat_map(|rule_set| rule_set.validate(&ctx, node))
            .collect();

        for issue in &issues {
            tracing::trace!(
                type_name,
                severity = %issue.severity,
                message = %issue.issue_message,
                "issue"
            );
        }
        issues
    }
}

/// Type names of a typed entity, or `None` for an untyped one.
///
/// A missing, null, `false`, zero or empty-string `@type` leaves the
/// entity untyped. Numbers and booleans become their JSON text; objects,
/// nulls and nested lists inside a type list are ignored.
fn declared_types(entity: &Map<String, Value>) -> Option<Vec<Cow<'_, str>>> {
    match entity.get("@type")? {
        Value::String(name) if name.is_empty() => None,
        Value::Null | Value::Bool(false) => None,
        Value::Number(n) if n.as_f64() == Some(0.0) => None,
        Value::Array(names) => Some(names.iter().filter_map(type_name_of).collect()),
        other => Some(type_name_of(other).into_iter().collect()),
    }
}

fn type_name_of(value: &Value) -> Option<Cow<'_, str>> {
    match value {
        Value::String(name) => Some(Cow::Borrowed(name.as_str())),
        Value::Number(_) | Value::Bool(_) => Some(Cow::Owned(value.to_string())),
        _ => None,
    }
}

/// Objects, and non-empty arrays whose first element is a container.
fn is_nested(value: &Value) -> bool {
    match value {
        Value::Object(_) => true,
        Value::Array(items) => items.first().is_some_and(|first| first.is_object() || first.is_array()),
        _ => false,
    }
}

/// Type recorded on the property segment: the object's own type, or the
/// type of an array's first element.
fn nested_type(value: &Value) -> Option<TypeName> {
    match value {
        Value::Array(items) => items.first().and_then(TypeName::of),
        other => TypeName::of(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::checks::Check;
    use crate::conditions::Condition;
    use crate::rule_set::{HandlerRegistry, RuleSet};
    use serde_json::json;
    use std::sync::Arc;

    /// Requires `name` on every node it is registered for.
    struct NameRequired;

    impl RuleSet for NameRequired {
        fn name(&self) -> &'static str {
            "nameRequired"
        }

        fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, _entity: &Value) -> Vec<Condition<'c>> {
            vec![ctx.required("name", Check::Any)]
        }
    }

    fn registry(types: &[&str]) -> HandlerRegistry {
        let mut registry = HandlerRegistry::new();
        for type_name in types {
            registry.register(type_name, Arc::new(NameRequired));
        }
        registry
    }

    fn walk(registry: &HandlerRegistry, node: &Value, root_type: &str) -> Vec<Issue> {
        let walker = TreeWalker::new(TypeResolver::new(registry, None), &[], None, DataFormat::Jsonld);
        walker.walk(node, &[PathSegment::root(root_type, 0)])
    }

    #[test]
    fn untyped_entities_are_skipped_with_their_children() {
        let registry = registry(&["Thing"]);
        let node = json!({"child": {"@type": "Thing"}});
        assert!(walk(&registry, &node, "Thing").is_empty());
    }

    #[test]
    fn nested_entities_get_property_segments() {
        let registry = registry(&["Product", "Brand"]);
        let node = json!({"@type": "Product", "brand": {"@type": "Brand"}});
        let issues = walk(&registry, &node, "Product");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].path.len(), 1);
        assert_eq!(
            serde_json::to_value(&issues[1].path).unwrap(),
            json!([
                {"type": "Product", "index": 0},
                {"type": "Brand", "property": "brand"}
            ])
        );
    }

    #[test]
    fn array_elements_replace_the_last_segment() {
        let registry = registry(&["ListItem"]);
        let node = json!({
            "@type": "BreadcrumbList",
            "itemListElement": [
                {"@type": "ListItem"},
                {"@type": "ListItem", "name": "b"},
                {"@type": "ListItem"}
            ]
        });
        let issues = walk(&registry, &node, "BreadcrumbList");
        assert_eq!(issues.len(), 2);
        let last: Vec<(Option<usize>, Option<usize>)> = issues
            .iter()
            .map(|i| {
                let segment = i.path.last().unwrap();
                (segment.index, segment.length)
            })
            .collect();
        assert_eq!(last, vec![(Some(0), Some(3)), (Some(2), Some(3))]);
        assert!(issues.iter().all(|i| i.path.len() == 2));
        assert!(issues.iter().all(|i| i.path[1].property.as_deref() == Some("itemListElement")));
    }

    #[test]
    fn type_issues_precede_property_issues() {
        let registry = registry(&["Event", "Place"]);
        let node = json!({"@type": "Event", "location": {"@type": "Place"}});
        let issues = walk(&registry, &node, "Event");
        let depths: Vec<usize> = issues.iter().map(|i| i.path.len()).collect();
        assert_eq!(depths, vec![1, 2]);
    }

    /// Recommends a field named after itself, so issues show which ran.
    struct Marker(&'static str);

    impl RuleSet for Marker {
        fn name(&self) -> &'static str {
            self.0
        }

        fn conditions<'c>(&self, ctx: &'c RuleContext<'_>, _entity: &Value) -> Vec<Condition<'c>> {
            vec![ctx.recommended(self.0, Check::Any)]
        }
    }

    #[test]
    fn every_declared_type_is_validated_in_order() {
        let mut registry = HandlerRegistry::new();
        registry
            .register("Article", Arc::new(Marker("article")))
            .register("ListItem", Arc::new(Marker("listItem")));

        let node = json!({"@type": ["ListItem", "Article"]});
        let order: Vec<String> = walk(&registry, &node, "ListItem")
            .into_iter()
            .flat_map(|issue| issue.field_names)
            .collect();
        assert_eq!(order, vec!["listItem", "article"]);

        let node = json!({"@type": ["Article", "ListItem"]});
        let order: Vec<String> = walk(&registry, &node, "Article")
            .into_iter()
            .flat_map(|issue| issue.field_names)
            .collect();
        assert_eq!(order, vec!["article", "listItem"]);
    }

    #[test]
    fn scalars_and_scalar_arrays_are_not_walked() {
        let registry = registry(&["Thing"]);
        let node = json!({"@type": "Other", "keywords": ["a", "b"], "count": 3, "empty": []});
        assert!(walk(&registry, &node, "Other").is_empty());
        assert!(walk(&registry, &json!("text"), "Thing").is_empty());
    }

    #[test]
    fn metadata_properties_are_not_walked() {
        let registry = registry(&["Thing"]);
        let node = json!({"@type": "Other", "@context": {"@type": "Thing"}});
        assert!(walk(&registry, &node, "Other").is_empty());
    }

    #[test]
    fn declared_type_shapes() {
        let map = |v: Value| v.as_object().cloned().unwrap();
        let types = |v: Value| declared_types(&map(v)).map(|t| t.into_iter().map(String::from).collect::<Vec<_>>());
        assert_eq!(types(json!({"@type": "A"})), Some(vec!["A".to_string()]));
        assert_eq!(
            types(json!({"@type": ["A", 1, null, "B"]})),
            Some(vec!["A".to_string(), "1".to_string(), "B".to_string()])
        );
        assert_eq!(types(json!({"@type": ""})), None);
        assert_eq!(types(json!({"@type": false})), None);
        assert_eq!(types(json!({})), None);
        assert_eq!(types(json!({"@type": 7})), Some(vec!["7".to_string()]));
        assert_eq!(types(json!({"@type": true})), Some(vec!["true".to_string()]));
        assert_eq!(types(json!({"@type": {"@id": "A"}})), Some(vec![]));
    }
}
