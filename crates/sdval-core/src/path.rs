//! # Entity Paths
//!
//! A [`Path`] locates an entity inside an extracted document: the root
//! type and index it was found under, then one [`PathSegment`] per nested
//! property. Array elements do not add a segment of their own; they enrich
//! the segment of the property that holds the array with `index` and
//! `length`.
//!
//! ```text
//! [{type: "BreadcrumbList", index: 0},
//!  {property: "itemListElement", type: "ListItem", index: 1, length: 3}]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Ordered chain of segments from the document root to an entity.
pub type Path = Vec<PathSegment>;

/// The `@type` annotation recorded on a path segment.
///
/// Mirrors the markup: a single type name, or the list of names of a
/// multi-typed entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TypeName {
    /// `"@type": "Product"`
    Single(String),
    /// `"@type": ["Product", "Car"]`
    Multiple(Vec<String>),
}

impl TypeName {
    /// Read the `@type` annotation of a value.
    ///
    /// Returns `None` when the value is not an object, has no `@type`, or
    /// the annotation is neither a string nor a list of strings.
    pub fn of(value: &Value) -> Option<Self> {
        match value.get("@type")? {
            Value::String(name) => Some(Self::Single(name.clone())),
            Value::Array(items) => Some(Self::Multiple(
                items
                    .iter()
                    .filter_map(|item| item.as_str().map(str::to_string))
                    .collect(),
            )),
            _ => None,
        }
    }

    /// True only for a single type annotation equal to `name`.
    ///
    /// A multi-typed segment never matches, even when it lists `name`.
    pub fn is(&self, name: &str) -> bool {
        matches!(self, Self::Single(single) if single == name)
    }
}

impl From<&str> for TypeName {
    fn from(name: &str) -> Self {
        Self::Single(name.to_string())
    }
}

/// One step in a [`Path`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PathSegment {
    /// Type of the entity reached by this step.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_name: Option<TypeName>,
    /// Position of the entity within its array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub index: Option<usize>,
    /// Number of siblings in that array.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,
    /// Property that led from the parent entity to this one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub property: Option<String>,
}

impl PathSegment {
    /// First segment of every path: the root type and the entity's index
    /// in that root type's list.
    pub fn root(root_type: &str, index: usize) -> Self {
        Self {
            type_name: Some(TypeName::from(root_type)),
            index: Some(index),
            ..Self::default()
        }
    }

    /// Segment for a nested property.
    pub fn property(property: &str, type_name: Option<TypeName>) -> Self {
        Self {
            type_name,
            property: Some(property.to_string()),
            ..Self::default()
        }
    }

    /// Copy of this segment positioned at `index` of an array of `length`.
    ///
    /// The element's own type replaces the recorded one when present.
    pub fn at(&self, index: usize, length: usize, element_type: Option<TypeName>) -> Self {
        let mut segment = self.clone();
        segment.index = Some(index);
        segment.length = Some(length);
        if element_type.is_some() {
            segment.type_name = element_type;
        }
        segment
    }

    /// True if this segment records exactly the single type `name`.
    pub fn has_type(&self, name: &str) -> bool {
        self.type_name.as_ref().is_some_and(|t| t.is(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn root_segment_serializes_type_and_index_only() {
        let segment = PathSegment::root("Product", 0);
        assert_eq!(
            serde_json::to_value(&segment).unwrap(),
            json!({"type": "Product", "index": 0})
        );
    }

    #[test]
    fn array_position_keeps_property_and_overrides_type() {
        let segment = PathSegment::property("itemListElement", None);
        let positioned = segment.at(1, 2, Some(TypeName::from("ListItem")));
        assert_eq!(
            serde_json::to_value(&positioned).unwrap(),
            json!({"type": "ListItem", "index": 1, "length": 2, "property": "itemListElement"})
        );
    }

    #[test]
    fn array_position_without_element_type_keeps_recorded_type() {
        let segment = PathSegment::property("offers", Some(TypeName::from("Offer")));
        let positioned = segment.at(0, 1, None);
        assert!(positioned.has_type("Offer"));
    }

    #[test]
    fn type_name_reads_single_and_multiple() {
        assert_eq!(
            TypeName::of(&json!({"@type": "Event"})),
            Some(TypeName::Single("Event".into()))
        );
        assert_eq!(
            TypeName::of(&json!({"@type": ["Product", "Car"]})),
            Some(TypeName::Multiple(vec!["Product".into(), "Car".into()]))
        );
        assert_eq!(TypeName::of(&json!({"name": "x"})), None);
        assert_eq!(TypeName::of(&json!("Event")), None);
    }

    #[test]
    fn multiple_types_never_match_a_single_name() {
        let multi = TypeName::Multiple(vec!["Organization".into()]);
        assert!(!multi.is("Organization"));
        assert!(TypeName::from("Organization").is("Organization"));
    }

    #[test]
    fn multiple_types_serialize_as_array() {
        let segment = PathSegment {
            type_name: Some(TypeName::Multiple(vec!["A".into(), "B".into()])),
            ..PathSegment::default()
        };
        assert_eq!(serde_json::to_value(&segment).unwrap(), json!({"type": ["A", "B"]}));
    }
}
