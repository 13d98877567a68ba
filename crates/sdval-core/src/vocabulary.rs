//! # Vocabulary Graph
//!
//! Read-only view of the schema.org vocabulary: which names are classes,
//! their `rdfs:subClassOf` parents, and the classes each property applies
//! to (`schema:domainIncludes`).
//!
//! Built from the JSON-LD dump published by schema.org
//! (`schemaorg-current-https.jsonld`). All identifiers are reduced to short
//! names, so `schema:Product`, `https://schema.org/Product` and
//! `http://schema.org/Product` all become `Product`.

use std::collections::{HashMap, HashSet, VecDeque};
use std::path::Path;

use serde_json::Value;

use crate::error::VocabularyError;

const NAMESPACE_PREFIXES: [&str; 3] = ["schema:", "https://schema.org/", "http://schema.org/"];

/// Strip the schema.org namespace from an identifier.
pub fn short_name(id: &str) -> &str {
    NAMESPACE_PREFIXES
        .iter()
        .find_map(|prefix| id.strip_prefix(prefix))
        .unwrap_or(id)
}

/// Class hierarchy and property domains of a vocabulary.
#[derive(Debug, Clone, Default)]
pub struct VocabularyGraph {
    /// Class short name to parent class short names, in declaration order.
    classes: HashMap<String, Vec<String>>,
    /// Property short name to the classes it is declared on.
    properties: HashMap<String, Vec<String>>,
}

impl VocabularyGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the graph from a parsed JSON-LD vocabulary dump.
    ///
    /// # Errors
    ///
    /// Returns [`VocabularyError::MissingGraph`] if the document has no
    /// `@graph` array.
    pub fn from_json_ld(json_ld: &Value) -> Result<Self, VocabularyError> {
        let graph = json_ld
            .get("@graph")
            .and_then(Value::as_array)
            .ok_or(VocabularyError::MissingGraph)?;

        let mut vocabulary = Self::new();
        for entry in graph {
            let Some(id) = entry.get("@id").and_then(Value::as_str) else {
                continue;
            };
            let id = short_name(id);
            if has_type(entry, "rdfs:Class") {
                vocabulary.add_class(id, references(entry.get("rdfs:subClassOf")));
            } else if has_type(entry, "rdf:Property") {
                vocabulary.add_property(id, references(entry.get("schema:domainIncludes")));
            }
        }

        tracing::debug!(
            classes = vocabulary.classes.len(),
            properties = vocabulary.properties.len(),
            "loaded vocabulary graph"
        );
        Ok(vocabulary)
    }

    /// Load the graph from a JSON-LD file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, VocabularyError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| VocabularyError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let json_ld: Value =
            serde_json::from_str(&content).map_err(|source| VocabularyError::Json {
                path: path.display().to_string(),
                source,
            })?;
        Self::from_json_ld(&json_ld)
    }

    /// Register a class with its parent classes.
    pub fn add_class<S: Into<String>>(&mut self, name: &str, parents: impl IntoIterator<Item = S>) {
        self.classes
            .entry(name.to_string())
            .or_default()
            .extend(parents.into_iter().map(Into::into));
    }

    /// Register a property with the classes it applies to.
    pub fn add_property<S: Into<String>>(
        &mut self,
        name: &str,
        domains: impl IntoIterator<Item = S>,
    ) {
        self.properties
            .entry(name.to_string())
            .or_default()
            .extend(domains.into_iter().map(Into::into));
    }

    /// Number of classes.
    pub fn class_count(&self) -> usize {
        self.classes.len()
    }

    /// Number of properties.
    pub fn property_count(&self) -> usize {
        self.properties.len()
    }

    /// Returns true if `name` is a class of the vocabulary.
    pub fn is_class(&self, name: &str) -> bool {
        self.classes.contains_key(name)
    }

    /// Immediate parent classes of `name`; empty for unknown names.
    pub fn parents(&self, name: &str) -> &[String] {
        self.classes.get(name).map(Vec::as_slice).unwrap_or_default()
    }

    /// `name` followed by all its ancestors, breadth-first, without repeats.
    pub fn ancestors(&self, name: &str) -> Vec<String> {
        let mut visited = HashSet::new();
        let mut order = Vec::new();
        let mut queue = VecDeque::from([name.to_string()]);

        while let Some(current) = queue.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }
            queue.extend(self.parents(&current).iter().cloned());
            order.push(current);
        }
        order
    }

    /// Returns true if `property` is declared on `type_name` or any of its
    /// ancestors.
    pub fn supports_property(&self, type_name: &str, property: &str) -> bool {
        let Some(domains) = self.properties.get(property) else {
            return false;
        };
        self.ancestors(type_name)
            .iter()
            .any(|ancestor| domains.contains(ancestor))
    }
}

/// True if the entry's `@type` is `expected` or a list containing it.
fn has_type(entry: &Value, expected: &str) -> bool {
    match entry.get("@type") {
        Some(Value::String(t)) => t == expected,
        Some(Value::Array(types)) => types.iter().any(|t| t.as_str() == Some(expected)),
        _ => false,
    }
}

/// Short names referenced by a JSON-LD link field: a single `{"@id": ..}`,
/// a bare string, or a list of either.
fn references(field: Option<&Value>) -> Vec<String> {
    let reference = |value: &Value| -> Option<String> {
        let id = match value {
            Value::String(id) => id.as_str(),
            Value::Object(_) => value.get("@id")?.as_str()?,
            _ => return None,
        };
        Some(short_name(id).to_string())
    };

    match field {
        Some(Value::Array(items)) => items.iter().filter_map(reference).collect(),
        Some(value) => reference(value).into_iter().collect(),
        None => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> Value {
        json!({
            "@context": {},
            "@graph": [
                {"@id": "schema:Thing", "@type": "rdfs:Class"},
                {"@id": "schema:CreativeWork", "@type": "rdfs:Class",
                 "rdfs:subClassOf": {"@id": "schema:Thing"}},
                {"@id": "schema:Product", "@type": "rdfs:Class",
                 "rdfs:subClassOf": {"@id": "schema:Thing"}},
                {"@id": "schema:IndividualProduct", "@type": "rdfs:Class",
                 "rdfs:subClassOf": [{"@id": "schema:Product"}]},
                {"@id": "schema:Text", "@type": ["schema:DataType", "rdfs:Class"]},
                {"@id": "schema:name", "@type": "rdf:Property",
                 "schema:domainIncludes": {"@id": "schema:Thing"}},
                {"@id": "schema:gtin", "@type": "rdf:Property",
                 "schema:domainIncludes": [{"@id": "schema:Product"}, {"@id": "schema:Offer"}]},
                {"@id": "schema:InStock", "@type": "schema:ItemAvailability"}
            ]
        })
    }

    #[test]
    fn short_name_strips_known_prefixes() {
        assert_eq!(short_name("schema:Product"), "Product");
        assert_eq!(short_name("https://schema.org/Product"), "Product");
        assert_eq!(short_name("http://schema.org/Product"), "Product");
        assert_eq!(short_name("Product"), "Product");
    }

    #[test]
    fn loads_classes_and_properties() {
        let graph = VocabularyGraph::from_json_ld(&sample()).unwrap();
        assert_eq!(graph.class_count(), 5);
        assert_eq!(graph.property_count(), 2);
        assert!(graph.is_class("Text"));
        assert!(!graph.is_class("InStock"));
        assert_eq!(graph.parents("IndividualProduct"), ["Product".to_string()]);
        assert!(graph.parents("Unknown").is_empty());
    }

    #[test]
    fn ancestors_are_breadth_first_and_include_self() {
        let graph = VocabularyGraph::from_json_ld(&sample()).unwrap();
        assert_eq!(
            graph.ancestors("IndividualProduct"),
            vec!["IndividualProduct", "Product", "Thing"]
        );
    }

    #[test]
    fn ancestors_survive_cycles() {
        let mut graph = VocabularyGraph::new();
        graph.add_class("A", ["B"]);
        graph.add_class("B", ["A"]);
        assert_eq!(graph.ancestors("A"), vec!["A", "B"]);
    }

    #[test]
    fn properties_are_inherited() {
        let graph = VocabularyGraph::from_json_ld(&sample()).unwrap();
        assert!(graph.supports_property("IndividualProduct", "name"));
        assert!(graph.supports_property("IndividualProduct", "gtin"));
        assert!(!graph.supports_property("CreativeWork", "gtin"));
        assert!(!graph.supports_property("Product", "my-custom-attribute"));
    }

    #[test]
    fn missing_graph_is_an_error() {
        let err = VocabularyGraph::from_json_ld(&json!({"@context": {}})).unwrap_err();
        assert!(matches!(err, VocabularyError::MissingGraph));
    }
}
