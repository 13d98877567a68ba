//! # Extracted Documents
//!
//! The input shape produced by the upstream markup extractor:
//!
//! ```json
//! {
//!   "jsonld":    { "Product": [ { "@type": "Product", "@location": "35,492", ... } ] },
//!   "microdata": { "BreadcrumbList": [ ... ] },
//!   "rdfa":      { },
//!   "errors":    [ { "format": "jsonld", "message": "...",
//!                    "sourceCodeLocation": { "startOffset": 1, "endOffset": 9 } } ]
//! }
//! ```
//!
//! Root-type maps keep their declaration order (`serde_json` is built with
//! `preserve_order`), which the validator relies on for deterministic
//! issue order. Unknown top-level keys are ignored.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DocumentError;

/// Markup syntax an entity was extracted from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataFormat {
    /// `<script type="application/ld+json">`
    Jsonld,
    /// `itemscope`/`itemprop` attributes.
    Microdata,
    /// `vocab`/`typeof`/`property` attributes.
    Rdfa,
}

impl DataFormat {
    /// Supported formats, in validation order.
    pub const ALL: [DataFormat; 3] = [Self::Jsonld, Self::Microdata, Self::Rdfa];

    /// Wire name of the format.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Jsonld => "jsonld",
            Self::Microdata => "microdata",
            Self::Rdfa => "rdfa",
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DataFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "jsonld" => Ok(Self::Jsonld),
            "microdata" => Ok(Self::Microdata),
            "rdfa" => Ok(Self::Rdfa),
            other => Err(format!("unsupported data format: {other}")),
        }
    }
}

/// Byte offsets of a fragment in the source HTML.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCodeLocation {
    /// Offset of the first byte.
    pub start_offset: u64,
    /// Offset one past the last byte.
    pub end_offset: u64,
}

impl fmt::Display for SourceCodeLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.start_offset, self.end_offset)
    }
}

/// An error reported by the extractor itself (e.g. unparsable JSON-LD).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionError {
    /// Format the extractor was processing; may name formats the
    /// validator does not support (e.g. `metatags`).
    pub format: String,
    /// Extractor message, surfaced verbatim.
    #[serde(default)]
    pub message: String,
    /// Where the failing fragment sits in the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_code_location: Option<SourceCodeLocation>,
    /// The failing fragment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

/// Extractor output: root type name to entity list, per format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Document {
    /// JSON-LD root types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jsonld: Option<Map<String, Value>>,
    /// Microdata root types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub microdata: Option<Map<String, Value>>,
    /// RDFa root types.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rdfa: Option<Map<String, Value>>,
    /// Upstream extraction errors.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<ExtractionError>,
}

impl Document {
    /// Parse a document from a JSON string.
    pub fn from_json_str(json: &str) -> Result<Self, DocumentError> {
        serde_json::from_str(json).map_err(|source| DocumentError::Parse {
            path: "<inline>".to_string(),
            source,
        })
    }

    /// Load a document from a JSON file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| DocumentError::Io {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&content).map_err(|source| DocumentError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Root types of one format.
    pub fn format(&self, format: DataFormat) -> Option<&Map<String, Value>> {
        match format {
            DataFormat::Jsonld => self.jsonld.as_ref(),
            DataFormat::Microdata => self.microdata.as_ref(),
            DataFormat::Rdfa => self.rdfa.as_ref(),
        }
    }

    /// Mutable root types of one format.
    pub fn format_mut(&mut self, format: DataFormat) -> Option<&mut Map<String, Value>> {
        match format {
            DataFormat::Jsonld => self.jsonld.as_mut(),
            DataFormat::Microdata => self.microdata.as_mut(),
            DataFormat::Rdfa => self.rdfa.as_mut(),
        }
    }
}
