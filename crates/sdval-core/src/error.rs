//! # Error Types
//!
//! Errors raised while loading inputs. Validation itself never fails:
//! problems with the validated markup are reported as [`Issue`](crate::Issue)s,
//! not as errors.

use thiserror::Error;

/// Error loading the schema.org vocabulary graph.
#[derive(Error, Debug)]
pub enum VocabularyError {
    /// The vocabulary file could not be read.
    #[error("cannot read vocabulary '{path}': {source}")]
    Io {
        /// Path of the vocabulary file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The vocabulary file is not valid JSON.
    #[error("invalid vocabulary JSON in '{path}': {source}")]
    Json {
        /// Path of the vocabulary file.
        path: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// The JSON-LD document has no `@graph` array.
    #[error("vocabulary has no '@graph' array")]
    MissingGraph,
}

/// Error loading an extracted structured-data document.
#[derive(Error, Debug)]
pub enum DocumentError {
    /// The document file could not be read.
    #[error("cannot read document '{path}': {source}")]
    Io {
        /// Path of the document file.
        path: String,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The document does not have the extractor output shape.
    #[error("invalid document '{path}': {source}")]
    Parse {
        /// Path (or `<inline>`) of the document.
        path: String,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}
