//! # sdval-core: Foundational Types for sdval
//!
//! Defines the data model shared by the validation engine, the concrete
//! rule-sets, and the CLI. Every other crate in the workspace depends on
//! `sdval-core`; it depends on nothing internal.
//!
//! ## Key Types
//!
//! 1. **[`Issue`]**: a graded finding (`ERROR` or `WARNING`) with the
//!    [`Path`] that locates the offending entity and the field names
//!    involved. Serializes to the camelCase wire shape consumed by
//!    reporting tools (`issueMessage`, `fieldNames`, `rootType`, ...).
//!
//! 2. **[`Outcome`]**: the result of a single condition: pass, one issue,
//!    or a list of issues. An empty list counts as a pass.
//!
//! 3. **[`Document`]**: the extractor output: one map of root types to
//!    entity lists per [`DataFormat`], plus upstream extraction errors.
//!
//! 4. **[`VocabularyGraph`]**: the schema.org class hierarchy and
//!    property domains, loaded read-only from a JSON-LD dump.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `sdval-*` crates (this is the leaf of the DAG).
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.

pub mod document;
pub mod error;
pub mod issue;
pub mod path;
pub mod vocabulary;

pub use document::{DataFormat, Document, ExtractionError, SourceCodeLocation};
pub use error::{DocumentError, VocabularyError};
pub use issue::{Issue, Outcome, Severity};
pub use path::{Path, PathSegment, TypeName};
pub use vocabulary::VocabularyGraph;
