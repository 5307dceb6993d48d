//! Clausewise Domain Layer
//!
//! Value types and trait interfaces shared by every other Clausewise crate.
//! Nothing in here performs I/O; infrastructure lives in `clausewise-model`
//! and the extraction pipeline in `clausewise-extractor`.
//!
//! ## Key Concepts
//!
//! - **Clause**: a typed, source-grounded span of a legal document
//! - **Relationship**: a directed, typed link between two clauses
//! - **Document type**: the closed set of agreements we know how to read
//! - **Raw extraction**: loosely-typed model output, before normalization
//! - **Extraction result**: the versioned value returned for one document

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod clause;
pub mod confidence;
pub mod document;
pub mod raw;
pub mod relationship;
pub mod result;
pub mod traits;

// Re-exports for convenience
pub use clause::{Clause, ClauseType, SourceLocation};
pub use confidence::DEFAULT_CONFIDENCE;
pub use document::{DocumentType, ParseDocumentTypeError};
pub use raw::{Credentials, ExampleData, ExampleExtraction, ModelRequest, RawExtractionBatch};
pub use relationship::{Relationship, RelationshipType};
pub use result::{ExtractionMetadata, ExtractionResult, RESULT_VERSION};
pub use traits::ExtractionModel;
