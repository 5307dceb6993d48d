//! Clausewise Extractor
//!
//! Turns the plain text of a legal document into typed clauses and
//! inter-clause relationships.
//!
//! # Overview
//!
//! A [`ClauseExtractor`] resolves the per-type [`ExtractionConfig`] from an
//! injected [`ConfigRegistry`], calls an
//! [`ExtractionModel`](clausewise_domain::ExtractionModel) once, and turns the
//! raw batch into an [`ExtractionResult`](clausewise_domain::ExtractionResult).
//!
//! # Architecture
//!
//! ```text
//! Text → Registry → Model → Normalizer → Classifier / Interpreters
//!                                     → Relationships → Confidence → Assembler
//! ```
//!
//! Failures come in two kinds. Configuration problems, bad input and failed
//! model calls abort with an [`ExtractorError`] and no result. A single bad
//! raw item only produces a [`NormalizationWarning`] and is skipped.
//!
//! # Example Usage
//!
//! ```
//! use clausewise_extractor::{ClauseExtractor, ConfigRegistry};
//! use clausewise_model::MockModel;
//!
//! let model = MockModel::new(r#"{"extractions": [
//!     {"extraction_class": "party_lessor", "extraction_text": "the Landlord"},
//!     {"extraction_class": "party_lessee", "extraction_text": "the Tenant"},
//!     {"extraction_class": "financial_terms", "extraction_text": "$1,200 monthly rent"}
//! ]}"#);
//! let extractor = ClauseExtractor::new(model, ConfigRegistry::builtin());
//!
//! let result = extractor
//!     .extract("the Landlord and the Tenant agree to $1,200 monthly rent", "rental")
//!     .unwrap();
//!
//! assert_eq!(result.clauses.len(), 3);
//! assert_eq!(result.relationships.len(), 2);
//! ```

#![warn(missing_docs)]

pub mod assembler;
pub mod attributes;
pub mod classifier;
mod confidence;
mod config;
mod error;
mod extractor;
pub mod normalizer;
pub mod prompt;
pub mod relationships;
mod types;
pub mod visualization;


pub use assembler::{DocumentTemplate, StructuredDocument};
pub use confidence::aggregate as aggregate_confidence;
pub use config::{ConfigOverride, ConfigRegistry, ExtractionConfig, ExtractorSettings, DEFAULT_MODEL_ID};
pub use error::{BoxedCause, ExtractorError};
pub use extractor::ClauseExtractor;
pub use normalizer::{normalize, NormalizationWarning, Normalized};
pub use relationships::{build_relationships, PartyFinancialLinker, RelationshipStrategy};
pub use types::ExtractionRequest;
pub use visualization::VisualizationDocument;
