//! Extraction result - the value returned for one document

use crate::{Clause, ClauseType, DocumentType, Relationship};
use serde::{Deserialize, Serialize};

/// Schema version stamped on every result
pub const RESULT_VERSION: &str = "1.0";

/// Metadata about an extraction operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    /// Identifier of the model that produced the raw items
    pub model_used: String,

    /// Unix timestamp (seconds) when the result was assembled
    pub timestamp: u64,

    /// Number of raw items the model returned
    pub raw_extraction_count: usize,

    /// Raw items dropped during normalization
    pub skipped_items: usize,

    /// Extraction passes requested from the model
    pub extraction_passes: u32,

    /// Result schema version
    pub version: String,
}

/// Clauses and relationships extracted from one document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    /// Caller-supplied or generated document identifier
    pub document_id: String,

    /// Kind of document
    pub document_type: DocumentType,

    /// Clauses in order of appearance
    pub clauses: Vec<Clause>,

    /// Relationships in derivation order
    pub relationships: Vec<Relationship>,

    /// Aggregate confidence in [0, 1]
    pub confidence_score: f64,

    /// Wall-clock seconds spent on the extraction
    pub processing_time: f64,

    /// Provenance of the result
    pub metadata: ExtractionMetadata,
}

impl ExtractionResult {
    /// Look up a clause by id
    pub fn clause(&self, id: &str) -> Option<&Clause> {
        self.clauses.iter().find(|c| c.id == id)
    }

    /// Iterate over clauses of one type
    pub fn clauses_of_type(&self, clause_type: ClauseType) -> impl Iterator<Item = &Clause> {
        self.clauses.iter().filter(move |c| c.clause_type == clause_type)
    }
}
