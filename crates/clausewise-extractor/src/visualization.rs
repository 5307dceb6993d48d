//! Trimmed projection of a result for visual rendering

use clausewise_domain::{
    ClauseType, DocumentType, ExtractionResult, RelationshipType, SourceLocation,
};
use serde::{Deserialize, Serialize};

/// Longest clause text kept, in characters
pub const MAX_TEXT_CHARS: usize = 100;
/// Key terms kept per clause
pub const MAX_KEY_TERMS: usize = 3;
/// Obligations kept per clause
pub const MAX_OBLIGATIONS: usize = 2;
/// Rights kept per clause
pub const MAX_RIGHTS: usize = 2;

/// Visualization view of a whole result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationDocument {
    /// Id of the projected result
    pub document_id: String,
    /// Document type of the projected result
    pub document_type: DocumentType,
    /// Aggregate confidence
    pub confidence_score: f64,
    /// Trimmed clauses
    pub clauses: Vec<ClauseView>,
    /// Relationships, renamed endpoints
    pub relationships: Vec<RelationshipView>,
}

/// Trimmed clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct ClauseView {
    pub id: String,
    #[serde(rename = "type")]
    pub clause_type: ClauseType,
    pub text: String,
    pub confidence: f64,
    pub key_terms: Vec<String>,
    pub obligations: Vec<String>,
    pub rights: Vec<String>,
    pub source_location: SourceLocation,
}

/// Relationship with short endpoint names
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct RelationshipView {
    pub id: String,
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,
    pub source: String,
    pub target: String,
    pub description: String,
    pub strength: f64,
}

impl From<&ExtractionResult> for VisualizationDocument {
    fn from(result: &ExtractionResult) -> Self {
        let clauses = result
            .clauses
            .iter()
            .map(|c| ClauseView {
                id: c.id.clone(),
                clause_type: c.clause_type,
                text: truncate_chars(&c.text, MAX_TEXT_CHARS),
                confidence: c.confidence,
                key_terms: c.key_terms.iter().take(MAX_KEY_TERMS).cloned().collect(),
                obligations: c.obligations.iter().take(MAX_OBLIGATIONS).cloned().collect(),
                rights: c.rights.iter().take(MAX_RIGHTS).cloned().collect(),
                source_location: c.source_location,
            })
            .collect();

        let relationships = result
            .relationships
            .iter()
            .map(|r| RelationshipView {
                id: r.id.clone(),
                relationship_type: r.relationship_type,
                source: r.source_clause_id.clone(),
                target: r.target_clause_id.clone(),
                description: r.description.clone(),
                strength: r.strength,
            })
            .collect();

        Self {
            document_id: result.document_id.clone(),
            document_type: result.document_type,
            confidence_score: result.confidence_score,
            clauses,
            relationships,
        }
    }
}

impl VisualizationDocument {
    /// Pretty JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((byte_idx, _)) => text[..byte_idx].to_string(),
        None => text.to_string(),
    }
}
