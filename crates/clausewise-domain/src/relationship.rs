//! Relationship module - directed links between clauses

use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of relationship between clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipType {
    /// A party clause bound by a financial-terms clause
    PartyToFinancial,
}

impl RelationshipType {
    /// Get the relationship type name as it appears in JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            RelationshipType::PartyToFinancial => "party_to_financial",
        }
    }
}

impl fmt::Display for RelationshipType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A pairwise relationship between two clauses of the same result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Relationship {
    /// Sequential identifier, `rel_<n>`
    pub id: String,

    /// Type of relationship
    #[serde(rename = "type")]
    pub relationship_type: RelationshipType,

    /// Source clause id
    pub source_clause_id: String,

    /// Target clause id
    pub target_clause_id: String,

    /// Human-readable description
    pub description: String,

    /// Strength of relationship [0.0, 1.0]
    pub strength: f64,
}

impl Relationship {
    /// Create a new relationship; strength is clamped into [0, 1]
    pub fn new(
        id: impl Into<String>,
        relationship_type: RelationshipType,
        source_clause_id: impl Into<String>,
        target_clause_id: impl Into<String>,
        description: impl Into<String>,
        strength: f64,
    ) -> Self {
        Self {
            id: id.into(),
            relationship_type,
            source_clause_id: source_clause_id.into(),
            target_clause_id: target_clause_id.into(),
            description: description.into(),
            strength: crate::confidence::clamp(strength),
        }
    }

    /// Format the relationship id for the given 1-based position
    pub fn id_for(position: usize) -> String {
        format!("rel_{}", position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relationship_serialization() {
        let rel = Relationship::new(
            Relationship::id_for(1),
            RelationshipType::PartyToFinancial,
            "clause_1",
            "clause_3",
            "Party bound by financial terms",
            0.7,
        );

        let value = serde_json::to_value(&rel).unwrap();
        assert_eq!(value["id"], "rel_1");
        assert_eq!(value["type"], "party_to_financial");
        assert_eq!(value["source_clause_id"], "clause_1");
        assert_eq!(value["target_clause_id"], "clause_3");
        assert_eq!(value["strength"], 0.7);
    }

    #[test]
    fn test_strength_is_clamped() {
        let rel = Relationship::new("rel_1", RelationshipType::PartyToFinancial, "a", "b", "", 1.7);
        assert_eq!(rel.strength, 1.0);
    }
}
