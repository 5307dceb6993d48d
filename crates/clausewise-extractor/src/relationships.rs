//! Relationship builder
//!
//! The reference strategy links every party clause to every financial-terms
//! clause with a constant strength. Other scorers plug in through
//! [`RelationshipStrategy`].

use clausewise_domain::{Clause, ClauseType, Relationship, RelationshipType};

/// Strength given to every party-to-financial link
pub const PARTY_FINANCIAL_STRENGTH: f64 = 0.7;

/// Description given to every party-to-financial link
pub const PARTY_FINANCIAL_DESCRIPTION: &str = "Party clause linked to financial terms";

/// Derives relationships from a finished clause list
///
/// Implementations must only reference ids present in `clauses`.
pub trait RelationshipStrategy: Send + Sync {
    /// Build relationships, ids `rel_1..rel_n`
    fn build(&self, clauses: &[Clause]) -> Vec<Relationship>;
}

/// Cross product of party clauses and financial-terms clauses
#[derive(Debug, Clone, Copy, Default)]
pub struct PartyFinancialLinker;

impl RelationshipStrategy for PartyFinancialLinker {
    fn build(&self, clauses: &[Clause]) -> Vec<Relationship> {
        let of_type = |wanted: ClauseType| -> Vec<&Clause> {
            clauses.iter().filter(|c| c.clause_type == wanted).collect()
        };
        let parties = of_type(ClauseType::PartyIdentification);
        let financials = of_type(ClauseType::FinancialTerms);

        let mut relationships = Vec::with_capacity(parties.len() * financials.len());
        for party in &parties {
            for financial in &financials {
                relationships.push(Relationship::new(
                    Relationship::id_for(relationships.len() + 1),
                    RelationshipType::PartyToFinancial,
                    party.id.as_str(),
                    financial.id.as_str(),
                    PARTY_FINANCIAL_DESCRIPTION,
                    PARTY_FINANCIAL_STRENGTH,
                ));
            }
        }
        relationships
    }
}

/// Build relationships with the reference strategy
pub fn build_relationships(clauses: &[Clause]) -> Vec<Relationship> {
    PartyFinancialLinker.build(clauses)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausewise_domain::SourceLocation;

    fn clause(n: usize, clause_type: ClauseType) -> Clause {
        Clause {
            id: Clause::id_for(n),
            clause_type,
            text: format!("clause text {}", n),
            key_terms: vec![],
            obligations: vec![],
            rights: vec![],
            conditions: vec![],
            consequences: vec![],
            compliance_requirements: vec![],
            source_location: SourceLocation::default(),
            confidence: 0.8,
        }
    }

    #[test]
    fn test_cross_product_count_and_order() {
        let clauses = vec![
            clause(1, ClauseType::PartyIdentification),
            clause(2, ClauseType::FinancialTerms),
            clause(3, ClauseType::Termination),
            clause(4, ClauseType::PartyIdentification),
            clause(5, ClauseType::FinancialTerms),
            clause(6, ClauseType::PartyIdentification),
        ];

        let rels = build_relationships(&clauses);
        assert_eq!(rels.len(), 3 * 2);

        let pairs: Vec<_> = rels
            .iter()
            .map(|r| (r.source_clause_id.as_str(), r.target_clause_id.as_str()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("clause_1", "clause_2"),
                ("clause_1", "clause_5"),
                ("clause_4", "clause_2"),
                ("clause_4", "clause_5"),
                ("clause_6", "clause_2"),
                ("clause_6", "clause_5"),
            ]
        );
        for (i, rel) in rels.iter().enumerate() {
            assert_eq!(rel.id, format!("rel_{}", i + 1));
            assert_eq!(rel.relationship_type, RelationshipType::PartyToFinancial);
            assert_eq!(rel.strength, PARTY_FINANCIAL_STRENGTH);
            assert_eq!(rel.description, PARTY_FINANCIAL_DESCRIPTION);
        }
    }

    #[test]
    fn test_no_financial_clauses() {
        let clauses = vec![
            clause(1, ClauseType::PartyIdentification),
            clause(2, ClauseType::PartyIdentification),
        ];
        assert!(build_relationships(&clauses).is_empty());
        assert!(build_relationships(&[]).is_empty());
    }

    #[test]
    fn test_custom_strategy() {
        struct Nothing;
        impl RelationshipStrategy for Nothing {
            fn build(&self, _clauses: &[Clause]) -> Vec<Relationship> {
                Vec::new()
            }
        }

        let clauses = vec![
            clause(1, ClauseType::PartyIdentification),
            clause(2, ClauseType::FinancialTerms),
        ];
        let strategy: Box<dyn RelationshipStrategy> = Box::new(Nothing);
        assert!(strategy.build(&clauses).is_empty());
    }
}
