//! Document-level confidence

use clausewise_domain::{confidence, Clause, DEFAULT_CONFIDENCE};

/// Mean clause confidence, or [`DEFAULT_CONFIDENCE`] for an empty list
pub fn aggregate(clauses: &[Clause]) -> f64 {
    if clauses.is_empty() {
        return DEFAULT_CONFIDENCE;
    }
    let sum: f64 = clauses.iter().map(|c| c.confidence).sum();
    confidence::clamp(sum / clauses.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausewise_domain::{ClauseType, SourceLocation};
    use proptest::prelude::*;

    fn with_confidence(confidence: f64) -> Clause {
        Clause {
            id: Clause::id_for(1),
            clause_type: ClauseType::Compliance,
            text: "governed by Oregon law".to_string(),
            key_terms: vec![],
            obligations: vec![],
            rights: vec![],
            conditions: vec![],
            consequences: vec![],
            compliance_requirements: vec![],
            source_location: SourceLocation::default(),
            confidence,
        }
    }

    #[test]
    fn test_empty_uses_default() {
        assert_eq!(aggregate(&[]), DEFAULT_CONFIDENCE);
    }

    #[test]
    fn test_mean() {
        let clauses = vec![with_confidence(0.9), with_confidence(0.5), with_confidence(0.7)];
        assert!((aggregate(&clauses) - 0.7).abs() < 1e-9);
    }

    proptest! {
        #[test]
        fn prop_aggregate_is_bounded(values in prop::collection::vec(0.0f64..=1.0, 0..50)) {
            let clauses: Vec<_> = values.into_iter().map(with_confidence).collect();
            let score = aggregate(&clauses);
            prop_assert!((0.0..=1.0).contains(&score));
        }
    }
}
