//! Turn raw model items into typed clauses
//!
//! Each raw item is parsed on its own. A malformed item becomes a
//! [`NormalizationWarning`] and is skipped; the rest of the batch still
//! produces clauses. This is also the single place where interpreter errors
//! are logged and replaced by empty lists.

use crate::attributes::{self, ClauseAttributes, Interpretation};
use crate::classifier;
use clausewise_domain::{confidence, Clause, RawExtractionBatch, SourceLocation, DEFAULT_CONFIDENCE};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

/// A raw item that could not be turned into a clause
#[derive(Debug, Clone, PartialEq, Error)]
#[error("raw item {index} skipped: {reason}")]
pub struct NormalizationWarning {
    /// Position of the item in the raw batch
    pub index: usize,

    /// What was wrong with it
    pub reason: String,
}

/// Output of [`normalize`]
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
    /// Clauses in raw item order, ids `clause_1..clause_n`
    pub clauses: Vec<Clause>,

    /// One entry per skipped item
    pub warnings: Vec<NormalizationWarning>,
}

/// Normalize a raw batch
pub fn normalize(batch: &RawExtractionBatch) -> Normalized {
    let mut normalized = Normalized::default();

    for (index, item) in batch.extractions.iter().enumerate() {
        let id = Clause::id_for(normalized.clauses.len() + 1);
        match parse_item(item, id) {
            Ok(clause) => normalized.clauses.push(clause),
            Err(reason) => {
                let warning = NormalizationWarning { index, reason };
                warn!("{}", warning);
                normalized.warnings.push(warning);
            }
        }
    }

    normalized
}

/// Parse a single raw item
fn parse_item(item: &Value, id: String) -> Result<Clause, String> {
    let obj = item
        .as_object()
        .ok_or_else(|| "item is not a JSON object".to_string())?;

    let text = obj
        .get("extraction_text")
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .ok_or_else(|| "missing or blank 'extraction_text'".to_string())?
        .to_string();

    let label = obj
        .get("extraction_class")
        .and_then(Value::as_str)
        .unwrap_or_default();
    let clause_type = classifier::classify(label);

    let attrs = match obj.get("attributes") {
        None | Some(Value::Null) => ClauseAttributes::default(),
        Some(value @ Value::Object(_)) => ClauseAttributes::from_value(value.clone())
            .map_err(|e| format!("invalid 'attributes': {}", e))?,
        Some(other) => return Err(format!("'attributes' is not an object: {}", other)),
    };

    let confidence = match obj.get("confidence") {
        None | Some(Value::Null) => DEFAULT_CONFIDENCE,
        Some(value) => value
            .as_f64()
            .filter(|c| confidence::is_valid(*c))
            .ok_or_else(|| format!("'confidence' is not a number in [0, 1]: {}", value))?,
    };

    let source_location = source_location(obj)?;

    Ok(Clause {
        key_terms: interpret(&id, "key_terms", attributes::key_terms(&attrs)),
        obligations: interpret(&id, "obligations", attributes::obligations(&attrs)),
        rights: interpret(&id, "rights", attributes::rights(&attrs)),
        conditions: interpret(&id, "conditions", attributes::conditions(&attrs)),
        consequences: interpret(&id, "consequences", attributes::consequences(&attrs)),
        compliance_requirements: interpret(
            &id,
            "compliance_requirements",
            attributes::compliance_requirements(&attrs),
        ),
        id,
        clause_type,
        text,
        source_location,
        confidence,
    })
}

/// Read offsets from `char_interval` or `source_location`
fn source_location(obj: &Map<String, Value>) -> Result<SourceLocation, String> {
    let (field, start_key, end_key) = if obj.contains_key("char_interval") {
        ("char_interval", "start_pos", "end_pos")
    } else if obj.contains_key("source_location") {
        ("source_location", "start", "end")
    } else {
        return Ok(SourceLocation::default());
    };

    let interval = match obj.get(field) {
        None | Some(Value::Null) => return Ok(SourceLocation::default()),
        Some(Value::Object(map)) => map,
        Some(other) => return Err(format!("'{}' is not an object: {}", field, other)),
    };

    let offset = |key: &str| -> Result<usize, String> {
        match interval.get(key) {
            None | Some(Value::Null) => Ok(0),
            Some(value) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .ok_or_else(|| format!("'{}.{}' is not a non-negative integer: {}", field, key, value)),
        }
    };

    let start = offset(start_key)?;
    let end = offset(end_key)?;
    if start > end {
        return Err(format!("'{}' starts after it ends ({} > {})", field, start, end));
    }

    Ok(SourceLocation::new(start, end))
}

/// Log an interpreter failure and fall back to an empty list
fn interpret(clause_id: &str, interpreter: &str, result: Interpretation) -> Vec<String> {
    result.unwrap_or_else(|e| {
        warn!("{} interpreter failed for {}: {}", interpreter, clause_id, e);
        Vec::new()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausewise_domain::ClauseType;
    use serde_json::json;

    fn batch(items: Vec<Value>) -> RawExtractionBatch {
        RawExtractionBatch::new(items)
    }

    #[test]
    fn test_well_formed_item() {
        let out = normalize(&batch(vec![json!({
            "extraction_class": "financial_terms",
            "extraction_text": "$1,200 monthly rent",
            "attributes": {"monthly_rent": "$1,200"},
            "char_interval": {"start_pos": 40, "end_pos": 59},
            "confidence": 0.93
        })]));

        assert!(out.warnings.is_empty());
        let clause = &out.clauses[0];
        assert_eq!(clause.id, "clause_1");
        assert_eq!(clause.clause_type, ClauseType::FinancialTerms);
        assert_eq!(clause.text, "$1,200 monthly rent");
        assert_eq!(clause.source_location, SourceLocation::new(40, 59));
        assert_eq!(clause.confidence, 0.93);
        assert_eq!(clause.obligations, vec!["Pay monthly rent of $1,200"]);
        assert_eq!(clause.key_terms, vec!["$1,200"]);
    }

    #[test]
    fn test_defaults_for_missing_fields() {
        let out = normalize(&batch(vec![json!({"extraction_text": "the Landlord"})]));

        let clause = &out.clauses[0];
        assert_eq!(clause.clause_type, ClauseType::PartyIdentification);
        assert_eq!(clause.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(clause.source_location, SourceLocation::default());
        assert!(clause.obligations.is_empty());
    }

    #[test]
    fn test_source_location_alias() {
        let out = normalize(&batch(vec![json!({
            "extraction_text": "the Tenant",
            "source_location": {"start": 3, "end": 13}
        })]));
        assert_eq!(out.clauses[0].source_location, SourceLocation::new(3, 13));
    }

    #[test]
    fn test_text_kept_verbatim() {
        let out = normalize(&batch(vec![json!({
            "extraction_text": "  the Landlord\n",
            "char_interval": {"start_pos": 0, "end_pos": 15}
        })]));

        let clause = &out.clauses[0];
        assert_eq!(clause.text, "  the Landlord\n");
        let span = clause.source_location.end - clause.source_location.start;
        assert_eq!(clause.text.chars().count(), span);
    }

    #[test]
    fn test_one_malformed_item_is_skipped() {
        let out = normalize(&batch(vec![
            json!({"extraction_class": "party_lessor", "extraction_text": "the Landlord"}),
            json!({"extraction_class": "financial_terms", "extraction_text": "   "}),
            json!({"extraction_class": "party_lessee", "extraction_text": "the Tenant"}),
        ]));

        assert_eq!(out.clauses.len(), 2);
        assert_eq!(out.warnings.len(), 1);
        assert_eq!(out.warnings[0].index, 1);
        let ids: Vec<_> = out.clauses.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["clause_1", "clause_2"]);
    }

    #[test]
    fn test_malformed_shapes() {
        let cases = vec![
            json!("just a string"),
            json!({"extraction_class": "rent"}),
            json!({"extraction_text": 42}),
            json!({"extraction_text": "x", "attributes": "landlord"}),
            json!({"extraction_text": "x", "confidence": 1.5}),
            json!({"extraction_text": "x", "confidence": "high"}),
            json!({"extraction_text": "x", "char_interval": {"start_pos": -1, "end_pos": 4}}),
            json!({"extraction_text": "x", "char_interval": {"start_pos": 9, "end_pos": 4}}),
            json!({"extraction_text": "x", "char_interval": [0, 4]}),
        ];

        for case in cases {
            let out = normalize(&batch(vec![case.clone()]));
            assert!(out.clauses.is_empty(), "expected {} to be skipped", case);
            assert_eq!(out.warnings.len(), 1);
        }
    }

    #[test]
    fn test_bad_attribute_does_not_drop_clause() {
        let out = normalize(&batch(vec![json!({
            "extraction_class": "termination",
            "extraction_text": "thirty days written notice",
            "attributes": {"notice_period_days": "thirty", "governing_law": "Oregon"}
        })]));

        assert!(out.warnings.is_empty());
        let clause = &out.clauses[0];
        assert!(clause.consequences.is_empty());
        assert_eq!(clause.compliance_requirements, vec!["Governed by Oregon"]);
    }

    #[test]
    fn test_unknown_label_uses_default_type() {
        let out = normalize(&batch(vec![json!({
            "extraction_class": "force_majeure",
            "extraction_text": "acts of God"
        })]));
        assert_eq!(out.clauses[0].clause_type, classifier::DEFAULT_CLAUSE_TYPE);
    }

    #[test]
    fn test_empty_batch() {
        let out = normalize(&RawExtractionBatch::default());
        assert!(out.clauses.is_empty());
        assert!(out.warnings.is_empty());
    }
}
