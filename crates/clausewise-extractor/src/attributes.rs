//! Typed clause attributes and the interpreters that read them
//!
//! The model's attribute map is parsed once into [`ClauseAttributes`]: known
//! fields get their own slot, everything else lands in `extra`. Interpreters
//! are pure functions returning `Result`; deciding what to do with an error is
//! left to the normalizer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// Result of one interpreter
pub type Interpretation = Result<Vec<String>, AttributeError>;

/// An attribute value had a shape the interpreter cannot use
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AttributeError {
    /// Wrong JSON shape (e.g. an object where a string was expected)
    #[error("attribute '{field}' has unexpected shape: {found}")]
    UnexpectedShape {
        /// Attribute name
        field: &'static str,
        /// What was found instead
        found: String,
    },

    /// Right shape, unusable content (e.g. "thirty" for a day count)
    #[error("attribute '{field}' is not a valid {expected}: {value}")]
    InvalidValue {
        /// Attribute name
        field: &'static str,
        /// What the interpreter expected
        expected: &'static str,
        /// Offending value
        value: String,
    },
}

/// Any non-null JSON value, split by shape
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    /// `true` / `false`
    Flag(bool),
    /// Any JSON number
    Number(f64),
    /// Any JSON string
    Text(String),
    /// Any JSON array
    List(Vec<Value>),
    /// Any JSON object
    Map(Map<String, Value>),
}

impl AttributeValue {
    fn shape(&self) -> &'static str {
        match self {
            AttributeValue::Flag(_) => "boolean",
            AttributeValue::Number(_) => "number",
            AttributeValue::Text(_) => "string",
            AttributeValue::List(_) => "array",
            AttributeValue::Map(_) => "object",
        }
    }

    /// Render a string or number; other shapes are errors
    fn scalar_text(&self, field: &'static str) -> Result<String, AttributeError> {
        match self {
            AttributeValue::Text(s) => Ok(s.trim().to_string()),
            AttributeValue::Number(n) => Ok(format_number(*n)),
            other => Err(AttributeError::UnexpectedShape {
                field,
                found: other.shape().to_string(),
            }),
        }
    }

    /// Read a yes/no flag from a boolean, 0/1, or a yes/no string
    fn flag(&self, field: &'static str) -> Result<bool, AttributeError> {
        match self {
            AttributeValue::Flag(b) => Ok(*b),
            AttributeValue::Number(n) if *n == 0.0 || *n == 1.0 => Ok(*n == 1.0),
            AttributeValue::Text(s) => parse_flag(s).ok_or_else(|| AttributeError::InvalidValue {
                field,
                expected: "yes/no flag",
                value: s.clone(),
            }),
            other => Err(AttributeError::UnexpectedShape {
                field,
                found: other.shape().to_string(),
            }),
        }
    }

    /// Read a whole number of days from a number or a string like "30 days"
    fn days(&self, field: &'static str) -> Result<u32, AttributeError> {
        let invalid = |value: String| AttributeError::InvalidValue {
            field,
            expected: "day count",
            value,
        };
        match self {
            AttributeValue::Number(n) if *n >= 0.0 && n.fract() == 0.0 && *n <= u32::MAX as f64 => {
                Ok(*n as u32)
            }
            AttributeValue::Number(n) => Err(invalid(format_number(*n))),
            AttributeValue::Text(s) => s
                .split_whitespace()
                .next()
                .and_then(|token| token.parse::<u32>().ok())
                .ok_or_else(|| invalid(s.clone())),
            other => Err(AttributeError::UnexpectedShape {
                field,
                found: other.shape().to_string(),
            }),
        }
    }
}

fn parse_flag(s: &str) -> Option<bool> {
    match s.trim().to_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Some(true),
        "false" | "no" | "n" | "0" => Some(false),
        _ => None,
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}

/// Attribute map of one clause, validated at the normalizer boundary
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClauseAttributes {
    /// Role of the party named by the clause (landlord, tenant, lender, ...)
    #[serde(default)]
    pub party_role: Option<AttributeValue>,

    /// Monthly rent amount
    #[serde(default)]
    pub monthly_rent: Option<AttributeValue>,

    /// Loan installment amount
    #[serde(default)]
    pub emi_amount: Option<AttributeValue>,

    /// Security deposit amount
    #[serde(default)]
    pub security_deposit: Option<AttributeValue>,

    /// Whether the deposit is refundable
    #[serde(default)]
    pub deposit_refundable: Option<AttributeValue>,

    /// Start of the term
    #[serde(default)]
    pub start_date: Option<AttributeValue>,

    /// End of the term
    #[serde(default)]
    pub end_date: Option<AttributeValue>,

    /// Dependency on another provision (flag or description)
    #[serde(default)]
    pub depends_on: Option<AttributeValue>,

    /// Required notice, in days
    #[serde(default)]
    pub notice_period_days: Option<AttributeValue>,

    /// Late payment penalty (flag or amount)
    #[serde(default)]
    pub late_payment_penalty: Option<AttributeValue>,

    /// Statutory or regulatory requirement
    #[serde(default)]
    pub legal_requirement: Option<AttributeValue>,

    /// Governing law
    #[serde(default)]
    pub governing_law: Option<AttributeValue>,

    /// Forum or jurisdiction
    #[serde(default)]
    pub jurisdiction: Option<AttributeValue>,

    /// Explicit key terms
    #[serde(default)]
    pub key_terms: Option<AttributeValue>,

    /// Everything else the model returned
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ClauseAttributes {
    /// Parse a raw attribute object
    ///
    /// Fails only when `value` is not a JSON object.
    pub fn from_value(value: Value) -> Result<Self, serde_json::Error> {
        serde_json::from_value(value)
    }
}

const PRIMARY_ROLES: &[&str] = &["landlord", "lessor", "lender", "service_provider", "provider", "owner"];
const COUNTER_ROLES: &[&str] = &["tenant", "lessee", "borrower", "user", "customer"];

enum Role {
    Primary(String),
    Counter(String),
    Other,
}

fn role(attrs: &ClauseAttributes) -> Result<Option<Role>, AttributeError> {
    let Some(value) = &attrs.party_role else {
        return Ok(None);
    };
    let AttributeValue::Text(raw) = value else {
        return Err(AttributeError::UnexpectedShape {
            field: "party_role",
            found: value.shape().to_string(),
        });
    };

    let normalized = crate::classifier::normalize_label(raw);
    let role = if PRIMARY_ROLES.contains(&normalized.as_str()) {
        Role::Primary(normalized)
    } else if COUNTER_ROLES.contains(&normalized.as_str()) {
        Role::Counter(normalized)
    } else {
        Role::Other
    };
    Ok(Some(role))
}

/// Duties derived from role markers and monetary fields
pub fn obligations(attrs: &ClauseAttributes) -> Interpretation {
    let mut out = Vec::new();

    match role(attrs)? {
        Some(Role::Primary(r)) => out.push(format!("Primary party obligations ({})", r)),
        Some(Role::Counter(r)) => out.push(format!("Counter-party obligations ({})", r)),
        Some(Role::Other) | None => {}
    }
    if let Some(rent) = &attrs.monthly_rent {
        out.push(format!("Pay monthly rent of {}", rent.scalar_text("monthly_rent")?));
    }
    if let Some(emi) = &attrs.emi_amount {
        out.push(format!("Pay EMI of {}", emi.scalar_text("emi_amount")?));
    }

    Ok(out)
}

/// Entitlements derived from role markers and deposit flags
pub fn rights(attrs: &ClauseAttributes) -> Interpretation {
    let mut out = Vec::new();

    match role(attrs)? {
        Some(Role::Primary(r)) => out.push(format!("Primary party rights ({})", r)),
        Some(Role::Counter(r)) => out.push(format!("Counter-party rights ({})", r)),
        Some(Role::Other) | None => {}
    }
    if let Some(refundable) = &attrs.deposit_refundable {
        if refundable.flag("deposit_refundable")? {
            out.push("Refund of security deposit".to_string());
        }
    }

    Ok(out)
}

/// Preconditions derived from dates and dependency markers
pub fn conditions(attrs: &ClauseAttributes) -> Interpretation {
    let mut out = Vec::new();

    if let Some(start) = &attrs.start_date {
        out.push(format!("Effective from {}", start.scalar_text("start_date")?));
    }
    if let Some(end) = &attrs.end_date {
        out.push(format!("Valid until {}", end.scalar_text("end_date")?));
    }
    match &attrs.depends_on {
        Some(AttributeValue::Flag(true)) => out.push("Conditional on other provisions".to_string()),
        Some(AttributeValue::Flag(false)) | None => {}
        Some(other) => out.push(format!("Subject to {}", other.scalar_text("depends_on")?)),
    }

    Ok(out)
}

/// Outcomes derived from notice periods and late-payment penalties
pub fn consequences(attrs: &ClauseAttributes) -> Interpretation {
    let mut out = Vec::new();

    if let Some(notice) = &attrs.notice_period_days {
        out.push(format!("{} days notice required", notice.days("notice_period_days")?));
    }
    if let Some(penalty) = &attrs.late_payment_penalty {
        let as_flag = match penalty {
            AttributeValue::Flag(b) => Some(*b),
            AttributeValue::Text(s) => parse_flag(s),
            _ => None,
        };
        match as_flag {
            Some(true) => out.push("Late payment penalty applies".to_string()),
            Some(false) => {}
            None => out.push(format!(
                "Late payment penalty: {}",
                penalty.scalar_text("late_payment_penalty")?
            )),
        }
    }

    Ok(out)
}

/// Legal requirements derived from law, jurisdiction and requirement fields
pub fn compliance_requirements(attrs: &ClauseAttributes) -> Interpretation {
    let mut out = Vec::new();

    let fields: [(&'static str, &Option<AttributeValue>, &str, &str); 3] = [
        ("legal_requirement", &attrs.legal_requirement, "Legal requirement", "Legal requirement applies"),
        ("governing_law", &attrs.governing_law, "Governed by", "Governing law specified"),
        ("jurisdiction", &attrs.jurisdiction, "Jurisdiction:", "Jurisdiction specified"),
    ];

    for (field, value, prefix, flagged) in fields {
        match value {
            None | Some(AttributeValue::Flag(false)) => {}
            Some(AttributeValue::Flag(true)) => out.push(flagged.to_string()),
            Some(other) => {
                let text = other.scalar_text(field)?;
                if field == "legal_requirement" {
                    out.push(format!("{}: {}", prefix, text));
                } else {
                    out.push(format!("{} {}", prefix, text));
                }
            }
        }
    }

    Ok(out)
}

/// Salient terms: an explicit `key_terms` list, else known amounts and dates
pub fn key_terms(attrs: &ClauseAttributes) -> Interpretation {
    match &attrs.key_terms {
        Some(AttributeValue::List(items)) => {
            return items
                .iter()
                .map(|item| match item {
                    Value::String(s) => Ok(s.trim().to_string()),
                    Value::Number(n) => Ok(n.to_string()),
                    other => Err(AttributeError::UnexpectedShape {
                        field: "key_terms",
                        found: other.to_string(),
                    }),
                })
                .filter(|term| !matches!(term, Ok(s) if s.is_empty()))
                .collect();
        }
        Some(AttributeValue::Text(s)) => {
            return Ok(s
                .split(',')
                .map(str::trim)
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect());
        }
        Some(other) => {
            return Err(AttributeError::UnexpectedShape {
                field: "key_terms",
                found: other.shape().to_string(),
            })
        }
        None => {}
    }

    let fields: [(&'static str, &Option<AttributeValue>); 5] = [
        ("monthly_rent", &attrs.monthly_rent),
        ("emi_amount", &attrs.emi_amount),
        ("security_deposit", &attrs.security_deposit),
        ("start_date", &attrs.start_date),
        ("end_date", &attrs.end_date),
    ];

    let mut out = Vec::new();
    for (field, value) in fields {
        if let Some(value) = value {
            out.push(value.scalar_text(field)?);
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> ClauseAttributes {
        ClauseAttributes::from_value(value).unwrap()
    }

    #[test]
    fn test_known_fields_and_extra_bag() {
        let parsed = attrs(json!({
            "party_role": "landlord",
            "monthly_rent": 1200,
            "name": "Robert Hale",
            "notice_period_days": null
        }));

        assert_eq!(parsed.party_role, Some(AttributeValue::Text("landlord".into())));
        assert_eq!(parsed.monthly_rent, Some(AttributeValue::Number(1200.0)));
        assert_eq!(parsed.notice_period_days, None);
        assert_eq!(parsed.extra.get("name"), Some(&json!("Robert Hale")));
    }

    #[test]
    fn test_non_object_attributes_rejected() {
        assert!(ClauseAttributes::from_value(json!("landlord")).is_err());
        assert!(ClauseAttributes::from_value(json!([1, 2])).is_err());
    }

    #[test]
    fn test_obligations_from_role_and_money() {
        let a = attrs(json!({"party_role": "Landlord", "monthly_rent": "$1,200"}));
        assert_eq!(
            obligations(&a).unwrap(),
            vec!["Primary party obligations (landlord)", "Pay monthly rent of $1,200"]
        );

        let b = attrs(json!({"party_role": "borrower", "emi_amount": 604.47}));
        assert_eq!(
            obligations(&b).unwrap(),
            vec!["Counter-party obligations (borrower)", "Pay EMI of 604.47"]
        );
    }

    #[test]
    fn test_obligations_reject_structured_role() {
        let a = attrs(json!({"party_role": {"name": "landlord"}}));
        assert!(matches!(
            obligations(&a),
            Err(AttributeError::UnexpectedShape { field: "party_role", .. })
        ));
    }

    #[test]
    fn test_rights_for_counter_party_and_deposit() {
        let a = attrs(json!({"party_role": "tenant", "deposit_refundable": "yes"}));
        assert_eq!(
            rights(&a).unwrap(),
            vec!["Counter-party rights (tenant)", "Refund of security deposit"]
        );

        let landlord = attrs(json!({"party_role": "landlord", "deposit_refundable": false}));
        assert_eq!(rights(&landlord).unwrap(), vec!["Primary party rights (landlord)"]);

        let witness = attrs(json!({"party_role": "witness"}));
        assert!(rights(&witness).unwrap().is_empty());
    }

    #[test]
    fn test_rights_invalid_flag() {
        let a = attrs(json!({"deposit_refundable": "sometimes"}));
        assert!(matches!(rights(&a), Err(AttributeError::InvalidValue { .. })));
    }

    #[test]
    fn test_conditions() {
        let a = attrs(json!({
            "start_date": "2024-03-01",
            "end_date": "2025-02-28",
            "depends_on": "receipt of deposit"
        }));
        assert_eq!(
            conditions(&a).unwrap(),
            vec![
                "Effective from 2024-03-01",
                "Valid until 2025-02-28",
                "Subject to receipt of deposit"
            ]
        );

        let flagged = attrs(json!({"depends_on": true}));
        assert_eq!(conditions(&flagged).unwrap(), vec!["Conditional on other provisions"]);
    }

    #[test]
    fn test_consequences() {
        let a = attrs(json!({"notice_period_days": "60 days", "late_payment_penalty": true}));
        assert_eq!(
            consequences(&a).unwrap(),
            vec!["60 days notice required", "Late payment penalty applies"]
        );

        let amount = attrs(json!({"late_payment_penalty": "$50"}));
        assert_eq!(consequences(&amount).unwrap(), vec!["Late payment penalty: $50"]);
    }

    #[test]
    fn test_consequences_invalid_days() {
        let a = attrs(json!({"notice_period_days": "thirty"}));
        assert_eq!(
            consequences(&a),
            Err(AttributeError::InvalidValue {
                field: "notice_period_days",
                expected: "day count",
                value: "thirty".to_string(),
            })
        );

        let negative = attrs(json!({"notice_period_days": -5}));
        assert!(consequences(&negative).is_err());
    }

    #[test]
    fn test_compliance_requirements() {
        let a = attrs(json!({
            "legal_requirement": "GDPR",
            "governing_law": "State of Oregon",
            "jurisdiction": true
        }));
        assert_eq!(
            compliance_requirements(&a).unwrap(),
            vec![
                "Legal requirement: GDPR",
                "Governed by State of Oregon",
                "Jurisdiction specified"
            ]
        );
    }

    #[test]
    fn test_key_terms_explicit_and_derived() {
        let explicit = attrs(json!({"key_terms": ["rent", " $1,200 ", ""]}));
        assert_eq!(key_terms(&explicit).unwrap(), vec!["rent", "$1,200"]);

        let csv = attrs(json!({"key_terms": "rent, deposit"}));
        assert_eq!(key_terms(&csv).unwrap(), vec!["rent", "deposit"]);

        let derived = attrs(json!({"monthly_rent": 1200, "start_date": "2024-03-01"}));
        assert_eq!(key_terms(&derived).unwrap(), vec!["1200", "2024-03-01"]);
    }

    #[test]
    fn test_empty_attributes_yield_empty_lists() {
        let empty = ClauseAttributes::default();
        assert!(obligations(&empty).unwrap().is_empty());
        assert!(rights(&empty).unwrap().is_empty());
        assert!(conditions(&empty).unwrap().is_empty());
        assert!(consequences(&empty).unwrap().is_empty());
        assert!(compliance_requirements(&empty).unwrap().is_empty());
        assert!(key_terms(&empty).unwrap().is_empty());
    }
}
