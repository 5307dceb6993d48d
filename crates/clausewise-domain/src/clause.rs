//! Clause module - the fundamental unit of an extraction result

use serde::{Deserialize, Serialize};
use std::fmt;

/// Closed taxonomy of legal clause types
///
/// Every clause carries exactly one of these. Labels the model invents are
/// folded into this set by the classifier in `clausewise-extractor`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClauseType {
    /// Names a party to the agreement (lessor, lender, user, ...)
    PartyIdentification,

    /// Describes the rented property
    PropertyDescription,

    /// Describes the loan product (principal, purpose)
    LoanDescription,

    /// Describes the service offered under terms of service
    ServiceDescription,

    /// Rent, EMI, fees, deposits, interest
    FinancialTerms,

    /// Term, tenure, start and end dates
    Duration,

    /// Upkeep and repair responsibilities
    Maintenance,

    /// How and when the agreement ends
    Termination,

    /// Governing law, jurisdiction, regulatory duties, dispute resolution
    Compliance,

    /// Collateral, guarantees, security deposits held as security
    Security,

    /// Events of default and remedies
    DefaultProvisions,

    /// Limitation of liability, indemnities, warranties
    Liability,

    /// Acceptable use and other duties placed on the user
    UserObligations,
}

impl ClauseType {
    /// All clause types in declaration order
    pub const ALL: [ClauseType; 13] = [
        ClauseType::PartyIdentification,
        ClauseType::PropertyDescription,
        ClauseType::LoanDescription,
        ClauseType::ServiceDescription,
        ClauseType::FinancialTerms,
        ClauseType::Duration,
        ClauseType::Maintenance,
        ClauseType::Termination,
        ClauseType::Compliance,
        ClauseType::Security,
        ClauseType::DefaultProvisions,
        ClauseType::Liability,
        ClauseType::UserObligations,
    ];

    /// Get the clause type name as it appears in JSON
    pub fn as_str(&self) -> &'static str {
        match self {
            ClauseType::PartyIdentification => "party_identification",
            ClauseType::PropertyDescription => "property_description",
            ClauseType::LoanDescription => "loan_description",
            ClauseType::ServiceDescription => "service_description",
            ClauseType::FinancialTerms => "financial_terms",
            ClauseType::Duration => "duration",
            ClauseType::Maintenance => "maintenance",
            ClauseType::Termination => "termination",
            ClauseType::Compliance => "compliance",
            ClauseType::Security => "security",
            ClauseType::DefaultProvisions => "default_provisions",
            ClauseType::Liability => "liability",
            ClauseType::UserObligations => "user_obligations",
        }
    }
}

impl fmt::Display for ClauseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Character span in the source text that grounds a clause
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceLocation {
    /// Start offset (inclusive), in characters
    pub start: usize,

    /// End offset (exclusive), in characters
    pub end: usize,
}

impl SourceLocation {
    /// Create a new span
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Length of the span in characters
    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// True when the model gave no grounding (the `{0,0}` default)
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A clause extracted from a legal document
///
/// Clauses are immutable once built by the normalizer; the `id` is unique and
/// dense within one extraction result (`clause_1`, `clause_2`, ...).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Clause {
    /// Sequential identifier, `clause_<n>`
    pub id: String,

    /// Classified clause type
    #[serde(rename = "type")]
    pub clause_type: ClauseType,

    /// Verbatim text span
    pub text: String,

    /// Salient terms (amounts, dates, names)
    pub key_terms: Vec<String>,

    /// Duties imposed by the clause
    pub obligations: Vec<String>,

    /// Entitlements granted by the clause
    pub rights: Vec<String>,

    /// Preconditions and temporal bounds
    pub conditions: Vec<String>,

    /// What follows from breach or notice
    pub consequences: Vec<String>,

    /// Legal and regulatory requirements
    pub compliance_requirements: Vec<String>,

    /// Grounding span in the source text
    pub source_location: SourceLocation,

    /// Extraction confidence in [0, 1]
    pub confidence: f64,
}

impl Clause {
    /// Format the clause id for the given 1-based position
    pub fn id_for(position: usize) -> String {
        format!("clause_{}", position)
    }
}
