//! Map free-form model labels onto the closed clause taxonomy

use clausewise_domain::ClauseType;

/// Type assigned to any label missing from [`CLAUSE_LABELS`]
///
/// Unknown labels are folded into party identification rather than an
/// "unknown" bucket, which means an unrecognized label can create spurious
/// party-to-financial relationships.
pub const DEFAULT_CLAUSE_TYPE: ClauseType = ClauseType::PartyIdentification;

/// Lookup table from normalized model labels to clause types
pub const CLAUSE_LABELS: &[(&str, ClauseType)] = &[
    // Parties
    ("party", ClauseType::PartyIdentification),
    ("parties", ClauseType::PartyIdentification),
    ("party_identification", ClauseType::PartyIdentification),
    ("party_lessor", ClauseType::PartyIdentification),
    ("party_lessee", ClauseType::PartyIdentification),
    ("party_landlord", ClauseType::PartyIdentification),
    ("party_tenant", ClauseType::PartyIdentification),
    ("party_lender", ClauseType::PartyIdentification),
    ("party_borrower", ClauseType::PartyIdentification),
    ("party_guarantor", ClauseType::PartyIdentification),
    ("party_service_provider", ClauseType::PartyIdentification),
    ("party_user", ClauseType::PartyIdentification),
    // Subject matter
    ("property", ClauseType::PropertyDescription),
    ("premises", ClauseType::PropertyDescription),
    ("property_description", ClauseType::PropertyDescription),
    ("loan_description", ClauseType::LoanDescription),
    ("loan_amount", ClauseType::LoanDescription),
    ("loan_purpose", ClauseType::LoanDescription),
    ("service", ClauseType::ServiceDescription),
    ("service_description", ClauseType::ServiceDescription),
    // Money
    ("financial_terms", ClauseType::FinancialTerms),
    ("rent", ClauseType::FinancialTerms),
    ("rent_amount", ClauseType::FinancialTerms),
    ("payment_terms", ClauseType::FinancialTerms),
    ("interest_structure", ClauseType::FinancialTerms),
    ("interest_rate", ClauseType::FinancialTerms),
    ("repayment_terms", ClauseType::FinancialTerms),
    ("emi", ClauseType::FinancialTerms),
    ("fees", ClauseType::FinancialTerms),
    ("late_fee", ClauseType::FinancialTerms),
    ("prepayment", ClauseType::FinancialTerms),
    // Time
    ("duration", ClauseType::Duration),
    ("term", ClauseType::Duration),
    ("lease_duration", ClauseType::Duration),
    ("lease_term", ClauseType::Duration),
    ("loan_tenure", ClauseType::Duration),
    ("tenure", ClauseType::Duration),
    // Upkeep
    ("maintenance", ClauseType::Maintenance),
    ("repairs", ClauseType::Maintenance),
    ("utilities", ClauseType::Maintenance),
    // Ending
    ("termination", ClauseType::Termination),
    ("termination_clause", ClauseType::Termination),
    ("notice_period", ClauseType::Termination),
    ("account_termination", ClauseType::Termination),
    // Law
    ("compliance", ClauseType::Compliance),
    ("governing_law", ClauseType::Compliance),
    ("jurisdiction", ClauseType::Compliance),
    ("dispute_resolution", ClauseType::Compliance),
    ("legal_requirement", ClauseType::Compliance),
    ("data_privacy", ClauseType::Compliance),
    ("privacy", ClauseType::Compliance),
    // Security
    ("security", ClauseType::Security),
    ("security_deposit", ClauseType::Security),
    ("collateral", ClauseType::Security),
    ("guarantee", ClauseType::Security),
    // Default
    ("default", ClauseType::DefaultProvisions),
    ("default_provisions", ClauseType::DefaultProvisions),
    ("events_of_default", ClauseType::DefaultProvisions),
    // Liability
    ("liability", ClauseType::Liability),
    ("liability_limitation", ClauseType::Liability),
    ("indemnification", ClauseType::Liability),
    ("warranty_disclaimer", ClauseType::Liability),
    // User duties
    ("user_obligations", ClauseType::UserObligations),
    ("acceptable_use", ClauseType::UserObligations),
    ("user_conduct", ClauseType::UserObligations),
];

/// Normalize a label: trim, lowercase, spaces and hyphens to underscores
pub fn normalize_label(label: &str) -> String {
    label
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '-' { '_' } else { c })
        .collect()
}

/// Look up a label, returning `None` when it is not in the table
pub fn lookup(label: &str) -> Option<ClauseType> {
    let normalized = normalize_label(label);
    CLAUSE_LABELS
        .iter()
        .find(|(known, _)| *known == normalized)
        .map(|(_, clause_type)| *clause_type)
}

/// Classify a label; unknown labels get [`DEFAULT_CLAUSE_TYPE`]
pub fn classify(label: &str) -> ClauseType {
    lookup(label).unwrap_or(DEFAULT_CLAUSE_TYPE)
}

/// True when the label has its own table entry
pub fn is_known_label(label: &str) -> bool {
    lookup(label).is_some()
}
