//! Document assembly
//!
//! [`assemble`] always runs and produces the [`ExtractionResult`].
//! [`structure`] wraps a result in a per-type template on request. Template
//! fields are placeholders: nothing maps clauses into them yet, only
//! `extracted_clauses` and `clause_relationships` are filled.

use crate::confidence;
use clausewise_domain::{
    Clause, DocumentType, ExtractionMetadata, ExtractionResult, Relationship, RESULT_VERSION,
};
use serde::{Deserialize, Serialize};
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Facts about the call that the assembler cannot see in the clauses
#[derive(Debug, Clone, PartialEq)]
pub struct AssemblyContext {
    /// Id for the result
    pub document_id: String,
    /// Resolved document type
    pub document_type: DocumentType,
    /// Model identifier that was called
    pub model_used: String,
    /// Configured pass count
    pub extraction_passes: u32,
    /// Items in the raw batch
    pub raw_extraction_count: usize,
    /// Items the normalizer skipped
    pub skipped_items: usize,
}

/// Build the result value
pub fn assemble(
    ctx: AssemblyContext,
    clauses: Vec<Clause>,
    relationships: Vec<Relationship>,
    elapsed: Duration,
) -> ExtractionResult {
    let timestamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);

    ExtractionResult {
        document_id: ctx.document_id,
        document_type: ctx.document_type,
        confidence_score: confidence::aggregate(&clauses),
        clauses,
        relationships,
        processing_time: elapsed.as_secs_f64(),
        metadata: ExtractionMetadata {
            model_used: ctx.model_used,
            timestamp,
            raw_extraction_count: ctx.raw_extraction_count,
            skipped_items: ctx.skipped_items,
            extraction_passes: ctx.extraction_passes,
            version: RESULT_VERSION.to_string(),
        },
    }
}

/// Result wrapped in a document-type template
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuredDocument {
    /// Id of the wrapped result
    pub document_id: String,
    /// Document type of the wrapped result
    pub document_type: DocumentType,
    /// Aggregate confidence of the wrapped result
    pub confidence_score: f64,
    /// Metadata of the wrapped result
    pub metadata: ExtractionMetadata,
    /// Per-type schema, unpopulated
    pub template: DocumentTemplate,
    /// All clauses of the result
    pub extracted_clauses: Vec<Clause>,
    /// All relationships of the result
    pub clause_relationships: Vec<Relationship>,
}

/// Per-type document schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "template", rename_all = "snake_case")]
#[allow(missing_docs)]
pub enum DocumentTemplate {
    RentalAgreement {
        parties: RentalParties,
        property: PropertyDetails,
        lease_terms: LeaseTerms,
    },
    LoanAgreement {
        parties: LoanParties,
        loan_terms: LoanTerms,
        collateral: Option<String>,
        default_provisions: Option<String>,
    },
    TermsOfService {
        service_provider: Option<String>,
        service_description: Option<String>,
        user_obligations: Option<Vec<String>>,
        liability_cap: Option<String>,
        governing_law: Option<String>,
    },
}

impl DocumentTemplate {
    /// Empty template for a document type
    pub fn empty(document_type: DocumentType) -> Self {
        match document_type {
            DocumentType::Rental => DocumentTemplate::RentalAgreement {
                parties: RentalParties::default(),
                property: PropertyDetails::default(),
                lease_terms: LeaseTerms::default(),
            },
            DocumentType::Loan => DocumentTemplate::LoanAgreement {
                parties: LoanParties::default(),
                loan_terms: LoanTerms::default(),
                collateral: None,
                default_provisions: None,
            },
            DocumentType::Tos => DocumentTemplate::TermsOfService {
                service_provider: None,
                service_description: None,
                user_obligations: None,
                liability_cap: None,
                governing_law: None,
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct RentalParties {
    pub lessor: Option<String>,
    pub lessee: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct PropertyDetails {
    pub address: Option<String>,
    pub property_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct LeaseTerms {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub monthly_rent: Option<String>,
    pub security_deposit: Option<String>,
    pub notice_period_days: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct LoanParties {
    pub lender: Option<String>,
    pub borrower: Option<String>,
    pub guarantor: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[allow(missing_docs)]
pub struct LoanTerms {
    pub principal: Option<String>,
    pub interest_rate: Option<String>,
    pub emi_amount: Option<String>,
    pub tenure_months: Option<u32>,
}

/// Wrap a result in the template for its document type
pub fn structure(result: &ExtractionResult) -> StructuredDocument {
    StructuredDocument {
        document_id: result.document_id.clone(),
        document_type: result.document_type,
        confidence_score: result.confidence_score,
        metadata: result.metadata.clone(),
        template: DocumentTemplate::empty(result.document_type),
        extracted_clauses: result.clauses.clone(),
        clause_relationships: result.relationships.clone(),
    }
}
