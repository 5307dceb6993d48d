//! Document types the pipeline knows how to read

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Kind of legal document being extracted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentType {
    /// Residential or commercial rental agreement
    Rental,

    /// Loan agreement
    Loan,

    /// Terms of service
    Tos,
}

impl DocumentType {
    /// All document types in declaration order
    pub const ALL: [DocumentType; 3] = [DocumentType::Rental, DocumentType::Loan, DocumentType::Tos];

    /// Get the document type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::Rental => "rental",
            DocumentType::Loan => "loan",
            DocumentType::Tos => "tos",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string names no known document type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseDocumentTypeError(pub String);

impl fmt::Display for ParseDocumentTypeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "unsupported document type '{}' (expected one of: rental, loan, tos)",
            self.0
        )
    }
}

impl std::error::Error for ParseDocumentTypeError {}

impl FromStr for DocumentType {
    type Err = ParseDocumentTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "rental" => Ok(DocumentType::Rental),
            "loan" => Ok(DocumentType::Loan),
            "tos" => Ok(DocumentType::Tos),
            _ => Err(ParseDocumentTypeError(s.to_string())),
        }
    }
}
