//! Request types for extraction

/// Request to extract clauses from one document
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractionRequest {
    /// Plain document text
    pub text: String,

    /// Document type name (`rental`, `loan`, `tos`), resolved against the registry
    pub document_type: String,

    /// Caller-supplied document id; a UUIDv7 is generated when absent
    pub document_id: Option<String>,
}

impl ExtractionRequest {
    /// Request without a document id
    pub fn new(text: impl Into<String>, document_type: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            document_type: document_type.into(),
            document_id: None,
        }
    }

    /// Set the document id
    pub fn with_document_id(mut self, document_id: impl Into<String>) -> Self {
        self.document_id = Some(document_id.into());
        self
    }
}
