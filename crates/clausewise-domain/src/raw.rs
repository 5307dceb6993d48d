//! Raw model contract: what goes into and comes out of the extraction model
//!
//! Raw items are kept as untyped JSON on purpose. The model is free to return
//! anything, and the normalizer decides item by item what is usable.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Loosely-typed output of one extraction call
///
/// Each item is expected (but not guaranteed) to look like:
///
/// ```json
/// {
///   "extraction_class": "party_lessor",
///   "extraction_text": "the Landlord",
///   "attributes": {"party_role": "landlord"},
///   "char_interval": {"start_pos": 12, "end_pos": 24},
///   "confidence": 0.92
/// }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawExtractionBatch {
    /// Raw items in the order the model produced them
    #[serde(default)]
    pub extractions: Vec<Value>,
}

impl RawExtractionBatch {
    /// Wrap a list of raw items
    pub fn new(extractions: Vec<Value>) -> Self {
        Self { extractions }
    }

    /// Number of raw items
    pub fn len(&self) -> usize {
        self.extractions.len()
    }

    /// True when the model returned nothing
    pub fn is_empty(&self) -> bool {
        self.extractions.is_empty()
    }
}

/// One labelled span inside a few-shot example
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleExtraction {
    /// Class label, drawn from the classifier's table
    pub extraction_class: String,

    /// Verbatim span from the example text
    pub extraction_text: String,

    /// Attribute map the model should imitate
    #[serde(default)]
    pub attributes: Map<String, Value>,
}

/// A few-shot example: source text plus the extractions expected from it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleData {
    /// Example source text
    pub text: String,

    /// Expected extractions, in order of appearance
    pub extractions: Vec<ExampleExtraction>,
}

/// Opaque model credentials; never printed
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    /// Wrap a secret
    pub fn new(secret: impl Into<String>) -> Self {
        Self(secret.into())
    }

    /// Expose the secret for use in a request header
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials(***)")
    }
}

/// Everything the extraction model needs for one call
#[derive(Debug, Clone)]
pub struct ModelRequest {
    /// Plain document text
    pub text: String,

    /// Task description for the model
    pub prompt: String,

    /// Few-shot examples
    pub examples: Vec<ExampleData>,

    /// Model identifier
    pub model_id: String,

    /// Optional API credentials
    pub credentials: Option<Credentials>,

    /// Maximum characters sent per chunk
    pub buffer_size: usize,

    /// Number of extraction passes over the text
    pub passes: u32,

    /// Maximum concurrent chunk requests
    pub workers: usize,

    /// Sampling temperature
    pub temperature: f64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_batch_deserializes_without_extractions_key() {
        let batch: RawExtractionBatch = serde_json::from_str("{}").unwrap();
        assert!(batch.is_empty());
    }

    #[test]
    fn test_batch_keeps_heterogeneous_items() {
        let batch: RawExtractionBatch = serde_json::from_value(json!({
            "extractions": [
                {"extraction_class": "party_lessor", "extraction_text": "the Landlord"},
                "not an object",
                42
            ]
        }))
        .unwrap();
        assert_eq!(batch.len(), 3);
    }

    #[test]
    fn test_credentials_are_redacted() {
        let creds = Credentials::new("sk-secret");
        assert_eq!(format!("{:?}", creds), "Credentials(***)");
        assert_eq!(creds.expose(), "sk-secret");
    }
}
