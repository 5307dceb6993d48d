//! Error types for the Extractor

use thiserror::Error;

/// Boxed cause of an external call failure
pub type BoxedCause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors that abort an extraction
///
/// Any of these means no `ExtractionResult` was produced. Per-item problems
/// inside a successful model response are not errors; see
/// [`NormalizationWarning`](crate::NormalizationWarning).
#[derive(Error, Debug)]
pub enum ExtractorError {
    /// Unsupported document type or invalid configuration; no model call was made
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Empty or oversized input text; no model call was made
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The external model call failed, timed out, or returned garbage
    #[error("External call to model '{model}' failed: {source}")]
    ExternalCall {
        /// Model identifier that was called
        model: String,

        /// Original cause
        #[source]
        source: BoxedCause,
    },

    /// JSON serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ExtractorError {
    /// Wrap a failure of the external model call
    pub fn external(model: impl Into<String>, source: impl Into<BoxedCause>) -> Self {
        ExtractorError::ExternalCall {
            model: model.into(),
            source: source.into(),
        }
    }
}
