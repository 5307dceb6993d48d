//! Clausewise Extraction Model Layer
//!
//! Pluggable implementations of the `ExtractionModel` trait from
//! `clausewise-domain`.
//!
//! # Models
//!
//! - `MockModel`: Deterministic mock for testing
//! - `OllamaModel`: Local Ollama API integration, with chunking, concurrent
//!   chunk requests and multi-pass merging
//!
//! # Examples
//!
//! ```
//! use clausewise_model::MockModel;
//! use clausewise_domain::{ExtractionModel, ModelRequest};
//!
//! let model = MockModel::new(r#"{"extractions": [{"extraction_text": "the Landlord"}]}"#);
//! let request = ModelRequest {
//!     text: "the Landlord".to_string(),
//!     prompt: "Extract parties.".to_string(),
//!     examples: vec![],
//!     model_id: "mock".to_string(),
//!     credentials: None,
//!     buffer_size: 1000,
//!     passes: 1,
//!     workers: 1,
//!     temperature: 0.0,
//! };
//! let batch = model.extract(&request).unwrap();
//! assert_eq!(batch.len(), 1);
//! ```

#![warn(missing_docs)]

pub mod alignment;
pub mod chunking;
pub mod ollama;
pub mod prompt;
pub mod response;

use clausewise_domain::{ExtractionModel, ModelRequest, RawExtractionBatch};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use thiserror::Error;

pub use ollama::OllamaModel;
pub use response::parse_model_response;

/// Errors that can occur during model operations
#[derive(Error, Debug)]
pub enum ModelError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Response could not be parsed into extraction items
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Async runtime failure (runtime construction, task join)
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Generic error
    #[error("Model error: {0}")]
    Other(String),
}

#[derive(Debug, Clone)]
enum MockResponse {
    Text(String),
    Error,
}

/// Mock extraction model for deterministic testing
///
/// Returns pre-configured responses without making any network calls.
/// Responses are raw model output strings and go through the same parser as
/// real model output, so unparseable responses can be simulated too.
///
/// # Examples
///
/// ```
/// use clausewise_model::MockModel;
///
/// let mut model = MockModel::new(r#"{"extractions": []}"#);
/// model.add_response("special text", r#"[{"extraction_text": "special"}]"#);
/// model.add_error("broken text");
/// assert_eq!(model.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockModel {
    default_response: String,
    responses: Arc<Mutex<HashMap<String, MockResponse>>>,
    call_count: Arc<Mutex<usize>>,
    last_request: Arc<Mutex<Option<ModelRequest>>>,
    delay: Option<Duration>,
}

impl MockModel {
    /// Create a new MockModel with a fixed response for all texts
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            default_response: response.into(),
            responses: Arc::new(Mutex::new(HashMap::new())),
            call_count: Arc::new(Mutex::new(0)),
            last_request: Arc::new(Mutex::new(None)),
            delay: None,
        }
    }

    /// Sleep this long before answering (simulates a slow model)
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Add a specific response for a given document text
    pub fn add_response(&mut self, text: impl Into<String>, response: impl Into<String>) {
        lock(&self.responses).insert(text.into(), MockResponse::Text(response.into()));
    }

    /// Configure to fail for a specific document text
    pub fn add_error(&mut self, text: impl Into<String>) {
        lock(&self.responses).insert(text.into(), MockResponse::Error);
    }

    /// Get the number of times extract was called
    pub fn call_count(&self) -> usize {
        *lock(&self.call_count)
    }

    /// Reset the call count
    pub fn reset_call_count(&self) {
        *lock(&self.call_count) = 0;
    }

    /// The most recent request received, if any
    pub fn last_request(&self) -> Option<ModelRequest> {
        lock(&self.last_request).clone()
    }
}

impl Default for MockModel {
    fn default() -> Self {
        Self::new(r#"{"extractions": []}"#)
    }
}

impl ExtractionModel for MockModel {
    type Error = ModelError;

    fn extract(&self, request: &ModelRequest) -> Result<RawExtractionBatch, Self::Error> {
        *lock(&self.call_count) += 1;
        *lock(&self.last_request) = Some(request.clone());

        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }

        let response = lock(&self.responses).get(&request.text).cloned();
        let raw = match response {
            Some(MockResponse::Error) => return Err(ModelError::Other("Mock error".to_string())),
            Some(MockResponse::Text(text)) => text,
            None => self.default_response.clone(),
        };

        parse_model_response(&raw).map(RawExtractionBatch::new)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}
