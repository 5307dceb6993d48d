//! Ollama Model Implementation
//!
//! Runs clause extraction against Ollama's local generate API.
//!
//! # Features
//!
//! - Text split into chunks of at most `buffer_size` characters
//! - Up to `workers` chunk requests in flight at once
//! - `passes` independent passes, merged by span
//! - Offsets re-based (or inferred) in document coordinates
//!
//! No retries happen here; a failed chunk fails the whole call.
//!
//! # Examples
//!
//! ```no_run
//! use clausewise_model::OllamaModel;
//!
//! let model = OllamaModel::new("http://localhost:11434").unwrap();
//! assert_eq!(model.endpoint(), "http://localhost:11434");
//! ```

use crate::alignment::{align_item, merge_passes};
use crate::chunking::{TextChunk, TextChunker};
use crate::prompt::PromptBuilder;
use crate::response::parse_model_response;
use crate::ModelError;
use clausewise_domain::{Credentials, ExtractionModel, ModelRequest, RawExtractionBatch};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::debug;

/// Default Ollama API endpoint
pub const DEFAULT_ENDPOINT: &str = "http://localhost:11434";

/// Default timeout for one chunk request (2 minutes)
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Ollama API model for local extraction
pub struct OllamaModel {
    endpoint: String,
    client: reqwest::Client,
}

/// Request body for Ollama generate API
#[derive(Debug, Clone, Serialize)]
struct OllamaGenerateRequest {
    model: String,
    prompt: String,
    stream: bool,
    format: &'static str,
    options: OllamaOptions,
}

#[derive(Debug, Clone, Serialize)]
struct OllamaOptions {
    temperature: f64,
}

/// Response from Ollama generate API
#[derive(Deserialize)]
struct OllamaGenerateResponse {
    response: String,
}

impl OllamaModel {
    /// Create a new Ollama model client with the default request timeout
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ModelError> {
        Self::with_timeout(endpoint, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client against `http://localhost:11434`
    pub fn default_endpoint() -> Result<Self, ModelError> {
        Self::new(DEFAULT_ENDPOINT)
    }

    /// Create a new client with a per-request timeout
    pub fn with_timeout(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, ModelError> {
        // Blocking calls drive a fresh runtime each time; pooled connections
        // would outlive it.
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .pool_max_idle_per_host(0)
            .build()
            .map_err(|e| ModelError::Other(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
            client,
        })
    }

    /// The configured endpoint
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Run extraction asynchronously
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Ollama is not running
    /// - Model is not available
    /// - Network communication fails
    /// - Any chunk response is not valid extraction JSON
    pub async fn extract_async(&self, request: &ModelRequest) -> Result<RawExtractionBatch, ModelError> {
        let chunks: Vec<TextChunk> = TextChunker::new(request.buffer_size)
            .chunk(&request.text)
            .into_iter()
            .filter(|chunk| !chunk.text.trim().is_empty())
            .collect();

        let passes = request.passes.max(1);
        let mut pass_outputs = Vec::with_capacity(passes as usize);

        for pass in 0..passes {
            debug!(
                "Extraction pass {}/{} over {} chunks with model '{}'",
                pass + 1,
                passes,
                chunks.len(),
                request.model_id
            );
            pass_outputs.push(self.run_pass(request, &chunks).await?);
        }

        Ok(RawExtractionBatch::new(merge_passes(pass_outputs)))
    }

    /// Run one pass over all chunks, at most `workers` at a time
    async fn run_pass(&self, request: &ModelRequest, chunks: &[TextChunk]) -> Result<Vec<Value>, ModelError> {
        let semaphore = Arc::new(Semaphore::new(request.workers.max(1)));
        let url = format!("{}/api/generate", self.endpoint);
        let mut tasks = JoinSet::new();

        for (idx, chunk) in chunks.iter().enumerate() {
            let body = OllamaGenerateRequest {
                model: request.model_id.clone(),
                prompt: PromptBuilder::new(&request.prompt, &request.examples, &chunk.text).build(),
                stream: false,
                format: "json",
                options: OllamaOptions {
                    temperature: request.temperature,
                },
            };
            let client = self.client.clone();
            let url = url.clone();
            let credentials = request.credentials.clone();
            let semaphore = Arc::clone(&semaphore);
            let chunk = chunk.clone();

            tasks.spawn(async move {
                let _permit = semaphore
                    .acquire_owned()
                    .await
                    .map_err(|e| ModelError::Runtime(e.to_string()))?;

                let raw = send_generate(&client, &url, credentials.as_ref(), &body).await?;
                let items: Vec<Value> = parse_model_response(&raw)?
                    .into_iter()
                    .map(|item| align_item(item, &chunk))
                    .collect();

                Ok::<_, ModelError>((idx, items))
            });
        }

        let mut results = Vec::with_capacity(chunks.len());
        while let Some(joined) = tasks.join_next().await {
            let (idx, items) =
                joined.map_err(|e| ModelError::Runtime(format!("Task join error: {}", e)))??;
            results.push((idx, items));
        }

        // Tasks finish in any order; restore chunk order
        results.sort_by_key(|(idx, _)| *idx);
        Ok(results.into_iter().flat_map(|(_, items)| items).collect())
    }
}

async fn send_generate(
    client: &reqwest::Client,
    url: &str,
    credentials: Option<&Credentials>,
    body: &OllamaGenerateRequest,
) -> Result<String, ModelError> {
    let mut builder = client.post(url).json(body);
    if let Some(credentials) = credentials {
        builder = builder.bearer_auth(credentials.expose());
    }

    let response = builder
        .send()
        .await
        .map_err(|e| ModelError::Communication(format!("Request failed: {}", e)))?;

    let status = response.status();
    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(ModelError::ModelNotAvailable(body.model.clone()));
    }
    if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
        return Err(ModelError::RateLimitExceeded);
    }
    if !status.is_success() {
        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        return Err(ModelError::Communication(format!("HTTP {}: {}", status, error_text)));
    }

    response
        .json::<OllamaGenerateResponse>()
        .await
        .map(|r| r.response)
        .map_err(|e| ModelError::InvalidResponse(format!("Failed to parse response: {}", e)))
}

impl ExtractionModel for OllamaModel {
    type Error = ModelError;

    /// Blocking wrapper; must not be called from inside an async task
    fn extract(&self, request: &ModelRequest) -> Result<RawExtractionBatch, Self::Error> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| ModelError::Runtime(format!("Failed to start runtime: {}", e)))?;

        runtime.block_on(self.extract_async(request))
    }
}
