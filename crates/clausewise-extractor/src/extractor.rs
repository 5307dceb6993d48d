//! Core extraction orchestrator

use crate::assembler::{self, AssemblyContext, StructuredDocument};
use crate::config::{ConfigRegistry, ExtractionConfig, ExtractorSettings};
use crate::error::ExtractorError;
use crate::normalizer::normalize;
use crate::relationships::{PartyFinancialLinker, RelationshipStrategy};
use crate::types::ExtractionRequest;
use clausewise_domain::{Credentials, DocumentType, ExtractionModel, ExtractionResult, ModelRequest};
use std::sync::Arc;
use std::time::Instant;
use tokio::time::timeout;
use tracing::{debug, info};
use uuid::Uuid;

/// Runs one document through model call, normalization, relationship
/// building and assembly
///
/// Holds no per-call state, so a single instance can serve concurrent
/// callers.
pub struct ClauseExtractor<M> {
    model: Arc<M>,
    registry: Arc<ConfigRegistry>,
    settings: ExtractorSettings,
    credentials: Option<Credentials>,
    relationships: Arc<dyn RelationshipStrategy>,
}

impl<M> Clone for ClauseExtractor<M> {
    fn clone(&self) -> Self {
        Self {
            model: Arc::clone(&self.model),
            registry: Arc::clone(&self.registry),
            settings: self.settings.clone(),
            credentials: self.credentials.clone(),
            relationships: Arc::clone(&self.relationships),
        }
    }
}

impl<M> ClauseExtractor<M>
where
    M: ExtractionModel + Send + Sync + 'static,
    M::Error: std::error::Error + Send + Sync + 'static,
{
    /// Create a new extractor with default settings
    pub fn new(model: M, registry: ConfigRegistry) -> Self {
        Self {
            model: Arc::new(model),
            registry: Arc::new(registry),
            settings: ExtractorSettings::default(),
            credentials: None,
            relationships: Arc::new(PartyFinancialLinker),
        }
    }

    /// Replace the orchestrator settings
    pub fn with_settings(mut self, settings: ExtractorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Credentials passed to every model call
    pub fn with_credentials(mut self, credentials: Credentials) -> Self {
        self.credentials = Some(credentials);
        self
    }

    /// Replace the relationship builder
    pub fn with_relationship_strategy(mut self, strategy: impl RelationshipStrategy + 'static) -> Self {
        self.relationships = Arc::new(strategy);
        self
    }

    /// The registry in use
    pub fn registry(&self) -> &ConfigRegistry {
        &self.registry
    }

    /// Orchestrator settings in use
    pub fn settings(&self) -> &ExtractorSettings {
        &self.settings
    }

    /// Extract clauses from `text` as a document of `document_type`
    pub fn extract(&self, text: &str, document_type: &str) -> Result<ExtractionResult, ExtractorError> {
        self.extract_request(ExtractionRequest::new(text, document_type))
    }

    /// Extract clauses for a full request
    ///
    /// Blocks on the model call. Models that drive their own runtime, such as
    /// `OllamaModel`, panic when this is called from inside a tokio runtime;
    /// async callers use [`ClauseExtractor::extract_async`].
    pub fn extract_request(&self, request: ExtractionRequest) -> Result<ExtractionResult, ExtractorError> {
        let (document_type, config) = self.registry.resolve(&request.document_type)?;
        self.check_text(&request.text)?;

        let document_id = request
            .document_id
            .unwrap_or_else(|| Uuid::now_v7().to_string());

        info!(
            "Starting {} extraction for document '{}', text length {}",
            document_type,
            document_id,
            request.text.chars().count()
        );
        debug!(
            "Model '{}', passes {}, buffer {}, workers {}, temperature {}",
            config.model_id, config.passes, config.buffer_size, config.workers, config.temperature
        );

        let start = Instant::now();
        let model_request = self.model_request(request.text, config);
        let batch = self
            .model
            .extract(&model_request)
            .map_err(|e| ExtractorError::external(config.model_id.clone(), e))?;

        debug!("Model returned {} raw items", batch.len());

        let normalized = normalize(&batch);
        let relationships = self.relationships.build(&normalized.clauses);

        let ctx = AssemblyContext {
            document_id,
            document_type,
            model_used: config.model_id.clone(),
            extraction_passes: config.passes,
            raw_extraction_count: batch.len(),
            skipped_items: normalized.warnings.len(),
        };
        let result = assembler::assemble(ctx, normalized.clauses, relationships, start.elapsed());

        info!(
            "Extraction complete: {} clauses, {} relationships, {} skipped, confidence {:.2}, {:.3}s",
            result.clauses.len(),
            result.relationships.len(),
            result.metadata.skipped_items,
            result.confidence_score,
            result.processing_time
        );

        Ok(result)
    }

    /// Extract and also wrap the result in its document template
    pub fn extract_structured(
        &self,
        request: ExtractionRequest,
    ) -> Result<(ExtractionResult, StructuredDocument), ExtractorError> {
        let result = self.extract_request(request)?;
        let structured = assembler::structure(&result);
        Ok((result, structured))
    }

    /// Extract from async code
    ///
    /// The blocking call runs on tokio's blocking pool and is bounded by
    /// `extraction_timeout_secs`. A timeout surfaces as an external call
    /// error; the blocking task is not cancelled and finishes in the
    /// background.
    pub async fn extract_async(&self, request: ExtractionRequest) -> Result<ExtractionResult, ExtractorError> {
        let (_, config) = self.registry.resolve(&request.document_type)?;
        self.check_text(&request.text)?;
        let model_id = config.model_id.clone();

        let this = self.clone();
        let handle = tokio::task::spawn_blocking(move || this.extract_request(request));

        match timeout(self.settings.extraction_timeout(), handle).await {
            Ok(Ok(result)) => result,
            Ok(Err(join_error)) => Err(ExtractorError::external(model_id, join_error)),
            Err(elapsed) => Err(ExtractorError::external(model_id, elapsed)),
        }
    }

    /// Document types this extractor accepts
    pub fn document_types(&self) -> Vec<DocumentType> {
        self.registry.document_types().collect()
    }

    fn check_text(&self, text: &str) -> Result<(), ExtractorError> {
        if text.trim().is_empty() {
            return Err(ExtractorError::InvalidInput("text is empty".to_string()));
        }
        let length = text.chars().count();
        if length > self.settings.max_text_length {
            return Err(ExtractorError::InvalidInput(format!(
                "text length {} exceeds maximum {}",
                length, self.settings.max_text_length
            )));
        }
        Ok(())
    }

    fn model_request(&self, text: String, config: &ExtractionConfig) -> ModelRequest {
        ModelRequest {
            text,
            prompt: config.prompt.clone(),
            examples: config.examples.clone(),
            model_id: config.model_id.clone(),
            credentials: self.credentials.clone(),
            buffer_size: config.buffer_size,
            passes: config.passes,
            workers: config.workers,
            temperature: config.temperature,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausewise_model::MockModel;

    fn create_test_extractor() -> ClauseExtractor<MockModel> {
        ClauseExtractor::new(MockModel::default(), ConfigRegistry::builtin())
    }

    #[test]
    fn test_extract_empty_response() {
        let extractor = create_test_extractor();
        let result = extractor.extract("Some lease text", "rental").unwrap();

        assert!(result.clauses.is_empty());
        assert!(result.relationships.is_empty());
        assert_eq!(result.document_type, DocumentType::Rental);
        assert!(Uuid::parse_str(&result.document_id).is_ok());
    }

    #[test]
    fn test_extract_text_too_long() {
        let extractor = create_test_extractor().with_settings(ExtractorSettings {
            max_text_length: 10,
            ..ExtractorSettings::default()
        });

        let result = extractor.extract(&"a".repeat(11), "rental");
        assert!(matches!(result, Err(ExtractorError::InvalidInput(_))));
    }

    #[test]
    fn test_request_reaches_model() {
        let model = MockModel::default();
        let extractor = ClauseExtractor::new(model.clone(), ConfigRegistry::builtin())
            .with_credentials(Credentials::new("secret"));

        extractor
            .extract_request(ExtractionRequest::new("Loan text", "LOAN").with_document_id("loan-1"))
            .unwrap();

        let seen = model.last_request().unwrap();
        assert_eq!(seen.text, "Loan text");
        assert_eq!(seen.passes, 2);
        assert_eq!(seen.model_id, "llama3.1");
        assert_eq!(seen.credentials.unwrap().expose(), "secret");
        assert!(!seen.examples.is_empty());
    }

    #[test]
    fn test_extractor_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ClauseExtractor<MockModel>>();
    }
}
