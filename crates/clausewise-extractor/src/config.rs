//! Configuration for the Extractor
//!
//! Two layers: [`ConfigRegistry`] holds one [`ExtractionConfig`] per document
//! type and is built once, then shared; [`ExtractorSettings`] holds the
//! orchestrator's own limits.

use crate::error::ExtractorError;
use crate::prompt;
use clausewise_domain::{DocumentType, ExampleData};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::time::Duration;

/// Model used when nothing else is configured
pub const DEFAULT_MODEL_ID: &str = "llama3.1";

/// Settings for one extraction call on one document type
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionConfig {
    /// Model identifier passed to the extraction model
    pub model_id: String,

    /// Number of extraction passes over the text
    pub passes: u32,

    /// Maximum characters per chunk
    pub buffer_size: usize,

    /// Maximum concurrent chunk requests
    pub workers: usize,

    /// Sampling temperature
    pub temperature: f64,

    /// Task description
    pub prompt: String,

    /// Few-shot examples
    #[serde(default)]
    pub examples: Vec<ExampleData>,
}

impl ExtractionConfig {
    /// Built-in configuration for a document type
    pub fn builtin(document_type: DocumentType) -> Self {
        let passes = match document_type {
            DocumentType::Loan => 2,
            DocumentType::Rental | DocumentType::Tos => 1,
        };
        Self {
            model_id: DEFAULT_MODEL_ID.to_string(),
            passes,
            buffer_size: 2000,
            workers: 4,
            temperature: 0.1,
            prompt: prompt::description(document_type).to_string(),
            examples: prompt::examples(document_type),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model_id.trim().is_empty() {
            return Err("model_id must not be empty".to_string());
        }
        if self.passes == 0 {
            return Err("passes must be greater than 0".to_string());
        }
        if self.buffer_size == 0 {
            return Err("buffer_size must be greater than 0".to_string());
        }
        if self.workers == 0 {
            return Err("workers must be greater than 0".to_string());
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!("temperature must be within [0, 2], got {}", self.temperature));
        }
        if self.prompt.trim().is_empty() {
            return Err("prompt must not be empty".to_string());
        }
        Ok(())
    }

    /// Apply an override, leaving unset fields alone
    pub fn apply(&mut self, o: &ConfigOverride) {
        if let Some(model_id) = &o.model_id {
            self.model_id = model_id.clone();
        }
        if let Some(passes) = o.passes {
            self.passes = passes;
        }
        if let Some(buffer_size) = o.buffer_size {
            self.buffer_size = buffer_size;
        }
        if let Some(workers) = o.workers {
            self.workers = workers;
        }
        if let Some(temperature) = o.temperature {
            self.temperature = temperature;
        }
        if let Some(prompt) = &o.prompt {
            self.prompt = prompt.clone();
        }
    }
}

/// Partial [`ExtractionConfig`], as written in a TOML override table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigOverride {
    /// Model identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model_id: Option<String>,

    /// Number of passes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passes: Option<u32>,

    /// Characters per chunk
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buffer_size: Option<usize>,

    /// Concurrent chunk requests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,

    /// Sampling temperature
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,

    /// Task description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl From<&ExtractionConfig> for ConfigOverride {
    fn from(config: &ExtractionConfig) -> Self {
        Self {
            model_id: Some(config.model_id.clone()),
            passes: Some(config.passes),
            buffer_size: Some(config.buffer_size),
            workers: Some(config.workers),
            temperature: Some(config.temperature),
            prompt: Some(config.prompt.clone()),
        }
    }
}

/// Immutable map from document type to extraction settings
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigRegistry {
    configs: BTreeMap<DocumentType, ExtractionConfig>,
}

impl ConfigRegistry {
    /// Registry with every document type and the built-in settings
    pub fn builtin() -> Self {
        Self::only(&DocumentType::ALL)
    }

    /// Registry restricted to the given document types, built-in settings
    pub fn only(types: &[DocumentType]) -> Self {
        let configs = types
            .iter()
            .map(|t| (*t, ExtractionConfig::builtin(*t)))
            .collect();
        Self { configs }
    }

    /// Registry from explicit configs; every config is validated
    pub fn new(
        configs: impl IntoIterator<Item = (DocumentType, ExtractionConfig)>,
    ) -> Result<Self, ExtractorError> {
        let configs: BTreeMap<_, _> = configs.into_iter().collect();
        for (document_type, config) in &configs {
            config.validate().map_err(|e| {
                ExtractorError::Configuration(format!("invalid {} config: {}", document_type, e))
            })?;
        }
        Ok(Self { configs })
    }

    /// Config for a registered type
    pub fn get(&self, document_type: DocumentType) -> Option<&ExtractionConfig> {
        self.configs.get(&document_type)
    }

    /// Registered document types, in a stable order
    pub fn document_types(&self) -> impl Iterator<Item = DocumentType> + '_ {
        self.configs.keys().copied()
    }

    /// Parse a document type name and look up its config
    pub fn resolve(&self, name: &str) -> Result<(DocumentType, &ExtractionConfig), ExtractorError> {
        let document_type: DocumentType = name
            .parse()
            .map_err(|e| ExtractorError::Configuration(format!("{}", e)))?;
        let config = self.get(document_type).ok_or_else(|| {
            ExtractorError::Configuration(format!(
                "document type '{}' is not registered",
                document_type
            ))
        })?;
        Ok((document_type, config))
    }

    /// New registry with per-type overrides applied
    ///
    /// Keys are document type names. Naming an unknown or unregistered type,
    /// or producing an invalid config, is a configuration error.
    pub fn with_overrides(
        &self,
        overrides: &BTreeMap<String, ConfigOverride>,
    ) -> Result<Self, ExtractorError> {
        let mut configs = self.configs.clone();
        for (name, o) in overrides {
            let document_type: DocumentType = name
                .parse()
                .map_err(|e| ExtractorError::Configuration(format!("override table: {}", e)))?;
            let config = configs.get_mut(&document_type).ok_or_else(|| {
                ExtractorError::Configuration(format!(
                    "override for unregistered document type '{}'",
                    document_type
                ))
            })?;
            config.apply(o);
        }
        Self::new(configs)
    }

    /// New registry with overrides read from a TOML document
    ///
    /// ```toml
    /// [loan]
    /// passes = 3
    /// model_id = "mistral"
    /// ```
    pub fn with_overrides_toml(&self, toml_str: &str) -> Result<Self, ExtractorError> {
        let overrides: BTreeMap<String, ConfigOverride> = toml::from_str(toml_str)
            .map_err(|e| ExtractorError::Configuration(format!("Failed to parse TOML: {}", e)))?;
        self.with_overrides(&overrides)
    }

    /// Render the effective settings in override-file form
    ///
    /// Examples are not included.
    pub fn to_toml(&self) -> Result<String, String> {
        let tables: BTreeMap<&str, ConfigOverride> = self
            .configs
            .iter()
            .map(|(t, c)| (t.as_str(), ConfigOverride::from(c)))
            .collect();
        toml::to_string_pretty(&tables).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ConfigRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Limits enforced by the orchestrator itself
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorSettings {
    /// Maximum input text length (characters)
    pub max_text_length: usize,

    /// Maximum time for a single async extraction (seconds)
    pub extraction_timeout_secs: u64,
}

impl ExtractorSettings {
    /// Get the extraction timeout as a Duration
    pub fn extraction_timeout(&self) -> Duration {
        Duration::from_secs(self.extraction_timeout_secs)
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if self.max_text_length == 0 {
            return Err("max_text_length must be greater than 0".to_string());
        }
        if self.extraction_timeout_secs == 0 {
            return Err("extraction_timeout_secs must be greater than 0".to_string());
        }
        Ok(())
    }

    /// Load settings from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, String> {
        toml::from_str(toml_str).map_err(|e| format!("Failed to parse TOML: {}", e))
    }

    /// Serialize settings to TOML string
    pub fn to_toml(&self) -> Result<String, String> {
        toml::to_string_pretty(self).map_err(|e| format!("Failed to serialize to TOML: {}", e))
    }
}

impl Default for ExtractorSettings {
    fn default() -> Self {
        Self {
            max_text_length: 200_000,
            extraction_timeout_secs: 300,
        }
    }
}
