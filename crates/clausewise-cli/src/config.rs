//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use clausewise_extractor::{ConfigOverride, ConfigRegistry, ExtractorSettings};
use clausewise_model::ollama::DEFAULT_ENDPOINT;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
///
/// ```toml
/// endpoint = "http://localhost:11434"
///
/// [settings]
/// color = true
/// format = "table"
///
/// [extractor]
/// extraction_timeout_secs = 600
///
/// [overrides.loan]
/// passes = 3
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Extraction model endpoint
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// Orchestrator limits
    #[serde(default)]
    pub extractor: ExtractorSettings,

    /// Per-document-type extraction overrides
    #[serde(default)]
    pub overrides: BTreeMap<String, ConfigOverride>,
}

/// Global CLI settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Clause and relationship tables
    Table,
    /// Full result JSON
    Json,
    /// Trimmed visualization JSON
    Visualization,
    /// Templated document JSON
    Structured,
}

impl Config {
    /// Get the default configuration file path.
    pub fn path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".clausewise").join("config.toml"))
    }

    /// Load configuration.
    ///
    /// An explicit path must exist. Without one, the default path is read
    /// if present and built-in defaults are used otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        match explicit {
            Some(path) => Self::load_from(path),
            None => {
                let path = Self::path()?;
                if path.exists() {
                    Self::load_from(&path)
                } else {
                    Ok(Self::default())
                }
            }
        }
    }

    /// Load configuration from a specific file.
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that can be checked without contacting the model.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint.trim().is_empty() {
            return Err(CliError::Config("endpoint must not be empty".to_string()));
        }
        self.extractor.validate().map_err(CliError::Config)?;
        self.registry()?;
        Ok(())
    }

    /// Built-in registry with this file's overrides applied.
    pub fn registry(&self) -> Result<ConfigRegistry> {
        Ok(ConfigRegistry::builtin().with_overrides(&self.overrides)?)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            settings: Settings::default(),
            extractor: ExtractorSettings::default(),
            overrides: BTreeMap::new(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

#[cfg(test)]
mod tests {
    use super::*;
    use clausewise_domain::DocumentType;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert!(config.settings.color);
        assert_eq!(config.settings.format, OutputFormat::Table);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_with_overrides() {
        let config: Config = toml::from_str(
            r#"
            endpoint = "http://models.internal:11434"

            [settings]
            format = "visualization"

            [overrides.loan]
            passes = 3
            "#,
        )
        .unwrap();

        assert_eq!(config.settings.format, OutputFormat::Visualization);
        assert!(config.settings.color);
        let registry = config.registry().unwrap();
        assert_eq!(registry.get(DocumentType::Loan).unwrap().passes, 3);
    }

    #[test]
    fn test_bad_override_rejected() {
        let config: Config = toml::from_str("[overrides.mortgage]\npasses = 1").unwrap();
        assert!(matches!(config.validate(), Err(CliError::Extractor(_))));
    }
}
