//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use clausewise_domain::DocumentType;
use std::path::PathBuf;

/// Clausewise CLI - Extract legal clauses and relationships from agreements.
#[derive(Debug, Parser)]
#[command(name = "clausewise")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum CliFormat {
    /// Clause and relationship tables (default)
    Table,
    /// Full result as JSON
    Json,
    /// Trimmed visualization JSON
    Visualization,
    /// Result wrapped in its document template
    Structured,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Extract clauses from a plain-text document
    Extract(ExtractArgs),

    /// Inspect configuration
    Config(ConfigArgs),
}

/// Arguments for the extract command.
#[derive(Debug, Parser)]
pub struct ExtractArgs {
    /// Plain-text document to read
    pub file: PathBuf,

    /// Document type
    #[arg(short = 't', long = "type", value_enum)]
    pub document_type: DocumentTypeArg,

    /// Document id (generated when omitted)
    #[arg(long)]
    pub document_id: Option<String>,

    /// Extraction model endpoint (e.g., http://localhost:11434)
    #[arg(short, long, env = "CLAUSEWISE_ENDPOINT")]
    pub endpoint: Option<String>,

    /// API key sent to the model endpoint
    #[arg(long, env = "CLAUSEWISE_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Write output to this file instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for configuration inspection.
#[derive(Debug, Parser)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective per-type extraction settings as TOML
    Show,

    /// Print the configuration file path
    Path,
}

/// Document type argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum DocumentTypeArg {
    /// Rental or lease agreement
    Rental,
    /// Loan agreement
    Loan,
    /// Terms of service
    Tos,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Visualization => crate::config::OutputFormat::Visualization,
            CliFormat::Structured => crate::config::OutputFormat::Structured,
        }
    }
}

impl From<DocumentTypeArg> for DocumentType {
    fn from(arg: DocumentTypeArg) -> Self {
        match arg {
            DocumentTypeArg::Rental => DocumentType::Rental,
            DocumentTypeArg::Loan => DocumentType::Loan,
            DocumentTypeArg::Tos => DocumentType::Tos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_command() {
        let cli = Cli::parse_from([
            "clausewise",
            "extract",
            "lease.txt",
            "--type",
            "rental",
            "--format",
            "json",
            "--document-id",
            "lease-1",
        ]);

        assert_eq!(cli.format, Some(CliFormat::Json));
        match cli.command {
            Command::Extract(args) => {
                assert_eq!(args.file, PathBuf::from("lease.txt"));
                assert_eq!(args.document_type, DocumentTypeArg::Rental);
                assert_eq!(args.document_id.as_deref(), Some("lease-1"));
            }
            _ => panic!("Expected Extract command"),
        }
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result = Cli::try_parse_from(["clausewise", "extract", "a.txt", "--type", "mortgage"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_config_show() {
        let cli = Cli::parse_from(["clausewise", "config", "show"]);
        assert!(matches!(
            cli.command,
            Command::Config(ConfigArgs {
                action: ConfigAction::Show
            })
        ));
    }

    #[test]
    fn test_document_type_conversion() {
        let doc_type: DocumentType = DocumentTypeArg::Tos.into();
        assert_eq!(doc_type, DocumentType::Tos);
    }
}
