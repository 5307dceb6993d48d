//! Extract command implementation.

use crate::cli::ExtractArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use clausewise_domain::{Credentials, DocumentType, ExtractionResult};
use clausewise_extractor::{ClauseExtractor, ExtractionRequest};
use clausewise_model::OllamaModel;
use std::fs;
use tracing::info;

/// Execute the extract command.
pub async fn execute_extract(args: ExtractArgs, config: &Config, formatter: &Formatter) -> Result<()> {
    let text = fs::read_to_string(&args.file)?;
    if text.trim().is_empty() {
        return Err(CliError::InvalidInput(format!(
            "{} contains no text",
            args.file.display()
        )));
    }

    let endpoint = args.endpoint.clone().unwrap_or_else(|| config.endpoint.clone());
    let model = OllamaModel::new(endpoint.as_str())?;
    let mut extractor = ClauseExtractor::new(model, config.registry()?).with_settings(config.extractor.clone());
    if let Some(key) = &args.api_key {
        extractor = extractor.with_credentials(Credentials::new(key.as_str()));
    }

    info!("Extracting {} using {}", args.file.display(), endpoint);
    let result = run_extract(&extractor, text, &args).await?;
    let rendered = formatter.format_result(&result)?;

    match &args.output {
        Some(path) => {
            fs::write(path, rendered)?;
            eprintln!("{}", formatter.success(&format!("Wrote {}", path.display())));
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Run one extraction with any model.
pub async fn run_extract<M>(
    extractor: &ClauseExtractor<M>,
    text: String,
    args: &ExtractArgs,
) -> Result<ExtractionResult>
where
    M: clausewise_domain::ExtractionModel + Send + Sync + 'static,
    M::Error: std::error::Error + Send + Sync + 'static,
{
    let document_type: DocumentType = args.document_type.into();
    let mut request = ExtractionRequest::new(text, document_type.as_str());
    if let Some(id) = &args.document_id {
        request = request.with_document_id(id.as_str());
    }
    Ok(extractor.extract_async(request).await?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::DocumentTypeArg;
    use clausewise_extractor::ConfigRegistry;
    use clausewise_model::MockModel;
    use std::path::PathBuf;

    fn args() -> ExtractArgs {
        ExtractArgs {
            file: PathBuf::from("unused.txt"),
            document_type: DocumentTypeArg::Loan,
            document_id: Some("loan-9".to_string()),
            endpoint: None,
            api_key: None,
            output: None,
        }
    }

    #[tokio::test]
    async fn test_run_extract_with_mock() {
        let model = MockModel::new(
            r#"[{"extraction_class": "party_borrower", "extraction_text": "the Borrower"},
                {"extraction_class": "repayment_terms", "extraction_text": "48 installments"}]"#,
        );
        let extractor = ClauseExtractor::new(model, ConfigRegistry::builtin());

        let result = run_extract(&extractor, "the Borrower repays in 48 installments".into(), &args())
            .await
            .unwrap();

        assert_eq!(result.document_id, "loan-9");
        assert_eq!(result.document_type, DocumentType::Loan);
        assert_eq!(result.relationships.len(), 1);
        assert_eq!(result.metadata.extraction_passes, 2);
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_fails() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("loan.txt");
        fs::write(&file, "The Lender lends $10,000 to the Borrower.").unwrap();

        let mut args = args();
        args.file = file;
        args.endpoint = Some("http://127.0.0.1:9".to_string());

        let formatter = Formatter::new(crate::config::OutputFormat::Json, false);
        let err = execute_extract(args, &Config::default(), &formatter).await.unwrap_err();
        assert!(matches!(
            err,
            CliError::Extractor(clausewise_extractor::ExtractorError::ExternalCall { .. })
        ));
    }

    #[tokio::test]
    async fn test_empty_file_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("empty.txt");
        fs::write(&file, "  \n").unwrap();

        let mut args = args();
        args.file = file;

        let formatter = Formatter::new(crate::config::OutputFormat::Json, false);
        let err = execute_extract(args, &Config::default(), &formatter).await.unwrap_err();
        assert!(matches!(err, CliError::InvalidInput(_)));
    }
}
