//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use clausewise_domain::ExtractionResult;
use clausewise_extractor::{assembler, VisualizationDocument};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Longest clause text shown in a table cell, in characters.
const TABLE_TEXT_CHARS: usize = 60;

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format an extraction result.
    pub fn format_result(&self, result: &ExtractionResult) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(result)?),
            OutputFormat::Visualization => Ok(VisualizationDocument::from(result).to_json()?),
            OutputFormat::Structured => Ok(serde_json::to_string_pretty(&assembler::structure(result))?),
            OutputFormat::Table => Ok(self.format_result_table(result)),
        }
    }

    /// Format a result as summary line plus clause and relationship tables.
    fn format_result_table(&self, result: &ExtractionResult) -> String {
        let summary = format!(
            "Document {} ({}): {} clauses, {} relationships, confidence {:.2}, {:.2}s",
            result.document_id,
            result.document_type,
            result.clauses.len(),
            result.relationships.len(),
            result.confidence_score,
            result.processing_time
        );
        let mut out = vec![self.info(&summary)];

        if result.metadata.skipped_items > 0 {
            out.push(self.warning(&format!(
                "{} of {} raw items were skipped",
                result.metadata.skipped_items, result.metadata.raw_extraction_count
            )));
        }

        if result.clauses.is_empty() {
            out.push(self.colorize("No clauses found.", "yellow"));
            return out.join("\n");
        }

        let mut builder = Builder::default();
        builder.push_record(["ID", "Type", "Text", "Confidence", "Span"]);
        for clause in &result.clauses {
            builder.push_record([
                clause.id.clone(),
                clause.clause_type.to_string(),
                shorten(&clause.text, TABLE_TEXT_CHARS),
                format!("{:.2}", clause.confidence),
                format!("{}..{}", clause.source_location.start, clause.source_location.end),
            ]);
        }
        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));
        out.push(table.to_string());

        if !result.relationships.is_empty() {
            let mut builder = Builder::default();
            builder.push_record(["ID", "Type", "Source", "Target", "Strength"]);
            for rel in &result.relationships {
                builder.push_record([
                    rel.id.clone(),
                    rel.relationship_type.to_string(),
                    rel.source_clause_id.clone(),
                    rel.target_clause_id.clone(),
                    format!("{:.2}", rel.strength),
                ]);
            }
            let mut table = builder.build();
            table
                .with(Style::rounded())
                .with(Modify::new(Rows::first()).with(Alignment::center()));
            out.push(table.to_string());
        }

        out.join("\n")
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

fn shorten(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let kept: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", kept)
}
