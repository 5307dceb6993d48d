//! Prompt construction for chunk-level extraction calls

use clausewise_domain::ExampleData;
use serde_json::{json, Value};

/// Builds the prompt sent to the model for one chunk of text
pub struct PromptBuilder<'a> {
    description: &'a str,
    examples: &'a [ExampleData],
    text: &'a str,
}

impl<'a> PromptBuilder<'a> {
    /// Create a new prompt builder
    pub fn new(description: &'a str, examples: &'a [ExampleData], text: &'a str) -> Self {
        Self {
            description,
            examples,
            text,
        }
    }

    /// Build the complete extraction prompt
    pub fn build(&self) -> String {
        let mut prompt = String::new();

        // 1. Task description for this document type
        prompt.push_str(self.description.trim());
        prompt.push_str("\n\n");

        // 2. Few-shot examples, rendered in the exact output shape we expect
        if !self.examples.is_empty() {
            prompt.push_str("Examples:\n\n");
            for (idx, example) in self.examples.iter().enumerate() {
                prompt.push_str(&format!("Example {} text:\n---\n", idx + 1));
                prompt.push_str(example.text.trim());
                prompt.push_str("\n---\n");
                prompt.push_str(&format!("Example {} output:\n", idx + 1));
                prompt.push_str(&render_example_output(example));
                prompt.push_str("\n\n");
            }
        }

        // 3. The text to analyze
        prompt.push_str("Text to analyze:\n");
        prompt.push_str("---\n");
        prompt.push_str(self.text);
        prompt.push_str("\n---\n\n");

        // 4. Output format reminder
        prompt.push_str(OUTPUT_FORMAT_REMINDER);

        prompt
    }
}

fn render_example_output(example: &ExampleData) -> String {
    let extractions: Vec<Value> = example
        .extractions
        .iter()
        .map(|e| {
            json!({
                "extraction_class": e.extraction_class,
                "extraction_text": e.extraction_text,
                "attributes": e.attributes,
            })
        })
        .collect();

    serde_json::to_string_pretty(&json!({ "extractions": extractions }))
        .unwrap_or_else(|_| "{\"extractions\": []}".to_string())
}

const OUTPUT_FORMAT_REMINDER: &str = r#"Output format (JSON object only, no additional text):
{
  "extractions": [
    {
      "extraction_class": "label from the examples",
      "extraction_text": "exact text copied from the source",
      "attributes": {"key": "value"},
      "confidence": 0.0-1.0
    }
  ]
}

Rules:
- Use exact text from the source for extraction_text; do not paraphrase
- List extractions in order of appearance
- Do not overlap extractions
- Omit confidence if you cannot estimate it

Remember: Return ONLY valid JSON, no markdown code blocks, no explanations."#;
