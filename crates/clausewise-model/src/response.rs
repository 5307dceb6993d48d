//! Parse model output into raw extraction items

use crate::ModelError;
use serde_json::Value;

/// Parse a model response into raw items
///
/// Accepts either `{"extractions": [...]}` or a bare JSON array, optionally
/// wrapped in a markdown code block. Items are returned untouched; judging
/// individual items is the normalizer's job.
pub fn parse_model_response(response: &str) -> Result<Vec<Value>, ModelError> {
    // LLMs sometimes wrap JSON in markdown code blocks
    let json_str = extract_json(response)?;

    let json: Value = serde_json::from_str(&json_str)
        .map_err(|e| ModelError::InvalidResponse(format!("JSON parse error: {}", e)))?;

    match json {
        Value::Array(items) => Ok(items),
        Value::Object(mut obj) => match obj.remove("extractions") {
            Some(Value::Array(items)) => Ok(items),
            Some(Value::Null) | None => Err(ModelError::InvalidResponse(
                "Missing 'extractions' array".to_string(),
            )),
            Some(_) => Err(ModelError::InvalidResponse(
                "'extractions' is not an array".to_string(),
            )),
        },
        _ => Err(ModelError::InvalidResponse(
            "Expected JSON object or array".to_string(),
        )),
    }
}

/// Extract JSON from response, handling markdown code blocks
fn extract_json(response: &str) -> Result<String, ModelError> {
    let trimmed = response.trim();

    if trimmed.starts_with("```") {
        let lines: Vec<&str> = trimmed.lines().collect();
        if lines.len() < 2 {
            return Err(ModelError::InvalidResponse("Empty code block".to_string()));
        }

        // Skip the opening fence and, if present, the closing one
        let end = if lines[lines.len() - 1].trim_start().starts_with("```") {
            lines.len() - 1
        } else {
            lines.len()
        };
        Ok(lines[1..end].join("\n"))
    } else {
        Ok(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_extractions_object() {
        let response = r#"{"extractions": [
            {"extraction_class": "party_lessor", "extraction_text": "the Landlord"},
            {"extraction_class": "financial_terms", "extraction_text": "$1,200 monthly rent"}
        ]}"#;

        let items = parse_model_response(response).unwrap();
        assert_eq!(items.len(), 2);
        assert_eq!(items[0]["extraction_class"], "party_lessor");
    }

    #[test]
    fn test_parse_bare_array() {
        let items = parse_model_response(r#"[{"extraction_text": "x"}]"#).unwrap();
        assert_eq!(items.len(), 1);
    }

    #[test]
    fn test_parse_markdown_wrapper() {
        let response = "```json\n{\"extractions\": []}\n```";
        let items = parse_model_response(response).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn test_parse_keeps_malformed_items() {
        // Individual items are not judged here
        let items = parse_model_response(r#"[1, "two", {"extraction_text": "three"}]"#).unwrap();
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_parse_invalid_json() {
        let result = parse_model_response("This is not JSON");
        assert!(matches!(result, Err(ModelError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_object_without_extractions() {
        let result = parse_model_response(r#"{"clauses": []}"#);
        assert!(matches!(result, Err(ModelError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_extractions_not_array() {
        let result = parse_model_response(r#"{"extractions": "none"}"#);
        assert!(matches!(result, Err(ModelError::InvalidResponse(_))));
    }

    #[test]
    fn test_parse_scalar() {
        assert!(parse_model_response("42").is_err());
    }

    #[test]
    fn test_extract_json_from_markdown_without_language() {
        let response = "```\n{\"key\": \"value\"}\n```";
        let result = extract_json(response).unwrap();
        assert!(result.contains("key"));
    }
}
