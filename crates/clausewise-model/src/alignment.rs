//! Ground chunk-level items in document coordinates and merge passes

use crate::chunking::TextChunk;
use serde_json::{json, Value};
use std::collections::HashSet;

/// Re-base or infer the `char_interval` of one raw item
///
/// Offsets reported by the model are relative to the chunk and get shifted by
/// the chunk offset. Items without offsets are located by exact match of
/// `extraction_text` inside the chunk. Anything that is not an object, or
/// whose interval is not a pair of integers, is passed through untouched.
pub fn align_item(mut item: Value, chunk: &TextChunk) -> Value {
    let Some(obj) = item.as_object_mut() else {
        return item;
    };

    if let Some(interval) = obj.get_mut("char_interval") {
        if let Some(interval) = interval.as_object_mut() {
            for key in ["start_pos", "end_pos"] {
                let pos = interval.get(key).and_then(Value::as_u64);
                if let Some(pos) = pos {
                    interval.insert(key.to_string(), json!(pos + chunk.char_offset as u64));
                }
            }
        }
        return item;
    }

    let located = obj
        .get("extraction_text")
        .and_then(Value::as_str)
        .filter(|text| !text.trim().is_empty())
        .and_then(|text| {
            chunk.text.find(text).map(|byte_idx| {
                let start = chunk.char_offset + chunk.text[..byte_idx].chars().count();
                (start, start + text.chars().count())
            })
        });

    if let Some((start, end)) = located {
        obj.insert(
            "char_interval".to_string(),
            json!({ "start_pos": start, "end_pos": end }),
        );
    }

    item
}

/// Merge the outputs of several extraction passes
///
/// Every item of the first pass is kept. Items from later passes are kept only
/// when their span overlaps nothing already kept (or, lacking a span, when
/// their text is new).
pub fn merge_passes(passes: Vec<Vec<Value>>) -> Vec<Value> {
    let mut merged = Vec::new();
    let mut spans: Vec<(u64, u64)> = Vec::new();
    let mut texts: HashSet<String> = HashSet::new();

    for (pass_idx, items) in passes.into_iter().enumerate() {
        for item in items {
            let span = span_of(&item);
            let text = text_of(&item).map(str::to_string);

            if pass_idx > 0 {
                let is_new = match (span, &text) {
                    (Some((start, end)), _) => !spans.iter().any(|&(a, b)| start < b && a < end),
                    (None, Some(text)) => !texts.contains(text),
                    (None, None) => false,
                };
                if !is_new {
                    continue;
                }
            }

            if let Some(span) = span {
                spans.push(span);
            }
            if let Some(text) = text {
                texts.insert(text);
            }
            merged.push(item);
        }
    }

    merged
}

fn span_of(item: &Value) -> Option<(u64, u64)> {
    let interval = item.get("char_interval")?;
    let start = interval.get("start_pos")?.as_u64()?;
    let end = interval.get("end_pos")?.as_u64()?;
    (start < end).then_some((start, end))
}

fn text_of(item: &Value) -> Option<&str> {
    item.get("extraction_text").and_then(Value::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chunk(text: &str, char_offset: usize) -> TextChunk {
        TextChunk {
            text: text.to_string(),
            char_offset,
        }
    }

    #[test]
    fn test_align_locates_text() {
        let item = json!({"extraction_text": "the Tenant"});
        let aligned = align_item(item, &chunk("Rent is paid by the Tenant.", 100));

        assert_eq!(aligned["char_interval"]["start_pos"], 116);
        assert_eq!(aligned["char_interval"]["end_pos"], 126);
    }

    #[test]
    fn test_align_rebases_model_offsets() {
        let item = json!({"extraction_text": "x", "char_interval": {"start_pos": 3, "end_pos": 9}});
        let aligned = align_item(item, &chunk("irrelevant", 50));

        assert_eq!(aligned["char_interval"]["start_pos"], 53);
        assert_eq!(aligned["char_interval"]["end_pos"], 59);
    }

    #[test]
    fn test_align_leaves_unmatched_text_ungrounded() {
        let item = json!({"extraction_text": "not in chunk"});
        let aligned = align_item(item, &chunk("something else", 0));
        assert!(aligned.get("char_interval").is_none());
    }

    #[test]
    fn test_align_passes_through_non_objects() {
        assert_eq!(align_item(json!("junk"), &chunk("junk", 0)), json!("junk"));
    }

    #[test]
    fn test_align_counts_characters_not_bytes() {
        let item = json!({"extraction_text": "deposit"});
        let aligned = align_item(item, &chunk("€500 deposit", 0));
        assert_eq!(aligned["char_interval"]["start_pos"], 5);
    }

    #[test]
    fn test_merge_keeps_first_pass_and_new_spans() {
        let first = vec![
            json!({"extraction_text": "a", "char_interval": {"start_pos": 0, "end_pos": 10}}),
        ];
        let second = vec![
            json!({"extraction_text": "b", "char_interval": {"start_pos": 5, "end_pos": 15}}),
            json!({"extraction_text": "c", "char_interval": {"start_pos": 20, "end_pos": 30}}),
        ];

        let merged = merge_passes(vec![first, second]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0]["extraction_text"], "a");
        assert_eq!(merged[1]["extraction_text"], "c");
    }

    #[test]
    fn test_merge_dedupes_ungrounded_text() {
        let first = vec![json!({"extraction_text": "the Landlord"})];
        let second = vec![
            json!({"extraction_text": "the Landlord"}),
            json!({"extraction_text": "the Tenant"}),
            json!(17),
        ];

        let merged = merge_passes(vec![first, second]);
        assert_eq!(merged.len(), 2);
        assert_eq!(merged[1]["extraction_text"], "the Tenant");
    }

    #[test]
    fn test_merge_single_pass_is_identity() {
        let items = vec![json!(1), json!({"extraction_text": "x"})];
        assert_eq!(merge_passes(vec![items.clone()]), items);
    }
}
