//! Split document text into model-sized chunks
//!
//! Chunks are contiguous slices of the source, so offsets the model reports
//! inside a chunk can be re-based onto the whole document.

/// A slice of the source text and where it starts
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextChunk {
    /// Chunk text, verbatim
    pub text: String,

    /// Offset of the first character in the source, in characters
    pub char_offset: usize,
}

/// Chunks text by paragraphs up to a character budget
pub struct TextChunker {
    buffer_size: usize,
}

impl TextChunker {
    /// Create a chunker; a zero budget is treated as one character
    pub fn new(buffer_size: usize) -> Self {
        Self {
            buffer_size: buffer_size.max(1),
        }
    }

    /// Chunk the given text
    pub fn chunk(&self, text: &str) -> Vec<TextChunk> {
        if text.chars().count() <= self.buffer_size {
            return vec![TextChunk {
                text: text.to_string(),
                char_offset: 0,
            }];
        }

        let mut chunks = Vec::new();
        let mut current = String::new();
        let mut current_len = 0;
        let mut current_start = 0;
        let mut position = 0;

        // Paragraphs keep their trailing separator so the pieces concatenate
        // back to the original text
        for paragraph in text.split_inclusive("\n\n") {
            let paragraph_len = paragraph.chars().count();

            if current_len > 0 && current_len + paragraph_len > self.buffer_size {
                chunks.push(TextChunk {
                    text: std::mem::take(&mut current),
                    char_offset: current_start,
                });
                current_len = 0;
            }

            if paragraph_len > self.buffer_size {
                chunks.extend(self.split_at_char_limit(paragraph, position));
            } else {
                if current_len == 0 {
                    current_start = position;
                }
                current.push_str(paragraph);
                current_len += paragraph_len;
            }

            position += paragraph_len;
        }

        if current_len > 0 {
            chunks.push(TextChunk {
                text: current,
                char_offset: current_start,
            });
        }

        chunks
    }

    /// Split text at character limit boundaries
    fn split_at_char_limit(&self, text: &str, base_offset: usize) -> Vec<TextChunk> {
        let chars: Vec<char> = text.chars().collect();
        chars
            .chunks(self.buffer_size)
            .enumerate()
            .map(|(idx, piece)| TextChunk {
                text: piece.iter().collect(),
                char_offset: base_offset + idx * self.buffer_size,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reassemble(chunks: &[TextChunk]) -> String {
        chunks.iter().map(|c| c.text.as_str()).collect()
    }

    #[test]
    fn test_no_chunking_needed_for_small_text() {
        let chunker = TextChunker::new(100);
        let chunks = chunker.chunk("Short text here.");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "Short text here.");
        assert_eq!(chunks[0].char_offset, 0);
    }

    #[test]
    fn test_chunk_by_paragraph_preserves_text() {
        let chunker = TextChunker::new(30);
        let text = "First paragraph here.\n\nSecond paragraph here.\n\nThird paragraph here.";
        let chunks = chunker.chunk(text);

        assert_eq!(chunks.len(), 3);
        assert_eq!(reassemble(&chunks), text);
        for chunk in &chunks {
            assert!(chunk.text.chars().count() <= 30);
        }
    }

    #[test]
    fn test_offsets_point_into_source() {
        let chunker = TextChunker::new(25);
        let text = "The Landlord agrees.\n\nThe Tenant pays $1,200.\n\nNotice is 30 days.";
        let chunks = chunker.chunk(text);

        let chars: Vec<char> = text.chars().collect();
        for chunk in &chunks {
            let len = chunk.text.chars().count();
            let slice: String = chars[chunk.char_offset..chunk.char_offset + len].iter().collect();
            assert_eq!(slice, chunk.text);
        }
    }

    #[test]
    fn test_paragraphs_combined_until_limit() {
        let chunker = TextChunker::new(50);
        let text = "One.\n\nTwo.\n\nThree.\n\n".repeat(5);
        let chunks = chunker.chunk(&text);

        assert!(chunks.len() < 15);
        assert_eq!(reassemble(&chunks), text);
    }

    #[test]
    fn test_very_long_single_paragraph() {
        let chunker = TextChunker::new(20);
        let text = "a".repeat(100);
        let chunks = chunker.chunk(&text);

        assert_eq!(chunks.len(), 5);
        assert_eq!(chunks[4].char_offset, 80);
    }

    #[test]
    fn test_multibyte_text_counts_characters() {
        let chunker = TextChunker::new(4);
        let text = "€€€€€€";
        let chunks = chunker.chunk(text);

        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[1].char_offset, 4);
        assert_eq!(chunks[1].text, "€€");
    }

    #[test]
    fn test_empty_text() {
        let chunks = TextChunker::new(100).chunk("");
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].text, "");
    }
}
