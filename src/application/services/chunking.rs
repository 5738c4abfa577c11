pub trait TextSplitter {
    fn split_text(&self, text: &str) -> Vec<String>;
}

/// Cuts text into consecutive windows of `window` characters. Windows shorter
/// than `min_length` are dropped; only the final remainder can be.
#[derive(Debug, Clone)]
pub struct FixedWindowChunker {
    window: usize,
    min_length: usize,
}

pub const DEFAULT_CHUNK_SIZE: usize = 1000;
pub const DEFAULT_MIN_CHUNK_LENGTH: usize = 50;

impl Default for FixedWindowChunker {
    fn default() -> Self {
        Self::new(DEFAULT_CHUNK_SIZE, DEFAULT_MIN_CHUNK_LENGTH)
    }
}

impl FixedWindowChunker {
    pub fn new(window: usize, min_length: usize) -> Self {
        Self {
            window: window.max(1),
            min_length,
        }
    }

    pub fn min_length(&self) -> usize {
        self.min_length
    }
}

impl TextSplitter for FixedWindowChunker {
    fn split_text(&self, text: &str) -> Vec<String> {
        let mut chunks = Vec::new();
        // Byte offsets of every character plus the end of the string, so
        // windows are counted in characters but sliced without copying.
        let boundaries: Vec<usize> = text
            .char_indices()
            .map(|(offset, _)| offset)
            .chain(std::iter::once(text.len()))
            .collect();
        let char_count = boundaries.len() - 1;

        let mut start = 0;
        while start < char_count {
            let end = (start + self.window).min(char_count);
            if end - start >= self.min_length {
                chunks.push(text[boundaries[start]..boundaries[end]].to_string());
            }
            start = end;
        }

        chunks
    }
}
