//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`RecursiveChunker`],
//! which splits text hierarchically by paragraph breaks, line breaks, and
//! spaces, falling back to hard character windows.

/// A strategy for splitting source text into chunks.
///
/// Implementations return plain chunk texts; identifiers and embeddings are
/// attached later by the ingestion pipeline.
pub trait Chunker: Send + Sync {
    /// Split text into chunks.
    ///
    /// Returns an empty `Vec` for empty input. Splitting is deterministic:
    /// the same input and parameters always produce the same sequence.
    fn chunk(&self, text: &str) -> Vec<String>;
}

/// Separator precedence: paragraph break, line break, space, then hard split.
const SEPARATORS: &[&str] = &["\n\n", "\n", " "];

/// Splits text recursively by separator precedence with configurable overlap.
///
/// Segments are merged greedily up to `chunk_size`. A segment that exceeds
/// `chunk_size` on its own is split again with the next separator in the
/// precedence list; text with no usable separator is split into fixed-size
/// character windows. The trailing `chunk_overlap` characters of each chunk
/// are carried into the next one.
///
/// # Example
///
/// ```rust,ignore
/// use ragserve_core::RecursiveChunker;
///
/// let chunker = RecursiveChunker::new(500, 50);
/// let chunks = chunker.chunk(&text);
/// ```
#[derive(Debug, Clone)]
pub struct RecursiveChunker {
    chunk_size: usize,
    chunk_overlap: usize,
}

impl RecursiveChunker {
    /// Create a new `RecursiveChunker`.
    ///
    /// # Arguments
    ///
    /// * `chunk_size` — maximum number of characters per chunk
    /// * `chunk_overlap` — number of overlapping characters between consecutive chunks
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }
}

impl Chunker for RecursiveChunker {
    fn chunk(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }
        split_recursive(text, self.chunk_size, self.chunk_overlap, SEPARATORS)
    }
}

/// Split text by the first separator, then merge segments into chunks that
/// respect `chunk_size`. Oversized segments recurse to the next separator.
fn split_recursive(
    text: &str,
    chunk_size: usize,
    chunk_overlap: usize,
    separators: &[&str],
) -> Vec<String> {
    if text.len() <= chunk_size {
        return vec![text.to_string()];
    }

    let Some((separator, remaining)) = separators.split_first() else {
        return split_by_size(text, chunk_size, chunk_overlap);
    };

    let segments = split_keeping_separator(text, separator);
    if segments.len() <= 1 {
        // Separator not present — try the next one.
        return split_recursive(text, chunk_size, chunk_overlap, remaining);
    }

    let mut chunks: Vec<String> = Vec::new();
    let mut current = String::new();

    for segment in segments {
        if !current.is_empty() && current.len() + segment.len() > chunk_size {
            flush(&mut chunks, current, chunk_size, chunk_overlap, remaining);
            // Seed the next chunk with the tail of the previous one.
            current = chunks.last().map(|c| overlap_tail(c, chunk_overlap)).unwrap_or_default();
        }
        current.push_str(segment);
    }

    if !current.is_empty() {
        flush(&mut chunks, current, chunk_size, chunk_overlap, remaining);
    }

    chunks
}

/// Emit a merged chunk, recursing with the remaining separators if it still
/// exceeds `chunk_size`.
fn flush(
    chunks: &mut Vec<String>,
    current: String,
    chunk_size: usize,
    chunk_overlap: usize,
    separators: &[&str],
) {
    if current.len() > chunk_size {
        chunks.extend(split_recursive(&current, chunk_size, chunk_overlap, separators));
    } else {
        chunks.push(current);
    }
}

/// Split text at a separator while keeping the separator attached to the
/// preceding segment.
fn split_keeping_separator<'a>(text: &'a str, separator: &str) -> Vec<&'a str> {
    let mut result = Vec::new();
    let mut start = 0;

    while let Some(pos) = text[start..].find(separator) {
        let end = start + pos + separator.len();
        result.push(&text[start..end]);
        start = end;
    }

    if start < text.len() {
        result.push(&text[start..]);
    }

    result
}

/// The last `overlap` bytes of a chunk, snapped forward to a char boundary.
fn overlap_tail(chunk: &str, overlap: usize) -> String {
    if overlap == 0 {
        return String::new();
    }
    if chunk.len() <= overlap {
        return chunk.to_string();
    }
    let mut start = chunk.len() - overlap;
    while !chunk.is_char_boundary(start) {
        start += 1;
    }
    chunk[start..].to_string()
}

/// Hard character-window splitting with overlap. The last resort when no
/// separator level fits.
fn split_by_size(text: &str, chunk_size: usize, chunk_overlap: usize) -> Vec<String> {
    if text.is_empty() {
        return Vec::new();
    }

    let mut chunks = Vec::new();
    let mut start = 0;

    loop {
        let mut end = (start + chunk_size).min(text.len());
        while end > start && !text.is_char_boundary(end) {
            end -= 1;
        }
        if end == start {
            // A single char wider than the window; take it whole.
            end = text[start..]
                .char_indices()
                .nth(1)
                .map(|(i, _)| start + i)
                .unwrap_or(text.len());
        }
        chunks.push(text[start..end].to_string());

        if end == text.len() {
            break;
        }

        let step = chunk_size.saturating_sub(chunk_overlap).max(1);
        let mut next = start + step;
        while next < text.len() && !text.is_char_boundary(next) {
            next += 1;
        }
        start = next.min(end);
        if start >= text.len() {
            break;
        }
    }

    chunks
}
