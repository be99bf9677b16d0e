//! Document chunking.
//!
//! This module provides the [`Chunker`] trait and [`RecursiveChunker`], which
//! splits text hierarchically by paragraphs, sentences, then words, falling
//! back to hard character cuts, with a configurable overlap between
//! consecutive chunks.

use crate::document::{Chunk, Document};

/// Separator hierarchy, largest semantic boundary first.
const SEPARATORS: [&str; 5] = ["\n\n", ". ", "! ", "? ", " "];

/// A strategy for splitting documents into chunks.
pub trait Chunker: Send + Sync {
    /// Split a document into chunks.
    ///
    /// Returns an empty `Vec` if the document has empty text. Every chunk
    /// carries the source document ID and its byte offset within the
    /// document text.
    fn chunk(&self, document: &Document) -> Vec<Chunk>;
}

/// Splits text hierarchically: paragraphs → sentences → words → characters.
///
/// Text is first broken at the largest separator that applies, then adjacent
/// pieces are merged greedily into chunks of at most `chunk_size` characters.
/// Each chunk after the first starts with the tail of the previous chunk,
/// approximately `chunk_overlap` characters long; the overlap is dropped when
/// carrying it would push a chunk past `chunk_size`. Every produced chunk is
/// a contiguous substring of the input, so concatenating chunks with their
/// overlaps removed reconstructs the original text.
///
/// # Example
///
/// ```rust,ignore
/// use rag_engine::RecursiveChunker;
///
/// let chunker = RecursiveChunker::new(1000, 100);
/// let chunks = chunker.chunk(&document);
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
    /// * `chunk_overlap` — approximate overlap between consecutive chunks;
    ///   must be less than `chunk_size`
    pub fn new(chunk_size: usize, chunk_overlap: usize) -> Self {
        Self { chunk_size, chunk_overlap }
    }

    /// Split raw text into `(byte_offset, text)` pairs.
    pub fn split_text(&self, text: &str) -> Vec<(usize, String)> {
        if text.is_empty() {
            return Vec::new();
        }
        let pieces = decompose(text, 0, text.len(), self.chunk_size, self.chunk_overlap, &SEPARATORS);
        merge_pieces(text, &pieces, self.chunk_size, self.chunk_overlap)
    }
}

impl Chunker for RecursiveChunker {
    fn chunk(&self, document: &Document) -> Vec<Chunk> {
        self.split_text(&document.text)
            .into_iter()
            .map(|(offset, text)| Chunk { text, source_id: document.id.clone(), offset })
            .collect()
    }
}

/// A contiguous byte range of the input with its character length cached.
#[derive(Debug, Clone, Copy)]
struct Piece {
    start: usize,
    end: usize,
    chars: usize,
}

/// Break `text[start..end]` into pieces of at most `max_chars` characters,
/// preferring the largest separator that splits the range. Pieces keep their
/// trailing separator, so consecutive pieces are contiguous in the input.
fn decompose(
    text: &str,
    start: usize,
    end: usize,
    max_chars: usize,
    overlap: usize,
    separators: &[&str],
) -> Vec<Piece> {
    let chars = text[start..end].chars().count();
    if chars <= max_chars {
        return vec![Piece { start, end, chars }];
    }

    if let Some((separator, rest)) = separators.split_first() {
        let segments = split_keeping_separator(text, start, end, separator);
        if segments.len() > 1 {
            return segments
                .into_iter()
                .flat_map(|(s, e)| decompose(text, s, e, max_chars, overlap, rest))
                .collect();
        }
        // Separator absent from this range — try the next level down.
        return decompose(text, start, end, max_chars, overlap, rest);
    }

    hard_cut(text, start, end, max_chars, overlap)
}

/// Split a byte range at a separator, keeping the separator attached to the
/// preceding segment.
fn split_keeping_separator(
    text: &str,
    start: usize,
    end: usize,
    separator: &str,
) -> Vec<(usize, usize)> {
    let mut segments = Vec::new();
    let mut cursor = start;

    while let Some(pos) = text[cursor..end].find(separator) {
        let segment_end = cursor + pos + separator.len();
        segments.push((cursor, segment_end));
        cursor = segment_end;
    }

    if cursor < end {
        segments.push((cursor, end));
    }

    segments
}

/// Last-resort character splitting for text with no usable separators.
///
/// Cuts are placed every `max_chars - overlap` characters so that the merge
/// step can re-attach the overlap without exceeding `max_chars`.
fn hard_cut(text: &str, start: usize, end: usize, max_chars: usize, overlap: usize) -> Vec<Piece> {
    // Byte offsets of every character boundary in the range, inclusive of `end`.
    let bounds: Vec<usize> = text[start..end]
        .char_indices()
        .map(|(i, _)| start + i)
        .chain(std::iter::once(end))
        .collect();

    let step = max_chars.saturating_sub(overlap).max(1);
    let mut pieces = Vec::new();
    let mut i = 0;

    while i + 1 < bounds.len() {
        let j = (i + step).min(bounds.len() - 1);
        pieces.push(Piece { start: bounds[i], end: bounds[j], chars: j - i });
        i = j;
    }

    pieces
}

/// Byte offset `overlap_chars` characters before `end`, clamped to a
/// character boundary.
fn overlap_boundary(text: &str, end: usize, overlap_chars: usize) -> usize {
    let mut idx = end;
    for _ in 0..overlap_chars {
        match text[..idx].char_indices().next_back() {
            Some((i, _)) => idx = i,
            None => break,
        }
    }
    idx
}

/// Merge contiguous pieces greedily into chunks of at most `max_chars`
/// characters, carrying an overlap tail from each emitted chunk into the
/// next when it fits.
fn merge_pieces(
    text: &str,
    pieces: &[Piece],
    max_chars: usize,
    overlap: usize,
) -> Vec<(usize, String)> {
    let mut chunks = Vec::new();
    let mut current: Option<(usize, usize, usize)> = None; // (start, end, chars)

    for piece in pieces {
        match current {
            None => current = Some((piece.start, piece.end, piece.chars)),
            Some((start, _, chars)) if chars + piece.chars <= max_chars => {
                current = Some((start, piece.end, chars + piece.chars));
            }
            Some((start, end, _)) => {
                chunks.push((start, text[start..end].to_string()));

                // Begin the next chunk with the tail of the previous one,
                // unless that would breach the size cap.
                let tail_start = overlap_boundary(text, end, overlap);
                let tail_chars = text[tail_start..end].chars().count();
                if tail_chars + piece.chars <= max_chars {
                    current = Some((tail_start, piece.end, tail_chars + piece.chars));
                } else {
                    current = Some((piece.start, piece.end, piece.chars));
                }
            }
        }
    }

    if let Some((start, end, _)) = current {
        chunks.push((start, text[start..end].to_string()));
    }

    chunks
}
