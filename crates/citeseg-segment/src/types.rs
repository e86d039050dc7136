use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::sanitize::{sanitize, sanitize_bytes};
use crate::sentence::Span;
use crate::text::{char_len, char_slice};

/// Opaque document metadata, shared read-only by every chunk cut from it.
pub type Metadata = BTreeMap<String, serde_json::Value>;

/// Raw input to chunk extraction.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub content: String,
    pub metadata: Arc<Metadata>,
}

impl Document {
    #[must_use]
    pub fn new(content: impl Into<String>, metadata: Metadata) -> Self {
        Self {
            content: content.into(),
            metadata: Arc::new(metadata),
        }
    }

    /// Build a document from raw bytes, repairing invalid UTF-8 and control
    /// characters.
    #[must_use]
    pub fn from_bytes(bytes: &[u8], metadata: Metadata) -> Self {
        Self::new(sanitize_bytes(bytes), metadata)
    }

    /// Sanitize `content` in place. Metadata is left untouched.
    pub fn sanitize(&mut self) {
        if let std::borrow::Cow::Owned(cleaned) = sanitize(&self.content) {
            self.content = cleaned;
        }
    }
}

/// Content hash identifying a chunk; equal content yields equal ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChunkId(pub u64);

impl ChunkId {
    /// 64-bit XXH3 of the content bytes.
    #[must_use]
    pub fn of(content: &str) -> Self {
        Self(xxhash_rust::xxh3::xxh3_64(content.as_bytes()))
    }
}

impl std::fmt::Display for ChunkId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:016x}", self.0)
    }
}

/// Per-sentence relevance scores, keyed by index into
/// [`Citation::sentence_offsets`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SentenceScores(BTreeMap<usize, f64>);

impl SentenceScores {
    pub fn insert(&mut self, index: usize, score: f64) {
        self.0.insert(index, score);
    }

    #[must_use]
    pub fn get(&self, index: usize) -> Option<f64> {
        self.0.get(&index).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, f64)> + '_ {
        self.0.iter().map(|(i, s)| (*i, *s))
    }

    /// Sentence indices ordered by descending score; ties keep the earlier
    /// sentence first.
    #[must_use]
    pub fn ranked(&self) -> Vec<usize> {
        let mut ranked: Vec<(usize, f64)> = self.iter().collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1).then(a.0.cmp(&b.0)));
        ranked.into_iter().map(|(i, _)| i).collect()
    }

    /// Index of the highest-scoring sentence.
    #[must_use]
    pub fn best(&self) -> Option<usize> {
        self.ranked().first().copied()
    }

    /// The `k` highest-scoring indices, returned in document order.
    #[must_use]
    pub fn top_k(&self, k: usize) -> Vec<usize> {
        let mut top: Vec<usize> = self.ranked().into_iter().take(k).collect();
        top.sort_unstable();
        top
    }
}

impl FromIterator<(usize, f64)> for SentenceScores {
    fn from_iter<I: IntoIterator<Item = (usize, f64)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Provenance of a chunk within its source document.
///
/// All offsets are character positions in the original document, including
/// for chunks whose content starts with overlap borrowed from the previous
/// chunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Citation {
    pub start_offset: usize,
    pub end_offset: usize,
    pub sentence_offsets: Vec<Span>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sentence_scores: Option<SentenceScores>,
}

impl Citation {
    #[must_use]
    pub fn new(start_offset: usize, end_offset: usize, sentence_offsets: Vec<Span>) -> Self {
        Self {
            start_offset,
            end_offset,
            sentence_offsets,
            sentence_scores: None,
        }
    }

    /// Sentence `index` mapped into chunk-local coordinates and clipped to
    /// `[0, content_len]`. `None` when the index is out of range or the span
    /// clips to nothing.
    #[must_use]
    pub fn local_span(&self, index: usize, content_len: usize) -> Option<Span> {
        let (start, end) = *self.sentence_offsets.get(index)?;
        let local_start = start.saturating_sub(self.start_offset);
        let local_end = end.saturating_sub(self.start_offset).min(content_len);
        (local_start < local_end).then_some((local_start, local_end))
    }

    /// Text of sentence `index`, sliced out of the chunk `content`.
    #[must_use]
    pub fn sentence_text<'c>(&self, content: &'c str, index: usize) -> Option<&'c str> {
        let (start, end) = self.local_span(index, char_len(content))?;
        Some(char_slice(content, start, end))
    }

    /// Text of the highest-scoring sentence, if scores are present.
    #[must_use]
    pub fn most_relevant_sentence<'c>(&self, content: &'c str) -> Option<&'c str> {
        let best = self.sentence_scores.as_ref()?.best()?;
        self.sentence_text(content, best)
    }
}

/// The unit handed to downstream extraction and indexing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: ChunkId,
    pub content: String,
    pub metadata: Arc<Metadata>,
    #[serde(default)]
    pub citation: Citation,
}

impl Chunk {
    /// Create a chunk, deriving its id from `content`.
    #[must_use]
    pub fn new(content: String, metadata: Arc<Metadata>, citation: Citation) -> Self {
        Self {
            id: ChunkId::of(&content),
            content,
            metadata,
            citation,
        }
    }

    /// Replace the citation's sentence scores, returning the updated chunk.
    #[must_use]
    pub fn with_sentence_scores(mut self, scores: Option<SentenceScores>) -> Self {
        self.citation.sentence_scores = scores;
        self
    }
}
