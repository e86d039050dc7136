use std::sync::Arc;

use crate::config::{BlankDocumentPolicy, ChunkingConfig};
use crate::dedup::dedupe;
use crate::error::Result;
use crate::sanitize::sanitize;
use crate::sentence::{find_sentence_boundaries, sentence_offsets_with_base};
use crate::splitter::TextSplitter;
use crate::text::char_len;
use crate::types::{Chunk, Citation, Document};

/// Turns documents into deduplicated, citation-tagged chunks.
///
/// Cloning is cheap; clones share the compiled configuration.
#[derive(Debug, Clone)]
pub struct ChunkingService {
    inner: Arc<Inner>,
}

#[derive(Debug)]
struct Inner {
    splitter: TextSplitter,
    blank_documents: BlankDocumentPolicy,
}

impl ChunkingService {
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn new(config: &ChunkingConfig) -> Result<Self> {
        config.validate()?;
        let splitter = TextSplitter::new(config.splitter_config())?;
        Ok(Self {
            inner: Arc::new(Inner {
                splitter,
                blank_documents: config.blank_documents,
            }),
        })
    }

    /// Extract unique chunks from each document, one group per document in
    /// input order. Documents are sanitized in place before splitting.
    #[allow(clippy::unused_async)]
    pub async fn extract<I>(&self, documents: I) -> Vec<Vec<Chunk>>
    where
        I: IntoIterator<Item = Document>,
    {
        documents
            .into_iter()
            .map(|document| self.extract_document(document))
            .collect()
    }

    /// Like [`extract`](Self::extract), but documents are processed on the
    /// blocking thread pool in parallel. Output order still follows input
    /// order.
    pub async fn extract_concurrent(&self, documents: Vec<Document>) -> Vec<Vec<Chunk>> {
        let handles: Vec<_> = documents
            .into_iter()
            .map(|document| {
                let service = self.clone();
                tokio::task::spawn_blocking(move || service.extract_document(document))
            })
            .collect();

        let mut groups = Vec::with_capacity(handles.len());
        for (index, handle) in handles.into_iter().enumerate() {
            match handle.await {
                Ok(chunks) => groups.push(chunks),
                Err(e) => {
                    tracing::error!(document = index, "chunk extraction task failed: {e}");
                    groups.push(Vec::new());
                }
            }
        }
        groups
    }

    /// Sanitize, split and deduplicate a single document.
    #[must_use]
    pub fn extract_document(&self, mut document: Document) -> Vec<Chunk> {
        document.sanitize();
        dedupe(self.chunk_document(&document))
    }

    /// Split one document into chunks without deduplication. The content is
    /// sanitized on a copy; `document` itself is not modified.
    #[must_use]
    pub fn chunk_document(&self, document: &Document) -> Vec<Chunk> {
        let content = sanitize(&document.content);
        let content = content.as_ref();

        if content.trim().is_empty() {
            return match self.inner.blank_documents {
                BlankDocumentPolicy::Skip => {
                    tracing::trace!("skipping blank document");
                    Vec::new()
                }
                BlankDocumentPolicy::Keep => vec![Chunk::new(
                    content.to_owned(),
                    Arc::clone(&document.metadata),
                    Citation::new(0, char_len(content), Vec::new()),
                )],
            };
        }

        let total = char_len(content);
        if total <= self.inner.splitter.max_chars() {
            tracing::trace!(chars = total, "document fits in a single chunk");
            return vec![Chunk::new(
                content.to_owned(),
                Arc::clone(&document.metadata),
                Citation::new(0, total, find_sentence_boundaries(content)),
            )];
        }

        let chunks: Vec<Chunk> = self
            .inner
            .splitter
            .split(content)
            .into_iter()
            .map(|segment| {
                let sentences = sentence_offsets_with_base(&segment.text, segment.start);
                Chunk::new(
                    segment.text,
                    Arc::clone(&document.metadata),
                    Citation::new(segment.start, segment.end, sentences),
                )
            })
            .collect();

        tracing::debug!(chars = total, chunks = chunks.len(), "document split");
        chunks
    }
}
