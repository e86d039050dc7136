//! Citation-preserving document segmentation.
//!
//! Documents are sanitized, split into size-bounded chunks along separator or
//! sentence boundaries, optionally overlapped, and deduplicated per document.
//! Every chunk carries a [`Citation`] mapping its content and sentences back to
//! character offsets in the source document.

pub mod config;
pub mod dedup;
pub mod error;
pub mod sanitize;
pub mod sentence;
pub mod service;
pub mod splitter;
pub mod text;
pub mod types;

pub use config::{
    BlankDocumentPolicy, ChunkingConfig, DEFAULT_SEPARATORS, SplitStrategy, TOKEN_TO_CHAR_RATIO,
};
pub use dedup::dedupe;
pub use error::{ChunkingError, Result};
pub use sanitize::{sanitize, sanitize_bytes};
pub use sentence::{Span, find_sentence_boundaries, sentence_offsets_with_base};
pub use service::ChunkingService;
pub use splitter::{Segment, SplitterConfig, TextSplitter};
pub use types::{Chunk, ChunkId, Citation, Document, Metadata, SentenceScores};
