//! Sentence relevance scoring over citation-tagged chunks.
//!
//! Scoring never mutates a shared chunk: every entry point computes a fresh
//! [`SentenceScores`](citeseg_segment::SentenceScores) table for the query at
//! hand, so the same chunk can be scored for concurrent queries.

pub mod highlight;
pub mod scorer;
pub mod sources;

pub use highlight::{HighlightOptions, highlight, source_label};
pub use scorer::{
    LENGTH_WEIGHT, OPTIMAL_SENTENCE_CHARS, POSITION_WEIGHT, TERM_OVERLAP_WEIGHT,
    extract_relevant_sentences, most_relevant_sentence, score, score_sentences, top_k_sentences,
};
pub use sources::{format_source, format_sources};
