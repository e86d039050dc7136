use std::collections::HashSet;

use citeseg_segment::text::{char_len, snippet};
use citeseg_segment::{Chunk, SentenceScores};

pub const TERM_OVERLAP_WEIGHT: f64 = 0.6;
pub const POSITION_WEIGHT: f64 = 0.3;
pub const LENGTH_WEIGHT: f64 = 0.1;

/// Sentence length, in characters, that earns the full length score.
pub const OPTIMAL_SENTENCE_CHARS: usize = 100;

/// Leading characters returned by [`extract_relevant_sentences`] when no
/// sentence can be scored.
const FALLBACK_SNIPPET_CHARS: usize = 200;

/// Score every sentence of `chunk` against `query`.
///
/// Sentences whose span clips to nothing inside the chunk, or whose text is
/// blank, get no entry. Returns `None` when no sentence was scored.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn score_sentences(chunk: &Chunk, query: &str) -> Option<SentenceScores> {
    let citation = &chunk.citation;
    if citation.sentence_offsets.is_empty() {
        return None;
    }

    let query_terms = terms(query);
    let total = citation.sentence_offsets.len();
    let mut scores = SentenceScores::default();

    for index in 0..total {
        let Some(sentence) = citation.sentence_text(&chunk.content, index) else {
            continue;
        };
        let sentence = sentence.trim();
        if sentence.is_empty() {
            continue;
        }

        let sentence_terms = terms(sentence);
        let term_overlap = if query_terms.is_empty() || sentence_terms.is_empty() {
            0.0
        } else {
            query_terms.intersection(&sentence_terms).count() as f64 / query_terms.len() as f64
        };
        let position = 1.0 - index as f64 / total.max(1) as f64;
        let optimal = OPTIMAL_SENTENCE_CHARS as f64;
        let length = 1.0 - ((char_len(sentence) as f64 - optimal).abs() / optimal).min(1.0);

        scores.insert(
            index,
            TERM_OVERLAP_WEIGHT * term_overlap + POSITION_WEIGHT * position + LENGTH_WEIGHT * length,
        );
    }

    if scores.is_empty() { None } else { Some(scores) }
}

/// Copy of `chunk` whose citation carries the scores for `query`.
#[must_use]
pub fn score(chunk: &Chunk, query: &str) -> Chunk {
    chunk
        .clone()
        .with_sentence_scores(score_sentences(chunk, query))
}

/// Highest-scoring sentence of an already scored chunk.
#[must_use]
pub fn most_relevant_sentence(chunk: &Chunk) -> Option<&str> {
    chunk.citation.most_relevant_sentence(&chunk.content)
}

/// Up to `k` best sentences of an already scored chunk, in reading order.
#[must_use]
pub fn top_k_sentences(chunk: &Chunk, k: usize) -> Vec<&str> {
    let Some(scores) = &chunk.citation.sentence_scores else {
        return Vec::new();
    };
    scores
        .top_k(k)
        .into_iter()
        .filter_map(|index| chunk.citation.sentence_text(&chunk.content, index))
        .collect()
}

/// Score `chunk` for `query` and return up to `max_sentences` sentences in
/// reading order. Falls back to a leading snippet of the content when nothing
/// can be scored.
#[must_use]
pub fn extract_relevant_sentences(chunk: &Chunk, query: &str, max_sentences: usize) -> Vec<String> {
    let Some(scores) = score_sentences(chunk, query) else {
        return vec![snippet(&chunk.content, FALLBACK_SNIPPET_CHARS)];
    };
    scores
        .top_k(max_sentences)
        .into_iter()
        .filter_map(|index| chunk.citation.sentence_text(&chunk.content, index))
        .map(str::to_owned)
        .collect()
}

fn terms(text: &str) -> HashSet<String> {
    text.split_whitespace()
        .map(|token| token.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|token| !token.is_empty())
        .map(str::to_lowercase)
        .collect()
}
