use std::borrow::Cow;

use citeseg_segment::text::snippet;
use citeseg_segment::{Chunk, Metadata};
use serde::{Deserialize, Serialize};

use crate::scorer::{most_relevant_sentence, score};

const DEFAULT_LABEL: &str = "document";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct HighlightOptions {
    /// Metadata key whose value labels the source of a highlight.
    pub label_key: String,
    /// Leading characters shown when no sentence of a chunk can be scored.
    pub snippet_chars: usize,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            label_key: "title".into(),
            snippet_chars: 150,
        }
    }
}

/// One evidence line per retrieved chunk, in input order.
///
/// Each line is `• <best sentence> [Source: <label>]`. Chunks without a
/// scorable sentence contribute a leading snippet of their content instead.
/// The retrieval relevance paired with each chunk is carried through
/// untouched; only the sentence scores for `query` pick the evidence.
#[must_use]
pub fn highlight(results: &[(Chunk, f64)], query: &str, options: &HighlightOptions) -> Vec<String> {
    let lines: Vec<String> = results
        .iter()
        .map(|(chunk, _relevance)| {
            let scored = score(chunk, query);
            let label = source_label(&scored.metadata, &options.label_key);
            let evidence = match most_relevant_sentence(&scored) {
                Some(sentence) if !sentence.trim().is_empty() => sentence.trim().to_owned(),
                _ => snippet(&scored.content, options.snippet_chars)
                    .trim()
                    .to_owned(),
            };
            format!("• {evidence} [Source: {label}]")
        })
        .collect();

    tracing::debug!(chunks = results.len(), "highlighted evidence");
    lines
}

/// Display label for a source: the string value under `key`, any other JSON
/// value rendered as JSON, or `"document"` when missing or null.
#[must_use]
pub fn source_label<'m>(metadata: &'m Metadata, key: &str) -> Cow<'m, str> {
    match metadata.get(key) {
        Some(serde_json::Value::String(label)) => Cow::Borrowed(label.as_str()),
        Some(serde_json::Value::Null) | None => Cow::Borrowed(DEFAULT_LABEL),
        Some(other) => Cow::Owned(other.to_string()),
    }
}
