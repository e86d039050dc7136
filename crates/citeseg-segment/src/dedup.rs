use std::collections::HashSet;

use crate::types::Chunk;

/// Drop chunks whose id was already seen, keeping first occurrences in order.
///
/// The seen-set lives only for this call; chunks from separate documents are
/// never compared.
#[must_use]
pub fn dedupe(chunks: Vec<Chunk>) -> Vec<Chunk> {
    let mut seen = HashSet::with_capacity(chunks.len());
    let before = chunks.len();
    let unique: Vec<Chunk> = chunks
        .into_iter()
        .filter(|chunk| seen.insert(chunk.id))
        .collect();
    if unique.len() < before {
        tracing::debug!(
            dropped = before - unique.len(),
            kept = unique.len(),
            "dropped duplicate chunks"
        );
    }
    unique
}
