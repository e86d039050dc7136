use citeseg_segment::Chunk;

/// `[<chunk id>] <content>`, the form in which a chunk is offered to answer
/// generation so the answer can cite it by id.
#[must_use]
pub fn format_source(chunk: &Chunk) -> String {
    format!("[{}] {}", chunk.id, chunk.content.trim())
}

/// Render `chunks` as a sources list, one entry per chunk separated by a blank
/// line.
#[must_use]
pub fn format_sources(chunks: &[Chunk]) -> String {
    chunks
        .iter()
        .map(format_source)
        .collect::<Vec<_>>()
        .join("\n\n")
}
