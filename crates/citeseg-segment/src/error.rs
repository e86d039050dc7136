//! Error types for citeseg-segment.

/// Configuration errors raised when building a splitter or chunking service.
///
/// Segmentation itself never fails; these only surface at construction time.
#[derive(Debug, thiserror::Error)]
pub enum ChunkingError {
    /// Chunk size resolved to zero.
    #[error("chunk size must be greater than zero")]
    InvalidChunkSize,

    /// Overlap is not smaller than the chunk size.
    #[error("chunk overlap ({overlap}) must be smaller than chunk size ({size})")]
    OverlapTooLarge { overlap: usize, size: usize },

    /// Token-to-character ratio of zero.
    #[error("token-to-character ratio must be greater than zero")]
    InvalidRatio,

    /// An empty string in the separator list.
    #[error("separator list contains an empty separator")]
    EmptySeparator,

    /// The separator alternation failed to compile.
    #[error("separator pattern error: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type alias using `ChunkingError`.
pub type Result<T> = std::result::Result<T, ChunkingError>;

pub(crate) fn check_sizes(size: usize, overlap: usize) -> Result<()> {
    if size == 0 {
        return Err(ChunkingError::InvalidChunkSize);
    }
    if overlap >= size {
        return Err(ChunkingError::OverlapTooLarge { overlap, size });
    }
    Ok(())
}

pub(crate) fn check_separators<S: AsRef<str>>(separators: &[S]) -> Result<()> {
    if separators.iter().any(|s| s.as_ref().is_empty()) {
        return Err(ChunkingError::EmptySeparator);
    }
    Ok(())
}
