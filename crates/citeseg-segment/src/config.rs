use serde::{Deserialize, Serialize};

use crate::error::{ChunkingError, Result, check_separators, check_sizes};
use crate::splitter::SplitterConfig;

/// Characters assumed per token when translating token budgets to characters.
pub const TOKEN_TO_CHAR_RATIO: usize = 4;

/// Split markers in priority order: paragraph and page breaks first, then
/// sentence-ending punctuation.
pub const DEFAULT_SEPARATORS: [&str; 10] = [
    "\n\n\n", "\n\n", "\r\n\r\n", "。", "．", ".", "！", "!", "？", "?",
];

/// How a document over the size limit is cut into atomic units before merging.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SplitStrategy {
    /// Regex alternation over the configured separators.
    #[default]
    Separators,
    /// One unit per detected sentence.
    Sentences,
}

/// What extraction does with empty or all-whitespace documents.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankDocumentPolicy {
    /// Produce no chunks.
    #[default]
    Skip,
    /// Produce one chunk carrying the raw content.
    Keep,
}

/// Chunking configuration, fixed for the lifetime of a `ChunkingService`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ChunkingConfig {
    pub separators: Vec<String>,
    pub chunk_token_size: usize,
    pub chunk_token_overlap: usize,
    pub token_to_char_ratio: usize,
    pub strategy: SplitStrategy,
    pub blank_documents: BlankDocumentPolicy,
}

impl Default for ChunkingConfig {
    fn default() -> Self {
        Self {
            separators: DEFAULT_SEPARATORS.iter().map(|s| (*s).to_owned()).collect(),
            chunk_token_size: 800,
            chunk_token_overlap: 100,
            token_to_char_ratio: TOKEN_TO_CHAR_RATIO,
            strategy: SplitStrategy::default(),
            blank_documents: BlankDocumentPolicy::default(),
        }
    }
}

impl ChunkingConfig {
    /// Maximum chunk length in characters.
    #[must_use]
    pub fn max_chars(&self) -> usize {
        self.chunk_token_size.saturating_mul(self.token_to_char_ratio)
    }

    /// Overlap length in characters.
    #[must_use]
    pub fn overlap_chars(&self) -> usize {
        self.chunk_token_overlap
            .saturating_mul(self.token_to_char_ratio)
    }

    /// # Errors
    ///
    /// Returns an error for a zero size or ratio, an overlap not smaller than
    /// the size, or an empty separator.
    pub fn validate(&self) -> Result<()> {
        if self.token_to_char_ratio == 0 {
            return Err(ChunkingError::InvalidRatio);
        }
        check_sizes(self.chunk_token_size, self.chunk_token_overlap)?;
        check_separators(&self.separators)
    }

    #[must_use]
    pub fn splitter_config(&self) -> SplitterConfig {
        SplitterConfig {
            max_chars: self.max_chars(),
            overlap_chars: self.overlap_chars(),
            separators: self.separators.clone(),
            strategy: self.strategy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_translate_to_chars() {
        let config = ChunkingConfig::default();
        assert_eq!(config.max_chars(), 3200);
        assert_eq!(config.overlap_chars(), 400);
        assert_eq!(config.separators.len(), DEFAULT_SEPARATORS.len());
        assert_eq!(config.separators[0], "\n\n\n");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn zero_ratio_rejected() {
        let config = ChunkingConfig {
            token_to_char_ratio: 0,
            ..ChunkingConfig::default()
        };
        assert!(matches!(config.validate(), Err(ChunkingError::InvalidRatio)));
    }

    #[test]
    fn zero_size_rejected() {
        let config = ChunkingConfig {
            chunk_token_size: 0,
            chunk_token_overlap: 0,
            ..ChunkingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ChunkingError::InvalidChunkSize)
        ));
    }

    #[test]
    fn overlap_not_smaller_than_size_rejected() {
        let config = ChunkingConfig {
            chunk_token_size: 100,
            chunk_token_overlap: 100,
            ..ChunkingConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ChunkingError::OverlapTooLarge {
                overlap: 100,
                size: 100
            })
        ));
    }

    #[test]
    fn deserializes_partial_table() {
        let config: ChunkingConfig = serde_json::from_str(
            r#"{"chunk_token_size": 50, "strategy": "sentences", "blank_documents": "keep"}"#,
        )
        .unwrap();
        assert_eq!(config.chunk_token_size, 50);
        assert_eq!(config.chunk_token_overlap, 100);
        assert_eq!(config.strategy, SplitStrategy::Sentences);
        assert_eq!(config.blank_documents, BlankDocumentPolicy::Keep);
    }

    #[test]
    fn splitter_config_carries_char_sizes() {
        let config = ChunkingConfig {
            chunk_token_size: 10,
            chunk_token_overlap: 2,
            ..ChunkingConfig::default()
        };
        let splitter = config.splitter_config();
        assert_eq!(splitter.max_chars, 40);
        assert_eq!(splitter.overlap_chars, 8);
    }
}
