use citeseg_score::HighlightOptions;
use citeseg_segment::ChunkingConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub chunking: ChunkingConfig,
    #[serde(default)]
    pub highlight: HighlightConfig,
}

fn default_label_key() -> String {
    "title".into()
}

fn default_snippet_chars() -> usize {
    150
}

fn default_max_sentences() -> usize {
    3
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct HighlightConfig {
    #[serde(default = "default_label_key")]
    pub label_key: String,
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
    /// Sentences returned per chunk by relevant-sentence extraction.
    #[serde(default = "default_max_sentences")]
    pub max_sentences: usize,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            label_key: default_label_key(),
            snippet_chars: default_snippet_chars(),
            max_sentences: default_max_sentences(),
        }
    }
}

impl HighlightConfig {
    #[must_use]
    pub fn options(&self) -> HighlightOptions {
        HighlightOptions {
            label_key: self.label_key.clone(),
            snippet_chars: self.snippet_chars,
        }
    }
}
