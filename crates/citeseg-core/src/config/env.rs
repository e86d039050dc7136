use super::Config;

impl Config {
    pub(crate) fn apply_env_overrides(&mut self) {
        self.apply_env_overrides_chunking();
        self.apply_env_overrides_highlight();
    }

    fn apply_env_overrides_chunking(&mut self) {
        if let Ok(v) = std::env::var("CITESEG_CHUNK_TOKEN_SIZE") {
            if let Ok(size) = v.parse::<usize>() {
                self.chunking.chunk_token_size = size;
            } else {
                tracing::warn!("ignoring invalid CITESEG_CHUNK_TOKEN_SIZE value: {v}");
            }
        }
        if let Ok(v) = std::env::var("CITESEG_CHUNK_TOKEN_OVERLAP") {
            if let Ok(overlap) = v.parse::<usize>() {
                self.chunking.chunk_token_overlap = overlap;
            } else {
                tracing::warn!("ignoring invalid CITESEG_CHUNK_TOKEN_OVERLAP value: {v}");
            }
        }
        if let Ok(v) = std::env::var("CITESEG_TOKEN_TO_CHAR_RATIO") {
            if let Ok(ratio) = v.parse::<usize>() {
                self.chunking.token_to_char_ratio = ratio;
            } else {
                tracing::warn!("ignoring invalid CITESEG_TOKEN_TO_CHAR_RATIO value: {v}");
            }
        }
        if let Ok(v) = std::env::var("CITESEG_SPLIT_STRATEGY") {
            if let Ok(strategy) = serde_json::from_value(serde_json::Value::String(v.clone())) {
                self.chunking.strategy = strategy;
            } else {
                tracing::warn!("ignoring invalid CITESEG_SPLIT_STRATEGY value: {v}");
            }
        }
        if let Ok(v) = std::env::var("CITESEG_BLANK_DOCUMENTS") {
            if let Ok(policy) = serde_json::from_value(serde_json::Value::String(v.clone())) {
                self.chunking.blank_documents = policy;
            } else {
                tracing::warn!("ignoring invalid CITESEG_BLANK_DOCUMENTS value: {v}");
            }
        }
    }

    fn apply_env_overrides_highlight(&mut self) {
        if let Ok(v) = std::env::var("CITESEG_HIGHLIGHT_LABEL_KEY")
            && !v.trim().is_empty()
        {
            self.highlight.label_key = v;
        }
        if let Ok(v) = std::env::var("CITESEG_HIGHLIGHT_SNIPPET_CHARS") {
            if let Ok(chars) = v.parse::<usize>() {
                self.highlight.snippet_chars = chars;
            } else {
                tracing::warn!("ignoring invalid CITESEG_HIGHLIGHT_SNIPPET_CHARS value: {v}");
            }
        }
    }
}
