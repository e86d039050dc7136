use std::io::Write;

use citeseg_segment::{BlankDocumentPolicy, SplitStrategy};
use serial_test::serial;

use super::*;

const ENV_KEYS: [&str; 7] = [
    "CITESEG_CHUNK_TOKEN_SIZE",
    "CITESEG_CHUNK_TOKEN_OVERLAP",
    "CITESEG_TOKEN_TO_CHAR_RATIO",
    "CITESEG_SPLIT_STRATEGY",
    "CITESEG_BLANK_DOCUMENTS",
    "CITESEG_HIGHLIGHT_LABEL_KEY",
    "CITESEG_HIGHLIGHT_SNIPPET_CHARS",
];

fn clear_env() {
    for key in ENV_KEYS {
        unsafe { std::env::remove_var(key) };
    }
}

#[test]
fn defaults() {
    let config = Config::default();
    assert_eq!(config.chunking.chunk_token_size, 800);
    assert_eq!(config.chunking.chunk_token_overlap, 100);
    assert_eq!(config.chunking.token_to_char_ratio, 4);
    assert_eq!(config.chunking.strategy, SplitStrategy::Separators);
    assert_eq!(config.chunking.blank_documents, BlankDocumentPolicy::Skip);
    assert_eq!(config.highlight.label_key, "title");
    assert_eq!(config.highlight.snippet_chars, 150);
    assert_eq!(config.highlight.max_sentences, 3);
    assert!(config.validate().is_ok());
}

#[test]
#[serial]
fn defaults_when_file_missing() {
    clear_env();
    let dir = tempfile::tempdir().unwrap();
    let config = Config::load(&dir.path().join("absent.toml")).unwrap();
    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn parse_valid_toml() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("test.toml");
    let mut f = std::fs::File::create(&path).unwrap();
    write!(
        f,
        r#"
[chunking]
chunk_token_size = 200
chunk_token_overlap = 20
separators = ["\n\n", "."]
strategy = "sentences"
blank_documents = "keep"

[highlight]
label_key = "source"
max_sentences = 5
"#
    )
    .unwrap();

    clear_env();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.chunking.chunk_token_size, 200);
    assert_eq!(config.chunking.chunk_token_overlap, 20);
    assert_eq!(config.chunking.separators, vec!["\n\n", "."]);
    assert_eq!(config.chunking.token_to_char_ratio, 4);
    assert_eq!(config.chunking.strategy, SplitStrategy::Sentences);
    assert_eq!(config.chunking.blank_documents, BlankDocumentPolicy::Keep);
    assert_eq!(config.highlight.label_key, "source");
    assert_eq!(config.highlight.snippet_chars, 150);
    assert_eq!(config.highlight.max_sentences, 5);
}

#[test]
#[serial]
fn partial_toml_keeps_other_sections() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.toml");
    std::fs::write(&path, "[highlight]\nsnippet_chars = 80\n").unwrap();

    clear_env();

    let config = Config::load(&path).unwrap();
    assert_eq!(config.chunking, Config::default().chunking);
    assert_eq!(config.highlight.snippet_chars, 80);
    assert_eq!(config.highlight.label_key, "title");
}

#[test]
#[serial]
fn invalid_toml_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bad.toml");
    std::fs::write(&path, "[chunking\nchunk_token_size = ").unwrap();

    clear_env();

    let err = Config::load(&path).unwrap_err();
    assert!(format!("{err:#}").contains("failed to parse config file"));
}

#[test]
#[serial]
fn unknown_strategy_in_toml_is_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("strategy.toml");
    std::fs::write(&path, "[chunking]\nstrategy = \"paragraphs\"\n").unwrap();

    clear_env();

    assert!(Config::load(&path).is_err());
}

#[test]
#[serial]
fn env_overrides() {
    clear_env();
    let mut config = Config::default();

    unsafe {
        std::env::set_var("CITESEG_CHUNK_TOKEN_SIZE", "256");
        std::env::set_var("CITESEG_CHUNK_TOKEN_OVERLAP", "32");
        std::env::set_var("CITESEG_TOKEN_TO_CHAR_RATIO", "3");
        std::env::set_var("CITESEG_SPLIT_STRATEGY", "sentences");
        std::env::set_var("CITESEG_BLANK_DOCUMENTS", "keep");
        std::env::set_var("CITESEG_HIGHLIGHT_LABEL_KEY", "url");
        std::env::set_var("CITESEG_HIGHLIGHT_SNIPPET_CHARS", "60");
    }
    config.apply_env_overrides();
    clear_env();

    assert_eq!(config.chunking.chunk_token_size, 256);
    assert_eq!(config.chunking.chunk_token_overlap, 32);
    assert_eq!(config.chunking.token_to_char_ratio, 3);
    assert_eq!(config.chunking.strategy, SplitStrategy::Sentences);
    assert_eq!(config.chunking.blank_documents, BlankDocumentPolicy::Keep);
    assert_eq!(config.highlight.label_key, "url");
    assert_eq!(config.highlight.snippet_chars, 60);
}

#[test]
#[serial]
fn env_override_invalid_ignored() {
    clear_env();
    let mut config = Config::default();

    unsafe {
        std::env::set_var("CITESEG_CHUNK_TOKEN_SIZE", "not-a-number");
        std::env::set_var("CITESEG_SPLIT_STRATEGY", "paragraphs");
        std::env::set_var("CITESEG_BLANK_DOCUMENTS", "maybe");
        std::env::set_var("CITESEG_HIGHLIGHT_LABEL_KEY", "  ");
    }
    config.apply_env_overrides();
    clear_env();

    assert_eq!(config, Config::default());
}

#[test]
#[serial]
fn env_overrides_file_values() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("env.toml");
    std::fs::write(&path, "[chunking]\nchunk_token_size = 100\n").unwrap();

    clear_env();
    unsafe { std::env::set_var("CITESEG_CHUNK_TOKEN_SIZE", "300") };
    let config = Config::load(&path).unwrap();
    clear_env();

    assert_eq!(config.chunking.chunk_token_size, 300);
}

#[test]
fn validate_rejects_overlap_not_smaller_than_size() {
    let mut config = Config::default();
    config.chunking.chunk_token_overlap = config.chunking.chunk_token_size;
    let err = config.validate().unwrap_err();
    assert!(format!("{err:#}").contains("invalid [chunking] configuration"));
    assert!(config.chunking_service().is_err());
}

#[test]
fn validate_rejects_empty_separator() {
    let mut config = Config::default();
    config.chunking.separators.push(String::new());
    assert!(config.validate().is_err());
}

#[test]
fn chunking_service_from_defaults() {
    let service = Config::default().chunking_service().unwrap();
    let chunks = service.chunk_document(&citeseg_segment::Document::new(
        "Hello world.",
        citeseg_segment::Metadata::new(),
    ));
    assert_eq!(chunks.len(), 1);
}

#[test]
fn highlight_options_from_config() {
    let config = HighlightConfig {
        label_key: "url".into(),
        snippet_chars: 10,
        max_sentences: 1,
    };
    let options = config.options();
    assert_eq!(options.label_key, "url");
    assert_eq!(options.snippet_chars, 10);
}
