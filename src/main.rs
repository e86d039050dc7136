use std::io::{BufWriter, Read, Write};
use std::path::{Path, PathBuf};

use anyhow::Context;
use citeseg_core::Config;
use citeseg_score::{extract_relevant_sentences, format_sources, highlight};
use citeseg_segment::{Chunk, Document, Metadata};
use clap::Parser;

/// Split documents into citation-tagged chunks and surface query evidence.
#[derive(Parser, Debug)]
#[command(name = "citeseg", version, about)]
struct Cli {
    /// Path to a TOML config file. Defaults to `CITESEG_CONFIG`, then
    /// `config/default.toml`.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print highlighted evidence for this query instead of raw chunks.
    #[arg(long, short)]
    query: Option<String>,

    /// Append the sources list used for answer generation.
    #[arg(long)]
    sources: bool,

    /// Chunk documents on the blocking thread pool in parallel.
    #[arg(long)]
    concurrent: bool,

    /// Input files. Reads stdin when none are given.
    files: Vec<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_subscriber();
    let cli = Cli::parse();

    let config_path = resolve_config_path(cli.config.as_deref());
    let config = Config::load(&config_path)?;
    config.validate()?;
    let service = config.chunking_service()?;

    let documents = read_documents(&cli.files)?;
    let document_count = documents.len();
    let groups = if cli.concurrent {
        service.extract_concurrent(documents).await
    } else {
        service.extract(documents).await
    };
    let chunks: Vec<Chunk> = groups.into_iter().flatten().collect();
    tracing::info!(
        documents = document_count,
        chunks = chunks.len(),
        "extraction complete"
    );

    let mut out = BufWriter::new(std::io::stdout().lock());
    match &cli.query {
        Some(query) => write_evidence(&mut out, &chunks, query, &config)?,
        None => {
            for chunk in &chunks {
                writeln!(out, "{}", serde_json::to_string(chunk)?)?;
            }
        }
    }
    if cli.sources {
        writeln!(out, "{}", format_sources(&chunks))?;
    }
    out.flush()?;
    Ok(())
}

fn write_evidence(
    out: &mut impl Write,
    chunks: &[Chunk],
    query: &str,
    config: &Config,
) -> anyhow::Result<()> {
    let results: Vec<(Chunk, f64)> = chunks.iter().cloned().map(|c| (c, 1.0)).collect();
    let lines = highlight(&results, query, &config.highlight.options());
    for (chunk, line) in chunks.iter().zip(lines) {
        let sentences =
            extract_relevant_sentences(chunk, query, config.highlight.max_sentences);
        let record = serde_json::json!({
            "id": chunk.id.to_string(),
            "highlight": line,
            "sentences": sentences,
        });
        writeln!(out, "{record}")?;
    }
    Ok(())
}

fn read_documents(files: &[PathBuf]) -> anyhow::Result<Vec<Document>> {
    if files.is_empty() {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("failed to read stdin")?;
        let mut metadata = Metadata::new();
        metadata.insert("title".into(), "stdin".into());
        return Ok(vec![Document::from_bytes(&bytes, metadata)]);
    }

    files
        .iter()
        .map(|path| {
            let bytes = std::fs::read(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            Ok(Document::from_bytes(&bytes, file_metadata(path)))
        })
        .collect()
}

fn file_metadata(path: &Path) -> Metadata {
    let mut metadata = Metadata::new();
    let title = path
        .file_name()
        .map_or_else(|| path.display().to_string(), |name| name.to_string_lossy().into_owned());
    metadata.insert("title".into(), title.into());
    metadata.insert("path".into(), path.display().to_string().into());
    metadata
}

fn resolve_config_path(arg: Option<&Path>) -> PathBuf {
    if let Some(path) = arg {
        return path.to_path_buf();
    }
    if let Ok(path) = std::env::var("CITESEG_CONFIG") {
        return PathBuf::from(path);
    }
    PathBuf::from("config/default.toml")
}

fn init_subscriber() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
