mod env;
mod types;

#[cfg(test)]
mod tests;

pub use types::*;

use std::path::Path;

use anyhow::Context;
use citeseg_segment::ChunkingService;

impl Config {
    /// Load configuration from a TOML file with env var overrides.
    ///
    /// Falls back to defaults when the file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let mut config = if path.exists() {
            let content = std::fs::read_to_string(path).context("failed to read config file")?;
            toml::from_str::<Self>(&content).context("failed to parse config file")?
        } else {
            tracing::debug!(path = %path.display(), "config file not found, using defaults");
            Self::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// # Errors
    ///
    /// Returns an error if the chunking section describes an unusable splitter.
    pub fn validate(&self) -> anyhow::Result<()> {
        self.chunking
            .validate()
            .context("invalid [chunking] configuration")
    }

    /// Build the chunking service described by the `[chunking]` section.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn chunking_service(&self) -> anyhow::Result<ChunkingService> {
        ChunkingService::new(&self.chunking).context("failed to build chunking service")
    }
}
