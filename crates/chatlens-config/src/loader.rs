//! Configuration loading and persistence with atomic file operations.

use crate::schema::Config;
use chatlens_common::{InsightsError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Configuration loader with atomic file operations.
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Path this loader reads and writes.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads and validates configuration from file.
    pub async fn load(&self) -> Result<Config> {
        debug!("Reading configuration from {}", self.path.display());
        let raw = tokio::fs::read_to_string(&self.path).await?;
        let config = Self::parse(&raw)?;
        config.validate()?;
        info!("Loaded configuration from {}", self.path.display());
        Ok(config)
    }

    /// Parses YAML configuration text without validating it.
    pub fn parse(raw: &str) -> Result<Config> {
        // An empty document means "all defaults".
        if raw.trim().is_empty() {
            return Ok(Config::default());
        }
        serde_yaml::from_str(raw).map_err(|e| InsightsError::Serialization(e.to_string()))
    }

    /// Saves configuration to file atomically.
    ///
    /// The YAML is written to a temporary file next to the target and renamed
    /// over it, so readers never observe a partially written file.
    pub async fn save(&self, config: &Config) -> Result<()> {
        let yaml =
            serde_yaml::to_string(config).map_err(|e| InsightsError::Serialization(e.to_string()))?;
        let path = self.path.clone();

        tokio::task::spawn_blocking(move || write_atomic(&path, yaml.as_bytes()))
            .await
            .map_err(|e| InsightsError::Io(std::io::Error::other(e)))??;

        info!("Saved configuration to {}", self.path.display());
        Ok(())
    }
}

fn write_atomic(path: &Path, contents: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut file = tempfile::NamedTempFile::new_in(dir)?;
    file.write_all(contents)?;
    file.as_file().sync_all()?;
    file.persist(path).map_err(|e| InsightsError::Io(e.error))?;
    Ok(())
}
