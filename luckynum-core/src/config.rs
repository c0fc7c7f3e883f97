use crate::error::{LuckyError, Result};
use crate::{DrawConfig, DrawMode, RevealConfig};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

const MAX_DELAY: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GeneratorConfig {
    #[serde(default)]
    pub mode: DrawMode,
    #[serde(default)]
    pub draw: DrawConfig,
    #[serde(default)]
    pub reveal: RevealConfig,
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<()> {
        self.draw.validate()?;

        if self.reveal.reveal_delay > MAX_DELAY {
            return Err(LuckyError::config("Reveal delay cannot exceed 60 seconds"));
        }

        if self.reveal.clear_delay > MAX_DELAY {
            return Err(LuckyError::config("Clear delay cannot exceed 60 seconds"));
        }

        Ok(())
    }

    /// Read a JSON config file; a missing file gives the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            tracing::debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;

        tracing::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.validate()?;

        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}
