use std::path::Path;

use anyhow::Context;
use serde::Deserialize;

/// Pipeline configuration, loaded from `config/config.json` when present.
#[derive(Debug, Clone, Deserialize)]
pub struct EtlConfig {
    /// Input document holding the captured envelope batch.
    #[serde(default = "default_input_path")]
    pub input_path: String,

    /// Directory the CSV datasets are written into. Created if absent.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,
}

fn default_input_path() -> String {
    "datasets/case.json".to_string()
}

fn default_output_dir() -> String {
    "output".to_string()
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            input_path: default_input_path(),
            output_dir: default_output_dir(),
        }
    }
}

impl EtlConfig {
    /// Load the config file. A missing file falls back to defaults; a present
    /// but malformed file is fatal.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        if !path.exists() {
            tracing::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file at {}", path.display()))?;
        let config = serde_json::from_str(&content)
            .with_context(|| format!("failed to parse config file at {}", path.display()))?;

        Ok(config)
    }
}
