use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Per-project defaults (.vernum/config.yaml)
///
/// Every field is optional; `vernum next` flags override config values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Literal prefix forced onto the front of every version number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version_prefix: Option<String>,

    /// Project start date (YYYY-MM-DD) for *_SINCE_PROJECT_START tokens
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_start_date: Option<String>,

    /// Don't advance counters past failed builds
    #[serde(default)]
    pub skip_failed_builds: bool,
}

impl Config {
    /// Load config from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        let config: Config = serde_yml::from_str(&content)
            .with_context(|| format!("failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Save config to a YAML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yml::to_string(self).context("failed to serialize config")?;
        fs::write(path, content)
            .with_context(|| format!("failed to write config: {}", path.display()))?;
        Ok(())
    }
}
