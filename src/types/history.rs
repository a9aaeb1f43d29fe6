use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::{BuildRecord, BuildResult};

/// Build history (.vernum/history.yaml)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct History {
    /// Recorded builds, oldest first
    #[serde(default)]
    pub builds: Vec<BuildRecord>,
}

impl History {
    /// Load history from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read history: {}", path.display()))?;
        let history: History = serde_yml::from_str(&content)
            .with_context(|| format!("failed to parse history: {}", path.display()))?;
        Ok(history)
    }

    /// Save history to a YAML file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = serde_yml::to_string(self).context("failed to serialize history")?;
        fs::write(path, content)
            .with_context(|| format!("failed to write history: {}", path.display()))?;
        Ok(())
    }

    /// Number the next build would get
    pub fn next_build_number(&self) -> u32 {
        self.builds.iter().map(|b| b.number).max().unwrap_or(0) + 1
    }

    /// Most recent build carrying a recorded version number
    ///
    /// With a prefix, only versions starting with that exact prefix qualify.
    /// Builds without a recorded version are skipped either way.
    pub fn previous_with_version(&self, prefix: Option<&str>) -> Option<&BuildRecord> {
        self.builds.iter().rev().find(|b| match (&b.version, prefix) {
            (Some(v), Some(p)) => v.starts_with(p),
            (Some(_), None) => true,
            (None, _) => false,
        })
    }

    /// Append a build record
    pub fn record(&mut self, record: BuildRecord) {
        self.builds.push(record);
    }

    /// Find a build by number
    pub fn find(&self, number: u32) -> Option<&BuildRecord> {
        self.builds.iter().find(|b| b.number == number)
    }

    /// Most recent build, if any
    pub fn latest(&self) -> Option<&BuildRecord> {
        self.builds.last()
    }

    /// Set the result of a build, latest when `number` is None
    ///
    /// Returns the build number that was amended, or None when no such
    /// build exists.
    pub fn set_result(&mut self, number: Option<u32>, result: BuildResult) -> Option<u32> {
        let record = match number {
            Some(n) => self.builds.iter_mut().find(|b| b.number == n),
            None => self.builds.last_mut(),
        }?;
        record.result = result;
        Some(record.number)
    }
}
