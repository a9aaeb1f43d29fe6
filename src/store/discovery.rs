use std::env;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::types::{Config, History};

/// The vernum directory name
pub const VERNUM_DIR: &str = ".vernum";

/// Find the store root by walking up from the current directory
/// Returns the directory containing .vernum/
pub fn find_store_root() -> Result<PathBuf> {
    let current = env::current_dir().context("failed to get current directory")?;
    find_store_root_from(&current)
}

/// Find the store root starting from a specific directory
pub fn find_store_root_from(start: &Path) -> Result<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let vernum_dir = current.join(VERNUM_DIR);
        if vernum_dir.is_dir() {
            return Ok(current);
        }

        if !current.pop() {
            bail!(
                "not a vernum project (no .vernum/ directory found in {} or any parent, run 'vernum init' first)",
                start.display()
            );
        }
    }
}

/// Store context holding paths and loaded state
#[derive(Debug)]
pub struct Store {
    /// Root directory containing .vernum/
    pub root: PathBuf,
    /// Build history
    pub history: History,
    /// Per-project defaults
    pub config: Config,
}

impl Store {
    /// Load the store from the current directory
    pub fn load() -> Result<Self> {
        let root = find_store_root()?;
        Self::load_from(root)
    }

    /// Load the store from a specific root
    pub fn load_from(root: PathBuf) -> Result<Self> {
        let vernum_dir = root.join(VERNUM_DIR);

        let history =
            History::load(&vernum_dir.join("history.yaml")).context("failed to load history")?;

        let config = Config::load(&vernum_dir.join("config.yaml")).unwrap_or_default();

        Ok(Self {
            root,
            history,
            config,
        })
    }

    /// Get the .vernum directory path
    pub fn vernum_dir(&self) -> PathBuf {
        self.root.join(VERNUM_DIR)
    }

    /// Get the history file path
    pub fn history_path(&self) -> PathBuf {
        self.vernum_dir().join("history.yaml")
    }

    /// Get the config file path
    pub fn config_path(&self) -> PathBuf {
        self.vernum_dir().join("config.yaml")
    }

    /// Save history to disk
    pub fn save_history(&self) -> Result<()> {
        self.history.save(&self.history_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_store() -> TempDir {
        let dir = TempDir::new().unwrap();
        let vernum = dir.path().join(".vernum");
        fs::create_dir_all(&vernum).unwrap();
        fs::write(vernum.join("history.yaml"), "builds: []").unwrap();
        dir
    }

    #[test]
    fn test_find_store_root() {
        let dir = setup_store();
        let root = find_store_root_from(dir.path()).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn test_find_store_root_from_subdir() {
        let dir = setup_store();
        let subdir = dir.path().join("sub/deep/dir");
        fs::create_dir_all(&subdir).unwrap();
        let root = find_store_root_from(&subdir).unwrap();
        assert_eq!(root, dir.path());
    }

    #[test]
    fn test_find_store_root_missing() {
        let dir = TempDir::new().unwrap();
        // No .vernum anywhere under the temp root; only fails reliably if no
        // parent of the temp dir carries one, which holds for system temp dirs
        assert!(find_store_root_from(dir.path()).is_err());
    }

    #[test]
    fn test_store_load() {
        let dir = setup_store();
        let store = Store::load_from(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.root, dir.path());
        assert!(store.history.builds.is_empty());
        assert!(store.config.version_prefix.is_none());
    }

    #[test]
    fn test_store_load_reads_config() {
        let dir = setup_store();
        fs::write(
            dir.path().join(".vernum/config.yaml"),
            "version_prefix: rel-\nskip_failed_builds: true",
        )
        .unwrap();

        let store = Store::load_from(dir.path().to_path_buf()).unwrap();
        assert_eq!(store.config.version_prefix.as_deref(), Some("rel-"));
        assert!(store.config.skip_failed_builds);
    }

    #[test]
    fn test_save_history_roundtrip() {
        use crate::types::{BuildInfo, BuildRecord};
        use chrono::Local;

        let dir = setup_store();
        let mut store = Store::load_from(dir.path().to_path_buf()).unwrap();
        store.history.record(BuildRecord::new(
            1,
            Local::now(),
            BuildInfo::first(1),
            "1.0.1".to_string(),
        ));
        store.save_history().unwrap();

        let reloaded = Store::load_from(dir.path().to_path_buf()).unwrap();
        assert_eq!(reloaded.history.builds.len(), 1);
        assert_eq!(reloaded.history.builds[0].version.as_deref(), Some("1.0.1"));
    }
}
