use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};

use crate::output::Output;
use crate::store::VERNUM_DIR;
use crate::types::{Config, History};

/// Options for the init command
pub struct InitOptions {
    /// Path to initialize (default: current directory)
    pub path: Option<PathBuf>,
    /// Recreate .vernum/ if it exists
    pub force: bool,
}

/// Initialize a new vernum store
pub fn init(opts: InitOptions, out: &Output) -> Result<()> {
    let target = opts
        .path
        .unwrap_or_else(|| std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")));
    let target = target.canonicalize().unwrap_or_else(|_| target.clone());

    let vernum_dir = target.join(VERNUM_DIR);
    if vernum_dir.exists() {
        if !opts.force {
            bail!(
                "{} already exists (use --force to recreate it)",
                vernum_dir.display()
            );
        }
        fs::remove_dir_all(&vernum_dir)
            .with_context(|| format!("failed to remove {}", vernum_dir.display()))?;
    }

    fs::create_dir_all(&vernum_dir)
        .with_context(|| format!("failed to create {}", vernum_dir.display()))?;

    out.status("Creating", &vernum_dir.display().to_string());
    History::default().save(&vernum_dir.join("history.yaml"))?;
    Config::default().save(&vernum_dir.join("config.yaml"))?;

    out.success(&format!("initialized vernum store in {}", target.display()));
    Ok(())
}
