use anyhow::Result;

use crate::output::{Output, OutputFormat};
use crate::store::Store;
use crate::types::BuildRecord;

/// Options for the history command
pub struct HistoryOptions {
    /// Show at most this many builds
    pub limit: Option<usize>,
}

/// List recorded builds, newest first
pub fn history(store: &Store, opts: HistoryOptions, out: &Output) -> Result<()> {
    let builds: Vec<&BuildRecord> = store
        .history
        .builds
        .iter()
        .rev()
        .take(opts.limit.unwrap_or(usize::MAX))
        .collect();

    match out.format {
        OutputFormat::Human => {
            if builds.is_empty() {
                out.info("no builds recorded");
                return Ok(());
            }
            for build in builds {
                println!(
                    "#{:<5} {:10} {:20} {}",
                    build.number,
                    build.result.as_str(),
                    build.timestamp.format("%Y-%m-%d %H:%M:%S"),
                    build.version.as_deref().unwrap_or("-"),
                );
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&builds)?);
        }
    }

    Ok(())
}
