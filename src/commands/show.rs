use anyhow::{bail, Result};

use crate::output::{Output, OutputFormat};
use crate::store::Store;

/// Options for the show command
pub struct ShowOptions {
    /// Build number to show (latest if not specified)
    pub build: Option<u32>,
}

/// Show the persisted version number and counters of one build
pub fn show(store: &Store, opts: ShowOptions, out: &Output) -> Result<()> {
    let record = match opts.build {
        Some(n) => store
            .history
            .find(n)
            .ok_or_else(|| anyhow::anyhow!("no build #{} in history", n))?,
        None => match store.history.latest() {
            Some(r) => r,
            None => bail!("no builds recorded yet"),
        },
    };

    match out.format {
        OutputFormat::Human => {
            println!("Build:     #{}", record.number);
            println!("Time:      {}", record.timestamp.format("%Y-%m-%d %H:%M:%S"));
            println!("Result:    {}", record.result);
            println!("Version:   {}", record.version.as_deref().unwrap_or("-"));
            if let Some(info) = &record.info {
                println!("Today:     {}", info.builds_today);
                println!("Week:      {}", info.builds_this_week);
                println!("Month:     {}", info.builds_this_month);
                println!("Year:      {}", info.builds_this_year);
                println!("All time:  {}", info.builds_all_time);
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(record)?);
        }
    }

    Ok(())
}
