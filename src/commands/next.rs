use std::collections::HashMap;

use anyhow::Result;
use chrono::Local;

use crate::output::{Output, OutputFormat};
use crate::step::StepConfig;
use crate::store::Store;

/// Options for the next command
pub struct NextOptions {
    /// Version-number template (required, non-empty)
    pub template: String,
    /// Don't advance counters past failed builds (None: use the store config)
    pub skip_failed_builds: Option<bool>,
    /// Literal prefix forced onto the front of the result
    pub version_prefix: Option<String>,
    /// Project start date (YYYY-MM-DD)
    pub project_start_date: Option<String>,
    /// Extra KEY=VALUE pairs layered over the process environment
    pub env: Vec<(String, String)>,
}

/// Compute the next version number, record it, and print it to stdout
///
/// Settings left unset on the command line fall back to the store config.
/// Internal failures print an empty version and still exit 0: the step is
/// fail-soft so it never breaks the surrounding build.
pub fn next(store: &mut Store, opts: NextOptions, out: &Output) -> Result<()> {
    let mut step = StepConfig::new(opts.template)?;
    step.skip_failed_builds = opts
        .skip_failed_builds
        .unwrap_or(store.config.skip_failed_builds);
    step.version_prefix = opts
        .version_prefix
        .or_else(|| store.config.version_prefix.clone());
    step.project_start_date = opts
        .project_start_date
        .or_else(|| store.config.project_start_date.clone());

    let mut env: HashMap<String, String> = std::env::vars().collect();
    env.extend(opts.env);

    let version = step.run(store, &env, Local::now());

    match out.format {
        OutputFormat::Human => {
            if version.is_empty() {
                out.warn("version number could not be computed");
            } else if let Some(record) = store.history.latest() {
                out.verbose(&format!("recorded build #{}", record.number));
            }
            println!("{}", version);
        }
        OutputFormat::Json => {
            let result = if version.is_empty() {
                serde_json::json!({ "version": "" })
            } else {
                // run() just appended the record for this build
                let record = store.history.latest();
                serde_json::json!({
                    "version": version,
                    "build_number": record.map(|r| r.number),
                    "info": record.and_then(|r| r.info),
                })
            };
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}
