use anyhow::{bail, Result};

use crate::output::{Output, OutputFormat};
use crate::store::Store;
use crate::types::BuildResult;

/// Options for the record command
pub struct RecordOptions {
    /// Result to record
    pub result: BuildResult,
    /// Build number to amend (latest if not specified)
    pub build: Option<u32>,
}

/// Amend the recorded result of a build
pub fn record(store: &mut Store, opts: RecordOptions, out: &Output) -> Result<()> {
    let Some(number) = store.history.set_result(opts.build, opts.result) else {
        match opts.build {
            Some(n) => bail!("no build #{} in history", n),
            None => bail!("no builds recorded yet"),
        }
    };
    store.save_history()?;

    match out.format {
        OutputFormat::Human => {
            out.success(&format!("build #{} recorded as {}", number, opts.result));
        }
        OutputFormat::Json => {
            let result = serde_json::json!({
                "build_number": number,
                "result": opts.result,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BuildInfo, BuildRecord};
    use chrono::Local;
    use std::fs;
    use tempfile::TempDir;

    fn setup_store_with_builds(count: u32) -> (TempDir, Store) {
        let dir = TempDir::new().unwrap();
        let vernum = dir.path().join(".vernum");
        fs::create_dir_all(&vernum).unwrap();
        fs::write(vernum.join("history.yaml"), "builds: []").unwrap();
        let mut store = Store::load_from(dir.path().to_path_buf()).unwrap();
        for n in 1..=count {
            store.history.record(BuildRecord::new(
                n,
                Local::now(),
                BuildInfo::first(n),
                format!("1.0.{}", n),
            ));
        }
        store.save_history().unwrap();
        (dir, store)
    }

    #[test]
    fn test_record_amends_latest() {
        let (_dir, mut store) = setup_store_with_builds(2);
        record(
            &mut store,
            RecordOptions {
                result: BuildResult::Failure,
                build: None,
            },
            &Output::default(),
        )
        .unwrap();

        assert_eq!(store.history.find(2).unwrap().result, BuildResult::Failure);
        assert_eq!(store.history.find(1).unwrap().result, BuildResult::Success);

        // Persisted
        let reloaded = Store::load_from(store.root.clone()).unwrap();
        assert_eq!(reloaded.history.find(2).unwrap().result, BuildResult::Failure);
    }

    #[test]
    fn test_record_amends_by_number() {
        let (_dir, mut store) = setup_store_with_builds(3);
        record(
            &mut store,
            RecordOptions {
                result: BuildResult::Aborted,
                build: Some(1),
            },
            &Output::default(),
        )
        .unwrap();

        assert_eq!(store.history.find(1).unwrap().result, BuildResult::Aborted);
        assert_eq!(store.history.find(3).unwrap().result, BuildResult::Success);
    }

    #[test]
    fn test_record_missing_build_fails() {
        let (_dir, mut store) = setup_store_with_builds(1);
        let err = record(
            &mut store,
            RecordOptions {
                result: BuildResult::Failure,
                build: Some(9),
            },
            &Output::default(),
        )
        .unwrap_err();
        assert!(err.to_string().contains("no build #9"));
    }

    #[test]
    fn test_record_empty_history_fails() {
        let (_dir, mut store) = setup_store_with_builds(0);
        assert!(record(
            &mut store,
            RecordOptions {
                result: BuildResult::Failure,
                build: None,
            },
            &Output::default(),
        )
        .is_err());
    }
}
