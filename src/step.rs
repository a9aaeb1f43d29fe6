use std::collections::HashMap;

use anyhow::{bail, Result};
use chrono::{DateTime, Local, NaiveDate};

use crate::store::Store;
use crate::template::format_version;
use crate::types::{BuildInfo, BuildRecord};

/// Configuration for one version-number computation
///
/// The template is validated at construction; the remaining fields are
/// optional settings with defaults.
#[derive(Debug, Clone)]
pub struct StepConfig {
    template: String,

    /// Don't advance counters past failed builds
    pub skip_failed_builds: bool,

    /// Literal prefix forced onto the front of the result
    pub version_prefix: Option<String>,

    /// Raw project start date string (YYYY-MM-DD)
    pub project_start_date: Option<String>,
}

impl StepConfig {
    /// Create a step configuration. The template must be non-empty.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if template.is_empty() {
            bail!("must specify a version number template");
        }
        Ok(Self {
            template,
            skip_failed_builds: false,
            version_prefix: None,
            project_start_date: None,
        })
    }

    /// The version-number template, exactly as configured
    pub fn template(&self) -> &str {
        &self.template
    }

    /// The configured prefix; unset, empty, and blank all count as absent
    pub fn version_prefix(&self) -> Option<&str> {
        self.version_prefix
            .as_deref()
            .filter(|p| !p.trim().is_empty())
    }

    /// The parsed project start date
    ///
    /// Unparseable values and the epoch date (the legacy absent sentinel)
    /// both count as absent.
    pub fn project_start_date(&self) -> Option<NaiveDate> {
        let raw = self.project_start_date.as_deref()?;
        let date = NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d").ok()?;
        // NaiveDate::default() is the epoch date, the legacy absent sentinel
        if date == NaiveDate::default() {
            return None;
        }
        Some(date)
    }

    /// Compute the next version number and record it in the store.
    ///
    /// Fail-soft by contract: any failure during lookup, counting, formatting,
    /// or persisting yields an empty string instead of an error, so a broken
    /// version-number setup never fails the surrounding build. A failed run
    /// leaves the store's history unchanged, in memory and on disk.
    pub fn run(
        &self,
        store: &mut Store,
        env: &HashMap<String, String>,
        now: DateTime<Local>,
    ) -> String {
        if self.template.is_empty() {
            // Construction already rejects this; kept as a guard
            return String::new();
        }
        self.try_run(store, env, now).unwrap_or_default()
    }

    fn try_run(
        &self,
        store: &mut Store,
        env: &HashMap<String, String>,
        now: DateTime<Local>,
    ) -> Result<String> {
        let build_number = store.history.next_build_number();
        let prev = store.history.previous_with_version(self.version_prefix());
        let info = BuildInfo::advance(prev, now, build_number, self.skip_failed_builds);

        let formatted =
            format_version(&self.template, self.project_start_date(), &info, env, now)?;

        // Unlike the legacy freestyle mode, a configured prefix is always
        // prepended. Expecting the user to repeat the prefix inside the
        // template proved error-prone, so it is forced here.
        let version = match self.version_prefix() {
            Some(prefix) => format!("{}{}", prefix, formatted),
            None => formatted,
        };

        store
            .history
            .record(BuildRecord::new(build_number, now, info, version.clone()));
        if let Err(e) = store.save_history() {
            // Keep the in-memory history consistent with disk
            store.history.builds.pop();
            return Err(e);
        }

        Ok(version)
    }
}
