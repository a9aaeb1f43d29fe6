use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::BuildInfo;

/// Outcome of a recorded build
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BuildResult {
    /// Build completed successfully
    #[default]
    Success,
    /// Build completed but with test failures or similar
    Unstable,
    /// Build failed
    Failure,
    /// Build was cancelled before completing
    Aborted,
}

#[derive(Error, Debug)]
#[error("invalid build result: '{0}'. Use success, unstable, failure, or aborted")]
pub struct ParseBuildResultError(String);

impl BuildResult {
    /// Whether counters advance past this build when skip-failed-builds is on
    pub fn is_success(&self) -> bool {
        matches!(self, BuildResult::Success)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BuildResult::Success => "success",
            BuildResult::Unstable => "unstable",
            BuildResult::Failure => "failure",
            BuildResult::Aborted => "aborted",
        }
    }
}

impl FromStr for BuildResult {
    type Err = ParseBuildResultError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "success" => Ok(BuildResult::Success),
            "unstable" => Ok(BuildResult::Unstable),
            "failure" | "failed" => Ok(BuildResult::Failure),
            "aborted" => Ok(BuildResult::Aborted),
            _ => Err(ParseBuildResultError(s.to_string())),
        }
    }
}

impl fmt::Display for BuildResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One build in the history (.vernum/history.yaml)
///
/// `version` and `info` are set together when a version number was computed
/// for the build; entries without them never qualify as the "previous build
/// with a version number" during lookups.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildRecord {
    /// Monotonic build number
    pub number: u32,

    /// When the build ran
    pub timestamp: DateTime<Local>,

    /// Recorded outcome (amendable after the fact via `vernum record`)
    #[serde(default)]
    pub result: BuildResult,

    /// Final formatted version number, prefix included
    #[serde(skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,

    /// Counters the version was computed from
    #[serde(skip_serializing_if = "Option::is_none")]
    pub info: Option<BuildInfo>,
}

impl BuildRecord {
    /// Create a record carrying a computed version number
    pub fn new(
        number: u32,
        timestamp: DateTime<Local>,
        info: BuildInfo,
        version: String,
    ) -> Self {
        Self {
            number,
            timestamp,
            result: BuildResult::Success,
            version: Some(version),
            info: Some(info),
        }
    }

    /// Whether this record carries a recorded version number
    pub fn has_version(&self) -> bool {
        self.version.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_parse() {
        assert_eq!("success".parse::<BuildResult>().unwrap(), BuildResult::Success);
        assert_eq!("FAILURE".parse::<BuildResult>().unwrap(), BuildResult::Failure);
        assert_eq!("failed".parse::<BuildResult>().unwrap(), BuildResult::Failure);
        assert_eq!("Aborted".parse::<BuildResult>().unwrap(), BuildResult::Aborted);
        assert!("ok".parse::<BuildResult>().is_err());
    }

    #[test]
    fn test_result_display_roundtrip() {
        for result in [
            BuildResult::Success,
            BuildResult::Unstable,
            BuildResult::Failure,
            BuildResult::Aborted,
        ] {
            assert_eq!(result.to_string().parse::<BuildResult>().unwrap(), result);
        }
    }

    #[test]
    fn test_only_success_advances_counters() {
        assert!(BuildResult::Success.is_success());
        assert!(!BuildResult::Unstable.is_success());
        assert!(!BuildResult::Failure.is_success());
        assert!(!BuildResult::Aborted.is_success());
    }

    #[test]
    fn test_record_yaml_roundtrip() {
        let record = BuildRecord::new(
            7,
            Local::now(),
            BuildInfo {
                build_number: 7,
                builds_today: 2,
                builds_this_week: 3,
                builds_this_month: 5,
                builds_this_year: 6,
                builds_all_time: 7,
            },
            "1.0.7".to_string(),
        );

        let yaml = serde_yml::to_string(&record).unwrap();
        let parsed: BuildRecord = serde_yml::from_str(&yaml).unwrap();

        assert_eq!(parsed.number, 7);
        assert_eq!(parsed.result, BuildResult::Success);
        assert_eq!(parsed.version.as_deref(), Some("1.0.7"));
        assert_eq!(parsed.info.unwrap().builds_today, 2);
    }

    #[test]
    fn test_record_without_version_parses() {
        // Hand-written or legacy entries may lack version/info
        let yaml = "number: 3\ntimestamp: 2026-08-23T10:00:00+00:00\nresult: failure\n";
        let parsed: BuildRecord = serde_yml::from_str(yaml).unwrap();
        assert_eq!(parsed.number, 3);
        assert!(!parsed.has_version());
        assert!(parsed.info.is_none());
    }
}
