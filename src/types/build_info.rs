use chrono::{DateTime, Datelike, Local};
use serde::{Deserialize, Serialize};

use super::BuildRecord;

/// Build-count ordinals computed relative to build history
///
/// All ordinals are 1-based: the first build of a day is `builds_today: 1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BuildInfo {
    /// This build's number
    pub build_number: u32,
    /// Ordinal among builds on the same local calendar day
    pub builds_today: u32,
    /// Ordinal among builds in the same ISO week
    pub builds_this_week: u32,
    /// Ordinal among builds in the same calendar month
    pub builds_this_month: u32,
    /// Ordinal among builds in the same calendar year
    pub builds_this_year: u32,
    /// Ordinal among all recorded builds
    pub builds_all_time: u32,
}

impl BuildInfo {
    /// Counters for a build with no prior history
    pub fn first(build_number: u32) -> Self {
        Self {
            build_number,
            builds_today: 1,
            builds_this_week: 1,
            builds_this_month: 1,
            builds_this_year: 1,
            builds_all_time: 1,
        }
    }

    /// Compute the counters for the next build.
    ///
    /// `prev` is the most recent prior build carrying a version number, or
    /// `None` when there is none. Each calendar-scoped ordinal increments when
    /// `now` falls in the same local period as the previous build and resets
    /// to 1 otherwise; the all-time ordinal always increments.
    ///
    /// With `skip_failed` set, a non-successful previous build does not
    /// advance any counter: its ordinals are carried over so its number gets
    /// reused by the next build.
    pub fn advance(
        prev: Option<&BuildRecord>,
        now: DateTime<Local>,
        build_number: u32,
        skip_failed: bool,
    ) -> Self {
        let Some(prev) = prev else {
            return Self::first(build_number);
        };
        let Some(prev_info) = prev.info.as_ref() else {
            return Self::first(build_number);
        };

        if skip_failed && !prev.result.is_success() {
            return Self {
                build_number,
                ..*prev_info
            };
        }

        let then = prev.timestamp;
        Self {
            build_number,
            builds_today: if same_day(now, then) {
                prev_info.builds_today + 1
            } else {
                1
            },
            builds_this_week: if same_week(now, then) {
                prev_info.builds_this_week + 1
            } else {
                1
            },
            builds_this_month: if same_month(now, then) {
                prev_info.builds_this_month + 1
            } else {
                1
            },
            builds_this_year: if same_year(now, then) {
                prev_info.builds_this_year + 1
            } else {
                1
            },
            builds_all_time: prev_info.builds_all_time + 1,
        }
    }
}

fn same_day(a: DateTime<Local>, b: DateTime<Local>) -> bool {
    a.date_naive() == b.date_naive()
}

fn same_week(a: DateTime<Local>, b: DateTime<Local>) -> bool {
    let (wa, wb) = (a.iso_week(), b.iso_week());
    wa.year() == wb.year() && wa.week() == wb.week()
}

fn same_month(a: DateTime<Local>, b: DateTime<Local>) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn same_year(a: DateTime<Local>, b: DateTime<Local>) -> bool {
    a.year() == b.year()
}
