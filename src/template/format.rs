use std::collections::HashMap;
use std::fmt::Write as _;

use chrono::{DateTime, Datelike, Local, NaiveDate};

use crate::types::BuildInfo;

use super::token::{parse_template, Segment, TemplateError, TokenArg};

/// Default pattern for ${BUILD_DATE_FORMATTED} without an argument
const DEFAULT_DATE_PATTERN: &str = "%Y-%m-%d";

/// Format a version-number template.
///
/// Substitutes build-count ordinals, calendar fields of the build timestamp,
/// and elapsed time since the project start date. Token names that aren't
/// recognized fall back to the environment map; a missing variable becomes
/// the empty string.
pub fn format_version(
    template: &str,
    start_date: Option<NaiveDate>,
    info: &BuildInfo,
    env: &HashMap<String, String>,
    timestamp: DateTime<Local>,
) -> Result<String, TemplateError> {
    let segments = parse_template(template)?;
    let mut out = String::new();

    for segment in segments {
        match segment {
            Segment::Literal(text) => out.push_str(&text),
            Segment::Token { name, arg } => {
                let value = resolve(&name, arg.as_ref(), start_date, info, env, timestamp)?;
                out.push_str(&value);
            }
        }
    }

    Ok(out)
}

fn resolve(
    name: &str,
    arg: Option<&TokenArg>,
    start_date: Option<NaiveDate>,
    info: &BuildInfo,
    env: &HashMap<String, String>,
    timestamp: DateTime<Local>,
) -> Result<String, TemplateError> {
    if name == "BUILD_DATE_FORMATTED" {
        let pattern = match arg {
            Some(TokenArg::Pattern(p)) => p.as_str(),
            None => DEFAULT_DATE_PATTERN,
            Some(TokenArg::Width(w)) => {
                return Err(TemplateError::InvalidArgument {
                    name: name.to_string(),
                    arg: "X".repeat(*w),
                })
            }
        };
        return format_date(pattern, timestamp);
    }

    let numeric = match name {
        "BUILD_NUMBER" => Some(info.build_number as i64),
        "BUILDS_TODAY" => Some(info.builds_today as i64),
        "BUILDS_THIS_WEEK" => Some(info.builds_this_week as i64),
        "BUILDS_THIS_MONTH" => Some(info.builds_this_month as i64),
        "BUILDS_THIS_YEAR" => Some(info.builds_this_year as i64),
        "BUILDS_ALL_TIME" => Some(info.builds_all_time as i64),
        "BUILD_DAY" => Some(timestamp.day() as i64),
        "BUILD_WEEK" => Some(timestamp.iso_week().week() as i64),
        "BUILD_MONTH" => Some(timestamp.month() as i64),
        "BUILD_YEAR" => Some(timestamp.year() as i64),
        "DAYS_SINCE_PROJECT_START" => Some(days_since(start_date, timestamp)),
        "MONTHS_SINCE_PROJECT_START" => Some(months_since(start_date, timestamp)),
        "YEARS_SINCE_PROJECT_START" => Some(months_since(start_date, timestamp) / 12),
        _ => None,
    };

    if let Some(value) = numeric {
        return match arg {
            None => Ok(value.to_string()),
            Some(TokenArg::Width(width)) => Ok(format!("{:0width$}", value, width = *width)),
            Some(TokenArg::Pattern(p)) => Err(TemplateError::InvalidArgument {
                name: name.to_string(),
                arg: format!("\"{}\"", p),
            }),
        };
    }

    // Unknown token: environment variable fallback, empty when unset.
    // Arguments are ignored here, matching the legacy behavior.
    Ok(env.get(name).cloned().unwrap_or_default())
}

fn format_date(pattern: &str, timestamp: DateTime<Local>) -> Result<String, TemplateError> {
    let mut out = String::new();
    // chrono surfaces bad format specifiers as a fmt error; map it instead
    // of letting Display panic
    write!(out, "{}", timestamp.format(pattern))
        .map_err(|_| TemplateError::BadDatePattern(pattern.to_string()))?;
    Ok(out)
}

/// Whole days since the project start, 0 when absent or in the future
fn days_since(start_date: Option<NaiveDate>, timestamp: DateTime<Local>) -> i64 {
    match start_date {
        Some(start) => (timestamp.date_naive() - start).num_days().max(0),
        None => 0,
    }
}

/// Whole calendar months since the project start, 0 when absent or in the future
fn months_since(start_date: Option<NaiveDate>, timestamp: DateTime<Local>) -> i64 {
    let Some(start) = start_date else {
        return 0;
    };
    let today = timestamp.date_naive();

    let mut months = (today.year() as i64 - start.year() as i64) * 12
        + (today.month() as i64 - start.month() as i64);
    if today.day() < start.day() {
        months -= 1;
    }
    months.max(0)
}
