//! Date and string helpers shared by the loader and the query engine.

use std::cmp::Ordering;

use chrono::NaiveDate;

use crate::error::{Result, TrackerError};

/// Date format used in the CSV data files (`dd/mm/yyyy`).
pub const CSV_DATE_FORMAT: &str = "%d/%m/%Y";

/// Date format used for the configured reference date (`yyyy-mm-dd`).
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Reference date used when nothing else is configured.
pub const DEFAULT_REFERENCE_DATE: &str = "2019-05-01";

// ============================================================================
// Dates
// ============================================================================

/// Parse a `dd/mm/yyyy` date from a data file.
///
/// # Errors
///
/// Returns `InvalidDate` if the value does not match the format.
pub fn parse_csv_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), CSV_DATE_FORMAT).map_err(|_| {
        TrackerError::InvalidDate {
            value: value.to_string(),
            format: "dd/mm/yyyy",
        }
    })
}

/// Parse a `yyyy-mm-dd` date, as used for the reference date.
///
/// # Errors
///
/// Returns `InvalidDate` if the value does not match the format.
pub fn parse_iso_date(value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).map_err(|_| {
        TrackerError::InvalidDate {
            value: value.to_string(),
            format: "yyyy-mm-dd",
        }
    })
}

/// The built-in reference date (2019-05-01).
#[must_use]
pub fn default_reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 5, 1).unwrap_or_default()
}

/// Whole calendar days from `from` to `to` (negative if `to` is earlier).
#[must_use]
pub fn days_between(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days()
}

// ============================================================================
// Strings
// ============================================================================

/// Compare two strings ignoring ASCII case, character by character.
#[must_use]
pub fn cmp_ignore_case(a: &str, b: &str) -> Ordering {
    a.chars()
        .map(|c| c.to_ascii_lowercase())
        .cmp(b.chars().map(|c| c.to_ascii_lowercase()))
}

/// Order raw priority strings descending, lexically and ignoring case.
///
/// This is a string comparison, not a severity ranking: the resulting order
/// for the standard values is MEDIUM, LOW, HIGH.
#[must_use]
pub fn cmp_priority_desc(a: &str, b: &str) -> Ordering {
    cmp_ignore_case(b, a)
}

/// `None` for a missing or blank argument, otherwise the trimmed value.
#[must_use]
pub fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
