//! Output formatting for `itr`.
//!
//! Supports both human-readable text output and machine-parseable JSON.
//! Diagnostics never go to stdout, so `--json` output can be piped.
//!
//! # JSON Output Types
//!
//! - [`ClosedCount`] - closed issue count (closed)
//! - [`AssigneeLookup`] - assignee of one issue (assignee)
//! - [`StatusListing`] - issues with a given status (status)
//! - [`IssueListing`] - ordered issue views (by-priority)
//! - [`DelayedAssignees`] - overdue owners (delayed)
//! - [`OpenDurations`] - days open per issue (durations)
//!
//! Map-shaped results (groups, owners, locations) are emitted as plain JSON
//! objects with sorted keys.

mod output;
mod text;

use serde::Serialize;

use crate::error::Result;

pub use output::{
    AssigneeLookup, ClosedCount, DelayedAssignees, IssueListing, OpenDurations, StatusListing,
};
pub use text::{
    format_employee_line, format_issue_details, format_issue_line, format_priority,
    format_status_icon, format_table,
};

/// Pretty-print a value as JSON on stdout.
///
/// # Errors
///
/// Returns `Json` if serialization fails.
pub fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
