//! Text formatting functions for `itr`.
//!
//! Provides plain text (non-ANSI) formatting for terminal output:
//! - Status icons (○ ✓ ?)
//! - Priority badges ([HIGH], [low], ...), raw case preserved
//! - Issue and employee line formatting
//! - Two-column aligned tables

use tracker_lib::util::ISO_DATE_FORMAT;
use tracker_lib::{Employee, Issue, Status};
use unicode_width::UnicodeWidthStr;

/// Status icon characters.
pub mod icons {
    /// Open issue (hollow circle).
    pub const OPEN: &str = "○";
    /// Closed issue (checkmark).
    pub const CLOSED: &str = "✓";
    /// Unrecognised status value.
    pub const UNKNOWN: &str = "?";
}

/// Return the icon for a raw status string.
#[must_use]
pub fn format_status_icon(status: &str) -> &'static str {
    if Status::Open.matches(status) {
        icons::OPEN
    } else if Status::Closed.matches(status) {
        icons::CLOSED
    } else {
        icons::UNKNOWN
    }
}

/// Format a raw priority as a bracketed badge, keeping its case.
#[must_use]
pub fn format_priority(priority: &str) -> String {
    format!("[{priority}]")
}

/// Format a single-line issue summary.
///
/// Format: `{icon} {id} [{priority}] [{type}] due {date} ({assignee})`
#[must_use]
pub fn format_issue_line(issue: &Issue) -> String {
    let mut line = format!(
        "{} {} {} [{}] due {}",
        format_status_icon(&issue.status),
        issue.id,
        format_priority(&issue.priority),
        issue.issue_type,
        issue.expected_resolution_on.format(ISO_DATE_FORMAT),
    );
    match issue.assignee() {
        Some(employee) => line.push_str(&format!(" ({})", employee.name)),
        None => line.push_str(" (unassigned)"),
    }
    line
}

/// Format a single-line employee summary: `#{id} {name} @ {location}`.
#[must_use]
pub fn format_employee_line(employee: &Employee) -> String {
    format!("#{} {} @ {}", employee.id, employee.name, employee.location)
}

/// Multi-line issue detail block for `show`.
#[must_use]
pub fn format_issue_details(issue: &Issue) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        "{} {} {}\n",
        format_status_icon(&issue.status),
        issue.id,
        format_priority(&issue.priority)
    ));
    out.push_str(&format!("Type:     {}\n", issue.issue_type));
    out.push_str(&format!("Status:   {}\n", issue.status));
    out.push_str(&format!(
        "Created:  {}\n",
        issue.created_on.format(ISO_DATE_FORMAT)
    ));
    out.push_str(&format!(
        "Expected: {}\n",
        issue.expected_resolution_on.format(ISO_DATE_FORMAT)
    ));
    match issue.assignee() {
        Some(employee) => out.push_str(&format!("Assignee: {}\n", format_employee_line(employee))),
        None => out.push_str("Assignee: (unassigned)\n"),
    }
    out
}

/// Render `(key, value)` rows as two aligned columns.
///
/// Column width is measured in terminal cells, so wide characters in names
/// or locations do not break alignment.
#[must_use]
pub fn format_table<K: AsRef<str>, V: AsRef<str>>(rows: &[(K, V)]) -> String {
    let width = rows
        .iter()
        .map(|(k, _)| k.as_ref().width())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (key, value) in rows {
        let key = key.as_ref();
        let pad = width - key.width();
        out.push_str(key);
        out.push_str(&" ".repeat(pad + 2));
        out.push_str(value.as_ref());
        out.push('\n');
    }
    out
}
