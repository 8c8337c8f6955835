//! Ordered views over open issues.

use crate::error::Result;
use crate::format::{IssueListing, format_issue_line, print_json};

use super::{Context, join_ids};

/// Execute the by-resolution command.
///
/// # Errors
///
/// Returns an error if JSON output cannot be written.
pub fn execute_by_resolution(ctx: &Context) -> Result<()> {
    let ids = ctx.tracker().open_issues_by_resolution_order();
    if ctx.json {
        print_json(&ids)?;
    } else if ids.is_empty() {
        println!("No open issues.");
    } else {
        println!("{}", join_ids(&ids));
    }
    Ok(())
}

/// Execute the by-priority command.
///
/// # Errors
///
/// Returns an error if JSON output cannot be written.
pub fn execute_by_priority(ctx: &Context) -> Result<()> {
    let issues = ctx.tracker().open_issues_by_priority_then_date();
    if ctx.json {
        print_json(&IssueListing {
            count: issues.len(),
            issues,
        })?;
    } else {
        print!("{}", render_by_priority(&issues));
    }
    Ok(())
}

fn render_by_priority(issues: &[&tracker_lib::Issue]) -> String {
    if issues.is_empty() {
        return "No open issues.\n".to_string();
    }
    let mut out = String::new();
    for (idx, issue) in issues.iter().enumerate() {
        out.push_str(&format!("{}. {}\n", idx + 1, format_issue_line(issue)));
    }
    out
}
