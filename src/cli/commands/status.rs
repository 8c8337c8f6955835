use tracing::warn;
use tracker_lib::Status;

use crate::cli::StatusArgs;
use crate::error::{AppError, Result};
use crate::format::{StatusListing, format_issue_line, print_json};

use super::Context;

/// Execute the status command.
///
/// # Errors
///
/// Returns `Validation` if the status is blank.
pub fn execute(args: &StatusArgs, ctx: &Context) -> Result<()> {
    let Some(issues) = ctx.tracker().issues_by_status(&args.status) else {
        return Err(AppError::validation("status", "must not be blank"));
    };
    if args.status.parse::<Status>().is_err() {
        warn!(status = %args.status, "Status is not OPEN or CLOSED; nothing matches");
    }

    if ctx.json {
        print_json(&StatusListing {
            status: &args.status,
            count: issues.len(),
            issues,
        })?;
    } else {
        print!("{}", render_status(&args.status, &issues));
    }
    Ok(())
}

fn render_status(status: &str, issues: &[&tracker_lib::Issue]) -> String {
    let mut out = format!("{} issue(s) with status {status}:\n", issues.len());
    for issue in issues {
        out.push_str(&format_issue_line(issue));
        out.push('\n');
    }
    out
}
