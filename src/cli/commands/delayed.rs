use tracker_lib::DELAY_THRESHOLD_DAYS;

use crate::error::Result;
use crate::format::{DelayedAssignees, print_json};

use super::Context;

/// Execute the delayed command.
///
/// # Errors
///
/// Returns an error if JSON output cannot be written.
pub fn execute(ctx: &Context) -> Result<()> {
    let employees = ctx.tracker().delayed_assignees();
    if ctx.json {
        print_json(&DelayedAssignees {
            reference_date: ctx.config.reference_date_string(),
            threshold_days: DELAY_THRESHOLD_DAYS,
            employees,
        })?;
    } else {
        print!(
            "{}",
            render_delayed(&ctx.config.reference_date_string(), &employees)
        );
    }
    Ok(())
}

fn render_delayed(reference_date: &str, employees: &[&str]) -> String {
    if employees.is_empty() {
        return format!(
            "No open issues more than {DELAY_THRESHOLD_DAYS} days overdue as of {reference_date}.\n"
        );
    }
    let mut out = format!(
        "Assignees with issues more than {DELAY_THRESHOLD_DAYS} days overdue as of {reference_date}:\n"
    );
    for name in employees {
        out.push_str(&format!("  {name}\n"));
    }
    out
}
