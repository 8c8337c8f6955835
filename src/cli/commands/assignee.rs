use tracker_lib::Employee;

use crate::cli::IdArgs;
use crate::error::Result;
use crate::format::{AssigneeLookup, format_employee_line, print_json};

use super::Context;

/// Execute the assignee command.
///
/// An unknown ID and an unassigned issue both print "no assignee"; use
/// `show` to tell them apart.
///
/// # Errors
///
/// Returns an error if JSON output cannot be written.
pub fn execute(args: &IdArgs, ctx: &Context) -> Result<()> {
    let assignee = ctx.tracker().issue_assignee(&args.id).map(AsRef::as_ref);
    if ctx.json {
        print_json(&AssigneeLookup {
            issue_id: &args.id,
            assignee,
        })?;
    } else {
        println!("{}", render_assignee(&args.id, assignee));
    }
    Ok(())
}

fn render_assignee(issue_id: &str, assignee: Option<&Employee>) -> String {
    match assignee {
        Some(employee) => format!("{issue_id}: {}", format_employee_line(employee)),
        None => format!("{issue_id}: no assignee"),
    }
}
