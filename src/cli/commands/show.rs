use tracing::debug;

use crate::cli::IdArgs;
use crate::error::Result;
use crate::format::{format_issue_details, print_json};

use super::Context;

/// Execute the show command.
///
/// # Errors
///
/// Returns `IssueNotFound` if no issue matches the ID.
pub fn execute(args: &IdArgs, ctx: &Context) -> Result<()> {
    let issue = ctx.tracker().find_issue(&args.id)?;
    debug!(requested = %args.id, found = %issue.id, "Issue found");

    if ctx.json {
        print_json(issue)?;
    } else {
        print!("{}", format_issue_details(issue));
    }
    Ok(())
}
