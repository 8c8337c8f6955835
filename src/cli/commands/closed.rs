use crate::error::Result;
use crate::format::{ClosedCount, print_json};

use super::Context;

/// Execute the closed command.
///
/// # Errors
///
/// Returns an error if JSON output cannot be written.
pub fn execute(ctx: &Context) -> Result<()> {
    let closed = ctx.tracker().closed_issue_count();
    if ctx.json {
        print_json(&ClosedCount { closed })?;
    } else {
        println!("{}", render_closed(closed));
    }
    Ok(())
}

fn render_closed(closed: usize) -> String {
    format!("Closed issues: {closed}")
}
