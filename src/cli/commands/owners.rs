use std::collections::BTreeMap;

use crate::error::Result;
use crate::format::{format_table, print_json};

use super::Context;

/// Execute the owners command.
///
/// # Errors
///
/// Returns an error if JSON output cannot be written.
pub fn execute(ctx: &Context) -> Result<()> {
    let owners = ctx.tracker().high_priority_open_owners();
    if ctx.json {
        print_json(&owners)?;
    } else if owners.is_empty() {
        println!("No open HIGH priority issues with an assignee.");
    } else {
        print!("{}", render_owners(&owners));
    }
    Ok(())
}

fn render_owners(owners: &BTreeMap<&str, u32>) -> String {
    let rows: Vec<(&str, String)> = owners
        .iter()
        .map(|(issue, employee)| (*issue, format!("employee {employee}")))
        .collect();
    format_table(&rows)
}
