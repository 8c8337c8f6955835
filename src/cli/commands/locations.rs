use std::collections::BTreeMap;

use crate::error::Result;
use crate::format::{format_table, print_json};

use super::{Context, join_ids};

/// Execute the locations command.
///
/// # Errors
///
/// Returns an error if JSON output cannot be written.
pub fn execute(ctx: &Context) -> Result<()> {
    let groups = ctx.tracker().open_issue_ids_by_location();
    if ctx.json {
        print_json(&groups)?;
    } else if groups.is_empty() {
        println!("No assigned open issues.");
    } else {
        print!("{}", render_locations(&groups));
    }
    Ok(())
}

fn render_locations(groups: &BTreeMap<&str, Vec<&str>>) -> String {
    let rows: Vec<(&str, String)> = groups
        .iter()
        .map(|(location, ids)| (*location, join_ids(ids)))
        .collect();
    format_table(&rows)
}
