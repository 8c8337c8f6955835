use std::collections::BTreeMap;

use crate::error::Result;
use crate::format::{OpenDurations, format_table, print_json};

use super::Context;

/// Execute the durations command.
///
/// # Errors
///
/// Returns an error if JSON output cannot be written.
pub fn execute(ctx: &Context) -> Result<()> {
    let days_open = ctx.tracker().high_medium_open_durations();
    if ctx.json {
        print_json(&OpenDurations {
            reference_date: ctx.config.reference_date_string(),
            days_open,
        })?;
    } else if days_open.is_empty() {
        println!("No open HIGH or MEDIUM priority issues.");
    } else {
        print!("{}", render_durations(&days_open));
    }
    Ok(())
}

fn render_durations(days_open: &BTreeMap<&str, i64>) -> String {
    let rows: Vec<(&str, String)> = days_open
        .iter()
        .map(|(id, days)| (*id, format!("{days} day(s)")))
        .collect();
    format_table(&rows)
}
