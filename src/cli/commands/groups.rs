use std::collections::BTreeMap;

use tracker_lib::Issue;

use crate::cli::GroupsArgs;
use crate::error::Result;
use crate::format::{format_issue_line, format_priority, format_table, print_json};

use super::Context;

/// Execute the groups command.
///
/// Groups are keyed by the raw priority value, so differently-cased
/// priorities are listed separately.
///
/// # Errors
///
/// Returns an error if JSON output cannot be written.
pub fn execute(args: &GroupsArgs, ctx: &Context) -> Result<()> {
    let tracker = ctx.tracker();
    if args.count {
        let counts = tracker.open_issue_count_by_priority();
        if ctx.json {
            print_json(&counts)?;
        } else {
            print!("{}", render_counts(&counts));
        }
    } else {
        let groups = tracker.open_issues_by_priority();
        if ctx.json {
            print_json(&groups)?;
        } else {
            print!("{}", render_groups(&groups));
        }
    }
    Ok(())
}

fn render_counts(counts: &BTreeMap<&str, usize>) -> String {
    let rows: Vec<(String, String)> = counts
        .iter()
        .map(|(priority, count)| (format_priority(priority), count.to_string()))
        .collect();
    format_table(&rows)
}

fn render_groups(groups: &BTreeMap<&str, Vec<&Issue>>) -> String {
    let mut out = String::new();
    for (priority, issues) in groups {
        out.push_str(&format!("{} ({})\n", format_priority(priority), issues.len()));
        for issue in issues {
            out.push_str(&format!("  {}\n", format_issue_line(issue)));
        }
    }
    out
}
