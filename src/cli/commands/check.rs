use tracing::warn;

use crate::error::{AppError, Result};
use crate::format::print_json;
use crate::validation::{CheckReport, CheckStatus, DatasetValidator};

use super::Context;

/// Execute the check command.
///
/// # Errors
///
/// Returns `CheckFailed` if any check reports an error.
pub fn execute(ctx: &Context) -> Result<()> {
    let report = DatasetValidator::check(&ctx.repo);
    if ctx.json {
        print_json(&report)?;
    } else {
        print!("{}", render_report(&report));
    }

    if report.ok {
        Ok(())
    } else {
        let errors = report.error_count();
        warn!(errors, "Dataset check failed");
        Err(AppError::CheckFailed { errors })
    }
}

fn render_report(report: &CheckReport) -> String {
    let mut out = String::new();
    for check in &report.checks {
        out.push_str(&format!("[{}] {}", check.status.label(), check.name));
        if let Some(message) = &check.message {
            out.push_str(&format!(": {message}"));
        }
        out.push('\n');
        for detail in &check.details {
            out.push_str(&format!("  - {detail}\n"));
        }
    }
    let warnings = report
        .checks
        .iter()
        .filter(|c| c.status == CheckStatus::Warn)
        .count();
    out.push_str(&format!(
        "{} check(s), {} error(s), {warnings} warning(s)\n",
        report.checks.len(),
        report.error_count()
    ));
    out
}
