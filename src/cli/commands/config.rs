use std::path::Path;

use serde::Serialize;

use crate::config::Config;
use crate::error::Result;
use crate::format::{format_table, print_json};

#[derive(Debug, Serialize)]
struct ConfigView {
    reference_date: String,
    data_dir: String,
    employees_path: String,
    issues_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
}

impl ConfigView {
    fn new(config: &Config) -> Self {
        Self {
            reference_date: config.reference_date_string(),
            data_dir: display_path(&config.data_dir),
            employees_path: display_path(&config.employees_path()),
            issues_path: display_path(&config.issues_path()),
            source: config.source.as_deref().map(display_path),
        }
    }
}

/// Absolute, non-UNC form when the path exists; as given otherwise.
fn display_path(path: &Path) -> String {
    dunce::canonicalize(path)
        .unwrap_or_else(|_| path.to_path_buf())
        .display()
        .to_string()
}

/// Execute the config command.
///
/// # Errors
///
/// Returns an error if JSON output cannot be written.
pub fn execute(config: &Config, json: bool) -> Result<()> {
    let view = ConfigView::new(config);
    if json {
        print_json(&view)?;
    } else {
        print!("{}", render_config(&view));
    }
    Ok(())
}

fn render_config(view: &ConfigView) -> String {
    let rows = [
        ("reference_date", view.reference_date.as_str()),
        ("data_dir", view.data_dir.as_str()),
        ("employees", view.employees_path.as_str()),
        ("issues", view.issues_path.as_str()),
        ("source", view.source.as_deref().unwrap_or("(defaults)")),
    ];
    format_table(&rows)
}
