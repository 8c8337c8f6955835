use crate::error::Result;
use crate::format::print_json;

use super::Context;

/// Execute the employees command.
///
/// Text output uses the employee `Display` form, one per line.
///
/// # Errors
///
/// Returns an error if JSON output cannot be written.
pub fn execute(ctx: &Context) -> Result<()> {
    let employees = ctx.repo.employees();
    if ctx.json {
        print_json(employees)?;
    } else if employees.is_empty() {
        println!("No employees loaded.");
    } else {
        print!("{}", render_employees(employees));
    }
    Ok(())
}

fn render_employees<E: std::fmt::Display>(employees: &[E]) -> String {
    let mut out = String::new();
    for employee in employees {
        out.push_str(&format!("{employee}\n"));
    }
    out
}
