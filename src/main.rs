//! `itr` - issue analytics over an employee/issue CSV snapshot.

use issue_tracker::run;

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
