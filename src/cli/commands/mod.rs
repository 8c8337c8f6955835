//! Command implementations.
//!
//! Each command renders its text output through a pure `render_*` function so
//! the output can be unit tested without capturing stdout.

pub mod assignee;
pub mod check;
pub mod closed;
pub mod completions;
pub mod config;
pub mod delayed;
pub mod durations;
pub mod employees;
pub mod groups;
pub mod locations;
pub mod ordered;
pub mod owners;
pub mod show;
pub mod status;

use tracing::debug;
use tracker_lib::{IssueRepository, IssueTracker};

use crate::config::Config;
use crate::error::Result;

/// Loaded snapshot plus the settings a command needs to answer a query.
pub struct Context {
    pub repo: IssueRepository,
    pub config: Config,
    pub json: bool,
}

impl Context {
    /// Load the snapshot named by `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if either CSV file cannot be read.
    pub fn open(config: Config, json: bool) -> Result<Self> {
        let employees = config.employees_path();
        let issues = config.issues_path();
        debug!(
            employees = %employees.display(),
            issues = %issues.display(),
            "Opening snapshot"
        );
        let repo = IssueRepository::open(&employees, &issues)?;
        Ok(Self { repo, config, json })
    }

    /// Query engine bound to the configured reference date.
    #[must_use]
    pub const fn tracker(&self) -> IssueTracker<'_, IssueRepository> {
        IssueTracker::new(&self.repo, self.config.reference_date)
    }
}

/// Join IDs for a single text line.
fn join_ids<S: AsRef<str>>(ids: &[S]) -> String {
    ids.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(", ")
}
