//! `tracker-lib` - In-memory issue analytics.
//!
//! Loads a fixed snapshot of employees and issues from CSV files and answers
//! read-only queries relative to a configured reference date.
//!
//! # Quick Start
//!
//! ```no_run
//! use tracker_lib::{IssueRepository, IssueTracker};
//!
//! // Load once
//! let repo = IssueRepository::open("data/employees.csv", "data/issues.csv").unwrap();
//!
//! // Query
//! let tracker = IssueTracker::with_default_date(&repo);
//! let closed = tracker.closed_issue_count();
//! let late = tracker.delayed_assignees();
//! let owner = tracker.issue_assignee("IS001");
//! ```

pub mod csv_load;
pub mod error;
pub mod model;
pub mod query;
pub mod store;
pub mod util;

pub use error::{Result, TrackerError};
pub use model::{Employee, Issue, Priority, Status};
pub use query::{DELAY_THRESHOLD_DAYS, IssueSource, IssueTracker};
pub use store::{IssueRepository, LoadReport};
