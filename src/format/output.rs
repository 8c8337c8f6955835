use std::collections::BTreeMap;

use serde::Serialize;
use tracker_lib::{Employee, Issue};

/// Closed-issue count.
#[derive(Debug, Clone, Serialize)]
pub struct ClosedCount {
    pub closed: usize,
}

/// Assignee lookup result; `assignee` is null when there is none.
#[derive(Debug, Clone, Serialize)]
pub struct AssigneeLookup<'a> {
    pub issue_id: &'a str,
    pub assignee: Option<&'a Employee>,
}

/// Issues matching a status filter.
#[derive(Debug, Clone, Serialize)]
pub struct StatusListing<'a> {
    pub status: &'a str,
    pub count: usize,
    pub issues: Vec<&'a Issue>,
}

/// Issues with a count, for ordered views.
#[derive(Debug, Clone, Serialize)]
pub struct IssueListing<'a> {
    pub count: usize,
    pub issues: Vec<&'a Issue>,
}

/// Employees holding issues more than the threshold past due.
#[derive(Debug, Clone, Serialize)]
pub struct DelayedAssignees<'a> {
    pub reference_date: String,
    pub threshold_days: i64,
    pub employees: Vec<&'a str>,
}

/// Days open per issue, relative to the reference date.
#[derive(Debug, Clone, Serialize)]
pub struct OpenDurations<'a> {
    pub reference_date: String,
    pub days_open: BTreeMap<&'a str, i64>,
}
