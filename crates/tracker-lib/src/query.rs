//! Read-only analytics over an issue snapshot.
//!
//! [`IssueTracker`] borrows an [`IssueSource`] and a fixed reference date.
//! Every query walks the full issue list and builds a fresh result; nothing is
//! cached and nothing is mutated.
//!
//! Queries that need an assignee (delayed assignees, high-priority owners,
//! location grouping) skip unassigned issues rather than failing.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::error::{Result, TrackerError};
use crate::model::{Employee, Issue, Priority, Status};
use crate::util::{self, cmp_priority_desc, days_between, non_blank};

/// Open issues more than this many days past expected resolution are delayed.
pub const DELAY_THRESHOLD_DAYS: i64 = 7;

/// Read accessor for the issue collection.
pub trait IssueSource {
    /// All issues, in load order.
    fn issues(&self) -> &[Issue];
}

impl IssueSource for [Issue] {
    fn issues(&self) -> &[Issue] {
        self
    }
}

impl IssueSource for Vec<Issue> {
    fn issues(&self) -> &[Issue] {
        self
    }
}

/// Query engine over an issue snapshot.
pub struct IssueTracker<'a, S: IssueSource + ?Sized> {
    source: &'a S,
    today: NaiveDate,
}

impl<'a, S: IssueSource + ?Sized> IssueTracker<'a, S> {
    /// Create an engine that treats `today` as the current date.
    #[must_use]
    pub const fn new(source: &'a S, today: NaiveDate) -> Self {
        Self { source, today }
    }

    /// Create an engine using the built-in reference date (2019-05-01).
    #[must_use]
    pub fn with_default_date(source: &'a S) -> Self {
        Self::new(source, util::default_reference_date())
    }

    #[must_use]
    pub const fn reference_date(&self) -> NaiveDate {
        self.today
    }

    fn all(&self) -> &'a [Issue] {
        self.source.issues()
    }

    fn first_match(&self, id: &str) -> Option<&'a Issue> {
        self.all().iter().find(|issue| issue.id_matches(id))
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Number of issues whose status is CLOSED (any case).
    #[must_use]
    pub fn closed_issue_count(&self) -> usize {
        self.all().iter().filter(|issue| issue.is_closed()).count()
    }

    /// First issue whose ID matches `issue_id`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns `IssueNotFound` if `issue_id` is blank or matches nothing.
    /// The ID is matched as given; surrounding whitespace is not stripped.
    pub fn find_issue(&self, issue_id: &str) -> Result<&'a Issue> {
        non_blank(Some(issue_id))
            .and_then(|_| self.first_match(issue_id))
            .ok_or_else(|| TrackerError::IssueNotFound {
                id: issue_id.to_string(),
            })
    }

    /// Employee assigned to the issue, if there is one.
    ///
    /// `None` for a blank ID, an unknown ID, or an unassigned issue.
    #[must_use]
    pub fn issue_assignee(&self, issue_id: &str) -> Option<&'a Arc<Employee>> {
        non_blank(Some(issue_id))
            .and_then(|_| self.first_match(issue_id))
            .and_then(|issue| issue.assigned_to.as_ref())
    }

    /// Issues with the given status (OPEN or CLOSED, any case), in load order.
    ///
    /// `None` when `status` is blank; otherwise the (possibly empty) list of
    /// matches. A value other than OPEN/CLOSED matches nothing.
    #[must_use]
    pub fn issues_by_status(&self, status: &str) -> Option<Vec<&'a Issue>> {
        let Ok(status) = non_blank(Some(status))?.parse::<Status>() else {
            debug!(status, "Unrecognised status filter");
            return Some(Vec::new());
        };
        Some(
            self.all()
                .iter()
                .filter(|issue| status.matches(&issue.status))
                .collect(),
        )
    }

    // ========================================================================
    // Orderings
    // ========================================================================

    /// IDs of open issues, earliest expected resolution first.
    ///
    /// Ties keep load order; a repeated ID is kept only at its first position.
    #[must_use]
    pub fn open_issues_by_resolution_order(&self) -> Vec<&'a str> {
        let mut open: Vec<&Issue> = self.all().iter().filter(|i| i.is_open()).collect();
        open.sort_by_key(|issue| issue.expected_resolution_on);

        let mut seen = HashSet::new();
        open.into_iter()
            .map(|issue| issue.id.as_str())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Open issues by priority string descending, then expected resolution
    /// ascending.
    ///
    /// Priority order is lexical and case-insensitive (MEDIUM, LOW, HIGH).
    #[must_use]
    pub fn open_issues_by_priority_then_date(&self) -> Vec<&'a Issue> {
        let mut open: Vec<&Issue> = self.all().iter().filter(|i| i.is_open()).collect();
        open.sort_by(|a, b| {
            cmp_priority_desc(&a.priority, &b.priority)
                .then(a.expected_resolution_on.cmp(&b.expected_resolution_on))
        });
        open
    }

    // ========================================================================
    // Assignee-derived views
    // ========================================================================

    /// Distinct names of employees holding an open issue more than
    /// [`DELAY_THRESHOLD_DAYS`] past its expected resolution, first-seen order.
    #[must_use]
    pub fn delayed_assignees(&self) -> Vec<&'a str> {
        let mut seen = HashSet::new();
        self.all()
            .iter()
            .filter(|issue| {
                issue.is_open()
                    && days_between(issue.expected_resolution_on, self.today)
                        > DELAY_THRESHOLD_DAYS
            })
            .filter_map(|issue| assignee_or_skip(issue, "delayed_assignees"))
            .map(|employee| employee.name.as_str())
            .filter(|name| seen.insert(*name))
            .collect()
    }

    /// Issue ID → assignee employee ID for open HIGH issues.
    #[must_use]
    pub fn high_priority_open_owners(&self) -> BTreeMap<&'a str, u32> {
        let mut owners = BTreeMap::new();
        for issue in self
            .all()
            .iter()
            .filter(|issue| issue.is_open() && issue.has_priority(Priority::High))
        {
            if let Some(employee) = assignee_or_skip(issue, "high_priority_open_owners") {
                owners.entry(issue.id.as_str()).or_insert(employee.id);
            }
        }
        owners
    }

    /// Open issue IDs grouped by the assignee's location.
    #[must_use]
    pub fn open_issue_ids_by_location(&self) -> BTreeMap<&'a str, Vec<&'a str>> {
        let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for issue in self.all().iter().filter(|issue| issue.is_open()) {
            if let Some(employee) = assignee_or_skip(issue, "open_issue_ids_by_location") {
                groups
                    .entry(employee.location.as_str())
                    .or_default()
                    .push(issue.id.as_str());
            }
        }
        groups
    }

    // ========================================================================
    // Priority groupings
    // ========================================================================

    /// Open issues grouped by their raw priority string.
    ///
    /// Keys are not case-normalised: "High" and "HIGH" are separate groups.
    #[must_use]
    pub fn open_issues_by_priority(&self) -> BTreeMap<&'a str, Vec<&'a Issue>> {
        let mut groups: BTreeMap<&str, Vec<&Issue>> = BTreeMap::new();
        for issue in self.all().iter().filter(|issue| issue.is_open()) {
            groups.entry(issue.priority.as_str()).or_default().push(issue);
        }
        groups
    }

    /// Count of open issues per raw priority string.
    #[must_use]
    pub fn open_issue_count_by_priority(&self) -> BTreeMap<&'a str, usize> {
        let mut counts = BTreeMap::new();
        for issue in self.all().iter().filter(|issue| issue.is_open()) {
            *counts.entry(issue.priority.as_str()).or_insert(0) += 1;
        }
        counts
    }

    // ========================================================================
    // Durations
    // ========================================================================

    /// Issue ID → whole days since creation, for open HIGH and MEDIUM issues.
    #[must_use]
    pub fn high_medium_open_durations(&self) -> BTreeMap<&'a str, i64> {
        let mut durations = BTreeMap::new();
        for issue in self.all().iter().filter(|issue| {
            issue.is_open()
                && (issue.has_priority(Priority::High) || issue.has_priority(Priority::Medium))
        }) {
            durations
                .entry(issue.id.as_str())
                .or_insert_with(|| days_between(issue.created_on, self.today));
        }
        durations
    }
}

fn assignee_or_skip<'i>(issue: &'i Issue, query: &'static str) -> Option<&'i Employee> {
    let assignee = issue.assignee();
    if assignee.is_none() {
        debug!(issue = %issue.id, query, "Skipping unassigned issue");
    }
    assignee
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn employee(id: u32, name: &str, location: &str) -> Arc<Employee> {
        Arc::new(Employee::new(id, name, location))
    }

    fn make_issue(
        id: &str,
        status: &str,
        priority: &str,
        expected: NaiveDate,
        assigned_to: Option<&Arc<Employee>>,
    ) -> Issue {
        Issue {
            id: id.to_string(),
            issue_type: "Software".to_string(),
            created_on: date(2019, 3, 1),
            expected_resolution_on: expected,
            priority: priority.to_string(),
            status: status.to_string(),
            assigned_to: assigned_to.cloned(),
        }
    }

    /// The two-issue example: I1 (HIGH, Alice/NY) and I2 (LOW, Bob/LA).
    fn two_issue_example() -> Vec<Issue> {
        let alice = employee(1, "Alice", "NY");
        let bob = employee(2, "Bob", "LA");
        vec![
            make_issue("I1", "OPEN", "HIGH", date(2019, 4, 1), Some(&alice)),
            make_issue("I2", "OPEN", "LOW", date(2019, 4, 20), Some(&bob)),
        ]
    }

    fn mixed_dataset() -> Vec<Issue> {
        let alice = employee(1, "Alice", "NY");
        let bob = employee(2, "Bob", "LA");
        let carol = employee(3, "Carol", "NY");
        vec![
            make_issue("IS001", "OPEN", "HIGH", date(2019, 4, 10), Some(&alice)),
            make_issue("IS002", "Closed", "LOW", date(2019, 3, 10), Some(&bob)),
            make_issue("IS003", "open", "Medium", date(2019, 4, 2), Some(&carol)),
            make_issue("IS004", "OPEN", "High", date(2019, 4, 2), Some(&bob)),
            make_issue("IS005", "CLOSED", "HIGH", date(2019, 2, 1), None),
            make_issue("IS006", "OPEN", "LOW", date(2019, 4, 28), Some(&alice)),
            make_issue("IS007", "OPEN", "HIGH", date(2019, 3, 1), None),
        ]
    }

    // ------------------------------------------------------------------------
    // Example dataset
    // ------------------------------------------------------------------------

    #[test]
    fn test_two_issue_example() {
        let issues = two_issue_example();
        let tracker = IssueTracker::with_default_date(&issues);

        assert_eq!(tracker.reference_date(), date(2019, 5, 1));
        assert_eq!(tracker.closed_issue_count(), 0);
        assert_eq!(tracker.open_issues_by_resolution_order(), vec!["I1", "I2"]);
        assert_eq!(tracker.delayed_assignees(), vec!["Alice", "Bob"]);

        let groups = tracker.open_issues_by_priority();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["HIGH"].len(), 1);
        assert_eq!(groups["HIGH"][0].id, "I1");
        assert_eq!(groups["LOW"][0].id, "I2");
    }

    // ------------------------------------------------------------------------
    // Lookups
    // ------------------------------------------------------------------------

    #[test]
    fn test_closed_issue_count_ignores_case() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);
        assert_eq!(tracker.closed_issue_count(), 2);
    }

    #[test]
    fn test_closed_issue_count_empty() {
        let issues: Vec<Issue> = Vec::new();
        assert_eq!(
            IssueTracker::with_default_date(&issues).closed_issue_count(),
            0
        );
    }

    #[test]
    fn test_find_issue_case_insensitive() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);
        assert_eq!(tracker.find_issue("is003").unwrap().id, "IS003");
        assert_eq!(tracker.find_issue("IS003").unwrap().id, "IS003");
    }

    #[test]
    fn test_find_issue_not_found() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);

        let err = tracker.find_issue("IS999").unwrap_err();
        assert!(matches!(err, TrackerError::IssueNotFound { ref id } if id == "IS999"));
        assert!(tracker.find_issue("").unwrap_err().is_not_found());
        assert!(tracker.find_issue("   ").unwrap_err().is_not_found());
    }

    #[test]
    fn test_padded_id_is_not_trimmed() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);

        let err = tracker.find_issue(" IS003 ").unwrap_err();
        assert!(matches!(err, TrackerError::IssueNotFound { ref id } if id == " IS003 "));
        assert!(tracker.find_issue("IS003 ").is_err());
        assert!(tracker.issue_assignee(" IS003 ").is_none());
        assert_eq!(tracker.issue_assignee("is003").unwrap().name, "Carol");
    }

    #[test]
    fn test_find_issue_first_match_wins() {
        let mut issues = mixed_dataset();
        let mut dup = issues[0].clone();
        dup.id = "is001".to_string();
        dup.issue_type = "Duplicate".to_string();
        issues.push(dup);

        let tracker = IssueTracker::with_default_date(&issues);
        assert_eq!(tracker.find_issue("IS001").unwrap().issue_type, "Software");
    }

    #[test]
    fn test_issue_assignee() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);

        assert_eq!(tracker.issue_assignee("IS003").unwrap().name, "Carol");
        assert!(tracker.issue_assignee("IS007").is_none());
        assert!(tracker.issue_assignee("IS999").is_none());
        assert!(tracker.issue_assignee("").is_none());
    }

    #[test]
    fn test_issues_by_status() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);

        let closed = tracker.issues_by_status("closed").unwrap();
        let ids: Vec<&str> = closed.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["IS002", "IS005"]);

        let open = tracker.issues_by_status("OPEN").unwrap();
        assert_eq!(open.len(), 5);
        assert_eq!(open[0].id, "IS001");
    }

    #[test]
    fn test_issues_by_status_absent_only_for_blank() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);

        assert!(tracker.issues_by_status("").is_none());
        assert!(tracker.issues_by_status("  ").is_none());
        assert_eq!(tracker.issues_by_status("pending"), Some(Vec::new()));
    }

    #[test]
    fn test_issues_by_status_empty_list_is_not_absent() {
        let issues = two_issue_example();
        let tracker = IssueTracker::with_default_date(&issues);
        assert_eq!(tracker.issues_by_status("CLOSED"), Some(Vec::new()));
    }

    // ------------------------------------------------------------------------
    // Orderings
    // ------------------------------------------------------------------------

    #[test]
    fn test_open_issues_by_resolution_order_stable() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);

        // IS003 and IS004 share 2019-04-02 and keep load order.
        assert_eq!(
            tracker.open_issues_by_resolution_order(),
            vec!["IS007", "IS003", "IS004", "IS001", "IS006"]
        );
    }

    #[test]
    fn test_open_issues_by_resolution_order_dedups_ids() {
        let mut issues = two_issue_example();
        issues.push(issues[0].clone());

        let tracker = IssueTracker::with_default_date(&issues);
        assert_eq!(tracker.open_issues_by_resolution_order(), vec!["I1", "I2"]);
    }

    #[test]
    fn test_open_issues_by_priority_then_date_is_lexical() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);

        let ids: Vec<&str> = tracker
            .open_issues_by_priority_then_date()
            .iter()
            .map(|i| i.id.as_str())
            .collect();
        // MEDIUM > LOW > HIGH lexically; HIGH/High tie broken by date.
        assert_eq!(ids, vec!["IS003", "IS006", "IS007", "IS004", "IS001"]);
    }

    // ------------------------------------------------------------------------
    // Assignee-derived views
    // ------------------------------------------------------------------------

    #[test]
    fn test_delayed_assignees_boundary() {
        let alice = employee(1, "Alice", "NY");
        let bob = employee(2, "Bob", "LA");
        let issues = vec![
            // exactly 7 days overdue: excluded
            make_issue("A", "OPEN", "LOW", date(2019, 4, 24), Some(&alice)),
            // 8 days overdue: included
            make_issue("B", "OPEN", "LOW", date(2019, 4, 23), Some(&bob)),
        ];
        let tracker = IssueTracker::with_default_date(&issues);
        assert_eq!(tracker.delayed_assignees(), vec!["Bob"]);
    }

    #[test]
    fn test_delayed_assignees_dedup_and_skip() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);

        // IS001 Alice (21d), IS003 Carol (29d), IS004 Bob (29d), IS007 unassigned,
        // IS006 only 3d, closed issues ignored.
        assert_eq!(tracker.delayed_assignees(), vec!["Alice", "Carol", "Bob"]);
    }

    #[test]
    fn test_delayed_assignees_no_duplicates() {
        let alice = employee(1, "Alice", "NY");
        let issues = vec![
            make_issue("A", "OPEN", "LOW", date(2019, 1, 1), Some(&alice)),
            make_issue("B", "OPEN", "HIGH", date(2019, 2, 1), Some(&alice)),
        ];
        let tracker = IssueTracker::with_default_date(&issues);
        assert_eq!(tracker.delayed_assignees(), vec!["Alice"]);
    }

    #[test]
    fn test_delayed_assignees_uses_reference_date() {
        let issues = two_issue_example();
        let tracker = IssueTracker::new(&issues, date(2019, 4, 9));
        assert_eq!(tracker.delayed_assignees(), vec!["Alice"]);
    }

    #[test]
    fn test_high_priority_open_owners() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);

        let owners = tracker.high_priority_open_owners();
        // IS007 is HIGH and open but unassigned: skipped.
        assert_eq!(owners.len(), 2);
        assert_eq!(owners["IS001"], 1);
        assert_eq!(owners["IS004"], 2);
    }

    #[test]
    fn test_open_issue_ids_by_location() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);

        let groups = tracker.open_issue_ids_by_location();
        assert_eq!(groups.len(), 2);
        assert_eq!(groups["NY"], vec!["IS001", "IS003", "IS006"]);
        assert_eq!(groups["LA"], vec!["IS004"]);
    }

    // ------------------------------------------------------------------------
    // Priority groupings
    // ------------------------------------------------------------------------

    #[test]
    fn test_open_issues_by_priority_keeps_raw_case() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);

        let groups = tracker.open_issues_by_priority();
        let keys: Vec<&str> = groups.keys().copied().collect();
        assert_eq!(keys, vec!["HIGH", "High", "LOW", "Medium"]);

        let high: Vec<&str> = groups["HIGH"].iter().map(|i| i.id.as_str()).collect();
        assert_eq!(high, vec!["IS001", "IS007"]);
        assert_eq!(groups["High"][0].id, "IS004");
    }

    #[test]
    fn test_open_issue_count_by_priority() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);

        let counts = tracker.open_issue_count_by_priority();
        assert_eq!(counts["HIGH"], 2);
        assert_eq!(counts["High"], 1);
        assert_eq!(counts["LOW"], 1);
        assert_eq!(counts["Medium"], 1);
        assert_eq!(counts.values().sum::<usize>(), 5);
    }

    // ------------------------------------------------------------------------
    // Durations
    // ------------------------------------------------------------------------

    #[test]
    fn test_high_medium_open_durations() {
        let issues = mixed_dataset();
        let tracker = IssueTracker::with_default_date(&issues);

        let durations = tracker.high_medium_open_durations();
        let keys: Vec<&str> = durations.keys().copied().collect();
        assert_eq!(keys, vec!["IS001", "IS003", "IS004", "IS007"]);
        // created 2019-03-01, reference 2019-05-01
        assert!(durations.values().all(|&d| d == 61));
    }

    #[test]
    fn test_queries_over_slice_source() {
        let issues = two_issue_example();
        let tracker = IssueTracker::with_default_date(issues.as_slice());
        assert_eq!(tracker.open_issue_count_by_priority().len(), 2);
    }
}
