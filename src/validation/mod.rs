//! Dataset checks for `itr`.
//!
//! The loader does not enforce uniqueness or value ranges; these routines
//! report what it let through, without changing the snapshot.

use std::collections::{BTreeMap, HashMap};

use serde::Serialize;
use tracker_lib::{IssueRepository, Priority, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckStatus {
    Ok,
    Warn,
    Error,
}

impl CheckStatus {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Ok => "OK",
            Self::Warn => "WARN",
            Self::Error => "ERROR",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckResult {
    pub name: String,
    pub status: CheckStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CheckReport {
    pub ok: bool,
    pub checks: Vec<CheckResult>,
}

impl CheckReport {
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.checks
            .iter()
            .filter(|c| c.status == CheckStatus::Error)
            .count()
    }

    #[must_use]
    pub fn find(&self, name: &str) -> Option<&CheckResult> {
        self.checks.iter().find(|c| c.name == name)
    }
}

fn push_check(
    checks: &mut Vec<CheckResult>,
    name: &str,
    problem: CheckStatus,
    details: Vec<String>,
    message: impl FnOnce(usize) -> String,
) {
    let (status, message) = if details.is_empty() {
        (CheckStatus::Ok, None)
    } else {
        (problem, Some(message(details.len())))
    };
    checks.push(CheckResult {
        name: name.to_string(),
        status,
        message,
        details,
    });
}

/// Runs every dataset check against a loaded repository.
pub struct DatasetValidator;

impl DatasetValidator {
    #[must_use]
    pub fn check(repo: &IssueRepository) -> CheckReport {
        let mut checks = Vec::new();

        Self::check_load(repo, &mut checks);
        Self::check_employee_ids(repo, &mut checks);
        Self::check_issue_ids(repo, &mut checks);
        Self::check_values(repo, &mut checks);
        Self::check_dates(repo, &mut checks);
        Self::check_assignees(repo, &mut checks);

        let ok = !checks.iter().any(|c| c.status == CheckStatus::Error);
        CheckReport { ok, checks }
    }

    fn check_load(repo: &IssueRepository, checks: &mut Vec<CheckResult>) {
        let report = repo.load_report();
        let describe = |file: &str, skipped: &[tracker_lib::csv_load::SkippedLine]| {
            skipped
                .iter()
                .map(|s| format!("{file}:{}: {}", s.line, s.reason))
                .collect::<Vec<_>>()
        };

        let mut details = describe("employees", &report.employees.skipped);
        details.extend(describe("issues", &report.issues.skipped));
        push_check(checks, "load.skipped_lines", CheckStatus::Warn, details, |n| {
            format!("{n} malformed line(s) dropped")
        });
    }

    fn check_employee_ids(repo: &IssueRepository, checks: &mut Vec<CheckResult>) {
        let mut counts: BTreeMap<u32, usize> = BTreeMap::new();
        for employee in repo.employees() {
            *counts.entry(employee.id).or_insert(0) += 1;
        }
        let details = counts
            .into_iter()
            .filter(|(_, n)| *n > 1)
            .map(|(id, n)| format!("employee {id} appears {n} times"))
            .collect();
        push_check(checks, "employees.unique_ids", CheckStatus::Error, details, |n| {
            format!("{n} duplicated employee id(s)")
        });
    }

    fn check_issue_ids(repo: &IssueRepository, checks: &mut Vec<CheckResult>) {
        // Lookups ignore case, so "is001" shadows a later "IS001".
        let mut seen: HashMap<String, &str> = HashMap::new();
        let mut details = Vec::new();
        for issue in repo.issues() {
            let key = issue.id.to_ascii_lowercase();
            if let Some(first) = seen.get(&key) {
                details.push(format!("{} duplicates {first}", issue.id));
            } else {
                seen.insert(key, issue.id.as_str());
            }
        }
        push_check(checks, "issues.unique_ids", CheckStatus::Error, details, |n| {
            format!("{n} duplicated issue id(s); lookups return the first")
        });
    }

    fn check_values(repo: &IssueRepository, checks: &mut Vec<CheckResult>) {
        let bad_status = repo
            .issues()
            .iter()
            .filter(|i| i.parsed_status().is_none())
            .map(|i| format!("{}: status '{}'", i.id, i.status))
            .collect();
        push_check(checks, "issues.status_values", CheckStatus::Warn, bad_status, |n| {
            format!(
                "{n} issue(s) with a status other than {}/{}",
                Status::Open,
                Status::Closed
            )
        });

        let bad_priority = repo
            .issues()
            .iter()
            .filter(|i| i.parsed_priority().is_none())
            .map(|i| format!("{}: priority '{}'", i.id, i.priority))
            .collect();
        push_check(
            checks,
            "issues.priority_values",
            CheckStatus::Warn,
            bad_priority,
            |n| {
                format!(
                    "{n} issue(s) with a priority other than {}/{}/{}",
                    Priority::High,
                    Priority::Medium,
                    Priority::Low
                )
            },
        );
    }

    fn check_dates(repo: &IssueRepository, checks: &mut Vec<CheckResult>) {
        let details = repo
            .issues()
            .iter()
            .filter(|i| i.expected_resolution_on < i.created_on)
            .map(|i| format!("{}: expected resolution before creation", i.id))
            .collect();
        push_check(checks, "issues.date_order", CheckStatus::Warn, details, |n| {
            format!("{n} issue(s) due before they were created")
        });
    }

    fn check_assignees(repo: &IssueRepository, checks: &mut Vec<CheckResult>) {
        let mut details: Vec<String> = repo
            .load_report()
            .unresolved_assignees
            .iter()
            .map(|u| format!("{}: employee {} not found", u.issue_id, u.employee_id))
            .collect();
        details.extend(
            repo.issues()
                .iter()
                .filter(|i| i.is_open() && i.assigned_to.is_none())
                .map(|i| format!("{}: open and unassigned", i.id)),
        );
        push_check(checks, "issues.assignees", CheckStatus::Warn, details, |n| {
            format!("{n} problem(s); unassigned issues are left out of owner, location and delay views")
        });
    }
}
