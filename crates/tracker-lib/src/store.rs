//! Read-only issue repository.
//!
//! Built once from the employee and issue CSV files (or from in-memory
//! records) and never mutated afterwards. Employees are shared with the
//! issues that reference them through `Arc`.

use std::path::Path;
use std::sync::Arc;

use serde::Serialize;
use tracing::info;

use crate::csv_load::{self, FileStats, UnresolvedAssignee};
use crate::error::Result;
use crate::model::{Employee, Issue};
use crate::query::IssueSource;

/// What happened while loading a repository from disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct LoadReport {
    pub employees: FileStats,
    pub issues: FileStats,
    pub unresolved_assignees: Vec<UnresolvedAssignee>,
}

impl LoadReport {
    /// Total lines dropped across both files.
    #[must_use]
    pub fn skipped_count(&self) -> usize {
        self.employees.skipped.len() + self.issues.skipped.len()
    }
}

/// Immutable snapshot of employees and issues.
#[derive(Debug, Clone, Default)]
pub struct IssueRepository {
    employees: Vec<Arc<Employee>>,
    issues: Vec<Issue>,
    report: LoadReport,
}

impl IssueRepository {
    // ========================================================================
    // Construction
    // ========================================================================

    /// Load employees, then issues, resolving each issue's assignee by ID.
    ///
    /// Malformed lines are dropped and recorded in [`Self::load_report`].
    ///
    /// # Errors
    ///
    /// Returns `FileNotFound` or `Io` if either file cannot be read.
    pub fn open(employees_path: impl AsRef<Path>, issues_path: impl AsRef<Path>) -> Result<Self> {
        let loaded_employees = csv_load::load_employees(employees_path.as_ref())?;
        let employees: Vec<Arc<Employee>> = loaded_employees
            .employees
            .into_iter()
            .map(Arc::new)
            .collect();

        let loaded_issues = csv_load::load_issues(issues_path.as_ref(), |id| {
            find_employee(&employees, id).cloned()
        })?;

        let report = LoadReport {
            employees: loaded_employees.stats,
            issues: loaded_issues.stats,
            unresolved_assignees: loaded_issues.unresolved,
        };

        info!(
            employees = employees.len(),
            issues = loaded_issues.issues.len(),
            skipped = report.skipped_count(),
            "Repository loaded"
        );

        Ok(Self {
            employees,
            issues: loaded_issues.issues,
            report,
        })
    }

    /// Build a repository from records that are already resolved.
    #[must_use]
    pub fn from_records(employees: Vec<Arc<Employee>>, issues: Vec<Issue>) -> Self {
        Self {
            employees,
            issues,
            report: LoadReport::default(),
        }
    }

    // ========================================================================
    // Accessors
    // ========================================================================

    #[must_use]
    pub fn employees(&self) -> &[Arc<Employee>] {
        &self.employees
    }

    #[must_use]
    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    /// First employee with the given ID.
    #[must_use]
    pub fn employee(&self, id: u32) -> Option<&Arc<Employee>> {
        find_employee(&self.employees, id)
    }

    #[must_use]
    pub const fn load_report(&self) -> &LoadReport {
        &self.report
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.issues.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

impl IssueSource for IssueRepository {
    fn issues(&self) -> &[Issue] {
        &self.issues
    }
}

fn find_employee(employees: &[Arc<Employee>], id: u32) -> Option<&Arc<Employee>> {
    employees.iter().find(|e| e.id == id)
}
