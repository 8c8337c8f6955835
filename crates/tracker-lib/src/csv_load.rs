//! CSV file loading for employees and issues.
//!
//! Line formats (no header row, no quoting):
//!
//! ```text
//! employees: id,name,location
//! issues:    issueId,type,createdOn,expectedResolutionOn,priority,status,assignedEmployeeId
//! ```
//!
//! Dates are `dd/mm/yyyy`. A line that cannot be turned into a record is
//! logged and dropped; it never aborts the load.

use std::fs;
use std::io::BufReader;
use std::path::Path;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord, Trim};
use serde::Serialize;
use tracing::{debug, warn};

use crate::error::{Result, TrackerError};
use crate::model::{Employee, Issue};
use crate::util::parse_csv_date;

const EMPLOYEE_FIELDS: usize = 3;
const ISSUE_FIELDS: usize = 7;

/// A line that was dropped during loading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedLine {
    pub line: usize,
    pub reason: String,
}

/// Per-file load counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FileStats {
    pub lines_read: usize,
    pub records_loaded: usize,
    pub skipped: Vec<SkippedLine>,
}

impl FileStats {
    fn skip(&mut self, err: &TrackerError, line: usize) {
        warn!(line, error = %err, "Skipping malformed line");
        self.skipped.push(SkippedLine {
            line,
            reason: err.to_string(),
        });
    }
}

/// An issue line naming an employee ID that is not in the employee list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnresolvedAssignee {
    pub issue_id: String,
    pub employee_id: u32,
}

/// Employees read from a file.
pub struct LoadedEmployees {
    pub employees: Vec<Employee>,
    pub stats: FileStats,
}

/// Issues read from a file, with assignees already resolved.
pub struct LoadedIssues {
    pub issues: Vec<Issue>,
    pub stats: FileStats,
    pub unresolved: Vec<UnresolvedAssignee>,
}

// ============================================================================
// Record parsing
// ============================================================================

fn field<'r>(record: &'r StringRecord, idx: usize) -> &'r str {
    record.get(idx).unwrap_or("")
}

fn require_fields(record: &StringRecord, expected: usize, line: usize) -> Result<()> {
    if record.len() < expected {
        return Err(TrackerError::record_parse(
            line,
            format!("expected {expected} fields, found {}", record.len()),
        ));
    }
    Ok(())
}

fn parse_id(value: &str, what: &str, line: usize) -> Result<u32> {
    match value.trim().parse::<u32>() {
        Ok(0) => Err(TrackerError::record_parse(line, format!("{what} must be > 0"))),
        Ok(id) => Ok(id),
        Err(_) => Err(TrackerError::record_parse(
            line,
            format!("{what} is not a number: '{value}'"),
        )),
    }
}

/// Parse an employee record (`id,name,location`).
///
/// # Errors
///
/// Returns `RecordParse` if fields are missing or the ID is not a positive integer.
pub fn parse_employee(record: &StringRecord, line: usize) -> Result<Employee> {
    require_fields(record, EMPLOYEE_FIELDS, line)?;
    let id = parse_id(field(record, 0), "employee id", line)?;
    Ok(Employee::new(id, field(record, 1), field(record, 2)))
}

/// Outcome of parsing an issue record.
#[derive(Debug)]
pub struct ParsedIssue {
    pub issue: Issue,
    /// Set when the line named an employee that `resolve` did not know.
    pub unresolved_employee: Option<u32>,
}

/// Parse an issue record, resolving its assignee through `resolve`.
///
/// An empty employee ID leaves the issue unassigned. An ID that `resolve`
/// cannot find also leaves it unassigned and is reported back.
///
/// # Errors
///
/// Returns `RecordParse` for missing fields, an empty issue ID, a bad date,
/// or a non-numeric employee ID.
pub fn parse_issue<F>(record: &StringRecord, line: usize, resolve: F) -> Result<ParsedIssue>
where
    F: Fn(u32) -> Option<Arc<Employee>>,
{
    require_fields(record, ISSUE_FIELDS, line)?;

    let id = field(record, 0);
    if id.is_empty() {
        return Err(TrackerError::record_parse(line, "issue id is empty"));
    }

    let created_on = parse_csv_date(field(record, 2))
        .map_err(|e| TrackerError::record_parse(line, format!("createdOn: {e}")))?;
    let expected_resolution_on = parse_csv_date(field(record, 3))
        .map_err(|e| TrackerError::record_parse(line, format!("expectedResolutionOn: {e}")))?;

    let employee_field = field(record, 6);
    let (assigned_to, unresolved_employee) = if employee_field.is_empty() {
        (None, None)
    } else {
        let employee_id = parse_id(employee_field, "employee id", line)?;
        match resolve(employee_id) {
            Some(employee) => (Some(employee), None),
            None => (None, Some(employee_id)),
        }
    };

    Ok(ParsedIssue {
        issue: Issue {
            id: id.to_string(),
            issue_type: field(record, 1).to_string(),
            created_on,
            expected_resolution_on,
            priority: field(record, 4).to_string(),
            status: field(record, 5).to_string(),
            assigned_to,
        },
        unresolved_employee,
    })
}

// ============================================================================
// File loading
// ============================================================================

fn open_reader(path: &Path) -> Result<csv::Reader<BufReader<fs::File>>> {
    let file = fs::File::open(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            TrackerError::FileNotFound(path.to_path_buf())
        } else {
            TrackerError::Io(e)
        }
    })?;

    Ok(ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(BufReader::new(file)))
}

/// Walk every record of a CSV file, handing each to `on_record`.
///
/// Records the reader itself rejects (e.g. invalid UTF-8) are skipped.
fn for_each_record<F>(path: &Path, stats: &mut FileStats, mut on_record: F) -> Result<()>
where
    F: FnMut(&StringRecord, usize, &mut FileStats),
{
    let mut reader = open_reader(path)?;
    let mut record = StringRecord::new();

    loop {
        let line = usize::try_from(reader.position().line()).unwrap_or(usize::MAX);
        match reader.read_record(&mut record) {
            Ok(false) => break,
            Ok(true) => {
                stats.lines_read += 1;
                let line = record
                    .position()
                    .and_then(|p| usize::try_from(p.line()).ok())
                    .unwrap_or(line);
                on_record(&record, line, stats);
            }
            Err(e) if e.is_io_error() => return Err(e.into()),
            Err(e) => {
                stats.lines_read += 1;
                stats.skip(&TrackerError::record_parse(line, e.to_string()), line);
            }
        }
    }

    Ok(())
}

/// Load employees from a CSV file.
///
/// # Errors
///
/// Returns `FileNotFound` or `Io` if the file cannot be read.
pub fn load_employees(path: &Path) -> Result<LoadedEmployees> {
    let mut employees = Vec::new();
    let mut stats = FileStats::default();

    for_each_record(path, &mut stats, |record, line, stats| {
        match parse_employee(record, line) {
            Ok(employee) => employees.push(employee),
            Err(e) => stats.skip(&e, line),
        }
    })?;

    stats.records_loaded = employees.len();
    debug!(
        path = %path.display(),
        loaded = stats.records_loaded,
        skipped = stats.skipped.len(),
        "Loaded employees"
    );

    Ok(LoadedEmployees { employees, stats })
}

/// Load issues from a CSV file, resolving assignees through `resolve`.
///
/// # Errors
///
/// Returns `FileNotFound` or `Io` if the file cannot be read.
pub fn load_issues<F>(path: &Path, resolve: F) -> Result<LoadedIssues>
where
    F: Fn(u32) -> Option<Arc<Employee>>,
{
    let mut issues = Vec::new();
    let mut unresolved = Vec::new();
    let mut stats = FileStats::default();

    for_each_record(path, &mut stats, |record, line, stats| {
        match parse_issue(record, line, &resolve) {
            Ok(parsed) => {
                if let Some(employee_id) = parsed.unresolved_employee {
                    debug!(issue = %parsed.issue.id, employee_id, "Assignee not found");
                    unresolved.push(UnresolvedAssignee {
                        issue_id: parsed.issue.id.clone(),
                        employee_id,
                    });
                }
                issues.push(parsed.issue);
            }
            Err(e) => stats.skip(&e, line),
        }
    })?;

    stats.records_loaded = issues.len();
    debug!(
        path = %path.display(),
        loaded = stats.records_loaded,
        skipped = stats.skipped.len(),
        unresolved = unresolved.len(),
        "Loaded issues"
    );

    Ok(LoadedIssues {
        issues,
        stats,
        unresolved,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn alice() -> Arc<Employee> {
        Arc::new(Employee::new(1, "Alice", "NY"))
    }

    fn resolve_alice(id: u32) -> Option<Arc<Employee>> {
        (id == 1).then(alice)
    }

    fn split_line(line: &str) -> StringRecord {
        line.split(',').map(str::trim).collect()
    }

    #[test]
    fn test_parse_employee() {
        let emp = parse_employee(&split_line("1001,Alice,NY"), 1).unwrap();
        assert_eq!(emp, Employee::new(1001, "Alice", "NY"));
    }

    #[test]
    fn test_parse_employee_rejects_bad_id() {
        assert!(parse_employee(&split_line("abc,Alice,NY"), 1).is_err());
        assert!(parse_employee(&split_line("0,Alice,NY"), 1).is_err());
        assert!(parse_employee(&split_line("1,Alice"), 1).is_err());
    }

    #[test]
    fn test_parse_issue_resolves_assignee() {
        let record = split_line("IS001,Hardware,01/03/2019,10/03/2019,HIGH,OPEN,1");
        let parsed = parse_issue(&record, 1, resolve_alice).unwrap();
        assert_eq!(parsed.issue.id, "IS001");
        assert_eq!(parsed.issue.issue_type, "Hardware");
        assert_eq!(
            parsed.issue.created_on,
            NaiveDate::from_ymd_opt(2019, 3, 1).unwrap()
        );
        assert_eq!(
            parsed.issue.expected_resolution_on,
            NaiveDate::from_ymd_opt(2019, 3, 10).unwrap()
        );
        assert_eq!(parsed.issue.assignee().unwrap().name, "Alice");
        assert!(parsed.unresolved_employee.is_none());
    }

    #[test]
    fn test_parse_issue_unknown_employee_is_unassigned() {
        let record = split_line("IS002,Software,01/03/2019,10/03/2019,LOW,OPEN,99");
        let parsed = parse_issue(&record, 2, resolve_alice).unwrap();
        assert!(parsed.issue.assigned_to.is_none());
        assert_eq!(parsed.unresolved_employee, Some(99));
    }

    #[test]
    fn test_parse_issue_empty_employee_is_unassigned() {
        let record = split_line("IS003,Software,01/03/2019,10/03/2019,LOW,OPEN,");
        let parsed = parse_issue(&record, 3, resolve_alice).unwrap();
        assert!(parsed.issue.assigned_to.is_none());
        assert!(parsed.unresolved_employee.is_none());
    }

    #[test]
    fn test_parse_issue_rejects_malformed() {
        let bad_date = split_line("IS004,Software,2019-03-01,10/03/2019,LOW,OPEN,1");
        assert!(parse_issue(&bad_date, 4, resolve_alice).is_err());

        let bad_emp = split_line("IS005,Software,01/03/2019,10/03/2019,LOW,OPEN,x1");
        assert!(parse_issue(&bad_emp, 5, resolve_alice).is_err());

        let short = split_line("IS006,Software,01/03/2019");
        let err = parse_issue(&short, 6, resolve_alice).unwrap_err();
        assert!(matches!(err, TrackerError::RecordParse { line: 6, .. }));

        let no_id = split_line(",Software,01/03/2019,10/03/2019,LOW,OPEN,1");
        assert!(parse_issue(&no_id, 7, resolve_alice).is_err());
    }

    #[test]
    fn test_load_skips_malformed_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("issues.csv");
        fs::write(
            &path,
            "IS001,Hardware,01/03/2019,10/03/2019,HIGH,OPEN,1\n\
             garbage line\n\
             IS002,Software,01/03/2019,bad,LOW,OPEN,1\n\
             IS003,Software,02/03/2019,12/03/2019,LOW,CLOSED,42\n",
        )
        .unwrap();

        let loaded = load_issues(&path, resolve_alice).unwrap();
        let ids: Vec<&str> = loaded.issues.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["IS001", "IS003"]);
        assert_eq!(loaded.stats.lines_read, 4);
        assert_eq!(loaded.stats.records_loaded, 2);
        assert_eq!(loaded.stats.skipped.len(), 2);
        assert_eq!(loaded.stats.skipped[0].line, 2);
        assert_eq!(loaded.stats.skipped[1].line, 3);
        assert_eq!(
            loaded.unresolved,
            vec![UnresolvedAssignee {
                issue_id: "IS003".to_string(),
                employee_id: 42,
            }]
        );
    }

    #[test]
    fn test_load_employees_trims_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("employees.csv");
        fs::write(&path, "1, Alice , NY\n2,Bob,LA\n\n").unwrap();

        let loaded = load_employees(&path).unwrap();
        assert_eq!(loaded.employees.len(), 2);
        assert_eq!(loaded.employees[0].name, "Alice");
        assert_eq!(loaded.employees[0].location, "NY");
        assert!(loaded.stats.skipped.is_empty());
    }

    #[test]
    fn test_load_missing_file() {
        let result = load_employees(Path::new("/nonexistent/employees.csv"));
        assert!(matches!(result, Err(TrackerError::FileNotFound(_))));
    }
}
