//! Core data types for tracker-lib.
//!
//! `Issue` keeps its status and priority exactly as they were read. Matching
//! against [`Status`] and [`Priority`] is case-insensitive, but grouping uses
//! the raw strings, so "High" and "HIGH" are distinct group keys.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::TrackerError;

/// Issue lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Open,
    Closed,
}

impl Status {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "OPEN",
            Self::Closed => "CLOSED",
        }
    }

    /// Case-insensitive comparison against a raw status string.
    #[must_use]
    pub fn matches(self, raw: &str) -> bool {
        raw.eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            other => Err(TrackerError::invalid_input(
                "status",
                format!("expected OPEN or CLOSED, got '{other}'"),
            )),
        }
    }
}

/// Issue priority.
///
/// Not `Ord`: issues are ordered by their raw priority string, see
/// [`crate::util::cmp_priority_desc`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Priority {
    High,
    Medium,
    Low,
}

impl Priority {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::High => "HIGH",
            Self::Medium => "MEDIUM",
            Self::Low => "LOW",
        }
    }

    /// Case-insensitive comparison against a raw priority string.
    #[must_use]
    pub fn matches(self, raw: &str) -> bool {
        raw.eq_ignore_ascii_case(self.as_str())
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Priority {
    type Err = TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "high" => Ok(Self::High),
            "medium" => Ok(Self::Medium),
            "low" => Ok(Self::Low),
            other => Err(TrackerError::invalid_input(
                "priority",
                format!("expected HIGH, MEDIUM or LOW, got '{other}'"),
            )),
        }
    }
}

/// A person who may be assigned issues.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Employee {
    pub id: u32,
    pub name: String,
    pub location: String,
}

impl Employee {
    #[must_use]
    pub fn new(id: u32, name: impl Into<String>, location: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            location: location.into(),
        }
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Employee : {{Employee Id : {}; Name :{}; Location : {}}}",
            self.id, self.name, self.location
        )
    }
}

/// A tracked work item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Unique ID (e.g., "IS001").
    pub id: String,

    /// Free-form category (e.g., "Hardware").
    #[serde(rename = "type")]
    pub issue_type: String,

    pub created_on: NaiveDate,

    pub expected_resolution_on: NaiveDate,

    /// Raw priority as read (HIGH/MEDIUM/LOW in any case).
    pub priority: String,

    /// Raw status as read (OPEN/CLOSED in any case).
    pub status: String,

    /// Resolved assignee, shared with the repository's employee list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assigned_to: Option<Arc<Employee>>,
}

impl Issue {
    #[must_use]
    pub fn is_open(&self) -> bool {
        Status::Open.matches(&self.status)
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        Status::Closed.matches(&self.status)
    }

    #[must_use]
    pub fn has_priority(&self, priority: Priority) -> bool {
        priority.matches(&self.priority)
    }

    /// Case-insensitive ID comparison.
    #[must_use]
    pub fn id_matches(&self, id: &str) -> bool {
        self.id.eq_ignore_ascii_case(id)
    }

    /// Parsed status, or `None` if the raw value is not a known status.
    #[must_use]
    pub fn parsed_status(&self) -> Option<Status> {
        self.status.parse().ok()
    }

    /// Parsed priority, or `None` if the raw value is not a known priority.
    #[must_use]
    pub fn parsed_priority(&self) -> Option<Priority> {
        self.priority.parse().ok()
    }

    #[must_use]
    pub fn assignee(&self) -> Option<&Employee> {
        self.assigned_to.as_deref()
    }
}
