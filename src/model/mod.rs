//! Core data types for `issue_tracker`.
//!
//! This module defines the fundamental types used throughout the application:
//! - `Issue` - The tracked ticket record
//! - `Status` - Issue lifecycle states
//! - `Priority` - Issue urgency
//! - `NewIssue` - Payload for creating an issue
//! - `IssueUpdate` / `Patch` - Partial update payload

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// Issue lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    #[default]
    Open,
    InProgress,
    Resolved,
    Closed,
}

impl Status {
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Resolved, Self::Closed];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Status {
    type Err = crate::error::TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            other => Err(crate::error::TrackerError::InvalidStatus {
                status: other.to_string(),
            }),
        }
    }
}

/// Issue priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
    Critical,
}

impl Priority {
    pub const ALL: [Self; 4] = [Self::Low, Self::Medium, Self::High, Self::Critical];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Priority {
    type Err = crate::error::TrackerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low" => Ok(Self::Low),
            "medium" => Ok(Self::Medium),
            "high" => Ok(Self::High),
            "critical" => Ok(Self::Critical),
            other => Err(crate::error::TrackerError::InvalidPriority {
                priority: other.to_string(),
            }),
        }
    }
}

/// The primary issue entity.
///
/// Field names on the wire are camelCase (`createdAt`, `updatedAt`) and
/// absent optionals serialize as `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    /// Store-assigned id, starting at 1.
    pub id: u64,

    /// Title (never empty).
    pub title: String,

    /// Detailed description.
    #[serde(default)]
    pub description: Option<String>,

    /// Workflow status.
    #[serde(default)]
    pub status: Status,

    /// Priority.
    #[serde(default)]
    pub priority: Priority,

    /// Assigned user.
    #[serde(default)]
    pub assignee: Option<String>,

    /// Creation timestamp.
    pub created_at: DateTime<Utc>,

    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Issue {
    /// Build a stored issue from a creation payload.
    #[must_use]
    pub fn from_new(id: u64, new: NewIssue, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: new.title,
            description: new.description,
            status: new.status,
            priority: new.priority,
            assignee: new.assignee,
            created_at: now,
            updated_at: now,
        }
    }

    /// Merge the supplied fields of `update` into this issue.
    ///
    /// Only `Patch::Value` fields are applied. Timestamps are left alone.
    pub fn apply(&mut self, update: &IssueUpdate) {
        if let Some(title) = update.title.as_value() {
            self.title.clone_from(title);
        }
        if let Some(description) = update.description.as_value() {
            self.description = Some(description.clone());
        }
        if let Some(status) = update.status.as_value() {
            self.status = *status;
        }
        if let Some(priority) = update.priority.as_value() {
            self.priority = *priority;
        }
        if let Some(assignee) = update.assignee.as_value() {
            self.assignee = Some(assignee.clone());
        }
    }
}

/// Payload for creating an issue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewIssue {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub assignee: Option<String>,
}

impl NewIssue {
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            status: Status::default(),
            priority: Priority::default(),
            assignee: None,
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub const fn with_status(mut self, status: Status) -> Self {
        self.status = status;
        self
    }

    #[must_use]
    pub const fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    #[must_use]
    pub fn with_assignee(mut self, assignee: impl Into<String>) -> Self {
        self.assignee = Some(assignee.into());
        self
    }
}

/// A single field of a partial update.
///
/// `Absent` means the field was not in the payload, `Null` means it was sent
/// as an explicit `null`. The store applies neither; only `Value` changes
/// the record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Patch<T> {
    Absent,
    Null,
    Value(T),
}

impl<T> Patch<T> {
    #[must_use]
    pub const fn as_value(&self) -> Option<&T> {
        match self {
            Self::Value(value) => Some(value),
            Self::Absent | Self::Null => None,
        }
    }

    #[must_use]
    pub const fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl<T> Default for Patch<T> {
    fn default() -> Self {
        Self::Absent
    }
}

impl<T> From<Option<T>> for Patch<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Null, Self::Value)
    }
}

// Missing keys never reach this impl; `#[serde(default)]` yields `Absent`.
impl<'de, T: Deserialize<'de>> Deserialize<'de> for Patch<T> {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Option::<T>::deserialize(deserializer).map(Self::from)
    }
}

/// Fields to update on an issue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct IssueUpdate {
    pub title: Patch<String>,
    pub description: Patch<String>,
    pub status: Patch<Status>,
    pub priority: Patch<Priority>,
    pub assignee: Patch<String>,
}

impl IssueUpdate {
    /// True when no field carries a value to apply.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        self.title.as_value().is_none()
            && self.description.as_value().is_none()
            && self.status.as_value().is_none()
            && self.priority.as_value().is_none()
            && self.assignee.as_value().is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_status_round_trips_wire_names() {
        for status in Status::ALL {
            let parsed: Status = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
        assert_eq!(
            serde_json::to_value(Status::InProgress).unwrap(),
            json!("in_progress")
        );
    }

    #[test]
    fn test_status_parse_rejects_unknown() {
        let err = "blocked".parse::<Status>().unwrap_err();
        assert_eq!(err.to_string(), "Invalid status: blocked");
    }

    #[test]
    fn test_parse_requires_exact_wire_names() {
        assert_eq!("high".parse::<Priority>().unwrap(), Priority::High);
        assert!("urgent".parse::<Priority>().is_err());
        assert!("HIGH".parse::<Priority>().is_err());
        assert!(" high".parse::<Priority>().is_err());
        assert!("OPEN".parse::<Status>().is_err());
        assert!("In_Progress".parse::<Status>().is_err());
    }

    #[test]
    fn test_defaults() {
        assert_eq!(Status::default(), Status::Open);
        assert_eq!(Priority::default(), Priority::Medium);
    }

    #[test]
    fn test_issue_wire_field_names() {
        let now = Utc::now();
        let issue = Issue::from_new(7, NewIssue::new("Broken"), now);
        let value = serde_json::to_value(&issue).unwrap();
        let obj = value.as_object().unwrap();

        let mut keys: Vec<_> = obj.keys().map(String::as_str).collect();
        keys.sort_unstable();
        assert_eq!(
            keys,
            vec![
                "assignee",
                "createdAt",
                "description",
                "id",
                "priority",
                "status",
                "title",
                "updatedAt"
            ]
        );
        assert_eq!(obj["description"], json!(null));
        assert_eq!(obj["status"], json!("open"));
        assert_eq!(obj["priority"], json!("medium"));
    }

    #[test]
    fn test_new_issue_defaults_from_json() {
        let new: NewIssue = serde_json::from_value(json!({"title": "X"})).unwrap();
        assert_eq!(new, NewIssue::new("X"));
    }

    #[test]
    fn test_new_issue_rejects_null_status() {
        let result: Result<NewIssue, _> =
            serde_json::from_value(json!({"title": "X", "status": null}));
        assert!(result.is_err());
    }

    #[test]
    fn test_update_distinguishes_absent_and_null() {
        let update: IssueUpdate =
            serde_json::from_value(json!({"description": null, "status": "closed"})).unwrap();
        assert!(update.title.is_absent());
        assert!(update.description.is_null());
        assert_eq!(update.status, Patch::Value(Status::Closed));
        assert!(update.assignee.is_absent());
        assert!(!update.is_noop());
    }

    #[test]
    fn test_apply_ignores_null_and_absent() {
        let now = Utc::now();
        let mut issue = Issue::from_new(
            1,
            NewIssue::new("Title")
                .with_description("keep me")
                .with_assignee("alice"),
            now,
        );
        let update = IssueUpdate {
            description: Patch::Null,
            priority: Patch::Value(Priority::Critical),
            ..Default::default()
        };

        issue.apply(&update);

        assert_eq!(issue.description.as_deref(), Some("keep me"));
        assert_eq!(issue.assignee.as_deref(), Some("alice"));
        assert_eq!(issue.priority, Priority::Critical);
        assert_eq!(issue.title, "Title");
    }

    #[test]
    fn test_empty_update_is_noop() {
        let update: IssueUpdate =
            serde_json::from_value(json!({"title": null, "assignee": null})).unwrap();
        assert!(update.is_noop());
    }
}
