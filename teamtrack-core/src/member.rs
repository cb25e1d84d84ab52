//! Team members and the fields tracked for each of them.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{TrackerError, TrackerResult};
use crate::id::RecordId;

/// Lifecycle stage of a member's task.
///
/// Variant order is the roster order: Not Started < In Progress < Blocked < Done.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Status {
    #[default]
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    Blocked,
    Done,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::NotStarted,
        Status::InProgress,
        Status::Blocked,
        Status::Done,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Status::NotStarted => "Not Started",
            Status::InProgress => "In Progress",
            Status::Blocked => "Blocked",
            Status::Done => "Done",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = TrackerError;

    /// Accepts the display label in any case, with spaces, dashes or
    /// underscores between words ("in progress", "in-progress", "IN_PROGRESS").
    fn from_str(s: &str) -> TrackerResult<Self> {
        let key = normalize_key(s);
        Status::ALL
            .into_iter()
            .find(|status| normalize_key(status.label()) == key)
            .ok_or_else(|| {
                TrackerError::invalid("status", s, &Status::ALL.map(|st| st.label()))
            })
    }
}

/// Urgency tag of a member's task.
///
/// Variants are declared in increasing urgency; the roster sorts High first.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Priority {
    type Err = TrackerError;

    fn from_str(s: &str) -> TrackerResult<Self> {
        let key = normalize_key(s);
        Priority::ALL
            .into_iter()
            .find(|priority| normalize_key(priority.label()) == key)
            .ok_or_else(|| {
                TrackerError::invalid("priority", s, &Priority::ALL.map(|pr| pr.label()))
            })
    }
}

fn normalize_key(s: &str) -> String {
    s.trim()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .flat_map(char::to_lowercase)
        .collect()
}

/// A tracked person and what they are working on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub id: RecordId,
    pub name: String,
    #[serde(default)]
    pub task: String,
    #[serde(default)]
    pub status: Status,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default, with = "due_date")]
    pub due_date: Option<NaiveDate>,
    #[serde(default)]
    pub notes: String,
}

impl Member {
    pub fn from_draft(id: RecordId, draft: MemberDraft) -> Self {
        Member {
            id,
            name: draft.name,
            task: draft.task,
            status: draft.status,
            priority: draft.priority,
            due_date: draft.due_date,
            notes: draft.notes,
        }
    }

    /// Replace exactly one field. The id is never touched.
    pub fn apply(&mut self, update: MemberUpdate) {
        match update {
            MemberUpdate::Name(name) => self.name = name,
            MemberUpdate::Task(task) => self.task = task,
            MemberUpdate::Status(status) => self.status = status,
            MemberUpdate::Priority(priority) => self.priority = priority,
            MemberUpdate::DueDate(due_date) => self.due_date = due_date,
            MemberUpdate::Notes(notes) => self.notes = notes,
        }
    }

    /// Case-insensitive substring match on name or task.
    /// An empty query matches everyone.
    pub fn matches_query(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        let needle = query.to_lowercase();
        self.name.to_lowercase().contains(&needle) || self.task.to_lowercase().contains(&needle)
    }
}

/// Field values for a member that does not exist yet.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct MemberDraft {
    pub name: String,
    pub task: String,
    pub status: Status,
    pub priority: Priority,
    pub due_date: Option<NaiveDate>,
    pub notes: String,
}

impl MemberDraft {
    pub fn named(name: impl Into<String>) -> Self {
        MemberDraft {
            name: name.into(),
            ..MemberDraft::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// A single-field change to a member.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MemberUpdate {
    Name(String),
    Task(String),
    Status(Status),
    Priority(Priority),
    DueDate(Option<NaiveDate>),
    Notes(String),
}

impl MemberUpdate {
    pub fn field_name(&self) -> &'static str {
        match self {
            MemberUpdate::Name(_) => "name",
            MemberUpdate::Task(_) => "task",
            MemberUpdate::Status(_) => "status",
            MemberUpdate::Priority(_) => "priority",
            MemberUpdate::DueDate(_) => "dueDate",
            MemberUpdate::Notes(_) => "notes",
        }
    }
}

/// Due dates are stored as `YYYY-MM-DD`, with `""` meaning none.
mod due_date {
    use chrono::NaiveDate;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S>(value: &Option<NaiveDate>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(date) => serializer.serialize_str(&date.format(FORMAT).to_string()),
            None => serializer.serialize_str(""),
        }
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        let Some(raw) = raw.filter(|s| !s.trim().is_empty()) else {
            return Ok(None);
        };

        match NaiveDate::parse_from_str(raw.trim(), FORMAT) {
            Ok(date) => Ok(Some(date)),
            Err(_) => {
                log::warn!("ignoring unreadable due date '{}'", raw);
                Ok(None)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn alex() -> Member {
        Member {
            id: RecordId::from(1u64),
            name: "Alex Chen".to_string(),
            task: "API integration".to_string(),
            status: Status::InProgress,
            priority: Priority::High,
            due_date: NaiveDate::from_ymd_opt(2025, 1, 15),
            notes: "Waiting on backend team".to_string(),
        }
    }

    #[test]
    fn status_order_follows_lifecycle() {
        assert!(Status::NotStarted < Status::InProgress);
        assert!(Status::InProgress < Status::Blocked);
        assert!(Status::Blocked < Status::Done);
    }

    #[test]
    fn status_parses_loose_spellings() {
        assert_eq!("in progress".parse::<Status>().unwrap(), Status::InProgress);
        assert_eq!("Not-Started".parse::<Status>().unwrap(), Status::NotStarted);
        assert_eq!("DONE".parse::<Status>().unwrap(), Status::Done);
        assert!("finished".parse::<Status>().is_err());
    }

    #[test]
    fn priority_rejects_unknown_values() {
        let err = "urgent".parse::<Priority>().unwrap_err();
        assert!(err.to_string().contains("Low, Medium, High"));
    }

    #[test]
    fn member_json_uses_legacy_field_names() {
        let json = serde_json::to_value(alex()).unwrap();
        assert_eq!(json["dueDate"], "2025-01-15");
        assert_eq!(json["status"], "In Progress");
        assert_eq!(json["id"], "1");
    }

    #[test]
    fn empty_due_date_reads_as_none_and_writes_back_empty() {
        let json = r#"{"id":2,"name":"Sam","task":"","status":"Done","priority":"Low","dueDate":"","notes":""}"#;
        let member: Member = serde_json::from_str(json).unwrap();
        assert_eq!(member.due_date, None);
        assert_eq!(serde_json::to_value(&member).unwrap()["dueDate"], "");
    }

    #[test]
    fn missing_optional_fields_take_defaults() {
        let member: Member = serde_json::from_str(r#"{"id":"x","name":"Kim"}"#).unwrap();
        assert_eq!(member.status, Status::NotStarted);
        assert_eq!(member.priority, Priority::Medium);
        assert_eq!(member.task, "");
        assert_eq!(member.due_date, None);
    }

    #[test]
    fn apply_changes_one_field_only() {
        let mut member = alex();
        member.apply(MemberUpdate::Status(Status::Blocked));

        let mut expected = alex();
        expected.status = Status::Blocked;
        assert_eq!(member, expected);
    }

    #[test]
    fn query_matches_name_or_task_case_insensitively() {
        let member = alex();
        assert!(member.matches_query(""));
        assert!(member.matches_query("alex"));
        assert!(member.matches_query("API"));
        assert!(!member.matches_query("design"));
    }

    #[test]
    fn whitespace_name_draft_is_invalid() {
        assert!(!MemberDraft::named("   ").is_valid());
        assert!(MemberDraft::named("Lee").is_valid());
    }
}
