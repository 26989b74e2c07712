//! Core data structures for the Todoist client
//!
//! Records returned by the REST API are typed here and validated at the
//! client boundary. Optional fields stay `Option` all the way to the
//! formatter.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// An API bearer token.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(***)")
    }
}

/// A project the client works against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectRef {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub project_id: Option<String>,
}

/// Due information attached to a fetched task.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Due {
    /// `YYYY-MM-DD`, or a full datetime for tasks with a time of day
    pub date: String,
    #[serde(default)]
    pub string: Option<String>,
    #[serde(default)]
    pub is_recurring: bool,
    /// `datetime`, `timezone`, `lang` and whatever else the service adds
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// A task as returned by the service.
///
/// Fields the client does not interpret are kept in `extra` so an export
/// is a faithful copy of what the service sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: String,
    pub content: String,
    pub project_id: String,
    #[serde(default)]
    pub section_id: Option<String>,
    #[serde(default)]
    pub due: Option<Due>,
    #[serde(default)]
    pub is_completed: bool,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Task {
    /// Compact `YYMMDD` label for the due date, if the task has a readable one.
    pub fn due_label(&self) -> Option<String> {
        self.due.as_ref().and_then(|due| short_date_label(&due.date))
    }
}

/// Reformat the leading `YYYY-MM-DD` of an ISO date or datetime as `YYMMDD`.
pub fn short_date_label(iso: &str) -> Option<String> {
    let day = iso.get(..10)?;
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .ok()
        .map(|d| d.format("%y%m%d").to_string())
}

/// A due date in the `YYYY-MM-DD` form the service accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct DueDate(String);

impl DueDate {
    /// Build from the six digits of an inline `[YYMMDD]` tag.
    ///
    /// The century is always 20; the digits are not checked against the
    /// calendar, the service rejects impossible dates itself.
    pub fn from_tag_digits(digits: &str) -> Option<Self> {
        if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        Some(Self(format!(
            "20{}-{}-{}",
            &digits[..2],
            &digits[2..4],
            &digits[4..]
        )))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DueDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Body of a task creation request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub content: String,
    pub project_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<DueDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_string: Option<String>,
    pub due_lang: &'static str,
}

impl NewTask {
    pub fn new(content: impl Into<String>, project_id: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            project_id: project_id.into(),
            section_id: None,
            due_date: None,
            due_string: None,
            due_lang: "en",
        }
    }

    pub fn in_section(mut self, section_id: Option<String>) -> Self {
        self.section_id = section_id;
        self
    }

    /// Set an exact due date. Clears any natural-language due string.
    pub fn due_on(mut self, due_date: Option<DueDate>) -> Self {
        if due_date.is_some() {
            self.due_string = None;
        }
        self.due_date = due_date;
        self
    }

    /// Set a natural-language due such as "today". Ignored when an exact
    /// date is already set.
    pub fn due_by(mut self, due_string: Option<String>) -> Self {
        if self.due_date.is_none() {
            self.due_string = due_string.filter(|s| !s.trim().is_empty());
        }
        self
    }
}
