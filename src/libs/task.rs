//! Task model, filters and the client-side ordering rules.
//!
//! A [`Task`] mirrors one row of the remote `tasks` table. The filter and
//! predicate types describe which rows a query selects; the store executes
//! them, and [`sort_by_priority`] applies the only ordering done locally.

use crate::libs::messages::Message;
use crate::msg_bail_anyhow;
use anyhow::Result;
use chrono::{DateTime, NaiveDate, Utc};
use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Date format accepted for due dates and sent to the store.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub const ALL: [Priority; 3] = [Priority::Low, Priority::Medium, Priority::High];

    /// Sort rank: High first, Low last.
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Medium => 2,
            Priority::Low => 3,
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::Low => "Low",
            Priority::Medium => "Medium",
            Priority::High => "High",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for Priority {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(Priority::Low),
            "medium" => Ok(Priority::Medium),
            "high" => Ok(Priority::High),
            _ => msg_bail_anyhow!(Message::InvalidPriority(s.to_string())),
        }
    }
}

/// One row of the remote `tasks` table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub user_id: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub due_date: Option<NaiveDate>,
    // Rows written by other clients may carry a null priority
    #[serde(default, deserialize_with = "priority_or_default")]
    pub priority: Priority,
    #[serde(default)]
    pub is_complete: bool,
    #[serde(default)]
    pub is_archived: bool,
    pub created_at: DateTime<Utc>,
}

fn priority_or_default<'de, D>(deserializer: D) -> std::result::Result<Priority, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Priority>::deserialize(deserializer)?.unwrap_or_default())
}

impl Task {
    /// Client-perceived completion state.
    pub fn status(&self) -> Message {
        if self.is_complete {
            Message::TaskStatusComplete
        } else {
            Message::TaskStatusActive
        }
    }
}

/// Insert payload. The store assigns `id`, `created_at` and the boolean defaults.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewTask {
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    // Serialized as an explicit null when absent
    pub due_date: Option<NaiveDate>,
    pub priority: Priority,
}

/// Partial update. Fields left as `None` are not sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TaskPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    // Outer option: field present in the patch; inner option: the value may be null
    #[serde(skip_serializing_if = "Option::is_none")]
    pub due_date: Option<Option<NaiveDate>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_complete: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_archived: Option<bool>,
}

impl TaskPatch {
    pub fn complete(is_complete: bool) -> Self {
        Self {
            is_complete: Some(is_complete),
            ..Default::default()
        }
    }

    pub fn archive(is_archived: bool) -> Self {
        Self {
            is_archived: Some(is_archived),
            ..Default::default()
        }
    }

    /// Overwrites all four descriptive fields.
    pub fn fields(title: &str, description: &str, due_date: Option<NaiveDate>, priority: Priority) -> Self {
        Self {
            title: Some(title.to_string()),
            description: Some(description.to_string()),
            due_date: Some(due_date),
            priority: Some(priority),
            ..Default::default()
        }
    }
}

/// Conjunction of equality comparisons understood by the store.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPredicate {
    pub id: Option<i64>,
    pub user_id: Option<Uuid>,
    pub is_complete: Option<bool>,
    pub is_archived: Option<bool>,
}

impl TaskPredicate {
    pub fn for_user(user_id: Uuid) -> Self {
        Self {
            user_id: Some(user_id),
            ..Default::default()
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }

    pub fn is_complete(mut self, value: bool) -> Self {
        self.is_complete = Some(value);
        self
    }

    pub fn is_archived(mut self, value: bool) -> Self {
        self.is_archived = Some(value);
        self
    }

    pub fn matches(&self, task: &Task) -> bool {
        self.id.map_or(true, |id| task.id == id)
            && self.user_id.map_or(true, |user_id| task.user_id == user_id)
            && self.is_complete.map_or(true, |v| task.is_complete == v)
            && self.is_archived.map_or(true, |v| task.is_archived == v)
    }

    /// Column/value pairs in a fixed order, values rendered the way the store expects.
    pub fn equalities(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        if let Some(id) = self.id {
            pairs.push(("id", id.to_string()));
        }
        if let Some(user_id) = self.user_id {
            pairs.push(("user_id", user_id.to_string()));
        }
        if let Some(v) = self.is_complete {
            pairs.push(("is_complete", v.to_string()));
        }
        if let Some(v) = self.is_archived {
            pairs.push(("is_archived", v.to_string()));
        }
        pairs
    }
}

/// Server-side ordering for a select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TaskOrder {
    CreatedAtDesc,
}

impl TaskOrder {
    pub fn as_query(&self) -> &'static str {
        match self {
            TaskOrder::CreatedAtDesc => "created_at.desc",
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum TaskFilter {
    #[default]
    All,
    Active,
    Completed,
    Archived,
}

impl TaskFilter {
    pub const ALL: [TaskFilter; 4] = [TaskFilter::All, TaskFilter::Active, TaskFilter::Completed, TaskFilter::Archived];

    pub fn predicate(&self, user_id: Uuid) -> TaskPredicate {
        let predicate = TaskPredicate::for_user(user_id);
        match self {
            TaskFilter::All => predicate.is_archived(false),
            TaskFilter::Active => predicate.is_complete(false).is_archived(false),
            TaskFilter::Completed => predicate.is_complete(true).is_archived(false),
            TaskFilter::Archived => predicate.is_archived(true),
        }
    }

    /// Whether results under this filter are re-ordered by priority.
    pub fn sorts_by_priority(&self) -> bool {
        matches!(self, TaskFilter::All | TaskFilter::Active)
    }
}

impl fmt::Display for TaskFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TaskFilter::All => "all",
            TaskFilter::Active => "active",
            TaskFilter::Completed => "completed",
            TaskFilter::Archived => "archived",
        };
        write!(f, "{}", name)
    }
}

/// Stable priority ordering. Ties keep the order the store returned.
pub fn sort_by_priority(tasks: &mut [Task]) {
    tasks.sort_by_key(|task| task.priority.rank());
}

/// Parses a due date from form input. Blank input means no due date.
pub fn parse_due_date(input: &str) -> Result<Option<NaiveDate>> {
    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    match NaiveDate::parse_from_str(input, DUE_DATE_FORMAT) {
        Ok(date) => Ok(Some(date)),
        Err(_) => msg_bail_anyhow!(Message::InvalidDueDate(input.to_string())),
    }
}

/// Form values for creating or editing a task, held as the user typed them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskDraft {
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: Priority,
}

impl TaskDraft {
    pub fn new(title: &str, description: &str, due_date: &str, priority: Priority) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            due_date: due_date.to_string(),
            priority,
        }
    }

    /// Seeds an edit form from an existing task.
    pub fn from_task(task: &Task) -> Self {
        Self {
            title: task.title.clone(),
            description: task.description.clone().unwrap_or_default(),
            due_date: task.due_date.map(|d| d.format(DUE_DATE_FORMAT).to_string()).unwrap_or_default(),
            priority: task.priority,
        }
    }

    pub fn due_date(&self) -> Result<Option<NaiveDate>> {
        parse_due_date(&self.due_date)
    }

    fn ensure_title(&self) -> Result<()> {
        if self.title.trim().is_empty() {
            msg_bail_anyhow!(Message::TaskTitleRequired);
        }
        Ok(())
    }

    pub fn to_new_task(&self, user_id: Uuid) -> Result<NewTask> {
        self.ensure_title()?;
        Ok(NewTask {
            user_id,
            title: self.title.clone(),
            description: self.description.clone(),
            due_date: self.due_date()?,
            priority: self.priority,
        })
    }

    pub fn to_patch(&self) -> Result<TaskPatch> {
        self.ensure_title()?;
        Ok(TaskPatch::fields(&self.title, &self.description, self.due_date()?, self.priority))
    }
}
