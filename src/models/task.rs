//! Task model: a to-do item held in process memory only.

use super::activity::Activity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Status of every task that is still open.
pub const TASK_STATUS_PENDING: &str = "pending";

/// Description given to follow-up tasks when no next steps were recorded.
pub const DEFAULT_FOLLOW_UP_DESCRIPTION: &str = "Follow-up task";

/// A task waiting to be done for a contact.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Locally assigned id, unique for the lifetime of the store
    #[serde(rename = "Id")]
    pub id: i64,

    pub contact_id: i64,

    /// Kind of work (call, email, meeting, ...)
    #[serde(rename = "type")]
    pub task_type: String,

    pub title: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    pub due_date: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<String>,

    pub status: String,

    pub created_date: DateTime<Utc>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Check if the task was due strictly before `now`.
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.due_date < now
    }
}

/// Fields for a new task.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskInput {
    pub contact_id: i64,

    #[serde(rename = "type")]
    pub task_type: String,

    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    pub due_date: DateTime<Utc>,

    #[serde(default)]
    pub priority: Option<String>,
}

impl TaskInput {
    /// Materialise the input as a pending task.
    pub fn into_task(self, id: i64, now: DateTime<Utc>) -> Task {
        Task {
            id,
            contact_id: self.contact_id,
            task_type: self.task_type,
            title: self.title,
            description: self.description,
            due_date: self.due_date,
            priority: self.priority,
            status: TASK_STATUS_PENDING.to_string(),
            created_date: now,
            updated_date: None,
        }
    }
}

/// Partial update merged into an existing task. `None` keeps the current value.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct TaskPatch {
    pub contact_id: Option<i64>,

    #[serde(rename = "type")]
    pub task_type: Option<String>,

    pub title: Option<String>,
    pub description: Option<String>,
    pub due_date: Option<DateTime<Utc>>,
    pub priority: Option<String>,
    pub status: Option<String>,
}

impl TaskPatch {
    pub fn apply(self, task: &mut Task, now: DateTime<Utc>) {
        if let Some(contact_id) = self.contact_id {
            task.contact_id = contact_id;
        }
        if let Some(task_type) = self.task_type {
            task.task_type = task_type;
        }
        if let Some(title) = self.title {
            task.title = title;
        }
        if let Some(description) = self.description {
            task.description = Some(description);
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(priority) = self.priority {
            task.priority = Some(priority);
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        task.updated_date = Some(now);
    }
}

/// What the user recorded when completing a task.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct CompletionData {
    pub outcome: Option<String>,
    pub next_steps: Option<String>,
    pub follow_up_date: Option<DateTime<Utc>>,
    pub follow_up_type: Option<String>,
}

impl CompletionData {
    /// Due date and type of the follow-up, present only when both were given.
    pub fn follow_up(&self) -> Option<(DateTime<Utc>, &str)> {
        let follow_up_type = self.follow_up_type.as_deref().filter(|t| !t.is_empty())?;
        self.follow_up_date.map(|due| (due, follow_up_type))
    }
}

/// Result of completing a task.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TaskCompletion {
    /// The activity logged for the completed task, as returned by the store
    pub activity: Option<Activity>,

    /// The completed task no longer exists, so this is always `None`
    pub task: Option<Task>,

    /// The follow-up task created alongside, if one was requested
    pub follow_up: Option<Task>,
}
