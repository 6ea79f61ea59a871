//! Activity service layer.
//!
//! Activities live in the record store. Tasks live in a [`TaskStore`] shared
//! with the service. Completing a task ties the two together: it logs an
//! activity, optionally schedules a follow-up task, then drops the task.

use super::policy;
use super::task_store::TaskStore;
use crate::client::{AsyncRecordGateway, FetchQuery, SortType};
use crate::error::{GatewayResult, TaskError, TaskResult};
use crate::models::activity::{
    ACTIVITY_ENTITY, ACTIVITY_FIELDS, ACTIVITY_SEARCH_FIELDS, ACTIVITY_TEXT_FIELDS,
    ACTIVITY_TIMELINE_FIELDS,
};
use crate::models::fields;
use crate::models::task::DEFAULT_FOLLOW_UP_DESCRIPTION;
use crate::models::{
    Activity, ActivityInput, ActivityPayload, CompletionData, Task, TaskCompletion, TaskInput,
    TaskPatch,
};
use crate::repositories::EntityRepository;
use async_trait::async_trait;
use chrono::Utc;
use std::sync::Arc;

/// Number of activities returned by [`ActivityService::get_recent_default`]
/// unless configured otherwise.
pub const DEFAULT_RECENT_LIMIT: usize = 10;

/// Activity and task service trait.
#[async_trait]
pub trait ActivityService: Send + Sync {
    async fn get_all(&self) -> Vec<Activity>;

    /// Activities for one contact, newest first.
    async fn get_by_contact_id(&self, contact_id: i64) -> Vec<Activity>;

    /// The `limit` most recent activities.
    async fn get_recent(&self, limit: usize) -> Vec<Activity>;

    /// Recent activities using the configured limit.
    async fn get_recent_default(&self) -> Vec<Activity>;

    async fn search(&self, query: &str) -> Vec<Activity>;

    /// Log an activity dated now.
    async fn create(&self, input: &ActivityInput) -> GatewayResult<Option<Activity>>;

    /// Every task, earliest due first.
    async fn get_tasks(&self) -> Vec<Task>;

    async fn get_tasks_by_contact_id(&self, contact_id: i64) -> Vec<Task>;

    /// Tasks whose due date has passed.
    async fn get_overdue_tasks(&self) -> Vec<Task>;

    async fn create_task(&self, input: TaskInput) -> Task;

    async fn update_task(&self, id: i64, patch: TaskPatch) -> TaskResult<Task>;

    async fn delete_task(&self, id: i64) -> TaskResult<()>;

    /// Complete a task: log it as an activity, schedule the follow-up when
    /// both a date and a type are given, then remove the task.
    ///
    /// If the activity cannot be logged the task is left untouched.
    async fn complete_task(&self, id: i64, completion: CompletionData) -> TaskResult<TaskCompletion>;
}

/// Default implementation of ActivityService.
pub struct ActivityServiceImpl {
    repo: EntityRepository,
    tasks: Arc<TaskStore>,
    recent_limit: usize,
}

impl ActivityServiceImpl {
    pub fn new(client: Arc<dyn AsyncRecordGateway>, tasks: Arc<TaskStore>) -> Self {
        Self {
            repo: EntityRepository::new(client, ACTIVITY_ENTITY),
            tasks,
            recent_limit: DEFAULT_RECENT_LIMIT,
        }
    }

    /// Override the default recent-activity limit (see `Config::recent_activity_limit`).
    pub fn with_recent_limit(mut self, limit: usize) -> Self {
        self.recent_limit = limit;
        self
    }

    /// The task store this service reads and writes.
    pub fn tasks(&self) -> &Arc<TaskStore> {
        &self.tasks
    }

    async fn write_activity(&self, payload: &ActivityPayload) -> GatewayResult<Option<Activity>> {
        policy::logged(ACTIVITY_ENTITY, "create", self.repo.create_one(payload).await)
    }

    fn follow_up_for(task: &Task, completion: &CompletionData) -> Option<TaskInput> {
        let (due_date, follow_up_type) = completion.follow_up()?;
        let description = fields::non_empty(&completion.next_steps)
            .unwrap_or_else(|| DEFAULT_FOLLOW_UP_DESCRIPTION.to_string());

        Some(TaskInput {
            contact_id: task.contact_id,
            task_type: follow_up_type.to_string(),
            title: format!("Follow-up: {}", task.title),
            description: Some(description),
            due_date,
            priority: task.priority.clone(),
        })
    }
}

#[async_trait]
impl ActivityService for ActivityServiceImpl {
    async fn get_all(&self) -> Vec<Activity> {
        let query = FetchQuery::with_fields(ACTIVITY_FIELDS);
        policy::list_or_empty(ACTIVITY_ENTITY, "get_all", self.repo.fetch(&query).await)
    }

    async fn get_by_contact_id(&self, contact_id: i64) -> Vec<Activity> {
        let query = FetchQuery::with_fields(ACTIVITY_TIMELINE_FIELDS)
            .where_equals("contact_id_c", contact_id)
            .order_by("date_c", SortType::Desc);
        policy::list_or_empty(
            ACTIVITY_ENTITY,
            "get_by_contact_id",
            self.repo.fetch(&query).await,
        )
    }

    async fn get_recent(&self, limit: usize) -> Vec<Activity> {
        let query = FetchQuery::with_fields(ACTIVITY_TIMELINE_FIELDS)
            .order_by("date_c", SortType::Desc)
            .page(limit, 0);
        policy::list_or_empty(ACTIVITY_ENTITY, "get_recent", self.repo.fetch(&query).await)
    }

    async fn get_recent_default(&self) -> Vec<Activity> {
        self.get_recent(self.recent_limit).await
    }

    async fn search(&self, query: &str) -> Vec<Activity> {
        if policy::is_blank(query) {
            return self.get_all().await;
        }

        let fetch = FetchQuery::with_fields(ACTIVITY_SEARCH_FIELDS)
            .contains_any(ACTIVITY_TEXT_FIELDS, query);
        policy::list_or_empty(ACTIVITY_ENTITY, "search", self.repo.fetch(&fetch).await)
    }

    async fn create(&self, input: &ActivityInput) -> GatewayResult<Option<Activity>> {
        self.write_activity(&ActivityPayload::for_create(input, Utc::now()))
            .await
    }

    async fn get_tasks(&self) -> Vec<Task> {
        self.tasks.list()
    }

    async fn get_tasks_by_contact_id(&self, contact_id: i64) -> Vec<Task> {
        self.tasks.list_for_contact(contact_id)
    }

    async fn get_overdue_tasks(&self) -> Vec<Task> {
        self.tasks.overdue_at(Utc::now())
    }

    async fn create_task(&self, input: TaskInput) -> Task {
        self.tasks.create(input, Utc::now())
    }

    async fn update_task(&self, id: i64, patch: TaskPatch) -> TaskResult<Task> {
        self.tasks.update(id, patch, Utc::now())
    }

    async fn delete_task(&self, id: i64) -> TaskResult<()> {
        self.tasks.delete(id)
    }

    async fn complete_task(&self, id: i64, completion: CompletionData) -> TaskResult<TaskCompletion> {
        let task = self.tasks.get(id).ok_or(TaskError::NotFound(id))?;

        let payload = ActivityPayload::for_task(&task, &completion, Utc::now());
        let activity = self.write_activity(&payload).await?;

        let follow_up = Self::follow_up_for(&task, &completion)
            .map(|follow_up| self.tasks.create(follow_up, Utc::now()));

        // Another caller may have removed the task while the activity was written.
        if self.tasks.remove(id).is_none() {
            tracing::warn!(id, "Completed task was already removed");
        }

        tracing::info!(
            id,
            contact_id = task.contact_id,
            follow_up = follow_up.as_ref().map(|t| t.id),
            "Task completed"
        );

        Ok(TaskCompletion {
            activity,
            task: None,
            follow_up,
        })
    }
}
