//! In-memory task store.
//!
//! Tasks are never persisted. Each store starts empty (or from a seed list)
//! and lives as long as the services sharing it.

use crate::error::{TaskError, TaskResult};
use crate::models::{Task, TaskInput, TaskPatch};
use chrono::{DateTime, Utc};
use std::sync::{Mutex, MutexGuard, PoisonError};

/// Process-local task list shared behind an `Arc`.
#[derive(Debug, Default)]
pub struct TaskStore {
    tasks: Mutex<Vec<Task>>,
}

impl TaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with existing tasks. Later ids continue after the largest seeded id.
    pub fn with_tasks(tasks: Vec<Task>) -> Self {
        Self {
            tasks: Mutex::new(tasks),
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<Task>> {
        self.tasks.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// All tasks, earliest due date first. Ties keep insertion order.
    pub fn list(&self) -> Vec<Task> {
        let mut tasks = self.lock().clone();
        tasks.sort_by_key(|task| task.due_date);
        tasks
    }

    /// Tasks for one contact, earliest due date first.
    pub fn list_for_contact(&self, contact_id: i64) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .lock()
            .iter()
            .filter(|task| task.contact_id == contact_id)
            .cloned()
            .collect();
        tasks.sort_by_key(|task| task.due_date);
        tasks
    }

    /// Tasks due strictly before `now`, earliest due date first.
    pub fn overdue_at(&self, now: DateTime<Utc>) -> Vec<Task> {
        let mut tasks: Vec<Task> = self
            .lock()
            .iter()
            .filter(|task| task.is_overdue(now))
            .cloned()
            .collect();
        tasks.sort_by_key(|task| task.due_date);
        tasks
    }

    pub fn get(&self, id: i64) -> Option<Task> {
        self.lock().iter().find(|task| task.id == id).cloned()
    }

    /// Add a pending task at the front of the store.
    pub fn create(&self, input: TaskInput, now: DateTime<Utc>) -> Task {
        let mut tasks = self.lock();
        let id = tasks.iter().map(|task| task.id).max().unwrap_or(0).max(0) + 1;
        let task = input.into_task(id, now);
        tasks.insert(0, task.clone());
        tracing::debug!(id, contact_id = task.contact_id, "Task created");
        task
    }

    /// Merge `patch` into the task and stamp its update time.
    pub fn update(&self, id: i64, patch: TaskPatch, now: DateTime<Utc>) -> TaskResult<Task> {
        let mut tasks = self.lock();
        let task = tasks
            .iter_mut()
            .find(|task| task.id == id)
            .ok_or(TaskError::NotFound(id))?;
        patch.apply(task, now);
        Ok(task.clone())
    }

    pub fn delete(&self, id: i64) -> TaskResult<()> {
        self.remove(id).map(|_| ()).ok_or(TaskError::NotFound(id))
    }

    /// Take a task out of the store if it is still there.
    pub fn remove(&self, id: i64) -> Option<Task> {
        let mut tasks = self.lock();
        let index = tasks.iter().position(|task| task.id == id)?;
        Some(tasks.remove(index))
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(day: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, day, 12, 0, 0).unwrap()
    }

    fn input(contact_id: i64, title: &str, due: DateTime<Utc>) -> TaskInput {
        TaskInput {
            contact_id,
            task_type: "call".to_string(),
            title: title.to_string(),
            description: None,
            due_date: due,
            priority: None,
        }
    }

    #[test]
    fn test_ids_increase_from_largest() {
        let store = TaskStore::new();
        assert_eq!(store.create(input(1, "a", at(5)), at(1)).id, 1);
        assert_eq!(store.create(input(1, "b", at(5)), at(1)).id, 2);

        store.delete(2).unwrap();
        assert_eq!(store.create(input(1, "c", at(5)), at(1)).id, 2);
    }

    #[test]
    fn test_seeded_ids_continue_after_max() {
        let seeded = input(1, "seed", at(3)).into_task(7, at(1));
        let store = TaskStore::with_tasks(vec![seeded]);
        assert_eq!(store.create(input(1, "next", at(4)), at(1)).id, 8);
    }

    #[test]
    fn test_list_sorted_by_due_date_stable() {
        let store = TaskStore::new();
        store.create(input(1, "late", at(20)), at(1));
        store.create(input(2, "first-same", at(10)), at(1));
        store.create(input(1, "second-same", at(10)), at(1));

        let titles: Vec<String> = store.list().into_iter().map(|t| t.title).collect();
        // Creation prepends, so "second-same" sits ahead of "first-same" in the store.
        assert_eq!(titles, vec!["second-same", "first-same", "late"]);
    }

    #[test]
    fn test_list_for_contact() {
        let store = TaskStore::new();
        store.create(input(1, "one", at(9)), at(1));
        store.create(input(2, "two", at(8)), at(1));
        store.create(input(1, "three", at(7)), at(1));

        let titles: Vec<String> = store
            .list_for_contact(1)
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["three", "one"]);
        assert!(store.list_for_contact(99).is_empty());
    }

    #[test]
    fn test_overdue_at() {
        let store = TaskStore::new();
        store.create(input(1, "earlier", at(3)), at(1));
        store.create(input(1, "past", at(5)), at(1));
        store.create(input(1, "exact", at(10)), at(1));
        store.create(input(1, "future", at(15)), at(1));

        let titles: Vec<String> = store
            .overdue_at(at(10))
            .into_iter()
            .map(|t| t.title)
            .collect();
        assert_eq!(titles, vec!["earlier", "past"]);
    }

    #[test]
    fn test_update_and_missing() {
        let store = TaskStore::new();
        let task = store.create(input(1, "a", at(5)), at(1));

        let updated = store
            .update(
                task.id,
                TaskPatch {
                    status: Some("done".to_string()),
                    ..Default::default()
                },
                at(2),
            )
            .unwrap();
        assert_eq!(updated.status, "done");
        assert_eq!(updated.updated_date, Some(at(2)));
        assert_eq!(store.get(task.id), Some(updated));

        assert!(matches!(
            store.update(42, TaskPatch::default(), at(2)),
            Err(TaskError::NotFound(42))
        ));
    }

    #[test]
    fn test_delete_and_remove() {
        let store = TaskStore::new();
        let task = store.create(input(1, "a", at(5)), at(1));

        assert!(matches!(store.delete(99), Err(TaskError::NotFound(99))));
        assert_eq!(store.len(), 1);

        store.delete(task.id).unwrap();
        assert!(store.is_empty());
        assert!(store.remove(task.id).is_none());
    }
}
