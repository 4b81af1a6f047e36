//! In-memory task store.
//!
//! The store owns every task and the id counter. Ids start at 1, grow by one
//! per created task and are never reused, even after deletion. All mutation
//! goes through the methods here.
//!
//! `add_task` is all-or-nothing: a draft that fails validation consumes no id.
//! `update_task` is not: fields are applied in order and an invalid field
//! leaves the ones before it applied.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use tracing::{debug, info};

use crate::config::Config;
use crate::error::{Error, Result};
use crate::query::{self, SortKey, TaskFilter};
use crate::recurrence::{self, Recurrence};
use crate::reminder::{self, Reminders};
use crate::task::{Priority, Task, TaskDraft, TaskPatch};
use crate::validate::{validate_task_id, TaskRef};

#[derive(Debug)]
pub struct TaskStore {
    tasks: BTreeMap<u64, Task>,
    next_id: u64,
    config: Config,
}

impl Default for TaskStore {
    fn default() -> Self {
        Self::new()
    }
}

impl TaskStore {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            tasks: BTreeMap::new(),
            next_id: 1,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    // -------------------------------------------------------------------------
    // CRUD
    // -------------------------------------------------------------------------

    /// Create a task and return its id.
    pub fn add_task(&mut self, draft: TaskDraft) -> Result<u64> {
        let task = Task::from_draft(self.next_id, draft, self.config.tasks.default_priority)?;
        Ok(self.insert(task))
    }

    pub fn get_task_by_id(&self, task_id: impl Into<TaskRef>) -> Result<&Task> {
        let id = validate_task_id(task_id)?;
        self.tasks.get(&id).ok_or(Error::NotFound(id))
    }

    /// Apply a patch. Unspecified fields are left alone; see the module docs
    /// for what happens when a field is invalid.
    pub fn update_task(&mut self, task_id: impl Into<TaskRef>, patch: TaskPatch) -> Result<()> {
        let task = self.task_mut(task_id)?;
        let id = task.id();
        patch.apply_to(task)?;
        debug!(task_id = id, "task updated");
        Ok(())
    }

    pub fn delete_task(&mut self, task_id: impl Into<TaskRef>) -> Result<()> {
        let id = validate_task_id(task_id)?;
        self.tasks.remove(&id).ok_or(Error::NotFound(id))?;
        debug!(task_id = id, "task deleted");
        Ok(())
    }

    /// Set the completed flag. Recurring tasks do not spawn a successor here;
    /// use [`handle_completion`](Self::handle_completion) for that.
    pub fn mark_complete(&mut self, task_id: impl Into<TaskRef>) -> Result<()> {
        self.set_completed(task_id, true)
    }

    pub fn mark_incomplete(&mut self, task_id: impl Into<TaskRef>) -> Result<()> {
        self.set_completed(task_id, false)
    }

    /// Complete a task and, if it recurs, create its successor.
    ///
    /// Returns the successor's id. The successor is computed before anything
    /// is written, so a due field that cannot be advanced leaves the store
    /// unchanged.
    pub fn handle_completion(&mut self, task_id: impl Into<TaskRef>) -> Result<Option<u64>> {
        let id = validate_task_id(task_id)?;
        let task = self.tasks.get(&id).ok_or(Error::NotFound(id))?;
        let successor = recurrence::successor(task)?
            .map(|draft| Task::from_draft(self.next_id, draft, self.config.tasks.default_priority))
            .transpose()?;

        if let Some(task) = self.tasks.get_mut(&id) {
            task.set_completed(true);
        }
        debug!(task_id = id, "task completed");

        Ok(successor.map(|next| {
            let next_id = self.insert(next);
            info!(task_id = id, successor_id = next_id, "recurring task rescheduled");
            next_id
        }))
    }

    // -------------------------------------------------------------------------
    // Single-field setters
    // -------------------------------------------------------------------------

    pub fn set_priority(&mut self, task_id: impl Into<TaskRef>, priority: Priority) -> Result<()> {
        let task = self.task_mut(task_id)?;
        task.set_priority(priority);
        debug!(task_id = task.id(), %priority, "priority set");
        Ok(())
    }

    /// Replace the tag list; an empty list clears it.
    pub fn set_tags<I, S>(&mut self, task_id: impl Into<TaskRef>, tags: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let tags: Vec<String> = tags.into_iter().map(Into::into).collect();
        let task = self.task_mut(task_id)?;
        task.set_tags(tags)?;
        debug!(task_id = task.id(), "tags set");
        Ok(())
    }

    /// Append a tag unless it is already present.
    pub fn add_tag(&mut self, task_id: impl Into<TaskRef>, tag: impl Into<String>) -> Result<()> {
        let task = self.task_mut(task_id)?;
        if task.add_tag(tag.into())? {
            debug!(task_id = task.id(), "tag added");
        }
        Ok(())
    }

    /// Remove a tag; absent tags are ignored.
    pub fn remove_tag(&mut self, task_id: impl Into<TaskRef>, tag: &str) -> Result<()> {
        let task = self.task_mut(task_id)?;
        if task.remove_tag(tag) {
            debug!(task_id = task.id(), tag, "tag removed");
        }
        Ok(())
    }

    /// Set or clear (`None`) the recurrence pattern.
    pub fn set_recurrence(
        &mut self,
        task_id: impl Into<TaskRef>,
        recurrence: Option<Recurrence>,
    ) -> Result<()> {
        let task = self.task_mut(task_id)?;
        task.set_recurrence(recurrence);
        debug!(task_id = task.id(), ?recurrence, "recurrence set");
        Ok(())
    }

    /// Set or clear (`None`) the date-only deadline.
    pub fn set_due_date(
        &mut self,
        task_id: impl Into<TaskRef>,
        due_date: Option<String>,
    ) -> Result<()> {
        let task = self.task_mut(task_id)?;
        task.set_due_date(due_date)?;
        debug!(task_id = task.id(), due_date = task.due_date(), "due date set");
        Ok(())
    }

    /// Set or clear (`None`) the date+time deadline.
    pub fn set_due_datetime(
        &mut self,
        task_id: impl Into<TaskRef>,
        due_datetime: Option<String>,
    ) -> Result<()> {
        let task = self.task_mut(task_id)?;
        task.set_due_datetime(due_datetime)?;
        debug!(task_id = task.id(), due_datetime = task.due_datetime(), "due datetime set");
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Read-only views
    // -------------------------------------------------------------------------

    /// Snapshot of every task in insertion order
    pub fn get_all_tasks(&self) -> Vec<Task> {
        self.tasks.values().cloned().collect()
    }

    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    pub fn get_task_count(&self) -> usize {
        self.tasks.len()
    }

    /// Id the next created task will receive
    pub fn get_next_id(&self) -> u64 {
        self.next_id
    }

    pub fn search_tasks(&self, keyword: &str) -> Vec<Task> {
        query::search(self.tasks.values(), keyword)
    }

    pub fn filter_tasks(&self, criteria: &TaskFilter) -> Vec<Task> {
        query::filter(self.tasks.values(), criteria)
    }

    pub fn sort_tasks(&self, by: SortKey) -> Vec<Task> {
        query::sort(self.tasks.values(), by)
    }

    /// Overdue and upcoming tasks as of the current local time
    pub fn check_reminders(&self) -> Reminders {
        self.check_reminders_at(reminder::now_local())
    }

    pub fn check_reminders_at(&self, now: NaiveDateTime) -> Reminders {
        reminder::classify(self.tasks.values(), now, self.config.reminders.window_hours)
    }

    // -------------------------------------------------------------------------
    // Internals
    // -------------------------------------------------------------------------

    fn insert(&mut self, task: Task) -> u64 {
        let id = task.id();
        self.tasks.insert(id, task);
        self.next_id = id + 1;
        debug!(task_id = id, "task added");
        id
    }

    fn task_mut(&mut self, task_id: impl Into<TaskRef>) -> Result<&mut Task> {
        let id = validate_task_id(task_id)?;
        self.tasks.get_mut(&id).ok_or(Error::NotFound(id))
    }

    fn set_completed(&mut self, task_id: impl Into<TaskRef>, completed: bool) -> Result<()> {
        let task = self.task_mut(task_id)?;
        task.set_completed(completed);
        debug!(task_id = task.id(), completed, "completion flag set");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failed_add_consumes_no_id() {
        let mut store = TaskStore::new();
        assert!(store.add_task(TaskDraft::new("   ")).is_err());
        assert!(store
            .add_task(TaskDraft::new("ok").due_datetime("2025-01-01"))
            .is_err());
        assert_eq!(store.get_next_id(), 1);
        assert_eq!(store.get_task_count(), 0);
        assert_eq!(store.add_task(TaskDraft::new("first")).unwrap(), 1);
    }

    #[test]
    fn config_default_priority_applies_to_new_tasks() {
        let mut config = Config::default();
        config.tasks.default_priority = Priority::Low;
        let mut store = TaskStore::with_config(config);
        let implicit = store.add_task(TaskDraft::new("implicit")).unwrap();
        let explicit = store
            .add_task(TaskDraft::new("explicit").priority(Priority::High))
            .unwrap();
        assert_eq!(store.get_task_by_id(implicit).unwrap().priority(), Priority::Low);
        assert_eq!(store.get_task_by_id(explicit).unwrap().priority(), Priority::High);
    }

    #[test]
    fn failed_completion_leaves_task_untouched() {
        let mut store = TaskStore::new();
        let id = store
            .add_task(
                TaskDraft::new("bad date")
                    .due_date("2025-02-30")
                    .recurrence(Recurrence::Daily),
            )
            .unwrap();
        assert!(matches!(store.handle_completion(id), Err(Error::InvalidInput(_))));
        assert!(!store.get_task_by_id(id).unwrap().completed());
        assert_eq!(store.get_task_count(), 1);
        assert_eq!(store.get_next_id(), 2);
    }

    #[test]
    fn reminder_window_comes_from_config() {
        let mut config = Config::default();
        config.reminders.window_hours = 2;
        let mut store = TaskStore::with_config(config);
        store
            .add_task(TaskDraft::new("soon").due_datetime("2025-05-10 13:00"))
            .unwrap();
        store
            .add_task(TaskDraft::new("later").due_datetime("2025-05-10 18:00"))
            .unwrap();
        let now = reminder::parse_datetime("2025-05-10 12:00").unwrap();
        let reminders = store.check_reminders_at(now);
        assert_eq!(reminders.upcoming.len(), 1);
        assert_eq!(reminders.upcoming[0].title(), "soon");
        assert!(reminders.overdue.is_empty());
    }
}
