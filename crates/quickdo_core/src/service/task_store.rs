//! Task store use-case service.
//!
//! # Responsibility
//! - Own the in-memory task collection and the current filter mode.
//! - Persist the whole collection after every successful mutation.
//! - Fire the changed signal that drives presentation re-renders.
//!
//! # Invariants
//! - The collection is ordered newest-first; mutations never reorder it.
//! - Blank submissions are ignored without persistence or notification.
//! - Unknown ids on toggle/remove are silent no-ops; a lagging view may
//!   hold ids the store already dropped.
//! - Listeners are only invoked after persistence succeeded.

use crate::model::filter::{filter_tasks, remaining_count, FilterMode};
use crate::model::task::{Task, TaskId};
use crate::repo::task_repo::{RepoResult, TaskRepository};
use chrono::NaiveDate;
use log::{debug, info};

/// Re-render hook registered by a presentation adapter.
pub type ChangeListener = Box<dyn Fn()>;

/// Use-case service owning the task collection.
///
/// The presentation layer never mutates the collection directly; it reads
/// projections (`visible`, `remaining_count`) and forwards user intents
/// through the mutation entry points.
pub struct TaskStore<R: TaskRepository> {
    repo: R,
    tasks: Vec<Task>,
    filter: FilterMode,
    revision: u64,
    listeners: Vec<ChangeListener>,
}

impl<R: TaskRepository> TaskStore<R> {
    /// Opens the store, replacing state wholesale from persistence.
    pub fn open(repo: R) -> RepoResult<Self> {
        let tasks = repo.load()?;
        info!(
            "event=store_open module=store status=ok count={}",
            tasks.len()
        );
        Ok(Self {
            repo,
            tasks,
            filter: FilterMode::All,
            revision: 0,
            listeners: Vec::new(),
        })
    }

    /// Adds a task from user input.
    ///
    /// # Contract
    /// - Leading/trailing whitespace is trimmed before any other check.
    /// - Blank input is silently ignored: no task, no write, no signal,
    ///   `Ok(None)`.
    /// - Otherwise the new task goes to the head of the collection and the
    ///   whole collection is persisted before listeners fire.
    pub fn add(&mut self, text: &str, due_date: Option<NaiveDate>) -> RepoResult<Option<TaskId>> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            debug!("event=task_add module=store status=ignored reason=blank_text");
            return Ok(None);
        }

        let task = Task::new(trimmed, due_date);
        let id = task.id;
        self.tasks.insert(0, task);
        self.repo.save(&self.tasks)?;
        info!("event=task_add module=store status=ok id={id}");
        self.notify();
        Ok(Some(id))
    }

    /// Flips the completion flag of the task with the given id.
    ///
    /// Returns whether a task actually changed; an unknown id is a benign
    /// no-op, not an error.
    pub fn toggle(&mut self, id: TaskId) -> RepoResult<bool> {
        let Some(task) = self.tasks.iter_mut().find(|task| task.id == id) else {
            debug!("event=task_toggle module=store status=noop id={id}");
            return Ok(false);
        };

        task.toggle();
        let completed = task.completed;
        self.repo.save(&self.tasks)?;
        info!("event=task_toggle module=store status=ok id={id} completed={completed}");
        self.notify();
        Ok(true)
    }

    /// Removes the task with the given id.
    ///
    /// Returns whether a task was removed; an unknown id is a benign no-op.
    pub fn remove(&mut self, id: TaskId) -> RepoResult<bool> {
        let before = self.tasks.len();
        self.tasks.retain(|task| task.id != id);
        if self.tasks.len() == before {
            debug!("event=task_remove module=store status=noop id={id}");
            return Ok(false);
        }

        self.repo.save(&self.tasks)?;
        info!("event=task_remove module=store status=ok id={id}");
        self.notify();
        Ok(true)
    }

    /// Switches the display filter. Session state only; never persisted.
    pub fn set_filter(&mut self, mode: FilterMode) {
        if self.filter == mode {
            return;
        }
        self.filter = mode;
        debug!(
            "event=filter_change module=store status=ok mode={}",
            mode.label()
        );
        self.notify();
    }

    /// Tasks visible under the current filter, collection order preserved.
    pub fn visible(&self) -> Vec<&Task> {
        filter_tasks(&self.tasks, self.filter)
    }

    /// Count of not-yet-completed tasks, recomputed on demand.
    pub fn remaining_count(&self) -> usize {
        remaining_count(&self.tasks)
    }

    /// Full collection, newest first.
    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    /// Currently active display filter.
    pub fn filter(&self) -> FilterMode {
        self.filter
    }

    /// Monotonic change counter; bumps on every observable change.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Registers a changed-signal listener (a re-render hook).
    pub fn subscribe(&mut self, listener: impl Fn() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&mut self) {
        self.revision += 1;
        for listener in &self.listeners {
            listener();
        }
    }
}
