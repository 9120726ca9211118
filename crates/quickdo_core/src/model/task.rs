//! Task domain model.
//!
//! # Responsibility
//! - Define the single canonical record of this system.
//! - Own the stored wire shape of a task record.
//!
//! # Invariants
//! - `id` is stable and never reused for another task.
//! - `text` is trimmed and non-empty for every constructed task.
//! - `created_at` is captured once at construction and never changes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Stable identifier for a task.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type TaskId = Uuid;

/// A single to-do entry.
///
/// Serialized field names follow the stored blob format: records written by
/// older builds without `dueDate` must continue to deserialize, so the field
/// carries a serde default.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    /// Stable global ID, generated at creation.
    pub id: TaskId,
    /// Trimmed display text. Never empty.
    pub text: String,
    /// Completion flag, toggled only by explicit user action.
    pub completed: bool,
    /// Optional due date, day granularity. Stored as `YYYY-MM-DD`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// Creation timestamp, record-keeping only. Never sorted on.
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new task with a generated id and the current timestamp.
    ///
    /// # Contract
    /// - `text` must already be trimmed and non-empty; callers guard this.
    /// - `completed` starts as `false`.
    ///
    /// The generated UUIDv7 combines a millisecond clock with random bits,
    /// so tasks created within the same millisecond still get distinct ids.
    pub fn new(text: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        Self::with_id(Uuid::now_v7(), text, due_date)
    }

    /// Creates a task with a caller-provided stable ID.
    ///
    /// Used by load/import paths where identity already exists externally.
    pub fn with_id(id: TaskId, text: impl Into<String>, due_date: Option<NaiveDate>) -> Self {
        Self {
            id,
            text: text.into(),
            completed: false,
            due_date,
            created_at: Utc::now(),
        }
    }

    /// Flips the completion flag in place.
    pub fn toggle(&mut self) {
        self.completed = !self.completed;
    }

    /// Returns whether this task still counts toward the remaining total.
    pub fn is_active(&self) -> bool {
        !self.completed
    }
}
