//! Filter mode and list projection.
//!
//! # Responsibility
//! - Define the three display filters over the task collection.
//! - Provide the pure projection used by every render pass.
//!
//! # Invariants
//! - Projections never reorder tasks; relative order is preserved.
//! - `Active` and `Completed` partition the collection between them.

use crate::model::task::Task;
use serde::{Deserialize, Serialize};

/// Display filter selecting a subsequence of the collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterMode {
    /// Full collection, unchanged.
    #[default]
    All,
    /// Tasks with `completed == false`.
    Active,
    /// Tasks with `completed == true`.
    Completed,
}

impl FilterMode {
    /// Parses a filter label from a UI boundary.
    ///
    /// Unrecognized labels fall back to `All`, matching the behavior users
    /// already rely on when a stale or mistyped label reaches the core.
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "active" => Self::Active,
            "completed" => Self::Completed,
            _ => Self::All,
        }
    }

    /// Stable label for logs and UI round trips.
    pub fn label(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

/// Projects the collection through a filter mode.
///
/// Pure function: no mutation, no reordering, borrowed results only.
pub fn filter_tasks(tasks: &[Task], mode: FilterMode) -> Vec<&Task> {
    tasks
        .iter()
        .filter(|task| match mode {
            FilterMode::All => true,
            FilterMode::Active => !task.completed,
            FilterMode::Completed => task.completed,
        })
        .collect()
}

/// Counts tasks not yet completed.
///
/// Recomputed on demand; callers must not cache this across mutations.
pub fn remaining_count(tasks: &[Task]) -> usize {
    tasks.iter().filter(|task| task.is_active()).count()
}
