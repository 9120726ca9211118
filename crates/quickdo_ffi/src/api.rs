//! FFI use-case API for UI-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level functions to the UI shell via FRB.
//! - Keep error semantics simple for the rendering layer.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call runs to completion (mutation, persistence) before
//!   returning; the UI re-renders from the returned state.

use chrono::{Local, NaiveDate};
use quickdo_core::db::open_db;
use quickdo_core::{
    core_version as core_version_inner, format_due_date, init_logging as init_logging_inner,
    is_overdue, FilterMode, SqliteTaskRepository, Task, TaskId, TaskStore,
};
use std::path::PathBuf;
use std::sync::OnceLock;
use uuid::Uuid;

const DB_FILE_NAME: &str = "quickdo.sqlite3";
static DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err.to_string(),
    }
}

/// One visible task row, pre-projected for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListItem {
    /// Stable task ID in string form.
    pub task_id: String,
    /// Display text.
    pub text: String,
    /// Completion flag. Completed styling dominates overdue styling.
    pub completed: bool,
    /// Due date rendered as `YYYY/MM/DD`, or empty when absent.
    pub due_date: String,
    /// Whether the due date lies strictly before today.
    pub overdue: bool,
}

/// List response envelope for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskListResponse {
    /// Visible rows under the applied filter, newest first.
    pub items: Vec<TaskListItem>,
    /// Count of not-yet-completed tasks across the whole collection.
    pub remaining: u32,
    /// Effective applied filter label (`all|active|completed`).
    pub applied_filter: String,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for task mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskActionResponse {
    /// Whether the operation succeeded (benign no-ops count as success).
    pub ok: bool,
    /// Affected task ID, when one exists.
    pub task_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl TaskActionResponse {
    fn success(message: impl Into<String>, task_id: Option<String>) -> Self {
        Self {
            ok: true,
            task_id,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            task_id: None,
            message: message.into(),
        }
    }
}

/// Adds a task from submitted input.
///
/// Input semantics:
/// - `text`: trimmed before any other check; blank input is a benign
///   no-op, reported with `ok=true` and no task ID.
/// - `due_date`: optional `YYYY-MM-DD` string.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_add(text: String, due_date: Option<String>) -> TaskActionResponse {
    let due = match parse_due_date(due_date.as_deref()) {
        Ok(due) => due,
        Err(message) => return TaskActionResponse::failure(message),
    };

    match with_task_store(|store| store.add(&text, due).map_err(|err| err.to_string())) {
        Ok(Some(id)) => TaskActionResponse::success("Task added.", Some(id.to_string())),
        Ok(None) => TaskActionResponse::success("Blank text ignored.", None),
        Err(message) => TaskActionResponse::failure(format!("task_add failed: {message}")),
    }
}

/// Toggles completion of one task.
///
/// Unknown or stale ids are benign no-ops; the view may lag the store.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_toggle(task_id: String) -> TaskActionResponse {
    let Some(id) = parse_task_id(&task_id) else {
        return TaskActionResponse::success("No matching task.", None);
    };

    match with_task_store(|store| store.toggle(id).map_err(|err| err.to_string())) {
        Ok(true) => TaskActionResponse::success("Task toggled.", Some(task_id)),
        Ok(false) => TaskActionResponse::success("No matching task.", None),
        Err(message) => TaskActionResponse::failure(format!("task_toggle failed: {message}")),
    }
}

/// Removes one task.
///
/// Unknown or stale ids are benign no-ops.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn task_remove(task_id: String) -> TaskActionResponse {
    let Some(id) = parse_task_id(&task_id) else {
        return TaskActionResponse::success("No matching task.", None);
    };

    match with_task_store(|store| store.remove(id).map_err(|err| err.to_string())) {
        Ok(true) => TaskActionResponse::success("Task removed.", Some(task_id)),
        Ok(false) => TaskActionResponse::success("No matching task.", None),
        Err(message) => TaskActionResponse::failure(format!("task_remove failed: {message}")),
    }
}

/// Returns the visible rows for one render pass.
///
/// Input semantics:
/// - `filter`: optional label; unrecognized or absent labels apply `all`.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics; returns an empty list with a diagnostic message on
///   storage failure.
#[flutter_rust_bridge::frb(sync)]
pub fn task_list(filter: Option<String>) -> TaskListResponse {
    let mode = FilterMode::parse(filter.as_deref().unwrap_or("all"));
    let today = Local::now().date_naive();

    let listed = with_task_store(|store| {
        store.set_filter(mode);
        let items = store
            .visible()
            .into_iter()
            .map(|task| to_list_item(task, today))
            .collect::<Vec<_>>();
        Ok((items, store.remaining_count()))
    });

    match listed {
        Ok((items, remaining)) => {
            let message = if items.is_empty() {
                "No tasks.".to_string()
            } else {
                format!("Showing {} task(s).", items.len())
            };
            TaskListResponse {
                items,
                remaining: remaining as u32,
                applied_filter: mode.label().to_string(),
                message,
            }
        }
        Err(message) => TaskListResponse {
            items: Vec::new(),
            remaining: 0,
            applied_filter: mode.label().to_string(),
            message: format!("task_list failed: {message}"),
        },
    }
}

fn to_list_item(task: &Task, today: NaiveDate) -> TaskListItem {
    TaskListItem {
        task_id: task.id.to_string(),
        text: task.text.clone(),
        completed: task.completed,
        due_date: format_due_date(task.due_date),
        overdue: is_overdue(task.due_date, today),
    }
}

fn parse_due_date(raw: Option<&str>) -> Result<Option<NaiveDate>, String> {
    let Some(raw) = raw else {
        return Ok(None);
    };
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .map(Some)
        .map_err(|_| format!("invalid due date `{trimmed}`; expected YYYY-MM-DD"))
}

fn parse_task_id(raw: &str) -> Option<TaskId> {
    Uuid::parse_str(raw.trim()).ok()
}

fn resolve_db_path() -> PathBuf {
    DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("QUICKDO_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(DB_FILE_NAME)
        })
        .clone()
}

fn with_task_store<T>(
    f: impl FnOnce(&mut TaskStore<SqliteTaskRepository<'_>>) -> Result<T, String>,
) -> Result<T, String> {
    let db_path = resolve_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("task DB open failed: {err}"))?;
    let repo = SqliteTaskRepository::try_new(&conn)
        .map_err(|err| format!("task repo init failed: {err}"))?;
    let mut store = TaskStore::open(repo).map_err(|err| format!("task store open failed: {err}"))?;
    f(&mut store)
}

#[cfg(test)]
mod tests {
    use super::{core_version, init_logging, task_add, task_list, task_remove, task_toggle};
    use std::time::{SystemTime, UNIX_EPOCH};

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn task_add_ignores_blank_text() {
        let response = task_add("   ".to_string(), None);
        assert!(response.ok, "{}", response.message);
        assert!(response.task_id.is_none());
    }

    #[test]
    fn task_add_rejects_malformed_due_date() {
        let response = task_add("has bad date".to_string(), Some("03/07/2024".to_string()));
        assert!(!response.ok);
        assert!(response.message.contains("YYYY-MM-DD"));
    }

    #[test]
    fn added_task_appears_in_list_and_toggle_moves_it_between_filters() {
        let token = unique_token("ffi-roundtrip");
        let created = task_add(token.clone(), Some("2030-01-02".to_string()));
        assert!(created.ok, "{}", created.message);
        let created_id = created.task_id.expect("created task should return task_id");

        let active = task_list(Some("active".to_string()));
        let row = active
            .items
            .iter()
            .find(|item| item.task_id == created_id)
            .expect("new task should be visible under active filter");
        assert_eq!(row.text, token);
        assert_eq!(row.due_date, "2030/01/02");
        assert!(!row.overdue);

        let toggled = task_toggle(created_id.clone());
        assert!(toggled.ok, "{}", toggled.message);

        let completed = task_list(Some("completed".to_string()));
        assert!(completed
            .items
            .iter()
            .any(|item| item.task_id == created_id));

        let removed = task_remove(created_id.clone());
        assert!(removed.ok, "{}", removed.message);
        let all = task_list(None);
        assert!(all.items.iter().all(|item| item.task_id != created_id));
    }

    #[test]
    fn toggle_of_unknown_id_is_benign() {
        let response = task_toggle("not-a-task-id".to_string());
        assert!(response.ok);
        assert!(response.task_id.is_none());
    }

    #[test]
    fn added_task_lands_in_the_stored_blob() {
        let token = unique_token("ffi-blob");
        let created = task_add(token.clone(), None);
        assert!(created.ok, "{}", created.message);
        let created_id = created.task_id.expect("created task should return task_id");

        let conn = quickdo_core::db::open_db(super::resolve_db_path()).expect("open db");
        let blob: String = conn
            .query_row("SELECT value FROM kv WHERE key = 'tasks';", [], |row| {
                row.get(0)
            })
            .expect("query tasks blob");
        assert!(blob.contains(&created_id));
        assert!(blob.contains(&token));
    }

    fn unique_token(prefix: &str) -> String {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_nanos();
        format!("{prefix}-{nanos}")
    }
}
