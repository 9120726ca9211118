//! Task collection persistence contract and SQLite implementation.
//!
//! # Responsibility
//! - Read and write the entire task collection as a single serialized blob
//!   under one storage key.
//! - Keep SQL and serialization details inside the persistence boundary.
//!
//! # Invariants
//! - Every save overwrites the whole blob; there is no incremental update.
//! - `load` returns the empty collection for an absent key.
//! - `load` degrades a malformed blob to the empty collection with a
//!   warning instead of failing the caller.

use crate::db::DbError;
use crate::model::task::Task;
use log::{info, warn};
use rusqlite::{params, Connection, OptionalExtension};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Storage key holding the serialized task collection.
const TASKS_KEY: &str = "tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// Connection has no applied schema; migrations never ran.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Connection is migrated but a required table is absent.
    MissingRequiredTable(&'static str),
    /// Collection could not be serialized for storage.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} is not initialized to {expected_version}; run migrations first"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
            Self::InvalidData(message) => write!(f, "invalid task collection data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Whole-collection persistence contract.
///
/// `load` and `save` always move the full collection; callers own ordering
/// and never ask the repository for partial reads or writes.
pub trait TaskRepository {
    fn load(&self) -> RepoResult<Vec<Task>>;
    fn save(&self, tasks: &[Task]) -> RepoResult<()>;
}

/// SQLite-backed task repository over a single `kv` row.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    /// Wraps a connection after verifying it is usable for task storage.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations never ran.
    /// - `MissingRequiredTable` when the `kv` table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected_version = crate::db::migrations::latest_version();
        let actual_version: u32 =
            conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
        if actual_version == 0 {
            return Err(RepoError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }

        let kv_present: bool = conn.query_row(
            "SELECT EXISTS (
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'kv'
            );",
            [],
            |row| row.get(0),
        )?;
        if !kv_present {
            return Err(RepoError::MissingRequiredTable("kv"));
        }

        Ok(Self { conn })
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn load(&self) -> RepoResult<Vec<Task>> {
        let blob: Option<String> = self
            .conn
            .query_row(
                "SELECT value FROM kv WHERE key = ?1;",
                [TASKS_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let Some(blob) = blob else {
            info!("event=tasks_load module=repo status=empty");
            return Ok(Vec::new());
        };

        match serde_json::from_str::<Vec<Task>>(&blob) {
            Ok(tasks) => {
                info!(
                    "event=tasks_load module=repo status=ok count={}",
                    tasks.len()
                );
                Ok(tasks)
            }
            Err(err) => {
                // Corrupt blob policy: degrade to empty, never crash.
                warn!(
                    "event=tasks_load module=repo status=corrupt error={err} action=reset_to_empty"
                );
                Ok(Vec::new())
            }
        }
    }

    fn save(&self, tasks: &[Task]) -> RepoResult<()> {
        let blob = serde_json::to_string(tasks)
            .map_err(|err| RepoError::InvalidData(err.to_string()))?;

        self.conn.execute(
            "INSERT INTO kv (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![TASKS_KEY, blob],
        )?;

        info!(
            "event=tasks_save module=repo status=ok count={}",
            tasks.len()
        );
        Ok(())
    }
}
