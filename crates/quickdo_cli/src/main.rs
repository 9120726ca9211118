//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `quickdo_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use quickdo_core::db::open_db_in_memory;
use quickdo_core::{FilterMode, SqliteTaskRepository, TaskStore};
use std::error::Error;

fn main() -> Result<(), Box<dyn Error>> {
    println!("quickdo_core version={}", quickdo_core::core_version());

    // In-memory round trip proving store + storage wiring without touching
    // any on-disk state.
    let conn = open_db_in_memory()?;
    let repo = SqliteTaskRepository::try_new(&conn)?;
    let mut store = TaskStore::open(repo)?;

    let _ = store.add("write smoke test", None)?;
    let second = store
        .add("check it off", None)?
        .ok_or("add returned no id for non-blank text")?;
    store.toggle(second)?;
    store.set_filter(FilterMode::Active);

    println!("quickdo_core tasks={}", store.tasks().len());
    println!("quickdo_core visible={}", store.visible().len());
    println!("quickdo_core remaining={}", store.remaining_count());
    Ok(())
}
