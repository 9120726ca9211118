//! Derived presentation attributes.
//!
//! # Responsibility
//! - Compute overdue state and due-date display text for one task row.
//!
//! # Invariants
//! - A task with no due date is never overdue.
//! - Overdue means strictly before the start of `today`; due today is not
//!   overdue.
//! - These helpers are completion-agnostic; completed styling takes
//!   precedence over overdue styling in the adapter.

use chrono::{Datelike, NaiveDate};

/// Returns whether a due date lies strictly before the current day.
pub fn is_overdue(due_date: Option<NaiveDate>, today: NaiveDate) -> bool {
    match due_date {
        Some(due) => due < today,
        None => false,
    }
}

/// Renders a due date as `YYYY/MM/DD` with zero-padded month and day.
///
/// An absent due date renders as no text at all, not a placeholder.
pub fn format_due_date(due_date: Option<NaiveDate>) -> String {
    match due_date {
        Some(due) => format!("{:04}/{:02}/{:02}", due.year(), due.month(), due.day()),
        None => String::new(),
    }
}
