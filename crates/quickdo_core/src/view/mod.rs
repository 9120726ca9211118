//! Read-side projections consumed by presentation adapters.
//!
//! # Responsibility
//! - Keep derived display attributes pure and stateless.
//! - Leave rendering technology entirely to the adapter.

pub mod present;
