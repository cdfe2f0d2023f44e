//! Repository implementations for data access.
//!
//! Provides the database operations over the chart collection.

mod chart;

pub use chart::ChartRepository;

use parking_lot::Mutex;
use rusqlite::Connection;
use std::sync::Arc;

/// Shared handle to the single SQLite connection.
pub type DbConn = Arc<Mutex<Connection>>;

#[cfg(test)]
mod tests;
