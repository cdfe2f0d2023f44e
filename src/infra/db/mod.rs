//! SQLite persistence (infrastructure).

pub mod database;
pub mod repository;

pub use database::{Database, SCHEMA_VERSION};
pub use repository::{ChartRepository, DbConn};
