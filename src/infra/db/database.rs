//! SQLite database setup and connection management for the chart store.
//! Handles database location, schema creation, and schema versioning.

use super::repository::{ChartRepository, DbConn};
use crate::infra::StoreConfig;
use anyhow::{Context, Result};
use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

/// Schema version this build writes and understands.
pub const SCHEMA_VERSION: i32 = 1;

/// Database wrapper that manages the SQLite connection
#[derive(Debug, Clone)]
pub struct Database {
    conn: DbConn,
}

impl Database {
    /// Open the database described by `config`
    pub fn open(config: &StoreConfig) -> Result<Self> {
        if config.in_memory {
            return Self::open_in_memory();
        }
        Self::open_at(&config.database_path())
    }

    /// Create an in-memory database (useful for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    /// Create or open the database at a specific path
    pub fn open_at(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let conn = Connection::open(path)
            .with_context(|| format!("Failed to open database at {}", path.display()))?;
        log::debug!("Opened chart database at {}", path.display());
        Self::from_connection(conn)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        let db = Self {
            conn: Arc::new(Mutex::new(conn)),
        };
        db.init()?;
        Ok(db)
    }

    /// Bring the schema up to [`SCHEMA_VERSION`].
    fn init(&self) -> Result<()> {
        let conn = self.conn.lock();

        let existing_version = Self::read_version(&conn)?;

        if existing_version == 0 {
            // Fresh database: create the current schema directly
            Self::create_schema(&conn)?;
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        } else if existing_version < SCHEMA_VERSION {
            for version in (existing_version + 1)..=SCHEMA_VERSION {
                log::info!("Migrating chart database to schema version {version}");
                Self::run_migration(&conn, version)?;
            }
            conn.pragma_update(None, "user_version", SCHEMA_VERSION)?;
        } else if existing_version > SCHEMA_VERSION {
            anyhow::bail!(
                "Database schema version {existing_version} is newer than supported version {SCHEMA_VERSION}"
            );
        }

        Ok(())
    }

    fn read_version(conn: &Connection) -> Result<i32> {
        let version = conn.pragma_query_value(None, "user_version", |row| row.get(0))?;
        Ok(version)
    }

    /// Schema version currently stamped on the database.
    pub fn schema_version(&self) -> Result<i32> {
        let conn = self.conn.lock();
        Self::read_version(&conn)
    }

    /// Get a reference to the connection
    pub fn connection(&self) -> DbConn {
        self.conn.clone()
    }

    pub fn chart_repo(&self) -> ChartRepository {
        ChartRepository::new(self.connection())
    }

    fn create_schema(conn: &Connection) -> Result<()> {
        // card_id is declared without a type so integer and text keys stay distinct.
        conn.execute_batch(
            r#"
            CREATE TABLE IF NOT EXISTS chart_data (
                card_id NOT NULL PRIMARY KEY,
                content TEXT NOT NULL,
                stored_at INTEGER NOT NULL
            ) WITHOUT ROWID;
            "#,
        )?;
        Ok(())
    }

    /// Execute the migration step that produces `version`.
    fn run_migration(conn: &Connection, version: i32) -> Result<()> {
        let result = match version {
            1 => Self::create_schema(conn),
            _ => Err(anyhow::anyhow!(
                "Unknown migration version: {}. Add the step to run_migration() in database.rs",
                version
            )),
        };
        result.with_context(|| format!("Failed to execute migration {version}"))
    }
}
