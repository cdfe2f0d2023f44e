//! Async chart store.
//!
//! `ChartStore` is the entry point callers use: open it once, then save,
//! read, delete, or clear charts keyed by card. SQLite work runs on the
//! blocking pool so callers on the runtime are never stalled. Each call
//! completes exactly once, with a value or a [`ChartStoreError`].

use crate::domain::{CardId, ChartRecord, ChartStoreError};
use crate::infra::StoreConfig;
use crate::infra::db::{ChartRepository, Database};

type Result<T> = std::result::Result<T, ChartStoreError>;

/// Chart persistence over a single collection keyed by card id.
///
/// Clones share the same underlying connection.
#[derive(Debug, Clone)]
pub struct ChartStore {
    config: StoreConfig,
    db: Option<Database>,
}

impl ChartStore {
    /// Create an unopened store. Every data operation fails with
    /// [`ChartStoreError::NotOpen`] until [`open`](Self::open) succeeds.
    pub fn new(config: StoreConfig) -> Self {
        Self { config, db: None }
    }

    /// Create and open a store in one step.
    pub async fn open_with(config: StoreConfig) -> Result<Self> {
        let mut store = Self::new(config);
        store.open().await?;
        Ok(store)
    }

    /// Connect to the configured database, creating the chart collection
    /// on first run. Opening an already open store keeps the live handle.
    pub async fn open(&mut self) -> Result<&Database> {
        let db = match self.db.take() {
            Some(db) => db,
            None => {
                let config = self.config.clone();
                let db = run_blocking(move || Database::open(&config))
                    .await
                    .map_err(|err| {
                        log::warn!("Chart store failed to open: {err:#}");
                        ChartStoreError::StorageUnavailable(err)
                    })?;
                log::info!(
                    "Chart store opened ({})",
                    if self.config.in_memory {
                        "in memory".to_string()
                    } else {
                        self.config.database_path().display().to_string()
                    }
                );
                db
            }
        };
        let db: &Database = self.db.insert(db);
        Ok(db)
    }

    pub fn is_open(&self) -> bool {
        self.db.is_some()
    }

    /// The live database handle, if open.
    pub fn database(&self) -> Option<&Database> {
        self.db.as_ref()
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    /// Store `content` for `card_id`, replacing any earlier chart for that card.
    pub async fn save_chart(
        &self,
        card_id: impl Into<CardId>,
        content: impl Into<String>,
    ) -> Result<bool> {
        let repo = self.repo()?;
        let record = ChartRecord::new(card_id, content);
        let card_id = record.card_id.clone();
        log::debug!("Saving chart for card {card_id} ({} bytes)", record.content.len());

        run_blocking(move || repo.save(&record))
            .await
            .map_err(|source| {
                log::warn!("Saving chart for card {card_id} failed: {source:#}");
                ChartStoreError::WriteFailed { card_id, source }
            })?;
        Ok(true)
    }

    /// Stored chart for `card_id`, or `None` when the card has none.
    pub async fn get_chart(&self, card_id: impl Into<CardId>) -> Result<Option<String>> {
        let repo = self.repo()?;
        let card_id = card_id.into();

        let key = card_id.clone();
        run_blocking(move || repo.find_content(&key))
            .await
            .map_err(|source| {
                log::warn!("Reading chart for card {card_id} failed: {source:#}");
                ChartStoreError::ReadFailed { card_id, source }
            })
    }

    /// Remove the chart for `card_id`. Succeeds whether or not one existed.
    pub async fn delete_chart(&self, card_id: impl Into<CardId>) -> Result<bool> {
        let repo = self.repo()?;
        let card_id = card_id.into();

        let key = card_id.clone();
        let removed = run_blocking(move || repo.delete(&key))
            .await
            .map_err(|source| {
                log::warn!("Deleting chart for card {card_id} failed: {source:#}");
                ChartStoreError::DeleteFailed {
                    card_id: card_id.clone(),
                    source,
                }
            })?;
        log::debug!("Deleted {removed} chart(s) for card {card_id}");
        Ok(true)
    }

    /// Remove every stored chart.
    pub async fn clear_all(&self) -> Result<bool> {
        let repo = self.repo()?;

        let removed = run_blocking(move || repo.clear()).await.map_err(|source| {
            log::warn!("Clearing charts failed: {source:#}");
            ChartStoreError::ClearFailed(source)
        })?;
        log::debug!("Cleared {removed} chart(s)");
        Ok(true)
    }

    fn repo(&self) -> Result<ChartRepository> {
        self.db
            .as_ref()
            .map(Database::chart_repo)
            .ok_or(ChartStoreError::NotOpen)
    }
}

/// Run a synchronous database call on the blocking pool.
async fn run_blocking<T, F>(f: F) -> anyhow::Result<T>
where
    F: FnOnce() -> anyhow::Result<T> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(f).await?
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_operations_before_open_fail() {
        let store = ChartStore::new(StoreConfig::in_memory());
        assert!(!store.is_open());

        assert!(store.save_chart("a", "{}").await.unwrap_err().is_not_open());
        assert!(store.get_chart("a").await.unwrap_err().is_not_open());
        assert!(store.delete_chart("a").await.unwrap_err().is_not_open());
        assert!(store.clear_all().await.unwrap_err().is_not_open());
    }

    #[tokio::test]
    async fn test_open_is_idempotent() {
        let mut store = ChartStore::new(StoreConfig::in_memory());
        store.open().await.unwrap();
        store.save_chart("a", "one").await.unwrap();

        // A second open must not swap in a fresh in-memory database.
        store.open().await.unwrap();
        assert_eq!(store.get_chart("a").await.unwrap().as_deref(), Some("one"));
    }

    #[tokio::test]
    async fn test_open_failure_is_storage_unavailable() {
        let dir = tempfile::TempDir::new().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, b"file").unwrap();

        let mut store = ChartStore::new(StoreConfig::at_dir(blocker.join("nested")));
        let err = store.open().await.unwrap_err();
        assert!(matches!(err, ChartStoreError::StorageUnavailable(_)));
        assert!(!store.is_open());
    }

    #[tokio::test]
    async fn test_save_refreshes_stored_at() {
        let store = ChartStore::open_with(StoreConfig::in_memory()).await.unwrap();
        let repo = store.database().unwrap().chart_repo();

        store.save_chart(5, "v1").await.unwrap();
        let first = repo.find(&CardId::from(5)).unwrap().unwrap();

        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        store.save_chart(5, "v2").await.unwrap();
        let second = repo.find(&CardId::from(5)).unwrap().unwrap();

        assert_eq!(second.content, "v2");
        assert!(second.stored_at > first.stored_at);
    }
}
