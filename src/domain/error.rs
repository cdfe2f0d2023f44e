//! Error types for chart store operations.
//!
//! Every failure is reported to the caller; the store never retries. An
//! absent chart is not an error (`get_chart` returns `None`).

use super::CardId;
use thiserror::Error;

/// Errors returned by [`ChartStore`](crate::application::ChartStore).
#[derive(Debug, Error)]
pub enum ChartStoreError {
    /// An operation was attempted before `open()` succeeded.
    #[error("Chart store is not open; call open() first")]
    NotOpen,

    /// The underlying database could not be opened.
    #[error("Chart storage unavailable: {0}")]
    StorageUnavailable(#[source] anyhow::Error),

    #[error("Failed to save chart for card {card_id}: {source}")]
    WriteFailed {
        card_id: CardId,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to read chart for card {card_id}: {source}")]
    ReadFailed {
        card_id: CardId,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to delete chart for card {card_id}: {source}")]
    DeleteFailed {
        card_id: CardId,
        #[source]
        source: anyhow::Error,
    },

    #[error("Failed to clear charts: {0}")]
    ClearFailed(#[source] anyhow::Error),
}

impl ChartStoreError {
    /// True when the error was raised before the engine was touched.
    pub fn is_not_open(&self) -> bool {
        matches!(self, ChartStoreError::NotOpen)
    }
}
