//! Local persistence for serialized charts, keyed by card.
//!
//! ```no_run
//! use chart_store::{ChartStore, StoreConfig};
//!
//! # async fn demo() -> Result<(), chart_store::ChartStoreError> {
//! let store = ChartStore::open_with(StoreConfig::default()).await?;
//! store.save_chart("card42", r#"{"notes":[1,2,3]}"#).await?;
//! assert_eq!(
//!     store.get_chart("card42").await?.as_deref(),
//!     Some(r#"{"notes":[1,2,3]}"#)
//! );
//! # Ok(())
//! # }
//! ```

pub mod application;
pub mod domain;
pub mod infra;

pub use application::ChartStore;
pub use domain::{CardId, ChartRecord, ChartStoreError};
pub use infra::{StoreConfig, load_config};
