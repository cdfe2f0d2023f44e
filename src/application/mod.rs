//! Application layer (use-cases).
//!
//! Exposes the async chart store on top of the SQLite infrastructure.

pub mod chart_store;

pub use chart_store::ChartStore;
