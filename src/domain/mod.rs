//! Domain types for the chart store.
//! Defines the stored record, its key, and the error taxonomy.

pub mod chart;
pub mod error;

pub use chart::*;
pub use error::*;
