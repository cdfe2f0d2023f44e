//! Infrastructure layer (adapters/implementations).
//!
//! This module contains the IO-heavy parts: SQLite and config files.

pub mod app_config;
pub mod db;

pub use app_config::{StoreConfig, load_config};
