//! catalog-scout: fuzzy product search over strict marketplace catalogs.
//!
//! The search engine itself lives in the `scout-search` crate. This crate
//! adds the application layer around it:
//! - **Configuration**: TOML file with search tuning and vocabulary overrides
//! - **Output**: JSON-lines rendering of ranked records and score reports
//! - **CLI**: the `catalog-scout` binary searching a JSON catalog file

pub mod config;
pub mod error;
pub mod output;

pub use config::ScoutConfig;
pub use error::{Result, ScoutError};
