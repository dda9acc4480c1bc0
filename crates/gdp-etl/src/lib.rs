//! Snapshot ETL for per-country GDP.
//!
//! Fetches the source page, extracts and normalizes the GDP table, appends the
//! run to a history store (JSON document or SQLite) and reports on the latest
//! snapshot. The `gdp-etl` binary is a thin wrapper over [`execute`].

pub mod error;
pub mod fetch;
pub mod log;
pub mod pipeline;
pub mod report;
pub mod settings;

pub use settings::{Backend, Settings};
pub use error::{Error, Result};
pub use pipeline::{RunSummary, Source, execute, run};
pub use report::Report;
