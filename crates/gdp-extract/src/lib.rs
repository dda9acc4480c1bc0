//! HTML table extractor for the GDP pipeline.
//!
//! Turns a rendered page into [`RawRow`]s. Pure synchronous; fetching the
//! page is someone else's job.
//!
//! # Quick start
//!
//! ```no_run
//! use gdp_extract::{DEFAULT_TABLE_MARKER, extract};
//!
//! let html = std::fs::read_to_string("gdp.html").unwrap();
//! let rows = extract(&html, DEFAULT_TABLE_MARKER).unwrap();
//! println!("{} raw rows", rows.len());
//! ```

pub mod error;
mod table;

pub use error::{Error, Result};
use gdp_core::row::RawRow;

/// Caption text identifying the per-country GDP table.
pub const DEFAULT_TABLE_MARKER: &str =
  "GDP forecast or estimate (million US$) by country";

/// Extract raw (entity, value) pairs from the first data table whose text
/// contains `marker`, in table order.
///
/// Header rows (any `th`, or the `static-row-header` class) and rows with
/// fewer than three data cells are skipped. Value text is returned verbatim.
pub fn extract(markup: &str, marker: &str) -> Result<Vec<RawRow>> {
  table::extract_rows(markup, marker)
}
