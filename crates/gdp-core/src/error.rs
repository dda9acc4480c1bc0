//! Error types for `gdp-core`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// A single row's value text is not a usable magnitude. Callers absorb this
  /// per row; it never aborts a batch.
  #[error("not a numeric magnitude: {raw:?}")]
  RowCoercion { raw: String },

  #[error("region table {path:?} is unreadable: {source}")]
  RegionTable {
    path:   PathBuf,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("invalid processed time {0:?}")]
  ProcessedTime(String),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("serialization error: {0}")]
  Serialization(#[from] serde_json::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
