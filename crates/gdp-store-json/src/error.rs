//! Error type for `gdp-store-json`.

use std::path::PathBuf;

use gdp_core::store::HistoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] gdp_core::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("json error: {0}")]
  Json(#[from] serde_json::Error),

  /// The history file exists but could not be read back.
  #[error("history file {path:?} is unreadable: {source}")]
  Corrupt {
    path:   PathBuf,
    #[source]
    source: Box<dyn std::error::Error + Send + Sync>,
  },

  #[error("history is empty")]
  EmptyHistory,
}

impl HistoryError for Error {
  fn is_empty_history(&self) -> bool { matches!(self, Self::EmptyHistory) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
