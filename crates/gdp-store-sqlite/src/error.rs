//! Error type for `gdp-store-sqlite`.

use gdp_core::store::HistoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] gdp_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  /// A row insert failed; the whole snapshot was rolled back.
  #[error("snapshot append rolled back: {0}")]
  Persistence(#[source] tokio_rusqlite::Error),

  #[error("invalid table name {0:?}")]
  InvalidTableName(String),

  #[error("history is empty")]
  EmptyHistory,
}

impl HistoryError for Error {
  fn is_empty_history(&self) -> bool { matches!(self, Self::EmptyHistory) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
