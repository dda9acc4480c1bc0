//! Run-level error taxonomy.
//!
//! Per-row coercion failures and unreadable JSON history never reach this
//! type; they are absorbed and logged where they happen.

use gdp_core::store::HistoryError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("failed to fetch source page: {0}")]
  Fetch(#[source] reqwest::Error),

  #[error(transparent)]
  SourceFormat(#[from] gdp_extract::Error),

  #[error(transparent)]
  Core(#[from] gdp_core::Error),

  #[error("no snapshot has been stored yet")]
  EmptyHistory,

  #[error("history store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),

  #[error("configuration error: {0}")]
  Config(#[from] config::ConfigError),

  #[error("invalid setting: {0}")]
  InvalidSetting(String),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
}

impl Error {
  /// Lift a backend error, keeping "empty history" distinguishable.
  pub fn from_store<E: HistoryError>(e: E) -> Self {
    if e.is_empty_history() {
      Self::EmptyHistory
    } else {
      Self::Store(Box::new(e))
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
