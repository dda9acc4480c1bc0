//! Error types for the table extractor.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// No candidate table contains the marker text; the page layout has likely
  /// changed upstream.
  #[error("target table not found (marker {marker:?})")]
  TableNotFound { marker: String },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
