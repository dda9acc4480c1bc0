//! The `HistoryStore` trait and the shared "latest snapshot" fold.
//!
//! The trait is implemented by storage backends (`gdp-store-json`,
//! `gdp-store-sqlite`). The orchestrator and analyzer depend on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::snapshot::{HistoryRow, Snapshot};

// ─── Traits ──────────────────────────────────────────────────────────────────

/// Backend errors say whether they mean "nothing was ever appended", so
/// callers can tell an empty history from a broken one without knowing the
/// backend.
pub trait HistoryError: std::error::Error + Send + Sync + 'static {
  fn is_empty_history(&self) -> bool;
}

/// Abstraction over an append-only snapshot history.
///
/// No operation ever mutates or removes a persisted row; the only growth path
/// is appending every row of a new snapshot.
pub trait HistoryStore: Send + Sync {
  type Error: HistoryError;

  /// Durably add every row of `snapshot`, creating the store on first use.
  fn append<'a>(
    &'a self,
    snapshot: &'a Snapshot,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// All rows carrying the maximal `processed_at`, in stored order.
  ///
  /// Fails with the backend's empty-history error if nothing was ever
  /// appended.
  fn latest_snapshot(
    &self,
  ) -> impl Future<Output = Result<Snapshot, Self::Error>> + Send + '_;

  /// Every persisted row, in stored order.
  fn all_history(
    &self,
  ) -> impl Future<Output = Result<Vec<HistoryRow>, Self::Error>> + Send + '_;
}

// ─── Latest-snapshot fold ────────────────────────────────────────────────────

/// Select the rows of the latest snapshot from flattened history.
///
/// Returns `None` for an empty history. Rows keep their relative order.
pub fn latest_of(history: Vec<HistoryRow>) -> Option<Snapshot> {
  let latest = history.iter().map(|h| h.processed_at).max()?;
  let rows = history
    .into_iter()
    .filter(|h| h.processed_at == latest)
    .map(|h| h.row)
    .collect();
  Some(Snapshot::at(latest, rows))
}
