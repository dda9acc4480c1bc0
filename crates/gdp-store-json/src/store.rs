//! The JSON document implementation of [`HistoryStore`].

use std::{
  io::ErrorKind,
  path::{Path, PathBuf},
};

use gdp_core::{
  snapshot::{HistoryRow, Snapshot},
  store::{HistoryStore, latest_of},
};
use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  encode::{Record, to_pretty_json},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A snapshot history kept as a single JSON array on disk.
///
/// Appends are read-modify-rewrite and assume a single writer. The rewrite
/// goes through a sibling temp file and a rename, so an interrupted run
/// leaves the previous file intact.
#[derive(Debug, Clone)]
pub struct JsonStore {
  path: PathBuf,
}

impl JsonStore {
  /// A store backed by `path`. Nothing touches the filesystem until the first
  /// read or append.
  pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }

  pub fn path(&self) -> &Path { &self.path }

  /// Read the full history. `Ok(None)` means the file does not exist yet or
  /// holds nothing but whitespace.
  async fn read_history(&self) -> Result<Option<Vec<HistoryRow>>> {
    let bytes = match tokio::fs::read(&self.path).await {
      Ok(bytes) => bytes,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(self.corrupt(e)),
    };
    if bytes.trim_ascii().is_empty() {
      return Ok(None);
    }

    let records: Vec<Record> =
      serde_json::from_slice(&bytes).map_err(|e| self.corrupt(e))?;
    let history = records
      .into_iter()
      .map(Record::into_history)
      .collect::<Result<Vec<_>>>()
      .map_err(|e| self.corrupt(e))?;
    Ok(Some(history))
  }

  async fn write_history(&self, history: &[HistoryRow]) -> Result<()> {
    let records: Vec<Record> = history.iter().map(Record::from_history).collect();
    let bytes = to_pretty_json(&records)?;

    if let Some(parent) = self.path.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }

    let tmp = self.temp_path();
    tokio::fs::write(&tmp, bytes).await?;
    if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
      if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
        warn!(path = %tmp.display(), "failed to remove temp file: {cleanup}");
      }
      return Err(e.into());
    }
    Ok(())
  }

  fn temp_path(&self) -> PathBuf {
    let mut name = self.path.file_name().unwrap_or_default().to_os_string();
    name.push(".tmp");
    self.path.with_file_name(name)
  }

  fn corrupt(&self, source: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Error {
    Error::Corrupt { path: self.path.clone(), source: source.into() }
  }
}

// ─── HistoryStore impl ───────────────────────────────────────────────────────

impl HistoryStore for JsonStore {
  type Error = Error;

  async fn append(&self, snapshot: &Snapshot) -> Result<()> {
    let mut history = match self.read_history().await {
      Ok(Some(existing)) => {
        info!("Load: New records appended to existing data in {}", self.path.display());
        existing
      }
      Ok(None) => Vec::new(),
      Err(e) => {
        warn!("Load Warning: Failed to load history, starting new file. {e}");
        Vec::new()
      }
    };

    history.extend(snapshot.history_rows());
    self.write_history(&history).await?;

    debug!(path = %self.path.display(), total = history.len(), "history rewritten");
    Ok(())
  }

  async fn latest_snapshot(&self) -> Result<Snapshot> {
    let history = self.read_history().await?.unwrap_or_default();
    latest_of(history).ok_or(Error::EmptyHistory)
  }

  async fn all_history(&self) -> Result<Vec<HistoryRow>> {
    Ok(self.read_history().await?.unwrap_or_default())
  }
}
