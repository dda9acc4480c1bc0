//! Snapshots: one ETL run's rows under a single processing timestamp.
//!
//! "Latest" is defined by timestamp equality, so every row of a run must carry
//! a byte-identical `processed_at`. A [`Snapshot`] stamps the time once at
//! construction and hands the same value to every row it persists.

use chrono::{Local, NaiveDateTime, SubsecRound as _};
use serde::{Deserialize, Serialize};

use crate::{Error, Result, row::ClassifiedRow};

/// Wire format for `processed_at` in both storage backends.
pub const PROCESSED_TIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

pub fn encode_processed_at(at: NaiveDateTime) -> String {
  at.format(PROCESSED_TIME_FORMAT).to_string()
}

pub fn decode_processed_at(s: &str) -> Result<NaiveDateTime> {
  NaiveDateTime::parse_from_str(s, PROCESSED_TIME_FORMAT)
    .map_err(|_| Error::ProcessedTime(s.to_owned()))
}

// ─── Snapshot ────────────────────────────────────────────────────────────────

/// An immutable batch of classified rows sharing one `processed_at`.
///
/// Not `Deserialize`; construct through [`Snapshot::build`] or
/// [`Snapshot::at`], which truncate to whole seconds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
  processed_at: NaiveDateTime,
  rows:         Vec<ClassifiedRow>,
}

impl Snapshot {
  /// Stamp `rows` with the current local time, truncated to whole seconds.
  pub fn build(rows: Vec<ClassifiedRow>) -> Self {
    Self::at(Local::now().naive_local(), rows)
  }

  /// Stamp `rows` with an explicit instant, truncated to whole seconds.
  pub fn at(processed_at: NaiveDateTime, rows: Vec<ClassifiedRow>) -> Self {
    Self { processed_at: processed_at.trunc_subsecs(0), rows }
  }

  pub fn processed_at(&self) -> NaiveDateTime { self.processed_at }

  pub fn rows(&self) -> &[ClassifiedRow] { &self.rows }

  pub fn len(&self) -> usize { self.rows.len() }

  pub fn is_empty(&self) -> bool { self.rows.is_empty() }

  /// Flatten into one persisted row per entity.
  pub fn history_rows(&self) -> impl Iterator<Item = HistoryRow> + '_ {
    self.rows.iter().map(|row| HistoryRow {
      row:          row.clone(),
      processed_at: self.processed_at,
    })
  }
}

// ─── HistoryRow ──────────────────────────────────────────────────────────────

/// One persisted (entity, snapshot) pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryRow {
  #[serde(flatten)]
  pub row:          ClassifiedRow,
  pub processed_at: NaiveDateTime,
}

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;

  fn instant() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 1, 7)
      .unwrap()
      .and_hms_milli_opt(9, 30, 15, 742)
      .unwrap()
  }

  #[test]
  fn at_truncates_to_whole_seconds() {
    let snap = Snapshot::at(instant(), vec![]);
    assert_eq!(encode_processed_at(snap.processed_at()), "2025-01-07 09:30:15");
    assert_eq!(snap.processed_at().and_utc().timestamp_subsec_nanos(), 0);
  }

  #[test]
  fn serialized_snapshot_carries_the_truncated_time() {
    let snap = Snapshot::at(instant(), vec![ClassifiedRow::new("A", "Asia", 1.0)]);
    let value = serde_json::to_value(&snap).unwrap();
    assert_eq!(value["processed_at"], "2025-01-07T09:30:15");
  }

  #[test]
  fn every_history_row_shares_the_snapshot_time() {
    let snap = Snapshot::at(instant(), vec![
      ClassifiedRow::new("A", "Asia", 1.0),
      ClassifiedRow::new("B", "Europe", 2.0),
    ]);
    let rows: Vec<_> = snap.history_rows().collect();
    assert_eq!(rows.len(), 2);
    assert!(rows.iter().all(|r| r.processed_at == snap.processed_at()));
  }

  #[test]
  fn processed_at_roundtrips_through_wire_format() {
    let at = instant().trunc_subsecs(0);
    assert_eq!(decode_processed_at(&encode_processed_at(at)).unwrap(), at);
    assert!(decode_processed_at("2025-January-07").is_err());
  }
}
