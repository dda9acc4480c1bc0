//! Integration tests for `SqliteStore` against an in-memory database.

use chrono::{NaiveDate, NaiveDateTime};
use gdp_core::{row::ClassifiedRow, snapshot::Snapshot, store::HistoryStore};

use crate::{Error, SqliteStore};

const TABLE: &str = "Countries_by_GDP";

async fn store() -> SqliteStore {
  SqliteStore::open_in_memory(TABLE)
    .await
    .expect("in-memory store")
}

fn at(hour: u32) -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2025, 2, 14)
    .unwrap()
    .and_hms_opt(hour, 15, 0)
    .unwrap()
}

fn snapshot(hour: u32, rows: &[(&str, &str, f64)]) -> Snapshot {
  Snapshot::at(
    at(hour),
    rows.iter().map(|&(n, g, v)| ClassifiedRow::new(n, g, v)).collect(),
  )
}

// ─── Open ────────────────────────────────────────────────────────────────────

#[tokio::test]
async fn rejects_unsafe_table_names() {
  let err = SqliteStore::open_in_memory("gdp; DROP TABLE x").await.err().unwrap();
  assert!(matches!(err, Error::InvalidTableName(_)));
}

#[tokio::test]
async fn reopening_a_file_keeps_history() {
  let dir = tempfile::tempdir().unwrap();
  let path = dir.path().join("World_Economies.db");

  {
    let s = SqliteStore::open(&path, TABLE).await.unwrap();
    s.append(&snapshot(8, &[("Japan", "Asia", 4_389.33)])).await.unwrap();
  }
  let s = SqliteStore::open(&path, TABLE).await.unwrap();
  assert_eq!(s.all_history().await.unwrap().len(), 1);
}

// ─── Latest snapshot ─────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_store_has_no_latest() {
  let s = store().await;
  let err = s.latest_snapshot().await.unwrap_err();
  assert!(matches!(err, Error::EmptyHistory));
  assert!(s.all_history().await.unwrap().is_empty());
}

#[tokio::test]
async fn append_then_latest_returns_the_same_rows() {
  let s = store().await;
  let snap = snapshot(9, &[
    ("United States", "North America", 29_184.89),
    ("Japan", "Asia", 4_389.33),
    ("Tuvalu", "Unknown", 0.06),
  ]);
  s.append(&snap).await.unwrap();

  let latest = s.latest_snapshot().await.unwrap();
  assert_eq!(latest, snap);
}

#[tokio::test]
async fn latest_ignores_older_snapshots_but_history_keeps_them() {
  let s = store().await;
  s.append(&snapshot(9, &[("Japan", "Asia", 4_000.0), ("India", "Asia", 3_500.0)]))
    .await
    .unwrap();
  s.append(&snapshot(10, &[("Japan", "Asia", 4_389.33)]))
    .await
    .unwrap();

  let latest = s.latest_snapshot().await.unwrap();
  assert_eq!(latest.processed_at(), at(10));
  assert_eq!(latest.rows(), &[ClassifiedRow::new("Japan", "Asia", 4_389.33)]);

  let all = s.all_history().await.unwrap();
  assert_eq!(all.len(), 3);
  assert_eq!(all[0].processed_at, at(9));
  assert_eq!(all[2].processed_at, at(10));
}

// ─── Transactions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn failed_insert_rolls_back_the_whole_snapshot() {
  let s = store().await;
  let first = snapshot(9, &[("Japan", "Asia", 4_389.33)]);
  s.append(&first).await.unwrap();

  // SQLite binds NaN as NULL, which violates `GDP_USD_billion NOT NULL`.
  let broken = snapshot(10, &[("India", "Asia", 3_909.89), ("Nowhere", "Unknown", f64::NAN)]);
  let err = s.append(&broken).await.unwrap_err();
  assert!(matches!(err, Error::Persistence(_)));

  assert_eq!(s.latest_snapshot().await.unwrap(), first);
  assert_eq!(s.all_history().await.unwrap().len(), 1);
}
