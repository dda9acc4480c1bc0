//! The SQLite implementation of [`HistoryStore`].

use std::{path::Path, sync::Arc};

use gdp_core::{
  snapshot::{HistoryRow, Snapshot, encode_processed_at},
  store::{HistoryStore, latest_of},
};

use crate::{Error, Result, encode::RawHistoryRow, schema};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A snapshot history kept in one table of a SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn:  tokio_rusqlite::Connection,
  table: Arc<str>,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and create `table` if missing.
  pub async fn open(path: impl AsRef<Path>, table: &str) -> Result<Self> {
    let table = validated(table)?;
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn, table };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, useful for testing.
  pub async fn open_in_memory(table: &str) -> Result<Self> {
    let table = validated(table)?;
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn, table };
    store.init_schema().await?;
    Ok(store)
  }

  pub fn table(&self) -> &str { &self.table }

  async fn init_schema(&self) -> Result<()> {
    let ddl = schema::create_table(&self.table);
    self
      .conn
      .call(move |conn| {
        conn.execute_batch(&ddl)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn query_history(&self, sql: String) -> Result<Vec<HistoryRow>> {
    let raws: Vec<RawHistoryRow> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map([], RawHistoryRow::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawHistoryRow::into_history).collect()
  }
}

fn validated(table: &str) -> Result<Arc<str>> {
  if schema::is_valid_table_name(table) {
    Ok(Arc::from(table))
  } else {
    Err(Error::InvalidTableName(table.to_owned()))
  }
}

// ─── HistoryStore impl ───────────────────────────────────────────────────────

impl HistoryStore for SqliteStore {
  type Error = Error;

  async fn append(&self, snapshot: &Snapshot) -> Result<()> {
    let sql = schema::insert_row(&self.table);
    let at_str = encode_processed_at(snapshot.processed_at());
    let rows: Vec<_> = snapshot
      .rows()
      .iter()
      .map(|r| (r.entity_name.clone(), r.group.clone(), r.scaled_magnitude))
      .collect();
    let count = rows.len();

    // One transaction per snapshot. If any insert fails, `tx` drops without
    // commit and nothing from this snapshot becomes visible.
    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        {
          let mut stmt = tx.prepare(&sql)?;
          for (country, region, gdp) in &rows {
            stmt.execute(rusqlite::params![country, region, gdp, at_str])?;
          }
        }
        tx.commit()?;
        Ok(())
      })
      .await
      .map_err(Error::Persistence)?;

    tracing::debug!(table = %self.table, rows = count, "snapshot appended");
    Ok(())
  }

  async fn latest_snapshot(&self) -> Result<Snapshot> {
    let rows = self.query_history(schema::select_latest(&self.table)).await?;
    latest_of(rows).ok_or(Error::EmptyHistory)
  }

  async fn all_history(&self) -> Result<Vec<HistoryRow>> {
    self.query_history(schema::select_all(&self.table)).await
  }
}
