//! Decoding helpers between SQLite rows and domain types.
//!
//! `Processed_Time` is stored as `YYYY-MM-DD HH:MM:SS` text, the same shape
//! SQLite's `CURRENT_TIMESTAMP` default produces, so lexical `MAX()` is
//! chronological.

use gdp_core::{
  row::ClassifiedRow,
  snapshot::{HistoryRow, decode_processed_at},
};

use crate::Result;

/// Raw values read directly from a history row.
pub struct RawHistoryRow {
  pub country:         String,
  pub region:          String,
  pub gdp_usd_billion: f64,
  pub processed_time:  String,
}

impl RawHistoryRow {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      country:         row.get(0)?,
      region:          row.get(1)?,
      gdp_usd_billion: row.get(2)?,
      processed_time:  row.get(3)?,
    })
  }

  pub fn into_history(self) -> Result<HistoryRow> {
    Ok(HistoryRow {
      row:          ClassifiedRow {
        entity_name:      self.country,
        group:            self.region,
        scaled_magnitude: self.gdp_usd_billion,
      },
      processed_at: decode_processed_at(&self.processed_time)?,
    })
  }
}
