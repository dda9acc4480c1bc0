//! The on-disk record shape and its conversion to domain types.
//!
//! Each element of the history array is
//! `{"Country", "Region", "GDP_USD_billion", "Processed_Time"}`. Unknown keys
//! are ignored on read.

use gdp_core::{
  row::ClassifiedRow,
  snapshot::{HistoryRow, decode_processed_at, encode_processed_at},
};
use serde::{Deserialize, Serialize};

use crate::Result;

#[derive(Debug, Serialize, Deserialize)]
pub struct Record {
  #[serde(rename = "Country")]
  pub country:         String,
  #[serde(rename = "Region")]
  pub region:          String,
  #[serde(rename = "GDP_USD_billion")]
  pub gdp_usd_billion: f64,
  #[serde(rename = "Processed_Time")]
  pub processed_time:  String,
}

impl Record {
  pub fn from_history(h: &HistoryRow) -> Self {
    Self {
      country:         h.row.entity_name.clone(),
      region:          h.row.group.clone(),
      gdp_usd_billion: h.row.scaled_magnitude,
      processed_time:  encode_processed_at(h.processed_at),
    }
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

/// Render records as a JSON array indented by four spaces. Non-ASCII text is
/// written as-is.
pub fn to_pretty_json(records: &[Record]) -> Result<Vec<u8>> {
  let mut buf = Vec::new();
  let fmt = serde_json::ser::PrettyFormatter::with_indent(b"    ");
  let mut ser = serde_json::Serializer::with_formatter(&mut buf, fmt);
  records.serialize(&mut ser)?;
  Ok(buf)
}
