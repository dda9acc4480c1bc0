//! Console report over the latest snapshot.

use std::fmt;

use chrono::NaiveDateTime;
use gdp_core::{
  analysis::{GroupAverage, threshold_report, top_k_group_average},
  row::ClassifiedRow,
  snapshot::{Snapshot, encode_processed_at},
};

const WIDTH: usize = 75;

/// Both analyses of one snapshot, ready to print.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
  pub as_of:           NaiveDateTime,
  pub threshold:       f64,
  pub top_k:           usize,
  pub above_threshold: Vec<ClassifiedRow>,
  pub group_averages:  Vec<GroupAverage>,
}

impl Report {
  pub fn new(snapshot: &Snapshot, threshold: f64, top_k: usize) -> Self {
    Self {
      as_of: snapshot.processed_at(),
      threshold,
      top_k,
      above_threshold: threshold_report(snapshot, threshold)
        .into_iter()
        .cloned()
        .collect(),
      group_averages: top_k_group_average(snapshot, top_k),
    }
  }
}

/// Two fixed-width tables. For people, not parsers.
impl fmt::Display for Report {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let heavy = "=".repeat(WIDTH);
    let light = "-".repeat(WIDTH);

    writeln!(f, "\n[ Analysis as of: {} ]", encode_processed_at(self.as_of))?;
    writeln!(f, "{heavy}")?;
    writeln!(f, "{:<5} {:<25} {:<20} {:>15}", "No.", "Country", "Region", "GDP (Billion USD)")?;
    writeln!(f, "{light}")?;
    for (i, row) in self.above_threshold.iter().enumerate() {
      writeln!(
        f,
        "{:<5} {:<25} {:<20} {:>15}",
        i + 1,
        row.entity_name,
        row.group,
        grouped(row.scaled_magnitude)
      )?;
    }
    writeln!(f, "{light}")?;
    writeln!(
      f,
      "{} countries at or above {}B USD",
      self.above_threshold.len(),
      self.threshold
    )?;
    writeln!(f, "{heavy}")?;

    writeln!(f, "\n{heavy}")?;
    writeln!(f, "Top {} average GDP by region (Billion USD)", self.top_k)?;
    writeln!(f, "{light}")?;
    writeln!(f, "{:<5} {:<25} {:>15} {:>8}", "No.", "Region", "Average GDP", "Members")?;
    writeln!(f, "{light}")?;
    for (i, avg) in self.group_averages.iter().enumerate() {
      writeln!(
        f,
        "{:<5} {:<25} {:>15} {:>8}",
        i + 1,
        avg.group,
        grouped(avg.average),
        avg.members
      )?;
    }
    writeln!(f, "{heavy}")
  }
}

/// Two decimals with comma thousands separators: `29184.89` → `29,184.89`.
fn grouped(value: f64) -> String {
  let fixed = format!("{:.2}", value.abs());
  let (int, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

  let mut out = String::with_capacity(fixed.len() + int.len() / 3 + 1);
  if value.is_sign_negative() && value != 0.0 {
    out.push('-');
  }
  for (i, ch) in int.chars().enumerate() {
    if i > 0 && (int.len() - i) % 3 == 0 {
      out.push(',');
    }
    out.push(ch);
  }
  out.push('.');
  out.push_str(frac);
  out
}
