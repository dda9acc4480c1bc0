//! The two fixed questions asked of the latest snapshot.
//!
//! Both rankings sort descending with a stable sort, so equal magnitudes keep
//! the order the source table listed them in.

use serde::Serialize;

use crate::{
  row::{ClassifiedRow, round2},
  snapshot::Snapshot,
};

/// Rows with `scaled_magnitude >= threshold`, largest first.
pub fn threshold_report(snapshot: &Snapshot, threshold: f64) -> Vec<&ClassifiedRow> {
  let mut hits: Vec<_> = snapshot
    .rows()
    .iter()
    .filter(|r| r.scaled_magnitude >= threshold)
    .collect();
  hits.sort_by(|a, b| b.scaled_magnitude.total_cmp(&a.scaled_magnitude));
  hits
}

/// The mean of one group's top-`k` magnitudes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupAverage {
  pub group:   String,
  /// Rounded to two decimal places.
  pub average: f64,
  /// How many rows were averaged: `min(k, group size)`.
  pub members: usize,
}

/// Average the `k` largest magnitudes of each group, ranked per group.
///
/// A group smaller than `k` is averaged over the rows it has; nothing is
/// padded. Groups come back largest average first, ties in order of first
/// appearance. `k == 0` selects nothing and yields no groups.
pub fn top_k_group_average(snapshot: &Snapshot, k: usize) -> Vec<GroupAverage> {
  if k == 0 {
    return Vec::new();
  }

  // Groups in first-appearance order, each with its magnitudes.
  let mut groups: Vec<(&str, Vec<f64>)> = Vec::new();
  for row in snapshot.rows() {
    match groups.iter_mut().find(|(g, _)| *g == row.group) {
      Some((_, values)) => values.push(row.scaled_magnitude),
      None => groups.push((row.group.as_str(), vec![row.scaled_magnitude])),
    }
  }

  let mut averages: Vec<_> = groups
    .into_iter()
    .map(|(group, mut values)| {
      values.sort_by(|a, b| b.total_cmp(a));
      values.truncate(k);
      let sum: f64 = values.iter().sum();
      GroupAverage {
        group:   group.to_owned(),
        average: round2(sum / values.len() as f64),
        members: values.len(),
      }
    })
    .collect();
  averages.sort_by(|a, b| b.average.total_cmp(&a.average));
  averages
}
