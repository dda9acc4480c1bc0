//! Value normalization and region classification.
//!
//! Pipeline:
//!   Vec<RawRow>
//!     └─ normalize()  → Normalized { rows: Vec<NormalizedRow>, dropped }
//!          └─ classify() → Vec<ClassifiedRow>

use std::sync::LazyLock;

use regex::Regex;

use crate::{
  Error, Result,
  region::RegionLookup,
  row::{ClassifiedRow, NormalizedRow, RawRow, UNKNOWN_GROUP, scale},
};

/// A bracketed aside such as `(2024)` or `[n 1]`, matched lazily.
static ASIDE: LazyLock<Regex> = LazyLock::new(|| {
  Regex::new(r"[\(\[].*?[\)\]]").expect("aside pattern is a valid regex")
});

// ─── Normalization ───────────────────────────────────────────────────────────

/// Clean one raw value cell and coerce it to a magnitude.
///
/// `"18,080 (2024)"` becomes `18080.0`. Empty, non-numeric, non-finite and
/// negative results are rejected; nothing is defaulted to zero.
pub fn normalize_value(raw: &str) -> Result<f64> {
  let stripped = ASIDE.replace_all(raw, "");
  let cleaned = stripped.trim().replace(',', "");

  match cleaned.parse::<f64>() {
    Ok(v) if v.is_finite() && v >= 0.0 => Ok(v),
    _ => Err(Error::RowCoercion { raw: raw.to_owned() }),
  }
}

/// Output of [`normalize`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Normalized {
  pub rows:    Vec<NormalizedRow>,
  /// Rows whose value failed coercion and were discarded.
  pub dropped: usize,
}

/// Normalize every row, dropping (and counting) those that fail coercion.
/// Surviving rows keep their input order.
pub fn normalize(rows: Vec<RawRow>) -> Normalized {
  let mut out = Normalized::default();
  for RawRow { entity_name, raw_value } in rows {
    match normalize_value(&raw_value) {
      Ok(magnitude) => out.rows.push(NormalizedRow { entity_name, magnitude }),
      Err(_) => out.dropped += 1,
    }
  }
  out
}

// ─── Classification ──────────────────────────────────────────────────────────

/// Resolve each row's group and scale its magnitude.
///
/// An exact-key miss yields [`UNKNOWN_GROUP`]; it is never an error.
pub fn classify<L>(rows: Vec<NormalizedRow>, lookup: &L) -> Vec<ClassifiedRow>
where
  L: RegionLookup + ?Sized,
{
  rows
    .into_iter()
    .map(|NormalizedRow { entity_name, magnitude }| {
      let group = lookup.lookup(&entity_name).unwrap_or(UNKNOWN_GROUP).to_owned();
      ClassifiedRow { entity_name, group, scaled_magnitude: scale(magnitude) }
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use std::collections::HashMap;

  use super::*;

  #[test]
  fn strips_annotations_and_separators() {
    assert_eq!(normalize_value("18,080 (2024)").unwrap(), 18_080.0);
    assert_eq!(normalize_value("29,184,890").unwrap(), 29_184_890.0);
    assert_eq!(normalize_value("4,389,326[n 1]").unwrap(), 4_389_326.0);
    assert_eq!(normalize_value("  1,234.5  ").unwrap(), 1_234.5);
  }

  #[test]
  fn removes_every_aside_not_just_the_first() {
    assert_eq!(normalize_value("[a]1,000(2023)").unwrap(), 1_000.0);
  }

  #[test]
  fn rejects_non_numeric_text() {
    for raw in ["—", "", "   ", "(2024)", "N/A", "12 345", "inf", "NaN", "-5"] {
      assert!(
        matches!(normalize_value(raw), Err(Error::RowCoercion { .. })),
        "{raw:?} should not coerce"
      );
    }
  }

  #[test]
  fn normalize_counts_dropped_rows_and_keeps_order() {
    let out = normalize(vec![
      RawRow::new("B", "2,000"),
      RawRow::new("X", "—"),
      RawRow::new("A", "1,000 (2023)"),
      RawRow::new("Y", ""),
    ]);
    assert_eq!(out.dropped, 2);
    let names: Vec<_> = out.rows.iter().map(|r| r.entity_name.as_str()).collect();
    assert_eq!(names, ["B", "A"]);
    assert_eq!(out.rows[1].magnitude, 1_000.0);
  }

  #[test]
  fn classify_resolves_and_scales() {
    let lookup: HashMap<String, String> =
      [("Japan".to_owned(), "Asia".to_owned())].into_iter().collect();
    let rows = classify(
      vec![
        NormalizedRow { entity_name: "Japan".into(), magnitude: 4_389_326.0 },
        NormalizedRow { entity_name: "Atlantis".into(), magnitude: 18_080.0 },
      ],
      &lookup,
    );
    assert_eq!(rows[0], ClassifiedRow::new("Japan", "Asia", 4_389.33));
    assert_eq!(rows[1], ClassifiedRow::new("Atlantis", UNKNOWN_GROUP, 18.08));
  }

  #[test]
  fn empty_lookup_degrades_everything_to_unknown() {
    let lookup: HashMap<String, String> = HashMap::new();
    let rows = classify(
      vec![NormalizedRow { entity_name: "Japan".into(), magnitude: 1.0 }],
      &lookup,
    );
    assert_eq!(rows[0].group, UNKNOWN_GROUP);
  }
}
