//! Row types, one per pipeline stage.
//!
//! Rows move strictly forward: raw markup text becomes a [`RawRow`], a
//! successfully coerced value becomes a [`NormalizedRow`], and a looked-up,
//! scaled row becomes a [`ClassifiedRow`]. Nothing is ever converted back.

use serde::{Deserialize, Serialize};

/// Group label for entities the region lookup does not know.
pub const UNKNOWN_GROUP: &str = "Unknown";

/// Divisor taking source magnitudes (million US$) to stored ones (billion US$).
pub const UNIT_SCALE: f64 = 1000.0;

// ─── Stage rows ──────────────────────────────────────────────────────────────

/// An entity and its value cell, exactly as the source table rendered it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRow {
  pub entity_name: String,
  /// Annotations, separators and all; cleaning happens in
  /// [`crate::transform::normalize`].
  pub raw_value:   String,
}

impl RawRow {
  pub fn new(entity_name: impl Into<String>, raw_value: impl Into<String>) -> Self {
    Self { entity_name: entity_name.into(), raw_value: raw_value.into() }
  }
}

/// A row whose value coerced to a finite, non-negative magnitude.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRow {
  pub entity_name: String,
  pub magnitude:   f64,
}

/// A row with its resolved group and scaled magnitude; the unit of history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedRow {
  pub entity_name:      String,
  /// A label from the region lookup, or [`UNKNOWN_GROUP`].
  pub group:            String,
  /// `round2(magnitude / UNIT_SCALE)`; never negative.
  pub scaled_magnitude: f64,
}

impl ClassifiedRow {
  pub fn new(
    entity_name: impl Into<String>,
    group: impl Into<String>,
    scaled_magnitude: f64,
  ) -> Self {
    Self {
      entity_name: entity_name.into(),
      group: group.into(),
      scaled_magnitude,
    }
  }
}

// ─── Numeric helpers ─────────────────────────────────────────────────────────

/// Round to two decimal places, halves away from zero.
pub fn round2(x: f64) -> f64 { (x * 100.0).round() / 100.0 }

/// Convert a source magnitude to the stored unit.
pub fn scale(magnitude: f64) -> f64 { round2(magnitude / UNIT_SCALE) }
