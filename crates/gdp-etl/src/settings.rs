//! Runtime settings, layered from an optional TOML file and `GDP_ETL_*`
//! environment variables. Every field has a default.

use std::path::{Path, PathBuf};

use gdp_extract::DEFAULT_TABLE_MARKER;
use serde::Deserialize;

use crate::{Error, Result};

/// Which history store a run appends to.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
  /// A JSON array rewritten in full on every run.
  #[default]
  Json,
  /// One row per entity per run in a SQLite table.
  Sqlite,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Settings {
  pub source_url:   String,
  pub user_agent:   String,
  /// Literal text that identifies the target table.
  pub table_marker: String,
  /// JSON object mapping entity names to region labels.
  pub region_table: PathBuf,
  pub backend:      Backend,
  pub history_json: PathBuf,
  pub database:     PathBuf,
  pub table_name:   String,
  /// Append-only process log.
  pub log_file:     PathBuf,
  /// Billion US$.
  pub threshold:    f64,
  pub top_k:        usize,
}

impl Default for Settings {
  fn default() -> Self {
    Self {
      source_url:   "https://en.wikipedia.org/wiki/List_of_countries_by_GDP_%28nominal%29"
        .into(),
      user_agent:   "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36"
        .into(),
      table_marker: DEFAULT_TABLE_MARKER.into(),
      region_table: "Countries_Regions.json".into(),
      backend:      Backend::default(),
      history_json: "data/Countries_by_GDP.json".into(),
      database:     "World_Economies.db".into(),
      table_name:   "Countries_by_GDP".into(),
      log_file:     "data/etl_project_log.txt".into(),
      threshold:    100.0,
      top_k:        5,
    }
  }
}

impl Settings {
  /// Layer `path` (optional) and the environment over the defaults.
  pub fn load(path: &Path) -> Result<Self> {
    let layered = config::Config::builder()
      .add_source(config::File::from(path).required(false))
      .add_source(config::Environment::with_prefix("GDP_ETL").try_parsing(true))
      .build()?;

    let settings: Self = layered.try_deserialize()?;
    settings.validate()?;
    Ok(settings)
  }

  pub fn validate(&self) -> Result<()> {
    if self.top_k == 0 {
      return Err(Error::InvalidSetting("top_k must be at least 1".into()));
    }
    if !self.threshold.is_finite() {
      return Err(Error::InvalidSetting(format!(
        "threshold must be finite, got {}",
        self.threshold
      )));
    }
    if self.table_marker.trim().is_empty() {
      return Err(Error::InvalidSetting("table_marker must not be empty".into()));
    }
    Ok(())
  }

  /// Directories that must exist before the log or history is first written.
  pub fn data_dirs(&self) -> Vec<&Path> {
    [&self.log_file, &self.history_json, &self.database]
      .into_iter()
      .filter_map(|p| p.parent())
      .filter(|p| !p.as_os_str().is_empty())
      .collect()
  }
}
