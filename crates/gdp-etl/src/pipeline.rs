//! The orchestrator: Extract → Transform → Load → Analysis, strictly in order.
//!
//! Per-row problems are absorbed and counted. Anything else aborts the rest
//! of the run and surfaces as an [`Error`]; history persisted by earlier runs
//! is never touched.

use std::path::PathBuf;

use gdp_core::{
  region::{RegionLookup, RegionTable},
  row::UNKNOWN_GROUP,
  snapshot::Snapshot,
  store::HistoryStore,
  transform::{Normalized, classify, normalize},
};
use gdp_store_json::JsonStore;
use gdp_store_sqlite::SqliteStore;
use tracing::{error, info, warn};

use crate::{Backend, Error, Report, Result, Settings, fetch::fetch_markup};

// ─── Source ──────────────────────────────────────────────────────────────────

/// Where the page markup comes from.
#[derive(Debug, Clone)]
pub enum Source {
  /// A single HTTP GET, no retry.
  Fetch { url: String, user_agent: String },
  /// A page saved to disk.
  File(PathBuf),
  /// Markup already in memory.
  Inline(String),
}

impl Source {
  pub fn from_settings(settings: &Settings) -> Self {
    Self::Fetch {
      url:        settings.source_url.clone(),
      user_agent: settings.user_agent.clone(),
    }
  }

  async fn load(&self) -> Result<String> {
    match self {
      Self::Fetch { url, user_agent } => fetch_markup(url, user_agent).await,
      Self::File(path) => Ok(tokio::fs::read_to_string(path).await?),
      Self::Inline(markup) => Ok(markup.clone()),
    }
  }
}

// ─── Summary ─────────────────────────────────────────────────────────────────

/// What one run did.
#[derive(Debug, Clone, Default)]
pub struct RunSummary {
  /// Raw rows found in the target table.
  pub extracted: usize,
  /// Rows dropped because their value was not numeric.
  pub dropped:   usize,
  /// Rows classified into the unknown group.
  pub unknown:   usize,
  /// Total rows in history after this run's append.
  pub stored:    usize,
  /// `None` when the run stopped before loading.
  pub report:    Option<Report>,
}

// ─── Entry points ────────────────────────────────────────────────────────────

/// Load the region table, open the configured backend and [`run`].
pub async fn execute(settings: &Settings, source: &Source) -> Result<RunSummary> {
  let regions = RegionTable::load(&settings.region_table)?;
  if regions.is_empty() {
    warn!(
      "Region table {} is missing or empty; every row maps to {UNKNOWN_GROUP}",
      settings.region_table.display()
    );
  }

  match settings.backend {
    Backend::Json => {
      let store = JsonStore::new(&settings.history_json);
      run(settings, source, &store, &regions).await
    }
    Backend::Sqlite => {
      let store = SqliteStore::open(&settings.database, &settings.table_name)
        .await
        .map_err(Error::from_store)?;
      run(settings, source, &store, &regions).await
    }
  }
}

/// Run every phase against `store`.
pub async fn run<S, L>(
  settings: &Settings,
  source: &Source,
  store: &S,
  regions: &L,
) -> Result<RunSummary>
where
  S: HistoryStore,
  L: RegionLookup + ?Sized,
{
  let mut summary = RunSummary::default();

  // ── Extract ──────────────────────────────────────────────────────────────
  info!("Extract phase Started");
  let raw = extract(settings, source)
    .await
    .inspect_err(|e| error!("Extract phase Failed: {e}"))?;
  summary.extracted = raw.len();
  info!("Extract phase Ended: {} rows fetched", raw.len());

  if raw.is_empty() {
    warn!("Target table had no data rows; nothing to load");
    return Ok(summary);
  }

  // ── Transform ────────────────────────────────────────────────────────────
  info!("Transform phase Started");
  let Normalized { rows, dropped } = normalize(raw);
  summary.dropped = dropped;
  if dropped > 0 {
    info!("Transform: Filtered out {dropped} rows with invalid GDP data");
  }

  let classified = classify(rows, regions);
  summary.unknown = classified.iter().filter(|r| r.group == UNKNOWN_GROUP).count();
  if summary.unknown > 0 {
    info!("Transform: {} rows mapped to {UNKNOWN_GROUP} region", summary.unknown);
  }

  if classified.is_empty() {
    warn!("No rows survived normalization; nothing to load");
    return Ok(summary);
  }
  let snapshot = Snapshot::build(classified);
  info!("Transform phase Ended");

  // ── Load ─────────────────────────────────────────────────────────────────
  info!("Load phase Started");
  store.append(&snapshot).await.map_err(Error::from_store)?;
  summary.stored = store.all_history().await.map_err(Error::from_store)?.len();
  info!("Load phase Ended: Total {} records stored", summary.stored);

  // ── Analysis ─────────────────────────────────────────────────────────────
  info!("Analysis phase Started");
  let latest = store.latest_snapshot().await.map_err(Error::from_store)?;
  summary.report = Some(Report::new(&latest, settings.threshold, settings.top_k));
  info!("Analysis phase Ended");

  Ok(summary)
}

async fn extract(
  settings: &Settings,
  source: &Source,
) -> Result<Vec<gdp_core::row::RawRow>> {
  let markup = source.load().await?;
  Ok(gdp_extract::extract(&markup, &settings.table_marker)?)
}
