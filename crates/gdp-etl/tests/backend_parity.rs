//! Both history backends must agree on what "latest" means.

use chrono::{NaiveDate, NaiveDateTime};
use gdp_core::{
  analysis::{threshold_report, top_k_group_average},
  row::ClassifiedRow,
  snapshot::Snapshot,
  store::HistoryStore,
};
use gdp_store_json::JsonStore;
use gdp_store_sqlite::SqliteStore;

fn at(day: u32, secs: u32) -> NaiveDateTime {
  NaiveDate::from_ymd_opt(2025, 6, day)
    .unwrap()
    .and_hms_opt(23, 59, secs)
    .unwrap()
}

fn snapshots() -> Vec<Snapshot> {
  let rows = |data: &[(&str, &str, f64)]| -> Vec<ClassifiedRow> {
    data.iter().map(|&(n, g, v)| ClassifiedRow::new(n, g, v)).collect()
  };
  vec![
    Snapshot::at(at(1, 0), rows(&[
      ("United States", "North America", 29_184.89),
      ("Germany", "Europe", 4_659.93),
      ("Japan", "Asia", 4_026.21),
    ])),
    // One second later: must not merge with the first run.
    Snapshot::at(at(1, 1), rows(&[
      ("United States", "North America", 30_337.16),
      ("China", "Asia", 19_534.89),
      ("Germany", "Europe", 4_921.56),
      ("Japan", "Asia", 4_389.33),
      ("India", "Asia", 4_271.92),
      ("France", "Europe", 3_211.29),
      ("Bhutan", "Asia", 3.4),
      ("Tuvalu", "Unknown", 0.07),
      ("Canada", "North America", 2_330.31),
      ("Italy", "Europe", 2_422.86),
      ("Korea, South", "Asia", 1_790.32),
      ("Mexico", "North America", 1_817.82),
      ("Spain", "Europe", 1_799.51),
      ("Indonesia", "Asia", 1_492.62),
    ])),
  ]
}

async fn fill<S: HistoryStore>(store: &S) {
  // Appended out of chronological order; "latest" is by timestamp, not by
  // append order.
  let mut snaps = snapshots();
  snaps.reverse();
  for snap in &snaps {
    store.append(snap).await.unwrap();
  }
}

#[tokio::test]
async fn latest_snapshot_and_analyses_agree() {
  let dir = tempfile::tempdir().unwrap();
  let json = JsonStore::new(dir.path().join("Countries_by_GDP.json"));
  let sqlite = SqliteStore::open(dir.path().join("World_Economies.db"), "Countries_by_GDP")
    .await
    .unwrap();

  fill(&json).await;
  fill(&sqlite).await;

  let from_json = json.latest_snapshot().await.unwrap();
  let from_sqlite = sqlite.latest_snapshot().await.unwrap();

  let expected = &snapshots()[1];
  assert_eq!(&from_json, expected);
  assert_eq!(from_json, from_sqlite);

  assert_eq!(
    threshold_report(&from_json, 100.0),
    threshold_report(&from_sqlite, 100.0)
  );
  for k in [1, 3, 5, 10] {
    assert_eq!(
      top_k_group_average(&from_json, k),
      top_k_group_average(&from_sqlite, k),
      "k = {k}"
    );
  }

  let asia = top_k_group_average(&from_json, 5)
    .into_iter()
    .find(|g| g.group == "Asia")
    .unwrap();
  assert_eq!(asia.members, 5);
  assert_eq!(asia.average, 6_295.82);

  assert_eq!(json.all_history().await.unwrap(), sqlite.all_history().await.unwrap());
  assert_eq!(json.all_history().await.unwrap().len(), 17);
}
