//! The binary's behaviour when it cannot start a run.

use std::process::Command;

#[test]
fn invalid_settings_fail_into_the_default_process_log() {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("gdp-etl.toml"), "top_k = 0\n").unwrap();

  let output = Command::new(env!("CARGO_BIN_EXE_gdp-etl"))
    .current_dir(dir.path())
    .output()
    .unwrap();

  assert!(!output.status.success());
  let stderr = String::from_utf8_lossy(&output.stderr);
  assert!(stderr.contains("Error: "), "{stderr}");
  assert!(stderr.contains("top_k must be at least 1"), "{stderr}");

  let log = std::fs::read_to_string(dir.path().join("data/etl_project_log.txt")).unwrap();
  let line = log.lines().find(|l| l.contains("ETL Process Failed")).unwrap();
  assert!(line.contains("top_k must be at least 1"), "{line}");
  assert!(!log.contains("ETL Process Started"), "{log}");
}
