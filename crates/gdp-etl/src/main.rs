//! `gdp-etl`: harvest per-country GDP into a snapshot history.
//!
//! Reads `gdp-etl.toml` (or the path given with `--config`) and `GDP_ETL_*`
//! environment variables, runs one ETL pass and prints the analysis of the
//! latest snapshot.
//!
//! # Usage
//!
//! ```text
//! gdp-etl
//! gdp-etl --backend sqlite
//! gdp-etl --input saved-page.html
//! ```

use std::{path::PathBuf, process::ExitCode};

use anyhow::Context as _;
use clap::Parser;
use gdp_etl::{Backend, Settings, Source};
use tracing::{error, info};

#[derive(Parser)]
#[command(author, version, about = "Per-country GDP snapshot ETL")]
struct Cli {
  /// Path to the TOML configuration file.
  #[arg(short, long, default_value = "gdp-etl.toml")]
  config: PathBuf,

  /// History store to append to; overrides the configured backend.
  #[arg(long, value_enum)]
  backend: Option<Backend>,

  /// Read the page from a saved HTML file instead of fetching it.
  #[arg(long, value_name = "FILE")]
  input: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
  let cli = Cli::parse();

  let (settings, source) = match prepare(cli) {
    Ok(prepared) => prepared,
    Err(e) => {
      if init_default_log() {
        error!("ETL Process Failed: {e:#}");
      }
      eprintln!("Error: {e:#}");
      return ExitCode::FAILURE;
    }
  };

  info!("ETL Process Started");
  match gdp_etl::execute(&settings, &source).await {
    Ok(summary) => {
      if let Some(report) = &summary.report {
        print!("{report}");
      }
      info!("ETL Process Completed Successfully");
      ExitCode::SUCCESS
    }
    Err(e) => {
      error!("ETL Process Failed: {e}");
      eprintln!("Error: {e}");
      ExitCode::FAILURE
    }
  }
}

/// Load settings, create data directories and install logging.
fn prepare(cli: Cli) -> anyhow::Result<(Settings, Source)> {
  let mut settings = Settings::load(&cli.config)
    .with_context(|| format!("failed to load settings from {}", cli.config.display()))?;
  if let Some(backend) = cli.backend {
    settings.backend = backend;
  }

  for dir in settings.data_dirs() {
    std::fs::create_dir_all(dir)
      .with_context(|| format!("failed to create {}", dir.display()))?;
  }

  gdp_etl::log::init(&settings.log_file)
    .with_context(|| format!("failed to open log file {}", settings.log_file.display()))?;

  let source = match cli.input {
    Some(path) => Source::File(path),
    None => Source::from_settings(&settings),
  };
  Ok((settings, source))
}

/// Install logging on the default process log so a failure before settings
/// are usable still reaches it. Returns whether logging is up.
fn init_default_log() -> bool {
  let log_file = Settings::default().log_file;
  if let Some(dir) = log_file.parent()
    && !dir.as_os_str().is_empty()
    && std::fs::create_dir_all(dir).is_err()
  {
    return false;
  }
  gdp_etl::log::init(&log_file).is_ok()
}
