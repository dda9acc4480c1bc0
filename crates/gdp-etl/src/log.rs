//! Tracing setup: a console layer plus the append-only process log.
//!
//! The process log gets one line per INFO-or-above event, shaped
//! `<timestamp>, <message>`, and is never truncated.

use std::{fs::OpenOptions, path::Path, sync::Mutex};

use chrono::Local;
use tracing::{Event, Subscriber, level_filters::LevelFilter};
use tracing_subscriber::{
  EnvFilter, Layer as _,
  fmt::{FmtContext, FormatEvent, FormatFields, format::Writer},
  layer::SubscriberExt as _,
  registry::LookupSpan,
  util::SubscriberInitExt as _,
};

/// Timestamp prefix of each process-log line, e.g. `2025-February-14-09-15-00`.
pub const LOG_TIMESTAMP_FORMAT: &str = "%Y-%B-%d-%H-%M-%S";

/// Event formatter for the process log.
pub struct PhaseLine;

impl<S, N> FormatEvent<S, N> for PhaseLine
where
  S: Subscriber + for<'a> LookupSpan<'a>,
  N: for<'a> FormatFields<'a> + 'static,
{
  fn format_event(
    &self,
    ctx: &FmtContext<'_, S, N>,
    mut writer: Writer<'_>,
    event: &Event<'_>,
  ) -> std::fmt::Result {
    write!(writer, "{}, ", Local::now().format(LOG_TIMESTAMP_FORMAT))?;
    ctx.field_format().format_fields(writer.by_ref(), event)?;
    writeln!(writer)
  }
}

/// Install the global subscriber. Call once, after the log file's directory
/// exists.
pub fn init(log_file: &Path) -> std::io::Result<()> {
  let file = OpenOptions::new().create(true).append(true).open(log_file)?;

  let console = tracing_subscriber::fmt::layer()
    .with_writer(std::io::stderr)
    .with_filter(
      EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .from_env_lossy(),
    );

  let process_log = tracing_subscriber::fmt::layer()
    .with_ansi(false)
    .with_writer(Mutex::new(file))
    .event_format(PhaseLine)
    .with_filter(LevelFilter::INFO);

  tracing_subscriber::registry()
    .with(console)
    .with(process_log)
    .init();
  Ok(())
}
