//! SQL for the snapshot history table.
//!
//! The table name is configurable, so statements are rendered per store from
//! a validated identifier rather than kept as constants.

/// Whether `name` is safe to splice into SQL as a bare identifier.
pub fn is_valid_table_name(name: &str) -> bool {
  let mut chars = name.chars();
  matches!(chars.next(), Some(c) if c == '_' || c.is_ascii_alphabetic())
    && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Table DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
///
/// Rows are strictly append-only: no UPDATE or DELETE is ever issued.
pub fn create_table(table: &str) -> String {
  format!(
    "CREATE TABLE IF NOT EXISTS {table} (
         id              INTEGER PRIMARY KEY AUTOINCREMENT,
         Country         TEXT NOT NULL,
         Region          TEXT NOT NULL,
         GDP_USD_billion REAL NOT NULL,
         Processed_Time  TIMESTAMP DEFAULT CURRENT_TIMESTAMP -- 'YYYY-MM-DD HH:MM:SS'
     );
     CREATE INDEX IF NOT EXISTS {table}_processed_idx ON {table}(Processed_Time);"
  )
}

pub fn insert_row(table: &str) -> String {
  format!(
    "INSERT INTO {table} (Country, Region, GDP_USD_billion, Processed_Time)
     VALUES (?1, ?2, ?3, ?4)"
  )
}

pub fn select_latest(table: &str) -> String {
  format!(
    "SELECT Country, Region, GDP_USD_billion, Processed_Time
     FROM {table}
     WHERE Processed_Time = (SELECT MAX(Processed_Time) FROM {table})
     ORDER BY id"
  )
}

pub fn select_all(table: &str) -> String {
  format!(
    "SELECT Country, Region, GDP_USD_billion, Processed_Time
     FROM {table}
     ORDER BY id"
  )
}
