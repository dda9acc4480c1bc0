//! Entity → group lookup.
//!
//! The reference table is hand-curated data kept outside this system. Only
//! the lookup contract lives here: exact keys, no case folding, no fuzzy
//! matching. A miss is the caller's cue to use [`crate::row::UNKNOWN_GROUP`].

use std::{collections::HashMap, io::ErrorKind, path::Path};

use crate::{Error, Result};

/// Read-only name → group resolution.
pub trait RegionLookup {
  fn lookup(&self, entity_name: &str) -> Option<&str>;
}

impl RegionLookup for HashMap<String, String> {
  fn lookup(&self, entity_name: &str) -> Option<&str> {
    self.get(entity_name).map(String::as_str)
  }
}

/// The region table as loaded from its JSON file.
#[derive(Debug, Clone, Default)]
pub struct RegionTable {
  entries: HashMap<String, String>,
}

impl RegionTable {
  /// Load a JSON object of `{"<entity>": "<group>"}` pairs.
  ///
  /// A missing file is not an error: the table comes back empty and every
  /// entity classifies as unknown. A file that exists but does not parse is.
  pub fn load(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    let raw = match std::fs::read_to_string(path) {
      Ok(raw) => raw,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::default()),
      Err(e) => {
        return Err(Error::RegionTable { path: path.to_owned(), source: e.into() });
      }
    };
    let entries = serde_json::from_str(&raw).map_err(|e| Error::RegionTable {
      path:   path.to_owned(),
      source: e.into(),
    })?;
    Ok(Self { entries })
  }

  pub fn len(&self) -> usize { self.entries.len() }

  pub fn is_empty(&self) -> bool { self.entries.is_empty() }
}

impl From<HashMap<String, String>> for RegionTable {
  fn from(entries: HashMap<String, String>) -> Self { Self { entries } }
}

impl RegionLookup for RegionTable {
  fn lookup(&self, entity_name: &str) -> Option<&str> {
    self.entries.lookup(entity_name)
  }
}
