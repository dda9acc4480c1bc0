//! Table location and row selection over a parsed DOM.

use std::sync::LazyLock;

use gdp_core::row::RawRow;
use scraper::{ElementRef, Html, Selector};

use crate::{Error, Result};

static TABLE: LazyLock<Selector> = LazyLock::new(|| selector("table.wikitable"));
static ROW: LazyLock<Selector> = LazyLock::new(|| selector("tr"));
static HEADER_CELL: LazyLock<Selector> = LazyLock::new(|| selector("th"));
static DATA_CELL: LazyLock<Selector> = LazyLock::new(|| selector("td"));
static LINK: LazyLock<Selector> = LazyLock::new(|| selector("a"));

const STATIC_HEADER_CLASS: &str = "static-row-header";
const MIN_CELLS: usize = 3;

fn selector(css: &str) -> Selector {
  Selector::parse(css).expect("selector literals are valid CSS")
}

/// Concatenate an element's text nodes, each trimmed, empties dropped, with no
/// separator. `"18,080 <sup>[n 1]</sup>"` renders as `"18,080[n 1]"`.
fn stripped_text(el: ElementRef<'_>) -> String {
  el.text().map(str::trim).filter(|t| !t.is_empty()).collect()
}

fn is_header_row(row: ElementRef<'_>) -> bool {
  row.select(&HEADER_CELL).next().is_some()
    || row.value().classes().any(|c| c == STATIC_HEADER_CLASS)
}

/// Prefer the first non-empty link text; footnote markers and flag icons sit
/// outside the link.
fn entity_name(cell: ElementRef<'_>) -> String {
  cell
    .select(&LINK)
    .map(stripped_text)
    .find(|t| !t.is_empty())
    .unwrap_or_else(|| stripped_text(cell))
}

pub(crate) fn extract_rows(markup: &str, marker: &str) -> Result<Vec<RawRow>> {
  let document = Html::parse_document(markup);

  let table = document
    .select(&TABLE)
    .find(|t| t.text().collect::<String>().contains(marker))
    .ok_or_else(|| Error::TableNotFound { marker: marker.to_owned() })?;

  let rows = table
    .select(&ROW)
    .filter(|row| !is_header_row(*row))
    .filter_map(|row| {
      let cells: Vec<_> = row.select(&DATA_CELL).collect();
      if cells.len() < MIN_CELLS {
        return None;
      }
      Some(RawRow {
        entity_name: entity_name(cells[0]),
        raw_value:   stripped_text(cells[1]),
      })
    })
    .collect();

  Ok(rows)
}
