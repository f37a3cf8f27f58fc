use anyhow::{Context, Result};
use csv::{ReaderBuilder, StringRecord};
use std::collections::HashMap;
use tracing::debug;

/// One data row of the sheet, keyed by the header text of its column.
///
/// Cells past the end of a short row are absent rather than empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawRow {
    cells: HashMap<String, String>,
}

impl RawRow {
    pub fn get(&self, header: &str) -> Option<&str> {
        self.cells.get(header).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn from_record(headers: &StringRecord, record: &StringRecord) -> Self {
        headers.iter().zip(record.iter()).collect()
    }
}

/// Repeated keys keep their first value, matching a repeated header column.
impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RawRow {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut cells = HashMap::new();
        for (k, v) in iter {
            cells.entry(k.into()).or_insert_with(|| v.into());
        }
        Self { cells }
    }
}

/// Parse a CSV document whose first record is the header row.
///
/// Rows may be shorter or longer than the header; cells without a header are dropped.
#[tracing::instrument(level = "debug", skip(text), fields(bytes = text.len()))]
pub fn parse_rows(text: &str) -> Result<Vec<RawRow>> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = reader
        .headers()
        .context("reading CSV header row")?
        .clone();

    let mut rows = Vec::new();
    for (i, record) in reader.records().enumerate() {
        let record = record.with_context(|| format!("parsing CSV record #{}", i + 1))?;
        rows.push(RawRow::from_record(&headers, &record));
    }

    debug!(rows = rows.len(), columns = headers.len(), "parsed sheet");
    Ok(rows)
}
