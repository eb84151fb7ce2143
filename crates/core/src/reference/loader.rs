//! Loading the bundled symbol dataset into a [`ReferenceTable`].
//!
//! The dataset is a CSV file with a header row. Two columns are read:
//!
//! | Column        | Field    |
//! |---------------|----------|
//! | `Symbol`      | `symbol` |
//! | `CompanyName` | `name`   |
//!
//! Header names are matched exactly first, then case-insensitively. Other
//! columns are ignored. A row that lacks a column (or the whole file lacking
//! the header) gets `""` for that field and is still kept. Rows are never
//! dropped or deduplicated.

use std::io::Read;

use reqwest::Client;
use tracing::{info, warn};

use crate::errors::CoreError;
use crate::models::reference::ReferenceEntry;
use super::table::ReferenceTable;

pub const SYMBOL_COLUMN: &str = "Symbol";
pub const NAME_COLUMN: &str = "CompanyName";

fn find_column(headers: &csv::StringRecord, wanted: &str) -> Option<usize> {
    headers
        .iter()
        .position(|h| h.trim() == wanted)
        .or_else(|| headers.iter().position(|h| h.trim().eq_ignore_ascii_case(wanted)))
}

fn field(record: &csv::ByteRecord, idx: Option<usize>) -> String {
    idx.and_then(|i| record.get(i))
        .map(|raw| String::from_utf8_lossy(raw).into_owned())
        .unwrap_or_default()
}

/// Parse reference rows from any CSV source.
///
/// Only I/O failures and an unreadable header are errors; per-row problems
/// (short rows, invalid UTF-8) degrade to empty or lossy fields.
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<ReferenceEntry>, CoreError> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let symbol_idx = find_column(&headers, SYMBOL_COLUMN);
    let name_idx = find_column(&headers, NAME_COLUMN);
    if symbol_idx.is_none() {
        warn!(column = SYMBOL_COLUMN, "reference dataset has no symbol column");
    }
    if name_idx.is_none() {
        warn!(column = NAME_COLUMN, "reference dataset has no name column");
    }

    let mut entries = Vec::new();
    let mut record = csv::ByteRecord::new();
    while rdr.read_byte_record(&mut record)? {
        entries.push(ReferenceEntry {
            symbol: field(&record, symbol_idx),
            name: field(&record, name_idx),
        });
    }
    Ok(entries)
}

impl ReferenceTable {
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, CoreError> {
        parse_csv(reader).map(Self::new)
    }

    pub fn from_csv_str(csv: &str) -> Result<Self, CoreError> {
        Self::from_reader(csv.as_bytes())
    }

    /// Read the dataset from disk (native only, not WASM).
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Self, CoreError> {
        let file = std::fs::File::open(path.as_ref())?;
        let table = Self::from_reader(std::io::BufReader::new(file))?;
        info!(rows = table.len(), "reference table loaded from file");
        Ok(table)
    }

    /// Download the dataset from `url` (e.g. the bundled `/full_company_names.csv`).
    pub async fn fetch(client: &Client, url: &str) -> Result<Self, CoreError> {
        let resp = client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(CoreError::ReferenceData(format!(
                "dataset request returned HTTP {}",
                status.as_u16()
            )));
        }
        let body = resp.bytes().await?;
        let table = Self::from_reader(body.as_ref())?;
        info!(rows = table.len(), "reference table downloaded");
        Ok(table)
    }

    /// Keep a loaded table, or fall back to an empty one after logging why.
    ///
    /// Typeahead keeps working against the empty table (it just finds nothing).
    pub fn or_empty(result: Result<Self, CoreError>) -> Self {
        match result {
            Ok(table) => table,
            Err(e) => {
                warn!(error = %e, "reference table unavailable, search will return no matches");
                Self::empty()
            }
        }
    }
}
