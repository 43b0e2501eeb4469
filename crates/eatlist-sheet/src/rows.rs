//! Maps parsed sheet rows onto [`BaseRecord`]s.

use std::collections::HashMap;

use eatlist_core::{BaseRecord, REQUIRED_COLUMNS};

use crate::error::SheetError;

/// Lowercased header name to zero-based column index.
#[derive(Debug, Clone)]
pub struct HeaderMap {
    columns: HashMap<String, usize>,
}

impl HeaderMap {
    /// Builds the map from the sheet's first row.
    ///
    /// Names are trimmed and lowercased. If a name repeats, the leftmost
    /// column wins.
    ///
    /// # Errors
    ///
    /// Returns [`SheetError::MissingColumn`] naming the first required column
    /// that is absent.
    pub fn from_header_row(header: &[String]) -> Result<Self, SheetError> {
        let mut columns = HashMap::with_capacity(header.len());
        for (idx, name) in header.iter().enumerate() {
            columns.entry(name.trim().to_lowercase()).or_insert(idx);
        }

        if let Some(missing) = REQUIRED_COLUMNS
            .iter()
            .find(|col| !columns.contains_key(**col))
        {
            return Err(SheetError::MissingColumn {
                column: (*missing).to_string(),
            });
        }

        Ok(Self { columns })
    }

    /// Index of `column`, if the header has it.
    #[must_use]
    pub fn index_of(&self, column: &str) -> Option<usize> {
        self.columns.get(column).copied()
    }

    /// Trimmed cell for `column`; short rows read as empty.
    fn cell(&self, row: &[String], column: &str) -> String {
        self.index_of(column)
            .and_then(|idx| row.get(idx))
            .map(|v| v.trim().to_string())
            .unwrap_or_default()
    }
}

/// Normalizes one data row. Returns `None` for a blank row.
#[must_use]
pub fn map_row(headers: &HeaderMap, row: &[String]) -> Option<BaseRecord> {
    let record = BaseRecord {
        name: headers.cell(row, "name"),
        category: headers.cell(row, "category").to_lowercase(),
        google_maps_url: headers.cell(row, "google_maps_url"),
        place_id: headers.cell(row, "place_id"),
        notes: headers.cell(row, "notes"),
        speed: headers.cell(row, "speed").to_lowercase(),
        price: headers.cell(row, "price"),
    };

    (!record.is_blank()).then_some(record)
}
