//! Ticker list extracted from a sheet's header column.

use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Ordered list of tickers from the most recent successful fetch.
///
/// A `TickerSet` is always built whole by [`TickerSet::from_rows`]; there is no
/// way to append to an existing one, so a holder either keeps its old value or
/// swaps in a complete new one.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TickerSet(Vec<String>);

impl TickerSet {
    /// Creates an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the column named `header` from `rows`.
    ///
    /// Row 0 is the header row. Header cells and `header` are compared after
    /// trimming and the first match wins. Every following row contributes its
    /// trimmed cell in that column unless the cell is empty or the row is too
    /// short to have one.
    pub fn from_rows(rows: &[Vec<String>], header: &str) -> Result<Self, FetchError> {
        let schema_error = || FetchError::Schema {
            header: header.to_string(),
        };

        let (header_row, data_rows) = rows.split_first().ok_or_else(schema_error)?;
        let wanted = header.trim();
        let column = header_row
            .iter()
            .position(|cell| cell.trim() == wanted)
            .ok_or_else(schema_error)?;

        let tickers = data_rows
            .iter()
            .filter_map(|row| row.get(column))
            .map(|cell| cell.trim())
            .filter(|cell| !cell.is_empty())
            .map(String::from)
            .collect();
        Ok(Self(tickers))
    }

    /// Number of tickers.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns `true` when no tickers are held.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Tickers in sheet order.
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Iterates over the tickers in sheet order.
    pub fn iter(&self) -> std::slice::Iter<'_, String> {
        self.0.iter()
    }
}

impl From<Vec<String>> for TickerSet {
    fn from(tickers: Vec<String>) -> Self {
        Self(tickers)
    }
}

impl<'a> IntoIterator for &'a TickerSet {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FetchErrorKind;

    fn rows(raw: &[&[&str]]) -> Vec<Vec<String>> {
        raw.iter()
            .map(|row| row.iter().map(|cell| cell.to_string()).collect())
            .collect()
    }

    #[test]
    fn skips_empty_cells_and_header() {
        let rows = rows(&[
            &["tickers", "x"],
            &["AAPL", "1"],
            &["", "2"],
            &["MSFT", "3"],
        ]);
        let set = TickerSet::from_rows(&rows, "tickers").unwrap();
        assert_eq!(set.as_slice(), ["AAPL", "MSFT"]);
    }

    #[test]
    fn finds_column_that_is_not_first() {
        let rows = rows(&[&["name", "symbol"], &["Apple", "AAPL"], &["Nvidia", " NVDA "]]);
        let set = TickerSet::from_rows(&rows, "symbol").unwrap();
        assert_eq!(set.as_slice(), ["AAPL", "NVDA"]);
    }

    #[test]
    fn padded_header_name_still_matches() {
        let rows = rows(&[&["tickers"], &["AAPL"]]);
        let set = TickerSet::from_rows(&rows, " tickers ").unwrap();
        assert_eq!(set.as_slice(), ["AAPL"]);
    }

    #[test]
    fn short_rows_contribute_nothing() {
        let rows = rows(&[&["name", "tickers"], &["Apple", "AAPL"], &["orphan"], &[]]);
        let set = TickerSet::from_rows(&rows, "tickers").unwrap();
        assert_eq!(set.as_slice(), ["AAPL"]);
    }

    #[test]
    fn missing_header_is_schema_error() {
        let rows = rows(&[&["symbol"], &["AAPL"]]);
        let err = TickerSet::from_rows(&rows, "tickers").unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::Schema);
    }

    #[test]
    fn empty_sheet_is_schema_error() {
        let err = TickerSet::from_rows(&[], "tickers").unwrap_err();
        assert_eq!(err.kind(), FetchErrorKind::Schema);
    }

    #[test]
    fn header_only_sheet_is_empty_set() {
        let rows = rows(&[&["tickers"]]);
        let set = TickerSet::from_rows(&rows, "tickers").unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn same_rows_give_equal_sets() {
        let rows = rows(&[&["tickers"], &["AAPL"], &["TSLA"]]);
        let first = TickerSet::from_rows(&rows, "tickers").unwrap();
        let second = TickerSet::from_rows(&rows, "tickers").unwrap();
        assert_eq!(first, second);
    }
}
