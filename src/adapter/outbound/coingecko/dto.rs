//! CoinGecko `/coins/{id}/ohlc` response rows.

use crate::domain::ReturnSeries;

/// Column holding the closing price in each `[time, open, high, low, close]`
/// row.
pub const CLOSE_COLUMN: usize = 4;

/// Raw OHLC rows as returned by the API.
pub type OhlcRows = Vec<Vec<f64>>;

/// Extract closing prices, failing on the first row without a close column.
pub fn closes(rows: &[Vec<f64>]) -> Result<ReturnSeries, String> {
    rows.iter()
        .enumerate()
        .map(|(i, row)| {
            row.get(CLOSE_COLUMN)
                .copied()
                .ok_or_else(|| format!("row {i} has {} columns, expected 5", row.len()))
        })
        .collect::<Result<Vec<_>, _>>()
        .map(ReturnSeries::new)
}
