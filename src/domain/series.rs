//! Historical closing prices and the Sharpe-style return ratio.

/// Ordered closing prices for one candidate over the lookback window.
///
/// Oldest observation first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReturnSeries {
    closes: Vec<f64>,
}

impl ReturnSeries {
    /// Create a series from closing prices, oldest first.
    #[must_use]
    pub fn new(closes: Vec<f64>) -> Self {
        Self { closes }
    }

    /// Closing prices, oldest first.
    #[must_use]
    pub fn closes(&self) -> &[f64] {
        &self.closes
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.closes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Simple period returns `(c[i] - c[i-1]) / c[i-1]`.
    #[must_use]
    pub fn returns(&self) -> Vec<f64> {
        self.closes
            .windows(2)
            .map(|pair| (pair[1] - pair[0]) / pair[0])
            .collect()
    }

    /// Annualised Sharpe-style ratio with a zero risk-free rate.
    ///
    /// `mean(returns) / stddev(returns) * sqrt(periods_per_year)`, using the
    /// population standard deviation. `None` when there are fewer than
    /// `min_observations` closes, when the deviation is zero, or when the
    /// series is numerically degenerate (non-positive or non-finite prices).
    #[must_use]
    pub fn sharpe_ratio(&self, min_observations: usize, periods_per_year: f64) -> Option<f64> {
        if self.closes.len() < min_observations.max(2) {
            return None;
        }

        let returns = self.returns();
        let n = returns.len() as f64;
        let mean = returns.iter().sum::<f64>() / n;
        let variance = returns.iter().map(|r| (r - mean).powi(2)).sum::<f64>() / n;
        let std_dev = variance.sqrt();

        if !std_dev.is_finite() || std_dev == 0.0 {
            return None;
        }

        let ratio = mean / std_dev * periods_per_year.sqrt();
        ratio.is_finite().then_some(ratio)
    }
}
