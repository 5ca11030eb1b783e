use std::fmt::Display;

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, OverlaySeries, Price, PriceSource, Result,
    error::{IndicatorError, check_finite, check_period, first_overflow},
    price_window::{PriceWindow, mean},
};

/// Configuration for the Relative Strength Index ([`Rsi`])
/// indicator.
///
/// Output begins at index `length`: the first value needs `length`
/// price changes, i.e. `length + 1` prices.
///
/// # Example
///
/// ```
/// use chartline_ta::{IndicatorConfig, RsiConfig};
///
/// let config = RsiConfig::close(14)?;
/// assert_eq!(config.length(), 14);
/// # Ok::<(), chartline_ta::IndicatorError>(())
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct RsiConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for RsiConfig {
    type Builder = RsiConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        RsiConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.length
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl RsiConfig {
    /// RSI on closing price.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] if `length` is zero.
    pub fn close(length: usize) -> Result<Self> {
        Self::builder().length(length).build()
    }
}

impl Display for RsiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RsiConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`RsiConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct RsiConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl RsiConfigBuilder {
    #[must_use]
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
        }
    }
}

impl IndicatorConfigBuilder<RsiConfig> for RsiConfigBuilder {
    #[inline]
    fn length(mut self, length: usize) -> Self {
        self.length = Some(length);
        self
    }

    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    fn build(self) -> Result<RsiConfig> {
        let length = self
            .length
            .ok_or_else(|| IndicatorError::invalid("length", "length is required"))?;

        Ok(RsiConfig {
            length: check_period("length", length)?,
            source: self.source,
        })
    }
}

/// Relative Strength Index (RSI) over simple-mean gains and losses.
///
/// Measures the speed and magnitude of recent price changes on
/// a 0–100 scale. Values above 70 are conventionally considered
/// overbought; below 30, oversold.
///
/// Gains and losses are averaged with a plain trailing mean over the
/// last `length` changes (not Wilder's smoothing):
///
/// ```text
/// avg_gain = mean(gain[i − length .. i − 1])
/// avg_loss = mean(loss[i − length .. i − 1])
/// RSI      = 100 − 100 / (1 + avg_gain / avg_loss)
/// ```
///
/// A window without losses has no finite `RS`. It reads `100` when it
/// contains gains and `50` when the window is completely flat, so the
/// output never contains NaN or infinity.
///
/// # Example
///
/// ```
/// use chartline_ta::{Indicator, Rsi, RsiConfig};
///
/// let rsi = Rsi::new(RsiConfig::close(3)?);
///
/// // Changes: +2, −1, +2 → avg_gain = 4/3, avg_loss = 1/3, RS = 4 → RSI = 80
/// let out = rsi.compute(&[10.0, 12.0, 11.0, 13.0])?;
/// assert_eq!(out[2], None);
/// assert!((out[3].unwrap() - 80.0).abs() < 1e-9);
/// # Ok::<(), chartline_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Rsi {
    config: RsiConfig,
}

impl Rsi {
    #[inline]
    fn gain_and_loss(prev_price: Price, price: Price) -> (Price, Price) {
        let gain = (price - prev_price).max(0.0);
        let loss = (prev_price - price).max(0.0);

        (gain, loss)
    }

    #[inline]
    fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
        if avg_loss == 0.0 {
            if avg_gain == 0.0 { 50.0 } else { 100.0 }
        } else {
            let rs = avg_gain / avg_loss;
            100.0 - 100.0 / (1.0 + rs)
        }
    }
}

impl Indicator for Rsi {
    type Config = RsiConfig;
    type Output = OverlaySeries;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, prices: &[Price]) -> Result<OverlaySeries> {
        check_finite(prices)?;

        if prices.is_empty() {
            return Ok(OverlaySeries::default());
        }

        let (gains, losses): (Vec<Price>, Vec<Price>) = prices
            .windows(2)
            .map(|pair| Self::gain_and_loss(pair[0], pair[1]))
            .unzip();

        let avg_gains = PriceWindow::new(&gains, self.config.length).map(mean);
        let avg_losses = PriceWindow::new(&losses, self.config.length).map(mean);

        let overflow = first_overflow(avg_gains.iter().copied())
            .into_iter()
            .chain(first_overflow(avg_losses.iter().copied()))
            .min();
        if let Some(change) = overflow {
            return Err(IndicatorError::overflow(change + 1));
        }

        // Change j ends at price j + 1, so index 0 has no value.
        let values = std::iter::once(None)
            .chain(
                avg_gains
                    .into_iter()
                    .zip(avg_losses)
                    .map(|(gain, loss)| Some(Self::rsi_value(gain?, loss?))),
            )
            .collect();

        Ok(OverlaySeries::from_values(values))
    }
}

impl Display for Rsi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RSI({}, {})", self.config.length, self.config.source)
    }
}

/// Relative strength index of `prices` over `period` (conventionally 14).
///
/// # Errors
///
/// [`IndicatorError::InvalidParameter`] if `period` is zero,
/// [`IndicatorError::NonFinitePrice`] if a price is NaN or infinite,
/// [`IndicatorError::NumericOverflow`] if a price change leaves the `f64`
/// range.
pub fn compute_rsi(prices: &[Price], period: usize) -> Result<OverlaySeries> {
    Rsi::new(RsiConfig::builder().length(period).build()?).compute(prices)
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::test_util::{assert_approx, assert_series, candle, ramp};

    fn rsi(length: usize) -> Rsi {
        Rsi::new(RsiConfig::close(length).unwrap())
    }

    mod warm_up {
        use super::*;

        #[test]
        fn first_length_positions_are_none() {
            for length in 1..=10 {
                let out = rsi(length)
                    .compute(&[1.0, 3.0, 2.0, 5.0, 4.0, 4.5, 6.0, 1.0, 2.0, 9.0, 8.0, 7.0])
                    .unwrap();
                assert_eq!(out.len(), 12);
                assert_eq!(out.warm_up(), length, "RSI({length})");
            }
        }

        #[test]
        fn single_price_is_single_none() {
            let out = rsi(3).compute(&[10.0]).unwrap();
            assert_eq!(out.into_inner(), vec![None]);
        }

        #[test]
        fn too_few_prices_is_all_none() {
            // 14 prices = 13 changes, not enough for RSI(14)
            let out = rsi(14).compute(&ramp(14)).unwrap();
            assert_eq!(out.len(), 14);
            assert!(out.iter().all(|v| v.is_none()));
        }
    }

    mod values {
        use super::*;

        #[test]
        fn seed_rsi_computation() {
            // Changes: +2, −1, +2 → avg_gain = 4/3, avg_loss = 1/3 → RSI = 80
            let out = rsi(3).compute(&[10.0, 12.0, 11.0, 13.0]).unwrap();
            assert_approx!(out[3].unwrap(), 80.0);
        }

        #[test]
        fn uses_simple_trailing_mean_not_wilder() {
            // Changes: +2, −1, +2, −3
            // index 4 window = (−1, +2, −3): gain = 2/3, loss = 4/3, RS = 0.5
            // RSI = 100 − 100 / 1.5 = 33.333...
            let out = rsi(3).compute(&[10.0, 12.0, 11.0, 13.0, 10.0]).unwrap();
            assert_series(&out, &[None, None, None, Some(80.0), Some(100.0 / 3.0)]);
        }

        #[test]
        fn only_losses_reads_zero() {
            let out = rsi(2).compute(&[5.0, 4.0, 3.0]).unwrap();
            assert_eq!(out[2], Some(0.0));
        }

        #[test]
        fn length_one_uses_single_change() {
            let out = rsi(1).compute(&[10.0, 11.0, 9.0, 9.0]).unwrap();
            assert_eq!(
                out.into_inner(),
                vec![None, Some(100.0), Some(0.0), Some(50.0)]
            );
        }

        #[test]
        fn stays_within_bounds() {
            let prices = [
                100.0, 102.0, 99.0, 101.0, 98.0, 103.0, 97.0, 105.0, 96.0, 104.0, 50.0, 150.0,
            ];
            let out = rsi(3).compute(&prices).unwrap();
            for value in out.iter().flatten() {
                assert!((0.0..=100.0).contains(&value), "RSI out of bounds: {value}");
            }
        }
    }

    mod zero_loss {
        use super::*;

        #[test]
        fn strictly_increasing_series_reads_100() {
            let out = compute_rsi(&ramp(15), 14).unwrap();
            assert_eq!(out.len(), 15);
            assert_eq!(out.warm_up(), 14);
            assert_eq!(out[14], Some(100.0));
        }

        #[test]
        fn flat_window_reads_50() {
            let out = rsi(3).compute(&[10.0, 10.0, 10.0, 10.0, 10.0]).unwrap();
            assert_eq!(
                out.into_inner(),
                vec![None, None, None, Some(50.0), Some(50.0)]
            );
        }

        #[test]
        fn never_emits_nan() {
            let prices = [1.0, 1.0, 2.0, 2.0, 2.0, 2.0, 1.0, 1.0];
            let out = rsi(2).compute(&prices).unwrap();
            assert!(out.iter().flatten().all(f64::is_finite));
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn empty_series_is_empty_output() {
            assert!(compute_rsi(&[], 14).unwrap().is_empty());
        }

        #[test]
        fn zero_period_is_rejected() {
            assert!(matches!(
                compute_rsi(&[1.0, 2.0], 0),
                Err(IndicatorError::InvalidParameter { .. })
            ));
        }

        #[test]
        fn nan_price_is_rejected() {
            assert!(matches!(
                compute_rsi(&[1.0, 2.0, f64::NAN], 2),
                Err(IndicatorError::NonFinitePrice { index: 2, .. })
            ));
        }

        #[test]
        fn overflowing_changes_are_rejected() {
            // Both average gain and average loss are infinite at index 2.
            assert_eq!(
                compute_rsi(&[f64::MAX, -f64::MAX, f64::MAX], 2),
                Err(IndicatorError::NumericOverflow { index: 2 })
            );
        }

        #[test]
        fn overflow_is_reported_at_first_full_window() {
            let prices = [1.0, f64::MAX, -f64::MAX, 1.0, 2.0];
            assert_eq!(
                compute_rsi(&prices, 3),
                Err(IndicatorError::NumericOverflow { index: 3 })
            );
        }

        #[test]
        fn repeated_calls_are_identical() {
            let prices = [1.1, 2.7, 3.3, 0.4, 9.9, 2.2, 4.8, 4.1];
            assert_eq!(compute_rsi(&prices, 3), compute_rsi(&prices, 3));
        }
    }

    #[test]
    fn candles_use_close_by_default() {
        let candles = [candle(10.0, 1), candle(12.0, 2), candle(11.0, 3)];
        let out = rsi(2).compute_ohlcv(&candles).unwrap();
        // +2, −1 → RS = 2 → 66.666...
        assert_approx!(out[2].unwrap(), 200.0 / 3.0);
    }

    #[test]
    fn display() {
        assert_eq!(rsi(14).to_string(), "RSI(14, Close)");
        assert_eq!(
            RsiConfig::close(14).unwrap().to_string(),
            "RsiConfig(14, Close)"
        );
    }
}
