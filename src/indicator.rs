use crate::{Ohlcv, Price, PriceSource, Result, price_series};

use std::{
    fmt::{Debug, Display},
    hash::Hash,
};

/// Configuration for a technical [`Indicator`].
///
/// Every indicator has a corresponding config type that holds its parameters
/// (length, price source, etc). Configs are value types: cheap to clone,
/// compare, and hash. A config that exists has already been validated.
pub trait IndicatorConfig: Sized + PartialEq + Eq + Hash + Display + Debug {
    /// Builder type for constructing this config.
    type Builder: IndicatorConfigBuilder<Self>;

    /// Returns a new builder with default values.
    fn builder() -> Self::Builder;

    /// Window length (number of candles).
    fn length(&self) -> usize;

    /// Price source to extract from each candle.
    fn source(&self) -> &PriceSource;
}

/// Builder for an [`IndicatorConfig`].
pub trait IndicatorConfigBuilder<Config>
where
    Config: IndicatorConfig,
{
    /// Sets the indicator window length.
    #[must_use]
    fn length(self, length: usize) -> Self;

    /// Sets the price source.
    #[must_use]
    fn source(self, source: PriceSource) -> Self;

    /// Validates and builds the config.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`](crate::IndicatorError::InvalidParameter)
    /// when the length is missing or zero, or another parameter is out of
    /// range.
    fn build(self) -> Result<Config>;
}

/// A batch technical indicator.
///
/// Indicators are immutable: [`compute`](Indicator::compute) reads the whole
/// price series and returns output index-aligned with it. Calling it twice
/// on the same input yields bit-identical results.
///
/// # Example
///
/// ```
/// use chartline_ta::{Indicator, IndicatorConfig, IndicatorConfigBuilder, Sma, SmaConfig};
///
/// let sma = Sma::new(SmaConfig::builder().length(3).build()?);
/// let overlay = sma.compute(&[10.0, 20.0, 30.0, 40.0])?;
///
/// assert_eq!(overlay.into_inner(), vec![None, None, Some(20.0), Some(30.0)]);
/// # Ok::<(), chartline_ta::IndicatorError>(())
/// ```
pub trait Indicator: Sized + Clone + Display + Debug {
    /// Configuration type for this indicator.
    type Config: IndicatorConfig;

    /// Computed output type. [`OverlaySeries`](crate::OverlaySeries) for
    /// single-line indicators, a struct for composite ones (MACD, Bollinger
    /// Bands).
    type Output: Send + Sync + Debug;

    /// Creates a new indicator from a validated config.
    fn new(config: Self::Config) -> Self;

    /// The config this indicator was built from.
    fn config(&self) -> &Self::Config;

    /// Computes the indicator over `prices`.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::NonFinitePrice`](crate::IndicatorError::NonFinitePrice)
    /// if any price is NaN or infinite.
    fn compute(&self, prices: &[Price]) -> Result<Self::Output>;

    /// Extracts the configured [`PriceSource`] from `candles` and computes
    /// the indicator over it.
    ///
    /// # Errors
    ///
    /// Same as [`compute`](Indicator::compute).
    fn compute_ohlcv<C: Ohlcv>(&self, candles: &[C]) -> Result<Self::Output> {
        self.compute(&price_series(candles, *self.config().source()))
    }
}
