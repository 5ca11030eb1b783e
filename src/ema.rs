use std::fmt::Display;

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, OverlaySeries, Price, PriceSource, Result,
    error::{IndicatorError, check_computed, check_finite, check_period},
};

/// Configuration for the Exponential Moving Average ([`Ema`]) indicator.
///
/// # Example
///
/// ```
/// use chartline_ta::{EmaConfig, IndicatorConfig};
///
/// let config = EmaConfig::close(12)?;
/// assert_eq!(config.length(), 12);
/// # Ok::<(), chartline_ta::IndicatorError>(())
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct EmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for EmaConfig {
    type Builder = EmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        EmaConfigBuilder::new()
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

impl EmaConfig {
    /// EMA on closing price.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] if `length` is zero.
    pub fn close(length: usize) -> Result<Self> {
        Self::builder().length(length).build()
    }

    /// Config for a length a composite indicator has already validated.
    pub(crate) fn from_checked(length: usize, source: PriceSource) -> Self {
        debug_assert!(length > 0);
        Self { length, source }
    }

    /// Smoothing factor `k = 2 / (length + 1)`.
    #[inline]
    #[must_use]
    pub fn multiplier(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let denominator = self.length as f64 + 1.0;
        2.0 / denominator
    }
}

impl Display for EmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EmaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`EmaConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct EmaConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl EmaConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
        }
    }
}

impl IndicatorConfigBuilder<EmaConfig> for EmaConfigBuilder {
    #[inline]
    fn length(mut self, length: usize) -> Self {
        self.length.replace(length);
        self
    }

    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    fn build(self) -> Result<EmaConfig> {
        let length = self
            .length
            .ok_or_else(|| IndicatorError::invalid("length", "length is required"))?;

        Ok(EmaConfig {
            length: check_period("length", length)?,
            source: self.source,
        })
    }
}

/// Exponential Moving Average (EMA).
///
/// A weighted moving average that gives more weight to recent
/// prices. Uses the standard smoothing factor `k = 2 / (length + 1)`:
///
/// ```text
/// EMA[0] = price[0]
/// EMA[i] = price[i] × k + EMA[i − 1] × (1 − k)
/// ```
///
/// Unlike [`Sma`](crate::Sma), the EMA is seeded with the first raw price,
/// so every position is defined and the output never contains `None`.
/// [`Macd`](crate::Macd) relies on this.
///
/// # Example
///
/// ```
/// use chartline_ta::{Ema, EmaConfig, Indicator};
///
/// let ema = Ema::new(EmaConfig::close(3)?);
///
/// // k = 0.5: 2, 2 × 0.5 + 4 × 0.5 = 3, 3 × 0.5 + 8 × 0.5 = 5.5
/// let out = ema.compute(&[2.0, 4.0, 8.0])?;
/// assert_eq!(out.into_inner(), vec![Some(2.0), Some(3.0), Some(5.5)]);
/// # Ok::<(), chartline_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Ema {
    config: EmaConfig,
    multiplier: f64,
}

impl Ema {
    /// EMA recursion over an already-validated series.
    pub(crate) fn smooth(&self, values: &[Price]) -> Vec<Price> {
        let k = self.multiplier;
        let mut out = Vec::with_capacity(values.len());

        let mut previous = None;
        for &value in values {
            let next = match previous {
                None => value,
                Some(prev) => value * k + prev * (1.0 - k),
            };
            out.push(next);
            previous = Some(next);
        }

        out
    }
}

impl Indicator for Ema {
    type Config = EmaConfig;
    type Output = OverlaySeries;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            multiplier: config.multiplier(),
        }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, prices: &[Price]) -> Result<OverlaySeries> {
        check_finite(prices)?;

        let smoothed = self.smooth(prices);
        check_computed(smoothed.iter().copied().map(Some))?;

        Ok(OverlaySeries::defined(smoothed))
    }
}

impl Display for Ema {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "EMA({}, {})", self.config.length, self.config.source)
    }
}

/// Exponential moving average of `prices` over `period`.
///
/// # Errors
///
/// [`IndicatorError::InvalidParameter`] if `period` is zero,
/// [`IndicatorError::NonFinitePrice`] if a price is NaN or infinite,
/// [`IndicatorError::NumericOverflow`] if the average leaves the `f64` range.
pub fn compute_ema(prices: &[Price], period: usize) -> Result<OverlaySeries> {
    Ema::new(EmaConfig::builder().length(period).build()?).compute(prices)
}
