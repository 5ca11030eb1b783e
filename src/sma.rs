use std::fmt::Display;

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, OverlaySeries, Price, PriceSource, Result,
    error::{IndicatorError, check_computed, check_finite, check_period},
    price_window::PriceWindow,
};

/// Configuration for the Simple Moving Average ([`Sma`]) indicator.
///
/// # Example
///
/// ```rust
/// use chartline_ta::{IndicatorConfig, SmaConfig};
///
/// let config = SmaConfig::close(20)?;
/// assert_eq!(config.length(), 20);
/// # Ok::<(), chartline_ta::IndicatorError>(())
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct SmaConfig {
    length: usize,
    source: PriceSource,
}

impl IndicatorConfig for SmaConfig {
    type Builder = SmaConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        SmaConfigBuilder::new()
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

impl SmaConfig {
    /// SMA on closing price.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] if `length` is zero.
    pub fn close(length: usize) -> Result<Self> {
        Self::builder().length(length).build()
    }

    /// SMA on median price: `(high + low) / 2`.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] if `length` is zero.
    pub fn hl2(length: usize) -> Result<Self> {
        Self::builder()
            .length(length)
            .source(PriceSource::HL2)
            .build()
    }
}

impl Display for SmaConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SmaConfig({}, {})", self.length, self.source)
    }
}

/// Builder for [`SmaConfig`].
///
/// Defaults: source = [`PriceSource::Close`].
/// Length must be set before calling [`build`](IndicatorConfigBuilder::build).
pub struct SmaConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
}

impl SmaConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
        }
    }
}

impl IndicatorConfigBuilder<SmaConfig> for SmaConfigBuilder {
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

    fn build(self) -> Result<SmaConfig> {
        let length = self
            .length
            .ok_or_else(|| IndicatorError::invalid("length", "length is required"))?;

        Ok(SmaConfig {
            length: check_period("length", length)?,
            source: self.source,
        })
    }
}

/// Simple Moving Average (SMA).
///
/// Position `i` holds the unweighted mean of `prices[i + 1 - length ..= i]`.
/// The first `length - 1` positions are `None`; a length longer than the
/// series leaves the whole output `None`.
///
/// # Example
///
/// ```rust
/// use chartline_ta::{Indicator, Sma, SmaConfig};
///
/// let sma = Sma::new(SmaConfig::close(3)?);
/// let out = sma.compute(&[10.0, 20.0, 30.0, 40.0, 50.0])?;
///
/// assert_eq!(out.into_inner(), vec![None, None, Some(20.0), Some(30.0), Some(40.0)]);
/// # Ok::<(), chartline_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Sma {
    config: SmaConfig,
}

impl Indicator for Sma {
    type Config = SmaConfig;
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

        let means = PriceWindow::new(prices, self.config.length).means();
        check_computed(means.iter().copied())?;

        Ok(OverlaySeries::from_values(means))
    }
}

impl Display for Sma {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SMA({}, {})", self.config.length, self.config.source)
    }
}

/// Simple moving average of `prices` over `period`.
///
/// # Errors
///
/// [`IndicatorError::InvalidParameter`] if `period` is zero,
/// [`IndicatorError::NonFinitePrice`] if a price is NaN or infinite,
/// [`IndicatorError::NumericOverflow`] if a window sum leaves the `f64` range.
pub fn compute_sma(prices: &[Price], period: usize) -> Result<OverlaySeries> {
    Sma::new(SmaConfig::builder().length(period).build()?).compute(prices)
}
