use std::{
    fmt::Display,
    hash::{Hash, Hasher},
};

use crate::{
    Indicator, IndicatorConfig, IndicatorConfigBuilder, OverlaySeries, Price, PriceSource, Result,
    error::{IndicatorError, check_computed, check_finite, check_period, first_overflow},
    price_window::{PriceWindow, mean, population_variance},
};

/// Standard deviation multiplier for Bollinger Bands.
///
/// Wraps a positive, finite `f64`. Defaults to `2.0` (the standard
/// Bollinger Bands setting).
///
/// Implements `Eq` and `Hash` via bit-level comparison, which is safe because
/// NaN is rejected at construction.
#[derive(Clone, Copy, Debug)]
pub struct StdDev(f64);

impl StdDev {
    /// Creates a new standard deviation multiplier.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] if `value` is zero, negative,
    /// NaN or infinite.
    pub fn new(value: f64) -> Result<Self> {
        if !value.is_finite() {
            return Err(IndicatorError::invalid("std_dev", "must be finite"));
        }
        if value <= 0.0 {
            return Err(IndicatorError::invalid("std_dev", "must be positive"));
        }
        Ok(Self(value))
    }

    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl PartialEq for StdDev {
    fn eq(&self, other: &Self) -> bool {
        self.0.to_bits() == other.0.to_bits()
    }
}

impl Eq for StdDev {}

impl Hash for StdDev {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.to_bits().hash(state);
    }
}

impl Default for StdDev {
    fn default() -> Self {
        Self(2.0)
    }
}

/// Configuration for the Bollinger Bands ([`Bb`]) indicator.
///
/// # Example
///
/// ```
/// use chartline_ta::{BbConfig, IndicatorConfig, IndicatorConfigBuilder};
///
/// // Default: close, 2.0 std devs
/// let config = BbConfig::builder().length(20).build()?;
///
/// assert_eq!(config.length(), 20);
/// assert_eq!(config.std_dev().value(), 2.0);
/// # Ok::<(), chartline_ta::IndicatorError>(())
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct BbConfig {
    length: usize,
    source: PriceSource,
    std_dev: StdDev,
}

impl IndicatorConfig for BbConfig {
    type Builder = BbConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        BbConfigBuilder::new()
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

impl BbConfig {
    /// Standard deviation multiplier for the upper and lower bands.
    #[inline]
    #[must_use]
    pub fn std_dev(&self) -> StdDev {
        self.std_dev
    }

    /// BB(20, Close, 2σ), the standard Bollinger Bands setting.
    #[must_use]
    pub fn default_20() -> Self {
        Self {
            length: 20,
            source: PriceSource::Close,
            std_dev: StdDev::default(),
        }
    }

    /// BB with custom length and multiplier on close price.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] if `length` is zero or
    /// `std_dev` is not a positive finite number.
    pub fn close(length: usize, std_dev: f64) -> Result<Self> {
        Self::builder()
            .length(length)
            .std_dev(StdDev::new(std_dev)?)
            .build()
    }
}

impl Display for BbConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BbConfig({}, {}, {})",
            self.length,
            self.source,
            self.std_dev.value()
        )
    }
}

/// Builder for [`BbConfig`].
///
/// Defaults: source = [`PriceSource::Close`],
/// `std_dev` = `2.0`.
/// Length must be set before calling
/// [`build`](IndicatorConfigBuilder::build).
pub struct BbConfigBuilder {
    length: Option<usize>,
    source: PriceSource,
    std_dev: StdDev,
}

impl BbConfigBuilder {
    fn new() -> Self {
        Self {
            length: None,
            source: PriceSource::Close,
            std_dev: StdDev::default(),
        }
    }

    #[inline]
    #[must_use]
    pub fn std_dev(mut self, std_dev: StdDev) -> Self {
        self.std_dev = std_dev;
        self
    }
}

impl IndicatorConfigBuilder<BbConfig> for BbConfigBuilder {
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

    fn build(self) -> Result<BbConfig> {
        let length = self
            .length
            .ok_or_else(|| IndicatorError::invalid("length", "length is required"))?;

        Ok(BbConfig {
            length: check_period("length", length)?,
            source: self.source,
            std_dev: self.std_dev,
        })
    }
}

/// Bollinger Bands output: upper, middle, and lower bands, each
/// index-aligned with the input.
///
/// The middle band is the SMA. Upper and lower bands are offset by
/// `k × σ`, where `σ` is the population standard deviation of the window.
///
/// ```text
/// upper  = SMA + k × σ
/// middle = SMA
/// lower  = SMA − k × σ
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BbSeries {
    upper: OverlaySeries,
    middle: OverlaySeries,
    lower: OverlaySeries,
}

impl BbSeries {
    /// Upper band: `SMA + k × σ`.
    #[inline]
    #[must_use]
    pub fn upper(&self) -> &OverlaySeries {
        &self.upper
    }

    /// Middle band: SMA of the window.
    #[inline]
    #[must_use]
    pub fn middle(&self) -> &OverlaySeries {
        &self.middle
    }

    /// Lower band: `SMA − k × σ`.
    #[inline]
    #[must_use]
    pub fn lower(&self) -> &OverlaySeries {
        &self.lower
    }

    /// Band width: `upper − lower`.
    ///
    /// Useful for measuring volatility. Narrow width indicates
    /// consolidation (Bollinger squeeze); wide width indicates
    /// high volatility.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::NumericOverflow`] if the bands are too far apart
    /// to subtract.
    pub fn width(&self) -> Result<OverlaySeries> {
        let width = self.upper.zip_sub(&self.lower);
        check_computed(width.iter())?;
        Ok(width)
    }

    #[must_use]
    pub fn into_parts(self) -> (OverlaySeries, OverlaySeries, OverlaySeries) {
        (self.upper, self.middle, self.lower)
    }
}

/// Bollinger Bands (BB).
///
/// A volatility indicator consisting of three bands: a simple moving average
/// (middle) with upper and lower bands offset by a configurable number of
/// population standard deviations (divisor `length`, not `length − 1`).
///
/// All three bands are `None` until the window is full. The middle band is
/// bit-identical to [`compute_sma`](crate::compute_sma) with the same length.
///
/// # Example
///
/// ```
/// use chartline_ta::{Bb, BbConfig, Indicator};
///
/// let bb = Bb::new(BbConfig::close(3, 2.0)?);
/// let out = bb.compute(&[1.0, 2.0, 3.0, 4.0])?;
///
/// assert_eq!(out.middle().as_slice(), &[None, None, Some(2.0), Some(3.0)]);
/// assert!(out.upper()[2].unwrap() > 2.0);
/// # Ok::<(), chartline_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Bb {
    config: BbConfig,
}

impl Indicator for Bb {
    type Config = BbConfig;
    type Output = BbSeries;

    fn new(config: Self::Config) -> Self {
        Self { config }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, prices: &[Price]) -> Result<BbSeries> {
        check_finite(prices)?;

        let multiplier = self.config.std_dev.value();
        let bands = PriceWindow::new(prices, self.config.length).map(|window| {
            let middle = mean(window);
            let offset = multiplier * population_variance(window, middle).sqrt();
            (middle + offset, middle, middle - offset)
        });

        let mut upper = Vec::with_capacity(bands.len());
        let mut middle = Vec::with_capacity(bands.len());
        let mut lower = Vec::with_capacity(bands.len());
        for band in bands {
            upper.push(band.map(|b| b.0));
            middle.push(band.map(|b| b.1));
            lower.push(band.map(|b| b.2));
        }

        let overflow = [
            first_overflow(upper.iter().copied()),
            first_overflow(middle.iter().copied()),
            first_overflow(lower.iter().copied()),
        ]
        .into_iter()
        .flatten()
        .min();
        if let Some(index) = overflow {
            return Err(IndicatorError::overflow(index));
        }

        Ok(BbSeries {
            upper: OverlaySeries::from_values(upper),
            middle: OverlaySeries::from_values(middle),
            lower: OverlaySeries::from_values(lower),
        })
    }
}

impl Display for Bb {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "BB({}, {}, {})",
            self.config.length,
            self.config.source,
            self.config.std_dev.value(),
        )
    }
}

/// Bollinger Bands of `prices` (conventionally period 20, 2 standard
/// deviations).
///
/// # Errors
///
/// [`IndicatorError::InvalidParameter`] if `period` is zero or `std_dev` is
/// not a positive finite number, [`IndicatorError::NonFinitePrice`] if a
/// price is NaN or infinite, [`IndicatorError::NumericOverflow`] if a
/// window's sum or variance leaves the `f64` range.
pub fn compute_bollinger_bands(prices: &[Price], period: usize, std_dev: f64) -> Result<BbSeries> {
    Bb::new(BbConfig::close(period, std_dev)?).compute(prices)
}
