use std::fmt::Display;

use crate::{
    Ema, EmaConfig, Indicator, IndicatorConfig, IndicatorConfigBuilder, OverlaySeries, Price,
    PriceSource, Result,
    error::{IndicatorError, check_finite, check_period, first_overflow},
};

/// Configuration for the [`Macd`] indicator.
///
/// [`length`](IndicatorConfig::length) reports the slow period, the longest
/// EMA the indicator runs over prices.
///
/// # Example
///
/// ```
/// use chartline_ta::{IndicatorConfig, MacdConfig};
///
/// let config = MacdConfig::standard();
/// assert_eq!((config.fast(), config.slow(), config.signal()), (12, 26, 9));
/// assert_eq!(config.length(), 26);
/// ```
#[derive(PartialEq, Eq, Hash, Clone, Copy, Debug)]
pub struct MacdConfig {
    fast: usize,
    slow: usize,
    signal: usize,
    source: PriceSource,
}

impl IndicatorConfig for MacdConfig {
    type Builder = MacdConfigBuilder;

    #[inline]
    fn builder() -> Self::Builder {
        MacdConfigBuilder::new()
    }

    #[inline]
    fn length(&self) -> usize {
        self.slow
    }

    #[inline]
    fn source(&self) -> &PriceSource {
        &self.source
    }
}

impl MacdConfig {
    /// MACD(12, 26, 9) on closing price.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            fast: 12,
            slow: 26,
            signal: 9,
            source: PriceSource::Close,
        }
    }

    /// MACD on closing price with custom periods.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] if any period is zero.
    pub fn close(fast: usize, slow: usize, signal: usize) -> Result<Self> {
        Self::builder()
            .fast(fast)
            .slow(slow)
            .signal(signal)
            .build()
    }

    #[inline]
    #[must_use]
    pub fn fast(&self) -> usize {
        self.fast
    }

    #[inline]
    #[must_use]
    pub fn slow(&self) -> usize {
        self.slow
    }

    #[inline]
    #[must_use]
    pub fn signal(&self) -> usize {
        self.signal
    }
}

impl Display for MacdConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MacdConfig({}, {}, {}, {})",
            self.fast, self.slow, self.signal, self.source
        )
    }
}

/// Builder for [`MacdConfig`].
///
/// Defaults: source = [`PriceSource::Close`]. All three periods must be
/// set; [`length`](IndicatorConfigBuilder::length) is an alias for
/// [`slow`](MacdConfigBuilder::slow).
///
/// Fast and slow are not required to be ordered: `fast > slow` simply
/// flips the sign of the MACD line.
pub struct MacdConfigBuilder {
    fast: Option<usize>,
    slow: Option<usize>,
    signal: Option<usize>,
    source: PriceSource,
}

impl MacdConfigBuilder {
    fn new() -> Self {
        Self {
            fast: None,
            slow: None,
            signal: None,
            source: PriceSource::Close,
        }
    }

    #[inline]
    #[must_use]
    pub fn fast(mut self, fast: usize) -> Self {
        self.fast = Some(fast);
        self
    }

    #[inline]
    #[must_use]
    pub fn slow(mut self, slow: usize) -> Self {
        self.slow = Some(slow);
        self
    }

    #[inline]
    #[must_use]
    pub fn signal(mut self, signal: usize) -> Self {
        self.signal = Some(signal);
        self
    }
}

impl IndicatorConfigBuilder<MacdConfig> for MacdConfigBuilder {
    #[inline]
    fn length(self, length: usize) -> Self {
        self.slow(length)
    }

    #[inline]
    fn source(mut self, source: PriceSource) -> Self {
        self.source = source;
        self
    }

    fn build(self) -> Result<MacdConfig> {
        let required = |name: &'static str, value: Option<usize>| {
            value
                .ok_or_else(|| IndicatorError::invalid(name, format!("{name} is required")))
                .and_then(|v| check_period(name, v))
        };

        Ok(MacdConfig {
            fast: required("fast", self.fast)?,
            slow: required("slow", self.slow)?,
            signal: required("signal", self.signal)?,
            source: self.source,
        })
    }
}

/// MACD output: MACD line, signal line and histogram, each index-aligned
/// with the input.
///
/// ```text
/// macd      = EMA(fast) − EMA(slow)
/// signal    = EMA(signal) over the macd line
/// histogram = macd − signal
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct MacdSeries {
    macd: OverlaySeries,
    signal: OverlaySeries,
    histogram: OverlaySeries,
}

impl MacdSeries {
    /// MACD line: `EMA(fast) − EMA(slow)`.
    #[inline]
    #[must_use]
    pub fn macd(&self) -> &OverlaySeries {
        &self.macd
    }

    /// Signal line: EMA of the MACD line.
    #[inline]
    #[must_use]
    pub fn signal(&self) -> &OverlaySeries {
        &self.signal
    }

    /// Histogram: `macd − signal`.
    #[inline]
    #[must_use]
    pub fn histogram(&self) -> &OverlaySeries {
        &self.histogram
    }

    #[must_use]
    pub fn into_parts(self) -> (OverlaySeries, OverlaySeries, OverlaySeries) {
        (self.macd, self.signal, self.histogram)
    }
}

/// Moving Average Convergence Divergence (MACD).
///
/// Both EMAs are seeded from the first price (see [`Ema`]), so the MACD
/// line, signal line and histogram are defined from index 0. The signal
/// line reuses the same EMA recursion, applied to the MACD line instead of
/// prices.
///
/// # Example
///
/// ```
/// use chartline_ta::{Indicator, Macd, MacdConfig};
///
/// let macd = Macd::new(MacdConfig::close(2, 4, 3)?);
/// let out = macd.compute(&[10.0, 11.0, 12.0, 11.0, 13.0])?;
///
/// assert_eq!(out.macd().len(), 5);
/// assert_eq!(out.macd()[0], Some(0.0));
/// assert_eq!(out.signal().warm_up(), 0);
/// # Ok::<(), chartline_ta::IndicatorError>(())
/// ```
#[derive(Clone, Debug)]
pub struct Macd {
    config: MacdConfig,
    fast: Ema,
    slow: Ema,
    signal: Ema,
}

impl Macd {
    fn ema(length: usize, source: PriceSource) -> Ema {
        Ema::new(EmaConfig::from_checked(length, source))
    }
}

impl Indicator for Macd {
    type Config = MacdConfig;
    type Output = MacdSeries;

    fn new(config: Self::Config) -> Self {
        Self {
            config,
            fast: Self::ema(config.fast, config.source),
            slow: Self::ema(config.slow, config.source),
            signal: Self::ema(config.signal, config.source),
        }
    }

    #[inline]
    fn config(&self) -> &Self::Config {
        &self.config
    }

    fn compute(&self, prices: &[Price]) -> Result<MacdSeries> {
        check_finite(prices)?;

        let fast = self.fast.smooth(prices);
        let slow = self.slow.smooth(prices);
        let line: Vec<Price> = fast.iter().zip(&slow).map(|(f, s)| f - s).collect();
        let signal = self.signal.smooth(&line);

        let macd = OverlaySeries::defined(line);
        let signal = OverlaySeries::defined(signal);
        let histogram = macd.zip_sub(&signal);

        let overflow = [
            first_overflow(macd.iter()),
            first_overflow(signal.iter()),
            first_overflow(histogram.iter()),
        ]
        .into_iter()
        .flatten()
        .min();
        if let Some(index) = overflow {
            return Err(IndicatorError::overflow(index));
        }

        Ok(MacdSeries {
            macd,
            signal,
            histogram,
        })
    }
}

impl Display for Macd {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "MACD({}, {}, {}, {})",
            self.config.fast, self.config.slow, self.config.signal, self.config.source
        )
    }
}

/// MACD of `prices` (conventionally 12, 26, 9).
///
/// # Errors
///
/// [`IndicatorError::InvalidParameter`] if any period is zero,
/// [`IndicatorError::NonFinitePrice`] if a price is NaN or infinite,
/// [`IndicatorError::NumericOverflow`] if the fast and slow averages are
/// too far apart to subtract.
pub fn compute_macd(
    prices: &[Price],
    fast_period: usize,
    slow_period: usize,
    signal_period: usize,
) -> Result<MacdSeries> {
    Macd::new(MacdConfig::close(fast_period, slow_period, signal_period)?).compute(prices)
}
