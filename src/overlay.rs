//! Assembly of named, chart-ready overlay series.
//!
//! The dashboard keeps a set of active indicator toggles; here that set is
//! just a slice of [`IndicatorKind`] passed per redraw. Nothing is cached
//! between calls.

use std::{fmt::Display, str::FromStr};

use tracing::debug;

use crate::{
    Bb, Ema, Indicator, IndicatorError, IndicatorParams, Macd, Ohlcv, OverlaySeries, Price,
    PriceSource, Result, Rsi, Sma, Timestamp, error::check_finite, price_series,
};

/// Indicators the chart can overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "lowercase")
)]
pub enum IndicatorKind {
    Sma,
    Ema,
    Rsi,
    Macd,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "bb", alias = "bollinger", alias = "bollinger_bands")
    )]
    BollingerBands,
}

impl IndicatorKind {
    /// Every kind, in chart legend order.
    pub const ALL: [Self; 5] = [
        Self::Sma,
        Self::Ema,
        Self::Rsi,
        Self::Macd,
        Self::BollingerBands,
    ];
}

impl Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Sma => "sma",
            Self::Ema => "ema",
            Self::Rsi => "rsi",
            Self::Macd => "macd",
            Self::BollingerBands => "bb",
        };
        f.write_str(name)
    }
}

impl FromStr for IndicatorKind {
    type Err = IndicatorError;

    /// Parses the toggle names used by the dashboard, case-insensitively.
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sma" => Ok(Self::Sma),
            "ema" => Ok(Self::Ema),
            "rsi" => Ok(Self::Rsi),
            "macd" => Ok(Self::Macd),
            "bb" | "bollinger" | "bollinger_bands" => Ok(Self::BollingerBands),
            other => Err(IndicatorError::invalid(
                "indicator",
                format!("unknown indicator `{other}`"),
            )),
        }
    }
}

/// One labelled line for the charting surface.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct NamedOverlay {
    pub kind: IndicatorKind,
    pub name: String,
    pub series: OverlaySeries,
}

impl NamedOverlay {
    fn new(kind: IndicatorKind, name: String, series: OverlaySeries) -> Self {
        Self { kind, name, series }
    }
}

/// Computes every requested indicator over `prices`.
///
/// Parameters are validated up front, before any indicator runs, so a bad
/// record never yields a partial result. Duplicate kinds are computed once;
/// the output keeps the order in which kinds first appear in `active`.
/// Composite indicators expand into several overlays: MACD into line,
/// signal and histogram; Bollinger Bands into upper, middle and lower.
///
/// # Errors
///
/// [`IndicatorError::InvalidParameter`] if `params` fails validation,
/// [`IndicatorError::NonFinitePrice`] if a price is NaN or infinite,
/// [`IndicatorError::NumericOverflow`] if an active indicator's output
/// leaves the `f64` range.
///
/// # Example
///
/// ```
/// use chartline_ta::{IndicatorKind, IndicatorParams, compute_overlays};
///
/// let prices: Vec<f64> = (1..=30).map(f64::from).collect();
/// let overlays = compute_overlays(
///     &prices,
///     &IndicatorParams::standard(),
///     &[IndicatorKind::Sma, IndicatorKind::Rsi],
/// )?;
///
/// let names: Vec<_> = overlays.iter().map(|o| o.name.as_str()).collect();
/// assert_eq!(names, ["SMA(20)", "RSI(14)"]);
/// assert!(overlays.iter().all(|o| o.series.len() == prices.len()));
/// # Ok::<(), chartline_ta::IndicatorError>(())
/// ```
#[tracing::instrument(level = "debug", skip(prices, params), fields(len = prices.len()))]
pub fn compute_overlays(
    prices: &[Price],
    params: &IndicatorParams,
    active: &[IndicatorKind],
) -> Result<Vec<NamedOverlay>> {
    params.validate()?;
    check_finite(prices)?;

    let mut seen = Vec::with_capacity(active.len());
    let mut overlays = Vec::new();

    for &kind in active {
        if seen.contains(&kind) {
            continue;
        }
        seen.push(kind);

        match kind {
            IndicatorKind::Sma => {
                let series = Sma::new(params.sma()?).compute(prices)?;
                let name = format!("SMA({})", params.sma_period);
                overlays.push(NamedOverlay::new(kind, name, series));
            }
            IndicatorKind::Ema => {
                let series = Ema::new(params.ema()?).compute(prices)?;
                let name = format!("EMA({})", params.ema_period);
                overlays.push(NamedOverlay::new(kind, name, series));
            }
            IndicatorKind::Rsi => {
                let series = Rsi::new(params.rsi()?).compute(prices)?;
                let name = format!("RSI({})", params.rsi_period);
                overlays.push(NamedOverlay::new(kind, name, series));
            }
            IndicatorKind::Macd => {
                let (macd, signal, histogram) =
                    Macd::new(params.macd()?).compute(prices)?.into_parts();
                let label = format!(
                    "{},{},{}",
                    params.macd_fast, params.macd_slow, params.macd_signal
                );
                overlays.push(NamedOverlay::new(kind, format!("MACD({label})"), macd));
                overlays.push(NamedOverlay::new(
                    kind,
                    format!("MACD signal({label})"),
                    signal,
                ));
                overlays.push(NamedOverlay::new(
                    kind,
                    format!("MACD histogram({label})"),
                    histogram,
                ));
            }
            IndicatorKind::BollingerBands => {
                let (upper, middle, lower) =
                    Bb::new(params.bollinger()?).compute(prices)?.into_parts();
                let label = format!("{},{}", params.bb_period, params.bb_std_dev);
                overlays.push(NamedOverlay::new(kind, format!("BB upper({label})"), upper));
                overlays.push(NamedOverlay::new(
                    kind,
                    format!("BB middle({label})"),
                    middle,
                ));
                overlays.push(NamedOverlay::new(kind, format!("BB lower({label})"), lower));
            }
        }
    }

    debug!(
        kinds = seen.len(),
        overlays = overlays.len(),
        "assembled chart overlays"
    );

    Ok(overlays)
}

/// Everything a chart redraw needs: labels, the price line, and the
/// overlays, all of the same length.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartDataset {
    pub timestamps: Vec<Timestamp>,
    pub prices: Vec<Price>,
    pub overlays: Vec<NamedOverlay>,
}

impl ChartDataset {
    /// Extracts `source` from `candles` and computes the `active` overlays
    /// over it.
    ///
    /// # Errors
    ///
    /// Same as [`compute_overlays`].
    ///
    /// # Example
    ///
    /// ```
    /// use chartline_ta::{Candle, ChartDataset, IndicatorKind, IndicatorParams, PriceSource};
    ///
    /// let candles: Vec<Candle> = (0..40u32)
    ///     .map(|i| {
    ///         let c = 100.0 + f64::from(i % 7);
    ///         Candle::new(c, c + 1.0, c - 1.0, c).at(u64::from(i) * 3_600)
    ///     })
    ///     .collect();
    ///
    /// let chart = ChartDataset::from_candles(
    ///     &candles,
    ///     PriceSource::Close,
    ///     &IndicatorParams::standard(),
    ///     &[IndicatorKind::BollingerBands],
    /// )?;
    ///
    /// assert_eq!(chart.len(), 40);
    /// assert_eq!(chart.overlays.len(), 3);
    /// # Ok::<(), chartline_ta::IndicatorError>(())
    /// ```
    pub fn from_candles<C: Ohlcv>(
        candles: &[C],
        source: PriceSource,
        params: &IndicatorParams,
        active: &[IndicatorKind],
    ) -> Result<Self> {
        let prices = price_series(candles, source);
        let overlays = compute_overlays(&prices, params, active)?;

        Ok(Self {
            timestamps: candles.iter().map(Ohlcv::timestamp).collect(),
            prices,
            overlays,
        })
    }

    /// Number of chart points.
    #[must_use]
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    /// First overlay with the given name.
    #[must_use]
    pub fn overlay(&self, name: &str) -> Option<&OverlaySeries> {
        self.overlays
            .iter()
            .find(|o| o.name == name)
            .map(|o| &o.series)
    }
}
