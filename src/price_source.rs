use crate::{Ohlcv, Price};

use std::fmt::{Debug, Display};

/// Price source extracted from each [`Ohlcv`] candle before an indicator runs.
///
/// Each indicator config carries a `PriceSource`; the flat price-series entry
/// points (such as [`compute_sma`](crate::compute_sma)) take prices that the
/// caller already extracted.
#[derive(PartialEq, Eq, Hash, Clone, Copy, Default, Debug)]
pub enum PriceSource {
    /// Opening price.
    Open,
    /// Highest price.
    High,
    /// Closing price.
    #[default]
    Close,
    /// Lowest price.
    Low,
    /// Median price: `(high + low) / 2`.
    HL2,
    /// Typical price: `(high + low + close) / 3`.
    HLC3,
    /// Average price: `(open + high + low + close) / 4`.
    OHLC4,
    /// Weighted close: `(high + low + close + close) / 4`.
    HLCC4,
    /// True range: `max(high - low, |high - prev_close|, |low - prev_close|)`.
    ///
    /// On the first candle (no previous close), falls back to `high - low`.
    TrueRange,
}

impl Display for PriceSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

impl PriceSource {
    #[inline]
    pub(crate) fn extract(self, ohlcv: &impl Ohlcv, prev_close: Option<Price>) -> Price {
        match self {
            Self::Open => ohlcv.open(),
            Self::High => ohlcv.high(),
            Self::Close => ohlcv.close(),
            Self::Low => ohlcv.low(),
            Self::HL2 => f64::midpoint(ohlcv.high(), ohlcv.low()),
            Self::HLC3 => (ohlcv.high() + ohlcv.low() + ohlcv.close()) / 3.0,
            Self::OHLC4 => (ohlcv.open() + ohlcv.high() + ohlcv.low() + ohlcv.close()) / 4.0,
            Self::HLCC4 => (ohlcv.high() + ohlcv.low() + ohlcv.close() + ohlcv.close()) / 4.0,
            Self::TrueRange => {
                let hl = ohlcv.high() - ohlcv.low();

                match prev_close {
                    Some(prev_close) => {
                        let hc = (ohlcv.high() - prev_close).abs();
                        let lc = (ohlcv.low() - prev_close).abs();
                        hl.max(hc).max(lc)
                    }
                    None => hl,
                }
            }
        }
    }
}

/// Extracts one price per candle, index-aligned with `candles`.
///
/// # Example
///
/// ```
/// use chartline_ta::{Candle, PriceSource, price_series};
///
/// let candles = [
///     Candle::new(1.0, 4.0, 0.0, 3.0).at(1),
///     Candle::new(3.0, 6.0, 2.0, 5.0).at(2),
/// ];
///
/// assert_eq!(price_series(&candles, PriceSource::Close), vec![3.0, 5.0]);
/// assert_eq!(price_series(&candles, PriceSource::HL2), vec![2.0, 4.0]);
/// ```
#[must_use]
pub fn price_series<C: Ohlcv>(candles: &[C], source: PriceSource) -> Vec<Price> {
    let mut prev_close = None;

    candles
        .iter()
        .map(|candle| {
            let price = source.extract(candle, prev_close);
            prev_close = Some(candle.close());
            price
        })
        .collect()
}
