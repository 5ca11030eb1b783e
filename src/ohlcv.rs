/// A price value.
///
/// Semantic alias for [`f64`]. Documents intent in function signatures
/// without introducing newtype construction overhead.
pub type Price = f64;

/// Candle open timestamp or sequence number.
///
/// Only used to label chart points. Candles are expected in ascending
/// timestamp order, one per fixed interval, with no gaps.
pub type Timestamp = u64;

/// OHLCV candle data accepted by [`price_series`](crate::price_series) and
/// [`Indicator::compute_ohlcv`](crate::Indicator::compute_ohlcv).
///
/// Implement this on your own kline/candle type to avoid converting into
/// [`Candle`] first.
///
/// # Example
///
/// ```
/// use chartline_ta::{Ohlcv, Price, Timestamp};
///
/// struct MyKline {
///     o: f64, h: f64, l: f64, c: f64,
///     ts: u64,
/// }
///
/// impl Ohlcv for MyKline {
///     fn open(&self) -> Price { self.o }
///     fn high(&self) -> Price { self.h }
///     fn low(&self) -> Price { self.l }
///     fn close(&self) -> Price { self.c }
///     fn timestamp(&self) -> Timestamp { self.ts }
/// }
/// ```
pub trait Ohlcv {
    /// Opening price of the candle.
    fn open(&self) -> Price;

    /// Highest price during the candle.
    fn high(&self) -> Price;

    /// Lowest price during the candle.
    fn low(&self) -> Price;

    /// Closing price of the candle.
    fn close(&self) -> Price;

    /// Candle open timestamp or sequence number.
    fn timestamp(&self) -> Timestamp;

    /// Trade volume during the candle. Defaults to `0.0`.
    fn volume(&self) -> f64 {
        0.0
    }
}

/// Plain OHLCV candle as delivered by the price data source.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Candle {
    pub open: Price,
    pub high: Price,
    pub low: Price,
    pub close: Price,
    #[cfg_attr(feature = "serde", serde(default))]
    pub volume: f64,
    pub timestamp: Timestamp,
}

impl Candle {
    #[must_use]
    pub fn new(open: Price, high: Price, low: Price, close: Price) -> Self {
        Self {
            open,
            high,
            low,
            close,
            volume: 0.0,
            timestamp: 0,
        }
    }

    /// Sets the candle timestamp.
    #[must_use]
    pub fn at(mut self, timestamp: Timestamp) -> Self {
        self.timestamp = timestamp;
        self
    }

    /// Sets the candle volume.
    #[must_use]
    pub fn with_volume(mut self, volume: f64) -> Self {
        self.volume = volume;
        self
    }
}

impl Ohlcv for Candle {
    fn open(&self) -> Price {
        self.open
    }

    fn high(&self) -> Price {
        self.high
    }

    fn low(&self) -> Price {
        self.low
    }

    fn close(&self) -> Price {
        self.close
    }

    fn timestamp(&self) -> Timestamp {
        self.timestamp
    }

    fn volume(&self) -> f64 {
        self.volume
    }
}
