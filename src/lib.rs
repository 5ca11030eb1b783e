//! Technical analysis overlays for price charts.
//!
//! Every indicator takes a full price series and returns output of the same
//! length, index-aligned with the input. Positions without enough history
//! (the warm-up) are `None` rather than a sentinel value, so charting code
//! can leave a gap there.
//!
//! The free functions ([`compute_sma`], [`compute_ema`], [`compute_rsi`],
//! [`compute_macd`], [`compute_bollinger_bands`]) cover the common case.
//! The [`Indicator`] types behind them carry a validated config and can
//! be reused across redraws. [`compute_overlays`] and [`ChartDataset`]
//! assemble the named series a chart needs from an [`IndicatorParams`]
//! record and a set of active [`IndicatorKind`]s.
//!
//! ```
//! use chartline_ta::compute_sma;
//!
//! let sma = compute_sma(&[1.0, 2.0, 3.0, 4.0], 3)?;
//! assert_eq!(sma.into_inner(), vec![None, None, Some(2.0), Some(3.0)]);
//! # Ok::<(), chartline_ta::IndicatorError>(())
//! ```
//!
//! Invalid parameters and non-finite prices are reported as
//! [`IndicatorError`]. Rejections are logged through [`tracing`] at
//! `debug` level; install a subscriber to see them.

mod bb;
mod ema;
mod error;
mod indicator;
mod macd;
mod ohlcv;
mod overlay;
mod params;
mod price_source;
mod price_window;
mod rsi;
mod series;
mod sma;

pub use crate::error::{IndicatorError, Result};
pub use crate::indicator::{Indicator, IndicatorConfig, IndicatorConfigBuilder};
pub use crate::ohlcv::{Candle, Ohlcv, Price, Timestamp};
pub use crate::price_source::{PriceSource, price_series};
pub use crate::series::OverlaySeries;

pub use crate::bb::{Bb, BbConfig, BbConfigBuilder, BbSeries, StdDev, compute_bollinger_bands};
pub use crate::ema::{Ema, EmaConfig, EmaConfigBuilder, compute_ema};
pub use crate::macd::{Macd, MacdConfig, MacdConfigBuilder, MacdSeries, compute_macd};
pub use crate::rsi::{Rsi, RsiConfig, RsiConfigBuilder, compute_rsi};
pub use crate::sma::{Sma, SmaConfig, SmaConfigBuilder, compute_sma};

pub use crate::overlay::{ChartDataset, IndicatorKind, NamedOverlay, compute_overlays};
pub use crate::params::{IndicatorParams, IndicatorParamsBuilder};

#[cfg(test)]
mod test_util;
