use std::fmt::Display;

use crate::{BbConfig, EmaConfig, MacdConfig, Result, RsiConfig, SmaConfig, error::IndicatorError};

/// Flat indicator parameter record, as stored by the dashboard settings.
///
/// There is no `Default`: every field must come from the
/// caller, either through [`IndicatorParams::builder`] or by opting into
/// [`IndicatorParams::standard`]. Values are validated by
/// [`validate`](IndicatorParams::validate) before any computation runs.
///
/// With the `serde` feature, fields (de)serialize in `camelCase`
/// (`smaPeriod`, `bbStdDev`, ...).
///
/// # Example
///
/// ```
/// use chartline_ta::IndicatorParams;
///
/// let params = IndicatorParams::builder()
///     .sma_period(50)
///     .ema_period(21)
///     .rsi_period(14)
///     .macd(12, 26, 9)
///     .bollinger(20, 2.0)
///     .build()?;
///
/// assert_eq!(params.sma_period, 50);
/// # Ok::<(), chartline_ta::IndicatorError>(())
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "camelCase")
)]
pub struct IndicatorParams {
    pub sma_period: usize,
    pub ema_period: usize,
    pub rsi_period: usize,
    pub macd_fast: usize,
    pub macd_slow: usize,
    pub macd_signal: usize,
    pub bb_period: usize,
    pub bb_std_dev: f64,
}

impl IndicatorParams {
    /// Conventional chart settings: SMA 20, EMA 20, RSI 14,
    /// MACD 12/26/9, Bollinger 20/2.
    #[must_use]
    pub fn standard() -> Self {
        Self {
            sma_period: 20,
            ema_period: 20,
            rsi_period: 14,
            macd_fast: 12,
            macd_slow: 26,
            macd_signal: 9,
            bb_period: 20,
            bb_std_dev: 2.0,
        }
    }

    #[must_use]
    pub fn builder() -> IndicatorParamsBuilder {
        IndicatorParamsBuilder::default()
    }

    /// Checks every field by building each indicator config.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] naming the first offending field.
    pub fn validate(&self) -> Result<()> {
        self.sma()?;
        self.ema()?;
        self.rsi()?;
        self.macd()?;
        self.bollinger()?;
        Ok(())
    }

    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] if `sma_period` is zero.
    pub fn sma(&self) -> Result<SmaConfig> {
        SmaConfig::close(self.sma_period).map_err(rename(&[("length", "sma_period")]))
    }

    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] if `ema_period` is zero.
    pub fn ema(&self) -> Result<EmaConfig> {
        EmaConfig::close(self.ema_period).map_err(rename(&[("length", "ema_period")]))
    }

    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] if `rsi_period` is zero.
    pub fn rsi(&self) -> Result<RsiConfig> {
        RsiConfig::close(self.rsi_period).map_err(rename(&[("length", "rsi_period")]))
    }

    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] if any MACD period is zero.
    pub fn macd(&self) -> Result<MacdConfig> {
        MacdConfig::close(self.macd_fast, self.macd_slow, self.macd_signal).map_err(rename(&[
            ("fast", "macd_fast"),
            ("slow", "macd_slow"),
            ("signal", "macd_signal"),
        ]))
    }

    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] if `bb_period` is zero or
    /// `bb_std_dev` is not a positive finite number.
    pub fn bollinger(&self) -> Result<BbConfig> {
        BbConfig::close(self.bb_period, self.bb_std_dev).map_err(rename(&[
            ("length", "bb_period"),
            ("std_dev", "bb_std_dev"),
        ]))
    }
}

/// Maps a config builder's parameter name onto the record field it came from.
fn rename(
    fields: &'static [(&'static str, &'static str)],
) -> impl Fn(IndicatorError) -> IndicatorError {
    move |err| match err {
        IndicatorError::InvalidParameter { name, reason } => {
            let name = fields
                .iter()
                .find_map(|&(from, to)| (from == name).then_some(to))
                .unwrap_or(name);
            IndicatorError::InvalidParameter { name, reason }
        }
        other => other,
    }
}

impl Display for IndicatorParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "IndicatorParams(sma {}, ema {}, rsi {}, macd {}/{}/{}, bb {}/{})",
            self.sma_period,
            self.ema_period,
            self.rsi_period,
            self.macd_fast,
            self.macd_slow,
            self.macd_signal,
            self.bb_period,
            self.bb_std_dev,
        )
    }
}

/// Builder for [`IndicatorParams`].
///
/// No field has a default; [`build`](IndicatorParamsBuilder::build) rejects
/// a record with any field missing.
#[derive(Debug, Default, Clone)]
pub struct IndicatorParamsBuilder {
    sma_period: Option<usize>,
    ema_period: Option<usize>,
    rsi_period: Option<usize>,
    macd: Option<(usize, usize, usize)>,
    bollinger: Option<(usize, f64)>,
}

impl IndicatorParamsBuilder {
    #[must_use]
    pub fn sma_period(mut self, period: usize) -> Self {
        self.sma_period = Some(period);
        self
    }

    #[must_use]
    pub fn ema_period(mut self, period: usize) -> Self {
        self.ema_period = Some(period);
        self
    }

    #[must_use]
    pub fn rsi_period(mut self, period: usize) -> Self {
        self.rsi_period = Some(period);
        self
    }

    #[must_use]
    pub fn macd(mut self, fast: usize, slow: usize, signal: usize) -> Self {
        self.macd = Some((fast, slow, signal));
        self
    }

    #[must_use]
    pub fn bollinger(mut self, period: usize, std_dev: f64) -> Self {
        self.bollinger = Some((period, std_dev));
        self
    }

    /// Builds and validates the record.
    ///
    /// # Errors
    ///
    /// [`IndicatorError::InvalidParameter`] if a field is missing or out of
    /// range.
    pub fn build(self) -> Result<IndicatorParams> {
        fn required<T>(name: &'static str, value: Option<T>) -> Result<T> {
            value.ok_or_else(|| IndicatorError::invalid(name, "is required"))
        }

        let (macd_fast, macd_slow, macd_signal) = required("macd", self.macd)?;
        let (bb_period, bb_std_dev) = required("bollinger", self.bollinger)?;

        let params = IndicatorParams {
            sma_period: required("sma_period", self.sma_period)?,
            ema_period: required("ema_period", self.ema_period)?,
            rsi_period: required("rsi_period", self.rsi_period)?,
            macd_fast,
            macd_slow,
            macd_signal,
            bb_period,
            bb_std_dev,
        };
        params.validate()?;

        Ok(params)
    }
}
