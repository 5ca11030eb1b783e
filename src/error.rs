use thiserror::Error;

/// Errors reported at the indicator boundary.
///
/// Warm-up positions are not errors: a window that cannot be filled yet
/// yields `None` in the [`OverlaySeries`](crate::OverlaySeries).
#[derive(Debug, Clone, PartialEq, Error)]
pub enum IndicatorError {
    /// A period was zero, or a band multiplier was not a positive finite
    /// number.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    /// The input series contained NaN or an infinity.
    #[error("non-finite price {value} at index {index}")]
    NonFinitePrice { index: usize, value: f64 },

    /// Finite prices whose sums, differences or squares left the `f64`
    /// range, so the value at `index` would be infinite or NaN.
    #[error("computed value overflowed at index {index}")]
    NumericOverflow { index: usize },
}

impl IndicatorError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        let reason = reason.into();
        tracing::debug!(parameter = name, %reason, "rejected indicator parameter");
        Self::InvalidParameter { name, reason }
    }

    pub(crate) fn overflow(index: usize) -> Self {
        tracing::debug!(index, "indicator output overflowed");
        Self::NumericOverflow { index }
    }
}

/// Position of the first computed value that is infinite or NaN.
pub(crate) fn first_overflow(values: impl IntoIterator<Item = Option<f64>>) -> Option<usize> {
    values
        .into_iter()
        .position(|v| v.is_some_and(|v| !v.is_finite()))
}

/// Rejects computed output containing an infinity or NaN.
pub(crate) fn check_computed(values: impl IntoIterator<Item = Option<f64>>) -> Result<()> {
    match first_overflow(values) {
        Some(index) => Err(IndicatorError::overflow(index)),
        None => Ok(()),
    }
}

/// Result alias for indicator computations.
pub type Result<T> = std::result::Result<T, IndicatorError>;

/// Rejects a zero period.
pub(crate) fn check_period(name: &'static str, period: usize) -> Result<usize> {
    if period == 0 {
        return Err(IndicatorError::invalid(name, "period must be at least 1"));
    }
    Ok(period)
}

/// Rejects a series containing NaN or infinities.
pub(crate) fn check_finite(prices: &[f64]) -> Result<()> {
    match prices.iter().position(|p| !p.is_finite()) {
        Some(index) => Err(IndicatorError::NonFinitePrice {
            index,
            value: prices[index],
        }),
        None => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_period_is_rejected() {
        let err = check_period("length", 0).unwrap_err();
        assert!(matches!(
            err,
            IndicatorError::InvalidParameter { name: "length", .. }
        ));
    }

    #[test]
    fn positive_period_passes_through() {
        assert_eq!(check_period("length", 7), Ok(7));
    }

    #[test]
    fn reports_first_non_finite_index() {
        let err = check_finite(&[1.0, 2.0, f64::INFINITY, f64::NAN]).unwrap_err();
        assert!(matches!(err, IndicatorError::NonFinitePrice { index: 2, .. }));
    }

    #[test]
    fn empty_series_is_finite() {
        assert!(check_finite(&[]).is_ok());
    }

    #[test]
    fn finds_first_overflowed_value() {
        let values = [None, Some(1.0), Some(f64::INFINITY), Some(f64::NAN)];
        assert_eq!(first_overflow(values), Some(2));
        assert_eq!(
            check_computed(values),
            Err(IndicatorError::NumericOverflow { index: 2 })
        );
    }

    #[test]
    fn warm_up_gaps_are_not_overflow() {
        assert!(check_computed([None, None, Some(-3.5)]).is_ok());
    }

    #[test]
    fn display_names_parameter() {
        let err = IndicatorError::invalid("std_dev", "must be positive");
        assert_eq!(
            err.to_string(),
            "invalid parameter `std_dev`: must be positive"
        );
    }
}
