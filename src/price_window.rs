use crate::Price;

/// Trailing fixed-length windows over a price slice.
///
/// Position `i` sees `values[i + 1 - length ..= i]`; positions before the
/// first full window map to `None`, so the output is always index-aligned
/// with the input.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PriceWindow<'a> {
    values: &'a [Price],
    length: usize,
}

impl<'a> PriceWindow<'a> {
    pub fn new(values: &'a [Price], length: usize) -> Self {
        debug_assert!(length > 0, "window length must be validated by caller");
        Self { values, length }
    }

    /// Applies `f` to every full window. O(n · length).
    pub fn map<T>(self, f: impl Fn(&[Price]) -> T) -> Vec<Option<T>> {
        (0..self.values.len())
            .map(|i| {
                (i + 1 >= self.length).then(|| f(&self.values[i + 1 - self.length..=i]))
            })
            .collect()
    }

    /// Arithmetic mean of every full window.
    pub fn means(self) -> Vec<Option<Price>> {
        self.map(mean)
    }
}

/// Sum left to right, divided by the window length.
#[inline]
pub(crate) fn mean(window: &[Price]) -> Price {
    #[allow(clippy::cast_precision_loss)]
    let length = window.len() as f64;
    window.iter().sum::<Price>() / length
}

/// Population variance: mean of squared deviations, divisor `len`.
#[inline]
pub(crate) fn population_variance(window: &[Price], mean: Price) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let length = window.len() as f64;
    window
        .iter()
        .map(|p| {
            let deviation = p - mean;
            deviation * deviation
        })
        .sum::<f64>()
        / length
}
