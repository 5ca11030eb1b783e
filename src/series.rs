use std::{
    fmt::{Debug, Display},
    ops::Index,
};

use crate::Price;

/// An indicator output, index-aligned with the input price series.
///
/// Always has exactly as many entries as the input. Positions where the
/// indicator's window is not yet filled hold `None` instead of being
/// omitted, so the series lines up with chart labels by index.
///
/// With the `serde` feature the series serializes as a flat array where
/// warm-up positions become `null`.
#[derive(Clone, PartialEq, Default)]
pub struct OverlaySeries(Vec<Option<Price>>);

impl OverlaySeries {
    #[inline]
    pub(crate) fn from_values(values: Vec<Option<Price>>) -> Self {
        Self(values)
    }

    /// Series with every position defined.
    #[inline]
    pub(crate) fn defined(values: impl IntoIterator<Item = Price>) -> Self {
        Self(values.into_iter().map(Some).collect())
    }

    /// Number of positions, equal to the input length.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Value at `index`, or `None` when out of range or still warming up.
    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Option<Price> {
        self.0.get(index).copied().flatten()
    }

    /// Last value of the series, if defined.
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<Price> {
        self.0.last().copied().flatten()
    }

    /// Number of leading warm-up (`None`) positions.
    #[must_use]
    pub fn warm_up(&self) -> usize {
        self.0.iter().take_while(|v| v.is_none()).count()
    }

    /// Iterates over every position, warm-up included.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = Option<Price>> + '_ {
        self.0.iter().copied()
    }

    /// Borrows the underlying positions.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[Option<Price>] {
        &self.0
    }

    /// Consumes the series, returning the underlying positions.
    #[inline]
    #[must_use]
    pub fn into_inner(self) -> Vec<Option<Price>> {
        self.0
    }

    /// Element-wise `self - other`, `None` where either side is `None`.
    pub(crate) fn zip_sub(&self, other: &Self) -> Self {
        debug_assert_eq!(self.len(), other.len());

        Self(
            self.iter()
                .zip(other.iter())
                .map(|(a, b)| Some(a? - b?))
                .collect(),
        )
    }
}

impl Index<usize> for OverlaySeries {
    type Output = Option<Price>;

    fn index(&self, index: usize) -> &Self::Output {
        &self.0[index]
    }
}

impl From<OverlaySeries> for Vec<Option<Price>> {
    fn from(series: OverlaySeries) -> Self {
        series.0
    }
}

impl<'a> IntoIterator for &'a OverlaySeries {
    type Item = &'a Option<Price>;
    type IntoIter = std::slice::Iter<'a, Option<Price>>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Debug for OverlaySeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.0.iter()).finish()
    }
}

impl Display for OverlaySeries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, value) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            match value {
                Some(v) => write!(f, "{v}")?,
                None => write!(f, "-")?,
            }
        }
        write!(f, "]")
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for OverlaySeries {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for OverlaySeries {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<Option<Price>>::deserialize(deserializer).map(Self)
    }
}
