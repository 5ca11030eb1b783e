#![allow(dead_code)]

use chartline_ta::{Ohlcv, OverlaySeries, Price, PriceSource, Timestamp, price_series};
use serde::{Deserialize, de::DeserializeOwned};

/// Hourly OHLCV candle parsed from the fixture CSV.
#[derive(Debug, Clone, Deserialize)]
pub struct RefBar {
    pub timestamp: u64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Ohlcv for RefBar {
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

/// Reference value with timestamp. Only defined positions are listed.
#[derive(Debug, Deserialize)]
pub struct RefValue {
    pub timestamp: u64,
    pub expected: f64,
}

/// Reference BB value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefBbValue {
    pub timestamp: u64,
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

/// Reference MACD value with timestamp.
#[derive(Debug, Deserialize)]
pub struct RefMacdValue {
    pub timestamp: u64,
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

const OHLCV_PATH: &str = "tests/fixtures/data/ohlcv-1h.csv";

/// Load the reference candles.
pub fn load_reference_ohlcvs() -> Vec<RefBar> {
    load_records(OHLCV_PATH, "invalid OHLCV record")
}

/// Closing prices of the reference candles.
pub fn load_reference_closes() -> Vec<Price> {
    price_series(&load_reference_ohlcvs(), PriceSource::Close)
}

/// Load single-value reference data (SMA, EMA, RSI).
pub fn load_ref_values(path: &str) -> Vec<RefValue> {
    load_records(path, "invalid reference record")
}

/// Load BB reference data (upper, middle, lower).
pub fn load_bb_ref(path: &str) -> Vec<RefBbValue> {
    load_records(path, "invalid BB reference record")
}

/// Load MACD reference data (line, signal, histogram).
pub fn load_macd_ref(path: &str) -> Vec<RefMacdValue> {
    load_records(path, "invalid MACD reference record")
}

/// Assert two f64 values are within tolerance.
pub fn assert_near(actual: f64, expected: f64, tolerance: f64, context: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{context}: expected {expected:.10}, got {actual:.10}, diff {diff:.2e} > tolerance {tolerance:.2e}"
    );
}

/// Index of the candle with the given timestamp.
pub fn bar_index(bars: &[RefBar], timestamp: u64) -> usize {
    bars.iter()
        .position(|b| b.timestamp == timestamp)
        .unwrap_or_else(|| panic!("no candle at t={timestamp}"))
}

/// Checks `series` against `(timestamp, expected)` pairs and that every
/// candle before the first reference row is still warming up.
pub fn assert_matches_reference(
    label: &str,
    bars: &[RefBar],
    series: &OverlaySeries,
    reference: impl IntoIterator<Item = (u64, f64)>,
    tolerance: f64,
) {
    assert_eq!(series.len(), bars.len(), "{label}: length mismatch");

    let mut checked = 0;
    for (timestamp, expected) in reference {
        let i = bar_index(bars, timestamp);
        if checked == 0 {
            assert_eq!(series.warm_up(), i, "{label}: warm-up length");
        }
        let value = series
            .get(i)
            .unwrap_or_else(|| panic!("{label} returned None at t={timestamp}"));
        assert_near(
            value,
            expected,
            tolerance,
            &format!("{label} at bar {i} (t={timestamp})"),
        );
        checked += 1;
    }

    assert_eq!(
        checked + series.warm_up(),
        bars.len(),
        "not all reference values checked: {checked}/{}",
        bars.len() - series.warm_up()
    );
}

/// Asserts that recomputing over a prefix of the input reproduces the
/// full-series output on that prefix: a redraw after more candles arrive
/// never changes history.
pub fn assert_prefix_stable<F>(prices: &[Price], lengths: &[usize], tolerance: f64, compute: F)
where
    F: Fn(&[Price]) -> OverlaySeries,
{
    let full = compute(prices);
    for &len in lengths {
        let partial = compute(&prices[..len]);
        assert_eq!(partial.len(), len);
        for (i, (p, f)) in partial.iter().zip(full.iter()).enumerate() {
            match (p, f) {
                (None, None) => {}
                (Some(p), Some(f)) => {
                    let diff = (p - f).abs();
                    assert!(
                        diff <= tolerance,
                        "diverged at bar {i} (prefix {len}): prefix={p:.10}, full={f:.10}, diff={diff:.2e}"
                    );
                }
                (p, f) => panic!("warm-up mismatch at bar {i} (prefix {len}): prefix={p:?}, full={f:?}"),
            }
        }
    }
}

fn load_records<D>(path: &str, expect_msg: &str) -> Vec<D>
where
    D: DeserializeOwned,
{
    let mut rdr =
        csv::Reader::from_path(path).unwrap_or_else(|e| panic!("failed to open {path}: {e}"));

    rdr.deserialize().map(|r| r.expect(expect_msg)).collect()
}
