// src/test_util.rs

use crate::{Candle, OverlaySeries};

/// Asserts that two `f64` values are approximately equal using a
/// relative epsilon of `4 * f64::EPSILON`.
macro_rules! assert_approx {
    ($actual:expr, $expected:expr) => {{
        let (a, e) = ($actual, $expected);
        assert!(
            (a - e).abs() <= e.abs() * 4.0 * f64::EPSILON,
            "assert_approx failed: actual={a}, expected={e}, diff={}",
            (a - e).abs(),
        );
    }};
}

pub(crate) use assert_approx;

/// Asserts a whole overlay against expected values within `1e-10`,
/// including the position of every warm-up `None`.
pub fn assert_series(actual: &OverlaySeries, expected: &[Option<f64>]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "length mismatch: actual={actual:?}"
    );

    for (i, (a, e)) in actual.iter().zip(expected).enumerate() {
        match (a, e) {
            (None, None) => {}
            (Some(a), Some(e)) => assert!(
                (a - e).abs() < 1e-10,
                "value mismatch at {i}: actual={a}, expected={e}"
            ),
            (a, e) => panic!("warm-up mismatch at {i}: actual={a:?}, expected={e:?}"),
        }
    }
}

/// Convenience: candle with just a close price and timestamp (OHLC all equal to close).
pub fn candle(close: f64, time: u64) -> Candle {
    Candle::new(close, close, close, close).at(time)
}

/// `1.0, 2.0, ..., n as f64`.
pub fn ramp(n: u32) -> Vec<f64> {
    (1..=n).map(f64::from).collect()
}

/// Installs a test-writer subscriber honouring `RUST_LOG`. Repeated calls
/// are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
