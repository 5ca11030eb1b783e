mod fixtures;

use chartline_ta::{Ema, EmaConfig, Indicator, compute_ema};
use fixtures::{
    assert_matches_reference, assert_prefix_stable, load_ref_values, load_reference_closes,
    load_reference_ohlcvs,
};

const REF_PATH: &str = "tests/fixtures/data/ema-20-close.csv";

/// Tolerance: 1e-6 (~$0.000001 at these price levels).
/// The recursion is seeded with the first close, so there is no
/// seeding drift to allow for.
const TOLERANCE: f64 = 1e-6;

#[test]
fn ema_20_close_matches_reference() {
    let bars = load_reference_ohlcvs();
    let reference = load_ref_values(REF_PATH);

    let ema = Ema::new(EmaConfig::close(20).unwrap());
    let series = ema.compute_ohlcv(&bars).unwrap();

    assert_eq!(series.warm_up(), 0);
    assert_matches_reference(
        "EMA(20)",
        &bars,
        &series,
        reference.iter().map(|r| (r.timestamp, r.expected)),
        TOLERANCE,
    );
}

#[test]
fn ema_20_prefix_matches_full_series() {
    let prices = load_reference_closes();
    assert_prefix_stable(&prices, &[1, 2, 20, 333, 599], 0.0, |p| {
        compute_ema(p, 20).unwrap()
    });
}
