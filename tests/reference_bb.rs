mod fixtures;

use chartline_ta::{Bb, BbConfig, Indicator, compute_bollinger_bands, compute_sma};
use fixtures::{
    assert_matches_reference, assert_prefix_stable, load_bb_ref, load_reference_closes,
    load_reference_ohlcvs,
};

const REF_PATH: &str = "tests/fixtures/data/bb-20-2-close.csv";

/// Tolerance: 1e-6 (~$0.000001 at these price levels).
/// The sqrt adds minor FP noise beyond the SMA middle; 1e-6 is tight
/// enough to catch a sample/population variance mix-up.
const TOLERANCE: f64 = 1e-6;

#[test]
fn bb_20_2_close_matches_reference() {
    let bars = load_reference_ohlcvs();
    let reference = load_bb_ref(REF_PATH);

    let bb = Bb::new(BbConfig::default_20());
    let series = bb.compute_ohlcv(&bars).unwrap();

    assert_matches_reference(
        "BB upper",
        &bars,
        series.upper(),
        reference.iter().map(|r| (r.timestamp, r.upper)),
        TOLERANCE,
    );
    assert_matches_reference(
        "BB middle",
        &bars,
        series.middle(),
        reference.iter().map(|r| (r.timestamp, r.middle)),
        TOLERANCE,
    );
    assert_matches_reference(
        "BB lower",
        &bars,
        series.lower(),
        reference.iter().map(|r| (r.timestamp, r.lower)),
        TOLERANCE,
    );
}

#[test]
fn bb_middle_is_sma() {
    let prices = load_reference_closes();
    let bb = compute_bollinger_bands(&prices, 20, 2.0).unwrap();
    assert_eq!(*bb.middle(), compute_sma(&prices, 20).unwrap());
}

#[test]
fn bands_are_ordered() {
    let prices = load_reference_closes();
    let bb = compute_bollinger_bands(&prices, 20, 2.0).unwrap();
    for ((upper, middle), lower) in bb
        .upper()
        .iter()
        .flatten()
        .zip(bb.middle().iter().flatten())
        .zip(bb.lower().iter().flatten())
    {
        assert!(lower <= middle && middle <= upper);
    }
}

#[test]
fn bb_upper_prefix_matches_full_series() {
    let prices = load_reference_closes();
    assert_prefix_stable(&prices, &[1, 19, 20, 21, 450, 599], TOLERANCE, |p| {
        compute_bollinger_bands(p, 20, 2.0).unwrap().upper().clone()
    });
}
