//! FAA 도달시간 추정과 지속시간 추천 테스트.
use stormwater_quick_check::hydrology::time_of_concentration::{
    estimate_tc, recommend_duration, TimeOfConcentration, MAX_TC_MINUTES, MIN_TC_MINUTES,
};

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

fn faa(c: f64, l: f64, s: f64) -> f64 {
    1.8 * (1.1 - c) * l.sqrt() / s.powf(0.333)
}

#[test]
fn degenerate_geometry_returns_floor() {
    assert_eq!(estimate_tc(0.5, 0.0, 2.0), 5.0);
    assert_eq!(estimate_tc(0.5, 200.0, 0.0), 5.0);
    assert_eq!(estimate_tc(0.5, -10.0, 2.0), 5.0);
    assert_eq!(estimate_tc(0.5, 200.0, -1.0), 5.0);
}

#[test]
fn typical_urban_site_uses_faa_formula() {
    let tc = estimate_tc(0.5, 200.0, 2.0);
    assert_close("tc", tc, faa(0.5, 200.0, 2.0), 1e-12);
    assert_close("tc approx", tc, 12.13, 0.01);
}

#[test]
fn long_flat_path_stays_within_supported_range() {
    let raw = faa(0.5, 10_000.0, 0.5);
    let tc = estimate_tc(0.5, 10_000.0, 0.5);
    assert_close("tc", tc, raw.min(MAX_TC_MINUTES), 1e-12);
    assert!(tc <= MAX_TC_MINUTES);
}

#[test]
fn raw_value_above_range_saturates_at_180() {
    assert!(faa(0.1, 40_000.0, 0.1) > MAX_TC_MINUTES);
    assert_eq!(estimate_tc(0.1, 40_000.0, 0.1), 180.0);
}

#[test]
fn short_steep_impervious_path_saturates_at_5() {
    assert!(faa(0.9, 50.0, 10.0) < MIN_TC_MINUTES);
    assert_eq!(estimate_tc(0.9, 50.0, 10.0), 5.0);
}

#[test]
fn recommended_duration_is_ceiling_over_table() {
    assert_eq!(recommend_duration(7.0), 10);
    assert_eq!(recommend_duration(200.0), 180);
    assert_eq!(recommend_duration(0.0), 5);
    assert_eq!(recommend_duration(5.0), 5);
    assert_eq!(recommend_duration(60.0), 60);
    assert_eq!(recommend_duration(60.01), 120);
    assert_eq!(recommend_duration(180.0), 180);
}

#[test]
fn estimate_bundles_inputs_with_result() {
    let tc = TimeOfConcentration::estimate(0.5, 200.0, 2.0);
    assert_eq!(tc.flow_length_ft, 200.0);
    assert_eq!(tc.slope_percent, 2.0);
    assert_eq!(tc.minutes, estimate_tc(0.5, 200.0, 2.0));
    assert_eq!(tc.recommended_duration(), 15);
}
