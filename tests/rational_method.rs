//! Rational Method 계산 엔진 및 부지 단위 간이 검토 테스트.
use stormwater_quick_check::hydrology::{
    compute, quick_check, Coordinates, QuickCheckRequest, RationalMethodInput, StormDuration,
    SurfaceArea, SurfaceType, TcCoefficient, TimeOfConcentration,
};
use stormwater_quick_check::units::{GPM_PER_CFS, SQFT_PER_ACRE};

const SEATTLE: Coordinates = Coordinates::new(47.6062, -122.3321);
const NEW_YORK: Coordinates = Coordinates::new(40.7128, -74.0060);

fn assert_close(label: &str, actual: f64, expected: f64, tol: f64) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tol,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {tol})"
    );
}

fn surface(t: SurfaceType, area: f64) -> SurfaceArea {
    SurfaceArea::new(t, area).expect("valid surface")
}

fn input(surfaces: Vec<SurfaceArea>, intensity: f64, is_local: bool) -> RationalMethodInput {
    RationalMethodInput {
        surfaces,
        intensity_in_per_hr: intensity,
        citation: "test citation".to_string(),
        return_period_years: 10,
        duration_minutes: 60,
        location: "Test site".to_string(),
        coordinates: SEATTLE,
        is_local_data: is_local,
        time_of_concentration: None,
    }
}

fn request(surfaces: Vec<SurfaceArea>, coords: Coordinates, rp: u32, d: StormDuration) -> QuickCheckRequest {
    QuickCheckRequest {
        surfaces,
        coordinates: coords,
        location: "Test site".to_string(),
        return_period_years: rp,
        duration: d,
    }
}

#[test]
fn pavement_quarter_acre_ten_year_hour_storm() {
    let result = quick_check(request(
        vec![surface(SurfaceType::PavementAndRoofs, 10_000.0)],
        SEATTLE,
        10,
        StormDuration::Fixed(60),
    ));
    assert_close("acres", result.total_area_acres(), 10_000.0 / 43_560.0, 1e-15);
    assert_close("acres approx", result.total_area_acres(), 0.22957, 1e-5);
    assert_close("C", result.weighted_coefficient(), 0.90, 1e-12);
    assert_eq!(result.rainfall_intensity_in_per_hr(), 0.58);
    assert_close(
        "Q",
        result.peak_runoff_cfs(),
        0.90 * 0.58 * 10_000.0 / 43_560.0,
        1e-12,
    );
    assert_close("Q approx", result.peak_runoff_cfs(), 0.1198, 1e-4);
    assert!(result.warnings().is_empty(), "{:?}", result.warnings());
    assert!(result.citation().contains("Appendix F, Table F.18"));
    assert_eq!(result.duration_minutes(), 60);
    assert!(result.time_of_concentration().is_none());
}

#[test]
fn acres_use_fixed_conversion() {
    let result = compute(input(vec![surface(SurfaceType::Lawns, 87_120.0)], 0.58, true));
    assert_eq!(result.total_area_sq_ft(), 87_120.0);
    assert_eq!(result.total_area_acres(), 87_120.0 / SQFT_PER_ACRE);
    assert_eq!(result.total_area_acres(), 2.0);
}

#[test]
fn exactly_ten_acres_has_no_area_warning() {
    let result = compute(input(vec![surface(SurfaceType::Lawns, 10.0 * 43_560.0)], 0.58, true));
    assert_eq!(result.total_area_acres(), 10.0);
    assert!(result.warnings().is_empty(), "{:?}", result.warnings());
}

#[test]
fn just_over_ten_acres_warns_strict_limit() {
    let result = compute(input(vec![surface(SurfaceType::Lawns, 10.01 * 43_560.0)], 0.58, true));
    assert_eq!(result.warnings().len(), 1);
    let w = &result.warnings()[0];
    assert!(w.starts_with("Area (10.0 acres) exceeds 10 acres."), "{w}");
    assert!(w.contains("Consider continuous simulation (WWHM)"), "{w}");
}

#[test]
fn over_fifty_acres_warns_extended_limit_only() {
    let result = compute(input(vec![surface(SurfaceType::Lawns, 50.01 * 43_560.0)], 0.58, true));
    assert_eq!(result.warnings().len(), 1, "{:?}", result.warnings());
    let w = &result.warnings()[0];
    assert!(w.contains("exceeds 50 acres"), "{w}");
    assert!(w.contains("Rational Method not appropriate"), "{w}");
    assert!(!w.contains("exceeds 10 acres"), "{w}");
}

#[test]
fn open_water_triggers_high_coefficient_warning() {
    let result = compute(input(vec![surface(SurfaceType::OpenWater, 5_000.0)], 0.58, true));
    assert_eq!(
        result.warnings(),
        ["Very high runoff coefficient (C > 0.95). Verify surface types are correct.".to_string()]
    );
}

#[test]
fn coefficient_of_exactly_pavement_does_not_warn() {
    let result = compute(input(vec![surface(SurfaceType::PavementAndRoofs, 5_000.0)], 0.58, true));
    assert!(result.warnings().is_empty());
}

#[test]
fn warnings_follow_area_coefficient_data_order() {
    let result = compute(input(
        vec![surface(SurfaceType::OpenWater, 60.0 * 43_560.0)],
        0.58,
        false,
    ));
    let w = result.warnings();
    assert_eq!(w.len(), 3, "{w:?}");
    assert!(w[0].contains("exceeds 50 acres"));
    assert!(w[1].starts_with("Very high runoff coefficient"));
    assert_eq!(
        w[2],
        "Using Seattle default rainfall data. Verify intensity for your specific jurisdiction."
    );
}

#[test]
fn empty_site_yields_zero_without_nan() {
    let result = compute(input(Vec::new(), 0.58, true));
    assert_eq!(result.total_area_sq_ft(), 0.0);
    assert_eq!(result.weighted_coefficient(), 0.0);
    assert_eq!(result.peak_runoff_cfs(), 0.0);
    assert!(result.warnings().is_empty());
    assert_eq!(result.surface_share_percent(0), 0.0);
}

#[test]
fn surface_order_is_preserved() {
    let order = [
        SurfaceType::Lawns,
        SurfaceType::PavementAndRoofs,
        SurfaceType::DenseForest,
        SurfaceType::GravelAreas,
    ];
    let surfaces = order.iter().map(|&t| surface(t, 1_000.0)).collect();
    let result = compute(input(surfaces, 0.58, true));
    let got: Vec<SurfaceType> = result.surfaces().iter().map(|s| s.surface_type()).collect();
    assert_eq!(got, order);
    assert_close("share", result.surface_share_percent(1), 25.0, 1e-12);
}

#[test]
fn lookup_miss_gives_zero_runoff_with_fallback_warning() {
    let result = quick_check(request(
        vec![surface(SurfaceType::PavementAndRoofs, 10_000.0)],
        SEATTLE,
        3,
        StormDuration::Fixed(60),
    ));
    assert_eq!(result.rainfall_intensity_in_per_hr(), 0.0);
    assert_eq!(result.peak_runoff_cfs(), 0.0);
    assert_eq!(result.citation(), "Data not available for selected parameters");
    assert_eq!(result.warnings().len(), 1);
    assert!(result.warnings()[0].starts_with("Using Seattle default rainfall data"));
}

#[test]
fn out_of_county_site_still_computes_with_warning() {
    let result = quick_check(request(
        vec![surface(SurfaceType::PavementAndRoofs, 10_000.0)],
        NEW_YORK,
        10,
        StormDuration::Fixed(60),
    ));
    assert_close("Q", result.peak_runoff_cfs(), 0.90 * 0.58 * 10_000.0 / 43_560.0, 1e-12);
    assert!(result.citation().contains("outside King County"));
    assert_eq!(result.warnings().len(), 1);
    assert_eq!(result.coordinates(), NEW_YORK);
}

#[test]
fn tc_based_duration_picks_next_table_duration() {
    let result = quick_check(request(
        vec![surface(SurfaceType::Lawns, 20_000.0)],
        SEATTLE,
        10,
        StormDuration::FromTc {
            coefficient: TcCoefficient::Fixed(0.5),
            flow_length_ft: 200.0,
            slope_percent: 2.0,
        },
    ));
    let tc = result.time_of_concentration().expect("tc recorded");
    assert_close("tc", tc.minutes, 12.13, 0.01);
    assert_eq!(tc.flow_length_ft, 200.0);
    assert_eq!(tc.slope_percent, 2.0);
    assert_eq!(result.duration_minutes(), 15);
    assert_eq!(result.rainfall_intensity_in_per_hr(), 1.30);
}

#[test]
fn tc_can_use_site_weighted_coefficient() {
    // C=0.9이면 FAA 식 결과가 5분 미만이라 최소값 5분, 지속시간 5분
    let result = quick_check(request(
        vec![surface(SurfaceType::PavementAndRoofs, 20_000.0)],
        SEATTLE,
        10,
        StormDuration::FromTc {
            coefficient: TcCoefficient::SiteWeighted,
            flow_length_ft: 200.0,
            slope_percent: 2.0,
        },
    ));
    assert_eq!(result.time_of_concentration().map(|t| t.minutes), Some(5.0));
    assert_eq!(result.duration_minutes(), 5);
    assert_eq!(result.rainfall_intensity_in_per_hr(), 2.45);
}

#[test]
fn chosen_duration_overrides_tc_recommendation() {
    let tc = TimeOfConcentration::estimate(0.5, 200.0, 2.0);
    assert_eq!(tc.recommended_duration(), 15);
    let result = quick_check(request(
        vec![surface(SurfaceType::Lawns, 20_000.0)],
        SEATTLE,
        10,
        StormDuration::WithTc {
            minutes: 60,
            time_of_concentration: tc,
        },
    ));
    assert_eq!(result.duration_minutes(), 60);
    assert_eq!(result.rainfall_intensity_in_per_hr(), 0.58);
    assert_eq!(result.time_of_concentration(), Some(&tc));
}

#[test]
fn gpm_conversion_uses_fixed_factor() {
    let result = compute(input(vec![surface(SurfaceType::Lawns, 43_560.0)], 1.0, true));
    assert_close("cfs", result.peak_runoff_cfs(), 0.25, 1e-12);
    assert_close("gpm", result.peak_runoff_gpm(), 0.25 * GPM_PER_CFS, 1e-9);
}
