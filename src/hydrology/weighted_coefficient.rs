use super::SurfaceArea;

/// 면적가중 유출계수 ΣAᵢCᵢ / ΣAᵢ 를 계산한다.
///
/// 빈 목록이거나 면적 합이 0이면 0을 반환한다 (NaN을 만들지 않는다).
pub fn weighted(surfaces: &[SurfaceArea]) -> f64 {
    let (area_sum, weighted_sum) = surfaces.iter().fold((0.0_f64, 0.0_f64), |(a, w), s| {
        (a + s.area_sq_ft(), w + s.area_sq_ft() * s.coefficient())
    });
    if area_sum <= 0.0 {
        return 0.0;
    }
    weighted_sum / area_sum
}
