//! Rational Method (Q = C·i·A) 첨두유출량 계산 엔진.
//!
//! 계산은 실패하지 않는다. 적용 한계를 넘는 입력은 결과에 경고로만 남기고
//! 항상 추정값을 돌려준다.

use serde::Serialize;
use tracing::debug;

use super::rainfall_table::intensity_with_citation;
use super::time_of_concentration::TimeOfConcentration;
use super::weighted_coefficient::weighted;
use super::{Coordinates, SurfaceArea};
use crate::units::{GPM_PER_CFS, SQFT_PER_ACRE};

/// King County/Seattle이 Rational Method를 허용하는 면적 상한 [acre]
pub const MAX_AREA_ACRES_STRICT: f64 = 10.0;
/// 강한 경고와 함께 계산만 해주는 확장 상한 [acre]
pub const MAX_AREA_ACRES_EXTENDED: f64 = 50.0;
/// 이 값을 넘는 가중 C는 입력 오류 가능성이 높다.
pub const HIGH_COEFFICIENT_THRESHOLD: f64 = 0.95;

struct AreaLimitRule {
    limit_acres: f64,
    message: fn(f64) -> String,
}

// 큰 한계부터 검사해 처음 걸린 규칙 하나만 적용한다.
const AREA_LIMIT_RULES: [AreaLimitRule; 2] = [
    AreaLimitRule {
        limit_acres: MAX_AREA_ACRES_EXTENDED,
        message: extended_limit_message,
    },
    AreaLimitRule {
        limit_acres: MAX_AREA_ACRES_STRICT,
        message: strict_limit_message,
    },
];

fn extended_limit_message(total_acres: f64) -> String {
    format!(
        "Area ({total_acres:.1} acres) exceeds {MAX_AREA_ACRES_EXTENDED} acres. \
         Rational Method not appropriate. \
         Use continuous simulation (WWHM) per King County/Seattle requirements."
    )
}

fn strict_limit_message(total_acres: f64) -> String {
    format!(
        "Area ({total_acres:.1} acres) exceeds {MAX_AREA_ACRES_STRICT} acres. \
         King County/Seattle limit Rational Method to <10 acres for conveyance sizing. \
         Consider continuous simulation (WWHM) for permit applications."
    )
}

const HIGH_COEFFICIENT_WARNING: &str =
    "Very high runoff coefficient (C > 0.95). Verify surface types are correct.";
const FALLBACK_RAINFALL_WARNING: &str =
    "Using Seattle default rainfall data. Verify intensity for your specific jurisdiction.";

/// 면적 경고 규칙을 순서대로 평가해 최대 하나의 경고를 만든다.
pub fn area_warning(total_area_acres: f64) -> Option<String> {
    AREA_LIMIT_RULES
        .iter()
        .find(|rule| total_area_acres > rule.limit_acres)
        .map(|rule| (rule.message)(total_area_acres))
}

/// 계산 엔진 입력값.
#[derive(Debug, Clone)]
pub struct RationalMethodInput {
    /// 보고서 표시 순서를 유지해야 한다.
    pub surfaces: Vec<SurfaceArea>,
    /// 강우강도 [in/hr]
    pub intensity_in_per_hr: f64,
    pub citation: String,
    pub return_period_years: u32,
    pub duration_minutes: u32,
    pub location: String,
    pub coordinates: Coordinates,
    /// false면 대체(Seattle 기본) 강우 자료를 사용했다는 경고를 붙인다.
    pub is_local_data: bool,
    pub time_of_concentration: Option<TimeOfConcentration>,
}

/// 계산 결과. 생성 후에는 읽기 전용이다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculationResult {
    peak_runoff_cfs: f64,
    weighted_coefficient: f64,
    total_area_sq_ft: f64,
    total_area_acres: f64,
    rainfall_intensity_in_per_hr: f64,
    surfaces: Vec<SurfaceArea>,
    return_period_years: u32,
    duration_minutes: u32,
    citation: String,
    location: String,
    coordinates: Coordinates,
    warnings: Vec<String>,
    time_of_concentration: Option<TimeOfConcentration>,
}

impl CalculationResult {
    /// 첨두유출량 Q [cfs]
    pub fn peak_runoff_cfs(&self) -> f64 {
        self.peak_runoff_cfs
    }

    /// 첨두유출량 [gpm]
    pub fn peak_runoff_gpm(&self) -> f64 {
        self.peak_runoff_cfs * GPM_PER_CFS
    }

    pub fn weighted_coefficient(&self) -> f64 {
        self.weighted_coefficient
    }

    pub fn total_area_sq_ft(&self) -> f64 {
        self.total_area_sq_ft
    }

    pub fn total_area_acres(&self) -> f64 {
        self.total_area_acres
    }

    pub fn rainfall_intensity_in_per_hr(&self) -> f64 {
        self.rainfall_intensity_in_per_hr
    }

    pub fn surfaces(&self) -> &[SurfaceArea] {
        &self.surfaces
    }

    /// i번째 지표면이 전체 면적에서 차지하는 비율 [%]. 전체 면적이 0이면 0.
    pub fn surface_share_percent(&self, index: usize) -> f64 {
        match self.surfaces.get(index) {
            Some(s) if self.total_area_sq_ft > 0.0 => s.area_sq_ft() / self.total_area_sq_ft * 100.0,
            _ => 0.0,
        }
    }

    pub fn return_period_years(&self) -> u32 {
        self.return_period_years
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_minutes
    }

    pub fn citation(&self) -> &str {
        &self.citation
    }

    pub fn location(&self) -> &str {
        &self.location
    }

    pub fn coordinates(&self) -> Coordinates {
        self.coordinates
    }

    /// 생성 시 판정된 순서 그대로의 경고 목록.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    pub fn time_of_concentration(&self) -> Option<&TimeOfConcentration> {
        self.time_of_concentration.as_ref()
    }
}

/// Q = C·i·A 를 계산하고 적용성 경고를 붙인다.
pub fn compute(input: RationalMethodInput) -> CalculationResult {
    let total_area_sq_ft: f64 = input.surfaces.iter().map(|s| s.area_sq_ft()).sum();
    let total_area_acres = total_area_sq_ft / SQFT_PER_ACRE;
    let weighted_coefficient = weighted(&input.surfaces);
    let peak_runoff_cfs = weighted_coefficient * input.intensity_in_per_hr * total_area_acres;

    let mut warnings = Vec::new();
    if let Some(w) = area_warning(total_area_acres) {
        warnings.push(w);
    }
    if weighted_coefficient > HIGH_COEFFICIENT_THRESHOLD {
        warnings.push(HIGH_COEFFICIENT_WARNING.to_string());
    }
    if !input.is_local_data {
        warnings.push(FALLBACK_RAINFALL_WARNING.to_string());
    }

    debug!(
        total_area_acres,
        weighted_coefficient,
        intensity = input.intensity_in_per_hr,
        peak_runoff_cfs,
        warnings = warnings.len(),
        "rational method computed"
    );

    CalculationResult {
        peak_runoff_cfs,
        weighted_coefficient,
        total_area_sq_ft,
        total_area_acres,
        rainfall_intensity_in_per_hr: input.intensity_in_per_hr,
        surfaces: input.surfaces,
        return_period_years: input.return_period_years,
        duration_minutes: input.duration_minutes,
        citation: input.citation,
        location: input.location,
        coordinates: input.coordinates,
        warnings,
        time_of_concentration: input.time_of_concentration,
    }
}

/// Tc 계산에 쓸 유출계수 선택.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TcCoefficient {
    /// 고정값 (보통 도시지역 기본값 0.5)
    Fixed(f64),
    /// 입력된 지표면의 가중 C
    SiteWeighted,
}

/// 설계강우 지속시간 선택 방법.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StormDuration {
    /// 표의 지속시간을 직접 지정 [분]
    Fixed(u32),
    /// Tc를 추정해 그 이상인 가장 짧은 지속시간을 사용
    FromTc {
        coefficient: TcCoefficient,
        flow_length_ft: f64,
        slope_percent: f64,
    },
    /// Tc를 따로 추정한 뒤 사용자가 고른 지속시간. Tc는 결과에 기록만 한다.
    WithTc {
        minutes: u32,
        time_of_concentration: TimeOfConcentration,
    },
}

/// 부지 단위 간이 검토 요청.
#[derive(Debug, Clone)]
pub struct QuickCheckRequest {
    pub surfaces: Vec<SurfaceArea>,
    pub coordinates: Coordinates,
    pub location: String,
    pub return_period_years: u32,
    pub duration: StormDuration,
}

/// 강우강도 조회, (선택) Tc 기반 지속시간 결정, Q 계산을 차례로 수행한다.
///
/// 표에 없는 키는 강우강도 0과 대체 자료 경고로 이어지며 계산은 계속된다.
pub fn quick_check(request: QuickCheckRequest) -> CalculationResult {
    let (duration_minutes, time_of_concentration) = match request.duration {
        StormDuration::Fixed(minutes) => (minutes, None),
        StormDuration::FromTc {
            coefficient,
            flow_length_ft,
            slope_percent,
        } => {
            let c = match coefficient {
                TcCoefficient::Fixed(c) => c,
                TcCoefficient::SiteWeighted => weighted(&request.surfaces),
            };
            let tc = TimeOfConcentration::estimate(c, flow_length_ft, slope_percent);
            debug!(
                coefficient = c,
                tc_minutes = tc.minutes,
                "time of concentration estimated"
            );
            (tc.recommended_duration(), Some(tc))
        }
        StormDuration::WithTc {
            minutes,
            time_of_concentration,
        } => (minutes, Some(time_of_concentration)),
    };

    let rainfall = intensity_with_citation(
        request.coordinates.latitude,
        request.coordinates.longitude,
        request.return_period_years,
        duration_minutes,
    );

    compute(RationalMethodInput {
        surfaces: request.surfaces,
        intensity_in_per_hr: rainfall.intensity_in_per_hr,
        citation: rainfall.citation,
        return_period_years: request.return_period_years,
        duration_minutes,
        location: request.location,
        coordinates: request.coordinates,
        is_local_data: rainfall.is_local,
        time_of_concentration,
    })
}
