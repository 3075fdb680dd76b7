//! Rational Method 유출량 계산 모듈 모음.
//! 강우강도 표, 유출계수 카탈로그, 도달시간, 가중 유출계수, 최종 계산 엔진으로 구성한다.

pub mod rainfall_table;
pub mod rational_method;
pub mod runoff_coefficients;
pub mod time_of_concentration;
pub mod weighted_coefficient;

pub use rainfall_table::{
    duration_label, intensity_with_citation, is_local, lookup, GeographicBounds,
    RainfallIntensity, DURATIONS_MINUTES, KING_COUNTY_BOUNDS, RETURN_PERIODS,
};
pub use rational_method::{
    area_warning, compute, quick_check, CalculationResult, QuickCheckRequest,
    RationalMethodInput, StormDuration, TcCoefficient,
};
pub use runoff_coefficients::{coefficient_of, describe, find_surface, SurfaceType};
pub use time_of_concentration::{
    estimate_tc, recommend_duration, TimeOfConcentration, DEFAULT_TC_COEFFICIENT,
};
pub use weighted_coefficient::weighted;

use serde::{Deserialize, Serialize};

use crate::units::{convert_area, AreaUnit};

/// 지표면 입력 처리 중 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceError {
    /// 면적이 음수이거나 유한하지 않음
    InvalidArea(&'static str),
    /// 카탈로그에 없는 표면 라벨
    UnknownSurfaceType(String),
    /// `<라벨>=<면적>` 형식이 아님
    MalformedEntry(String),
}

impl std::fmt::Display for SurfaceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SurfaceError::InvalidArea(msg) => write!(f, "invalid area: {msg}"),
            SurfaceError::UnknownSurfaceType(label) => {
                write!(f, "unknown surface type: {label}")
            }
            SurfaceError::MalformedEntry(entry) => {
                write!(f, "expected <surface>=<area>, got: {entry}")
            }
        }
    }
}

impl std::error::Error for SurfaceError {}

/// 위경도 좌표(도).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// 한 종류의 지표면과 그 면적.
///
/// 유출계수는 생성 시점에 카탈로그에서 복사해 두며 이후 바뀌지 않는다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceArea {
    surface_type: SurfaceType,
    area_sq_ft: f64,
    coefficient: f64,
}

impl SurfaceArea {
    pub fn new(surface_type: SurfaceType, area_sq_ft: f64) -> Result<Self, SurfaceError> {
        if !area_sq_ft.is_finite() {
            return Err(SurfaceError::InvalidArea("area must be a finite number"));
        }
        if area_sq_ft < 0.0 {
            return Err(SurfaceError::InvalidArea("area must not be negative"));
        }
        Ok(Self {
            surface_type,
            area_sq_ft,
            coefficient: coefficient_of(surface_type),
        })
    }

    pub fn surface_type(&self) -> SurfaceType {
        self.surface_type
    }

    pub fn area_sq_ft(&self) -> f64 {
        self.area_sq_ft
    }

    pub fn coefficient(&self) -> f64 {
        self.coefficient
    }
}

/// `Lawns=5000` 형태의 입력을 해석해 지표면을 만든다. 면적은 `unit` 기준으로 읽는다.
pub fn parse_surface_entry(entry: &str, unit: AreaUnit) -> Result<SurfaceArea, SurfaceError> {
    let (label, area) = entry
        .split_once('=')
        .or_else(|| entry.rsplit_once(':'))
        .ok_or_else(|| SurfaceError::MalformedEntry(entry.to_string()))?;
    let surface_type: SurfaceType = label.parse()?;
    let area: f64 = area
        .trim()
        .replace(',', "")
        .parse()
        .map_err(|_| SurfaceError::MalformedEntry(entry.to_string()))?;
    SurfaceArea::new(surface_type, convert_area(area, unit, AreaUnit::SquareFoot))
}
