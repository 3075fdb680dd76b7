//! 계산 결과를 보고서/화면 렌더링 계층에 넘기기 위한 데이터 구조.
//! 텍스트나 PDF 배치는 하지 않으며 JSON 직렬화만 지원한다.

use serde::Serialize;

use crate::hydrology::{duration_label, CalculationResult};

pub const TC_METHOD: &str = "FAA (Federal Aviation Administration)";

const REFERENCES: &[&str] = &[
    "City of Seattle Stormwater Manual (July 2021), Appendix F, Table F.18: Intensity-Duration-Frequency Values",
    "Directors' Rule 10-2021/DWW-200",
    "Seattle Stormwater Manual (2021), Table F.19 (runoff coefficients)",
    "King County Surface Water Design Manual (2021, Amended 2024), Section 3.2.1, Table 3.2.1.A",
    "Rational Method per Seattle SWM Appendix F, Section F-6; King County SWDM Section 3.2.1 (areas < 10 acres)",
];

const DISCLAIMER: &[&str] = &[
    "Both Seattle and King County require continuous simulation (WWHM/MGSFlood) for most permit applications.",
    "This tool provides preliminary estimates for conveyance sizing only.",
    "All values should be verified by a licensed professional engineer.",
    "Consult local jurisdiction requirements for design standards.",
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationSection {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    /// "47.606200N, 122.332100W" 형식
    pub display: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignStormSection {
    pub return_period_years: u32,
    pub duration_minutes: u32,
    pub duration_label: String,
    pub intensity_in_per_hr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeOfConcentrationSection {
    pub minutes: f64,
    pub flow_length_ft: f64,
    pub slope_percent: f64,
    pub method: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceRow {
    pub surface_type: String,
    pub area_sq_ft: f64,
    pub percent_of_total: f64,
    pub coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SiteTotals {
    pub area_sq_ft: f64,
    pub area_acres: f64,
    pub weighted_coefficient: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunoffSection {
    /// "Q = 0.900 × 0.58 in/hr × 0.230 acres"
    pub formula: String,
    pub peak_runoff_cfs: f64,
    pub peak_runoff_gpm: f64,
}

/// 렌더링 계층이 소비하는 보고서 구조.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResultReport {
    pub title: &'static str,
    pub location: LocationSection,
    pub design_storm: DesignStormSection,
    pub time_of_concentration: Option<TimeOfConcentrationSection>,
    pub surfaces: Vec<SurfaceRow>,
    pub totals: SiteTotals,
    pub runoff: RunoffSection,
    pub warnings: Vec<String>,
    pub citation: String,
    pub references: Vec<&'static str>,
    pub disclaimer: Vec<&'static str>,
}

impl ResultReport {
    pub fn from_result(result: &CalculationResult) -> Self {
        let coords = result.coordinates();
        let surfaces = result
            .surfaces()
            .iter()
            .enumerate()
            .map(|(i, s)| SurfaceRow {
                surface_type: s.surface_type().label().to_string(),
                area_sq_ft: s.area_sq_ft(),
                percent_of_total: result.surface_share_percent(i),
                coefficient: s.coefficient(),
            })
            .collect();

        Self {
            title: "STORMWATER RUNOFF CALCULATION - RATIONAL METHOD",
            location: LocationSection {
                label: result.location().to_string(),
                latitude: coords.latitude,
                longitude: coords.longitude,
                display: format_coordinates(coords.latitude, coords.longitude),
            },
            design_storm: DesignStormSection {
                return_period_years: result.return_period_years(),
                duration_minutes: result.duration_minutes(),
                duration_label: duration_label(result.duration_minutes()),
                intensity_in_per_hr: result.rainfall_intensity_in_per_hr(),
            },
            time_of_concentration: result.time_of_concentration().map(|tc| {
                TimeOfConcentrationSection {
                    minutes: tc.minutes,
                    flow_length_ft: tc.flow_length_ft,
                    slope_percent: tc.slope_percent,
                    method: TC_METHOD,
                }
            }),
            surfaces,
            totals: SiteTotals {
                area_sq_ft: result.total_area_sq_ft(),
                area_acres: result.total_area_acres(),
                weighted_coefficient: result.weighted_coefficient(),
            },
            runoff: RunoffSection {
                formula: format!(
                    "Q = {:.3} × {:.2} in/hr × {:.3} acres",
                    result.weighted_coefficient(),
                    result.rainfall_intensity_in_per_hr(),
                    result.total_area_acres()
                ),
                peak_runoff_cfs: result.peak_runoff_cfs(),
                peak_runoff_gpm: result.peak_runoff_gpm(),
            },
            warnings: result.warnings().to_vec(),
            citation: result.citation().to_string(),
            references: REFERENCES.to_vec(),
            disclaimer: DISCLAIMER.to_vec(),
        }
    }

    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// 북반구/서반구 표기로 좌표 문자열을 만든다. 남위·동경이면 S/E를 붙인다.
pub fn format_coordinates(latitude: f64, longitude: f64) -> String {
    let ns = if latitude >= 0.0 { 'N' } else { 'S' };
    let ew = if longitude <= 0.0 { 'W' } else { 'E' };
    format!(
        "{:.6}{ns}, {:.6}{ew}",
        latitude.abs(),
        longitude.abs()
    )
}
