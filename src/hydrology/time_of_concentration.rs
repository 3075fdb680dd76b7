//! 도달시간(Tc) 추정. FAA 방법을 사용한다.
//!
//! Tc = 1.8 × (1.1 − C) × L^0.5 / S^0.333
//! - C: 유출계수, L: 최장 유로 길이 [ft], S: 평균 경사 [%]
//!
//! 결과는 이 도구가 지원하는 지속시간 범위 [5, 180]분으로 포화시킨다. 범위 밖의 값은
//! 경고 없이 잘린다. 물리적 한계가 아니라 IDF 표 범위에 맞춘 것이다.

use serde::Serialize;

use super::rainfall_table::DURATIONS_MINUTES;

pub const MIN_TC_MINUTES: f64 = 5.0;
pub const MAX_TC_MINUTES: f64 = 180.0;

/// 지표면 구성이 정해지기 전에 쓰는 도시지역 기본 C.
pub const DEFAULT_TC_COEFFICIENT: f64 = 0.5;

/// Tc 계산 입력과 결과를 함께 담는다. 계산 결과에 그대로 실린다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TimeOfConcentration {
    pub minutes: f64,
    pub flow_length_ft: f64,
    pub slope_percent: f64,
}

impl TimeOfConcentration {
    pub fn estimate(coefficient: f64, flow_length_ft: f64, slope_percent: f64) -> Self {
        Self {
            minutes: estimate_tc(coefficient, flow_length_ft, slope_percent),
            flow_length_ft,
            slope_percent,
        }
    }

    pub fn recommended_duration(&self) -> u32 {
        recommend_duration(self.minutes)
    }
}

/// FAA 식으로 Tc[분]를 계산한다. 길이나 경사가 0 이하이면 최소값 5분을 반환한다.
pub fn estimate_tc(coefficient: f64, flow_length_ft: f64, slope_percent: f64) -> f64 {
    if flow_length_ft <= 0.0 || slope_percent <= 0.0 {
        return MIN_TC_MINUTES;
    }
    let tc = 1.8 * (1.1 - coefficient) * flow_length_ft.sqrt() / slope_percent.powf(0.333);
    tc.clamp(MIN_TC_MINUTES, MAX_TC_MINUTES)
}

/// Tc 이상인 가장 짧은 표 지속시간을 고른다. Tc가 모든 값을 넘으면 최대 지속시간.
pub fn recommend_duration(tc_minutes: f64) -> u32 {
    DURATIONS_MINUTES
        .iter()
        .copied()
        .find(|&d| f64::from(d) >= tc_minutes)
        .unwrap_or(DURATIONS_MINUTES[DURATIONS_MINUTES.len() - 1])
}
