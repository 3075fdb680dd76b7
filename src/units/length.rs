use serde::{Deserialize, Serialize};

/// 길이 단위. 내부 기준은 피트이다. (유출 경로 길이 입력용)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Foot,
    Meter,
    Yard,
}

impl LengthUnit {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ft" | "foot" | "feet" => Some(LengthUnit::Foot),
            "m" | "meter" | "meters" => Some(LengthUnit::Meter),
            "yd" | "yard" | "yards" => Some(LengthUnit::Yard),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            LengthUnit::Foot => "ft",
            LengthUnit::Meter => "m",
            LengthUnit::Yard => "yd",
        }
    }
}

fn to_foot(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Foot => value,
        LengthUnit::Meter => value / 0.3048,
        LengthUnit::Yard => value * 3.0,
    }
}

fn from_foot(value_ft: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Foot => value_ft,
        LengthUnit::Meter => value_ft * 0.3048,
        LengthUnit::Yard => value_ft / 3.0,
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    if from == to {
        return value;
    }
    let ft = to_foot(value, from);
    from_foot(ft, to)
}
