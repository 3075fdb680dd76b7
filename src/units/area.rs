use serde::{Deserialize, Serialize};

/// 1 acre에 해당하는 제곱피트. Rational Method 면적 환산에 그대로 쓰는 고정 상수.
pub const SQFT_PER_ACRE: f64 = 43_560.0;

const SQFT_PER_SQUARE_METER: f64 = 10.763_910_416_709_722;

/// 면적 단위. 내부 기준은 제곱피트이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AreaUnit {
    SquareFoot,
    Acre,
    SquareMeter,
    Hectare,
}

impl AreaUnit {
    /// CLI 문자열(sqft, ac, m2, ha 등)을 단위로 해석한다.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sqft" | "sf" | "ft2" | "square-foot" | "square-feet" => Some(AreaUnit::SquareFoot),
            "ac" | "acre" | "acres" => Some(AreaUnit::Acre),
            "m2" | "sqm" | "square-meter" | "square-meters" => Some(AreaUnit::SquareMeter),
            "ha" | "hectare" | "hectares" => Some(AreaUnit::Hectare),
            _ => None,
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            AreaUnit::SquareFoot => "sq ft",
            AreaUnit::Acre => "acres",
            AreaUnit::SquareMeter => "m²",
            AreaUnit::Hectare => "ha",
        }
    }
}

fn to_square_foot(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareFoot => value,
        AreaUnit::Acre => value * SQFT_PER_ACRE,
        AreaUnit::SquareMeter => value * SQFT_PER_SQUARE_METER,
        AreaUnit::Hectare => value * 10_000.0 * SQFT_PER_SQUARE_METER,
    }
}

fn from_square_foot(value: f64, unit: AreaUnit) -> f64 {
    match unit {
        AreaUnit::SquareFoot => value,
        AreaUnit::Acre => value / SQFT_PER_ACRE,
        AreaUnit::SquareMeter => value / SQFT_PER_SQUARE_METER,
        AreaUnit::Hectare => value / (10_000.0 * SQFT_PER_SQUARE_METER),
    }
}

/// 면적을 변환한다.
pub fn convert_area(value: f64, from: AreaUnit, to: AreaUnit) -> f64 {
    if from == to {
        return value;
    }
    let sqft = to_square_foot(value, from);
    from_square_foot(sqft, to)
}
