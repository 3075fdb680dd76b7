//! 표면 유형별 유출계수 카탈로그.
//! Seattle Stormwater Manual (2021) Table F.19, King County SWDM Table 3.2.1.A 값을 그대로 담는다.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::SurfaceError;

/// 카탈로그에 등록된 표면 유형. 카탈로그 밖의 라벨은 표현할 수 없다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SurfaceType {
    PavementAndRoofs,
    GravelAreas,
    BareSoil,
    Lawns,
    LandscapedAreas,
    Pasture,
    LightForest,
    DenseForest,
    OpenWater,
}

#[derive(Debug)]
pub struct SurfaceEntry {
    pub surface_type: SurfaceType,
    pub label: &'static str,
    pub coefficient: f64,
    pub description: &'static str,
}

const CATALOG: &[SurfaceEntry] = &[
    SurfaceEntry {
        surface_type: SurfaceType::PavementAndRoofs,
        label: "Pavement and Roofs",
        coefficient: 0.90,
        description: "Streets, parking lots, driveways, rooftops",
    },
    SurfaceEntry {
        surface_type: SurfaceType::GravelAreas,
        label: "Gravel Areas",
        coefficient: 0.80,
        description: "Unpaved roads, gravel parking areas",
    },
    SurfaceEntry {
        surface_type: SurfaceType::BareSoil,
        label: "Bare Soil",
        coefficient: 0.60,
        description: "Exposed earth, construction sites",
    },
    SurfaceEntry {
        surface_type: SurfaceType::Lawns,
        label: "Lawns",
        coefficient: 0.25,
        description: "Maintained grass areas",
    },
    SurfaceEntry {
        surface_type: SurfaceType::LandscapedAreas,
        label: "Landscaped Areas",
        coefficient: 0.20,
        description: "Gardens, planted beds (similar to Pasture)",
    },
    SurfaceEntry {
        surface_type: SurfaceType::Pasture,
        label: "Pasture",
        coefficient: 0.20,
        description: "Pasture land, agricultural grass",
    },
    SurfaceEntry {
        surface_type: SurfaceType::LightForest,
        label: "Light Forest",
        coefficient: 0.15,
        description: "Sparse tree cover, shrubs",
    },
    SurfaceEntry {
        surface_type: SurfaceType::DenseForest,
        label: "Dense Forest",
        coefficient: 0.10,
        description: "Undisturbed natural forest areas",
    },
    SurfaceEntry {
        surface_type: SurfaceType::OpenWater,
        label: "Open Water",
        coefficient: 1.00,
        description: "Ponds, lakes, and wetlands",
    },
];

impl SurfaceType {
    /// 카탈로그 순서대로 나열한 전체 표면 유형.
    pub const ALL: [SurfaceType; 9] = [
        SurfaceType::PavementAndRoofs,
        SurfaceType::GravelAreas,
        SurfaceType::BareSoil,
        SurfaceType::Lawns,
        SurfaceType::LandscapedAreas,
        SurfaceType::Pasture,
        SurfaceType::LightForest,
        SurfaceType::DenseForest,
        SurfaceType::OpenWater,
    ];

    fn entry(self) -> &'static SurfaceEntry {
        // CATALOG는 ALL과 같은 순서로 정의되어 있다.
        &CATALOG[self as usize]
    }

    pub fn label(self) -> &'static str {
        self.entry().label
    }

    pub fn coefficient(self) -> f64 {
        self.entry().coefficient
    }

    pub fn description(self) -> &'static str {
        self.entry().description
    }
}

impl fmt::Display for SurfaceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for SurfaceType {
    type Err = SurfaceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find_surface(s).ok_or_else(|| SurfaceError::UnknownSurfaceType(s.trim().to_string()))
    }
}

pub fn catalog() -> &'static [SurfaceEntry] {
    CATALOG
}

/// 표면 유형의 유출계수 C를 반환한다.
pub fn coefficient_of(surface_type: SurfaceType) -> f64 {
    surface_type.coefficient()
}

/// 표면 유형 설명 문구를 반환한다.
pub fn describe(surface_type: SurfaceType) -> &'static str {
    surface_type.description()
}

/// 라벨로 표면 유형을 찾는다. 대소문자, `-`/`_` 구분자 표기를 모두 허용한다.
pub fn find_surface(name: &str) -> Option<SurfaceType> {
    let wanted = normalize_label(name);
    CATALOG
        .iter()
        .find(|e| normalize_label(e.label) == wanted)
        .map(|e| e.surface_type)
}

fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| if c == '-' || c == '_' { ' ' } else { c })
        .collect::<String>()
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}
