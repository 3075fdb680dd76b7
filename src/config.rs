use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::hydrology::{Coordinates, DEFAULT_TC_COEFFICIENT};
use crate::units::{AreaUnit, LengthUnit};

pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 주소가 없거나 지오코딩에 실패했을 때 쓰는 기본 부지 위치.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteDefaults {
    pub latitude: f64,
    pub longitude: f64,
    pub label: String,
}

impl Default for SiteDefaults {
    fn default() -> Self {
        Self {
            latitude: 47.6062,
            longitude: -122.3321,
            label: "Seattle, WA (default)".to_string(),
        }
    }
}

impl SiteDefaults {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// 설계강우 기본값. 10년 빈도, 1시간 지속.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StormDefaults {
    pub return_period_years: u32,
    pub duration_minutes: u32,
}

impl Default for StormDefaults {
    fn default() -> Self {
        Self {
            return_period_years: 10,
            duration_minutes: 60,
        }
    }
}

/// 도달시간 입력 기본값.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TcDefaults {
    pub coefficient: f64,
    pub flow_length_ft: f64,
    pub slope_percent: f64,
}

impl Default for TcDefaults {
    fn default() -> Self {
        Self {
            coefficient: DEFAULT_TC_COEFFICIENT,
            flow_length_ft: 200.0,
            slope_percent: 2.0,
        }
    }
}

/// Nominatim 지오코더 설정.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GeocoderConfig {
    pub enabled: bool,
    pub endpoint: String,
    pub user_agent: String,
    pub timeout_secs: u64,
    /// 검색 국가 제한(쉼표 구분). 빈 문자열이면 제한 없음.
    pub country_codes: String,
    pub cache_ttl_secs: u64,
}

impl Default for GeocoderConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            endpoint: "https://nominatim.openstreetmap.org/search".to_string(),
            user_agent: "StormwaterQuickCheck/1.0 (civil-engineering-tool)".to_string(),
            timeout_secs: 10,
            country_codes: "us".to_string(),
            cache_ttl_secs: 3600,
        }
    }
}

/// 입력 단위 기본값.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputUnits {
    pub area: AreaUnit,
    pub length: LengthUnit,
}

impl Default for InputUnits {
    fn default() -> Self {
        Self {
            area: AreaUnit::SquareFoot,
            length: LengthUnit::Foot,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteDefaults,
    pub storm: StormDefaults,
    pub time_of_concentration: TcDefaults,
    pub geocoder: GeocoderConfig,
    pub units: InputUnits,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config file I/O error: {e}"),
            ConfigError::Serde(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성해 저장한다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        tracing::info!(path = %path.display(), "wrote default config");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 지정 경로에 저장한다.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
