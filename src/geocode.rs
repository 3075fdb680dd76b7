//! 주소 → 좌표 변환(지오코딩).
//!
//! 계산 엔진은 네트워크에 의존하지 않는다. 지오코더는 [`Geocoder`] 트레이트 뒤에 두고,
//! 시간 초과나 응답 오류는 모두 "찾지 못함"(`None`)으로 접어서 돌려준다.

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde::Deserialize;
use tracing::{debug, warn};

use crate::config::{GeocoderConfig, SiteDefaults};
use crate::hydrology::Coordinates;

/// 지오코딩 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct GeocodedLocation {
    pub latitude: f64,
    pub longitude: f64,
    pub display_name: String,
}

impl GeocodedLocation {
    pub fn coordinates(&self) -> Coordinates {
        Coordinates::new(self.latitude, self.longitude)
    }
}

/// 지오코딩 내부 오류. 호출자에게는 전파하지 않고 로그만 남긴다.
#[derive(Debug)]
pub enum GeocodeError {
    /// 전송/시간초과/HTTP 상태 오류
    Http(reqwest::Error),
    /// 응답 JSON 파싱 오류
    Parse(serde_json::Error),
    /// 위경도 값을 숫자로 읽을 수 없음
    InvalidCoordinate(String),
}

impl std::fmt::Display for GeocodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeocodeError::Http(e) => write!(f, "geocoder request failed: {e}"),
            GeocodeError::Parse(e) => write!(f, "geocoder response malformed: {e}"),
            GeocodeError::InvalidCoordinate(v) => write!(f, "invalid coordinate value: {v}"),
        }
    }
}

impl std::error::Error for GeocodeError {}

impl From<reqwest::Error> for GeocodeError {
    fn from(value: reqwest::Error) -> Self {
        GeocodeError::Http(value)
    }
}

impl From<serde_json::Error> for GeocodeError {
    fn from(value: serde_json::Error) -> Self {
        GeocodeError::Parse(value)
    }
}

/// 주소 문자열을 좌표로 바꾼다. 실패는 모두 `None`.
pub trait Geocoder {
    fn geocode(&self, address: &str) -> Option<GeocodedLocation>;
}

#[derive(Debug, Deserialize)]
struct NominatimPlace {
    lat: serde_json::Value,
    lon: serde_json::Value,
    display_name: Option<String>,
}

fn coordinate_value(value: &serde_json::Value) -> Result<f64, GeocodeError> {
    let parsed = match value {
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        serde_json::Value::Number(n) => n.as_f64(),
        _ => None,
    };
    parsed
        .filter(|v| v.is_finite())
        .ok_or_else(|| GeocodeError::InvalidCoordinate(value.to_string()))
}

/// Nominatim `/search?format=json` 응답 본문을 해석한다. 빈 배열이면 `Ok(None)`.
pub fn parse_search_response(
    body: &str,
    query: &str,
) -> Result<Option<GeocodedLocation>, GeocodeError> {
    let places: Vec<NominatimPlace> = serde_json::from_str(body)?;
    let Some(first) = places.into_iter().next() else {
        return Ok(None);
    };
    Ok(Some(GeocodedLocation {
        latitude: coordinate_value(&first.lat)?,
        longitude: coordinate_value(&first.lon)?,
        display_name: first
            .display_name
            .filter(|n| !n.trim().is_empty())
            .unwrap_or_else(|| query.to_string()),
    }))
}

/// OpenStreetMap Nominatim 검색 API 클라이언트.
pub struct NominatimGeocoder {
    client: reqwest::blocking::Client,
    endpoint: String,
    country_codes: String,
}

impl NominatimGeocoder {
    pub fn new(cfg: &GeocoderConfig) -> Result<Self, GeocodeError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .user_agent(cfg.user_agent.clone())
            .build()?;
        Ok(Self {
            client,
            endpoint: cfg.endpoint.clone(),
            country_codes: cfg.country_codes.clone(),
        })
    }

    fn search(&self, query: &str) -> Result<Option<GeocodedLocation>, GeocodeError> {
        let mut params = vec![("q", query), ("format", "json"), ("limit", "1")];
        if !self.country_codes.trim().is_empty() {
            params.push(("countrycodes", self.country_codes.trim()));
        }
        let body = self
            .client
            .get(&self.endpoint)
            .query(&params)
            .send()?
            .error_for_status()?
            .text()?;
        parse_search_response(&body, query)
    }
}

impl Geocoder for NominatimGeocoder {
    fn geocode(&self, address: &str) -> Option<GeocodedLocation> {
        let query = address.trim();
        if query.is_empty() {
            return None;
        }
        match self.search(query) {
            Ok(Some(found)) => {
                debug!(query, lat = found.latitude, lon = found.longitude, "geocoded");
                Some(found)
            }
            Ok(None) => {
                warn!(query, "geocoder returned no match");
                None
            }
            Err(err) => {
                warn!(query, error = %err, "geocoding failed");
                None
            }
        }
    }
}

/// 결과(실패 포함)를 TTL 동안 기억하는 지오코더 래퍼.
pub struct CachingGeocoder<G> {
    inner: G,
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, Option<GeocodedLocation>)>>,
}

impl<G: Geocoder> CachingGeocoder<G> {
    pub fn new(inner: G, ttl: Duration) -> Self {
        Self {
            inner,
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }

    /// 현재 보관 중인 항목 수.
    pub fn len(&self) -> usize {
        self.entries.lock().map_or(0, |entries| entries.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<G: Geocoder> Geocoder for CachingGeocoder<G> {
    fn geocode(&self, address: &str) -> Option<GeocodedLocation> {
        let key = address.trim().to_string();
        if key.is_empty() {
            return None;
        }
        if let Ok(entries) = self.entries.lock() {
            if let Some((stored_at, cached)) = entries.get(&key) {
                if stored_at.elapsed() < self.ttl {
                    return cached.clone();
                }
            }
        }
        let fresh = self.inner.geocode(&key);
        if let Ok(mut entries) = self.entries.lock() {
            // 만료된 항목은 새 항목을 넣을 때 함께 치운다.
            entries.retain(|_, (stored_at, _)| stored_at.elapsed() < self.ttl);
            entries.insert(key, (Instant::now(), fresh.clone()));
        }
        fresh
    }
}

/// 부지 위치가 어디서 왔는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationSource {
    /// 주소 입력 없음, 기본 위치 사용
    Default,
    /// 좌표를 직접 입력
    Coordinates,
    Geocoded,
    /// 주소는 있었으나 찾지 못해 기본 위치로 대체
    GeocodeFailed,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SiteLocation {
    pub coordinates: Coordinates,
    pub label: String,
    pub source: LocationSource,
}

/// 주소를 지오코딩하고, 없거나 실패하면 기본 위치로 대체한다.
///
/// 지오코더가 꺼져 있으면(`None`) 주소가 있어도 찾지 못한 것으로 본다.
pub fn resolve_site_location(
    geocoder: Option<&dyn Geocoder>,
    address: Option<&str>,
    default: &SiteDefaults,
) -> SiteLocation {
    let fallback = |source| SiteLocation {
        coordinates: default.coordinates(),
        label: default.label.clone(),
        source,
    };
    let Some(addr) = address.map(str::trim).filter(|a| !a.is_empty()) else {
        return fallback(LocationSource::Default);
    };
    match geocoder.and_then(|g| g.geocode(addr)) {
        Some(found) => SiteLocation {
            coordinates: found.coordinates(),
            label: found.display_name,
            source: LocationSource::Geocoded,
        },
        None => fallback(LocationSource::GeocodeFailed),
    }
}
