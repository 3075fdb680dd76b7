//! 지오코딩 응답 해석, 캐시, 기본 위치 대체 동작 테스트. 실제 네트워크 호출은 하지 않는다.
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use stormwater_quick_check::config::{GeocoderConfig, SiteDefaults};
use stormwater_quick_check::geocode::{
    parse_search_response, resolve_site_location, CachingGeocoder, GeocodeError,
    GeocodedLocation, Geocoder, LocationSource, NominatimGeocoder,
};

/// 호출 횟수를 세고 항상 같은 결과를 돌려주는 가짜 지오코더.
struct CountingGeocoder {
    calls: AtomicUsize,
    answer: Option<GeocodedLocation>,
}

impl CountingGeocoder {
    fn new(answer: Option<GeocodedLocation>) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            answer,
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Geocoder for CountingGeocoder {
    fn geocode(&self, _address: &str) -> Option<GeocodedLocation> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.answer.clone()
    }
}

fn bellevue() -> GeocodedLocation {
    GeocodedLocation {
        latitude: 47.6101,
        longitude: -122.2015,
        display_name: "Bellevue, King County, Washington, United States".to_string(),
    }
}

#[test]
fn parses_first_nominatim_place() {
    let body = r#"[
        {"lat": "47.6101", "lon": "-122.2015", "display_name": "Bellevue, WA"},
        {"lat": "0", "lon": "0", "display_name": "ignored"}
    ]"#;
    let found = parse_search_response(body, "bellevue").unwrap().unwrap();
    assert_eq!(found.latitude, 47.6101);
    assert_eq!(found.longitude, -122.2015);
    assert_eq!(found.display_name, "Bellevue, WA");
}

#[test]
fn numeric_coordinates_are_accepted() {
    let body = r#"[{"lat": 40.7128, "lon": -74.006, "display_name": "New York"}]"#;
    let found = parse_search_response(body, "nyc").unwrap().unwrap();
    assert_eq!(found.coordinates().latitude, 40.7128);
}

#[test]
fn empty_result_is_not_found() {
    assert!(parse_search_response("[]", "nowhere").unwrap().is_none());
}

#[test]
fn malformed_body_is_parse_error() {
    let err = parse_search_response("<html>rate limited</html>", "x").unwrap_err();
    assert!(matches!(err, GeocodeError::Parse(_)));
}

#[test]
fn unreadable_coordinate_is_rejected() {
    let body = r#"[{"lat": "north", "lon": "-122.2", "display_name": "bad"}]"#;
    let err = parse_search_response(body, "x").unwrap_err();
    assert!(matches!(err, GeocodeError::InvalidCoordinate(_)));
}

#[test]
fn missing_display_name_falls_back_to_query() {
    let body = r#"[{"lat": "47.5", "lon": "-122.3"}]"#;
    let found = parse_search_response(body, "123 Main St").unwrap().unwrap();
    assert_eq!(found.display_name, "123 Main St");
}

#[test]
fn cache_serves_repeat_lookups() {
    let cached = CachingGeocoder::new(
        CountingGeocoder::new(Some(bellevue())),
        Duration::from_secs(3600),
    );
    assert_eq!(cached.geocode("Bellevue, WA"), Some(bellevue()));
    assert_eq!(cached.geocode("  Bellevue, WA "), Some(bellevue()));
    assert_eq!(cached.inner().calls(), 1);
    cached.geocode("Renton, WA");
    assert_eq!(cached.inner().calls(), 2);
}

#[test]
fn cache_remembers_misses() {
    let cached = CachingGeocoder::new(CountingGeocoder::new(None), Duration::from_secs(3600));
    assert!(cached.geocode("zzzz").is_none());
    assert!(cached.geocode("zzzz").is_none());
    assert_eq!(cached.inner().calls(), 1);
}

#[test]
fn expired_entries_are_refetched() {
    let cached = CachingGeocoder::new(CountingGeocoder::new(Some(bellevue())), Duration::ZERO);
    cached.geocode("Bellevue, WA");
    cached.geocode("Bellevue, WA");
    assert_eq!(cached.inner().calls(), 2);
}

#[test]
fn expired_entries_are_pruned_on_insert() {
    let short = CachingGeocoder::new(CountingGeocoder::new(Some(bellevue())), Duration::ZERO);
    for addr in ["Bellevue", "Renton", "Kent", "Tukwila"] {
        short.geocode(addr);
    }
    assert_eq!(short.len(), 1);

    let long = CachingGeocoder::new(
        CountingGeocoder::new(Some(bellevue())),
        Duration::from_secs(3600),
    );
    assert!(long.is_empty());
    for addr in ["Bellevue", "Renton", "Kent"] {
        long.geocode(addr);
    }
    assert_eq!(long.len(), 3);
}

#[test]
fn blank_address_never_reaches_inner_geocoder() {
    let cached = CachingGeocoder::new(
        CountingGeocoder::new(Some(bellevue())),
        Duration::from_secs(60),
    );
    assert!(cached.geocode("   ").is_none());
    assert_eq!(cached.inner().calls(), 0);
}

#[test]
fn no_address_uses_default_site() {
    let defaults = SiteDefaults::default();
    let fake = CountingGeocoder::new(Some(bellevue()));
    let site = resolve_site_location(Some(&fake), None, &defaults);
    assert_eq!(site.source, LocationSource::Default);
    assert_eq!(site.label, "Seattle, WA (default)");
    assert_eq!(site.coordinates, defaults.coordinates());

    let blank = resolve_site_location(Some(&fake), Some("  "), &defaults);
    assert_eq!(blank.source, LocationSource::Default);
    assert_eq!(fake.calls(), 0);
}

#[test]
fn geocoded_address_replaces_default() {
    let fake = CountingGeocoder::new(Some(bellevue()));
    let site = resolve_site_location(Some(&fake), Some("Bellevue"), &SiteDefaults::default());
    assert_eq!(site.source, LocationSource::Geocoded);
    assert_eq!(site.coordinates, bellevue().coordinates());
    assert_eq!(site.label, bellevue().display_name);
}

#[test]
fn failed_lookup_falls_back_to_default() {
    let defaults = SiteDefaults::default();
    let fake = CountingGeocoder::new(None);
    let site = resolve_site_location(Some(&fake), Some("Atlantis"), &defaults);
    assert_eq!(site.source, LocationSource::GeocodeFailed);
    assert_eq!(site.coordinates, defaults.coordinates());

    let disabled = resolve_site_location(None, Some("Bellevue"), &defaults);
    assert_eq!(disabled.source, LocationSource::GeocodeFailed);
}

#[test]
fn unreachable_service_is_not_found() {
    let cfg = GeocoderConfig {
        endpoint: "http://127.0.0.1:9/search".to_string(),
        timeout_secs: 1,
        ..GeocoderConfig::default()
    };
    let geocoder = NominatimGeocoder::new(&cfg).unwrap();
    assert!(geocoder.geocode("").is_none());
    assert!(geocoder.geocode("Seattle, WA").is_none());
}
