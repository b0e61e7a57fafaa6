use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_owned(), (*v).to_owned())).collect();
    move |key| map.get(key).cloned()
}

#[test]
fn empty_lookup_yields_defaults() {
    let cfg = SiteConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, SiteConfig::default());
    assert_eq!(cfg.weather.api_key, None);
    assert_eq!(cfg.weather.base_url, DEFAULT_WEATHER_BASE_URL);
    assert_eq!(cfg.geolocation, GeoOptions { timeout_ms: 5_000, maximum_age_ms: 600_000 });
    assert_eq!(cfg.hot_threshold_c, 30.0);
    assert_eq!(cfg.default_hemisphere, Hemisphere::North);
    assert_eq!(cfg.theme_key, "preferred-theme");
    assert!(cfg.contact.is_none());
}

#[test]
fn overrides_are_applied() {
    let cfg = SiteConfig::from_lookup(lookup(&[
        ("SITEFX_WEATHER_API_KEY", "abc123"),
        ("SITEFX_WEATHER_BASE_URL", "http://127.0.0.1:9000/weather/"),
        ("SITEFX_GEO_TIMEOUT_MS", "2500"),
        ("SITEFX_GEO_MAX_AGE_MS", "0"),
        ("SITEFX_HOT_THRESHOLD_C", "27.5"),
        ("SITEFX_DEFAULT_HEMISPHERE", "south"),
        ("SITEFX_THEME_KEY", "site-theme"),
    ]))
    .unwrap();

    assert_eq!(cfg.weather.api_key.as_deref(), Some("abc123"));
    assert_eq!(cfg.weather.base_url, "http://127.0.0.1:9000/weather");
    assert_eq!(cfg.geolocation, GeoOptions { timeout_ms: 2_500, maximum_age_ms: 0 });
    assert_eq!(cfg.hot_threshold_c, 27.5);
    assert_eq!(cfg.default_hemisphere, Hemisphere::South);
    assert_eq!(cfg.theme_key, "site-theme");
}

#[test]
fn blank_values_count_as_unset() {
    let cfg = SiteConfig::from_lookup(lookup(&[("SITEFX_WEATHER_API_KEY", "   "), ("SITEFX_GEO_TIMEOUT_MS", "")]))
        .unwrap();
    assert_eq!(cfg.weather.api_key, None);
    assert_eq!(cfg.geolocation.timeout_ms, DEFAULT_GEO_TIMEOUT_MS);
}

#[test]
fn bad_number_errors_with_key() {
    let err = SiteConfig::from_lookup(lookup(&[("SITEFX_GEO_TIMEOUT_MS", "soon")])).unwrap_err();
    assert!(matches!(&err, ConfigError::Invalid { key, .. } if key == "SITEFX_GEO_TIMEOUT_MS"));
    assert!(err.to_string().contains("'soon'"));
}

#[test]
fn bad_hemisphere_errors() {
    let err = SiteConfig::from_lookup(lookup(&[("SITEFX_DEFAULT_HEMISPHERE", "up")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { .. }));
}

#[test]
fn full_contact_ids_enable_contact() {
    let cfg = SiteConfig::from_lookup(lookup(&[
        ("SITEFX_CONTACT_SERVICE_ID", "svc"),
        ("SITEFX_CONTACT_TEMPLATE_ID", "tpl"),
        ("SITEFX_CONTACT_PUBLIC_KEY", "pk"),
    ]))
    .unwrap();
    let contact = cfg.contact.unwrap();
    assert_eq!(contact.endpoint, DEFAULT_CONTACT_ENDPOINT);
    assert_eq!(contact.service_id, "svc");
    assert_eq!(contact.template_id, "tpl");
    assert_eq!(contact.public_key, "pk");
}

#[test]
fn partial_contact_ids_error() {
    let err = SiteConfig::from_lookup(lookup(&[
        ("SITEFX_CONTACT_SERVICE_ID", "svc"),
        ("SITEFX_CONTACT_PUBLIC_KEY", "pk"),
    ]))
    .unwrap_err();
    assert_eq!(err, ConfigError::IncompleteContact("SITEFX_CONTACT_TEMPLATE_ID"));
}

#[test]
fn data_attribute_names() {
    assert_eq!(data_attribute("SITEFX_WEATHER_API_KEY"), "data-weather-api-key");
    assert_eq!(data_attribute("SITEFX_GEO_MAX_AGE_MS"), "data-geo-max-age-ms");
}

/// The only test that touches the process environment.
#[test]
fn from_env_reads_sitefx_keys() {
    unsafe {
        std::env::set_var("SITEFX_HOT_THRESHOLD_C", "33");
    }
    let cfg = SiteConfig::from_env();
    unsafe {
        std::env::remove_var("SITEFX_HOT_THRESHOLD_C");
    }
    assert_eq!(cfg.unwrap().hot_threshold_c, 33.0);
}
