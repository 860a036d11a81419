use super::*;
use std::collections::HashMap;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn from_lookup_applies_defaults() {
    let cfg = ConsoleConfig::from_lookup(lookup_from(&[("RECORDS_API_URL", "http://records.local:8080")])).unwrap();
    assert_eq!(cfg.records_api_url, "http://records.local:8080");
    assert_eq!(cfg.port, DEFAULT_PORT);
    assert!(cfg.cookie_secure);
    assert_eq!(cfg.admin_signup_role, DEFAULT_ADMIN_SIGNUP_ROLE);
}

#[test]
fn from_lookup_requires_records_api_url() {
    let err = ConsoleConfig::from_lookup(lookup_from(&[])).unwrap_err();
    assert_eq!(err, ConfigError::Missing { var: "RECORDS_API_URL" });

    let err = ConsoleConfig::from_lookup(lookup_from(&[("RECORDS_API_URL", "   ")])).unwrap_err();
    assert_eq!(err, ConfigError::Missing { var: "RECORDS_API_URL" });
}

#[test]
fn from_lookup_rejects_url_without_scheme() {
    let err = ConsoleConfig::from_lookup(lookup_from(&[("RECORDS_API_URL", "records.local")])).unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "RECORDS_API_URL", .. }));
}

#[test]
fn from_lookup_trims_trailing_slashes() {
    let cfg = ConsoleConfig::from_lookup(lookup_from(&[("RECORDS_API_URL", "https://records.local/api//")])).unwrap();
    assert_eq!(cfg.records_api_url, "https://records.local/api");
}

#[test]
fn from_lookup_parses_overrides() {
    let cfg = ConsoleConfig::from_lookup(lookup_from(&[
        ("RECORDS_API_URL", "http://records.local"),
        ("PORT", "8088"),
        ("COOKIE_SECURE", "off"),
        ("ADMIN_SIGNUP_ROLE", " SUPER_ADMIN "),
    ]))
    .unwrap();
    assert_eq!(cfg.port, 8088);
    assert!(!cfg.cookie_secure);
    assert_eq!(cfg.admin_signup_role, "SUPER_ADMIN");
}

#[test]
fn from_lookup_rejects_bad_port() {
    let err = ConsoleConfig::from_lookup(lookup_from(&[("RECORDS_API_URL", "http://records.local"), ("PORT", "http")]))
        .unwrap_err();
    assert_eq!(err, ConfigError::Invalid { var: "PORT", value: "http".into() });
}

#[test]
fn from_lookup_rejects_bad_cookie_secure() {
    let err = ConsoleConfig::from_lookup(lookup_from(&[
        ("RECORDS_API_URL", "http://records.local"),
        ("COOKIE_SECURE", "maybe"),
    ]))
    .unwrap_err();
    assert!(matches!(err, ConfigError::Invalid { var: "COOKIE_SECURE", .. }));
}

#[test]
fn parse_bool_variants() {
    for raw in ["1", "true", "YES", " on "] {
        assert_eq!(parse_bool(raw), Some(true), "expected true for {raw:?}");
    }
    for raw in ["0", "False", "no", "off"] {
        assert_eq!(parse_bool(raw), Some(false), "expected false for {raw:?}");
    }
    assert_eq!(parse_bool(""), None);
}

#[test]
fn asset_url_joins_with_single_slash() {
    let cfg = ConsoleConfig::from_lookup(lookup_from(&[("RECORDS_API_URL", "http://records.local/api/")])).unwrap();
    assert_eq!(cfg.asset_url("uploads/scan.png"), "http://records.local/api/uploads/scan.png");
    assert_eq!(cfg.asset_url("/uploads/scan.png"), "http://records.local/api/uploads/scan.png");
}
