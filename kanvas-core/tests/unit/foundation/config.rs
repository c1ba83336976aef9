use super::*;

#[test]
fn defaults_match_cache_thresholds() {
    let cfg = RenderConfig::default();
    assert_eq!(cfg.cache_visible, 256.0);
    assert_eq!(cfg.cache_size, 512.0);
    assert!(!cfg.disable_caching);
    cfg.validate().unwrap();
}

#[test]
fn json_fills_missing_fields_with_defaults() {
    let cfg = RenderConfig::from_json_str(r#"{ "cache_size": 128, "debug_cache": true }"#).unwrap();
    assert_eq!(cfg.cache_size, 128.0);
    assert_eq!(cfg.cache_visible, 256.0);
    assert!(cfg.debug_cache);
}

#[test]
fn json_rejects_non_positive_cache_size() {
    let err = RenderConfig::from_json_str(r#"{ "cache_size": 0 }"#).unwrap_err();
    assert!(matches!(err, KanvasError::Validation(_)));
}

#[test]
fn malformed_json_is_a_serde_error() {
    let err = RenderConfig::from_json_str("{ nope").unwrap_err();
    assert!(matches!(err, KanvasError::Serde(_)));
}

#[test]
fn overrides_apply_parsable_values_only() {
    let cfg = RenderConfig::default().with_overrides(|key| match key {
        "KANVAS_CACHE_VISIBLE" => Some("64".to_string()),
        "KANVAS_CACHE_SIZE" => Some("not a number".to_string()),
        "KANVAS_DISABLE_CACHING" => Some("true".to_string()),
        _ => None,
    });
    assert_eq!(cfg.cache_visible, 64.0);
    assert_eq!(cfg.cache_size, 512.0);
    assert!(cfg.disable_caching);
    assert!(!cfg.debug_cache);
}
