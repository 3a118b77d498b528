use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Result<String, ()> {
    let map: HashMap<String, String> = pairs.iter().map(|(k, v)| ((*k).to_string(), (*v).to_string())).collect();
    move |key: &str| map.get(key).cloned().ok_or(())
}

#[test]
fn empty_lookup_yields_defaults() {
    let cfg = EditorConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, EditorConfig::default());
    assert_eq!(cfg.chat_latency(), Duration::from_millis(2500));
    assert_eq!(cfg.section_latency(), Duration::from_millis(2500));
    assert_eq!(cfg.palette_id, "original");
    assert_eq!(cfg.initial_page, PreviewPage::DataCapture);
}

#[test]
fn overrides_are_parsed() {
    let cfg = EditorConfig::from_lookup(lookup(&[
        (ENV_CHAT_LATENCY_MS, "1500"),
        (ENV_SECTION_LATENCY_MS, " 10 "),
        (ENV_PALETTE, "ocean-blue"),
        (ENV_PAGE, "results"),
    ]))
    .unwrap();
    assert_eq!(cfg.chat_latency_ms, 1500);
    assert_eq!(cfg.section_latency_ms, 10);
    assert_eq!(cfg.palette_id, "ocean-blue");
    assert_eq!(cfg.initial_page, PreviewPage::Results);
}

#[test]
fn bad_number_errors() {
    let err = EditorConfig::from_lookup(lookup(&[(ENV_CHAT_LATENCY_MS, "fast")])).unwrap_err();
    assert_eq!(err.error_code(), "E_CONFIG_NUMBER");
    assert!(err.to_string().contains(ENV_CHAT_LATENCY_MS));
}

#[test]
fn negative_number_errors() {
    let err = EditorConfig::from_lookup(lookup(&[(ENV_SECTION_LATENCY_MS, "-5")])).unwrap_err();
    assert!(matches!(err, ConfigError::InvalidNumber { var: ENV_SECTION_LATENCY_MS, .. }));
}

#[test]
fn unknown_palette_errors() {
    let err = EditorConfig::from_lookup(lookup(&[(ENV_PALETTE, "neon")])).unwrap_err();
    assert!(matches!(err, ConfigError::UnknownPalette(ref id) if id == "neon"));
}

#[test]
fn unknown_page_errors() {
    let err = EditorConfig::from_lookup(lookup(&[(ENV_PAGE, "checkout")])).unwrap_err();
    assert_eq!(err.error_code(), "E_CONFIG_PAGE");
}
