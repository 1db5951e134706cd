use super::*;

#[test]
fn test_config_service() {
    let mut service = ConfigService::new();
    assert_eq!(service.search().max_results, 100);

    service.set_max_results(10);
    service.set_dedup_scope(DedupScope::Chapter);
    service.set_pattern_mode(PatternMode::Regex);
    assert_eq!(service.search().max_results, 10);
    assert_eq!(service.search().dedup_scope, DedupScope::Chapter);
    assert_eq!(service.search().pattern_mode, PatternMode::Regex);
}

#[test]
fn test_from_settings() {
    let mut settings = Settings::default();
    settings.search.ellipsis = "…".to_string();
    let service = ConfigService::from_settings(settings);
    assert_eq!(service.search().ellipsis, "…");
}

#[test]
fn test_service_trait() {
    let service = ConfigService::new();
    assert_eq!(service.name(), "ConfigService");
}
