#[cfg(test)]
mod tests {
    use crowd_config::ConfigLoader;
    use crowd_config::schema::*;
    use std::collections::HashMap;
    use std::io::Write;

    // ── Default tests ──────────────────────────────────────────

    #[test]
    fn test_crowd_config_defaults() {
        let config = CrowdConfig::default();
        assert_eq!(config.service.base_url, "http://localhost:5000");
        assert_eq!(config.service.request_timeout_secs, 10);
        assert_eq!(config.crowd.agent_count, 5);
        assert_eq!(config.crowd.registration_stagger_ms, 300);
        assert_eq!(config.crowd.seed, 0);
    }

    #[test]
    fn test_behavior_config_defaults() {
        let config = BehaviorConfig::default();
        assert_eq!(config.min_answer_age_secs, 900);
        assert_eq!(config.recent_topic_cap, 8);
        assert_eq!(config.weights.as_array(), [4, 4, 2, 2]);
        assert_eq!(config.weights.total(), 12);
    }

    #[test]
    fn test_pacing_config_defaults() {
        let config = PacingConfig::default();
        assert_eq!(config.idle, IntervalConfig::new(120.0, 360.0));
        assert_eq!(config.question, IntervalConfig::new(300.0, 900.0));
        assert_eq!(config.answer, IntervalConfig::new(600.0, 1800.0));
    }

    #[test]
    fn test_logging_config_defaults() {
        let config = LoggingConfig::default();
        assert_eq!(config.level, "info");
        assert_eq!(config.format, "pretty");
    }

    #[test]
    fn test_default_config_is_valid() {
        let warnings = CrowdConfig::default().validate().unwrap();
        assert!(warnings.iter().all(|w| w.severity != WarningSeverity::Error));
    }

    // ── TOML tests ─────────────────────────────────────────────

    #[test]
    fn test_config_toml_roundtrip() {
        let config = CrowdConfig::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        let restored: CrowdConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(restored.service.base_url, config.service.base_url);
        assert_eq!(restored.behavior.weights, config.behavior.weights);
        assert_eq!(restored.pacing.answer, config.pacing.answer);
    }

    #[test]
    fn test_partial_toml_applies_defaults() {
        let toml_str = r#"
[service]
base_url = "https://qa.example.com"

[behavior.weights]
vote = 6
"#;
        let config: CrowdConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.service.base_url, "https://qa.example.com");
        assert_eq!(config.behavior.weights.vote, 6);
        // Defaults should fill in
        assert_eq!(config.behavior.weights.ask, 4);
        assert_eq!(config.service.request_timeout_secs, 10);
        assert_eq!(config.pacing.idle.min_secs, 120.0);
    }

    #[test]
    fn test_inline_interval_tables() {
        let toml_str = r#"
[pacing]
idle = { min_secs = 1, max_secs = 2 }
"#;
        let config: CrowdConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.pacing.idle, IntervalConfig::new(1.0, 2.0));
        assert_eq!(config.pacing.question.max_secs, 900.0);
    }

    // ── Validation tests ───────────────────────────────────────

    #[test]
    fn test_validate_rejects_bad_url() {
        let mut config = CrowdConfig::default();
        config.service.base_url = "not a url".into();
        let err = config.validate().unwrap_err();
        assert!(err.contains("service.base_url"));
    }

    #[test]
    fn test_validate_rejects_inverted_interval() {
        let mut config = CrowdConfig::default();
        config.pacing.answer = IntervalConfig::new(10.0, 5.0);
        let err = config.validate().unwrap_err();
        assert!(err.contains("pacing.answer"));
    }

    #[test]
    fn test_validate_rejects_all_zero_weights() {
        let mut config = CrowdConfig::default();
        config.behavior.weights = ActionWeights { ask: 0, answer: 0, vote: 0, idle: 0 };
        assert!(config.validate().unwrap_err().contains("behavior.weights"));
    }

    #[test]
    fn test_validate_rejects_zero_cap_and_agents() {
        let mut config = CrowdConfig::default();
        config.behavior.recent_topic_cap = 0;
        config.crowd.agent_count = 0;
        let err = config.validate().unwrap_err();
        assert!(err.contains("behavior.recent_topic_cap"));
        assert!(err.contains("crowd.agent_count"));
    }

    #[test]
    fn test_validate_warns_on_remote_plain_http() {
        let mut config = CrowdConfig::default();
        config.service.base_url = "http://qa.example.com".into();
        let warnings = config.validate().unwrap();
        assert!(warnings.iter().any(|w| w.field == "service.base_url"
            && w.severity == WarningSeverity::Warning));
    }

    #[test]
    fn test_validate_warns_on_unknown_log_format() {
        let mut config = CrowdConfig::default();
        config.logging.format = "xml".into();
        let warnings = config.validate().unwrap();
        assert!(warnings.iter().any(|w| w.field == "logging.format"));
    }

    // ── Override tests ─────────────────────────────────────────

    #[test]
    fn test_apply_overrides() {
        let env: HashMap<&str, &str> = [
            ("CROWD_BASE_URL", "http://127.0.0.1:9000"),
            ("CROWD_AGENT_COUNT", "3"),
            ("CROWD_SEED", "99"),
            ("CROWD_LOG_LEVEL", "debug"),
        ]
        .into_iter()
        .collect();
        let config = ConfigLoader::apply_overrides(CrowdConfig::default(), |k| {
            env.get(k).map(|v| v.to_string())
        });
        assert_eq!(config.service.base_url, "http://127.0.0.1:9000");
        assert_eq!(config.crowd.agent_count, 3);
        assert_eq!(config.crowd.seed, 99);
        assert_eq!(config.logging.level, "debug");
    }

    #[test]
    fn test_apply_overrides_ignores_garbage_numbers() {
        let config = ConfigLoader::apply_overrides(CrowdConfig::default(), |k| match k {
            "CROWD_AGENT_COUNT" => Some("lots".into()),
            _ => None,
        });
        assert_eq!(config.crowd.agent_count, 5);
    }

    // ── ConfigLoader tests ─────────────────────────────────────

    #[test]
    fn test_config_loader_with_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("crowd.toml");
        let mut f = std::fs::File::create(&config_path).unwrap();
        writeln!(
            f,
            r#"
[crowd]
agent_count = 2
seed = 17

[behavior]
min_answer_age_secs = 60
"#
        )
        .unwrap();

        let config = ConfigLoader::load(Some(config_path.as_path())).unwrap();
        assert_eq!(config.crowd.agent_count, 2);
        assert_eq!(config.crowd.seed, 17);
        assert_eq!(config.behavior.min_answer_age_secs, 60);
    }

    #[test]
    fn test_config_loader_rejects_invalid_file() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("crowd.toml");
        std::fs::write(&config_path, "[behavior]\nrecent_topic_cap = 0\n").unwrap();
        assert!(ConfigLoader::load(Some(config_path.as_path())).is_err());
    }

    #[test]
    fn test_config_loader_rejects_malformed_toml() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("crowd.toml");
        std::fs::write(&config_path, "[behavior\n").unwrap();
        let err = ConfigLoader::load(Some(config_path.as_path())).err().unwrap();
        assert!(err.to_string().contains("failed to parse"));
    }

    #[test]
    fn test_check_rejects_zero_agents_after_override() {
        let mut config = CrowdConfig::default();
        config.crowd.agent_count = 0;
        let err = ConfigLoader::check(config).err().unwrap();
        assert!(err.to_string().contains("crowd.agent_count"));
    }

    #[test]
    fn test_check_passes_valid_config_through() {
        let mut config = CrowdConfig::default();
        config.crowd.seed = 42;
        let checked = ConfigLoader::check(config).unwrap();
        assert_eq!(checked.crowd.seed, 42);
    }

    // ── JSON roundtrip ─────────────────────────────────────────

    #[test]
    fn test_config_json_roundtrip() {
        let config = CrowdConfig::default();
        let json = serde_json::to_string(&config).unwrap();
        let restored: CrowdConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(restored.logging.format, config.logging.format);
    }
}
