/*!
 * Tests for application configuration functionality
 */

use std::collections::HashMap;
use std::str::FromStr;

use docxlate::app_config::{Config, LogLevel, TranslationProvider, ACCESS_TOKEN_ENV_VAR};
use docxlate::translation::chunking::{DEFAULT_MAX_CHARS, DEFAULT_MAX_ITEMS};

use crate::common;

fn mock_config() -> Config {
    let mut config = Config::default();
    config.provider.provider_type = TranslationProvider::Mock;
    config
}

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectDefaults() {
    let config = Config::default();

    assert_eq!(config.source_language, "ru");
    assert_eq!(config.target_language, "kk");
    assert!(config.cleanup);
    assert!(config.glossary_path.is_none());
    assert_eq!(config.provider.provider_type, TranslationProvider::Google);
    assert_eq!(config.provider.location, "global");
    assert_eq!(config.provider.max_texts_per_request, 32);
    assert_eq!(config.provider.request_delay_ms, 50);
    assert_eq!(config.provider.retry_count, 3);
    assert_eq!(config.batching.max_chars, DEFAULT_MAX_CHARS);
    assert_eq!(config.batching.max_items, DEFAULT_MAX_ITEMS);
    assert_eq!(config.batching.concurrent_requests, 1);
    assert_eq!(config.log_level, LogLevel::Info);
}

#[test]
fn test_config_validation_withVariousConfigs_shouldValidateCorrectly() {
    let mut config = mock_config();
    assert!(config.validate().is_ok());

    config.source_language = "xyz".to_string();
    assert!(config.validate().is_err());
    config.source_language = "rus".to_string();
    assert!(config.validate().is_ok());

    config.target_language = "".to_string();
    assert!(config.validate().is_err());
    config.target_language = "kk".to_string();

    config.batching.max_chars = 0;
    assert!(config.validate().is_err());
    config.batching.max_chars = 100;

    config.batching.max_items = 0;
    assert!(config.validate().is_err());
    config.batching.max_items = 4;

    config.batching.concurrent_requests = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_config_validation_withEmptySourceLanguage_shouldAllowAutoDetection() {
    let mut config = mock_config();

    config.source_language = "".to_string();
    assert!(config.validate().is_ok());
    config.source_language = "   ".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_validation_withGoogleAndNoCredentials_shouldFail() {
    let mut config = Config::default();
    assert!(config.validate().is_err());

    config.provider.project_id = "my-project".to_string();
    assert!(config.validate().is_err());

    config.provider.access_token = "token".to_string();
    assert!(config.validate().is_ok());
}

#[test]
fn test_applyCredentialFallbacks_withEmptyFields_shouldUseEnvironment() {
    let env: HashMap<&str, &str> = [
        ("GCP_PROJECT", "from-env"),
        (ACCESS_TOKEN_ENV_VAR, "env-token"),
    ]
    .into_iter()
    .collect();

    let mut config = Config::default();
    config.apply_credential_fallbacks(|key| env.get(key).map(|value| value.to_string()));

    assert_eq!(config.provider.project_id, "from-env");
    assert_eq!(config.provider.access_token, "env-token");
    assert!(config.validate().is_ok());
}

#[test]
fn test_applyCredentialFallbacks_withConfiguredValues_shouldKeepThem() {
    let mut config = Config::default();
    config.provider.project_id = "configured".to_string();
    config.provider.access_token = "configured-token".to_string();

    config.apply_credential_fallbacks(|_| Some("from-env".to_string()));

    assert_eq!(config.provider.project_id, "configured");
    assert_eq!(config.provider.access_token, "configured-token");
}

#[test]
fn test_loadOrCreate_withMissingFile_shouldWriteDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = dir.path().join("conf.json");

    let config = Config::load_or_create(&path).unwrap();

    assert!(path.exists());
    assert_eq!(config.target_language, "kk");
    let reloaded = Config::load_or_create(&path).unwrap();
    assert_eq!(reloaded.source_language, config.source_language);
}

#[test]
fn test_loadOrCreate_withPartialFile_shouldFillDefaults() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(
        dir.path(),
        "conf.json",
        r#"{ "target_language": "de", "provider": { "type": "mock" }, "batching": { "max_items": 8 } }"#,
    )
    .unwrap();

    let config = Config::load_or_create(&path).unwrap();

    assert_eq!(config.source_language, "ru");
    assert_eq!(config.target_language, "de");
    assert_eq!(config.provider.provider_type, TranslationProvider::Mock);
    assert_eq!(config.batching.max_items, 8);
    assert_eq!(config.batching.max_chars, DEFAULT_MAX_CHARS);
    assert_eq!(config.chunk_limits().max_items, 8);
}

#[test]
fn test_loadOrCreate_withInvalidJson_shouldFail() {
    let dir = common::create_temp_dir().unwrap();
    let path = common::create_test_file(dir.path(), "conf.json", "{ not json").unwrap();

    assert!(Config::load_or_create(&path).is_err());
}

#[test]
fn test_translationProvider_fromStr_shouldParseCaseInsensitively() {
    assert_eq!(TranslationProvider::from_str("Google").unwrap(), TranslationProvider::Google);
    assert_eq!(TranslationProvider::from_str("MOCK").unwrap(), TranslationProvider::Mock);
    assert!(TranslationProvider::from_str("deepl").is_err());
    assert_eq!(TranslationProvider::Mock.to_string(), "mock");
}

#[test]
fn test_pipelineConfig_shouldCarryBatchingSettings() {
    let mut config = mock_config();
    config.cleanup = false;
    config.batching.concurrent_requests = 3;

    let pipeline_config = config.pipeline_config("ru", "kk");

    assert_eq!(pipeline_config.source_language, "ru");
    assert_eq!(pipeline_config.target_language, "kk");
    assert!(!pipeline_config.cleanup);
    assert_eq!(pipeline_config.max_concurrent_requests, 3);
}
