use anyhow::{anyhow, Context, Result};
use log::{warn, LevelFilter};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::providers::google::{GoogleSettings, DEFAULT_ENDPOINT};
use crate::translation::chunking::{ChunkLimits, DEFAULT_MAX_CHARS, DEFAULT_MAX_ITEMS};
use crate::translation::pipeline::PipelineConfig;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Source language code (ISO)
    #[serde(default = "default_source_language")]
    pub source_language: String,

    /// Target language code (ISO)
    #[serde(default = "default_target_language")]
    pub target_language: String,

    /// Whether to normalize run text before translation
    #[serde(default = "default_true")]
    pub cleanup: bool,

    /// Optional glossary CSV file
    #[serde(default)]
    pub glossary_path: Option<String>,

    /// Batching settings
    #[serde(default)]
    pub batching: BatchingConfig,

    /// Translation provider settings
    #[serde(default)]
    pub provider: ProviderConfig,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Translation provider type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TranslationProvider {
    // @provider: Google Cloud Translation v3
    #[default]
    Google,
    // @provider: Offline mock that returns its input
    Mock,
}

impl TranslationProvider {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Google => "Google Cloud Translation",
            Self::Mock => "Mock",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Google => "google".to_string(),
            Self::Mock => "mock".to_string(),
        }
    }
}

// Implement Display trait for TranslationProvider
impl std::fmt::Display for TranslationProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for TranslationProvider
impl std::str::FromStr for TranslationProvider {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "google" => Ok(Self::Google),
            "mock" => Ok(Self::Mock),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Provider type identifier
    #[serde(rename = "type", default)]
    pub provider_type: TranslationProvider,

    // @field: Google Cloud project id
    #[serde(default = "String::new")]
    pub project_id: String,

    // @field: Google Cloud location
    #[serde(default = "default_location")]
    pub location: String,

    // @field: OAuth2 access token
    #[serde(default = "String::new")]
    pub access_token: String,

    // @field: Service URL
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    // @field: Texts per HTTP request
    #[serde(default = "default_max_texts_per_request")]
    pub max_texts_per_request: usize,

    // @field: Delay between HTTP requests
    #[serde(default = "default_request_delay_ms")]
    pub request_delay_ms: u64,

    // @field: Retry count for failed requests
    #[serde(default = "default_retry_count")]
    pub retry_count: u32,

    // @field: Base backoff, doubled on each retry
    #[serde(default = "default_retry_backoff_ms")]
    pub retry_backoff_ms: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            provider_type: TranslationProvider::default(),
            project_id: String::new(),
            location: default_location(),
            access_token: String::new(),
            endpoint: default_endpoint(),
            timeout_secs: default_timeout_secs(),
            max_texts_per_request: default_max_texts_per_request(),
            request_delay_ms: default_request_delay_ms(),
            retry_count: default_retry_count(),
            retry_backoff_ms: default_retry_backoff_ms(),
        }
    }
}

/// Batching settings
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct BatchingConfig {
    /// Maximum cumulative characters per batch
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,

    /// Maximum texts per batch
    #[serde(default = "default_max_items")]
    pub max_items: usize,

    /// Maximum number of concurrent batch calls
    #[serde(default = "default_concurrent_requests")]
    pub concurrent_requests: usize,

    /// Minimum spacing in milliseconds between the starts of batch calls
    #[serde(default = "default_batch_delay_ms")]
    pub batch_delay_ms: u64,
}

impl Default for BatchingConfig {
    fn default() -> Self {
        Self {
            max_chars: default_max_chars(),
            max_items: default_max_items(),
            concurrent_requests: default_concurrent_requests(),
            batch_delay_ms: default_batch_delay_ms(),
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_level_filter(self) -> LevelFilter {
        match self {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

fn default_source_language() -> String {
    "ru".to_string()
}

fn default_target_language() -> String {
    "kk".to_string()
}

fn default_true() -> bool {
    true
}

fn default_location() -> String {
    "global".to_string()
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    60
}

fn default_max_texts_per_request() -> usize {
    32
}

fn default_request_delay_ms() -> u64 {
    50 // Courtesy pause between HTTP requests
}

fn default_retry_count() -> u32 {
    3 // Default to 3 retries
}

fn default_retry_backoff_ms() -> u64 {
    1000 // 1 second base backoff time, doubled on each retry
}

fn default_max_chars() -> usize {
    DEFAULT_MAX_CHARS
}

fn default_max_items() -> usize {
    DEFAULT_MAX_ITEMS
}

fn default_concurrent_requests() -> usize {
    1
}

fn default_batch_delay_ms() -> u64 {
    50
}

/// Environment variables consulted for the project id, in order
pub const PROJECT_ID_ENV_VARS: &[&str] = &["GOOGLE_CLOUD_PROJECT", "GCP_PROJECT"];

/// Environment variable consulted for the access token
pub const ACCESS_TOKEN_ENV_VAR: &str = "GOOGLE_ACCESS_TOKEN";

impl Config {
    /// Load the configuration file, creating it with defaults when missing
    pub fn load_or_create(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if path.exists() {
            let file = File::open(path)
                .context(format!("Failed to open config file: {}", path.display()))?;
            let reader = BufReader::new(file);
            let config: Config = serde_json::from_reader(reader)
                .context(format!("Failed to parse config file: {}", path.display()))?;
            Ok(config)
        } else {
            warn!("Config file not found at '{}', creating default config.", path.display());
            let config = Config::default();
            config.save(path)?;
            Ok(config)
        }
    }

    /// Write the configuration as pretty-printed JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let config_json = serde_json::to_string_pretty(self)
            .context("Failed to serialize config to JSON")?;
        std::fs::write(path, config_json)
            .context(format!("Failed to write config to file: {}", path.display()))?;
        Ok(())
    }

    /// Fill empty Google credentials from the environment
    ///
    /// `lookup` returns the value of an environment variable, if set.
    pub fn apply_credential_fallbacks(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if self.provider.project_id.trim().is_empty() {
            if let Some(project_id) = PROJECT_ID_ENV_VARS.iter().find_map(|key| non_empty(*key)) {
                self.provider.project_id = project_id;
            }
        }
        if self.provider.access_token.trim().is_empty() {
            if let Some(token) = non_empty(ACCESS_TOKEN_ENV_VAR) {
                self.provider.access_token = token;
            }
        }
    }

    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        // Validate languages; an empty source is left to the service to detect
        if !self.source_language.trim().is_empty() {
            crate::language_utils::validate_language_code(&self.source_language)
                .context("Invalid source language")?;
        }
        crate::language_utils::validate_language_code(&self.target_language)
            .context("Invalid target language")?;

        // Validate limits
        if self.batching.max_chars == 0 {
            return Err(anyhow!("batching.max_chars must be greater than 0"));
        }
        if self.batching.max_items == 0 {
            return Err(anyhow!("batching.max_items must be greater than 0"));
        }
        if self.batching.concurrent_requests == 0 {
            return Err(anyhow!("batching.concurrent_requests must be greater than 0"));
        }
        if self.provider.max_texts_per_request == 0 {
            return Err(anyhow!("provider.max_texts_per_request must be greater than 0"));
        }

        // Validate credentials for the remote provider
        if self.provider.provider_type == TranslationProvider::Google {
            if self.provider.project_id.trim().is_empty() {
                return Err(anyhow!(
                    "Google Cloud project id is required (provider.project_id or {})",
                    PROJECT_ID_ENV_VARS.join("/")
                ));
            }
            if self.provider.access_token.trim().is_empty() {
                return Err(anyhow!(
                    "Google Cloud access token is required (provider.access_token or {})",
                    ACCESS_TOKEN_ENV_VAR
                ));
            }
        }

        Ok(())
    }

    /// Batch limits from the batching section
    pub fn chunk_limits(&self) -> ChunkLimits {
        ChunkLimits::new(self.batching.max_chars, self.batching.max_items)
    }

    /// Pipeline settings with the given service language codes
    pub fn pipeline_config(&self, source_code: &str, target_code: &str) -> PipelineConfig {
        PipelineConfig::new(source_code, target_code)
            .with_cleanup(self.cleanup)
            .with_limits(self.chunk_limits())
            .with_concurrency(self.batching.concurrent_requests)
            .with_delay(self.batching.batch_delay_ms)
    }

    /// Google client settings from the provider section
    pub fn google_settings(&self) -> GoogleSettings {
        GoogleSettings {
            project_id: self.provider.project_id.clone(),
            location: self.provider.location.clone(),
            access_token: self.provider.access_token.clone(),
            endpoint: self.provider.endpoint.clone(),
            timeout_secs: self.provider.timeout_secs,
            max_texts_per_request: self.provider.max_texts_per_request,
            request_delay_ms: self.provider.request_delay_ms,
            retry_count: self.provider.retry_count,
            retry_backoff_ms: self.provider.retry_backoff_ms,
        }
    }
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            source_language: default_source_language(),
            target_language: default_target_language(),
            cleanup: true,
            glossary_path: None,
            batching: BatchingConfig::default(),
            provider: ProviderConfig::default(),
            log_level: LogLevel::default(),
        }
    }
}
