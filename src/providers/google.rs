use std::time::Duration;

use async_trait::async_trait;
use log::{debug, error, warn};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use url::Url;

use crate::errors::ProviderError;
use crate::providers::MarkupTranslator;

/// Public Cloud Translation endpoint
pub const DEFAULT_ENDPOINT: &str = "https://translation.googleapis.com";

/// Texts sent in one HTTP request
pub const DEFAULT_MAX_TEXTS_PER_REQUEST: usize = 32;

/// Pause between consecutive HTTP requests
pub const DEFAULT_REQUEST_DELAY_MS: u64 = 50;

/// Google Cloud Translation v3 client, HTML mode
#[derive(Debug)]
pub struct GoogleTranslator {
    /// HTTP client for API requests
    client: Client,
    /// Full `translateText` URL for the configured project and location
    url: Url,
    /// OAuth2 access token sent as a bearer token
    access_token: String,
    /// Maximum number of texts per HTTP request
    max_texts_per_request: usize,
    /// Delay between consecutive HTTP requests
    request_delay_ms: u64,
    /// Maximum number of retries per HTTP request
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// `translateText` request body
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct TranslateTextRequest<'a> {
    contents: &'a [String],
    mime_type: &'a str,
    /// Omitted to let the service detect the source language
    #[serde(skip_serializing_if = "Option::is_none")]
    source_language_code: Option<&'a str>,
    target_language_code: &'a str,
}

/// `translateText` response body
#[derive(Debug, Deserialize)]
struct TranslateTextResponse {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    #[serde(default)]
    translated_text: String,
}

/// Settings for [`GoogleTranslator::new_with_config`]
#[derive(Debug, Clone)]
pub struct GoogleSettings {
    pub project_id: String,
    pub location: String,
    pub access_token: String,
    /// Base URL, [`DEFAULT_ENDPOINT`] when empty
    pub endpoint: String,
    pub timeout_secs: u64,
    pub max_texts_per_request: usize,
    pub request_delay_ms: u64,
    pub retry_count: u32,
    pub retry_backoff_ms: u64,
}

impl Default for GoogleSettings {
    fn default() -> Self {
        Self {
            project_id: String::new(),
            location: "global".to_string(),
            access_token: String::new(),
            endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_secs: 60,
            max_texts_per_request: DEFAULT_MAX_TEXTS_PER_REQUEST,
            request_delay_ms: DEFAULT_REQUEST_DELAY_MS,
            retry_count: 3,
            retry_backoff_ms: 1000,
        }
    }
}

impl GoogleTranslator {
    /// Create a client for a project with default settings
    pub fn new(
        project_id: impl Into<String>,
        access_token: impl Into<String>,
    ) -> Result<Self, ProviderError> {
        Self::new_with_config(GoogleSettings {
            project_id: project_id.into(),
            access_token: access_token.into(),
            ..Default::default()
        })
    }

    /// Create a client from explicit settings
    pub fn new_with_config(settings: GoogleSettings) -> Result<Self, ProviderError> {
        if settings.project_id.trim().is_empty() {
            return Err(ProviderError::AuthenticationError(
                "Google Cloud project id is not set".to_string(),
            ));
        }
        if settings.access_token.trim().is_empty() {
            return Err(ProviderError::AuthenticationError(
                "Google Cloud access token is not set".to_string(),
            ));
        }

        let url = translate_url(&settings.endpoint, &settings.project_id, &settings.location)?;

        Ok(Self {
            client: Client::builder()
                .timeout(Duration::from_secs(settings.timeout_secs.max(1)))
                .pool_idle_timeout(Duration::from_secs(90))
                .build()
                .unwrap_or_default(),
            url,
            access_token: settings.access_token,
            max_texts_per_request: settings.max_texts_per_request.max(1),
            request_delay_ms: settings.request_delay_ms,
            max_retries: settings.retry_count,
            backoff_base_ms: settings.retry_backoff_ms,
        })
    }

    /// URL the client posts to
    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Send one HTTP request with retry logic
    async fn send_with_retry(
        &self,
        contents: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let request = build_request(contents, source_language, target_language);

        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            let response_result = self
                .client
                .post(self.url.clone())
                .bearer_auth(&self.access_token)
                .json(&request)
                .send()
                .await;

            match response_result {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let body = response
                            .text()
                            .await
                            .map_err(|e| ProviderError::ParseError(e.to_string()))?;
                        return parse_response(&body);
                    }

                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to get error response text".to_string());
                    let message = error_message(&error_text);

                    if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                        error!("Google Translate rejected credentials ({}): {}", status, message);
                        return Err(ProviderError::AuthenticationError(message));
                    } else if status == StatusCode::TOO_MANY_REQUESTS {
                        warn!(
                            "Google Translate rate limit hit - attempt {}/{}",
                            attempt + 1,
                            self.max_retries + 1
                        );
                        last_error = Some(ProviderError::RateLimitExceeded(message));
                    } else if status.is_server_error() {
                        error!(
                            "Google Translate API error ({}): {} - attempt {}/{}",
                            status,
                            message,
                            attempt + 1,
                            self.max_retries + 1
                        );
                        last_error = Some(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message,
                        });
                    } else {
                        // Client error - don't retry
                        error!("Google Translate API error ({}): {}", status, message);
                        return Err(ProviderError::ApiError {
                            status_code: status.as_u16(),
                            message,
                        });
                    }
                }
                Err(e) => {
                    error!(
                        "Google Translate network error: {} - attempt {}/{}",
                        e,
                        attempt + 1,
                        self.max_retries + 1
                    );
                    last_error = Some(ProviderError::ConnectionError(e.to_string()));
                }
            }

            attempt += 1;

            if attempt <= self.max_retries {
                let backoff_ms = self.backoff_base_ms * (1u64 << (attempt - 1).min(16));
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::RequestFailed(format!(
                "Google Translate request failed after {} attempts",
                self.max_retries + 1
            ))
        }))
    }
}

#[async_trait]
impl MarkupTranslator for GoogleTranslator {
    async fn translate_markup(
        &self,
        texts: &[String],
        source_language: &str,
        target_language: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let mut translated = Vec::with_capacity(texts.len());

        for (index, contents) in texts.chunks(self.max_texts_per_request).enumerate() {
            if index > 0 && self.request_delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(self.request_delay_ms)).await;
            }
            debug!(
                "Google Translate request {} with {} texts ({} -> {})",
                index + 1,
                contents.len(),
                source_language,
                target_language
            );
            let mut part = self
                .send_with_retry(contents, source_language, target_language)
                .await?;
            translated.append(&mut part);
        }

        Ok(translated)
    }

    fn name(&self) -> &str {
        "google"
    }
}

/// Build `{endpoint}/v3/projects/{project}/locations/{location}:translateText`
fn translate_url(endpoint: &str, project_id: &str, location: &str) -> Result<Url, ProviderError> {
    let base = if endpoint.trim().is_empty() {
        DEFAULT_ENDPOINT
    } else {
        endpoint.trim().trim_end_matches('/')
    };
    let location = if location.trim().is_empty() {
        "global"
    } else {
        location.trim()
    };

    let raw = format!(
        "{}/v3/projects/{}/locations/{}:translateText",
        base,
        project_id.trim(),
        location
    );
    Url::parse(&raw).map_err(|e| ProviderError::RequestFailed(format!("Invalid endpoint '{}': {}", raw, e)))
}

fn build_request<'a>(
    contents: &'a [String],
    source_language: &'a str,
    target_language: &'a str,
) -> TranslateTextRequest<'a> {
    TranslateTextRequest {
        contents,
        mime_type: "text/html",
        source_language_code: Some(source_language).filter(|code| !code.is_empty()),
        target_language_code: target_language,
    }
}

fn parse_response(body: &str) -> Result<Vec<String>, ProviderError> {
    let response: TranslateTextResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::ParseError(format!("{}: {}", e, truncate(body, 200))))?;
    Ok(response
        .translations
        .into_iter()
        .map(|translation| translation.translated_text)
        .collect())
}

/// Message from a Google error body (`{"error": {"message": ...}}`), or the raw text
fn error_message(body: &str) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|value| {
            value
                .get("error")
                .and_then(|error| error.get("message"))
                .and_then(|message| message.as_str())
                .map(str::to_string)
        })
        .unwrap_or_else(|| truncate(body, 500))
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() > max_chars {
        text.chars().take(max_chars).collect()
    } else {
        text.to_string()
    }
}
