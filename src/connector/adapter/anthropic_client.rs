use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::application::ChatClient;
use crate::domain::{CompletionRequest, DomainError};

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";
const MESSAGES_PATH: &str = "/v1/messages";
const ANTHROPIC_API_VERSION: &str = "2023-06-01";
const DEFAULT_MODEL: &str = "claude-haiku-4-5";
const REACHABILITY_TIMEOUT: Duration = Duration::from_secs(2);
/// The Messages API has no JSON mode; this is appended to the system prompt instead.
const JSON_ONLY_SUFFIX: &str = "\n\nReply with the JSON object only.";

#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<ApiMessage<'a>>,
}

#[derive(serde::Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    content: Vec<ContentBlock>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// HTTP client for the Anthropic Messages API (and compatible endpoints such as
/// LM Studio).
///
/// ```text
/// ANTHROPIC_BASE_URL=https://api.anthropic.com
/// ANTHROPIC_API_KEY=sk-ant-...
/// ANTHROPIC_MODEL=claude-haiku-4-5
/// ```
///
/// When pointed at a self-hosted endpoint, each request is preceded by a
/// `HEAD /` reachability check with a 2-second timeout, so a server that is
/// down fails fast instead of waiting out the full request timeout. The
/// hosted API skips the check.
pub struct AnthropicClient {
    client: reqwest::Client,
    reachability_client: Option<reqwest::Client>,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + MESSAGES_PATH).
    url: String,
    /// Base URL used for the reachability check.
    base_url: String,
}

impl AnthropicClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base: String = base_url.into();
        let trimmed = base.trim_end_matches('/');
        let url = format!("{trimmed}{MESSAGES_PATH}");
        let reachability_client = (!is_hosted_endpoint(trimmed)).then(|| {
            reqwest::Client::builder()
                .connect_timeout(REACHABILITY_TIMEOUT)
                .timeout(REACHABILITY_TIMEOUT)
                .build()
                .unwrap_or_default()
        });
        let base_url = format!("{trimmed}/");
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            reachability_client,
            api_key: api_key.into(),
            model: model.into(),
            url,
            base_url,
        }
    }

    /// Construct from environment variables:
    ///
    /// | Variable             | Default                     |
    /// |----------------------|-----------------------------|
    /// | `ANTHROPIC_BASE_URL` | `https://api.anthropic.com` |
    /// | `ANTHROPIC_MODEL`    | `claude-haiku-4-5`          |
    /// | `ANTHROPIC_API_KEY`  | required for the hosted API |
    ///
    /// A blank key is only accepted for a self-hosted `ANTHROPIC_BASE_URL`.
    pub fn from_env(model_override: Option<&str>, timeout: Duration) -> Result<Self, DomainError> {
        let base = std::env::var("ANTHROPIC_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_ANTHROPIC_BASE_URL.to_string());
        let key = resolve_api_key(std::env::var("ANTHROPIC_API_KEY").ok(), &base)?;
        let model = match model_override {
            Some(m) => m.to_string(),
            None => {
                std::env::var("ANTHROPIC_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string())
            }
        };
        Ok(Self::new(key, model, base, timeout))
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn checks_reachability(&self) -> bool {
        self.reachability_client.is_some()
    }
}

fn is_hosted_endpoint(base_url: &str) -> bool {
    base_url.trim_end_matches('/') == DEFAULT_ANTHROPIC_BASE_URL
}

fn resolve_api_key(key: Option<String>, base_url: &str) -> Result<String, DomainError> {
    match key.filter(|k| !k.trim().is_empty()) {
        Some(key) => Ok(key),
        None if !is_hosted_endpoint(base_url) => Ok(String::new()),
        None => Err(DomainError::configuration(
            "Anthropic API key not found. Set ANTHROPIC_API_KEY or use --provider mock.",
        )),
    }
}

#[async_trait]
impl ChatClient for AnthropicClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, DomainError> {
        if let Some(reachability) = &self.reachability_client {
            // Any HTTP response, even 4xx/5xx, means the server is up.
            match reachability.head(&self.base_url).send().await {
                Err(e) if e.is_connect() || e.is_timeout() => {
                    return Err(DomainError::fetch_failed(format!(
                        "AnthropicClient: server not reachable at {}: {e}",
                        self.base_url.trim_end_matches('/')
                    )));
                }
                _ => {}
            }
        }

        let system = if request.json_output {
            format!("{}{}", request.system, JSON_ONLY_SUFFIX)
        } else {
            request.system.clone()
        };

        let body = ApiRequest {
            model: &self.model,
            max_tokens: request.max_tokens,
            temperature: request.temperature,
            system: &system,
            messages: vec![ApiMessage {
                role: "user",
                content: &request.user,
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_API_VERSION)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                DomainError::fetch_failed(format!("AnthropicClient: request failed: {e}"))
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("AnthropicClient: API returned {status}: {text}");
            return Err(DomainError::fetch_failed(format!(
                "AnthropicClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::fetch_failed(format!("AnthropicClient: failed to parse response: {e}"))
        })?;

        let text: String = api_response
            .content
            .into_iter()
            .map(|b| b.text)
            .collect::<Vec<_>>()
            .join("");
        if text.trim().is_empty() {
            return Err(DomainError::fetch_failed(
                "AnthropicClient: response had no text content",
            ));
        }
        Ok(text)
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
