use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::application::ChatClient;
use crate::domain::{CompletionRequest, DomainError};

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";
const COMPLETIONS_PATH: &str = "/v1/chat/completions";
const DEFAULT_MODEL: &str = "gpt-4o";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    temperature: f32,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    response_format: Option<ResponseFormat>,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Deserialize)]
struct ApiResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

/// HTTP client for the OpenAI Chat Completions API (and compatible servers).
///
/// Sends the system and user prompts as two messages. When the request asks
/// for JSON, `response_format: {"type": "json_object"}` is set so the model
/// is constrained to a single JSON object.
///
/// ```text
/// OPENAI_API_KEY=sk-...                  (required)
/// OPENAI_BASE_URL=https://api.openai.com (optional)
/// OPENAI_MODEL=gpt-4o                    (optional)
/// ```
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + COMPLETIONS_PATH).
    url: String,
}

impl OpenAiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Self {
        let base: String = base_url.into();
        let url = format!("{}{}", base.trim_end_matches('/'), COMPLETIONS_PATH);
        Self {
            client: reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model: model.into(),
            url,
        }
    }

    /// Construct from the environment. A missing or blank `OPENAI_API_KEY`
    /// is a configuration error: the advisor cannot serve without it.
    pub fn from_env(model_override: Option<&str>, timeout: Duration) -> Result<Self, DomainError> {
        let key = std::env::var("OPENAI_API_KEY")
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                DomainError::configuration(
                    "OpenAI API key not found. Set OPENAI_API_KEY or use --provider mock.",
                )
            })?;
        let base =
            std::env::var("OPENAI_BASE_URL").unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string());
        let model = match model_override {
            Some(m) => m.to_string(),
            None => std::env::var("OPENAI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
        };
        Ok(Self::new(key, model, base, timeout))
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ChatClient for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, DomainError> {
        let body = ApiRequest {
            model: &self.model,
            messages: vec![
                ApiMessage {
                    role: "system",
                    content: &request.system,
                },
                ApiMessage {
                    role: "user",
                    content: &request.user,
                },
            ],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
            response_format: request
                .json_output
                .then_some(ResponseFormat { kind: "json_object" }),
        };

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| DomainError::fetch_failed(format!("OpenAiClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!("OpenAiClient: API returned {status}: {text}");
            return Err(DomainError::fetch_failed(format!(
                "OpenAiClient: API returned {status}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::fetch_failed(format!("OpenAiClient: failed to parse response: {e}"))
        })?;

        api_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or_else(|| DomainError::fetch_failed("OpenAiClient: response had no content"))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_joins_base_without_double_slash() {
        let client = OpenAiClient::new("k", "m", "http://localhost:8080/", DEFAULT_TIMEOUT);
        assert_eq!(client.url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn json_requests_set_response_format() {
        let body = ApiRequest {
            model: "gpt-4o",
            messages: vec![],
            temperature: 0.0,
            max_tokens: 10,
            response_format: Some(ResponseFormat { kind: "json_object" }),
        };
        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");

        let plain = ApiRequest {
            response_format: None,
            ..body
        };
        let value = serde_json::to_value(&plain).unwrap();
        assert!(value.get("response_format").is_none());
    }

    #[test]
    fn null_content_deserializes() {
        let parsed: ApiResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"role":"assistant","content":null}}]}"#)
                .unwrap();
        assert!(parsed.choices[0].message.content.is_none());
    }
}
