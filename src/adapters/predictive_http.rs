//! Predicted-output generation over an OpenAI-compatible chat API.

use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::AppError;
use crate::ports::{Directive, Generator};

/// Environment variable holding the API key.
pub const API_KEY_VAR: &str = "OPENAI_API_KEY";
/// Environment variable overriding the chat-completions endpoint.
pub const API_URL_VAR: &str = "ATELIER_GENERATOR_URL";
/// Environment variable overriding the model identifier.
pub const MODEL_VAR: &str = "ATELIER_GENERATOR_MODEL";

const DEFAULT_STATUS_MESSAGE: &str = "Generation request failed";

/// Configuration for the HTTP generation backend.
#[derive(Debug, Clone)]
pub struct GeneratorConfig {
    /// Chat-completions endpoint URL.
    pub api_url: Url,
    /// Model identifier sent with each request.
    pub model: String,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self { api_url: default_api_url(), model: default_model(), timeout_secs: 60 }
    }
}

impl GeneratorConfig {
    /// Configuration with environment overrides applied over the defaults.
    pub fn from_env() -> Result<Self, AppError> {
        let mut config = Self::default();
        if let Ok(raw) = std::env::var(API_URL_VAR) {
            config.api_url = Url::parse(&raw).map_err(|e| {
                AppError::configuration(format!("Invalid {API_URL_VAR} value '{raw}': {e}"))
            })?;
        }
        if let Ok(model) = std::env::var(MODEL_VAR) {
            config.model = model;
        }
        Ok(config)
    }
}

fn default_api_url() -> Url {
    Url::parse("https://api.openai.com/v1/chat/completions")
        .expect("Default API URL must be valid")
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

/// HTTP transport for the [`Generator`] port.
///
/// Performs a single blocking, non-streaming chat-completions request per
/// call, carrying the directive's predicted baseline in the `prediction`
/// field so the backend biases decoding toward reproducing it.
#[derive(Clone)]
pub struct HttpGenerator {
    api_key: Option<String>,
    config: GeneratorConfig,
    client: Client,
}

impl std::fmt::Debug for HttpGenerator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpGenerator")
            .field("api_url", &self.config.api_url)
            .field("model", &self.config.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl HttpGenerator {
    /// Create a generator with an explicit API key.
    pub fn with_api_key(api_key: String, config: GeneratorConfig) -> Result<Self, AppError> {
        Self::build(Some(api_key), config)
    }

    /// Create a generator reading the API key from the environment.
    ///
    /// A missing key is not an error here; the key is required only when a
    /// completion is actually requested.
    pub fn from_env() -> Result<Self, AppError> {
        Self::build(std::env::var(API_KEY_VAR).ok(), GeneratorConfig::from_env()?)
    }

    fn build(api_key: Option<String>, config: GeneratorConfig) -> Result<Self, AppError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AppError::Generation {
                message: format!("Failed to create HTTP client: {e}"),
                status: None,
            })?;

        Ok(Self { api_key, config, client })
    }
}

impl Generator for HttpGenerator {
    fn complete(&self, directive: &Directive) -> Result<String, AppError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::EnvironmentVariableMissing(API_KEY_VAR.into()))?;

        let request = ApiRequest {
            model: &self.config.model,
            messages: vec![
                ApiMessage { role: "system", content: &directive.system },
                ApiMessage { role: "user", content: &directive.prompt },
            ],
            prediction: Prediction { kind: "content", content: &directive.predicted },
            stream: false,
        };

        let response = self
            .client
            .post(self.config.api_url.clone())
            .bearer_auth(api_key)
            .header(CONTENT_TYPE, "application/json")
            .json(&request)
            .send()
            .map_err(|e| AppError::Generation {
                message: format!("HTTP request failed: {e}"),
                status: None,
            })?;

        let status = response.status();
        let body = response.text().unwrap_or_default();

        if !status.is_success() {
            let message = extract_error_message(&body).unwrap_or_else(|| {
                if !body.trim().is_empty() {
                    body.clone()
                } else if status.as_u16() == 429 {
                    "Rate limited".to_string()
                } else if status.is_server_error() {
                    "Server error".to_string()
                } else {
                    DEFAULT_STATUS_MESSAGE.to_string()
                }
            });
            return Err(AppError::Generation { message, status: Some(status.as_u16()) });
        }

        let parsed: ApiResponse =
            serde_json::from_str(&body).map_err(|e| AppError::Generation {
                message: format!("Failed to parse response: {e}"),
                status: Some(status.as_u16()),
            })?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.is_empty())
            .ok_or(AppError::EmptyCompletion)
    }
}

#[derive(Serialize)]
struct ApiRequest<'a> {
    model: &'a str,
    messages: Vec<ApiMessage<'a>>,
    prediction: Prediction<'a>,
    stream: bool,
}

#[derive(Serialize)]
struct ApiMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct Prediction<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    choices: Vec<ApiChoice>,
}

#[derive(Deserialize)]
struct ApiChoice {
    message: ApiChoiceMessage,
}

#[derive(Deserialize)]
struct ApiChoiceMessage {
    content: Option<String>,
}

fn extract_error_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }

    let parsed = serde_json::from_str::<serde_json::Value>(body).ok()?;

    if let Some(msg) = parsed
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|message| message.as_str())
    {
        return Some(msg.to_string());
    }

    parsed.get("message").and_then(|message| message.as_str()).map(ToOwned::to_owned)
}
