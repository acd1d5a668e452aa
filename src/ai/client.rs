//! LLM API client supporting OpenAI-compatible and Anthropic backends
//!
//! Uses ureq (sync HTTP). The interactive session runs one request at a
//! time, so there is no async runtime.

use crate::ai::{AiError, AiResult, CompletionGateway};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::time::Duration;

/// Supported LLM backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LlmBackend {
    #[default]
    OpenAi,
    Anthropic,
    Ollama,
}

impl LlmBackend {
    /// Variable holding the API key; a local Ollama server takes none
    pub fn env_key(&self) -> Option<&'static str> {
        match self {
            LlmBackend::OpenAi => Some("OPENAI_API_KEY"),
            LlmBackend::Anthropic => Some("ANTHROPIC_API_KEY"),
            LlmBackend::Ollama => None,
        }
    }

    pub fn signup_url(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "https://platform.openai.com/api-keys",
            LlmBackend::Anthropic => "https://console.anthropic.com/settings/keys",
            LlmBackend::Ollama => "https://ollama.ai (no key needed, just run locally)",
        }
    }

    pub fn default_model(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "gpt-4o",
            LlmBackend::Anthropic => "claude-sonnet-4-20250514",
            LlmBackend::Ollama => "deepseek-coder:6.7b",
        }
    }

    pub fn api_url(&self) -> &'static str {
        match self {
            LlmBackend::OpenAi => "https://api.openai.com/v1/chat/completions",
            LlmBackend::Anthropic => "https://api.anthropic.com/v1/messages",
            LlmBackend::Ollama => "http://localhost:11434/v1/chat/completions",
        }
    }

    pub fn is_openai_compatible(&self) -> bool {
        matches!(self, LlmBackend::OpenAi | LlmBackend::Ollama)
    }

    pub fn requires_api_key(&self) -> bool {
        self.env_key().is_some()
    }
}

impl FromStr for LlmBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "openai" => Ok(LlmBackend::OpenAi),
            "anthropic" | "claude" => Ok(LlmBackend::Anthropic),
            "ollama" => Ok(LlmBackend::Ollama),
            other => Err(format!(
                "Unknown backend '{}'. Valid backends: openai, anthropic, ollama",
                other
            )),
        }
    }
}

impl std::fmt::Display for LlmBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LlmBackend::OpenAi => write!(f, "OpenAI"),
            LlmBackend::Anthropic => write!(f, "Anthropic"),
            LlmBackend::Ollama => write!(f, "Ollama (local)"),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }
}

pub const DEFAULT_TEMPERATURE: f32 = 0.7;
pub const DEFAULT_MAX_TOKENS: u32 = 4000;

#[derive(Debug, Clone, PartialEq)]
pub struct AiConfig {
    pub backend: LlmBackend,
    pub model: Option<String>,
    /// Overrides the backend's endpoint (any OpenAI-compatible server)
    pub api_url: Option<String>,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            backend: LlmBackend::default(),
            model: None,
            api_url: None,
            max_tokens: DEFAULT_MAX_TOKENS,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl AiConfig {
    pub fn model(&self) -> &str {
        self.model
            .as_deref()
            .unwrap_or_else(|| self.backend.default_model())
    }

    pub fn api_url(&self) -> &str {
        self.api_url
            .as_deref()
            .unwrap_or_else(|| self.backend.api_url())
    }
}

/// Chat completion client over sync HTTP
pub struct AiClient {
    config: AiConfig,
    api_key: String,
    agent: ureq::Agent,
}

/// Completion requests can run for a minute or more on long files
const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

const ANTHROPIC_VERSION: &str = "2023-06-01";

impl AiClient {
    pub fn new(config: AiConfig, api_key: impl Into<String>) -> Self {
        let agent = ureq::config::Config::builder()
            .http_status_as_error(false)
            .timeout_global(Some(REQUEST_TIMEOUT))
            .build()
            .new_agent();
        Self {
            config,
            api_key: api_key.into(),
            agent,
        }
    }

    /// Build a client, failing when the backend needs a key and none is set
    pub fn from_config(config: AiConfig, api_key: Option<String>) -> AiResult<Self> {
        let Some(env_var) = config.backend.env_key() else {
            return Ok(Self::new(config, "ollama"));
        };

        match api_key.filter(|k| !k.trim().is_empty()) {
            Some(key) => Ok(Self::new(config, key)),
            None => Err(AiError::MissingApiKey {
                env_var: env_var.to_string(),
                signup_url: config.backend.signup_url().to_string(),
            }),
        }
    }

    pub fn backend(&self) -> LlmBackend {
        self.config.backend
    }

    pub fn model(&self) -> &str {
        self.config.model()
    }

    /// Send one chat exchange and return the assistant text
    pub fn generate(&self, messages: Vec<Message>, system: Option<&str>) -> AiResult<String> {
        let model = self.config.model().to_string();

        if self.config.backend.is_openai_compatible() {
            let messages = system
                .map(Message::system)
                .into_iter()
                .chain(messages)
                .collect();
            let body = OpenAiRequest {
                model,
                messages,
                max_tokens: self.config.max_tokens,
                temperature: self.config.temperature,
            };
            let auth = format!("Bearer {}", self.api_key);
            let mut headers = Vec::new();
            if self.config.backend.requires_api_key() {
                headers.push(("Authorization", auth.as_str()));
            }
            self.post::<_, OpenAiResponse>(&headers, &body)?.into_text()
        } else {
            // Anthropic takes the system prompt as a top-level field
            let body = AnthropicRequest {
                model,
                max_tokens: self.config.max_tokens,
                messages: messages
                    .into_iter()
                    .filter(|m| m.role != Role::System)
                    .collect(),
                system: system.map(str::to_string),
                temperature: Some(self.config.temperature),
            };
            let headers = [
                ("x-api-key", self.api_key.as_str()),
                ("anthropic-version", ANTHROPIC_VERSION),
            ];
            self.post::<_, AnthropicResponse>(&headers, &body)?.into_text()
        }
    }

    fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        headers: &[(&str, &str)],
        body: &B,
    ) -> AiResult<R> {
        let mut request = self
            .agent
            .post(self.config.api_url())
            .header("Content-Type", "application/json");
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let mut response = request.send_json(body).map_err(|e| AiError::ApiError {
            status: 0,
            message: e.to_string(),
        })?;

        let status = response.status().as_u16();
        if status >= 400 {
            return Err(AiError::ApiError {
                status,
                message: response.body_mut().read_to_string().unwrap_or_default(),
            });
        }

        response
            .body_mut()
            .read_json()
            .map_err(|e| AiError::ParseError(e.to_string()))
    }
}

impl CompletionGateway for AiClient {
    fn generate_completion(&self, prompt: &str, system_prompt: &str) -> Option<String> {
        match self.generate(vec![Message::user(prompt)], Some(system_prompt)) {
            Ok(text) => {
                tracing::debug!("{} returned {} chars", self.describe(), text.len());
                Some(text)
            }
            Err(e) => {
                tracing::error!("{} request failed: {}", self.config.backend, e);
                None
            }
        }
    }

    fn describe(&self) -> String {
        format!("{} ({})", self.config.backend, self.config.model())
    }
}

// OpenAI API types
#[derive(Serialize)]
struct OpenAiRequest {
    model: String,
    messages: Vec<Message>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    #[serde(default)]
    content: Option<String>,
}

impl OpenAiResponse {
    fn into_text(self) -> AiResult<String> {
        self.choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|text| !text.is_empty())
            .ok_or_else(|| AiError::ParseError("No response choices".to_string()))
    }
}

// Anthropic API types
#[derive(Serialize)]
struct AnthropicRequest {
    model: String,
    max_tokens: u32,
    messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

#[derive(Deserialize)]
struct AnthropicResponse {
    content: Vec<AnthropicContent>,
}

#[derive(Deserialize)]
struct AnthropicContent {
    #[serde(rename = "type")]
    content_type: String,
    #[serde(default)]
    text: String,
}

impl AnthropicResponse {
    fn into_text(self) -> AiResult<String> {
        self.content
            .into_iter()
            .find(|c| c.content_type == "text" && !c.text.is_empty())
            .map(|c| c.text)
            .ok_or_else(|| AiError::ParseError("No text content in response".to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_defaults() {
        assert_eq!(LlmBackend::default(), LlmBackend::OpenAi);
        assert_eq!(LlmBackend::OpenAi.default_model(), "gpt-4o");
        assert!(!LlmBackend::Ollama.requires_api_key());
        assert!(!LlmBackend::Anthropic.is_openai_compatible());
        assert_eq!(LlmBackend::Anthropic.env_key(), Some("ANTHROPIC_API_KEY"));
        assert_eq!(LlmBackend::Ollama.env_key(), None);
    }

    #[test]
    fn test_backend_parsing() {
        assert_eq!("OpenAI".parse::<LlmBackend>().unwrap(), LlmBackend::OpenAi);
        assert_eq!("claude".parse::<LlmBackend>().unwrap(), LlmBackend::Anthropic);
        assert_eq!(" ollama ".parse::<LlmBackend>().unwrap(), LlmBackend::Ollama);
        assert!("gemini".parse::<LlmBackend>().is_err());
    }

    #[test]
    fn test_config_model_and_url() {
        let config = AiConfig::default();
        assert_eq!(config.model(), "gpt-4o");
        assert_eq!(config.api_url(), "https://api.openai.com/v1/chat/completions");

        let config = AiConfig {
            model: Some("custom-model".to_string()),
            api_url: Some("http://localhost:8080/v1/chat/completions".to_string()),
            ..Default::default()
        };
        assert_eq!(config.model(), "custom-model");
        assert_eq!(config.api_url(), "http://localhost:8080/v1/chat/completions");
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let err = AiClient::from_config(AiConfig::default(), None)
            .err()
            .expect("missing key must fail");
        assert!(err.to_string().contains("OPENAI_API_KEY"));

        let err = AiClient::from_config(AiConfig::default(), Some("   ".into()));
        assert!(matches!(err, Err(AiError::MissingApiKey { .. })));
    }

    #[test]
    fn test_ollama_needs_no_key() {
        let config = AiConfig {
            backend: LlmBackend::Ollama,
            ..Default::default()
        };
        let client = AiClient::from_config(config, None).unwrap();
        assert_eq!(client.backend(), LlmBackend::Ollama);
        assert_eq!(client.describe(), "Ollama (local) (deepseek-coder:6.7b)");
    }

    #[test]
    fn test_openai_request_shape() {
        let body = OpenAiRequest {
            model: "gpt-4o".into(),
            messages: vec![Message::system("sys"), Message::user("hi")],
            max_tokens: 10,
            temperature: 0.5,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["messages"][0]["role"], "system");
        assert_eq!(json["messages"][1]["content"], "hi");
        assert_eq!(json["max_tokens"], 10);
    }

    #[test]
    fn test_openai_response_text() {
        let resp: OpenAiResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"hello"}}]}"#,
        )
        .unwrap();
        assert_eq!(resp.into_text().unwrap(), "hello");

        let resp: OpenAiResponse =
            serde_json::from_str(r#"{"choices":[{"message":{"content":null}}]}"#).unwrap();
        assert!(resp.into_text().is_err());

        let resp: OpenAiResponse = serde_json::from_str(r#"{"choices":[]}"#).unwrap();
        assert!(resp.into_text().is_err());
    }

    #[test]
    fn test_anthropic_response_text() {
        let resp: AnthropicResponse = serde_json::from_str(
            r#"{"content":[{"type":"tool_use","id":"x"},{"type":"text","text":"review"}]}"#,
        )
        .unwrap();
        assert_eq!(resp.into_text().unwrap(), "review");
    }
}
