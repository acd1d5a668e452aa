//! Configuration
//!
//! Sources, lowest to highest priority:
//! 1. Built-in defaults
//! 2. User config (`~/.config/codecritic/config.toml`)
//! 3. `.env` in the working directory
//! 4. Process environment
//!
//! A `.env` file never overrides a variable that is already set, so loading
//! it into the environment and then reading the environment gives 3 < 4.

mod user_config;

pub use user_config::UserConfig;

use crate::ai::{AiClient, AiConfig, AiResult, LlmBackend};
use crate::files::{FileStore, DEFAULT_OUTPUT_DIR, DEFAULT_REPORTS_DIR};
use std::path::Path;

pub const ENV_OPENAI_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ANTHROPIC_KEY: &str = "ANTHROPIC_API_KEY";
pub const ENV_BACKEND: &str = "CODECRITIC_BACKEND";
pub const ENV_MODEL: &str = "OPENAI_MODEL";
pub const ENV_TEMPERATURE: &str = "OPENAI_TEMPERATURE";
pub const ENV_MAX_TOKENS: &str = "OPENAI_MAX_TOKENS";
pub const ENV_API_URL: &str = "OPENAI_API_URL";

const DEFAULT_TEMPERATURE: f32 = crate::ai::DEFAULT_TEMPERATURE;
const DEFAULT_MAX_TOKENS: u32 = crate::ai::DEFAULT_MAX_TOKENS;

/// Effective settings, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub ai: AiConfig,
    openai_api_key: Option<String>,
    anthropic_api_key: Option<String>,
    pub output_dir: String,
    pub reports_dir: String,
    /// Problems found while reading the sources (already logged)
    pub warnings: Vec<String>,
}

impl AppConfig {
    /// Load from the user config file, `.env` and the environment
    pub fn load() -> Self {
        match dotenvy::from_filename(".env") {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(e) if e.not_found() => tracing::debug!("No .env file found, using environment"),
            Err(e) => tracing::warn!("Failed to load .env: {}", e),
        }
        Self::from_sources(UserConfig::load(), |key| std::env::var(key).ok())
    }

    /// Merge a parsed user config with an environment lookup
    pub fn from_sources(file: UserConfig, env: impl Fn(&str) -> Option<String>) -> Self {
        let env = |key: &str| env(key).filter(|v| !v.trim().is_empty());
        let mut warnings = Vec::new();
        let mut warn = |msg: String| {
            tracing::warn!("{}", msg);
            warnings.push(msg);
        };

        let backend = match env(ENV_BACKEND).or(file.ai.backend) {
            Some(raw) => raw.parse::<LlmBackend>().unwrap_or_else(|e| {
                warn(format!("{}. Using default: openai", e));
                LlmBackend::default()
            }),
            None => LlmBackend::default(),
        };

        let temperature = env(ENV_TEMPERATURE)
            .map(|raw| raw.trim().parse::<f64>().ok())
            .or(file.ai.temperature.map(Some));
        let temperature = match temperature {
            None => DEFAULT_TEMPERATURE,
            Some(Some(t)) if (0.0..=1.0).contains(&t) => t as f32,
            Some(_) => {
                warn(format!(
                    "Invalid {} value. Using default: {}",
                    ENV_TEMPERATURE, DEFAULT_TEMPERATURE
                ));
                DEFAULT_TEMPERATURE
            }
        };

        let max_tokens = env(ENV_MAX_TOKENS)
            .map(|raw| raw.trim().parse::<i64>().ok())
            .or(file.ai.max_tokens.map(Some));
        let max_tokens = match max_tokens {
            None => DEFAULT_MAX_TOKENS,
            Some(Some(n)) if n >= 1 => u32::try_from(n).unwrap_or(u32::MAX),
            Some(_) => {
                warn(format!(
                    "Invalid {} value. Using default: {}",
                    ENV_MAX_TOKENS, DEFAULT_MAX_TOKENS
                ));
                DEFAULT_MAX_TOKENS
            }
        };

        let ai = AiConfig {
            backend,
            model: env(ENV_MODEL).or(file.ai.model),
            api_url: env(ENV_API_URL).or(file.ai.api_url),
            max_tokens,
            temperature,
        };

        Self {
            ai,
            openai_api_key: env(ENV_OPENAI_KEY).or(file.ai.openai_api_key),
            anthropic_api_key: env(ENV_ANTHROPIC_KEY).or(file.ai.anthropic_api_key),
            output_dir: file
                .output
                .code_dir
                .unwrap_or_else(|| DEFAULT_OUTPUT_DIR.to_string()),
            reports_dir: file
                .output
                .reports_dir
                .unwrap_or_else(|| DEFAULT_REPORTS_DIR.to_string()),
            warnings,
        }
    }

    /// Key for the selected backend, if any
    pub fn api_key(&self) -> Option<&str> {
        match self.ai.backend {
            LlmBackend::OpenAi | LlmBackend::Ollama => self.openai_api_key.as_deref(),
            LlmBackend::Anthropic => self.anthropic_api_key.as_deref(),
        }
    }

    /// Build the completion client; a missing key is an error naming the variable
    pub fn client(&self) -> AiResult<AiClient> {
        AiClient::from_config(self.ai.clone(), self.api_key().map(str::to_string))
    }

    pub fn file_store(&self, root: &Path) -> FileStore {
        FileStore::new(root).with_dirs(&self.output_dir, &self.reports_dir)
    }

    /// Key for display: first and last four characters only
    pub fn masked_key(&self) -> String {
        match self.api_key() {
            None if !self.ai.backend.requires_api_key() => "(not needed)".to_string(),
            None => "(not set)".to_string(),
            Some(key) => mask(key),
        }
    }

    /// Effective settings as `key = value` lines
    pub fn display_lines(&self) -> Vec<(String, String)> {
        vec![
            ("backend".into(), self.ai.backend.to_string()),
            ("api_key".into(), self.masked_key()),
            ("model".into(), self.ai.model().to_string()),
            ("api_url".into(), self.ai.api_url().to_string()),
            ("temperature".into(), self.ai.temperature.to_string()),
            ("max_tokens".into(), self.ai.max_tokens.to_string()),
            ("output_dir".into(), self.output_dir.clone()),
            ("reports_dir".into(), self.reports_dir.clone()),
        ]
    }
}

fn mask(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 8 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..4].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}...{}", head, tail)
}
