//! User-level configuration file
//!
//! Lives at `~/.config/codecritic/config.toml` (platform config dir).
//! Every field is optional; the environment overrides all of them.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct UserConfig {
    #[serde(default)]
    pub ai: AiSection,

    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct AiSection {
    /// "openai" (default), "anthropic" or "ollama"
    pub backend: Option<String>,

    pub openai_api_key: Option<String>,

    pub anthropic_api_key: Option<String>,

    pub model: Option<String>,

    pub temperature: Option<f64>,

    pub max_tokens: Option<i64>,

    /// Any OpenAI-compatible chat completions endpoint
    pub api_url: Option<String>,
}

#[derive(Debug, Default, Clone, Deserialize, Serialize)]
pub struct OutputSection {
    /// Where generated and refactored code is saved (default: output)
    pub code_dir: Option<String>,

    /// Where markdown reports are saved (default: reports)
    pub reports_dir: Option<String>,
}

const EXAMPLE_CONFIG: &str = r#"# codecritic user configuration
#
# Environment variables (and a .env file in the working directory)
# override everything here.

[ai]
# Backend: "openai" (default), "anthropic", or "ollama" (local, no key)
# backend = "openai"

# Get a key from https://platform.openai.com/api-keys
# openai_api_key = "sk-..."

# Get a key from https://console.anthropic.com/settings/keys
# anthropic_api_key = "sk-ant-..."

# model = "gpt-4o"
# temperature = 0.7      # 0.0 - 1.0
# max_tokens = 4000

# Any OpenAI-compatible endpoint
# api_url = "http://localhost:11434/v1/chat/completions"

[output]
# code_dir = "output"
# reports_dir = "reports"
"#;

impl UserConfig {
    /// Get the user config file path
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("codecritic").join("config.toml"))
    }

    /// Read the user config file, defaults when it is missing or invalid
    pub fn load() -> Self {
        Self::user_config_path()
            .filter(|p| p.exists())
            .map(|p| Self::load_from(&p))
            .unwrap_or_default()
    }

    pub fn load_from(path: &Path) -> Self {
        let parsed = std::fs::read_to_string(path)
            .map_err(anyhow::Error::from)
            .and_then(|content| Ok(toml::from_str::<UserConfig>(&content)?));

        match parsed {
            Ok(config) => {
                tracing::debug!("Loaded user config from {}", path.display());
                config
            }
            Err(e) => {
                tracing::warn!("Ignoring invalid config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Create the user config directory and an example config
    pub fn init_user_config() -> Result<PathBuf> {
        let config_path = Self::user_config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Self::init_at(&config_path)?;
        Ok(config_path)
    }

    /// Write the example config to `path` unless a file is already there.
    /// Returns true when a new file was written.
    pub fn init_at(path: &Path) -> Result<bool> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        if path.exists() {
            return Ok(false);
        }
        std::fs::write(path, EXAMPLE_CONFIG)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(true)
    }
}
