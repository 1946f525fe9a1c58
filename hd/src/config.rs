//! HouseDesign configuration types and loading

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Main HouseDesign configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Reasoner provider configuration
    pub llm: LlmConfig,

    /// Prompt template configuration
    pub prompts: PromptsConfig,
}

impl Config {
    /// Validate configuration before use
    ///
    /// Call this early in startup to fail fast with clear error messages.
    pub fn validate(&self) -> Result<()> {
        if !matches!(self.llm.provider.as_str(), "openai" | "anthropic") {
            return Err(eyre::eyre!(
                "Unsupported LLM provider '{}'. Supported: openai, anthropic",
                self.llm.provider
            ));
        }
        if self.llm.max_tokens == 0 {
            return Err(eyre::eyre!("llm.max-tokens must be greater than zero"));
        }
        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(eyre::eyre!(
                "llm.temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            ));
        }
        if self.llm.get_api_key().is_none() {
            return Err(eyre::eyre!(
                "LLM API key not found. Set the {} environment variable.",
                self.llm.api_key_env()
            ));
        }
        Ok(())
    }

    /// Load configuration with fallback chain
    pub fn load(config_path: Option<&PathBuf>) -> Result<Self> {
        // If explicit config path provided, it must load
        if let Some(path) = config_path {
            return Self::load_from_file(path).context(format!("Failed to load config from {}", path.display()));
        }

        // Try project-local config: .housedesign.yml
        let local_config = PathBuf::from(".housedesign.yml");
        if local_config.exists() {
            match Self::load_from_file(&local_config) {
                Ok(config) => return Ok(config),
                Err(e) => {
                    tracing::warn!("Failed to load config from {}: {}", local_config.display(), e);
                }
            }
        }

        // Try user config: ~/.config/housedesign/housedesign.yml
        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("housedesign").join("housedesign.yml");
            if user_config.exists() {
                match Self::load_from_file(&user_config) {
                    Ok(config) => return Ok(config),
                    Err(e) => {
                        tracing::warn!("Failed to load config from {}: {}", user_config.display(), e);
                    }
                }
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Load configuration from a specific file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path).context("Failed to read config file")?;

        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;

        tracing::info!("Loaded config from: {}", path.as_ref().display());
        Ok(config)
    }
}

/// Reasoner provider configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LlmConfig {
    /// Provider name ("openai" or "anthropic")
    pub provider: String,

    /// Model identifier; provider default when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,

    /// Environment variable containing the API key; provider default when unset
    #[serde(rename = "api-key-env", skip_serializing_if = "Option::is_none")]
    pub api_key_env: Option<String>,

    /// API base URL; provider default when unset
    #[serde(rename = "base-url", skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    /// Maximum tokens per response
    #[serde(rename = "max-tokens")]
    pub max_tokens: u32,

    /// Request timeout in milliseconds
    #[serde(rename = "timeout-ms")]
    pub timeout_ms: u64,

    /// Sampling temperature
    pub temperature: f32,
}

/// Model, key variable and base URL used when a config leaves them out
struct ProviderDefaults {
    model: &'static str,
    api_key_env: &'static str,
    base_url: &'static str,
}

const OPENAI_DEFAULTS: ProviderDefaults = ProviderDefaults {
    model: "gpt-4o",
    api_key_env: "OPENAI_API_KEY",
    base_url: "https://api.openai.com",
};

const ANTHROPIC_DEFAULTS: ProviderDefaults = ProviderDefaults {
    model: "claude-sonnet-4-20250514",
    api_key_env: "ANTHROPIC_API_KEY",
    base_url: "https://api.anthropic.com",
};

impl LlmConfig {
    fn defaults(&self) -> &'static ProviderDefaults {
        match self.provider.as_str() {
            "anthropic" => &ANTHROPIC_DEFAULTS,
            _ => &OPENAI_DEFAULTS,
        }
    }

    pub fn model(&self) -> &str {
        self.model.as_deref().unwrap_or(self.defaults().model)
    }

    pub fn api_key_env(&self) -> &str {
        self.api_key_env.as_deref().unwrap_or(self.defaults().api_key_env)
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(self.defaults().base_url)
    }

    /// Read the API key from the configured environment variable
    ///
    /// Empty values count as unset.
    pub fn get_api_key(&self) -> Option<String> {
        std::env::var(self.api_key_env())
            .ok()
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            model: None,
            api_key_env: None,
            base_url: None,
            max_tokens: 2048,
            timeout_ms: 120_000,
            temperature: 0.1,
        }
    }
}

/// Prompt template configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptsConfig {
    /// Directory searched for `<name>.pmt` overrides before the embedded templates
    pub dir: PathBuf,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from(".housedesign/prompts"),
        }
    }
}
