use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_GEMINI_MODEL: &str = "gemini-3-pro-preview";

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    pub llm: LlmConfig,

    #[serde(default = "default_language")]
    pub default_language: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LlmConfig {
    pub provider: String, // "gemini", "ollama" or "openai"
    pub gemini: Option<GeminiConfig>,
    pub ollama: Option<OllamaConfig>,
    pub openai: Option<OpenAIConfig>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OllamaConfig {
    pub base_url: String,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct OpenAIConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
}

fn default_language() -> String {
    "en".to_string()
}

impl Config {
    /// Reads config.yml if present, otherwise builds a Gemini default whose
    /// credential comes from the GEMINI_API_KEY environment variable. An
    /// unset credential is allowed here; it surfaces later as an API call
    /// failure, not a startup crash.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new("config.yml"))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::from_env());
        }

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        Ok(config)
    }

    fn from_env() -> Self {
        Config {
            llm: LlmConfig {
                provider: "gemini".to_string(),
                gemini: Some(GeminiConfig {
                    api_key: std::env::var("GEMINI_API_KEY").unwrap_or_default(),
                    model: DEFAULT_GEMINI_MODEL.to_string(),
                }),
                ollama: None,
                openai: None,
            },
            default_language: default_language(),
        }
    }
}
