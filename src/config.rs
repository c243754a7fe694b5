//! Configuration management for the resume matcher

use crate::error::{MatcherError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub matching: MatchingConfig,
    pub feedback: FeedbackConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// Shortest word, in characters, that can become a keyword
    pub min_keyword_length: usize,
    /// Cap applied to the matched, missing and extra keyword lists
    pub top_keywords: usize,
    /// How many missing keywords are handed to the recommendation rules
    pub recommendation_keywords: usize,
    /// Words excluded in addition to the built-in stop-word set
    #[serde(default)]
    pub extra_stop_words: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedbackConfig {
    pub enabled: bool,
    pub api_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub max_resume_chars: usize,
    pub max_job_chars: usize,
    pub timeout_secs: u64,
    pub max_retries: u32,
    /// Name of the environment variable holding the API key
    pub api_key_env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub detailed: bool,
    pub color_output: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Console,
    Json,
    Markdown,
    Html,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            min_keyword_length: 3,
            top_keywords: 10,
            recommendation_keywords: 5,
            extra_stop_words: Vec::new(),
        }
    }
}

impl Default for FeedbackConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            api_url: "https://api.openai.com/v1/chat/completions".to_string(),
            model: "gpt-4".to_string(),
            max_tokens: 2000,
            temperature: 0.1,
            max_resume_chars: 3000,
            max_job_chars: 2500,
            timeout_secs: 60,
            max_retries: 2,
            api_key_env: "OPENAI_API_KEY".to_string(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::Console,
            detailed: false,
            color_output: true,
        }
    }
}

impl Config {
    /// Load from the default location, writing defaults there on first run
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path())
    }

    pub fn load_from(config_path: &Path) -> Result<Self> {
        if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            let config: Config = toml::from_str(&content)
                .map_err(|e| MatcherError::Configuration(format!("Failed to parse config: {}", e)))?;
            config.validate()?;
            Ok(config)
        } else {
            let config = Self::default();
            config.save_to(config_path)?;
            Ok(config)
        }
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path())
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| MatcherError::Configuration(format!("Failed to serialize config: {}", e)))?;

        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| dirs::home_dir().unwrap_or_else(|| PathBuf::from(".")))
            .join("resume-matcher")
            .join("config.toml")
    }

    pub fn validate(&self) -> Result<()> {
        if self.matching.min_keyword_length == 0 {
            return Err(MatcherError::Configuration(
                "matching.min_keyword_length must be at least 1".to_string(),
            ));
        }
        if self.matching.top_keywords == 0 {
            return Err(MatcherError::Configuration(
                "matching.top_keywords must be at least 1".to_string(),
            ));
        }
        if !(0.0..=2.0).contains(&self.feedback.temperature) {
            return Err(MatcherError::Configuration(format!(
                "feedback.temperature must be between 0 and 2, got {}",
                self.feedback.temperature
            )));
        }
        Ok(())
    }

    /// API key from the environment variable named in the feedback section
    pub fn api_key(&self) -> Option<String> {
        std::env::var(&self.feedback.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
    }
}
