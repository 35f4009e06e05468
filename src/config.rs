use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::api::DEFAULT_BASE_URL;

/// Top-level application configuration
#[derive(Debug, Deserialize, Clone, Default)]
pub struct AppConfig {
    /// Recipe API settings
    #[serde(default)]
    pub api: ApiConfig,
    /// Home screen settings
    #[serde(default)]
    pub home: HomeConfig,
    /// Translation overlay settings
    #[serde(default)]
    pub translation: TranslationConfig,
}

/// Configuration for the recipe lookup API
#[derive(Debug, Deserialize, Clone)]
pub struct ApiConfig {
    /// Base URL all endpoint paths are joined onto
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct HomeConfig {
    /// How many random recipes the home grid loads
    #[serde(default = "default_random_count")]
    pub random_count: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            random_count: default_random_count(),
        }
    }
}

/// Configuration for the translation engine
#[derive(Debug, Deserialize, Clone)]
pub struct TranslationConfig {
    /// Whether a translator should be constructed at all
    #[serde(default)]
    pub enabled: bool,
    /// Language code of the API text
    #[serde(default = "default_source_language")]
    pub source_language: String,
    /// Language code of the overlay
    #[serde(default = "default_target_language")]
    pub target_language: String,
    /// Model identifier passed to the chat completions endpoint
    #[serde(default = "default_model")]
    pub model: String,
    /// Base URL of an OpenAI-compatible endpoint
    #[serde(default = "default_translation_base_url")]
    pub base_url: String,
    /// API key (can also be set via OPENAI_API_KEY)
    pub api_key: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            source_language: default_source_language(),
            target_language: default_target_language(),
            model: default_model(),
            base_url: default_translation_base_url(),
            api_key: None,
            timeout_secs: default_timeout(),
        }
    }
}

// Default value functions
fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_random_count() -> usize {
    10
}

fn default_source_language() -> String {
    "en".to_string()
}

fn default_target_language() -> String {
    "id".to_string()
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_translation_base_url() -> String {
    "https://api.openai.com".to_string()
}

impl AppConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPE_BROWSER__ prefix
    /// 2. recipe-browser.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPE_BROWSER__API__BASE_URL
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration, see [`AppConfig::load`].
pub fn load_config() -> Result<AppConfig, ConfigError> {
    let settings = Config::builder()
        .add_source(File::with_name("recipe-browser").required(false))
        .add_source(
            Environment::with_prefix("RECIPE_BROWSER")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}
