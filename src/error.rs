use thiserror::Error;

/// Errors that can occur while fetching or translating recipes
#[derive(Error, Debug)]
pub enum RecipeError {
    /// Transport-level failure talking to the recipe API
    #[error("Failed to fetch recipes: {0}")]
    Http(#[from] reqwest::Error),

    /// The API answered with a body that is not a recipe list
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    /// The API answered with a non-success status code
    #[error("Request to {url} failed with status {status}")]
    Status { status: u16, url: String },

    /// Base URL could not be combined with an endpoint path
    #[error("Invalid API url: {0}")]
    InvalidUrl(String),

    /// Translating a whole recipe failed
    #[error("Translation failed: {0}")]
    Translation(String),

    /// The translator has not been configured or is not ready yet
    #[error("Translator is not available")]
    TranslatorUnavailable,

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// A caller supplied an argument that cannot be used
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}
