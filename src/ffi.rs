//! UniFFI bindings for recipe-browser
//!
//! FFI-compatible types and functions for the iOS and Android apps. The async
//! Rust API is wrapped in synchronous functions that manage their own tokio
//! runtime; mobile callers run them off the UI thread.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::config::TranslationConfig;
use crate::repository::{FetchResult, NO_RECIPES_FOUND, RECIPE_NOT_FOUND};
use crate::{
    build_translated_recipe, LlmTranslator, MealDbClient, Recipe, RecipeError, RecipeRepository,
    TranslatedRecipe, TranslationService,
};

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible ingredient line
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiIngredient {
    pub name: String,
    pub measure: String,
}

/// FFI-compatible recipe with derived views already applied
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiRecipe {
    pub id: String,
    pub name: String,
    pub category: Option<String>,
    pub area: Option<String>,
    pub thumbnail: Option<String>,
    pub youtube: Option<String>,
    /// Non-blank ingredients in slot order
    pub ingredients: Vec<FfiIngredient>,
    /// Instruction steps, trimmed, blank lines removed
    pub instructions: Vec<String>,
}

impl From<Recipe> for FfiRecipe {
    fn from(recipe: Recipe) -> Self {
        let ingredients = recipe
            .ingredients()
            .into_iter()
            .map(|i| FfiIngredient {
                name: i.name,
                measure: i.measure,
            })
            .collect();
        let instructions = recipe
            .instruction_steps()
            .iter()
            .map(|step| step.trim().to_string())
            .collect();

        FfiRecipe {
            id: recipe.id,
            name: recipe.name,
            category: recipe.category,
            area: recipe.area,
            thumbnail: recipe.thumbnail,
            youtube: recipe.youtube,
            ingredients,
            instructions,
        }
    }
}

/// FFI-compatible translation overlay
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiTranslatedRecipe {
    pub recipe: FfiRecipe,
    pub translated_ingredients: Vec<FfiIngredient>,
    pub translated_instructions: Vec<String>,
}

impl From<TranslatedRecipe> for FfiTranslatedRecipe {
    fn from(overlay: TranslatedRecipe) -> Self {
        let translated_ingredients = overlay
            .ingredients(true)
            .into_iter()
            .map(|i| FfiIngredient {
                name: i.name,
                measure: i.measure,
            })
            .collect();
        let translated_instructions = overlay.instructions(true);

        FfiTranslatedRecipe {
            recipe: overlay.original.into(),
            translated_ingredients,
            translated_instructions,
        }
    }
}

/// FFI-compatible error type
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiRecipeError {
    /// The API returned no matching recipe
    NotFound { message: String },
    /// Network or decoding failure
    FetchError { message: String },
    /// Translation could not be performed
    TranslationError { message: String },
    /// Configuration error
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiRecipeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiRecipeError::NotFound { message } => write!(f, "Not found: {}", message),
            FfiRecipeError::FetchError { message } => write!(f, "Fetch error: {}", message),
            FfiRecipeError::TranslationError { message } => {
                write!(f, "Translation error: {}", message)
            }
            FfiRecipeError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiRecipeError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiRecipeError {}

impl From<RecipeError> for FfiRecipeError {
    fn from(err: RecipeError) -> Self {
        match err {
            RecipeError::Translation(_) | RecipeError::TranslatorUnavailable => {
                FfiRecipeError::TranslationError {
                    message: err.to_string(),
                }
            }
            RecipeError::Config(_)
            | RecipeError::InvalidUrl(_)
            | RecipeError::InvalidArgument(_) => FfiRecipeError::ConfigError {
                message: err.to_string(),
            },
            RecipeError::Http(_) | RecipeError::Decode(_) | RecipeError::Status { .. } => {
                FfiRecipeError::FetchError {
                    message: err.to_string(),
                }
            }
        }
    }
}

/// Map a terminal repository state onto an FFI result
fn from_fetch_result<T, U: From<T>>(result: FetchResult<T>) -> Result<U, FfiRecipeError> {
    match result {
        FetchResult::Success(data) => Ok(data.into()),
        FetchResult::Error(message)
            if message == NO_RECIPES_FOUND || message == RECIPE_NOT_FOUND =>
        {
            Err(FfiRecipeError::NotFound { message })
        }
        FetchResult::Error(message) => Err(FfiRecipeError::FetchError { message }),
        FetchResult::Loading => Err(FfiRecipeError::RuntimeError {
            message: "Request did not complete".to_string(),
        }),
    }
}

fn from_fetch_list(result: FetchResult<Vec<Recipe>>) -> Result<Vec<FfiRecipe>, FfiRecipeError> {
    from_fetch_result::<Vec<Recipe>, Vec<Recipe>>(result)
        .map(|recipes| recipes.into_iter().map(FfiRecipe::from).collect())
}

/// Connection settings for the recipe API
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiFetchConfig {
    /// Optional base URL (uses the public API if not specified)
    pub base_url: Option<String>,
    /// Optional timeout in seconds (uses default if not specified)
    pub timeout_seconds: Option<u64>,
}

/// Settings for the translation engine
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiTranslationConfig {
    /// Target language code (defaults to "id")
    pub target_language: Option<String>,
    /// Optional API key (uses OPENAI_API_KEY if not specified)
    pub api_key: Option<String>,
    /// Optional OpenAI-compatible base URL
    pub base_url: Option<String>,
    /// Optional model name
    pub model: Option<String>,
}

impl From<FfiTranslationConfig> for TranslationConfig {
    fn from(ffi: FfiTranslationConfig) -> Self {
        let defaults = TranslationConfig::default();
        TranslationConfig {
            enabled: true,
            target_language: ffi.target_language.unwrap_or(defaults.target_language),
            api_key: ffi.api_key,
            base_url: ffi.base_url.unwrap_or(defaults.base_url),
            model: ffi.model.unwrap_or(defaults.model),
            ..defaults
        }
    }
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiRecipeError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiRecipeError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

fn create_repository(config: Option<FfiFetchConfig>) -> Result<RecipeRepository, FfiRecipeError> {
    let config = config.unwrap_or_default();
    let timeout = config.timeout_seconds.map(Duration::from_secs);
    let client = match config.base_url {
        Some(base_url) => MealDbClient::with_base_url(&base_url, timeout)?,
        None => MealDbClient::new(timeout)?,
    };
    Ok(RecipeRepository::new(Arc::new(client)))
}

/// Search recipes by name
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn search_recipes(
    query: String,
    config: Option<FfiFetchConfig>,
) -> Result<Vec<FfiRecipe>, FfiRecipeError> {
    let repository = create_repository(config)?;
    let rt = create_runtime()?;
    from_fetch_list(rt.block_on(repository.search_recipes(&query, |_| {})))
}

/// Look up a single recipe by id
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_recipe_by_id(
    id: String,
    config: Option<FfiFetchConfig>,
) -> Result<FfiRecipe, FfiRecipeError> {
    let repository = create_repository(config)?;
    let rt = create_runtime()?;
    from_fetch_result(rt.block_on(repository.get_recipe_by_id(&id, |_| {})))
}

/// Fetch `count` random recipes
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn random_recipes(
    count: u32,
    config: Option<FfiFetchConfig>,
) -> Result<Vec<FfiRecipe>, FfiRecipeError> {
    let repository = create_repository(config)?;
    let rt = create_runtime()?;
    from_fetch_list(rt.block_on(repository.get_random_recipes(count as usize, |_| {})))
}

/// List recipes in a category
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn recipes_by_category(
    category: String,
    config: Option<FfiFetchConfig>,
) -> Result<Vec<FfiRecipe>, FfiRecipeError> {
    let repository = create_repository(config)?;
    let rt = create_runtime()?;
    from_fetch_list(rt.block_on(repository.get_recipes_by_category(&category, |_| {})))
}

/// Fetch a recipe and build its translation overlay
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn translate_recipe(
    id: String,
    translation: FfiTranslationConfig,
    config: Option<FfiFetchConfig>,
) -> Result<FfiTranslatedRecipe, FfiRecipeError> {
    let repository = create_repository(config)?;
    let translator = LlmTranslator::new(&translation.into()).map_err(|e| {
        FfiRecipeError::ConfigError {
            message: e.to_string(),
        }
    })?;
    let service = TranslationService::new(Arc::new(translator));
    let rt = create_runtime()?;

    rt.block_on(async {
        let recipe: Recipe = from_fetch_result(repository.get_recipe_by_id(&id, |_| {}).await)?;
        let overlay = build_translated_recipe(&recipe, &service).await?;
        Ok::<_, FfiRecipeError>(overlay.into())
    })
}

/// Get the library version
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn get_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
