//! Data layer for a recipe browsing app.
//!
//! [`MealDbClient`] talks to TheMealDB, [`RecipeRepository`] turns each call
//! into a `Loading` then `Success`/`Error` sequence, and the view models in
//! [`state`] hold what the home grid and detail screen render. A
//! [`TranslationService`] can overlay translated ingredients and steps on a
//! recipe without touching the original.

pub mod api;
pub mod config;
pub mod error;
pub mod ffi;
pub mod model;
pub mod overlay;
pub mod repository;
pub mod state;
pub mod translated;
pub mod translation;

pub use api::{MealDbClient, RecipeApi};
pub use crate::config::AppConfig;
pub use error::RecipeError;
pub use model::{Ingredient, Recipe, RecipeListResponse};
pub use overlay::build_translated_recipe;
pub use repository::{FetchResult, RecipeRepository};
pub use state::{
    BrowseMode, DisplayLanguage, HomeUiState, HomeViewModel, RecipeDetailUiState,
    RecipeDetailViewModel,
};
pub use translated::TranslatedRecipe;
pub use translation::{LlmTranslator, TranslationService, Translator};

use std::sync::Arc;

/// Build the translation service described by `config`, or `None` when
/// translation is disabled.
pub fn translation_service_from_config(
    config: &AppConfig,
) -> Result<Option<Arc<TranslationService>>, RecipeError> {
    if !config.translation.enabled {
        return Ok(None);
    }

    let translator = LlmTranslator::new(&config.translation)
        .map_err(|e| RecipeError::Translation(e.to_string()))?;
    Ok(Some(Arc::new(TranslationService::new(Arc::new(translator)))))
}

/// Build a repository against the API described by `config`.
pub fn repository_from_config(config: &AppConfig) -> Result<RecipeRepository, RecipeError> {
    let client = MealDbClient::from_config(&config.api)?;
    Ok(RecipeRepository::new(Arc::new(client)))
}
