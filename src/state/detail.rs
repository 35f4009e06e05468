use log::{debug, warn};
use std::sync::Arc;
use tokio::sync::watch;

use super::RequestSequencer;
use crate::error::RecipeError;
use crate::model::{Ingredient, Recipe};
use crate::overlay::build_translated_recipe;
use crate::repository::{FetchResult, RecipeRepository};
use crate::translated::TranslatedRecipe;
use crate::translation::TranslationService;

/// Which text the detail screen shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DisplayLanguage {
    #[default]
    Original,
    Translated,
}

/// State rendered by the detail screen
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecipeDetailUiState {
    pub recipe: Option<Recipe>,
    pub translated_recipe: Option<TranslatedRecipe>,
    pub is_loading: bool,
    pub is_translating: bool,
    pub error: Option<String>,
    pub language: DisplayLanguage,
}

impl RecipeDetailUiState {
    pub fn use_translation(&self) -> bool {
        self.language == DisplayLanguage::Translated
    }

    /// Ingredients in the selected language, falling back to the original
    pub fn displayed_ingredients(&self) -> Vec<Ingredient> {
        match (&self.translated_recipe, &self.recipe) {
            (Some(overlay), _) => overlay.ingredients(self.use_translation()),
            (None, Some(recipe)) => recipe.ingredients(),
            (None, None) => Vec::new(),
        }
    }

    /// Trimmed instruction steps in the selected language
    pub fn displayed_instructions(&self) -> Vec<String> {
        let steps = match (&self.translated_recipe, &self.recipe) {
            (Some(overlay), _) => overlay.instructions(self.use_translation()),
            (None, Some(recipe)) => recipe.instruction_steps(),
            (None, None) => Vec::new(),
        };
        steps.into_iter().map(|step| step.trim().to_string()).collect()
    }
}

pub struct RecipeDetailViewModel {
    repository: RecipeRepository,
    translation: Option<Arc<TranslationService>>,
    state: watch::Sender<RecipeDetailUiState>,
    sequencer: RequestSequencer,
}

impl RecipeDetailViewModel {
    /// `translation` is `None` when no translator is configured; translate
    /// requests are then ignored.
    pub fn new(
        repository: RecipeRepository,
        translation: Option<Arc<TranslationService>>,
    ) -> Self {
        let (state, _) = watch::channel(RecipeDetailUiState::default());
        Self {
            repository,
            translation,
            state,
            sequencer: RequestSequencer::default(),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<RecipeDetailUiState> {
        self.state.subscribe()
    }

    pub fn state(&self) -> RecipeDetailUiState {
        self.state.borrow().clone()
    }

    pub async fn load_recipe_detail(&self, id: &str) {
        let ticket = self.sequencer.next();
        self.repository
            .get_recipe_by_id(id, |result| self.apply(ticket, result))
            .await;
    }

    fn apply(&self, ticket: u64, result: FetchResult<Recipe>) {
        if !self.sequencer.is_current(ticket) {
            debug!("Dropping stale detail result for request {}", ticket);
            return;
        }

        self.state.send_modify(|state| match result {
            FetchResult::Loading => {
                state.is_loading = true;
                state.error = None;
            }
            FetchResult::Success(recipe) => {
                // An overlay only ever belongs to the recipe it was built from
                let same_recipe = state
                    .recipe
                    .as_ref()
                    .is_some_and(|current| current.id == recipe.id);
                if !same_recipe {
                    state.translated_recipe = None;
                    state.language = DisplayLanguage::Original;
                }
                state.recipe = Some(recipe);
                state.is_loading = false;
                state.error = None;
            }
            FetchResult::Error(message) => {
                state.is_loading = false;
                state.error = Some(message);
            }
        });
    }

    /// Switch the displayed language. Switching to the translated text builds
    /// the overlay unless one already exists for the current recipe.
    pub async fn set_language(&self, language: DisplayLanguage) {
        self.state.send_modify(|state| state.language = language);

        if language == DisplayLanguage::Translated && !self.has_current_overlay() {
            self.translate_recipe().await;
        }
    }

    fn has_current_overlay(&self) -> bool {
        let state = self.state.borrow();
        match (&state.recipe, &state.translated_recipe) {
            (Some(recipe), Some(overlay)) => overlay.is_for(&recipe.id),
            _ => false,
        }
    }

    /// Build a translation overlay for the loaded recipe.
    ///
    /// Does nothing without a recipe, without a translation service, or while
    /// another translation is running. On failure the untranslated state is
    /// kept and `error` carries a "Translation failed" message.
    pub async fn translate_recipe(&self) {
        let Some(service) = self.translation.clone() else {
            return;
        };

        let mut recipe = None;
        self.state.send_if_modified(|state| {
            if state.is_translating {
                return false;
            }
            match &state.recipe {
                Some(current) => {
                    recipe = Some(current.clone());
                    state.is_translating = true;
                    true
                }
                None => false,
            }
        });
        let Some(recipe) = recipe else {
            return;
        };

        let task_recipe = recipe.clone();
        let outcome = tokio::spawn(async move {
            build_translated_recipe(&task_recipe, &service).await
        })
        .await
        .unwrap_or_else(|e| Err(RecipeError::Translation(e.to_string())));

        self.state.send_modify(|state| {
            state.is_translating = false;
            let still_current = state
                .recipe
                .as_ref()
                .is_some_and(|current| current.id == recipe.id);

            match outcome {
                Ok(overlay) if still_current => state.translated_recipe = Some(overlay),
                Ok(_) => debug!(
                    "Discarding overlay for recipe {} after navigation",
                    recipe.id
                ),
                Err(e) => {
                    warn!("Translating recipe {} failed: {}", recipe.id, e);
                    state.error = Some(match e {
                        RecipeError::Translation(_) => e.to_string(),
                        other => format!("Translation failed: {}", other),
                    });
                }
            }
        });
    }

    /// Drop the overlay and show the original text again
    pub fn clear_translation(&self) {
        self.state.send_modify(|state| {
            state.translated_recipe = None;
            state.language = DisplayLanguage::Original;
        });
    }
}
