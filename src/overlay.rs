use log::debug;

use crate::error::RecipeError;
use crate::model::{split_steps, Recipe};
use crate::translated::TranslatedRecipe;
use crate::translation::TranslationService;

/// Translate a recipe's ingredients and instructions into an overlay.
///
/// Individual strings that fail to translate keep their source text, so once
/// this returns `Ok` both translated fields are always populated. The only
/// error is an engine that never became ready. Blank instructions produce an
/// empty step list without contacting the engine.
pub async fn build_translated_recipe(
    recipe: &Recipe,
    service: &TranslationService,
) -> Result<TranslatedRecipe, RecipeError> {
    if !service.prepare().await {
        return Err(RecipeError::TranslatorUnavailable);
    }

    debug!("Translating recipe {} ({})", recipe.id, recipe.name);
    let ingredients = service.translate_ingredients(&recipe.ingredients()).await;

    let instructions = match recipe.instructions.as_deref() {
        Some(text) if !text.trim().is_empty() => {
            split_steps(&service.translate_instructions(text).await)
        }
        _ => Vec::new(),
    };

    Ok(TranslatedRecipe::with_translations(
        recipe.clone(),
        ingredients,
        instructions,
    ))
}
