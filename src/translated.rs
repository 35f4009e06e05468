use crate::model::{Ingredient, Recipe};

/// A translation overlay for one recipe.
///
/// Both translated fields stay `None` until a translation pass completes;
/// until then every accessor falls back to the original recipe.
#[derive(Debug, Clone, PartialEq)]
pub struct TranslatedRecipe {
    pub original: Recipe,
    pub translated_ingredients: Option<Vec<Ingredient>>,
    pub translated_instructions: Option<Vec<String>>,
}

impl TranslatedRecipe {
    pub fn new(original: Recipe) -> Self {
        Self {
            original,
            translated_ingredients: None,
            translated_instructions: None,
        }
    }

    pub fn with_translations(
        original: Recipe,
        ingredients: Vec<Ingredient>,
        instructions: Vec<String>,
    ) -> Self {
        Self {
            original,
            translated_ingredients: Some(ingredients),
            translated_instructions: Some(instructions),
        }
    }

    pub fn ingredients(&self, use_translation: bool) -> Vec<Ingredient> {
        match &self.translated_ingredients {
            Some(translated) if use_translation => translated.clone(),
            _ => self.original.ingredients(),
        }
    }

    pub fn instructions(&self, use_translation: bool) -> Vec<String> {
        match &self.translated_instructions {
            Some(translated) if use_translation => translated.clone(),
            _ => self.original.instruction_steps(),
        }
    }

    /// Whether this overlay belongs to the recipe with the given id.
    pub fn is_for(&self, recipe_id: &str) -> bool {
        self.original.id == recipe_id
    }
}
