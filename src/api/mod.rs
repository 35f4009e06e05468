mod client;

pub use client::{MealDbClient, DEFAULT_BASE_URL};

use async_trait::async_trait;

use crate::error::RecipeError;
use crate::model::RecipeListResponse;

/// Read-only recipe lookup endpoints.
///
/// A `meals: null` body is a successful "no results" answer, not an error.
/// Transport, status and decoding failures are returned as errors.
#[async_trait]
pub trait RecipeApi: Send + Sync {
    /// Search recipes by name (`search.php?s=`)
    async fn search_recipes(&self, query: &str) -> Result<RecipeListResponse, RecipeError>;

    /// Look up one recipe by id (`lookup.php?i=`)
    async fn get_recipe_by_id(&self, id: &str) -> Result<RecipeListResponse, RecipeError>;

    /// Fetch a single random recipe (`random.php`)
    async fn get_random_recipe(&self) -> Result<RecipeListResponse, RecipeError>;

    /// List recipes in a category (`filter.php?c=`)
    async fn get_recipes_by_category(
        &self,
        category: &str,
    ) -> Result<RecipeListResponse, RecipeError>;
}
