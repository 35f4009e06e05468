//! Recipe repository.
//!
//! Every operation is a single-shot result stream: the caller's `emit`
//! callback receives exactly one [`FetchResult::Loading`] followed by exactly
//! one terminal [`FetchResult::Success`] or [`FetchResult::Error`]. The
//! terminal state is also returned so callers that only want the outcome can
//! pass a no-op callback. Nothing is retried here; retrying means calling again.

use log::{debug, info, warn};
use std::sync::Arc;

use crate::api::RecipeApi;
use crate::error::RecipeError;
use crate::model::Recipe;

pub const NO_RECIPES_FOUND: &str = "No recipes found";
pub const RECIPE_NOT_FOUND: &str = "Recipe not found";
pub const UNKNOWN_ERROR: &str = "Unknown error occurred";

/// Number of recipes the home screen asks for by default
pub const DEFAULT_RANDOM_COUNT: usize = 10;

/// Tri-state outcome of an asynchronous fetch
#[derive(Debug, Clone, PartialEq)]
pub enum FetchResult<T> {
    Loading,
    Success(T),
    Error(String),
}

impl<T> FetchResult<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchResult::Loading)
    }

    pub fn is_terminal(&self) -> bool {
        !self.is_loading()
    }

    /// Turn a terminal state into a `Result`. `Loading` maps to an error.
    pub fn into_result(self) -> Result<T, String> {
        match self {
            FetchResult::Success(data) => Ok(data),
            FetchResult::Error(message) => Err(message),
            FetchResult::Loading => Err("Operation has not completed".to_string()),
        }
    }
}

/// Message shown to users for a failed call.
fn error_message(err: &RecipeError) -> String {
    let message = err.to_string();
    if message.trim().is_empty() {
        UNKNOWN_ERROR.to_string()
    } else {
        message
    }
}

/// Emits the terminal state and hands it back.
fn finish<T: Clone, F>(emit: &mut F, result: FetchResult<T>) -> FetchResult<T>
where
    F: FnMut(FetchResult<T>),
{
    emit(result.clone());
    result
}

/// Wraps a [`RecipeApi`] into normalized result streams
#[derive(Clone)]
pub struct RecipeRepository {
    api: Arc<dyn RecipeApi>,
}

impl RecipeRepository {
    pub fn new(api: Arc<dyn RecipeApi>) -> Self {
        Self { api }
    }

    /// Search by name. A null result list becomes `Error("No recipes found")`.
    pub async fn search_recipes<F>(&self, query: &str, mut emit: F) -> FetchResult<Vec<Recipe>>
    where
        F: FnMut(FetchResult<Vec<Recipe>>) + Send,
    {
        emit(FetchResult::Loading);
        debug!("Searching recipes for {:?}", query);

        let result = match self.api.search_recipes(query).await {
            Ok(response) => match response.meals {
                Some(meals) => FetchResult::Success(meals),
                None => {
                    info!("No recipes matched {:?}", query);
                    FetchResult::Error(NO_RECIPES_FOUND.to_string())
                }
            },
            Err(e) => {
                warn!("Recipe search failed: {}", e);
                FetchResult::Error(error_message(&e))
            }
        };

        finish(&mut emit, result)
    }

    /// Look up one recipe. Null and empty lists both become
    /// `Error("Recipe not found")`; extra records are dropped.
    pub async fn get_recipe_by_id<F>(&self, id: &str, mut emit: F) -> FetchResult<Recipe>
    where
        F: FnMut(FetchResult<Recipe>) + Send,
    {
        emit(FetchResult::Loading);
        debug!("Looking up recipe {}", id);

        let result = match self.api.get_recipe_by_id(id).await {
            Ok(response) => match response.meals.and_then(|meals| meals.into_iter().next()) {
                Some(recipe) => FetchResult::Success(recipe),
                None => {
                    info!("Recipe {} not found", id);
                    FetchResult::Error(RECIPE_NOT_FOUND.to_string())
                }
            },
            Err(e) => {
                warn!("Recipe lookup for {} failed: {}", id, e);
                FetchResult::Error(error_message(&e))
            }
        };

        finish(&mut emit, result)
    }

    /// Fetch `count` random recipes, one call at a time.
    ///
    /// Calls that return no record are skipped. The first failing call aborts
    /// the whole batch and nothing gathered so far is emitted.
    pub async fn get_random_recipes<F>(&self, count: usize, mut emit: F) -> FetchResult<Vec<Recipe>>
    where
        F: FnMut(FetchResult<Vec<Recipe>>) + Send,
    {
        emit(FetchResult::Loading);
        debug!("Fetching {} random recipes", count);

        let mut recipes = Vec::new();
        for attempt in 1..=count {
            match self.api.get_random_recipe().await {
                Ok(response) => {
                    match response.meals.and_then(|meals| meals.into_iter().next()) {
                        Some(recipe) => recipes.push(recipe),
                        None => debug!("Random fetch {}/{} returned no recipe", attempt, count),
                    }
                }
                Err(e) => {
                    warn!("Random fetch {}/{} failed: {}", attempt, count, e);
                    return finish(&mut emit, FetchResult::Error(error_message(&e)));
                }
            }
        }

        finish(&mut emit, FetchResult::Success(recipes))
    }

    /// List a category. A null result list becomes `Error("No recipes found")`.
    pub async fn get_recipes_by_category<F>(
        &self,
        category: &str,
        mut emit: F,
    ) -> FetchResult<Vec<Recipe>>
    where
        F: FnMut(FetchResult<Vec<Recipe>>) + Send,
    {
        emit(FetchResult::Loading);
        debug!("Filtering recipes by category {:?}", category);

        let result = match self.api.get_recipes_by_category(category).await {
            Ok(response) => match response.meals {
                Some(meals) => FetchResult::Success(meals),
                None => {
                    info!("No recipes in category {:?}", category);
                    FetchResult::Error(NO_RECIPES_FOUND.to_string())
                }
            },
            Err(e) => {
                warn!("Category filter failed: {}", e);
                FetchResult::Error(error_message(&e))
            }
        };

        finish(&mut emit, result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RecipeListResponse;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    fn recipe(id: &str) -> Recipe {
        Recipe {
            id: id.to_string(),
            name: format!("Recipe {}", id),
            ..Default::default()
        }
    }

    /// Scripted API: each random call pops the next scripted answer.
    #[derive(Default)]
    struct ScriptedApi {
        lookup: Mutex<Option<Result<RecipeListResponse, RecipeError>>>,
        random: Mutex<Vec<Result<RecipeListResponse, RecipeError>>>,
        random_calls: AtomicUsize,
    }

    #[async_trait]
    impl RecipeApi for ScriptedApi {
        async fn search_recipes(&self, _query: &str) -> Result<RecipeListResponse, RecipeError> {
            Ok(RecipeListResponse { meals: None })
        }

        async fn get_recipe_by_id(&self, _id: &str) -> Result<RecipeListResponse, RecipeError> {
            self.lookup
                .lock()
                .unwrap()
                .take()
                .unwrap_or(Ok(RecipeListResponse::default()))
        }

        async fn get_random_recipe(&self) -> Result<RecipeListResponse, RecipeError> {
            self.random_calls.fetch_add(1, Ordering::SeqCst);
            let mut script = self.random.lock().unwrap();
            if script.is_empty() {
                Ok(RecipeListResponse::default())
            } else {
                script.remove(0)
            }
        }

        async fn get_recipes_by_category(
            &self,
            _category: &str,
        ) -> Result<RecipeListResponse, RecipeError> {
            Ok(RecipeListResponse {
                meals: Some(vec![recipe("c1")]),
            })
        }
    }

    fn found(ids: &[&str]) -> Result<RecipeListResponse, RecipeError> {
        Ok(RecipeListResponse {
            meals: Some(ids.iter().map(|id| recipe(id)).collect()),
        })
    }

    #[tokio::test]
    async fn test_lookup_takes_first_record() {
        let api = ScriptedApi::default();
        *api.lookup.lock().unwrap() = Some(found(&["1", "2"]));
        let repo = RecipeRepository::new(Arc::new(api));

        let mut events = Vec::new();
        let result = repo.get_recipe_by_id("1", |e| events.push(e)).await;

        assert_eq!(result, FetchResult::Success(recipe("1")));
        assert_eq!(events.len(), 2);
        assert!(events[0].is_loading());
    }

    #[tokio::test]
    async fn test_lookup_empty_list_not_found() {
        let api = ScriptedApi::default();
        *api.lookup.lock().unwrap() = Some(found(&[]));
        let repo = RecipeRepository::new(Arc::new(api));

        let result = repo.get_recipe_by_id("1", |_| {}).await;
        assert_eq!(result, FetchResult::Error(RECIPE_NOT_FOUND.to_string()));
    }

    #[tokio::test]
    async fn test_random_skips_empty_answers() {
        let api = Arc::new(ScriptedApi::default());
        *api.random.lock().unwrap() = vec![
            found(&["a"]),
            Ok(RecipeListResponse::default()),
            found(&["a"]),
        ];
        let repo = RecipeRepository::new(api.clone());

        let result = repo.get_random_recipes(3, |_| {}).await;

        assert_eq!(result, FetchResult::Success(vec![recipe("a"), recipe("a")]));
        assert_eq!(api.random_calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_random_huge_count_fails_on_first_call() {
        let api = Arc::new(ScriptedApi::default());
        *api.random.lock().unwrap() =
            vec![Err(RecipeError::InvalidArgument("offline".to_string()))];
        let repo = RecipeRepository::new(api.clone());

        let result = repo.get_random_recipes(u32::MAX as usize, |_| {}).await;

        let expected = error_message(&RecipeError::InvalidArgument("offline".to_string()));
        assert_eq!(result, FetchResult::Error(expected));
        assert_eq!(api.random_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_random_zero_count() {
        let api = Arc::new(ScriptedApi::default());
        let repo = RecipeRepository::new(api.clone());

        let result = repo.get_random_recipes(0, |_| {}).await;
        assert_eq!(result, FetchResult::Success(vec![]));
        assert_eq!(api.random_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_lookup_transport_error_uses_error_text() {
        let api = ScriptedApi::default();
        *api.lookup.lock().unwrap() = Some(Err(RecipeError::Status {
            status: 503,
            url: "http://example/lookup.php".to_string(),
        }));
        let repo = RecipeRepository::new(Arc::new(api));

        let mut events = Vec::new();
        let result = repo.get_recipe_by_id("1", |e| events.push(e)).await;

        assert_eq!(
            result,
            FetchResult::Error(
                "Request to http://example/lookup.php failed with status 503".to_string()
            )
        );
        assert_eq!(events, vec![FetchResult::Loading, result]);
    }

    #[test]
    fn test_into_result() {
        assert_eq!(FetchResult::Success(1).into_result(), Ok(1));
        assert_eq!(
            FetchResult::<i32>::Error("boom".to_string()).into_result(),
            Err("boom".to_string())
        );
        assert!(FetchResult::<i32>::Loading.into_result().is_err());
        assert!(FetchResult::<i32>::Loading.is_loading());
        assert!(FetchResult::Success(()).is_terminal());
    }
}
