use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Url};
use std::time::Duration;

use super::RecipeApi;
use crate::config::ApiConfig;
use crate::error::RecipeError;
use crate::model::RecipeListResponse;

pub const DEFAULT_BASE_URL: &str = "https://www.themealdb.com/api/json/v1/1/";

/// HTTP client for TheMealDB JSON API
pub struct MealDbClient {
    client: Client,
    base_url: Url,
}

impl MealDbClient {
    /// Create a client against the public API with the given timeout
    pub fn new(timeout: Option<Duration>) -> Result<Self, RecipeError> {
        Self::with_base_url(DEFAULT_BASE_URL, timeout)
    }

    /// Create a client from configuration
    pub fn from_config(config: &ApiConfig) -> Result<Self, RecipeError> {
        Self::with_base_url(
            &config.base_url,
            Some(Duration::from_secs(config.timeout_secs)),
        )
    }

    /// Create a client against a custom base URL (mirrors, test servers)
    pub fn with_base_url(base_url: &str, timeout: Option<Duration>) -> Result<Self, RecipeError> {
        let timeout = timeout.unwrap_or(Duration::from_secs(30));
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("recipe-browser/", env!("CARGO_PKG_VERSION")))
            .build()?;

        // Url::join replaces the last path segment unless the base ends in '/'
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base_url = Url::parse(&normalized)
            .map_err(|e| RecipeError::InvalidUrl(format!("{}: {}", base_url, e)))?;

        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    async fn get(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<RecipeListResponse, RecipeError> {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| RecipeError::InvalidUrl(format!("{}: {}", path, e)))?;

        debug!("GET {} {:?}", url, query);
        let response = self.client.get(url.clone()).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(RecipeError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let body = response.text().await?;
        let parsed: RecipeListResponse = serde_json::from_str(&body)?;
        debug!(
            "{} returned {} meals",
            path,
            parsed.meals.as_ref().map_or(0, Vec::len)
        );
        Ok(parsed)
    }
}

#[async_trait]
impl RecipeApi for MealDbClient {
    async fn search_recipes(&self, query: &str) -> Result<RecipeListResponse, RecipeError> {
        self.get("search.php", &[("s", query)]).await
    }

    async fn get_recipe_by_id(&self, id: &str) -> Result<RecipeListResponse, RecipeError> {
        self.get("lookup.php", &[("i", id)]).await
    }

    async fn get_random_recipe(&self) -> Result<RecipeListResponse, RecipeError> {
        self.get("random.php", &[]).await
    }

    async fn get_recipes_by_category(
        &self,
        category: &str,
    ) -> Result<RecipeListResponse, RecipeError> {
        self.get("filter.php", &[("c", category)]).await
    }
}
