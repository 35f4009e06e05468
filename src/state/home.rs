use log::debug;
use std::sync::Mutex;
use tokio::sync::watch;

use super::RequestSequencer;
use crate::model::Recipe;
use crate::repository::{FetchResult, RecipeRepository, DEFAULT_RANDOM_COUNT};

/// State rendered by the home grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HomeUiState {
    pub recipes: Vec<Recipe>,
    pub is_loading: bool,
    pub error: Option<String>,
    pub search_query: String,
}

impl HomeUiState {
    /// A finished load with nothing to show (distinct from an error)
    pub fn is_empty(&self) -> bool {
        !self.is_loading && self.error.is_none() && self.recipes.is_empty()
    }
}

/// Which listing the home grid currently shows
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum BrowseMode {
    #[default]
    Random,
    Search(String),
    Category(String),
}

pub struct HomeViewModel {
    repository: RecipeRepository,
    random_count: usize,
    state: watch::Sender<HomeUiState>,
    sequencer: RequestSequencer,
    mode: Mutex<BrowseMode>,
}

impl HomeViewModel {
    pub fn new(repository: RecipeRepository) -> Self {
        Self::with_random_count(repository, DEFAULT_RANDOM_COUNT)
    }

    pub fn with_random_count(repository: RecipeRepository, random_count: usize) -> Self {
        let (state, _) = watch::channel(HomeUiState::default());
        Self {
            repository,
            random_count,
            state,
            sequencer: RequestSequencer::default(),
            mode: Mutex::new(BrowseMode::Random),
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<HomeUiState> {
        self.state.subscribe()
    }

    /// Snapshot of the current state
    pub fn state(&self) -> HomeUiState {
        self.state.borrow().clone()
    }

    pub fn mode(&self) -> BrowseMode {
        self.mode.lock().map(|m| m.clone()).unwrap_or_default()
    }

    fn set_mode(&self, mode: BrowseMode) {
        if let Ok(mut current) = self.mode.lock() {
            *current = mode;
        }
    }

    /// Default listing: a batch of random recipes
    pub async fn load_random_recipes(&self) {
        self.set_mode(BrowseMode::Random);
        let ticket = self.sequencer.next();
        self.repository
            .get_random_recipes(self.random_count, |result| self.apply(ticket, result))
            .await;
    }

    /// Search by name; a blank query goes back to random recipes
    pub async fn search_recipes(&self, query: &str) {
        self.state
            .send_modify(|state| state.search_query = query.to_string());

        if query.trim().is_empty() {
            self.load_random_recipes().await;
            return;
        }

        self.set_mode(BrowseMode::Search(query.to_string()));
        let ticket = self.sequencer.next();
        self.repository
            .search_recipes(query, |result| self.apply(ticket, result))
            .await;
    }

    pub async fn filter_by_category(&self, category: &str) {
        self.set_mode(BrowseMode::Category(category.to_string()));
        let ticket = self.sequencer.next();
        self.repository
            .get_recipes_by_category(category, |result| self.apply(ticket, result))
            .await;
    }

    /// Re-run the most recent listing
    pub async fn retry(&self) {
        match self.mode() {
            BrowseMode::Random => self.load_random_recipes().await,
            BrowseMode::Search(query) => self.search_recipes(&query).await,
            BrowseMode::Category(category) => self.filter_by_category(&category).await,
        }
    }

    fn apply(&self, ticket: u64, result: FetchResult<Vec<Recipe>>) {
        if !self.sequencer.is_current(ticket) {
            debug!("Dropping stale home result for request {}", ticket);
            return;
        }

        self.state.send_modify(|state| match result {
            FetchResult::Loading => {
                state.is_loading = true;
                state.error = None;
            }
            FetchResult::Success(recipes) => {
                state.recipes = recipes;
                state.is_loading = false;
                state.error = None;
            }
            FetchResult::Error(message) => {
                state.is_loading = false;
                state.error = Some(message);
            }
        });
    }
}
