//! View state containers for the home grid and the recipe detail screen.
//!
//! Each view model owns a `tokio::sync::watch` channel carrying its latest
//! state snapshot; UI code subscribes and re-renders on change. Every load
//! takes a ticket from a monotonic counter and results that arrive for an
//! outdated ticket are dropped, so a slow earlier request can never overwrite
//! a newer one.

mod detail;
mod home;

pub use detail::{DisplayLanguage, RecipeDetailUiState, RecipeDetailViewModel};
pub use home::{BrowseMode, HomeUiState, HomeViewModel};

use std::sync::atomic::{AtomicU64, Ordering};

/// Monotonic request counter; only the most recent ticket is current.
#[derive(Debug, Default)]
pub(crate) struct RequestSequencer {
    latest: AtomicU64,
}

impl RequestSequencer {
    /// Start a new request, superseding all earlier ones.
    pub(crate) fn next(&self) -> u64 {
        self.latest.fetch_add(1, Ordering::SeqCst) + 1
    }

    pub(crate) fn is_current(&self, ticket: u64) -> bool {
        self.latest.load(Ordering::SeqCst) == ticket
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latest_ticket_wins() {
        let sequencer = RequestSequencer::default();
        let first = sequencer.next();
        let second = sequencer.next();

        assert!(second > first);
        assert!(!sequencer.is_current(first));
        assert!(sequencer.is_current(second));
    }
}
