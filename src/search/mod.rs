//! Search coordinator: drives the global project search box.
//!
//! The coordinator owns the query text and suggestion list, computes
//! suggestions with the same matching rule the store uses for its visible
//! list, and broadcasts query/selection changes over the bus. It fetches
//! the project list at most once and caches it for its own lifetime;
//! consistency after mutations comes from the store, not from here.
//!
//! Overlapping `set_query` calls are resolved latest-wins: each call takes
//! a generation token and a response whose token is no longer current is
//! discarded.

use std::sync::{Arc, Mutex, MutexGuard};

use tracing::debug;

use crate::bus::{EventBus, Signal};
use crate::error::ConsoleError;
use crate::gateway::ProjectGateway;
use crate::models::Project;
use crate::notify::{Notification, SharedNotifier};
use crate::store::apply_filter;

#[derive(Default)]
struct SearchState {
    query: String,
    suggestions: Vec<Project>,
    suggestions_visible: bool,
    cache: Option<Vec<Project>>,
    generation: u64,
}

pub struct SearchCoordinator {
    gateway: Arc<dyn ProjectGateway>,
    bus: EventBus,
    notifier: SharedNotifier,
    state: Mutex<SearchState>,
}

impl SearchCoordinator {
    pub fn new(gateway: Arc<dyn ProjectGateway>, bus: EventBus, notifier: SharedNotifier) -> Self {
        Self { gateway, bus, notifier, state: Mutex::new(SearchState::default()) }
    }

    fn lock(&self) -> MutexGuard<'_, SearchState> {
        self.state.lock().expect("search coordinator state poisoned")
    }

    pub fn query(&self) -> String {
        self.lock().query.clone()
    }

    pub fn suggestions(&self) -> Vec<Project> {
        self.lock().suggestions.clone()
    }

    pub fn suggestions_visible(&self) -> bool {
        self.lock().suggestions_visible
    }

    /// Handle one keystroke's worth of query change.
    ///
    /// An empty or whitespace-only query clears the suggestions and
    /// broadcasts an empty `search-query-changed` so listeners drop their
    /// filters. Otherwise suggestions are recomputed against the cached
    /// project list (fetched on first use) and the raw query is broadcast.
    /// A fetch failure notifies and leaves the previous query and
    /// suggestions intact.
    pub async fn set_query(&self, raw: &str) -> Result<(), ConsoleError> {
        if raw.trim().is_empty() {
            {
                let mut state = self.lock();
                state.generation += 1;
                state.query = raw.to_string();
                state.suggestions.clear();
                state.suggestions_visible = false;
            }
            self.bus.publish(Signal::SearchQueryChanged(String::new()));
            return Ok(());
        }

        let (token, cached) = {
            let mut state = self.lock();
            state.generation += 1;
            (state.generation, state.cache.clone())
        };

        let projects = match cached {
            Some(projects) => projects,
            None => match self.gateway.list_projects().await {
                Ok(projects) => projects,
                Err(err) => {
                    self.notifier.notify(Notification::destructive(
                        "Error",
                        "Failed to fetch projects",
                    ));
                    return Err(err);
                }
            },
        };

        {
            let mut state = self.lock();
            if state.generation != token {
                debug!(token, current = state.generation, "discarding overtaken search query");
                return Ok(());
            }
            state.cache.get_or_insert_with(|| projects.clone());
            state.query = raw.to_string();
            state.suggestions = apply_filter(&projects, raw);
            state.suggestions_visible = true;
        }
        self.bus.publish(Signal::SearchQueryChanged(raw.to_string()));
        Ok(())
    }

    /// Commit a suggestion: the query text becomes the project name, the
    /// suggestion list is hidden, and `project-selected` is broadcast.
    pub fn select(&self, project: &Project) {
        {
            let mut state = self.lock();
            state.query = project.name.clone();
            state.suggestions_visible = false;
        }
        self.bus.publish(Signal::ProjectSelected(project.id.clone()));
    }

    /// Hide the suggestion list without touching the query or broadcasting
    pub fn dismiss(&self) {
        self.lock().suggestions_visible = false;
    }
}
