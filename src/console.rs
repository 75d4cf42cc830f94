//! Composition root: builds the bus, store, and search coordinator once
//! per application lifetime and wires the signal routes between them.
//!
//! Routing is the only place components learn about each other:
//!
//! - `search-query-changed` → the store recomputes its visible list
//! - `project-selected` → the store records the selection
//! - `projects-changed` → the store re-fetches from the gateway
//!
//! The re-fetch route is asynchronous work triggered from a synchronous
//! handler, so it is spawned on the runtime; the store's generation
//! counter discards the response if it arrives stale.

use std::sync::Arc;

use tokio::runtime::Handle;

use crate::bus::{EventBus, Signal, SignalKind, Subscription};
use crate::config::GatewayConfig;
use crate::error::ConsoleError;
use crate::gateway::{HttpGateway, ProjectGateway, PromptGateway};
use crate::notify::{LogNotifier, SharedNotifier};
use crate::progress::LoadTracker;
use crate::search::SearchCoordinator;
use crate::session::ProjectDetailSession;
use crate::store::ProjectStore;

pub struct Console {
    bus: EventBus,
    store: Arc<ProjectStore>,
    search: Arc<SearchCoordinator>,
    prompt_gateway: Arc<dyn PromptGateway>,
    notifier: SharedNotifier,
    tracker: LoadTracker,
    // Held so the routes stay registered for the console's lifetime
    _routes: Vec<Subscription>,
}

impl Console {
    pub fn new(
        project_gateway: Arc<dyn ProjectGateway>,
        prompt_gateway: Arc<dyn PromptGateway>,
        notifier: SharedNotifier,
    ) -> Self {
        let bus = EventBus::new();
        let tracker = LoadTracker::new();
        let store = Arc::new(ProjectStore::new(
            Arc::clone(&project_gateway),
            bus.clone(),
            Arc::clone(&notifier),
            tracker.clone(),
        ));
        let search = Arc::new(SearchCoordinator::new(
            project_gateway,
            bus.clone(),
            Arc::clone(&notifier),
        ));

        let mut routes = Vec::new();

        let query_store = Arc::clone(&store);
        routes.push(bus.subscribe(SignalKind::SearchQueryChanged, move |signal| {
            if let Signal::SearchQueryChanged(query) = signal {
                query_store.set_query(query);
            }
        }));

        let select_store = Arc::clone(&store);
        routes.push(bus.subscribe(SignalKind::ProjectSelected, move |signal| {
            if let Signal::ProjectSelected(id) = signal {
                select_store.select(id);
            }
        }));

        let refresh_store = Arc::clone(&store);
        let handle = Handle::current();
        routes.push(bus.subscribe(SignalKind::ProjectsChanged, move |_| {
            let store = Arc::clone(&refresh_store);
            handle.spawn(async move {
                // Failure is already notified inside refresh
                let _ = store.refresh().await;
            });
        }));

        Self { bus, store, search, prompt_gateway, notifier, tracker, _routes: routes }
    }

    /// Build a console against the HTTP gateway configured from the
    /// environment, notifying through the log channel.
    pub fn from_env() -> Result<Self, ConsoleError> {
        let config = GatewayConfig::from_env()?;
        let gateway = Arc::new(HttpGateway::new(&config)?);
        let notifier: SharedNotifier = Arc::new(LogNotifier);
        Ok(Self::new(
            Arc::clone(&gateway) as Arc<dyn ProjectGateway>,
            gateway as Arc<dyn PromptGateway>,
            notifier,
        ))
    }

    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    pub fn store(&self) -> &Arc<ProjectStore> {
        &self.store
    }

    pub fn search(&self) -> &Arc<SearchCoordinator> {
        &self.search
    }

    pub fn tracker(&self) -> &LoadTracker {
        &self.tracker
    }

    /// Open a detail session for one project. The caller drives `load`
    /// and closes the session when the view goes away.
    pub fn open_project(&self, project_id: &str) -> ProjectDetailSession {
        ProjectDetailSession::new(
            Arc::clone(&self.prompt_gateway),
            Arc::clone(&self.notifier),
            self.tracker.clone(),
            project_id,
        )
    }
}
