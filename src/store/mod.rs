//! Project collection store: the single owner of the project lists.
//!
//! The store holds the authoritative in-memory project list plus the
//! currently visible (filtered) subset, and reconciles both after every
//! gateway mutation. All mutation funnels through the operations here;
//! readers only ever receive cloned snapshots.
//!
//! # Consistency policy
//!
//! Mutations patch the local lists only after the gateway confirms, so
//! unsaved edits are never shown as persisted. Every committed mutation
//! bumps a generation counter; a `refresh` whose fetch started before the
//! latest mutation is discarded on arrival instead of overwriting newer
//! local state (the refresh-vs-mutation race).

mod filter;

use std::sync::{Arc, Mutex, MutexGuard};

pub use filter::apply_filter;
use tracing::debug;

use crate::bus::{EventBus, Signal};
use crate::error::ConsoleError;
use crate::gateway::ProjectGateway;
use crate::models::Project;
use crate::notify::{Notification, SharedNotifier};
use crate::progress::LoadTracker;

#[derive(Default)]
struct StoreState {
    all: Vec<Project>,
    visible: Vec<Project>,
    query: String,
    selected: Option<String>,
    generation: u64,
}

pub struct ProjectStore {
    gateway: Arc<dyn ProjectGateway>,
    bus: EventBus,
    notifier: SharedNotifier,
    tracker: LoadTracker,
    state: Mutex<StoreState>,
}

impl ProjectStore {
    pub fn new(
        gateway: Arc<dyn ProjectGateway>,
        bus: EventBus,
        notifier: SharedNotifier,
        tracker: LoadTracker,
    ) -> Self {
        Self { gateway, bus, notifier, tracker, state: Mutex::new(StoreState::default()) }
    }

    fn lock(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().expect("project store state poisoned")
    }

    /// Snapshot of the authoritative list
    pub fn projects(&self) -> Vec<Project> {
        self.lock().all.clone()
    }

    /// Snapshot of the visible (filtered) list
    pub fn visible(&self) -> Vec<Project> {
        self.lock().visible.clone()
    }

    pub fn query(&self) -> String {
        self.lock().query.clone()
    }

    pub fn find(&self, id: &str) -> Option<Project> {
        self.lock().all.iter().find(|project| project.id == id).cloned()
    }

    /// The project selected via a `project-selected` signal, if any
    pub fn selected_project(&self) -> Option<Project> {
        let state = self.lock();
        let id = state.selected.as_deref()?;
        state.all.iter().find(|project| project.id == id).cloned()
    }

    /// Apply a search query; the visible list becomes the filtered subset
    /// of the authoritative list. Synchronous and deterministic.
    pub fn set_query(&self, query: &str) {
        let mut state = self.lock();
        state.query = query.to_string();
        state.visible = apply_filter(&state.all, query);
    }

    pub fn select(&self, id: &str) {
        self.lock().selected = Some(id.to_string());
    }

    pub fn clear_selection(&self) {
        self.lock().selected = None;
    }

    /// Fetch the full project list and replace the authoritative list.
    ///
    /// On failure the prior list is retained and a notification is
    /// emitted. A response that was overtaken by a mutation is discarded.
    pub async fn refresh(&self) -> Result<(), ConsoleError> {
        let _guard = self.tracker.start();
        let started_at = self.lock().generation;

        let fetched = match self.gateway.list_projects().await {
            Ok(projects) => projects,
            Err(err) => {
                self.notifier
                    .notify(Notification::destructive("Error", "Failed to fetch projects"));
                return Err(err);
            }
        };

        let mut state = self.lock();
        if state.generation != started_at {
            debug!(
                started_at,
                current = state.generation,
                "discarding stale project refresh response"
            );
            return Ok(());
        }
        state.all = fetched;
        state.visible = apply_filter(&state.all, &state.query);
        Ok(())
    }

    /// Create a project and append the server-returned record.
    ///
    /// Name and description are validated client-side before any network
    /// call. Publishes `projects-changed` exactly once on success.
    pub async fn create(&self, name: &str, description: &str) -> Result<Project, ConsoleError> {
        if name.trim().is_empty() || description.trim().is_empty() {
            self.notifier.notify(Notification::destructive(
                "Validation Error",
                "Project name and description are required",
            ));
            return Err(ConsoleError::Validation(
                "project name and description are required".to_string(),
            ));
        }

        let _guard = self.tracker.start();
        match self.gateway.create_project(name, description).await {
            Ok(project) => {
                {
                    let mut state = self.lock();
                    state.all.push(project.clone());
                    state.visible = apply_filter(&state.all, &state.query);
                    state.generation += 1;
                }
                self.notifier.notify(Notification::success(
                    "Success",
                    format!("Project \"{name}\" created successfully"),
                ));
                self.bus.publish(Signal::ProjectsChanged);
                Ok(project)
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::destructive("Error", "Failed to create project"));
                Err(err)
            }
        }
    }

    /// Update a project in place after gateway confirmation, preserving
    /// list order and `created_at`.
    pub async fn update(
        &self,
        id: &str,
        name: &str,
        description: &str,
    ) -> Result<(), ConsoleError> {
        let _guard = self.tracker.start();
        match self.gateway.update_project(id, name, description).await {
            Ok(()) => {
                {
                    let mut state = self.lock();
                    if let Some(entry) = state.all.iter_mut().find(|project| project.id == id) {
                        entry.name = name.to_string();
                        entry.description = description.to_string();
                    }
                    state.visible = apply_filter(&state.all, &state.query);
                    state.generation += 1;
                }
                self.notifier
                    .notify(Notification::success("Success", "Project updated successfully"));
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::destructive("Error", "Failed to update project"));
                Err(err)
            }
        }
    }

    /// Delete a project; on success it is removed from both lists in the
    /// same update. On failure both lists are unchanged.
    pub async fn delete(&self, id: &str) -> Result<(), ConsoleError> {
        let _guard = self.tracker.start();
        match self.gateway.delete_project(id).await {
            Ok(()) => {
                {
                    let mut state = self.lock();
                    state.all.retain(|project| project.id != id);
                    state.visible.retain(|project| project.id != id);
                    if state.selected.as_deref() == Some(id) {
                        state.selected = None;
                    }
                    state.generation += 1;
                }
                self.notifier
                    .notify(Notification::success("Success", "Project deleted successfully"));
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::destructive("Error", "Failed to delete project"));
                Err(err)
            }
        }
    }
}
