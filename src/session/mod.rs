//! Project detail session: prompt lifecycle for one open project.
//!
//! A session is created when a project's detail view opens and closed when
//! it goes away. It owns the project's zero-or-one prompt, the edit draft,
//! and the lazily-fetched credentials. Draft handling is copy-on-edit:
//! `start_edit`/`start_create` seed the draft, `cancel_edit` restores it
//! from the committed prompt without touching the network, and a
//! successful `save` commits the server-confirmed record.
//!
//! Once [`ProjectDetailSession::close`] has run, any response still in
//! flight is discarded on arrival rather than mutating a dead session.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};

use tracing::{debug, warn};

use crate::error::ConsoleError;
use crate::gateway::PromptGateway;
use crate::models::{Credentials, Prompt, PromptDraft};
use crate::notify::{Notification, SharedNotifier};
use crate::progress::LoadTracker;

/// Observable prompt lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PromptState {
    /// The project has no prompt yet
    NoPrompt,
    /// A committed prompt is shown read-only
    Viewing,
    /// The draft is open for changes (creating or editing)
    Editing,
}

#[derive(Default)]
struct SessionState {
    prompt: Option<Prompt>,
    draft: PromptDraft,
    editing: bool,
    credentials: Option<Credentials>,
}

pub struct ProjectDetailSession {
    gateway: Arc<dyn PromptGateway>,
    notifier: SharedNotifier,
    tracker: LoadTracker,
    project_id: String,
    closed: AtomicBool,
    state: Mutex<SessionState>,
}

impl ProjectDetailSession {
    pub fn new(
        gateway: Arc<dyn PromptGateway>,
        notifier: SharedNotifier,
        tracker: LoadTracker,
        project_id: impl Into<String>,
    ) -> Self {
        Self {
            gateway,
            notifier,
            tracker,
            project_id: project_id.into(),
            closed: AtomicBool::new(false),
            state: Mutex::new(SessionState::default()),
        }
    }

    fn lock(&self) -> MutexGuard<'_, SessionState> {
        self.state.lock().expect("detail session state poisoned")
    }

    fn is_closed(&self) -> bool {
        self.closed.load(Ordering::SeqCst)
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn state(&self) -> PromptState {
        let state = self.lock();
        if state.editing {
            PromptState::Editing
        } else if state.prompt.is_some() {
            PromptState::Viewing
        } else {
            PromptState::NoPrompt
        }
    }

    pub fn prompt(&self) -> Option<Prompt> {
        self.lock().prompt.clone()
    }

    pub fn draft(&self) -> PromptDraft {
        self.lock().draft.clone()
    }

    /// Credentials already fetched this session, if any
    pub fn credentials(&self) -> Option<Credentials> {
        self.lock().credentials.clone()
    }

    /// Mark the session dead; late-arriving responses are discarded
    pub fn close(&self) {
        self.closed.store(true, Ordering::SeqCst);
    }

    /// Fetch the project's prompt on open.
    ///
    /// Zero prompts and not-found both land in `NoPrompt` silently; any
    /// other failure notifies but also lands in `NoPrompt` so the view
    /// still renders. More than one prompt violates a server invariant;
    /// the first entry is taken.
    pub async fn load(&self) {
        let _guard = self.tracker.start();
        let result = self.gateway.list_prompts(&self.project_id).await;
        if self.is_closed() {
            debug!(project_id = %self.project_id, "discarding prompt load for closed session");
            return;
        }

        let prompt = match result {
            Ok(mut prompts) => {
                if prompts.len() > 1 {
                    warn!(
                        project_id = %self.project_id,
                        count = prompts.len(),
                        "project has more than one prompt; taking the first"
                    );
                }
                if prompts.is_empty() { None } else { Some(prompts.remove(0)) }
            }
            Err(ConsoleError::NotFound) => None,
            Err(_) => {
                self.notifier
                    .notify(Notification::destructive("Error", "Failed to fetch prompt"));
                None
            }
        };

        let mut state = self.lock();
        state.draft = match &prompt {
            Some(prompt) => PromptDraft::from_prompt(prompt),
            None => PromptDraft::default(),
        };
        state.prompt = prompt;
        state.editing = false;
    }

    /// Open the draft for a brand-new prompt (blank fields, default score)
    pub fn start_create(&self) {
        let mut state = self.lock();
        state.draft = PromptDraft::default();
        state.editing = true;
    }

    /// Open the draft seeded from the committed prompt
    pub fn start_edit(&self) {
        let mut state = self.lock();
        if let Some(prompt) = &state.prompt {
            state.draft = PromptDraft::from_prompt(prompt);
        }
        state.editing = true;
    }

    /// Discard draft changes and restore from the committed prompt.
    /// Never touches the network.
    pub fn cancel_edit(&self) {
        let mut state = self.lock();
        state.draft = match &state.prompt {
            Some(prompt) => PromptDraft::from_prompt(prompt),
            None => PromptDraft::default(),
        };
        state.editing = false;
    }

    pub fn set_draft_name(&self, name: &str) {
        self.lock().draft.name = name.to_string();
    }

    pub fn set_draft_description(&self, description: &str) {
        self.lock().draft.description = description.to_string();
    }

    pub fn set_draft_confidence_score(&self, score: u8) {
        self.lock().draft.set_confidence_score(score);
    }

    /// Persist the draft: create when no prompt exists yet, update
    /// otherwise.
    ///
    /// The name is validated client-side before any network call. On
    /// success the server-confirmed record is committed and the session
    /// returns to `Viewing`; on failure the draft and `Editing` state
    /// survive so the user's input is not lost.
    pub async fn save(&self) -> Result<(), ConsoleError> {
        let (draft, existing_id) = {
            let state = self.lock();
            (state.draft.clone(), state.prompt.as_ref().map(|p| p.id.clone()))
        };

        if draft.name.trim().is_empty() {
            self.notifier.notify(Notification::destructive(
                "Validation Error",
                "Prompt name is required",
            ));
            return Err(ConsoleError::Validation("prompt name is required".to_string()));
        }

        let _guard = self.tracker.start();
        let (result, created) = match &existing_id {
            Some(id) => (self.gateway.update_prompt(id, &draft).await, false),
            None => (self.gateway.create_prompt(&self.project_id, &draft).await, true),
        };

        match result {
            Ok(confirmed) => {
                if self.is_closed() {
                    debug!(project_id = %self.project_id, "discarding prompt save for closed session");
                    return Ok(());
                }
                {
                    let mut state = self.lock();
                    state.draft = PromptDraft::from_prompt(&confirmed);
                    state.prompt = Some(confirmed);
                    state.editing = false;
                }
                let description = if created {
                    "Prompt created successfully"
                } else {
                    "Prompt updated successfully"
                };
                self.notifier.notify(Notification::success("Success", description));
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::destructive("Error", "Failed to save prompt"));
                Err(err)
            }
        }
    }

    /// Delete the committed prompt; on success the session resets to
    /// `NoPrompt` with a blank draft and the cached credentials cleared.
    pub async fn delete(&self) -> Result<(), ConsoleError> {
        let Some(id) = self.lock().prompt.as_ref().map(|p| p.id.clone()) else {
            return Ok(());
        };

        let _guard = self.tracker.start();
        match self.gateway.delete_prompt(&id).await {
            Ok(()) => {
                if self.is_closed() {
                    debug!(project_id = %self.project_id, "discarding prompt delete for closed session");
                    return Ok(());
                }
                {
                    let mut state = self.lock();
                    state.prompt = None;
                    state.draft = PromptDraft::default();
                    state.credentials = None;
                    state.editing = false;
                }
                self.notifier
                    .notify(Notification::success("Success", "Prompt deleted successfully"));
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::destructive("Error", "Failed to delete prompt"));
                Err(err)
            }
        }
    }

    /// Reveal the prompt's credentials, fetching them at most once per
    /// session. A failed fetch caches nothing, so a retry is possible.
    pub async fn reveal_credentials(&self) -> Result<Credentials, ConsoleError> {
        let (cached, prompt_id) = {
            let state = self.lock();
            (state.credentials.clone(), state.prompt.as_ref().map(|p| p.id.clone()))
        };
        if let Some(credentials) = cached {
            return Ok(credentials);
        }
        let Some(prompt_id) = prompt_id else {
            return Err(ConsoleError::NotFound);
        };

        let _guard = self.tracker.start();
        match self.gateway.prompt_credentials(&prompt_id).await {
            Ok(credentials) => {
                if !self.is_closed() {
                    self.lock().credentials = Some(credentials.clone());
                }
                Ok(credentials)
            }
            Err(err) => {
                self.notifier
                    .notify(Notification::destructive("Error", "Failed to fetch credentials"));
                Err(err)
            }
        }
    }
}
