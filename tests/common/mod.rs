//! Shared test utilities for integration tests
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use prompt_console::error::ConsoleError;
use prompt_console::gateway::{ProjectGateway, PromptGateway};
use prompt_console::models::{Credentials, Project, Prompt, PromptDraft};
use tokio::sync::Notify;

pub fn project(id: &str, name: &str, description: &str) -> Project {
    Project {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        created_at: Utc.timestamp_opt(1_700_000_000, 0).unwrap(),
    }
}

pub fn prompt(id: &str, name: &str, score: u8) -> Prompt {
    Prompt {
        id: id.to_string(),
        name: name.to_string(),
        description: format!("{name} description"),
        confidence_score: score,
    }
}

/// In-memory gateway double backing both the project and prompt traits.
///
/// Supports scripted failures, per-method call counters, and one-shot
/// gates that hold a response in flight until released (for exercising
/// stale-response handling).
#[derive(Default)]
pub struct MockGateway {
    projects: Mutex<Vec<Project>>,
    prompts: Mutex<HashMap<String, Vec<Prompt>>>,
    next_id: AtomicUsize,

    pub list_project_calls: AtomicUsize,
    pub list_prompt_calls: AtomicUsize,
    pub credential_calls: AtomicUsize,

    fail_projects: AtomicBool,
    fail_prompts: AtomicBool,

    project_list_gate: Mutex<Option<Arc<Notify>>>,
    prompt_list_gate: Mutex<Option<Arc<Notify>>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_projects(projects: Vec<Project>) -> Self {
        Self { projects: Mutex::new(projects), ..Self::default() }
    }

    pub fn seed_prompts(&self, project_id: &str, prompts: Vec<Prompt>) {
        self.prompts.lock().unwrap().insert(project_id.to_string(), prompts);
    }

    pub fn projects(&self) -> Vec<Project> {
        self.projects.lock().unwrap().clone()
    }

    pub fn fail_projects(&self, fail: bool) {
        self.fail_projects.store(fail, Ordering::SeqCst);
    }

    pub fn fail_prompts(&self, fail: bool) {
        self.fail_prompts.store(fail, Ordering::SeqCst);
    }

    /// Hold the next `list_projects` response until the returned handle is
    /// notified. The snapshot is taken before waiting, so the response is
    /// stale with respect to anything committed while it was held.
    pub fn gate_next_project_list(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.project_list_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    /// Same as [`MockGateway::gate_next_project_list`] for the prompt list
    pub fn gate_next_prompt_list(&self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        *self.prompt_list_gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    fn check_project_fail(&self) -> Result<(), ConsoleError> {
        if self.fail_projects.load(Ordering::SeqCst) {
            Err(ConsoleError::Gateway("scripted project failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn check_prompt_fail(&self) -> Result<(), ConsoleError> {
        if self.fail_prompts.load(Ordering::SeqCst) {
            Err(ConsoleError::Gateway("scripted prompt failure".to_string()))
        } else {
            Ok(())
        }
    }

    fn assign_id(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl ProjectGateway for MockGateway {
    async fn list_projects(&self) -> Result<Vec<Project>, ConsoleError> {
        self.list_project_calls.fetch_add(1, Ordering::SeqCst);
        self.check_project_fail()?;
        // Snapshot first: a gated response reflects the state at call time
        let snapshot = self.projects.lock().unwrap().clone();
        let gate = self.project_list_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(snapshot)
    }

    async fn create_project(&self, name: &str, description: &str) -> Result<Project, ConsoleError> {
        self.check_project_fail()?;
        let created = Project {
            id: self.assign_id("p"),
            name: name.to_string(),
            description: description.to_string(),
            created_at: Utc.timestamp_opt(1_700_000_100, 0).unwrap(),
        };
        self.projects.lock().unwrap().push(created.clone());
        Ok(created)
    }

    async fn update_project(
        &self,
        id: &str,
        name: &str,
        description: &str,
    ) -> Result<(), ConsoleError> {
        self.check_project_fail()?;
        let mut projects = self.projects.lock().unwrap();
        if let Some(entry) = projects.iter_mut().find(|p| p.id == id) {
            entry.name = name.to_string();
            entry.description = description.to_string();
        }
        Ok(())
    }

    async fn delete_project(&self, id: &str) -> Result<(), ConsoleError> {
        self.check_project_fail()?;
        self.projects.lock().unwrap().retain(|p| p.id != id);
        self.prompts.lock().unwrap().remove(id);
        Ok(())
    }
}

#[async_trait]
impl PromptGateway for MockGateway {
    async fn list_prompts(&self, project_id: &str) -> Result<Vec<Prompt>, ConsoleError> {
        self.list_prompt_calls.fetch_add(1, Ordering::SeqCst);
        self.check_prompt_fail()?;
        let snapshot =
            self.prompts.lock().unwrap().get(project_id).cloned().unwrap_or_default();
        let gate = self.prompt_list_gate.lock().unwrap().take();
        if let Some(gate) = gate {
            gate.notified().await;
        }
        Ok(snapshot)
    }

    async fn create_prompt(
        &self,
        project_id: &str,
        draft: &PromptDraft,
    ) -> Result<Prompt, ConsoleError> {
        self.check_prompt_fail()?;
        let created = Prompt {
            id: self.assign_id("pr"),
            name: draft.name.clone(),
            description: draft.description.clone(),
            confidence_score: draft.confidence_score(),
        };
        self.prompts
            .lock()
            .unwrap()
            .entry(project_id.to_string())
            .or_default()
            .push(created.clone());
        Ok(created)
    }

    async fn update_prompt(
        &self,
        prompt_id: &str,
        draft: &PromptDraft,
    ) -> Result<Prompt, ConsoleError> {
        self.check_prompt_fail()?;
        let updated = Prompt {
            id: prompt_id.to_string(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            confidence_score: draft.confidence_score(),
        };
        let mut prompts = self.prompts.lock().unwrap();
        for entries in prompts.values_mut() {
            if let Some(entry) = entries.iter_mut().find(|p| p.id == prompt_id) {
                *entry = updated.clone();
            }
        }
        Ok(updated)
    }

    async fn delete_prompt(&self, prompt_id: &str) -> Result<(), ConsoleError> {
        self.check_prompt_fail()?;
        let mut prompts = self.prompts.lock().unwrap();
        for entries in prompts.values_mut() {
            entries.retain(|p| p.id != prompt_id);
        }
        Ok(())
    }

    async fn prompt_credentials(&self, prompt_id: &str) -> Result<Credentials, ConsoleError> {
        self.credential_calls.fetch_add(1, Ordering::SeqCst);
        self.check_prompt_fail()?;
        Ok(Credentials {
            project_id: "owner".to_string(),
            prompt_id: prompt_id.to_string(),
            secret_key: format!("sk-{prompt_id}"),
        })
    }
}
