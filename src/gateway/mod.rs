//! Remote data gateway: typed access to the management API.
//!
//! The gateway is consumed through the [`ProjectGateway`] and
//! [`PromptGateway`] trait seams so the stores can be exercised against an
//! in-memory double in tests. [`HttpGateway`] is the production
//! implementation speaking JSON over HTTP.

pub mod http;
pub mod wire;

use async_trait::async_trait;
pub use http::HttpGateway;

use crate::error::ConsoleError;
use crate::models::{Credentials, Project, Prompt, PromptDraft};

/// CRUD access to the project collection
#[async_trait]
pub trait ProjectGateway: Send + Sync {
    async fn list_projects(&self) -> Result<Vec<Project>, ConsoleError>;

    /// Create a project; the server assigns the id and returns the record
    async fn create_project(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Project, ConsoleError>;

    async fn update_project(
        &self,
        id: &str,
        name: &str,
        description: &str,
    ) -> Result<(), ConsoleError>;

    async fn delete_project(&self, id: &str) -> Result<(), ConsoleError>;
}

/// Access to the zero-or-one prompt owned by a project
#[async_trait]
pub trait PromptGateway: Send + Sync {
    /// List a project's prompts. "No prompt" may surface either as an
    /// empty list or as [`ConsoleError::NotFound`]; callers treat both the
    /// same way.
    async fn list_prompts(&self, project_id: &str) -> Result<Vec<Prompt>, ConsoleError>;

    async fn create_prompt(
        &self,
        project_id: &str,
        draft: &PromptDraft,
    ) -> Result<Prompt, ConsoleError>;

    async fn update_prompt(
        &self,
        prompt_id: &str,
        draft: &PromptDraft,
    ) -> Result<Prompt, ConsoleError>;

    async fn delete_prompt(&self, prompt_id: &str) -> Result<(), ConsoleError>;

    async fn prompt_credentials(&self, prompt_id: &str) -> Result<Credentials, ConsoleError>;
}
