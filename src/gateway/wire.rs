//! Wire-format shapes for the remote management API.
//!
//! The server speaks snake_case field names that differ from the client
//! models in places (`project_id` vs `id`, `prompt_name` vs `name`). All
//! mapping between the two worlds happens here so the rest of the crate
//! only ever sees the `models` types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::{Credentials, MAX_CONFIDENCE_SCORE, Project, Prompt};

/// Row shape returned by `GET /projects`
#[derive(Debug, Deserialize)]
pub struct ProjectRow {
    pub project_id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.project_id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// Request body for `POST /projects`
#[derive(Debug, Serialize)]
pub struct CreateProjectBody<'a> {
    pub project_name: &'a str,
    pub description: &'a str,
}

/// Record returned by `POST /projects` (note: plain `id`, not `project_id`)
#[derive(Debug, Deserialize)]
pub struct CreatedProject {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<CreatedProject> for Project {
    fn from(row: CreatedProject) -> Self {
        Project {
            id: row.id,
            name: row.name,
            description: row.description,
            created_at: row.created_at,
        }
    }
}

/// Request body for `PUT /projects/{id}`
#[derive(Debug, Serialize)]
pub struct UpdateProjectBody<'a> {
    pub name: &'a str,
    pub description: &'a str,
}

/// Row shape returned by `GET /projects/{id}/prompts`
#[derive(Debug, Deserialize)]
pub struct PromptRow {
    pub id: String,
    pub prompt_name: String,
    pub description: String,
    pub confidence_score: u8,
}

impl From<PromptRow> for Prompt {
    fn from(row: PromptRow) -> Self {
        Prompt {
            id: row.id,
            name: row.prompt_name,
            description: row.description,
            // Defensive: the score range is a server-side invariant
            confidence_score: row.confidence_score.min(MAX_CONFIDENCE_SCORE),
        }
    }
}

/// Request body for `POST /projects/{id}/prompts`
#[derive(Debug, Serialize)]
pub struct CreatePromptBody<'a> {
    pub prompt_name: &'a str,
    pub prompt: &'a str,
    pub description: &'a str,
    pub confidence_score: u8,
}

/// Request body for `PUT /prompts/{id}`
#[derive(Debug, Serialize)]
pub struct UpdatePromptBody<'a> {
    pub name: &'a str,
    pub prompt: &'a str,
    pub description: &'a str,
    pub confidence_score: u8,
}

/// Response to prompt creation; the remaining fields are echoed client-side
#[derive(Debug, Deserialize)]
pub struct CreatedPrompt {
    pub id: String,
}

/// Shape returned by `GET /prompts/{id}/details`
#[derive(Debug, Deserialize)]
pub struct CredentialsRow {
    pub project_id: String,
    pub prompt_id: String,
    pub secret_key: String,
}

impl From<CredentialsRow> for Credentials {
    fn from(row: CredentialsRow) -> Self {
        Credentials {
            project_id: row.project_id,
            prompt_id: row.prompt_id,
            secret_key: row.secret_key,
        }
    }
}
