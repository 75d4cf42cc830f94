//! HTTP implementation of the remote data gateway.

use async_trait::async_trait;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::{Client, Response, StatusCode};

use super::wire::{
    CreateProjectBody, CreatePromptBody, CreatedProject, CreatedPrompt, CredentialsRow,
    ProjectRow, PromptRow, UpdateProjectBody, UpdatePromptBody,
};
use super::{ProjectGateway, PromptGateway};
use crate::config::GatewayConfig;
use crate::error::ConsoleError;
use crate::models::{Credentials, Project, Prompt, PromptDraft};

pub struct HttpGateway {
    client: Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(config: &GatewayConfig) -> Result<Self, ConsoleError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|err| ConsoleError::Gateway(format!("failed to build http client: {err}")))?;
        Ok(Self { client, base_url: config.base_url.trim_end_matches('/').to_string() })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Ids are opaque server-assigned strings; encode them for path use
    fn encode_id(id: &str) -> String {
        utf8_percent_encode(id, NON_ALPHANUMERIC).to_string()
    }
}

fn request_error(err: reqwest::Error) -> ConsoleError {
    ConsoleError::Gateway(format!("request failed: {err}"))
}

fn decode_error(err: reqwest::Error) -> ConsoleError {
    ConsoleError::Gateway(format!("invalid response body: {err}"))
}

/// Map a non-2xx response to a gateway error carrying server detail
async fn check(response: Response) -> Result<Response, ConsoleError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let detail = response.text().await.unwrap_or_default();
    if detail.is_empty() {
        Err(ConsoleError::Gateway(format!("server returned {status}")))
    } else {
        Err(ConsoleError::Gateway(format!("server returned {status}: {detail}")))
    }
}

#[async_trait]
impl ProjectGateway for HttpGateway {
    async fn list_projects(&self) -> Result<Vec<Project>, ConsoleError> {
        let response =
            self.client.get(self.url("/projects")).send().await.map_err(request_error)?;
        let rows: Vec<ProjectRow> = check(response).await?.json().await.map_err(decode_error)?;
        Ok(rows.into_iter().map(Project::from).collect())
    }

    async fn create_project(
        &self,
        name: &str,
        description: &str,
    ) -> Result<Project, ConsoleError> {
        let body = CreateProjectBody { project_name: name, description };
        let response = self
            .client
            .post(self.url("/projects"))
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;
        let created: CreatedProject = check(response).await?.json().await.map_err(decode_error)?;
        Ok(Project::from(created))
    }

    async fn update_project(
        &self,
        id: &str,
        name: &str,
        description: &str,
    ) -> Result<(), ConsoleError> {
        let body = UpdateProjectBody { name, description };
        let response = self
            .client
            .put(self.url(&format!("/projects/{}", Self::encode_id(id))))
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;
        check(response).await?;
        Ok(())
    }

    async fn delete_project(&self, id: &str) -> Result<(), ConsoleError> {
        let response = self
            .client
            .delete(self.url(&format!("/projects/{}", Self::encode_id(id))))
            .send()
            .await
            .map_err(request_error)?;
        check(response).await?;
        Ok(())
    }
}

#[async_trait]
impl PromptGateway for HttpGateway {
    async fn list_prompts(&self, project_id: &str) -> Result<Vec<Prompt>, ConsoleError> {
        let response = self
            .client
            .get(self.url(&format!("/projects/{}/prompts", Self::encode_id(project_id))))
            .send()
            .await
            .map_err(request_error)?;
        // A missing prompt may be reported as 404 rather than an empty list
        if response.status() == StatusCode::NOT_FOUND {
            return Err(ConsoleError::NotFound);
        }
        let rows: Vec<PromptRow> = check(response).await?.json().await.map_err(decode_error)?;
        Ok(rows.into_iter().map(Prompt::from).collect())
    }

    async fn create_prompt(
        &self,
        project_id: &str,
        draft: &PromptDraft,
    ) -> Result<Prompt, ConsoleError> {
        let body = CreatePromptBody {
            prompt_name: &draft.name,
            prompt: &draft.description,
            description: &draft.description,
            confidence_score: draft.confidence_score(),
        };
        let response = self
            .client
            .post(self.url(&format!("/projects/{}/prompts", Self::encode_id(project_id))))
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;
        let created: CreatedPrompt = check(response).await?.json().await.map_err(decode_error)?;
        Ok(Prompt {
            id: created.id,
            name: draft.name.clone(),
            description: draft.description.clone(),
            confidence_score: draft.confidence_score(),
        })
    }

    async fn update_prompt(
        &self,
        prompt_id: &str,
        draft: &PromptDraft,
    ) -> Result<Prompt, ConsoleError> {
        let body = UpdatePromptBody {
            name: &draft.name,
            prompt: &draft.description,
            description: &draft.description,
            confidence_score: draft.confidence_score(),
        };
        let response = self
            .client
            .put(self.url(&format!("/prompts/{}", Self::encode_id(prompt_id))))
            .json(&body)
            .send()
            .await
            .map_err(request_error)?;
        check(response).await?;
        Ok(Prompt {
            id: prompt_id.to_string(),
            name: draft.name.clone(),
            description: draft.description.clone(),
            confidence_score: draft.confidence_score(),
        })
    }

    async fn delete_prompt(&self, prompt_id: &str) -> Result<(), ConsoleError> {
        let response = self
            .client
            .delete(self.url(&format!("/prompts/{}", Self::encode_id(prompt_id))))
            .send()
            .await
            .map_err(request_error)?;
        check(response).await?;
        Ok(())
    }

    async fn prompt_credentials(&self, prompt_id: &str) -> Result<Credentials, ConsoleError> {
        let response = self
            .client
            .get(self.url(&format!("/prompts/{}/details", Self::encode_id(prompt_id))))
            .send()
            .await
            .map_err(request_error)?;
        let row: CredentialsRow = check(response).await?.json().await.map_err(decode_error)?;
        Ok(Credentials::from(row))
    }
}
