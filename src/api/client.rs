//! HTTP implementation of the data-access capability.

use reqwest::{Client, Response};
use serde::Deserialize;
use serde_json::json;

use crate::error_handling::AuditError;
use crate::models::{LinkRow, ProjectRecord};
use crate::report::ReportKind;

use super::SeoApi;

#[derive(Deserialize)]
struct CreatedProject {
    project_id: i64,
}

#[derive(Deserialize)]
struct CrawlStarted {
    items_count: u64,
}

#[derive(Deserialize)]
struct BackendMessage {
    message: String,
}

/// REST client for the audit backend.
///
/// Carries the caller's identity token explicitly; every request is sent with
/// it as a bearer credential. Construct one per session and share it via
/// `Arc` - the underlying `reqwest::Client` pools connections internally.
pub struct HttpSeoApi {
    client: Client,
    base_url: String,
    token: String,
}

impl HttpSeoApi {
    /// Creates a client for the backend at `base_url` using `token` as the
    /// caller identity.
    pub fn new(client: Client, base_url: &str, token: &str) -> Self {
        HttpSeoApi {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token: token.to_string(),
        }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Turns a non-success response into a transport error, preferring the
    /// backend's own `message` field when the body carries one.
    async fn check(response: Response) -> Result<Response, AuditError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let fallback = format!("request failed with status {status}");
        let message = match response.json::<BackendMessage>().await {
            Ok(body) if !body.message.is_empty() => body.message,
            _ => fallback,
        };
        Err(AuditError::Transport(message))
    }
}

impl SeoApi for HttpSeoApi {
    async fn list_projects(&self) -> Result<Vec<ProjectRecord>, AuditError> {
        let response = self
            .client
            .get(self.endpoint("get-projects"))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn create_project(&self, name: &str, domain: &str) -> Result<i64, AuditError> {
        let response = self
            .client
            .post(self.endpoint("create-project"))
            .bearer_auth(&self.token)
            .json(&json!({ "project_name": name, "domain": domain }))
            .send()
            .await?;
        let response = Self::check(response).await?;
        let created: CreatedProject = response.json().await?;
        Ok(created.project_id)
    }

    async fn list_links(&self, project_id: i64) -> Result<Vec<LinkRow>, AuditError> {
        let response = self
            .client
            .get(self.endpoint(&format!("get-links/{project_id}")))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }

    async fn start_crawl(&self, project_id: i64, url: &str) -> Result<u64, AuditError> {
        let response = self
            .client
            .post(self.endpoint("start-crawl"))
            .bearer_auth(&self.token)
            .json(&json!({ "url": url, "project_id": project_id }))
            .send()
            .await?;
        let response = Self::check(response).await?;
        let started: CrawlStarted = response.json().await?;
        Ok(started.items_count)
    }

    async fn generate_report(
        &self,
        link_id: i64,
        kind: ReportKind,
    ) -> Result<serde_json::Value, AuditError> {
        let path = match kind {
            ReportKind::PerformanceAudit => format!("generate-lighthouse/{link_id}"),
            ReportKind::AiRecommendation => format!("generate-ai-report/{link_id}"),
        };
        let response = self
            .client
            .post(self.endpoint(&path))
            .bearer_auth(&self.token)
            .send()
            .await?;
        let response = Self::check(response).await?;
        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint_joins_base_url() {
        let api = HttpSeoApi::new(Client::new(), "http://localhost:5000/", "t");
        assert_eq!(
            api.endpoint("get-projects"),
            "http://localhost:5000/get-projects"
        );
        assert_eq!(api.endpoint("get-links/3"), "http://localhost:5000/get-links/3");
    }
}
