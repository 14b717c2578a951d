// ABOUTME: Jira SDK library providing a typed async client for the Jira REST API
// ABOUTME: Includes credential resolution, version-negotiating dispatch, and domain operations

pub mod adf;
pub mod builder;
pub mod constants;
pub mod credentials;
pub mod dispatcher;
pub mod error;
pub mod types;

#[cfg(test)]
pub mod test_helpers;

pub use builder::JiraClientConfig;
pub use credentials::{CredentialSet, CredentialSource, Environment, PersistedSettings, ProcessEnv};
pub use dispatcher::{ApiVersion, ApiVersionMode};
pub use error::{JiraError, Result};
pub use types::*;

use reqwest::Method;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use std::borrow::Cow;

use crate::constants::requests;
use crate::dispatcher::{Dispatcher, RequestSpec};

pub struct JiraClient {
    dispatcher: Dispatcher,
}

impl JiraClient {
    /// Client in auto version mode with the default timeout
    pub fn new(credentials: CredentialSet) -> Result<Self> {
        Self::builder().credentials(credentials).build()
    }

    pub fn from_config(config: JiraClientConfig) -> Result<Self> {
        let dispatcher =
            Dispatcher::new(&config.credentials, config.api_version, config.timeout)?;
        Ok(Self { dispatcher })
    }

    pub fn server(&self) -> &str {
        self.dispatcher.server()
    }

    pub fn api_version_mode(&self) -> ApiVersionMode {
        self.dispatcher.mode()
    }

    /// The REST version the next versioned call will try first
    pub fn preferred_version(&self) -> ApiVersion {
        self.dispatcher.preferred_version()
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self
            .dispatcher
            .request(Method::GET, |_| RequestSpec::new(path))
            .await?;
        decode(value)
    }

    async fn get_agile_page<T: DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let value = self
            .dispatcher
            .agile(Method::GET, RequestSpec::new(path))
            .await?;
        let page: AgilePage<T> = decode(value)?;
        Ok(page.values)
    }

    pub async fn get_current_user(&self) -> Result<User> {
        self.get("/myself").await
    }

    /// Check the credentials against `/myself`. Failures are reported in the
    /// returned status, never raised.
    pub async fn test_connection(&self) -> ConnectionStatus {
        match self.get_current_user().await {
            Ok(user) => ConnectionStatus::Connected(user),
            Err(e) => {
                log::debug!("Connection test failed: {}", e);
                ConnectionStatus::Failed(e.to_string())
            }
        }
    }

    pub async fn get_issue(&self, key: &str) -> Result<Issue> {
        self.get(&format!("/issue/{}", segment(key)?)).await
    }

    /// Search with JQL. REST v3 moved search to `/search/jql`.
    pub async fn search_issues(&self, jql: &str, options: &SearchOptions) -> Result<SearchResults> {
        let fields = options.fields.join(",");
        let value = self
            .dispatcher
            .request(Method::GET, |version| {
                let path = match version {
                    ApiVersion::V2 => "/search",
                    ApiVersion::V3 => "/search/jql",
                };
                RequestSpec::new(path)
                    .query("jql", jql)
                    .query("startAt", options.start_at)
                    .query("maxResults", options.max_results)
                    .query("fields", &fields)
            })
            .await?;
        decode(value)
    }

    /// Create an issue from a full `{"fields": {...}}` payload
    pub async fn create_issue(&self, payload: &Value) -> Result<CreatedIssue> {
        let value = self
            .dispatcher
            .request(Method::POST, |version| {
                RequestSpec::new("/issue").json(issue_payload(version, payload))
            })
            .await?;
        decode(value)
    }

    pub async fn update_issue(&self, key: &str, payload: &Value) -> Result<()> {
        let path = format!("/issue/{}", segment(key)?);
        self.dispatcher
            .request(Method::PUT, |version| {
                RequestSpec::new(path.as_str()).json(issue_payload(version, payload))
            })
            .await?;
        Ok(())
    }

    pub async fn delete_issue(&self, key: &str) -> Result<bool> {
        let path = format!("/issue/{}", segment(key)?);
        self.dispatcher
            .request(Method::DELETE, |_| RequestSpec::new(path.as_str()))
            .await?;
        Ok(true)
    }

    pub async fn get_projects(&self) -> Result<Vec<Project>> {
        self.get("/project").await
    }

    pub async fn get_project(&self, key: &str) -> Result<Project> {
        self.get(&format!("/project/{}", segment(key)?)).await
    }

    pub async fn get_project_components(&self, key: &str) -> Result<Vec<Component>> {
        self.get(&format!("/project/{}/components", segment(key)?)).await
    }

    pub async fn get_project_versions(&self, key: &str) -> Result<Vec<ProjectVersion>> {
        self.get(&format!("/project/{}/versions", segment(key)?)).await
    }

    pub async fn get_boards(&self) -> Result<Vec<Board>> {
        self.get_agile_page("/board").await
    }

    pub async fn get_sprints(&self, board_id: u64) -> Result<Vec<Sprint>> {
        self.get_agile_page(&format!("/board/{}/sprint", board_id))
            .await
    }

    pub async fn get_issue_types(&self) -> Result<Vec<IssueType>> {
        self.get("/issuetype").await
    }

    pub async fn get_statuses(&self) -> Result<Vec<Status>> {
        self.get("/status").await
    }

    pub async fn search_users(&self, query: &str) -> Result<Vec<User>> {
        let value = self
            .dispatcher
            .request(Method::GET, |version| {
                let param = match version {
                    ApiVersion::V2 => "username",
                    ApiVersion::V3 => "query",
                };
                RequestSpec::new("/user/search").query(param, query)
            })
            .await?;
        decode(value)
    }

    pub async fn get_comments(&self, key: &str) -> Result<CommentPage> {
        self.get(&format!("/issue/{}/comment", segment(key)?)).await
    }

    pub async fn add_comment(
        &self,
        key: &str,
        body: &str,
        options: CommentOptions,
    ) -> Result<Comment> {
        let path = format!("/issue/{}/comment", segment(key)?);
        let value = self
            .dispatcher
            .request(Method::POST, |version| {
                let mut payload = json!({ "body": comment_body(version, body) });
                if options.internal {
                    payload["visibility"] = json!({
                        "type": "role",
                        "value": requests::INTERNAL_VISIBILITY_ROLE,
                    });
                }
                RequestSpec::new(path.as_str()).json(payload)
            })
            .await?;
        decode(value)
    }

    pub async fn update_comment(&self, comment_id: &str, body: &str) -> Result<Comment> {
        let path = format!("/comment/{}", segment(comment_id)?);
        let value = self
            .dispatcher
            .request(Method::PUT, |version| {
                RequestSpec::new(path.as_str()).json(json!({ "body": comment_body(version, body) }))
            })
            .await?;
        decode(value)
    }

    pub async fn delete_comment(&self, comment_id: &str) -> Result<bool> {
        let path = format!("/comment/{}", segment(comment_id)?);
        self.dispatcher
            .request(Method::DELETE, |_| RequestSpec::new(path.as_str()))
            .await?;
        Ok(true)
    }
}

/// Percent-encode a key or id for use as one path segment
fn segment(value: &str) -> Result<Cow<'_, str>> {
    let value = value.trim();
    if value.is_empty() || value == "." || value == ".." {
        return Err(JiraError::InvalidInput {
            message: format!("Invalid key or id: '{}'", value),
        });
    }
    Ok(urlencoding::encode(value))
}

fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    Ok(serde_json::from_value(value)?)
}

fn comment_body(version: ApiVersion, body: &str) -> Value {
    match version {
        ApiVersion::V2 => Value::String(body.to_string()),
        ApiVersion::V3 => adf::from_plain_text(body),
    }
}

fn issue_payload(version: ApiVersion, payload: &Value) -> Value {
    match version {
        ApiVersion::V2 => payload.clone(),
        ApiVersion::V3 => adf::convert_description(payload),
    }
}
