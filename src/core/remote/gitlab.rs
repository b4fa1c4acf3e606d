//! GitLab REST API client.
//!
//! Endpoints used:
//!
//! ```text
//! GET    /api/v4/projects/{urlencoded-path}
//! GET    /api/v4/projects/{id}/variables                (paginated)
//! GET    /api/v4/projects/{id}/variables/{key}?filter[environment_scope]={scope}
//! POST   /api/v4/projects/{id}/variables
//! PUT    /api/v4/projects/{id}/variables/{key}?filter[environment_scope]={scope}
//! DELETE /api/v4/projects/{id}/variables/{key}?filter[environment_scope]={scope}
//! ```

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::header::LINK;
use reqwest::{StatusCode, Url};
use serde::Deserialize;
use tracing::debug;
use zeroize::Zeroizing;

use super::pagination::{self, Page};
use super::Remote;
use crate::core::constants;
use crate::core::domain::{ProjectId, RemoteProjectRef, Variable};
use crate::error::{RemoteError, Result};

/// Blocking GitLab client bound to one instance and token.
pub struct GitLab {
    client: Client,
    base_url: Url,
    token: Zeroizing<String>,
}

impl std::fmt::Debug for GitLab {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GitLab")
            .field("base_url", &self.base_url.as_str())
            .field("token", &"<redacted>")
            .finish()
    }
}

#[derive(Deserialize)]
struct ProjectBody {
    id: ProjectId,
}

impl GitLab {
    /// Create a client for `base_url` (e.g. `https://gitlab.example.com`).
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::InvalidUrl` if `base_url` cannot be parsed or
    /// `RemoteError::Client` if the HTTP client cannot be built.
    pub fn new(base_url: &str, token: &str) -> Result<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| RemoteError::InvalidUrl(format!("{}: {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(RemoteError::InvalidUrl(base_url.to_string()).into());
        }

        let client = Client::builder()
            .user_agent(constants::USER_AGENT)
            .build()
            .map_err(|e| RemoteError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token: Zeroizing::new(token.to_string()),
        })
    }

    /// Resolve a project path to its numeric id.
    ///
    /// # Errors
    ///
    /// Returns `RemoteError::ProjectNotFound` for any failure: 404, bad
    /// credentials, and network errors are not told apart.
    pub fn project_id(&self, project: &RemoteProjectRef) -> Result<ProjectId> {
        let url = self.endpoint(&["projects", &project.path]);
        debug!(url = %url, "resolving project id");

        let not_found = |reason: String| RemoteError::ProjectNotFound {
            path: project.path.clone(),
            reason,
        };

        let response = self
            .send(self.client.get(url))
            .map_err(|e| not_found(e.to_string()))?;
        let body: ProjectBody = response.json().map_err(|e| not_found(e.to_string()))?;

        debug!(id = %body.id, "project resolved");
        Ok(body.id)
    }

    /// `/api/v4/...` URL with each segment percent-encoded (`/` becomes `%2F`).
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(["api", "v4"]).extend(segments);
        }
        url
    }

    fn variables_url(&self, project: ProjectId) -> Url {
        self.endpoint(&["projects", &project.to_string(), "variables"])
    }

    fn variable_url(&self, project: ProjectId, key: &str, scope: &str) -> Url {
        let mut url = self.endpoint(&["projects", &project.to_string(), "variables", key]);
        url.query_pairs_mut()
            .append_pair(constants::SCOPE_FILTER, scope);
        url
    }

    /// Attach the token, send, and turn non-2xx statuses into errors.
    fn send(&self, request: RequestBuilder) -> reqwest::Result<Response> {
        request
            .header(constants::TOKEN_HEADER, self.token.as_str())
            .send()?
            .error_for_status()
    }

    /// Fetch one page. The token is only sent to the instance's own origin.
    fn fetch_page(&self, url: &str) -> std::result::Result<Page<Variable>, String> {
        let url = Url::parse(url).map_err(|e| e.to_string())?;
        if url.origin() != self.base_url.origin() {
            return Err(format!(
                "next page is outside {}",
                self.base_url.origin().ascii_serialization()
            ));
        }

        let response = self
            .send(self.client.get(url))
            .map_err(|e| e.to_string())?;
        let next = response
            .headers()
            .get(LINK)
            .and_then(|value| value.to_str().ok())
            .and_then(pagination::next_page_url);
        let items = response.json().map_err(|e| e.to_string())?;
        Ok(Page { items, next })
    }
}

fn request_error(method: &'static str, url: &Url, err: reqwest::Error) -> RemoteError {
    RemoteError::Request {
        method,
        url: url.to_string(),
        reason: err.to_string(),
    }
}

impl Remote for GitLab {
    fn list_variables(&self, project: ProjectId) -> Result<Vec<Variable>> {
        let url = self.variables_url(project);
        debug!(url = %url, "listing variables");

        pagination::collect_pages(url.as_str(), |page| self.fetch_page(page))
    }

    fn find_variable(
        &self,
        project: ProjectId,
        key: &str,
        scope: &str,
    ) -> Result<Option<Variable>> {
        let url = self.variable_url(project, key, scope);
        debug!(url = %url, "probing variable");

        match self.send(self.client.get(url.clone())) {
            Ok(response) => {
                let variable = response.json().map_err(|e| request_error("GET", &url, e))?;
                Ok(Some(variable))
            }
            Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => Ok(None),
            Err(e) => Err(request_error("GET", &url, e).into()),
        }
    }

    fn create_variable(&self, project: ProjectId, variable: &Variable) -> Result<()> {
        let url = self.variables_url(project);
        debug!(key = %variable.key, scope = %variable.environment_scope, "creating variable");

        self.send(self.client.post(url.clone()).json(variable))
            .map_err(|e| request_error("POST", &url, e))?;
        Ok(())
    }

    fn update_variable(&self, project: ProjectId, variable: &Variable) -> Result<()> {
        let url = self.variable_url(project, &variable.key, &variable.environment_scope);
        debug!(key = %variable.key, scope = %variable.environment_scope, "updating variable");

        self.send(self.client.put(url.clone()).json(variable))
            .map_err(|e| request_error("PUT", &url, e))?;
        Ok(())
    }

    fn delete_variable(&self, project: ProjectId, key: &str, scope: &str) -> Result<()> {
        let url = self.variable_url(project, key, scope);
        debug!(url = %url, "deleting variable");

        self.send(self.client.delete(url.clone()))
            .map_err(|e| request_error("DELETE", &url, e))?;
        Ok(())
    }
}
