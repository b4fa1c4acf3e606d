//! Fake GitLab instance backed by mockito.

use mockito::{Matcher, Mock, Server, ServerGuard};

use super::PROJECT_ID;

/// A mockito server answering for project `group/app`.
pub struct FakeGitLab {
    pub server: ServerGuard,
}

impl FakeGitLab {
    pub fn new() -> Self {
        Self {
            server: Server::new(),
        }
    }

    /// Git remote URL pointing at the fake project.
    pub fn remote(&self) -> String {
        format!("{}/group/app.git", self.server.url())
    }

    /// Host the credential must be configured for.
    pub fn host(&self) -> String {
        self.server.host_with_port()
    }

    pub fn variables_path(&self) -> String {
        format!("/api/v4/projects/{}/variables", PROJECT_ID)
    }

    /// Project lookup by encoded path.
    pub fn project(&mut self) -> Mock {
        self.server
            .mock("GET", "/api/v4/projects/group%2Fapp")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(format!(r#"{{"id": {}, "path_with_namespace": "group/app"}}"#, PROJECT_ID))
            .create()
    }

    /// Single-page variable listing.
    pub fn list(&mut self, body: &str) -> Mock {
        let path = self.variables_path();
        self.server
            .mock("GET", path.as_str())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body)
            .create()
    }

    /// Single-variable request filtered by scope.
    pub fn variable(&mut self, method: &str, key: &str, scope: &str) -> Mock {
        let path = format!("{}/{}", self.variables_path(), key);
        self.server.mock(method, path.as_str()).match_query(Matcher::UrlEncoded(
            "filter[environment_scope]".into(),
            scope.into(),
        ))
    }
}
