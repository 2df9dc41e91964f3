use reqwest::blocking::Client;
use std::time::Duration;
use url::Url;

use super::types::*;
use crate::auth;
use crate::credentials::Credentials;
use crate::error::{Result, XccError};

const BASE_URL: &str = "https://api.appstoreconnect.apple.com/v1";
const USER_AGENT: &str = concat!("xcc/", env!("CARGO_PKG_VERSION"));

/// Page size requested from collection endpoints (the API maximum)
const PAGE_LIMIT: u32 = 200;

/// App Store Connect API client
///
/// One bearer token is signed per client; an invocation is far shorter than
/// the token lifetime. All requests are strictly sequential.
pub struct AppStoreClient {
    client: Client,
    token: String,
    base_url: String,
}

impl AppStoreClient {
    /// Create a client by signing a token from the resolved credentials
    pub fn new(credentials: &Credentials) -> Result<Self> {
        let token = auth::sign_token(credentials)?;
        Self::with_token(token, BASE_URL)
    }

    /// Create a client with an already-signed token and explicit base URL
    pub fn with_token(token: impl Into<String>, base_url: impl Into<String>) -> Result<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self {
            client,
            token: token.into(),
            base_url: base_url.into(),
        })
    }

    /// Make a GET request to an API path
    fn get<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<T> {
        self.get_url(&format!("{}{path}", self.base_url))
    }

    /// Make a GET request to an absolute URL (first page or a next-page link)
    fn get_url<T: serde::de::DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .client
            .get(url)
            .bearer_auth(&self.token)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(XccError::api(status.as_u16(), message));
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(XccError::Json)
    }

    /// Make a POST request to the API
    fn post<T: serde::de::DeserializeOwned, B: serde::Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let url = format!("{}{path}", self.base_url);
        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.token)
            .json(body)
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().unwrap_or_default();
            return Err(XccError::api(status.as_u16(), message));
        }

        let body = response.text()?;
        serde_json::from_str(&body).map_err(XccError::Json)
    }

    /// Follow a paged collection to exhaustion, concatenating every page in
    /// server order. Any page failure aborts the whole aggregation.
    fn get_all<T: serde::de::DeserializeOwned>(&self, path: &str) -> Result<Vec<T>> {
        let page: CollectionResponse<T> = self.get(path)?;
        let mut items = page.data;
        let mut next = page.links.next;

        while let Some(url) = next {
            self.validate_next_url(&url)?;
            let page: CollectionResponse<T> = self.get_url(&url)?;
            items.extend(page.data);
            next = page.links.next;
        }

        Ok(items)
    }

    /// A next-page link must stay on the API host we started from
    fn validate_next_url(&self, url: &str) -> Result<()> {
        let base = Url::parse(&self.base_url)
            .map_err(|_| XccError::Config(format!("Invalid base URL: {}", self.base_url)))?;
        let parsed = Url::parse(url)
            .map_err(|_| XccError::InvalidArgument(format!("Invalid next-page URL: {url}")))?;

        if parsed.host_str() != base.host_str() {
            return Err(XccError::InvalidArgument(format!(
                "Next-page URL points off the API host: {url}"
            )));
        }

        Ok(())
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Bundle ID Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// List every registered bundle ID
    pub fn list_bundle_ids(&self) -> Result<Vec<BundleId>> {
        self.get_all(&format!("/bundleIds?limit={PAGE_LIMIT}"))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Product and Workflow Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// List all Xcode Cloud products with their related bundle IDs
    pub fn list_products(&self) -> Result<Vec<Product>> {
        self.get_all(&format!("/ciProducts?include=bundleId&limit={PAGE_LIMIT}"))
    }

    /// List a product's workflows
    pub fn list_workflows(&self, product_id: &str) -> Result<Vec<Workflow>> {
        self.get_all(&format!("/ciProducts/{product_id}/workflows?limit={PAGE_LIMIT}"))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Repository Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Fetch the repository backing a workflow
    pub fn get_repository(&self, workflow_id: &str) -> Result<Repository> {
        let response: SingleResponse<Repository> =
            self.get(&format!("/ciWorkflows/{workflow_id}/repository"))?;
        Ok(response.data)
    }

    /// List a repository's branches and tags
    pub fn list_git_references(&self, repository_id: &str) -> Result<Vec<GitReference>> {
        self.get_all(&format!(
            "/scmRepositories/{repository_id}/gitReferences?limit={PAGE_LIMIT}"
        ))
    }

    /// List a repository's open pull requests
    pub fn list_pull_requests(&self, repository_id: &str) -> Result<Vec<PullRequest>> {
        self.get_all(&format!(
            "/scmRepositories/{repository_id}/pullRequests?limit={PAGE_LIMIT}"
        ))
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Build Run Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Start a build run for a workflow from exactly one source.
    ///
    /// The response body carries the new run but nothing downstream needs
    /// it; success is the HTTP call returning without error.
    pub fn create_build_run(&self, workflow_id: &str, source: &BuildSource) -> Result<()> {
        let mut relationships = serde_json::json!({
            "workflow": {
                "data": { "type": "ciWorkflows", "id": workflow_id }
            }
        });

        match source {
            BuildSource::Reference(id) => {
                relationships["sourceBranchOrTag"] = serde_json::json!({
                    "data": { "type": "scmGitReferences", "id": id }
                });
            }
            BuildSource::PullRequest(id) => {
                relationships["pullRequest"] = serde_json::json!({
                    "data": { "type": "scmPullRequests", "id": id }
                });
            }
        }

        let body = serde_json::json!({
            "data": {
                "type": "ciBuildRuns",
                "relationships": relationships,
            }
        });

        let _: serde_json::Value = self.post("/ciBuildRuns", &body)?;
        Ok(())
    }
}
