pub mod types;

pub use types::SearchItem;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, USER_AGENT};
use thiserror::Error;
use tracing::{debug, instrument};

use types::{decode, ChangedFile, PullDetail, PullState, RepoMetadata, SearchResults};

pub const DEFAULT_API_URL: &str = "https://api.github.com";

#[derive(Debug, Error)]
pub enum GitHubError {
    #[error("GitHub API request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Failed to decode GitHub API response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Issues an authenticated GET against the API and hands back the raw body.
///
/// The HTTP status is not interpreted: a 404 or 403 body comes back as
/// data and is left to the decoder.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, GitHubError>;
}

/// reqwest-backed [`Fetch`] for the GitHub REST API.
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
}

impl GitHubClient {
    pub fn new(base_url: &str, token: String) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        }
    }
}

#[async_trait]
impl Fetch for GitHubClient {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, GitHubError> {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, "GET");
        let response = self
            .http
            .get(&url)
            .header(USER_AGENT, "ossint")
            .header(ACCEPT, "application/vnd.github.v3+json")
            .bearer_auth(&self.token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            debug!(%url, %status, "non-success status, passing body through");
        }

        Ok(response.bytes().await?.to_vec())
    }
}

/// First page of public pull requests authored by `username`.
#[instrument(skip(api))]
pub async fn search_pull_requests(
    api: &dyn Fetch,
    username: &str,
) -> Result<Vec<SearchItem>, GitHubError> {
    let path = format!("/search/issues?q=author:{username}+type:pr+is:public");
    let results: SearchResults = decode(&api.fetch(&path).await?)?;
    debug!(found = results.items.len(), "search complete");
    Ok(results.items)
}

#[instrument(skip(api))]
pub async fn repo_stars(api: &dyn Fetch, repo: &str) -> Result<u64, GitHubError> {
    let meta: RepoMetadata = decode(&api.fetch(&format!("/repos/{repo}")).await?)?;
    Ok(meta.stargazers_count)
}

#[instrument(skip(api))]
pub async fn pull_state(
    api: &dyn Fetch,
    repo: &str,
    number: u64,
) -> Result<PullState, GitHubError> {
    decode(&api.fetch(&format!("/repos/{repo}/pulls/{number}")).await?)
}

#[instrument(skip(api))]
pub async fn pull_detail(
    api: &dyn Fetch,
    repo: &str,
    number: u64,
) -> Result<PullDetail, GitHubError> {
    decode(&api.fetch(&format!("/repos/{repo}/pulls/{number}")).await?)
}

#[instrument(skip(api))]
pub async fn pull_files(
    api: &dyn Fetch,
    repo: &str,
    number: u64,
) -> Result<Vec<ChangedFile>, GitHubError> {
    decode(&api.fetch(&format!("/repos/{repo}/pulls/{number}/files")).await?)
}
