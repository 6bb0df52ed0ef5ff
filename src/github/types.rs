//! Response shapes for the GitHub REST endpoints we read.
//!
//! Every field defaults when missing so an unexpected body (an error
//! message, a rate-limit notice) decodes to zero values instead of failing.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::GitHubError;

/// Envelope returned by `/search/issues`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SearchResults {
    pub items: Vec<SearchItem>,
}

/// A single pull request hit from the issue search.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchItem {
    pub title: String,
    /// API URL of the owning repository, e.g. `https://api.github.com/repos/owner/name`
    pub repository_url: String,
    pub number: u64,
    pub html_url: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RepoMetadata {
    pub stargazers_count: u64,
}

/// The state flags of `/repos/{repo}/pulls/{number}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PullState {
    /// `"open"` or `"closed"`
    pub state: String,
    pub merged: bool,
}

/// The change counters of `/repos/{repo}/pulls/{number}`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct PullDetail {
    pub additions: u64,
    pub deletions: u64,
    pub changed_files: u64,
}

/// One entry of `/repos/{repo}/pulls/{number}/files`.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ChangedFile {
    pub filename: String,
}

/// Decode a raw response body into `T`.
pub fn decode<T: DeserializeOwned>(body: &[u8]) -> Result<T, GitHubError> {
    Ok(serde_json::from_slice(body)?)
}
