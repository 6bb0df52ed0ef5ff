use std::collections::BTreeSet;
use std::fmt;

use crate::github::SearchItem;

/// Where a pull request ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrStatus {
    Open,
    Merged,
    Closed,
}

impl PrStatus {
    /// Map the pulls endpoint's `state` / `merged` pair onto a status.
    pub fn from_state(state: &str, merged: bool) -> Self {
        if state == "open" {
            PrStatus::Open
        } else if merged {
            PrStatus::Merged
        } else {
            PrStatus::Closed
        }
    }
}

impl fmt::Display for PrStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrStatus::Open => write!(f, "Open"),
            PrStatus::Merged => write!(f, "Merged"),
            PrStatus::Closed => write!(f, "Closed"),
        }
    }
}

/// A pull request found by the author search, enriched in place.
#[derive(Debug, Clone, Default)]
pub struct PullRequestRecord {
    pub title: String,
    /// API URL of the owning repository
    pub repo_url: String,
    /// PR number within its repository
    pub number: u64,
    /// Browser link to the PR
    pub html_url: String,
    /// `owner/name`, derived from `repo_url`
    pub repo_full_name: String,
    pub stars: u64,
    /// `None` until the status lookup succeeds
    pub status: Option<PrStatus>,
    pub additions: u64,
    pub deletions: u64,
    pub changed_files: u64,
    pub file_extensions: BTreeSet<String>,
}

impl From<SearchItem> for PullRequestRecord {
    fn from(item: SearchItem) -> Self {
        PullRequestRecord {
            repo_full_name: repo_full_name(&item.repository_url),
            title: item.title,
            repo_url: item.repository_url,
            number: item.number,
            html_url: item.html_url,
            ..Default::default()
        }
    }
}

/// Last two `/`-separated segments of a repository URL.
///
/// `https://api.github.com/repos/owner/name` becomes `owner/name`.
pub fn repo_full_name(repo_url: &str) -> String {
    let mut tail: Vec<&str> = repo_url.rsplitn(3, '/').take(2).collect();
    tail.reverse();
    tail.join("/")
}

/// Extension of the file's base name, dot included. `None` when the base
/// name has no dot.
pub fn file_extension(filename: &str) -> Option<&str> {
    let base = filename.rsplit('/').next().unwrap_or(filename);
    base.rfind('.').map(|idx| &base[idx..])
}

/// Unique, non-empty extensions across a set of file names.
pub fn unique_extensions<'a, I>(filenames: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = &'a str>,
{
    filenames
        .into_iter()
        .filter_map(file_extension)
        .map(str::to_string)
        .collect()
}
