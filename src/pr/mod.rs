pub mod types;

pub use types::{PrStatus, PullRequestRecord};

use thiserror::Error;
use tracing::{debug, info_span, instrument, warn, Instrument};

use crate::github::{self, Fetch, GitHubError};

/// A recoverable failure while enriching one pull request.
#[derive(Debug, Error)]
pub enum EnrichFailure {
    #[error("Error getting stars for repo {repo}: {source}")]
    Stars { repo: String, source: GitHubError },

    #[error("Error getting PR status for {repo}/{number}: {source}")]
    Status {
        repo: String,
        number: u64,
        source: GitHubError,
    },

    #[error("Error getting PR details for {repo}/{number}: {source}")]
    Details {
        repo: String,
        number: u64,
        source: GitHubError,
    },
}

impl EnrichFailure {
    /// `owner/name` of the repository the failure belongs to.
    pub fn repo(&self) -> &str {
        match self {
            EnrichFailure::Stars { repo, .. }
            | EnrichFailure::Status { repo, .. }
            | EnrichFailure::Details { repo, .. } => repo,
        }
    }
}

/// Search for the user's pull requests and turn each hit into a record.
///
/// This is the one call whose failure aborts the run.
pub async fn fetch_user_pull_requests(
    api: &dyn Fetch,
    username: &str,
) -> Result<Vec<PullRequestRecord>, GitHubError> {
    let items = github::search_pull_requests(api, username).await?;
    Ok(items.into_iter().map(PullRequestRecord::from).collect())
}

/// Enrich every record in place, one at a time.
///
/// A failing step is logged and ends enrichment for that record only; the
/// record keeps whatever was filled in before the failure. All failures are
/// returned to the caller.
#[instrument(skip_all, fields(records = records.len()))]
pub async fn enrich(api: &dyn Fetch, records: &mut [PullRequestRecord]) -> Vec<EnrichFailure> {
    let mut failures = Vec::new();

    for record in records.iter_mut() {
        let span = info_span!("enrich", repo = %record.repo_full_name, pr = record.number);
        if let Err(failure) = enrich_one(api, record).instrument(span).await {
            warn!(repo = failure.repo(), "{failure}");
            failures.push(failure);
        }
    }

    debug!(failed = failures.len(), "enrichment complete");
    failures
}

async fn enrich_one(api: &dyn Fetch, record: &mut PullRequestRecord) -> Result<(), EnrichFailure> {
    let repo = record.repo_full_name.clone();
    let number = record.number;

    record.stars = github::repo_stars(api, &repo)
        .await
        .map_err(|source| EnrichFailure::Stars {
            repo: repo.clone(),
            source,
        })?;

    let state = github::pull_state(api, &repo, number)
        .await
        .map_err(|source| EnrichFailure::Status {
            repo: repo.clone(),
            number,
            source,
        })?;
    record.status = Some(PrStatus::from_state(&state.state, state.merged));

    let details_failure = |source| EnrichFailure::Details {
        repo: repo.clone(),
        number,
        source,
    };
    let detail = github::pull_detail(api, &repo, number)
        .await
        .map_err(details_failure)?;
    let files = github::pull_files(api, &repo, number)
        .await
        .map_err(details_failure)?;

    record.additions = detail.additions;
    record.deletions = detail.deletions;
    record.changed_files = detail.changed_files;
    record.file_extensions = types::unique_extensions(files.iter().map(|f| f.filename.as_str()));

    debug!(
        repo_url = %record.repo_url,
        stars = record.stars,
        status = ?record.status,
        extensions = record.file_extensions.len(),
        "enriched"
    );
    Ok(())
}
