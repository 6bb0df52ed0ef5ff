pub mod table;

use std::io::Write;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::pr::{PrStatus, PullRequestRecord};
use table::Table;

pub const HEADERS: [&str; 7] = [
    "PR",
    "Stars",
    "Title",
    "Additions",
    "Deletions",
    "Changed Files",
    "File Extensions",
];

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("Failed to write report: {0}")]
    Write(#[from] std::io::Error),
}

/// Drop closed PRs and PRs in the user's own repositories, then order the
/// rest by stars, most starred first.
///
/// "Own repository" is a plain substring test on `owner/name`, so
/// `bob/alice-fork` also counts as alice's. Ties keep their input order.
pub fn select(records: Vec<PullRequestRecord>, username: &str) -> Vec<PullRequestRecord> {
    let mut selected: Vec<PullRequestRecord> = records
        .into_iter()
        .filter(|r| r.status != Some(PrStatus::Closed))
        .filter(|r| !r.repo_full_name.contains(username))
        .collect();
    selected.sort_by(|a, b| b.stars.cmp(&a.stars));
    selected
}

/// Write the records as a table, one row per PR.
#[instrument(skip_all, fields(rows = records.len()))]
pub fn render<W: Write>(
    records: &[PullRequestRecord],
    out: &mut W,
    color: bool,
) -> Result<(), ReportError> {
    let mut table = Table::new(HEADERS).with_color(color);
    for pr in records {
        table.add_row(row(pr));
    }
    table.render(out)?;
    out.flush()?;
    debug!("table written");
    Ok(())
}

fn row(pr: &PullRequestRecord) -> Vec<String> {
    vec![
        pr.html_url.clone(),
        pr.stars.to_string(),
        pr.title.clone(),
        pr.additions.to_string(),
        pr.deletions.to_string(),
        pr.changed_files.to_string(),
        pr.file_extensions
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", "),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(repo: &str, number: u64, stars: u64, status: Option<PrStatus>) -> PullRequestRecord {
        PullRequestRecord {
            title: format!("PR {number}"),
            html_url: format!("https://github.com/{repo}/pull/{number}"),
            repo_full_name: repo.to_string(),
            number,
            stars,
            status,
            ..Default::default()
        }
    }

    fn numbers(records: &[PullRequestRecord]) -> Vec<u64> {
        records.iter().map(|r| r.number).collect()
    }

    #[test]
    fn test_select_drops_closed_regardless_of_stars() {
        let records = vec![
            record("a/one", 1, 5, Some(PrStatus::Open)),
            record("a/two", 2, 900, Some(PrStatus::Closed)),
            record("a/three", 3, 50, Some(PrStatus::Merged)),
            record("a/four", 4, 10, Some(PrStatus::Closed)),
        ];
        let selected = select(records, "zed");
        assert_eq!(numbers(&selected), vec![3, 1]);
        assert!(selected.iter().all(|r| r.status != Some(PrStatus::Closed)));
    }

    #[test]
    fn test_select_keeps_unresolved_status() {
        let records = vec![record("a/one", 1, 0, None)];
        assert_eq!(numbers(&select(records, "zed")), vec![1]);
    }

    #[test]
    fn test_select_is_stable_for_equal_stars() {
        let records = vec![
            record("a/one", 1, 10, Some(PrStatus::Open)),
            record("a/two", 2, 20, Some(PrStatus::Open)),
            record("a/three", 3, 10, Some(PrStatus::Open)),
            record("a/four", 4, 10, Some(PrStatus::Merged)),
        ];
        assert_eq!(numbers(&select(records, "zed")), vec![2, 1, 3, 4]);
    }

    #[test]
    fn test_select_excludes_by_username_substring() {
        let records = vec![
            record("alice/alice-tools", 1, 10, Some(PrStatus::Open)),
            record("bob/alice-fork", 2, 10, Some(PrStatus::Open)),
            record("bob/tools", 3, 10, Some(PrStatus::Open)),
        ];
        assert_eq!(numbers(&select(records, "alice")), vec![3]);
    }

    #[test]
    fn test_render_rows() {
        let mut pr = record("foo/bar", 1, 10, Some(PrStatus::Open));
        pr.title = "Fix typo".to_string();
        pr.additions = 3;
        pr.deletions = 1;
        pr.changed_files = 2;
        pr.file_extensions = [".rs", ".md"].iter().map(|e| e.to_string()).collect();

        let mut out = Vec::new();
        render(&[pr], &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        for header in HEADERS {
            assert!(lines[0].contains(header));
        }
        let cells: Vec<&str> = lines[2].split('│').map(str::trim).collect();
        assert_eq!(
            cells,
            vec!["https://github.com/foo/bar/pull/1", "10", "Fix typo", "3", "1", "2", ".md, .rs"]
        );
    }

    #[test]
    fn test_render_empty_is_header_only() {
        let mut out = Vec::new();
        render(&[], &mut out, false).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 2);
        assert!(text.starts_with(" PR │ Stars │ Title │"));
    }
}
