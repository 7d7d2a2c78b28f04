use log::debug;

use crate::comic::IssueId;
use crate::error::DownloadError;
use crate::options::Selection;

/// Parses an inclusive `start-end` range such as `5-7` or `20-20.5`.
pub fn parse_issues_range(input: &str) -> Result<(f64, f64), DownloadError> {
    let input = input.trim();
    let (start, end) = input
        .split_once('-')
        .ok_or_else(|| DownloadError::InvalidRange(format!("expected start-end, got '{}'", input)))?;

    let start = start.trim().parse::<f64>()
        .map_err(|_| DownloadError::InvalidRange(format!("invalid range start: '{}'", start.trim())))?;
    let end = end.trim().parse::<f64>()
        .map_err(|_| DownloadError::InvalidRange(format!("invalid range end: '{}'", end.trim())))?;

    if !start.is_finite() || !end.is_finite() {
        return Err(DownloadError::InvalidRange(format!("range bounds must be finite: '{}'", input)));
    }
    if start > end {
        return Err(DownloadError::InvalidRange(format!("range start {} is after end {}", start, end)));
    }

    Ok((start, end))
}

/// True when `issue` must be left out of the inclusive `[start, end]` range.
///
/// Identifiers that do not read as a number are left out rather than failing
/// the whole resolution.
pub fn not_in_issues_range(issue: &str, start: f64, end: f64) -> bool {
    !IssueId::parse(issue).within(start, end)
}

/// Picks the issue URLs a selection targets.
///
/// `listing` is the series index in ascending order and is ignored for
/// `Selection::Single`. `issue_number` maps an issue URL to its identifier.
/// Listing order is kept; nothing is re-sorted.
pub fn resolve_candidates<F>(
    selection: Selection,
    url: &str,
    listing: Vec<String>,
    issue_number: F,
) -> Vec<String>
where
    F: Fn(&str) -> Option<String>,
{
    match selection {
        Selection::Single => vec![url.to_string()],
        Selection::All => listing,
        Selection::Last => listing.into_iter().last().into_iter().collect(),
        Selection::Range { start, end } => listing
            .into_iter()
            .filter(|candidate| match issue_number(candidate) {
                Some(issue) if !not_in_issues_range(&issue, start, end) => true,
                Some(issue) => {
                    debug!("Skipping issue {} outside {}-{}", issue, start, end);
                    false
                }
                None => {
                    debug!("Skipping {}: no issue identifier", candidate);
                    false
                }
            })
            .collect(),
    }
}
