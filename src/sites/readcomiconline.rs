use regex::Regex;
use scraper::Html;

use super::{collect_hrefs, parse_url, path_segments, resolve_link, selector, Extracted, Pages, Site, Strategy};
use crate::error::DownloadError;

const IMAGES_PATTERN: &str = r#"lstImages\.push\(\s*["']([^"']+)["']\s*\)"#;

/// `readcomiconline.to`: `/Comic/<Series>/<Issue-n>`. Image links are pushed
/// from an inline script when the issue is opened with `readType=1`.
///
/// The series title and issue label come from the reader page (navigation bar
/// link and selected episode); the URL slugs are used when those are missing.
/// Range filtering only sees the URL slug, since it runs before issues are fetched.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReadComicOnline;

impl ReadComicOnline {
    fn series_and_issue(&self, url: &str) -> Result<(String, String), DownloadError> {
        let segments = path_segments(&parse_url(url)?);
        let mut rest = segments.iter().skip_while(|s| !s.eq_ignore_ascii_case("comic")).skip(1);

        let series = rest.next().ok_or_else(|| self.fail(url, "no series after /Comic/ in URL"))?;
        let issue = rest.next().ok_or_else(|| self.fail(url, "no issue segment in URL"))?;

        Ok((series.clone(), issue.clone()))
    }
}

/// Trimmed, whitespace-collapsed text of the first element matching `css`.
fn first_text(document: &Html, css: &str) -> Result<Option<String>, DownloadError> {
    let text_selector = selector(css)?;
    Ok(document
        .select(&text_selector)
        .next()
        .map(|e| e.text().collect::<Vec<_>>().join(" "))
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty()))
}

impl Strategy for ReadComicOnline {
    fn site(&self) -> Site {
        Site::ReadComicOnline
    }

    fn reader_url(&self, url: &str) -> Result<String, DownloadError> {
        let mut parsed = parse_url(url)?;
        if !parsed.query_pairs().any(|(key, _)| key == "readType") {
            parsed.query_pairs_mut().append_pair("readType", "1");
        }
        Ok(parsed.into())
    }

    fn extract(&self, url: &str, body: &str) -> Result<Extracted, DownloadError> {
        let (series, issue) = self.series_and_issue(url)?;
        let base = parse_url(url)?;
        let document = Html::parse_document(body);

        let name = first_text(&document, "#navsubbar p a")?.unwrap_or(series);
        let issue_number = first_text(&document, "select#selectEpisode option[selected]")?.unwrap_or(issue);

        let pattern = Regex::new(IMAGES_PATTERN)
            .map_err(|e| DownloadError::SelectorError(format!("Failed to compile image pattern: {}", e)))?;
        let links = pattern
            .captures_iter(body)
            .filter_map(|caps| caps.get(1))
            .filter_map(|m| resolve_link(&base, m.as_str()))
            .collect();

        Ok(Extracted { name, issue_number, pages: Pages::Images(links) })
    }

    fn issue_number(&self, url: &str) -> Result<String, DownloadError> {
        self.series_and_issue(url).map(|(_, issue)| issue)
    }

    fn series_url(&self, url: &str) -> Result<String, DownloadError> {
        let (series, _) = self.series_and_issue(url)?;
        Ok(parse_url(url)?.join(&format!("/Comic/{}", series))?.into())
    }

    fn list_issues(&self, series_url: &str, body: &str) -> Result<Vec<String>, DownloadError> {
        let base = parse_url(series_url)?;
        let document = Html::parse_document(body);

        let mut issues = collect_hrefs(&document, "table.listing a", &base)?;
        issues.reverse();

        Ok(issues)
    }
}
