use scraper::Html;

use super::{collect_hrefs, parse_url, path_segments, resolve_link, selector, Extracted, Pages, Site, Strategy};
use crate::error::DownloadError;

/// `www.comicextra.com`: `/<series>/chapter-<n>/full` shows every page at once.
#[derive(Debug, Clone, Copy, Default)]
pub struct ComicExtra;

impl ComicExtra {
    fn series_and_issue(&self, url: &str) -> Result<(String, String), DownloadError> {
        let parsed = parse_url(url)?;
        let segments = path_segments(&parsed);
        match segments.as_slice() {
            [series, issue, ..] if series != "comic" => Ok((series.clone(), issue.clone())),
            _ => Err(self.fail(url, "expected /<series>/<issue> in URL")),
        }
    }
}

impl Strategy for ComicExtra {
    fn site(&self) -> Site {
        Site::ComicExtra
    }

    fn extract(&self, url: &str, body: &str) -> Result<Extracted, DownloadError> {
        let (name, issue_number) = self.series_and_issue(url)?;
        let base = parse_url(url)?;
        let document = Html::parse_document(body);

        let images_selector = selector("img.chapter_img")?;
        let links = document
            .select(&images_selector)
            .filter_map(|e| e.value().attr("src").or_else(|| e.value().attr("data-src")))
            .filter_map(|src| resolve_link(&base, src))
            .collect();

        Ok(Extracted { name, issue_number, pages: Pages::Images(links) })
    }

    fn issue_number(&self, url: &str) -> Result<String, DownloadError> {
        self.series_and_issue(url).map(|(_, issue)| issue)
    }

    fn series_url(&self, url: &str) -> Result<String, DownloadError> {
        let (series, _) = self.series_and_issue(url)?;
        Ok(parse_url(url)?.join(&format!("/comic/{}", series))?.into())
    }

    fn list_issues(&self, series_url: &str, body: &str) -> Result<Vec<String>, DownloadError> {
        let base = parse_url(series_url)?;
        let document = Html::parse_document(body);

        // Newest first on the page
        let mut issues = collect_hrefs(&document, "#list a", &base)?
            .into_iter()
            .map(|href| full_reader(&href))
            .collect::<Vec<_>>();
        issues.reverse();

        Ok(issues)
    }
}

fn full_reader(href: &str) -> String {
    let href = href.trim_end_matches('/');
    if href.ends_with("/full") {
        href.to_string()
    } else {
        format!("{}/full", href)
    }
}
