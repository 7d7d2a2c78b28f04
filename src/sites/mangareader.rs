use scraper::Html;

use super::{collect_hrefs, parse_url, path_segments, resolve_link, selector, Extracted, Pages, Site, Strategy};
use crate::error::DownloadError;

/// `www.mangareader.net`: `/<series>/<n>`, one image per reader page.
#[derive(Debug, Clone, Copy, Default)]
pub struct MangaReader;

impl MangaReader {
    fn series_and_issue(&self, url: &str) -> Result<(String, String), DownloadError> {
        let segments = path_segments(&parse_url(url)?);
        match segments.as_slice() {
            [series, issue, ..] => Ok((series.clone(), issue.clone())),
            _ => Err(self.fail(url, "expected /<series>/<issue> in URL")),
        }
    }
}

impl Strategy for MangaReader {
    fn site(&self) -> Site {
        Site::MangaReader
    }

    fn extract(&self, url: &str, body: &str) -> Result<Extracted, DownloadError> {
        let (name, issue_number) = self.series_and_issue(url)?;
        let base = parse_url(url)?;
        let document = Html::parse_document(body);

        let menu_selector = selector("#pageMenu option")?;
        let mut pages = document
            .select(&menu_selector)
            .filter_map(|e| e.value().attr("value"))
            .filter_map(|value| resolve_link(&base, value))
            .collect::<Vec<_>>();

        if pages.is_empty() {
            pages.push(url.to_string());
        }

        Ok(Extracted { name, issue_number, pages: Pages::Paginated(pages) })
    }

    fn image_on_page(&self, page_url: &str, body: &str) -> Result<String, DownloadError> {
        let base = parse_url(page_url)?;
        let document = Html::parse_document(body);
        let image_selector = selector("img#img")?;

        document
            .select(&image_selector)
            .next()
            .and_then(|e| e.value().attr("src"))
            .and_then(|src| resolve_link(&base, src))
            .ok_or_else(|| self.fail(page_url, "page image not found"))
    }

    fn issue_number(&self, url: &str) -> Result<String, DownloadError> {
        self.series_and_issue(url).map(|(_, issue)| issue)
    }

    fn series_url(&self, url: &str) -> Result<String, DownloadError> {
        let (series, _) = self.series_and_issue(url)?;
        Ok(parse_url(url)?.join(&format!("/{}", series))?.into())
    }

    fn list_issues(&self, series_url: &str, body: &str) -> Result<Vec<String>, DownloadError> {
        let base = parse_url(series_url)?;
        let document = Html::parse_document(body);
        collect_hrefs(&document, "#listing a", &base)
    }
}
