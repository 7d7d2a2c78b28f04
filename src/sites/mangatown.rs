use scraper::Html;

use super::{collect_hrefs, parse_url, path_segments, resolve_link, selector, Extracted, Pages, Site, Strategy};
use crate::error::DownloadError;

/// `www.mangatown.com`: `/manga/<series>/[v<vol>/]c<n>/`, one image per reader page.
#[derive(Debug, Clone, Copy, Default)]
pub struct MangaTown;

impl MangaTown {
    fn series_and_issue(&self, url: &str) -> Result<(String, String), DownloadError> {
        let parsed = parse_url(url)?;
        let segments = path_segments(&parsed);
        let mut rest = segments.iter().skip_while(|s| s.as_str() != "manga").skip(1);

        let series = rest.next().ok_or_else(|| self.fail(url, "no series after /manga/ in URL"))?;
        let issue = rest
            .filter(|s| !s.ends_with(".html"))
            .last()
            .ok_or_else(|| self.fail(url, "no chapter segment in URL"))?;

        Ok((series.clone(), issue.clone()))
    }
}

impl Strategy for MangaTown {
    fn site(&self) -> Site {
        Site::MangaTown
    }

    fn extract(&self, url: &str, body: &str) -> Result<Extracted, DownloadError> {
        let (name, issue_number) = self.series_and_issue(url)?;
        let base = parse_url(url)?;
        let document = Html::parse_document(body);

        let select_selector = selector(".page_select select")?;
        let option_selector = selector("option")?;

        // Readers repeat the page selector above and below the image
        let options = document
            .select(&select_selector)
            .next()
            .map(|select| select.select(&option_selector).collect::<Vec<_>>())
            .unwrap_or_default();

        let mut pages = Vec::new();
        for option in options {
            let label = option.text().collect::<String>();
            if label.trim().eq_ignore_ascii_case("featured") {
                continue;
            }
            if let Some(page) = option.value().attr("value").and_then(|v| resolve_link(&base, v)) {
                pages.push(page);
            }
        }

        // Page selector only shows up on multi-page chapters
        if pages.is_empty() {
            pages.push(url.to_string());
        }

        Ok(Extracted { name, issue_number, pages: Pages::Paginated(pages) })
    }

    fn image_on_page(&self, page_url: &str, body: &str) -> Result<String, DownloadError> {
        let base = parse_url(page_url)?;
        let document = Html::parse_document(body);
        let image_selector = selector("img#image")?;

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
        Ok(parse_url(url)?.join(&format!("/manga/{}/", series))?.into())
    }

    fn list_issues(&self, series_url: &str, body: &str) -> Result<Vec<String>, DownloadError> {
        let base = parse_url(series_url)?;
        let document = Html::parse_document(body);

        let mut issues = collect_hrefs(&document, "ul.chapter_list li a", &base)?;
        issues.reverse();

        Ok(issues)
    }
}
