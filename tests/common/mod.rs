#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use comics_downloader::{DownloadError, PageFetcher};

/// Serves canned pages by exact URL and records every request.
#[derive(Default)]
pub struct FixtureFetcher {
    pages: HashMap<String, String>,
    delays: HashMap<String, Duration>,
    requests: Mutex<Vec<String>>,
}

impl FixtureFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: impl Into<String>, body: impl Into<String>) -> Self {
        self.pages.insert(url.into(), body.into());
        self
    }

    pub fn delay(mut self, url: impl Into<String>, delay: Duration) -> Self {
        self.delays.insert(url.into(), delay);
        self
    }

    pub fn requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PageFetcher for FixtureFetcher {
    async fn fetch(&self, url: &str) -> Result<String, DownloadError> {
        self.requests.lock().unwrap().push(url.to_string());
        if let Some(delay) = self.delays.get(url) {
            tokio::time::sleep(*delay).await;
        }
        self.pages.get(url).cloned().ok_or_else(|| DownloadError::HttpStatus {
            url: url.to_string(),
            status: 404,
        })
    }
}

pub const MANGATOWN_ISSUE: &str = "https://www.mangatown.com/manga/naruto/v63/c693/";
pub const COMICEXTRA_ISSUE: &str = "https://www.comicextra.com/daredevil/chapter-600/full";
pub const COMICEXTRA_SERIES: &str = "https://www.comicextra.com/comic/daredevil";

pub fn mangatown_image(page: usize) -> String {
    format!("https://zjcdn.mangahere.org/store/manga/8/63-693.0/compressed/n{:03}.jpg", page)
}

/// One mangatown reader page; the page selector lists `pages` pages plus a
/// "Featured" entry.
pub fn mangatown_page(path: &str, pages: usize, current: usize) -> String {
    let mut options = String::new();
    for page in 1..=pages {
        let value = if page == 1 { path.to_string() } else { format!("{}{}.html", path, page) };
        options.push_str(&format!(r#"<option value="{}">{}</option>"#, value, page));
    }
    options.push_str(r#"<option value="/manga/featured.html">Featured</option>"#);

    format!(
        r#"<html><body>
<div class="title"><h1>Naruto 693</h1></div>
<div class="page_select"><select onchange="javascript:location.href=this.value;">{}</select></div>
<div class="read_img"><img src="{}" id="image" alt="Naruto 693"></div>
</body></html>"#,
        options,
        // Protocol-relative, as served by the site
        mangatown_image(current).trim_start_matches("https:"),
    )
}

/// Fixture fetcher with every reader page of Naruto c693.
pub fn mangatown_fixture(pages: usize) -> FixtureFetcher {
    let path = "/manga/naruto/v63/c693/";
    let mut fetcher = FixtureFetcher::new().page(MANGATOWN_ISSUE, mangatown_page(path, pages, 1));
    for page in 2..=pages {
        fetcher = fetcher.page(
            format!("https://www.mangatown.com{}{}.html", path, page),
            mangatown_page(path, pages, page),
        );
    }
    fetcher
}

pub fn comicextra_issue_url(chapter: &str) -> String {
    format!("https://www.comicextra.com/daredevil/{}/full", chapter)
}

pub fn comicextra_image(chapter: &str, page: usize) -> String {
    format!("https://2.bp.blogspot.com/daredevil/{}/{:02}.jpg", chapter, page)
}

pub fn comicextra_issue_page(chapter: &str, images: usize) -> String {
    let imgs = (1..=images)
        .map(|page| format!(r#"<img class="chapter_img" src="{}" alt="">"#, comicextra_image(chapter, page)))
        .collect::<Vec<_>>()
        .join("\n");
    format!(
        r#"<html><body><div class="chapter-container">{}</div><img class="logo" src="/logo.png"></body></html>"#,
        imgs
    )
}

/// Series index listing `chapter-1..=chapters` newest first, with a
/// non-numeric annual in between.
pub fn comicextra_series_page(chapters: usize) -> String {
    let mut rows = String::new();
    for chapter in (1..=chapters).rev() {
        rows.push_str(&format!(
            r#"<tr><td><a href="https://www.comicextra.com/daredevil/chapter-{0}">Daredevil #{0}</a></td></tr>"#,
            chapter
        ));
        if chapter == 6 {
            rows.push_str(r#"<tr><td><a href="https://www.comicextra.com/daredevil/annual-1">Daredevil Annual</a></td></tr>"#);
        }
    }
    format!(
        r#"<html><body><h1>Daredevil</h1><table><tbody id="list">{}</tbody></table></body></html>"#,
        rows
    )
}

/// Fixture fetcher with the daredevil series index and every listed issue.
pub fn comicextra_fixture(chapters: usize) -> FixtureFetcher {
    let mut fetcher = FixtureFetcher::new()
        .page(COMICEXTRA_SERIES, comicextra_series_page(chapters))
        .page(COMICEXTRA_ISSUE, comicextra_issue_page("chapter-600", 43))
        .page(comicextra_issue_url("annual-1"), comicextra_issue_page("annual-1", 30));
    for chapter in 1..=chapters {
        let slug = format!("chapter-{}", chapter);
        fetcher = fetcher.page(comicextra_issue_url(&slug), comicextra_issue_page(&slug, 20 + chapter));
    }
    fetcher
}
