//! Site-specific extraction strategies and the registry that dispatches to them.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use scraper::{Html, Selector};
use url::Url;

use crate::error::DownloadError;

pub mod comicextra;
pub mod mangareader;
pub mod mangatown;
pub mod readcomiconline;

pub use comicextra::ComicExtra;
pub use mangareader::MangaReader;
pub use mangatown::MangaTown;
pub use readcomiconline::ReadComicOnline;

/// Supported source sites, keyed by host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Site {
    ComicExtra,
    MangaTown,
    MangaReader,
    ReadComicOnline,
}

impl Site {
    pub const ALL: [Site; 4] = [
        Site::ComicExtra,
        Site::MangaTown,
        Site::MangaReader,
        Site::ReadComicOnline,
    ];

    pub fn host(&self) -> &'static str {
        match self {
            Site::ComicExtra => "www.comicextra.com",
            Site::MangaTown => "www.mangatown.com",
            Site::MangaReader => "www.mangareader.net",
            Site::ReadComicOnline => "readcomiconline.to",
        }
    }
}

impl FromStr for Site {
    type Err = DownloadError;

    fn from_str(host: &str) -> Result<Self, Self::Err> {
        Site::ALL
            .into_iter()
            .find(|site| site.host() == host)
            .ok_or_else(|| DownloadError::UnknownSource(host.to_string()))
    }
}

impl fmt::Display for Site {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.host())
    }
}

/// Where the images of an issue live.
#[derive(Debug, Clone, PartialEq)]
pub enum Pages {
    /// Every image link is on the issue page itself.
    Images(Vec<String>),
    /// One reader page per image; each must be fetched and passed to
    /// [`Strategy::image_on_page`].
    Paginated(Vec<String>),
}

/// What a strategy reads off an issue page.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted {
    pub name: String,
    pub issue_number: String,
    pub pages: Pages,
}

/// Extraction logic for one site.
///
/// Every method works on content that has already been fetched, so
/// implementations stay free of I/O and shared state.
pub trait Strategy: Send + Sync {
    fn site(&self) -> Site;

    /// URL to fetch for an issue page.
    fn reader_url(&self, url: &str) -> Result<String, DownloadError> {
        Ok(url.to_string())
    }

    fn extract(&self, url: &str, body: &str) -> Result<Extracted, DownloadError>;

    fn image_on_page(&self, page_url: &str, _body: &str) -> Result<String, DownloadError> {
        Err(self.fail(page_url, "site has no paginated reader"))
    }

    fn issue_number(&self, url: &str) -> Result<String, DownloadError>;

    fn series_url(&self, url: &str) -> Result<String, DownloadError>;

    /// Issue URLs of a series, oldest first.
    fn list_issues(&self, series_url: &str, body: &str) -> Result<Vec<String>, DownloadError>;

    fn fail(&self, url: &str, reason: &str) -> DownloadError {
        DownloadError::extraction(self.site().host(), url, reason)
    }
}

/// Immutable mapping from site to strategy.
#[derive(Clone, Default)]
pub struct Registry {
    strategies: HashMap<Site, Arc<dyn Strategy>>,
}

impl Registry {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn builtin() -> Self {
        Self::empty()
            .with(Arc::new(ComicExtra))
            .with(Arc::new(MangaTown))
            .with(Arc::new(MangaReader))
            .with(Arc::new(ReadComicOnline))
    }

    /// Registers `strategy`, replacing any strategy for the same site.
    pub fn with(mut self, strategy: Arc<dyn Strategy>) -> Self {
        self.strategies.insert(strategy.site(), strategy);
        self
    }

    pub fn resolve(&self, source: &str) -> Result<Arc<dyn Strategy>, DownloadError> {
        let site = source.parse::<Site>()?;
        self.strategies
            .get(&site)
            .cloned()
            .ok_or_else(|| DownloadError::UnknownSource(source.to_string()))
    }

    pub fn sites(&self) -> Vec<Site> {
        Site::ALL
            .into_iter()
            .filter(|site| self.strategies.contains_key(site))
            .collect()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry").field("sites", &self.sites()).finish()
    }
}

pub(crate) fn selector(css: &str) -> Result<Selector, DownloadError> {
    Selector::parse(css)
        .map_err(|_| DownloadError::SelectorError(format!("Failed to parse {} selector", css)))
}

pub(crate) fn parse_url(url: &str) -> Result<Url, DownloadError> {
    Url::parse(url).map_err(|e| DownloadError::InvalidUrl(format!("{}: {}", url, e)))
}

/// Non-empty path segments of `url`.
pub(crate) fn path_segments(url: &Url) -> Vec<String> {
    url.path_segments()
        .map(|segments| {
            segments
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Resolves a possibly relative or protocol-relative link against `base`.
pub(crate) fn resolve_link(base: &Url, href: &str) -> Option<String> {
    let href = href.trim();
    if href.is_empty() {
        return None;
    }
    base.join(href).ok().map(String::from)
}

/// `href` of every element matching `css`, resolved against `base`.
pub(crate) fn collect_hrefs(document: &Html, css: &str, base: &Url) -> Result<Vec<String>, DownloadError> {
    let links_selector = selector(css)?;
    Ok(document
        .select(&links_selector)
        .filter_map(|e| e.value().attr("href"))
        .filter_map(|href| resolve_link(base, href))
        .collect())
}
