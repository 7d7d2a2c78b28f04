use std::sync::Arc;

use futures::{stream, StreamExt, TryStreamExt};
use log::{debug, info};
use tokio::sync::Semaphore;

use crate::comic::Comic;
use crate::error::DownloadError;
use crate::fetcher::{HttpFetcher, PageFetcher};
use crate::options::{Options, Selection};
use crate::range::resolve_candidates;
use crate::sites::{Pages, Registry, Strategy};

/// Resolves a request into the comics it targets.
///
/// Issues are extracted concurrently, but no more than `Options::concurrency`
/// pages are being fetched at any time. Results come back in resolution
/// order; the first failure aborts the load and drops whatever is in flight.
pub struct Loader {
    registry: Registry,
    fetcher: Arc<dyn PageFetcher>,
}

impl Loader {
    pub fn new(registry: Registry, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self { registry, fetcher }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub async fn load_comic_from_source(&self, options: &Options) -> Result<Vec<Comic>, DownloadError> {
        let strategy = self.registry.resolve(&options.source)?;
        let selection = options.selection()?;
        let concurrency = options.concurrency.max(1);
        let permits = Semaphore::new(concurrency);

        let issues = self
            .resolve_issues(&*strategy, selection, &options.url, &permits)
            .await?;
        info!("Loading {} issue(s) from {}", issues.len(), strategy.site());

        let custom_name = options.custom_name();
        stream::iter(issues)
            .map(|url| self.load_issue(&*strategy, url, custom_name, &permits, concurrency))
            .buffered(concurrency)
            .try_collect()
            .await
    }

    async fn resolve_issues(
        &self,
        strategy: &dyn Strategy,
        selection: Selection,
        url: &str,
        permits: &Semaphore,
    ) -> Result<Vec<String>, DownloadError> {
        if !selection.expands_series() {
            return Ok(vec![url.to_string()]);
        }

        let series_url = strategy.series_url(url)?;
        let body = self.fetch(&series_url, permits).await?;
        let listing = strategy.list_issues(&series_url, &body)?;
        debug!("Series {} lists {} issue(s)", series_url, listing.len());

        let issues = resolve_candidates(selection, url, listing, |candidate| {
            strategy.issue_number(candidate).ok()
        });
        if issues.is_empty() {
            return Err(DownloadError::NoIssuesFound(series_url));
        }

        Ok(issues)
    }

    async fn load_issue(
        &self,
        strategy: &dyn Strategy,
        url: String,
        custom_name: Option<&str>,
        permits: &Semaphore,
        concurrency: usize,
    ) -> Result<Comic, DownloadError> {
        let reader_url = strategy.reader_url(&url)?;
        let body = self.fetch(&reader_url, permits).await?;
        let extracted = strategy.extract(&url, &body)?;

        if extracted.name.trim().is_empty() {
            return Err(strategy.fail(&url, "no series name"));
        }

        let links = match extracted.pages {
            Pages::Images(links) => links,
            Pages::Paginated(pages) => {
                self.load_pages(strategy, &reader_url, &body, pages, permits, concurrency)
                    .await?
            }
        };
        debug!("{} {}: {} image(s)", extracted.name, extracted.issue_number, links.len());

        Ok(Comic {
            source: strategy.site().host().to_string(),
            url_source: url,
            name: custom_name.map(str::to_string).unwrap_or(extracted.name),
            issue_number: extracted.issue_number,
            links,
        })
    }

    async fn load_pages(
        &self,
        strategy: &dyn Strategy,
        issue_url: &str,
        issue_body: &str,
        pages: Vec<String>,
        permits: &Semaphore,
        concurrency: usize,
    ) -> Result<Vec<String>, DownloadError> {
        stream::iter(pages)
            .map(|page| async move {
                // The issue page is usually the first reader page as well
                if page == issue_url {
                    return strategy.image_on_page(&page, issue_body);
                }
                let body = self.fetch(&page, permits).await?;
                strategy.image_on_page(&page, &body)
            })
            .buffered(concurrency)
            .try_collect()
            .await
    }

    async fn fetch(&self, url: &str, permits: &Semaphore) -> Result<String, DownloadError> {
        // Never closed, so a failed acquire only means running unbounded
        let _permit = permits.acquire().await.ok();
        debug!("Fetching {}", url);
        self.fetcher.fetch(url).await
    }
}

/// Loads comics with the built-in sites over HTTP.
pub async fn load_comic_from_source(options: &Options) -> Result<Vec<Comic>, DownloadError> {
    // Unknown sources fail before any client is built
    let registry = Registry::builtin();
    registry.resolve(&options.source)?;
    let loader = Loader::new(registry, Arc::new(HttpFetcher::new()?));
    loader.load_comic_from_source(options).await
}
