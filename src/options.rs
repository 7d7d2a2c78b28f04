use serde::{Deserialize, Serialize};

use crate::error::DownloadError;
use crate::range::parse_issues_range;

pub const DEFAULT_CONCURRENCY: usize = 5;

/// Request parameters for a load.
///
/// `format`, `images_format`, `output_folder` and `images_only` are carried for
/// the download pipeline and never read while resolving issues.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
    /// Site host, e.g. `www.comicextra.com`
    pub source: String,
    /// Issue URL the request starts from
    pub url: String,
    pub all: bool,
    pub last: bool,
    /// Inclusive `start-end` filter, e.g. `5-7`
    pub issues_range: String,
    pub custom_comic_name: String,
    pub format: String,
    pub images_format: String,
    pub output_folder: String,
    pub images_only: bool,
    /// Maximum number of issues (and reader pages) fetched at once
    pub concurrency: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            source: String::new(),
            url: String::new(),
            all: false,
            last: false,
            issues_range: String::new(),
            custom_comic_name: String::new(),
            format: String::from("pdf"),
            images_format: String::from("jpg"),
            output_folder: String::new(),
            images_only: false,
            concurrency: DEFAULT_CONCURRENCY,
        }
    }
}

/// Which issues of a series a request targets.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Selection {
    Single,
    All,
    Last,
    Range { start: f64, end: f64 },
}

impl Selection {
    /// Whether the series index has to be fetched to resolve this selection.
    pub fn expands_series(&self) -> bool {
        !matches!(self, Selection::Single)
    }
}

impl Options {
    pub fn new(source: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            url: url.into(),
            ..Self::default()
        }
    }

    /// A range wins over `all`, which wins over `last`.
    pub fn selection(&self) -> Result<Selection, DownloadError> {
        if !self.issues_range.trim().is_empty() {
            let (start, end) = parse_issues_range(&self.issues_range)?;
            return Ok(Selection::Range { start, end });
        }
        if self.all {
            return Ok(Selection::All);
        }
        if self.last {
            return Ok(Selection::Last);
        }
        Ok(Selection::Single)
    }

    pub fn custom_name(&self) -> Option<&str> {
        let name = self.custom_comic_name.trim();
        if name.is_empty() { None } else { Some(name) }
    }
}
