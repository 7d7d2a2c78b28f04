pub mod comic;
pub mod error;
pub mod fetcher;
pub mod loader;
pub mod options;
pub mod range;
pub mod sites;

pub use comic::{Comic, IssueId};
pub use error::DownloadError;
pub use fetcher::{HttpFetcher, PageFetcher};
pub use loader::{load_comic_from_source, Loader};
pub use options::{Options, Selection};
pub use range::{not_in_issues_range, parse_issues_range};
pub use sites::{Registry, Site, Strategy};
