use std::error::Error;
use std::fmt;

#[derive(Debug)]
pub enum DownloadError {
    UnknownSource(String),
    RequestFailed(reqwest::Error),
    HttpStatus { url: String, status: u16 },
    ExtractionFailed { site: String, url: String, reason: String },
    SelectorError(String),
    InvalidRange(String),
    InvalidUrl(String),
    NoIssuesFound(String),
    IoError(std::io::Error),
    SerializationError(serde_json::Error),
}

impl DownloadError {
    pub fn extraction(site: impl Into<String>, url: impl Into<String>, reason: impl Into<String>) -> Self {
        DownloadError::ExtractionFailed {
            site: site.into(),
            url: url.into(),
            reason: reason.into(),
        }
    }
}

impl fmt::Display for DownloadError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            // Callers match on this exact message.
            DownloadError::UnknownSource(_) => write!(f, "source unknown"),
            DownloadError::RequestFailed(e) => write!(f, "Failed to make HTTP request: {}", e),
            DownloadError::HttpStatus { url, status } => write!(f, "HTTP error: {} for URL {}", status, url),
            DownloadError::ExtractionFailed { site, url, reason } => {
                write!(f, "Failed to extract {} from {}: {}", site, url, reason)
            }
            DownloadError::SelectorError(msg) => write!(f, "Invalid CSS selector: {}", msg),
            DownloadError::InvalidRange(msg) => write!(f, "Invalid issues range: {}", msg),
            DownloadError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            DownloadError::NoIssuesFound(url) => write!(f, "No issues found for {}", url),
            DownloadError::IoError(e) => write!(f, "IO operation failed: {}", e),
            DownloadError::SerializationError(e) => write!(f, "Serialization failed: {}", e),
        }
    }
}

impl Error for DownloadError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            DownloadError::RequestFailed(e) => Some(e),
            DownloadError::IoError(e) => Some(e),
            DownloadError::SerializationError(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for DownloadError {
    fn from(err: reqwest::Error) -> Self {
        DownloadError::RequestFailed(err)
    }
}

impl From<std::io::Error> for DownloadError {
    fn from(err: std::io::Error) -> Self {
        DownloadError::IoError(err)
    }
}

impl From<serde_json::Error> for DownloadError {
    fn from(err: serde_json::Error) -> Self {
        DownloadError::SerializationError(err)
    }
}

impl From<url::ParseError> for DownloadError {
    fn from(err: url::ParseError) -> Self {
        DownloadError::InvalidUrl(err.to_string())
    }
}
