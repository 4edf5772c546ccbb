//! Error type shared by the extractor, fetcher and persistence helpers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The page has no device heading, or the heading is blank.
    #[error("device heading (h1.specs-phone-name-title) not found")]
    MissingHeading,

    /// The page has no `#specs-list` container.
    #[error("specs list (#specs-list) not found")]
    MissingSpecsList,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{url} returned status {status}")]
    Status { url: String, status: u16 },

    #[error("invalid device URL '{input}': {reason}")]
    InvalidUrl { input: String, reason: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ScrapeError {
    /// True for errors that mean the page itself is not a device page.
    pub fn is_structural(&self) -> bool {
        matches!(self, Self::MissingHeading | Self::MissingSpecsList)
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
