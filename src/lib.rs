pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod models;
pub mod normalize;
pub mod page;
pub mod pipeline;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use error::{Result, ScrapeError};
pub use extract::{extract_record, extract_specs};
pub use fetch::{latest_device_urls, resolve_device_url, PageFetcher};
pub use models::{FormattedRecord, RawRecord, SpecSheet};
pub use normalize::{normalize, SCHEMA};
pub use page::{DevicePage, HtmlPage, SpecField, SpecRow, SpecTable};
pub use pipeline::{BatchFailure, BatchReport, DeviceScraper, FetchPage};
