use std::thread;

use tracing::{info, warn};

use crate::config::Config;
use crate::error::{Result, ScrapeError};
use crate::extract::extract_record;
use crate::fetch::{latest_device_urls, PageFetcher};
use crate::models::RawRecord;
use crate::page::HtmlPage;

/// Anything that can turn a URL into an HTML body.
pub trait FetchPage {
    fn fetch_page(&self, url: &str) -> Result<String>;
}

impl FetchPage for PageFetcher {
    fn fetch_page(&self, url: &str) -> Result<String> {
        self.fetch(url)
    }
}

#[derive(Debug)]
pub struct BatchFailure {
    pub url: String,
    pub error: ScrapeError,
}

/// Outcome of a batch run: every device that scraped, and every one that did not.
#[derive(Debug, Default)]
pub struct BatchReport {
    pub records: Vec<RawRecord>,
    pub failures: Vec<BatchFailure>,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.records.len()
    }

    pub fn failed(&self) -> usize {
        self.failures.len()
    }
}

/// Scrapes device pages one at a time.
pub struct DeviceScraper<F = PageFetcher> {
    fetcher: F,
    config: Config,
}

impl DeviceScraper<PageFetcher> {
    /// Scraper backed by a real HTTP client built from `config`.
    pub fn from_config(config: Config) -> Result<Self> {
        let fetcher = PageFetcher::new(&config)?;
        Ok(Self { fetcher, config })
    }
}

impl<F: FetchPage> DeviceScraper<F> {
    pub fn new(fetcher: F, config: Config) -> Self {
        Self { fetcher, config }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Fetch and extract one device page. Transport and structural errors
    /// are returned to the caller.
    pub fn scrape_device(&self, url: &str) -> Result<RawRecord> {
        let body = self.fetcher.fetch_page(url)?;
        let page = HtmlPage::parse(&body);
        let record = extract_record(Some(url), &page)?;
        info!(
            name = %record.name,
            categories = record.specs.len(),
            fields = record.field_count(),
            "scraped device"
        );
        Ok(record)
    }

    /// Scrape each URL in order. A failing device is logged and skipped;
    /// the rest still run.
    pub fn scrape_many(&self, urls: &[String]) -> BatchReport {
        let mut report = BatchReport::default();
        let total = urls.len();

        for (index, url) in urls.iter().enumerate() {
            info!("[{}/{}] {}", index + 1, total, url);

            match self.scrape_device(url) {
                Ok(record) => report.records.push(record),
                Err(error) => {
                    warn!(%url, %error, "skipping device");
                    report.failures.push(BatchFailure {
                        url: url.clone(),
                        error,
                    });
                }
            }

            if index + 1 < total && !self.config.request_delay.is_zero() {
                thread::sleep(self.config.request_delay);
            }
        }

        report
    }

    /// Device URLs listed in the home page's latest devices module.
    pub fn discover_latest(&self) -> Result<Vec<String>> {
        let body = self.fetcher.fetch_page(&self.config.base_url)?;
        let urls = latest_device_urls(&self.config.base_url, &body)?;
        info!(count = urls.len(), "found latest devices");
        Ok(urls)
    }

    /// Discover the latest devices and scrape all of them. Only a failure
    /// to load the listing itself is returned as an error.
    pub fn scrape_latest(&self) -> Result<BatchReport> {
        let urls = self.discover_latest()?;
        Ok(self.scrape_many(&urls))
    }
}
