use std::sync::LazyLock;

use reqwest::blocking::Client;
use reqwest::Url;
use scraper::{Html, Selector};
use tracing::debug;

use crate::config::Config;
use crate::error::{Result, ScrapeError};

static LATEST_DEVICE_LINKS: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse("div[style*='overflow-y:auto'] a.module-phones-link").expect("valid selector")
});

/// Blocking HTTP fetcher for GSMArena pages.
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.timeout)
            .build()?;
        Ok(Self { client })
    }

    /// GET a page and return its body. Non-2xx responses are errors.
    pub fn fetch(&self, url: &str) -> Result<String> {
        debug!(url, "fetching page");
        let response = self.client.get(url).send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(ScrapeError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        Ok(response.text()?)
    }
}

/// Device links from the home page's "latest devices" module, resolved
/// against `base_url`.
pub fn latest_device_urls(base_url: &str, html: &str) -> Result<Vec<String>> {
    let base = parse_base(base_url)?;
    let document = Html::parse_document(html);

    let urls = document
        .select(&LATEST_DEVICE_LINKS)
        .filter_map(|link| link.value().attr("href"))
        .filter_map(|href| base.join(href.trim()).ok())
        .map(String::from)
        .collect();

    Ok(urls)
}

/// Turn user input into an absolute device URL. Accepts a full URL, a
/// relative page like `apple_iphone_15-12559.php`, or a bare phone id like
/// `apple_iphone_15-12559`.
pub fn resolve_device_url(base_url: &str, input: &str) -> Result<String> {
    let input = input.trim();
    if input.is_empty() {
        return Err(ScrapeError::InvalidUrl {
            input: input.to_string(),
            reason: "empty input".to_string(),
        });
    }

    if input.starts_with("http://") || input.starts_with("https://") {
        return Url::parse(input)
            .map(String::from)
            .map_err(|e| ScrapeError::InvalidUrl {
                input: input.to_string(),
                reason: e.to_string(),
            });
    }

    let page = if input.ends_with(".php") {
        input.to_string()
    } else {
        format!("{}.php", input)
    };

    parse_base(base_url)?
        .join(&page)
        .map(String::from)
        .map_err(|e| ScrapeError::InvalidUrl {
            input: input.to_string(),
            reason: e.to_string(),
        })
}

fn parse_base(base_url: &str) -> Result<Url> {
    Url::parse(base_url).map_err(|e| ScrapeError::InvalidUrl {
        input: base_url.to_string(),
        reason: e.to_string(),
    })
}
