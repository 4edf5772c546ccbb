use std::io::{self, Write};

use anyhow::Context;
use chrono::Local;
use gsmarena_specs::utils::{format_record_info, save_device};
use gsmarena_specs::{resolve_device_url, Config, DeviceScraper};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Config::from_env();

    print!("Please input the device link: ");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;

    let url = resolve_device_url(&config.base_url, &input)?;
    let scraper = DeviceScraper::from_config(config)?;

    let record = scraper
        .scrape_device(&url)
        .with_context(|| format!("failed to scrape {}", url))?;
    println!("📱 Scraped: {}", record.name);
    println!("{}", format_record_info(&record));

    let paths = save_device(&record, scraper.config(), &Local::now())
        .context("failed to save device data")?;
    println!("✅ Raw data saved: {}", paths.raw.display());
    println!("✅ Formatted data saved: {}", paths.formatted.display());

    Ok(())
}
