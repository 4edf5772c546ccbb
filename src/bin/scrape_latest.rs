use anyhow::Context;
use gsmarena_specs::utils::save_batch;
use gsmarena_specs::{Config, DeviceScraper};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    println!("GSMArena - Latest Devices");
    println!("=========================\n");

    let config = Config::from_env();
    let output = config.batch_output.clone();
    let scraper = DeviceScraper::from_config(config)?;

    let report = scraper
        .scrape_latest()
        .context("failed to load the latest devices listing")?;

    let paths = save_batch(&report.records, &output)
        .with_context(|| format!("failed to write {}", output.display()))?;

    println!("{}", "=".repeat(70));
    println!("Statistics:");
    println!("  Devices scraped: {}", report.succeeded());
    println!("  Devices failed: {}", report.failed());
    for failure in &report.failures {
        println!("    ✗ {}: {}", failure.url, failure.error);
    }
    println!("\n✅ Raw data saved to {}", paths.raw.display());
    println!("✅ Formatted data saved to {}", paths.formatted.display());

    Ok(())
}
