//! Normalize an already scraped raw JSON file without touching the network.
//!
//! Usage: format_raw <raw.json> [formatted.json]

use anyhow::{bail, Context};
use gsmarena_specs::normalize;
use gsmarena_specs::utils::{load_raw_document, save_json, RawDocument};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_OUTPUT: &str = "formatted_device.json";

fn usage(args: &[String]) -> String {
    let program = args.first().map(String::as_str).unwrap_or("format_raw");
    format!("usage: {} <raw.json> [formatted.json]", program)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let args: Vec<String> = std::env::args().collect();
    if args.len() < 2 {
        bail!(usage(&args));
    }
    let input = &args[1];
    let output = args.get(2).map(String::as_str).unwrap_or(DEFAULT_OUTPUT);

    let document =
        load_raw_document(input).with_context(|| format!("failed to read {}", input))?;

    match document {
        RawDocument::One(record) => {
            info!(name = %record.name, "normalizing device");
            save_json(&normalize(&record), output)?;
        }
        RawDocument::Many(records) => {
            info!(count = records.len(), "normalizing batch");
            let formatted: Vec<_> = records.iter().map(normalize).collect();
            save_json(&formatted, output)?;
        }
    }

    println!("✅ Transformed JSON saved as {}", output);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usage_without_program_name() {
        assert_eq!(usage(&[]), "usage: format_raw <raw.json> [formatted.json]");
        assert_eq!(
            usage(&["./format_raw".to_string()]),
            "usage: ./format_raw <raw.json> [formatted.json]"
        );
    }
}
