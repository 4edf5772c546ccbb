use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use chrono::{DateTime, Local};
use regex::Regex;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::config::Config;
use crate::error::Result;
use crate::models::{FormattedRecord, RawRecord};
use crate::normalize::normalize;

static UNSAFE_FILENAME_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\s/\\]").expect("valid regex"));

pub const TIMESTAMP_FORMAT: &str = "%Y%m%d-%H%M%S";

/// Paths written for one device (or one batch).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SavedPaths {
    pub raw: PathBuf,
    pub formatted: PathBuf,
}

/// A raw JSON file holds either one device or a batch of them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawDocument {
    One(RawRecord),
    Many(Vec<RawRecord>),
}

/// Device name with whitespace and path separators replaced by `_`.
pub fn sanitize_name(name: &str) -> String {
    UNSAFE_FILENAME_CHARS.replace_all(name, "_").into_owned()
}

/// `<sanitized name>_<YYYYmmdd-HHMMSS>`, so re-scraping a device never
/// overwrites an earlier capture.
pub fn file_stem(name: &str, timestamp: &DateTime<Local>) -> String {
    format!("{}_{}", sanitize_name(name), timestamp.format(TIMESTAMP_FORMAT))
}

/// Write `value` as pretty UTF-8 JSON, creating parent directories.
pub fn save_json<T, P>(value: &T, path: P) -> Result<()>
where
    T: Serialize + ?Sized,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');

    let mut file = File::create(path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

pub fn load_json<T, P>(path: P) -> Result<T>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let content = fs::read_to_string(path)?;
    Ok(serde_json::from_str(&content)?)
}

/// Save the raw record and its normalized form side by side:
/// `<raw_dir>/<stem>.json` and `<formatted_dir>/<stem>.json`.
pub fn save_device(
    raw: &RawRecord,
    config: &Config,
    timestamp: &DateTime<Local>,
) -> Result<SavedPaths> {
    let filename = format!("{}.json", file_stem(&raw.name, timestamp));
    let paths = SavedPaths {
        raw: config.raw_dir.join(&filename),
        formatted: config.formatted_dir.join(&filename),
    };

    save_json(raw, &paths.raw)?;
    save_json(&normalize(raw), &paths.formatted)?;
    Ok(paths)
}

/// Save a batch to `path` and its normalized form to `<stem>_formatted.json`
/// next to it.
pub fn save_batch<P: AsRef<Path>>(records: &[RawRecord], path: P) -> Result<SavedPaths> {
    let raw = path.as_ref().to_path_buf();
    let formatted = formatted_sibling(&raw);

    let normalized: Vec<FormattedRecord> = records.iter().map(normalize).collect();
    save_json(records, &raw)?;
    save_json(&normalized, &formatted)?;

    Ok(SavedPaths { raw, formatted })
}

fn formatted_sibling(path: &Path) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "devices".to_string());
    path.with_file_name(format!("{}_formatted.json", stem))
}

pub fn load_raw<P: AsRef<Path>>(path: P) -> Result<RawRecord> {
    load_json(path)
}

pub fn load_raw_document<P: AsRef<Path>>(path: P) -> Result<RawDocument> {
    load_json(path)
}

pub fn load_formatted<P: AsRef<Path>>(path: P) -> Result<FormattedRecord> {
    load_json(path)
}

/// Readable dump of a raw record, one `[CATEGORY]` block per category.
pub fn format_record_info(record: &RawRecord) -> String {
    let mut output = format!("Name: {}\n", record.name);

    for (category, fields) in &record.specs {
        output.push_str(&format!("\n[{}]\n", category));
        for (label, value) in fields {
            output.push_str(&format!("  {}: {}\n", label, value));
        }
    }

    output
}
