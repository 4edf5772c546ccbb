use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://www.gsmarena.com/";
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0 Safari/537.36";

/// Runtime settings, read from the environment (and `.env`) by the binaries.
#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    /// Pause between two device pages in batch mode.
    pub request_delay: Duration,
    pub raw_dir: PathBuf,
    pub formatted_dir: PathBuf,
    pub batch_output: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout: Duration::from_secs(60),
            request_delay: Duration::from_millis(300),
            raw_dir: PathBuf::from("raw_data"),
            formatted_dir: PathBuf::from("formatted_data"),
            batch_output: PathBuf::from("gsmarena_devices.json"),
        }
    }
}

impl Config {
    /// Build a config from environment variables, falling back to defaults
    /// for anything unset or unparseable. Call `dotenv::dotenv()` first if a
    /// `.env` file should be honoured.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let number = |key: &str| lookup(key).and_then(|s| s.trim().parse::<u64>().ok());

        Self {
            base_url: lookup("GSMARENA_BASE_URL").unwrap_or(defaults.base_url),
            user_agent: lookup("SCRAPER_USER_AGENT").unwrap_or(defaults.user_agent),
            timeout: number("FETCH_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            request_delay: number("REQUEST_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.request_delay),
            raw_dir: lookup("RAW_DATA_DIR").map(PathBuf::from).unwrap_or(defaults.raw_dir),
            formatted_dir: lookup("FORMATTED_DATA_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.formatted_dir),
            batch_output: lookup("BATCH_OUTPUT_FILE")
                .map(PathBuf::from)
                .unwrap_or(defaults.batch_output),
        }
    }
}
