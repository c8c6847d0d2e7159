use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

use crate::browser_client::BrowserConfig;
use crate::http_client::{HttpClient, HttpClientConfig};
use crate::models::CatalogEntry;
use crate::pagination::PaginationSettings;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Directory CSV files are written into. The default keeps output next
    /// to the project rather than inside the working directory.
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// When true, an entry that fails is logged and the run moves on to the
    /// next entry instead of halting.
    #[serde(default)]
    pub continue_on_error: bool,

    /// Pages to scrape. Empty means the built-in demo-site catalog.
    #[serde(default)]
    pub catalog: Vec<CatalogEntry>,

    #[serde(default)]
    pub fetch: FetchConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FetchConfig {
    /// Timeout for HTTP requests in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum number of retry attempts for failed requests
    #[serde(default = "default_max_retries")]
    pub max_retries: usize,

    /// Initial retry delay in milliseconds
    #[serde(default = "default_initial_retry_delay")]
    pub initial_retry_delay_ms: u64,

    /// Maximum retry delay in milliseconds
    #[serde(default = "default_max_retry_delay")]
    pub max_retry_delay_ms: u64,

    /// Enable cookie support
    #[serde(default = "default_true")]
    pub enable_cookies: bool,

    /// Enable gzip/brotli compression
    #[serde(default = "default_true")]
    pub enable_compression: bool,

    /// Browser headless mode
    #[serde(default = "default_true")]
    pub browser_headless: bool,

    /// Browser navigation timeout in seconds
    #[serde(default = "default_browser_timeout")]
    pub browser_timeout_secs: u64,

    /// Disable images in browser (faster loading)
    #[serde(default = "default_true")]
    pub browser_disable_images: bool,

    /// How long to wait for the "load more" control before concluding the
    /// page has no more content, in seconds
    #[serde(default = "default_more_button_timeout")]
    pub more_button_timeout_secs: u64,

    /// Pause after clicking "load more" so the next batch can render,
    /// in milliseconds
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    /// Rate limiting delay between catalog entries in milliseconds
    #[serde(default = "default_rate_limit")]
    pub rate_limit_delay_ms: u64,
}

fn default_output_dir() -> String {
    "..".to_string()
}
fn default_true() -> bool {
    true
}
fn default_max_retries() -> usize {
    3
}
fn default_initial_retry_delay() -> u64 {
    500
}
fn default_max_retry_delay() -> u64 {
    8000
}
fn default_timeout() -> u64 {
    30
}
fn default_browser_timeout() -> u64 {
    30
}
fn default_more_button_timeout() -> u64 {
    5
}
fn default_settle_delay() -> u64 {
    500
}
fn default_rate_limit() -> u64 {
    300
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 30,
            max_retries: 3,
            initial_retry_delay_ms: 500,
            max_retry_delay_ms: 8000,
            enable_cookies: true,
            enable_compression: true,
            browser_headless: true,
            browser_timeout_secs: 30,
            browser_disable_images: true,
            more_button_timeout_secs: 5,
            settle_delay_ms: 500,
            rate_limit_delay_ms: 300,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            continue_on_error: false,
            catalog: Vec::new(),
            fetch: FetchConfig::default(),
        }
    }
}

impl Config {
    /// Load `config.toml` from the working directory, falling back to
    /// defaults when the file is absent or malformed.
    pub fn load() -> Self {
        let path = Path::new("config.toml");
        if path.exists() {
            if let Ok(content) = fs::read_to_string(path) {
                match toml::from_str::<Config>(&content) {
                    Ok(cfg) => return cfg,
                    Err(e) => log::warn!("Ignoring invalid config.toml: {}", e),
                }
            }
        }
        Self::default()
    }
}

impl FetchConfig {
    /// Create an HTTP client from this configuration
    pub fn create_http_client(&self) -> Result<HttpClient, reqwest::Error> {
        let config = HttpClientConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            initial_retry_delay_ms: self.initial_retry_delay_ms,
            max_retry_delay_ms: self.max_retry_delay_ms,
            enable_cookies: self.enable_cookies,
            enable_compression: self.enable_compression,
        };

        HttpClient::with_config(config)
    }

    /// Browser launch options for interactive fetches
    pub fn browser_config(&self) -> BrowserConfig {
        BrowserConfig {
            headless: self.browser_headless,
            window_width: 1920,
            window_height: 1080,
            timeout: Duration::from_secs(self.browser_timeout_secs),
            disable_images: self.browser_disable_images,
            user_agent: Some(
                "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36"
                    .to_string(),
            ),
        }
    }

    /// Timing knobs for the pagination driver
    pub fn pagination_settings(&self) -> PaginationSettings {
        PaginationSettings {
            wait_timeout: Duration::from_secs(self.more_button_timeout_secs),
            settle_delay: Duration::from_millis(self.settle_delay_ms),
            ..PaginationSettings::default()
        }
    }
}
