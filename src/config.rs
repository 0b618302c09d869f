use crate::error::{Result, ScrapeError};
use crate::extract::openai::{DEFAULT_MODEL, OPENAI_API_BASE};
use crate::fetchers::webdriver::DEFAULT_WEBDRIVER_URL;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How pages are retrieved
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FetcherKind {
    /// Plain HTTP GET
    #[default]
    Http,
    /// Rendered source through a WebDriver session
    WebDriver,
}

/// Configuration for a scrape
///
/// The API key is not part of it; it comes from the environment or the
/// command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Maximum chunk size in estimated word units
    #[serde(default = "default_max_chunk_size")]
    pub max_chunk_size: usize,

    /// Model identifier sent with every extraction request
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the chat completions API
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Fetcher used to retrieve the page
    #[serde(default)]
    pub fetcher: FetcherKind,

    /// URL for the WebDriver instance
    #[serde(default = "default_webdriver_url")]
    pub webdriver_url: String,

    /// Whether to try well-known local WebDriver ports when the configured one is down
    #[serde(default = "default_webdriver_fallbacks")]
    pub webdriver_fallbacks: bool,
}

/// Default value for max_chunk_size
fn default_max_chunk_size() -> usize {
    500
}

/// Default value for model
fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

/// Default value for api_base
fn default_api_base() -> String {
    OPENAI_API_BASE.to_string()
}

/// Default value for webdriver_url
fn default_webdriver_url() -> String {
    DEFAULT_WEBDRIVER_URL.to_string()
}

fn default_webdriver_fallbacks() -> bool {
    true
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            max_chunk_size: default_max_chunk_size(),
            model: default_model(),
            api_base: default_api_base(),
            fetcher: FetcherKind::default(),
            webdriver_url: default_webdriver_url(),
            webdriver_fallbacks: default_webdriver_fallbacks(),
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Load configuration from a JSON string
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| ScrapeError::Config(format!("invalid configuration: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Check that the values can drive a scrape
    pub fn validate(&self) -> Result<()> {
        if self.max_chunk_size == 0 {
            return Err(ScrapeError::Config(
                "max_chunk_size must be greater than 0".to_string(),
            ));
        }
        if self.model.trim().is_empty() {
            return Err(ScrapeError::Config("model must not be empty".to_string()));
        }
        if self.api_base.trim().is_empty() {
            return Err(ScrapeError::Config("api_base must not be empty".to_string()));
        }
        Ok(())
    }
}
