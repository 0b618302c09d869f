// Re-export modules
pub mod aggregate;
pub mod chunker;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetchers;
pub mod parsers;
pub mod results;


// Re-export commonly used types for convenience
pub use config::{FetcherKind, ScraperConfig};
pub use error::ScrapeError;
pub use results::ArticleRecord;

use aggregate::Aggregator;
use chunker::WordChunker;
use extract::{ExtractionClient, OpenAiClient};
use fetchers::webdriver::DEFAULT_WEBDRIVER_URL;
use fetchers::{Fetcher, HttpFetcher, WebDriverFetcher};
use parsers::{ReducedPage, Reducer};
use std::path::{Path, PathBuf};
use url::Url;

/// Environment variable holding the model API key
pub const API_KEY_ENV: &str = "OPENAI_API_KEY";

/// Environment variable overriding the WebDriver URL
pub const WEBDRIVER_URL_ENV: &str = "WEBDRIVER_URL";

/// Load variables from a `.env` file in the current directory or its parents
///
/// Variables already set in the process environment are left alone. Returns
/// the path of the file that was loaded.
pub fn load_env_file() -> Option<PathBuf> {
    report_env_file(dotenvy::dotenv())
}

/// Load variables from a specific `.env` file
pub fn load_env_file_from(path: impl AsRef<Path>) -> Option<PathBuf> {
    let path = path.as_ref();
    report_env_file(dotenvy::from_path(path).map(|()| path.to_path_buf()))
}

fn report_env_file(loaded: dotenvy::Result<PathBuf>) -> Option<PathBuf> {
    match loaded {
        Ok(path) => {
            ::log::debug!("Loaded environment from {}", path.display());
            Some(path)
        }
        Err(e) if e.not_found() => None,
        Err(e) => {
            ::log::warn!("Ignoring unreadable .env file: {}", e);
            None
        }
    }
}

/// WebDriver URL to connect to
///
/// `env_url` only replaces the configured URL while that is still the default,
/// so an explicit setting always wins.
pub fn resolve_webdriver_url(configured: &str, env_url: Option<String>) -> String {
    match env_url {
        Some(env_url) if !env_url.is_empty() && configured == DEFAULT_WEBDRIVER_URL => env_url,
        _ => configured.to_string(),
    }
}

/// Chunks of a reduced page together with the links it kept
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedChunks {
    /// Chunks in document order
    pub chunks: Vec<String>,
    /// `href` of every anchor left in the reduced markup
    pub links: Vec<String>,
}

/// Run the whole pipeline for one URL
///
/// Fetches the page, reduces it, splits it into chunks of at most
/// `max_chunk_size` estimated word units and sends the chunks to `client` one
/// after another. Records come back in chunk order. The first failure at any
/// stage aborts the run.
pub async fn process_url(
    url: &str,
    fetcher: &dyn Fetcher,
    client: &dyn ExtractionClient,
    max_chunk_size: usize,
) -> error::Result<Vec<ArticleRecord>> {
    let page = fetch_and_reduce(url, fetcher).await?;
    let chunker = WordChunker::new(&page.markup, max_chunk_size);

    let mut aggregator = Aggregator::new();
    for (index, chunk) in chunker.chunks().enumerate() {
        ::log::debug!(
            "Extracting chunk {} ({} word units) with {}",
            index,
            chunker::estimate_word_units(&chunk),
            client.model()
        );
        let response = client.extract(&chunk).await?;
        aggregator.push(&response)?;
    }

    ::log::info!(
        "Extracted {} records from {} chunks of {}",
        aggregator.records().len(),
        aggregator.chunks_seen(),
        url
    );
    Ok(aggregator.finish())
}

/// Fetch a page and reduce it to markup
pub async fn fetch_and_reduce(url: &str, fetcher: &dyn Fetcher) -> error::Result<ReducedPage> {
    let parsed = Url::parse(url).map_err(|e| ScrapeError::fetch(url, e))?;
    let html = fetcher.fetch(parsed.as_str()).await?;
    Reducer::default().reduce(&html)
}

/// Builder for scraping the articles listed on one page
pub struct Scraper {
    url: String,
    config: ScraperConfig,
    api_key: Option<String>,
}

impl Scraper {
    /// Create a new scraper for the given URL with default configuration
    pub fn new(url: &str) -> Self {
        Self {
            url: url.to_string(),
            config: ScraperConfig::default(),
            api_key: None,
        }
    }

    /// Replace the whole configuration
    pub fn with_config(mut self, config: ScraperConfig) -> Self {
        self.config = config;
        self
    }

    /// Load configuration from a JSON file
    pub fn with_config_file(self, path: impl AsRef<std::path::Path>) -> error::Result<Self> {
        let config = ScraperConfig::from_file(path)?;
        Ok(self.with_config(config))
    }

    /// Load configuration from a JSON string
    pub fn with_config_str(self, json: &str) -> error::Result<Self> {
        let config = ScraperConfig::from_json(json)?;
        Ok(self.with_config(config))
    }

    /// Set the maximum chunk size in estimated word units
    pub fn with_max_chunk_size(mut self, max_chunk_size: usize) -> Self {
        self.config.max_chunk_size = max_chunk_size;
        self
    }

    /// Set the model identifier
    pub fn with_model(mut self, model: &str) -> Self {
        self.config.model = model.to_string();
        self
    }

    /// Set the chat completions API base
    pub fn with_api_base(mut self, api_base: &str) -> Self {
        self.config.api_base = api_base.to_string();
        self
    }

    /// Set the API key instead of reading it from the environment
    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    /// Choose how the page is fetched
    pub fn with_fetcher_kind(mut self, fetcher: FetcherKind) -> Self {
        self.config.fetcher = fetcher;
        self
    }

    /// Set the WebDriver server used by [`FetcherKind::WebDriver`]
    pub fn with_webdriver_url(mut self, webdriver_url: &str) -> Self {
        self.config.webdriver_url = webdriver_url.to_string();
        self
    }

    /// Current configuration
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    fn build_fetcher(&self) -> error::Result<Box<dyn Fetcher>> {
        match self.config.fetcher {
            FetcherKind::Http => Ok(Box::new(HttpFetcher::new()?)),
            FetcherKind::WebDriver => {
                let webdriver_url = resolve_webdriver_url(
                    &self.config.webdriver_url,
                    std::env::var(WEBDRIVER_URL_ENV).ok(),
                );

                Ok(Box::new(
                    WebDriverFetcher::new(&webdriver_url)
                        .with_fallbacks(self.config.webdriver_fallbacks),
                ))
            }
        }
    }

    fn build_client(&self) -> error::Result<OpenAiClient> {
        let api_key = match &self.api_key {
            Some(key) => key.clone(),
            None => std::env::var(API_KEY_ENV)
                .ok()
                .filter(|key| !key.is_empty())
                .ok_or_else(|| ScrapeError::Config(format!("{API_KEY_ENV} is not set")))?,
        };

        Ok(OpenAiClient::with_api_base(
            api_key,
            self.config.model.clone(),
            self.config.api_base.clone(),
        ))
    }

    /// Fetch and reduce the page and return its chunks without calling the model
    pub async fn reduce(&self) -> error::Result<ReducedChunks> {
        self.config.validate()?;
        let fetcher = self.build_fetcher()?;
        let page = fetch_and_reduce(&self.url, fetcher.as_ref()).await?;

        let chunks: Vec<String> = WordChunker::new(&page.markup, self.config.max_chunk_size)
            .chunks()
            .collect();
        ::log::info!(
            "Reduced {} into {} chunks with {} links",
            self.url,
            chunks.len(),
            page.links.len()
        );
        Ok(ReducedChunks {
            chunks,
            links: page.links,
        })
    }

    /// Run the full pipeline
    pub async fn run(&self) -> error::Result<Vec<ArticleRecord>> {
        self.config.validate()?;
        let client = self.build_client()?;
        let fetcher = self.build_fetcher()?;

        ::log::info!(
            "Scraping {} with {} (chunks of {} word units)",
            self.url,
            self.config.model,
            self.config.max_chunk_size
        );
        process_url(
            &self.url,
            fetcher.as_ref(),
            &client,
            self.config.max_chunk_size,
        )
        .await
    }
}
