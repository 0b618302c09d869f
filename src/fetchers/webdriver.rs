use crate::error::{Result, ScrapeError};
use crate::fetchers::Fetcher;
use async_trait::async_trait;
use fantoccini::{Client, ClientBuilder};

/// Default WebDriver endpoint
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:4444";

/// Other places a local WebDriver commonly listens on
const FALLBACK_WEBDRIVER_URLS: [&str; 4] = [
    "http://localhost:9515", // ChromeDriver default
    "http://localhost:4723", // Appium default
    "http://localhost:9222", // Chrome debug port default
    "http://127.0.0.1:4444", // Try with IP instead of localhost
];

/// Fetches the rendered page source through a WebDriver session
///
/// Useful for pages that build their article lists with JavaScript. A new
/// session is opened for every fetch and closed afterwards.
#[derive(Debug, Clone)]
pub struct WebDriverFetcher {
    webdriver_url: String,
    try_fallbacks: bool,
}

impl Default for WebDriverFetcher {
    fn default() -> Self {
        Self::new(DEFAULT_WEBDRIVER_URL)
    }
}

impl WebDriverFetcher {
    /// Create a fetcher for the given WebDriver server
    pub fn new(webdriver_url: &str) -> Self {
        Self {
            webdriver_url: webdriver_url.to_string(),
            try_fallbacks: true,
        }
    }

    /// Enable or disable trying well-known local WebDriver ports
    pub fn with_fallbacks(mut self, try_fallbacks: bool) -> Self {
        self.try_fallbacks = try_fallbacks;
        self
    }

    /// WebDriver server this fetcher connects to first
    pub fn webdriver_url(&self) -> &str {
        &self.webdriver_url
    }

    async fn connect(&self) -> Option<Client> {
        match ClientBuilder::native().connect(&self.webdriver_url).await {
            Ok(client) => {
                ::log::debug!("Connected to WebDriver at {}", self.webdriver_url);
                return Some(client);
            }
            Err(e) => {
                ::log::error!(
                    "Failed to connect to WebDriver at {}: {}",
                    self.webdriver_url,
                    e
                );
            }
        }

        if !self.try_fallbacks {
            return None;
        }

        for url in FALLBACK_WEBDRIVER_URLS {
            if url == self.webdriver_url {
                continue;
            }

            ::log::info!("Trying fallback WebDriver URL: {}", url);
            if let Ok(client) = ClientBuilder::native().connect(url).await {
                ::log::debug!("Connected to fallback WebDriver at {}", url);
                return Some(client);
            }
        }

        ::log::error!(
            "Make sure a WebDriver server is running or set the WEBDRIVER_URL environment variable"
        );
        None
    }
}

#[async_trait]
impl Fetcher for WebDriverFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let client = self.connect().await.ok_or_else(|| {
            ScrapeError::fetch(url, format!("no WebDriver reachable at {}", self.webdriver_url))
        })?;

        let source = match client.goto(url).await {
            Ok(()) => client.source().await,
            Err(e) => Err(e),
        };

        if let Err(e) = client.close().await {
            ::log::warn!("Failed to close WebDriver session: {}", e);
        }

        let source = source.map_err(|e| ScrapeError::fetch(url, e))?;
        ::log::debug!("Fetched {} bytes of rendered source from {}", source.len(), url);
        Ok(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_url() {
        assert_eq!(
            WebDriverFetcher::default().webdriver_url(),
            "http://localhost:4444"
        );
    }

    #[tokio::test]
    async fn test_unreachable_webdriver_is_fetch_error() {
        let fetcher = WebDriverFetcher::new("http://127.0.0.1:1").with_fallbacks(false);
        let result = fetcher.fetch("https://example.com/").await;

        match result {
            Err(ScrapeError::Fetch { url, reason }) => {
                assert_eq!(url, "https://example.com/");
                assert!(reason.contains("127.0.0.1:1"));
            }
            other => panic!("expected fetch error, got {other:?}"),
        }
    }
}
