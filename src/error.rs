use thiserror::Error;

/// Errors that abort a scrape
#[derive(Error, Debug)]
pub enum ScrapeError {
    /// The document could not be retrieved
    #[error("failed to fetch {url}: {reason}")]
    Fetch { url: String, reason: String },

    /// The markup could not be turned into an element tree
    #[error("HTML parse error: {0}")]
    HtmlParse(String),

    /// A model response was not valid JSON once fences were removed
    #[error("JSON parse error in response for chunk {chunk}: {source}")]
    JsonParse {
        chunk: usize,
        #[source]
        source: serde_json::Error,
    },

    /// The model call itself failed
    #[error("extraction failed: {0}")]
    Extraction(String),

    /// Invalid or missing configuration
    #[error("configuration error: {0}")]
    Config(String),

    /// A wrapper tag pattern did not compile
    #[error("invalid tag pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScrapeError {
    pub(crate) fn fetch(url: &str, reason: impl ToString) -> Self {
        ScrapeError::Fetch {
            url: url.to_string(),
            reason: reason.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, ScrapeError>;
