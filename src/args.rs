use clap::{Parser, ValueEnum};
use news_scraper::{API_KEY_ENV, FetcherKind, WEBDRIVER_URL_ENV};

#[derive(Parser, Debug)]
#[command(name = "news-scraper")]
#[command(about = "Extracts article titles, links and dates from a news page with a language model")]
#[command(version)]
pub struct Args {
    /// URL of the news page to scrape
    pub url: String,

    /// Path to a JSON configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// Maximum chunk size in estimated word units (default 500)
    #[arg(short, long)]
    pub max_chunk_size: Option<usize>,

    /// Model identifier (default gpt-3.5-turbo)
    #[arg(long)]
    pub model: Option<String>,

    /// Base URL of the chat completions API
    #[arg(long)]
    pub api_base: Option<String>,

    /// API key for the model provider
    #[arg(long, env = API_KEY_ENV, hide_env_values = true)]
    pub api_key: Option<String>,

    /// How to fetch the page
    #[arg(short, long, value_enum)]
    pub fetcher: Option<FetcherArg>,

    /// WebDriver server used with --fetcher webdriver
    #[arg(long, env = WEBDRIVER_URL_ENV)]
    pub webdriver_url: Option<String>,

    /// Print the records as a JSON array
    #[arg(long)]
    pub json: bool,

    /// Print the reduced chunks and stop before calling the model
    #[arg(long)]
    pub reduce_only: bool,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FetcherArg {
    Http,
    Webdriver,
}

impl From<FetcherArg> for FetcherKind {
    fn from(arg: FetcherArg) -> Self {
        match arg {
            FetcherArg::Http => FetcherKind::Http,
            FetcherArg::Webdriver => FetcherKind::WebDriver,
        }
    }
}
