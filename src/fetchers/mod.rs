//! Retrieval of raw page markup

pub mod fetcher;
pub mod http;
pub mod webdriver;

pub use fetcher::Fetcher;
pub use http::HttpFetcher;
pub use webdriver::WebDriverFetcher;
