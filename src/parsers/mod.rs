//! HTML reduction
//!
//! Raw HTML goes through [`tree`] (owned copy of `<body>`), [`sanitize`]
//! (structural cleanup) and [`strip`] (textual wrapper removal) to come out as
//! a flat string of inline content, headings and anchors.

pub mod html;
pub mod sanitize;
pub mod strip;
pub mod tree;


pub use html::Reducer;

use crate::error::Result;

/// Result of reducing a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReducedPage {
    /// Reduced markup, ready for chunking
    pub markup: String,
    /// `href` of every anchor that survived sanitizing
    pub links: Vec<String>,
}

impl ReducedPage {
    /// Creates a new reduced page
    pub fn new(markup: String, links: Vec<String>) -> Self {
        Self { markup, links }
    }
}

/// Reduce raw HTML to markup with the default wrapper tag set
pub fn reduce(html: &str) -> Result<String> {
    Ok(Reducer::default().reduce(html)?.markup)
}
