use crate::error::Result;
use crate::parsers::ReducedPage;
use crate::parsers::sanitize;
use crate::parsers::strip::TagStripper;
use crate::parsers::tree::Element;
use scraper::Html;

/// Turns raw HTML into compact markup for the model
#[derive(Debug, Clone, Default)]
pub struct Reducer {
    stripper: TagStripper,
}

impl Reducer {
    /// Create a reducer with a custom tag stripper
    pub fn new(stripper: TagStripper) -> Self {
        Self { stripper }
    }

    /// Parse, sanitize, serialize and strip a raw HTML document
    pub fn reduce(&self, html: &str) -> Result<ReducedPage> {
        let doc = Html::parse_document(html);
        self.reduce_document(&doc)
    }

    /// Same as [`Reducer::reduce`] for an already parsed document
    pub fn reduce_document(&self, doc: &Html) -> Result<ReducedPage> {
        let body = sanitize::sanitize(Element::body_of(doc)?);
        let links = anchor_hrefs(&body);

        let markup = self.stripper.strip(&body.to_html());

        ::log::debug!(
            "Reduced document to {} bytes with {} links",
            markup.len(),
            links.len()
        );
        if !links.is_empty() {
            ::log::trace!(
                "First few links: {:?}",
                links.iter().take(5).collect::<Vec<_>>()
            );
        }

        Ok(ReducedPage::new(markup, links))
    }
}

/// `href` values of every anchor left in a tree
pub fn anchor_hrefs(root: &Element) -> Vec<String> {
    root.descendants()
        .into_iter()
        .filter(|element| element.is_anchor())
        .filter_map(|element| element.attr("href"))
        .map(|href| href.to_string())
        .collect()
}
