use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Keys accepted for each field, most preferred first
const TITLE_KEYS: [&str; 2] = ["title", "Title"];
const URL_KEYS: [&str; 4] = ["url", "URL", "Url", "link"];
const DATE_KEYS: [&str; 5] = [
    "published_date",
    "Published Date",
    "published date",
    "publishedDate",
    "date",
];

/// One article as reported by the model
///
/// Deserializes from any JSON object. Missing or null fields come out empty
/// instead of failing the whole response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ArticleRecord {
    /// Headline of the article
    pub title: String,

    /// Link to the article, exactly as it appeared in the markup
    pub url: Option<String>,

    /// Published date (if available)
    pub published_date: Option<String>,
}

impl ArticleRecord {
    /// Create a new article record
    pub fn new(title: String, url: Option<String>, published_date: Option<String>) -> Self {
        Self {
            title,
            url,
            published_date,
        }
    }
}

impl<'de> Deserialize<'de> for ArticleRecord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = Map::<String, Value>::deserialize(deserializer)?;
        Ok(Self {
            title: first_present(&fields, &TITLE_KEYS).unwrap_or_default(),
            url: first_present(&fields, &URL_KEYS),
            published_date: first_present(&fields, &DATE_KEYS),
        })
    }
}

/// Value of the first key that is present and not null
fn first_present(fields: &Map<String, Value>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .filter_map(|key| fields.get(*key))
        .find_map(|value| match value {
            Value::Null => None,
            Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        })
}

impl fmt::Display for ArticleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.title)?;
        if let Some(url) = &self.url {
            write!(f, " <{}>", url)?;
        }
        if let Some(date) = &self.published_date {
            write!(f, " ({})", date)?;
        }
        Ok(())
    }
}
