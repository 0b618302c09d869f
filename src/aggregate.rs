//! Turning model responses into article records

use crate::error::{Result, ScrapeError};
use crate::results::ArticleRecord;

/// Formatting fences models wrap their JSON in
const FENCES: [&str; 2] = ["```json", "```"];

/// Remove code fences and surrounding whitespace from a model response
pub fn strip_fences(text: &str) -> String {
    FENCES
        .iter()
        .fold(text.to_string(), |acc, fence| acc.replace(fence, ""))
        .trim()
        .to_string()
}

/// Parse one model response as a JSON array of article records
pub fn parse_response(text: &str) -> std::result::Result<Vec<ArticleRecord>, serde_json::Error> {
    serde_json::from_str(&strip_fences(text))
}

/// Collects records from chunk responses in the order they arrive
///
/// Records are appended as is. The same article showing up in two chunks
/// shows up twice in the output.
#[derive(Debug, Default)]
pub struct Aggregator {
    records: Vec<ArticleRecord>,
    chunks_seen: usize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse the next chunk's response and append its records
    ///
    /// Returns how many records the response contributed.
    pub fn push(&mut self, response: &str) -> Result<usize> {
        let chunk = self.chunks_seen;
        self.chunks_seen += 1;

        let records =
            parse_response(response).map_err(|source| ScrapeError::JsonParse { chunk, source })?;
        let count = records.len();
        ::log::debug!("Chunk {} yielded {} records", chunk, count);

        self.records.extend(records);
        Ok(count)
    }

    /// Number of responses pushed so far
    pub fn chunks_seen(&self) -> usize {
        self.chunks_seen
    }

    /// Records collected so far
    pub fn records(&self) -> &[ArticleRecord] {
        &self.records
    }

    /// Consume the aggregator and return all records
    pub fn finish(self) -> Vec<ArticleRecord> {
        self.records
    }
}

/// Parse and concatenate a whole sequence of chunk responses
pub fn aggregate<I, S>(responses: I) -> Result<Vec<ArticleRecord>>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut aggregator = Aggregator::new();
    for response in responses {
        aggregator.push(response.as_ref())?;
    }
    Ok(aggregator.finish())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_response() {
        let responses =
            ["```json\n[{\"title\":\"Title A\",\"url\":\"/a\",\"published_date\":null}]\n```"];
        let records = aggregate(responses).unwrap();
        assert_eq!(
            records,
            vec![ArticleRecord::new("Title A".into(), Some("/a".into()), None)]
        );
        assert_eq!(
            serde_json::to_string(&records).unwrap(),
            r#"[{"title":"Title A","url":"/a","published_date":null}]"#
        );
    }

    #[test]
    fn test_fences_do_not_change_parse() {
        let plain = r#"[{"title":"T","url":"/t","published_date":"2024-01-02"}]"#;
        let fenced = format!("```json\n{plain}\n```");
        let bare_fence = format!("```\n{plain}\n```");

        let expected = parse_response(plain).unwrap();
        assert_eq!(parse_response(&fenced).unwrap(), expected);
        assert_eq!(parse_response(&bare_fence).unwrap(), expected);
    }

    #[test]
    fn test_strip_fences() {
        assert_eq!(strip_fences("  ```json\n[]\n```  "), "[]");
        assert_eq!(strip_fences("[]"), "[]");
    }

    #[test]
    fn test_records_kept_in_chunk_order() {
        let first = r#"[{"title":"A","url":"/a"},{"title":"B","url":"/b"}]"#;
        let second = r#"[{"title":"C","url":"/c"}]"#;

        let titles: Vec<String> = aggregate([first, second])
            .unwrap()
            .into_iter()
            .map(|record| record.title)
            .collect();
        assert_eq!(titles, vec!["A", "B", "C"]);
    }

    #[test]
    fn test_duplicates_across_chunks_are_kept() {
        let response = r#"[{"title":"A","url":"/a"}]"#;
        let records = aggregate([response, response]).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0], records[1]);
    }

    #[test]
    fn test_malformed_response_is_parse_error() {
        let mut aggregator = Aggregator::new();
        assert_eq!(aggregator.push("[]").unwrap(), 0);

        let result = aggregator.push("not json");
        assert!(matches!(
            result,
            Err(ScrapeError::JsonParse { chunk: 1, .. })
        ));
        assert!(aggregator.records().is_empty());
        assert_eq!(aggregator.chunks_seen(), 2);
    }

    #[test]
    fn test_malformed_response_aborts_aggregation() {
        let good = r#"[{"title":"A","url":"/a"}]"#;
        let result = aggregate([good, "not json", good]);
        assert!(matches!(result, Err(ScrapeError::JsonParse { chunk: 1, .. })));
    }

    #[test]
    fn test_canonical_and_alias_keys_together() {
        let records = aggregate([
            r#"[{"title":"A","url":"/a","link":"/a"}]"#,
            r#"[{"title":"B","url":"/b","published_date":"May 1","date":"May 1"}]"#,
        ])
        .unwrap();
        assert_eq!(
            records,
            vec![
                ArticleRecord::new("A".into(), Some("/a".into()), None),
                ArticleRecord::new("B".into(), Some("/b".into()), Some("May 1".into())),
            ]
        );
    }

    #[test]
    fn test_null_url_is_kept() {
        let records = aggregate([r#"[{"title":"A","url":null,"published_date":null}]"#]).unwrap();
        assert_eq!(records, vec![ArticleRecord::new("A".into(), None, None)]);
        assert_eq!(
            serde_json::to_string(&records).unwrap(),
            r#"[{"title":"A","url":null,"published_date":null}]"#
        );
    }

    #[test]
    fn test_non_array_response_is_parse_error() {
        let result = aggregate([r#"{"title":"A","url":"/a"}"#]);
        assert!(matches!(result, Err(ScrapeError::JsonParse { chunk: 0, .. })));
    }
}
