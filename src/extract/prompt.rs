/// System role sent with every extraction request
pub const SYSTEM_ROLE: &str = "You are an experienced news article scraper.";

/// Build the user prompt for one chunk of reduced markup
pub fn build_user_prompt(chunk: &str) -> String {
    format!(
        r#"Here is the html structure from a news article:
{chunk}

Please extract:
- Title of the article
- URL of the article
- Published date (if available)

for all articles from the beginning

give the output in JSON format, as an array of objects with the keys "title", "url" and "published_date" (null when not available)."#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_chunk() {
        let prompt = build_user_prompt(r#"<a href="/a">Title A</a>"#);
        assert!(prompt.contains("\n<a href=\"/a\">Title A</a>\n"));
        assert!(prompt.contains(r#""published_date""#));
    }
}
