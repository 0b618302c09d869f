use regex::Regex;

/// Wrapper tags removed from the serialized markup
pub const WRAPPER_TAGS: [&str; 10] = [
    "div", "body", "button", "li", "ul", "section", "span", "p", "svg", "ol",
];

/// Textual removal of wrapper tags from serialized markup
///
/// This is a string substitution, not an HTML operation. Opening and closing
/// tags are removed along with any attributes, their content is left in
/// place, and the result is not checked for well-formedness. The pattern
/// matches on the tag prefix, so e.g. `<pre>` and `<path>` go with `<p>`.
#[derive(Debug, Clone)]
pub struct TagStripper {
    pattern: Regex,
}

impl Default for TagStripper {
    fn default() -> Self {
        Self::new(&WRAPPER_TAGS).expect("Default wrapper tag pattern should be valid")
    }
}

impl TagStripper {
    /// Create a stripper for the given tag names
    pub fn new<S: AsRef<str>>(tags: &[S]) -> Result<Self, regex::Error> {
        let alternatives = tags
            .iter()
            .map(|tag| tag.as_ref())
            .collect::<Vec<_>>()
            .join("|");
        let pattern = Regex::new(&format!(r"</?({})\s*[^>]*>", alternatives))?;

        Ok(Self { pattern })
    }

    /// Remove all matching opening and closing tags
    pub fn strip(&self, markup: &str) -> String {
        self.pattern.replace_all(markup, "").into_owned()
    }
}
