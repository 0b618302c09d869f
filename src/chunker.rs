//! Word-bounded chunking of reduced markup
//!
//! Chunk size is measured in estimated word units: whitespace-delimited words,
//! used as a stand-in for model tokens. It is not a token count.

use std::iter::Peekable;
use std::str::SplitWhitespace;

/// Estimated word-unit count of a piece of text
pub fn estimate_word_units(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Splits text into chunks of at most `max_word_units` estimated word units
#[derive(Debug, Clone, Copy)]
pub struct WordChunker<'a> {
    text: &'a str,
    max_word_units: usize,
}

impl<'a> WordChunker<'a> {
    /// Create a chunker over `text`
    pub fn new(text: &'a str, max_word_units: usize) -> Self {
        Self {
            text,
            max_word_units,
        }
    }

    /// A fresh lazy iterator over the chunks, starting from the first word
    pub fn chunks(&self) -> Chunks<'a> {
        Chunks {
            words: self.text.split_whitespace().peekable(),
            max_word_units: self.max_word_units,
        }
    }
}

impl<'a> IntoIterator for &WordChunker<'a> {
    type Item = String;
    type IntoIter = Chunks<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.chunks()
    }
}

/// Lazy chunk iterator returned by [`WordChunker::chunks`]
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    words: Peekable<SplitWhitespace<'a>>,
    max_word_units: usize,
}

impl Iterator for Chunks<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        // The first word always opens a chunk, even if it alone is over the limit
        let first = self.words.next()?;
        let mut units = estimate_word_units(first);
        let mut chunk = String::from(first);

        while let Some(word) = self.words.peek() {
            let word_units = estimate_word_units(word);
            if units + word_units > self.max_word_units {
                break;
            }
            units += word_units;
            chunk.push(' ');
            chunk.push_str(word);
            self.words.next();
        }

        Some(chunk)
    }
}
