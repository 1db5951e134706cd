//! Compiled query matcher
//!
//! - Regex path: case-insensitive `regex::Regex`, the query is escaped in literal mode
//! - ASCII path: literal query over ASCII text goes through a lowercased memmem scan

use crate::kernel::services::ports::search::{Match, Result};
use crate::kernel::services::ports::PatternMode;
use memchr::memmem::Finder;
use regex::{Captures, Regex, RegexBuilder};
use std::ops::ControlFlow;

/// Query compiled once per search.
#[derive(Clone, Debug)]
pub struct Matcher {
    regex: Regex,
    ascii: Option<Finder<'static>>,
    query_len: usize,
}

impl Matcher {
    pub fn compile(query: &str, mode: PatternMode, size_limit: usize) -> Result<Self> {
        let pattern = match mode {
            PatternMode::Literal => regex::escape(query),
            PatternMode::Regex => query.to_string(),
        };
        let regex = RegexBuilder::new(&pattern)
            .case_insensitive(true)
            .size_limit(size_limit)
            .build()?;

        let ascii = (mode == PatternMode::Literal && query.is_ascii()).then(|| {
            let needle = query.to_ascii_lowercase();
            Finder::new(needle.as_bytes()).into_owned()
        });

        Ok(Self {
            regex,
            ascii,
            query_len: query.chars().count(),
        })
    }

    /// Length of the raw query in characters.
    pub fn query_len(&self) -> usize {
        self.query_len
    }

    /// Visit matches in `text` left to right until `f` breaks.
    pub fn for_each_match<F>(&self, text: &str, mut f: F)
    where
        F: FnMut(Match) -> ControlFlow<()>,
    {
        if let Some(finder) = &self.ascii {
            if text.is_ascii() {
                // byte offsets are char offsets here
                let haystack = text.as_bytes().to_ascii_lowercase();
                let needle_len = finder.needle().len();
                for start in finder.find_iter(&haystack) {
                    if f(Match::new(start, start + needle_len, start)).is_break() {
                        return;
                    }
                }
                return;
            }
        }

        let mut offset = 0usize;
        let mut last_byte = 0usize;
        for mat in self.regex.find_iter(text) {
            offset += text[last_byte..mat.start()].chars().count();
            last_byte = mat.start();
            if f(Match::new(mat.start(), mat.end(), offset)).is_break() {
                return;
            }
        }
    }

    pub fn find_all(&self, text: &str) -> Vec<Match> {
        let mut matches = Vec::new();
        self.for_each_match(text, |m| {
            matches.push(m);
            ControlFlow::Continue(())
        });
        matches
    }

    /// Wrap every occurrence inside `body` with the given markers.
    pub fn highlight(&self, body: &str, open: &str, close: &str) -> String {
        self.regex
            .replace_all(body, |caps: &Captures| {
                format!("{}{}{}", open, &caps[0], close)
            })
            .into_owned()
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/matcher.rs"]
mod tests;
