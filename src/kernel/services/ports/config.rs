use serde::{Deserialize, Serialize};

/// Which matches the minimum-distance tracker compares against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DedupScope {
    /// The last accepted offset carries over chapter boundaries. Offsets are
    /// chapter-local, so a late match in one chapter can suppress early
    /// matches in the next.
    #[default]
    Document,
    /// The tracker is reset at the start of every chapter.
    Chapter,
}

/// How the query string is turned into a pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PatternMode {
    /// Query is matched as plain text.
    #[default]
    Literal,
    /// Query is compiled as a regular expression.
    Regex,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub max_results: usize,
    /// Characters of context kept before a match.
    pub context_before: usize,
    /// Characters of context kept after the query length.
    pub context_after: usize,
    /// Accepted matches are at least `min_distance_factor * query_len` apart.
    pub min_distance_factor: usize,
    pub highlight_open: String,
    pub highlight_close: String,
    pub ellipsis: String,
    pub dedup_scope: DedupScope,
    pub pattern_mode: PatternMode,
    /// Upper bound for the compiled pattern, in bytes.
    pub regex_size_limit: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_results: 100,
            context_before: 40,
            context_after: 80,
            min_distance_factor: 2,
            highlight_open: r#"<span class="highlight">"#.to_string(),
            highlight_close: "</span>".to_string(),
            ellipsis: "...".to_string(),
            dedup_scope: DedupScope::Document,
            pattern_mode: PatternMode::Literal,
            regex_size_limit: 1 << 20,
        }
    }
}

impl SearchConfig {
    pub fn min_distance(&self, query_len: usize) -> usize {
        query_len.saturating_mul(self.min_distance_factor)
    }
}
