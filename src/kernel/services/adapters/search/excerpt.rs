//! Excerpt construction around an accepted match.

use super::matcher::Matcher;
use crate::kernel::services::ports::search::Match;
use crate::kernel::services::ports::SearchConfig;

/// Byte window `[start, end)` around `m`, measured in characters of context.
///
/// Returns `(start, end, cut_before, cut_after)`.
pub fn window(text: &str, m: Match, span: usize, context_before: usize) -> (usize, usize, bool, bool) {
    let start = if context_before == 0 {
        m.start
    } else {
        text[..m.start]
            .char_indices()
            .rev()
            .nth(context_before - 1)
            .map(|(i, _)| i)
            .unwrap_or(0)
    };

    let (end, cut_after) = match text[m.start..].char_indices().nth(span) {
        Some((i, _)) => (m.start + i, true),
        None => (text.len(), false),
    };

    (start, end, start > 0, cut_after)
}

pub fn build_excerpt(text: &str, m: Match, matcher: &Matcher, config: &SearchConfig) -> String {
    let span = matcher.query_len() + config.context_after;
    let (start, end, cut_before, cut_after) = window(text, m, span, config.context_before);

    let body = matcher.highlight(
        &text[start..end],
        &config.highlight_open,
        &config.highlight_close,
    );

    let mut excerpt = String::with_capacity(body.len() + config.ellipsis.len() * 2);
    if cut_before {
        excerpt.push_str(&config.ellipsis);
    }
    excerpt.push_str(&body);
    if cut_after {
        excerpt.push_str(&config.ellipsis);
    }
    excerpt
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/excerpt.rs"]
mod tests;
