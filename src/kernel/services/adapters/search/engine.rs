//! Chapter scan loop
//!
//! Chapters are scanned strictly in order on the calling thread. Cancellation
//! is observed at chapter boundaries only; whatever was collected before that
//! still goes out in the `Result` event.

use super::excerpt::build_excerpt;
use super::matcher::Matcher;
use crate::kernel::services::ports::search::{
    Chapter, Excerpt, Result, SearchEvent, SearchRequest,
};
use crate::kernel::services::ports::{DedupScope, SearchConfig};
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, Ordering};

/// Per-search state. Lives for one `run_search` call.
#[derive(Debug)]
pub struct ScanSession {
    excerpts: Vec<Excerpt>,
    last_accepted: Option<usize>,
    min_distance: usize,
    max_results: usize,
    scope: DedupScope,
}

impl ScanSession {
    pub fn new(config: &SearchConfig, query_len: usize) -> Self {
        Self {
            excerpts: Vec::new(),
            last_accepted: None,
            min_distance: config.min_distance(query_len),
            max_results: config.max_results,
            scope: config.dedup_scope,
        }
    }

    pub fn begin_chapter(&mut self) {
        if self.scope == DedupScope::Chapter {
            self.last_accepted = None;
        }
    }

    pub fn is_full(&self) -> bool {
        self.excerpts.len() >= self.max_results
    }

    /// Distance filter. A rejected offset leaves the tracker untouched.
    pub fn admit(&mut self, offset: usize) -> bool {
        if let Some(last) = self.last_accepted {
            if offset < last.saturating_add(self.min_distance) {
                return false;
            }
        }
        self.last_accepted = Some(offset);
        true
    }

    pub fn push(&mut self, excerpt: Excerpt) {
        self.excerpts.push(excerpt);
    }

    pub fn len(&self) -> usize {
        self.excerpts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.excerpts.is_empty()
    }

    pub fn into_excerpts(self) -> Vec<Excerpt> {
        self.excerpts
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ScanStats {
    pub chapters_visited: usize,
    pub excerpts: usize,
    pub cancelled: bool,
}

pub fn progress_percent(index: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    (index.saturating_mul(100) / total).min(100) as u8
}

fn scan_chapter(
    chapter: &Chapter,
    matcher: &Matcher,
    config: &SearchConfig,
    session: &mut ScanSession,
) {
    let text = chapter.text.as_str();
    matcher.for_each_match(text, |m| {
        if session.is_full() {
            return ControlFlow::Break(());
        }
        if !session.admit(m.offset) {
            return ControlFlow::Continue(());
        }
        session.push(Excerpt {
            chapter_title: chapter.title.clone(),
            excerpt: build_excerpt(text, m, matcher, config),
            href: chapter.href.clone(),
        });
        ControlFlow::Continue(())
    });
}

/// Scan every chapter, emitting one `Progress` per visited chapter.
pub fn scan_document<F>(
    chapters: &[Chapter],
    matcher: &Matcher,
    config: &SearchConfig,
    cancelled: &AtomicBool,
    emit: &mut F,
) -> (Vec<Excerpt>, ScanStats)
where
    F: FnMut(SearchEvent),
{
    let mut session = ScanSession::new(config, matcher.query_len());
    let mut stats = ScanStats::default();
    let total = chapters.len();

    for (index, chapter) in chapters.iter().enumerate() {
        if cancelled.load(Ordering::Relaxed) {
            stats.cancelled = true;
            tracing::debug!(chapter = %chapter.href, "search cancelled at chapter boundary");
            break;
        }

        let percent = progress_percent(index, total);
        emit(SearchEvent::Progress {
            percent,
            chapter: chapter.href.clone(),
        });
        stats.chapters_visited += 1;

        if session.is_full() {
            continue;
        }

        session.begin_chapter();
        let before = session.len();
        scan_chapter(chapter, matcher, config, &mut session);
        tracing::debug!(
            chapter = %chapter.href,
            percent,
            accepted = session.len() - before,
            "chapter scanned"
        );
    }

    stats.excerpts = session.len();
    (session.into_excerpts(), stats)
}

/// Validate, scan and emit the full event sequence for one request.
///
/// Emits either a single `Error`, or the progress events followed by exactly
/// one `Result` and one `Done`.
pub fn run_search<F>(
    request: &SearchRequest,
    config: &SearchConfig,
    cancelled: &AtomicBool,
    mut emit: F,
) -> Result<ScanStats>
where
    F: FnMut(SearchEvent),
{
    let prepared = request.validate().and_then(|(chapters, query)| {
        let matcher = Matcher::compile(query, config.pattern_mode, config.regex_size_limit)?;
        Ok((chapters, matcher))
    });

    let (chapters, matcher) = match prepared {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::warn!(error = %e, "search request rejected");
            emit(SearchEvent::error(&e));
            return Err(e);
        }
    };

    let (results, stats) = scan_document(chapters, &matcher, config, cancelled, &mut emit);
    emit(SearchEvent::Result { results });
    emit(SearchEvent::Done);
    Ok(stats)
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/engine.rs"]
mod tests;
