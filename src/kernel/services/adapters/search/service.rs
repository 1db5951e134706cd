//! Book search service
//!
//! Runs the chapter scan on the blocking pool of a tokio runtime and streams
//! `SearchEvent`s back over a sync channel.

use super::engine::run_search;
use crate::core::Service;
use crate::kernel::services::ports::search::{Excerpt, Result, SearchEvent, SearchRequest};
use crate::kernel::services::ports::SearchConfig;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::SyncSender;
use std::sync::Arc;

static SEARCH_ID: AtomicU64 = AtomicU64::new(0);

fn next_search_id() -> u64 {
    SEARCH_ID.fetch_add(1, Ordering::Relaxed)
}

/// Handle to one search. Cancelling is cooperative and takes effect at the
/// next chapter boundary.
#[derive(Debug, Clone)]
pub struct SearchTask {
    id: u64,
    cancelled: Arc<AtomicBool>,
    finished: Arc<AtomicBool>,
}

impl SearchTask {
    pub fn new() -> Self {
        Self {
            id: next_search_id(),
            cancelled: Arc::new(AtomicBool::new(false)),
            finished: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn cancel(&self) {
        self.cancelled.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Relaxed)
    }

    /// Set by whoever forwarded the terminal event of this search.
    pub fn mark_finished(&self) {
        self.finished.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.finished.load(Ordering::Relaxed)
    }

    fn cancelled_flag(&self) -> Arc<AtomicBool> {
        self.cancelled.clone()
    }
}

impl Default for SearchTask {
    fn default() -> Self {
        Self::new()
    }
}

pub struct BookSearchService {
    runtime: tokio::runtime::Handle,
    config: SearchConfig,
}

impl BookSearchService {
    pub fn new(runtime: tokio::runtime::Handle, config: SearchConfig) -> Self {
        Self { runtime, config }
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    /// Start a search in the background.
    pub fn search(&self, request: SearchRequest, tx: SyncSender<SearchEvent>) -> SearchTask {
        let task = SearchTask::new();
        self.search_with_task(request, task.clone(), tx);
        task
    }

    /// Start a search driven by a task the caller already holds.
    pub fn search_with_task(
        &self,
        request: SearchRequest,
        task: SearchTask,
        tx: SyncSender<SearchEvent>,
    ) {
        let search_id = task.id();
        let cancelled = task.cancelled_flag();
        let config = self.config.clone();
        let tx_for_failure = tx.clone();

        self.runtime.spawn(async move {
            tracing::info!(search_id, "search started");

            let result = tokio::task::spawn_blocking(move || {
                run_search(&request, &config, &cancelled, |event| {
                    // nobody is listening any more, stop at the next chapter
                    if tx.send(event).is_err() {
                        cancelled.store(true, Ordering::Relaxed);
                    }
                })
            })
            .await;

            match result {
                Ok(Ok(stats)) => {
                    tracing::info!(
                        search_id,
                        chapters = stats.chapters_visited,
                        excerpts = stats.excerpts,
                        cancelled = stats.cancelled,
                        "search finished"
                    );
                }
                Ok(Err(e)) => {
                    tracing::debug!(search_id, error = %e, "search rejected");
                }
                Err(e) => {
                    tracing::error!(search_id, error = %e, "search task failed");
                    let _ = tx_for_failure.send(SearchEvent::Error {
                        message: format!("Search task failed: {}", e),
                    });
                }
            }
        });
    }

    /// Run a search on the calling thread and return the collected excerpts.
    pub fn search_sync(request: &SearchRequest, config: &SearchConfig) -> Result<Vec<Excerpt>> {
        let cancelled = AtomicBool::new(false);
        let mut excerpts = Vec::new();
        run_search(request, config, &cancelled, |event| {
            if let SearchEvent::Result { results } = event {
                excerpts = results;
            }
        })?;
        Ok(excerpts)
    }
}

impl Service for BookSearchService {
    fn name(&self) -> &'static str {
        "BookSearchService"
    }
}

#[cfg(test)]
#[path = "../../../../../tests/unit/kernel/services/adapters/search/service.rs"]
mod tests;
