//! epub-search - off-main-thread full-text search over book chapters
//!
//! Module layout:
//! - core: shared abstractions (Service)
//! - kernel::services::ports: request/event contracts and configuration
//! - kernel::services::adapters: matcher, scan engine, search service, worker

pub mod core;
pub mod kernel;

pub use kernel::services::adapters::{BookSearchService, SearchTask, SearchWorker, WorkerInput};
pub use kernel::services::ports::{
    Chapter, Excerpt, InboundMessage, SearchConfig, SearchError, SearchEvent, SearchRequest,
};
