//! Book search
//!
//! - Matcher: compiled case-insensitive query (literal or regex)
//! - engine: chapter scan loop, dedup policy, progress
//! - excerpt: context window + highlight markers
//! - BookSearchService: runs a scan on the tokio blocking pool
//! - SearchWorker: drives the service from an inbound message channel

mod engine;
mod excerpt;
mod matcher;
mod service;
mod wire;
mod worker;

pub use engine::{progress_percent, run_search, scan_document, ScanSession, ScanStats};
pub use excerpt::build_excerpt;
pub use matcher::Matcher;
pub use service::{BookSearchService, SearchTask};
pub use wire::{decode_inbound, encode_event};
pub use worker::{SearchWorker, WorkerInput};
