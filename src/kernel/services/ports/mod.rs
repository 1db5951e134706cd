//! Service ports: data contracts shared by the engine, the service and the worker.

pub mod config;
pub mod search;
pub mod settings;

pub use config::{DedupScope, PatternMode, SearchConfig};
pub use search::{
    CancelKind, CancelMessage, Chapter, Excerpt, InboundMessage, Match, Result as SearchResult,
    SearchError, SearchEvent, SearchRequest,
};
pub use settings::Settings;
