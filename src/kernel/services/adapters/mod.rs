//! Service adapters: OS/runtime specific implementations (IO/async).

pub mod config;
pub mod paths;
pub mod search;
pub mod settings;

pub use config::ConfigService;
pub use paths::{ensure_log_dir, get_log_dir};
pub use search::{
    build_excerpt, decode_inbound, encode_event, progress_percent, run_search, scan_document,
    BookSearchService, Matcher, ScanSession, ScanStats, SearchTask, SearchWorker, WorkerInput,
};
pub use settings::{ensure_settings_file, get_settings_path, load_settings, load_settings_from};
