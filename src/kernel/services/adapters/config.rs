//! Config service: owns the effective search configuration.

use crate::core::Service;
use crate::kernel::services::ports::{DedupScope, PatternMode, SearchConfig, Settings};

pub struct ConfigService {
    search: SearchConfig,
}

impl ConfigService {
    pub fn new() -> Self {
        Self {
            search: SearchConfig::default(),
        }
    }

    pub fn with_search_config(search: SearchConfig) -> Self {
        Self { search }
    }

    pub fn from_settings(settings: Settings) -> Self {
        Self::with_search_config(settings.search)
    }

    pub fn search(&self) -> &SearchConfig {
        &self.search
    }

    pub fn search_mut(&mut self) -> &mut SearchConfig {
        &mut self.search
    }

    pub fn set_max_results(&mut self, max: usize) {
        self.search.max_results = max;
    }

    pub fn set_dedup_scope(&mut self, scope: DedupScope) {
        self.search.dedup_scope = scope;
    }

    pub fn set_pattern_mode(&mut self, mode: PatternMode) {
        self.search.pattern_mode = mode;
    }
}

impl Default for ConfigService {
    fn default() -> Self {
        Self::new()
    }
}

impl Service for ConfigService {
    fn name(&self) -> &'static str {
        "ConfigService"
    }
}

#[cfg(test)]
#[path = "../../../../tests/unit/kernel/services/adapters/config.rs"]
mod tests;
