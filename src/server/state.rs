//! Application state.

use crate::analyzer::Analyzer;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub analyzer: Arc<Analyzer>,
    /// Map failed analyses to 5xx statuses
    pub error_status: bool,
}

impl AppState {
    pub fn new(analyzer: Analyzer, error_status: bool) -> Self {
        Self {
            analyzer: Arc::new(analyzer),
            error_status,
        }
    }
}
