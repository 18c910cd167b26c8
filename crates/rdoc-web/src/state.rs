//! Application state.

use rdoc_render::ReportFormatter;
use std::sync::Arc;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub formatter: Arc<ReportFormatter>,
}

impl AppState {
    pub fn new(formatter: ReportFormatter) -> Self {
        Self {
            formatter: Arc::new(formatter),
        }
    }
}
