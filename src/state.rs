//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. The
//! console keeps no records of its own: it carries the records API facade and
//! the parsed configuration, nothing else.

use std::sync::Arc;

use crate::api::Records;
use crate::config::ConsoleConfig;

/// Clone is required by Axum; both fields are cheap to clone.
#[derive(Clone)]
pub struct AppState {
    pub records: Records,
    pub config: Arc<ConsoleConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(records: Records, config: ConsoleConfig) -> Self {
        Self { records, config: Arc::new(config) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
