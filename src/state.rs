//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is built once in `main` and injected into Axum handlers via the
//! `State` extractor. Everything inside is read-only after startup: the AI
//! client, the serialized bug catalog, and relay config. Handlers never reach
//! for globals, so tests substitute a mock [`GenAi`].

use std::sync::Arc;

use crate::catalog::Catalog;
use crate::config::RelayConfig;
use crate::llm::GenAi;

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped.
#[derive(Clone)]
pub struct AppState {
    pub ai: Arc<dyn GenAi>,
    pub catalog: Arc<Catalog>,
    pub config: Arc<RelayConfig>,
}

impl AppState {
    #[must_use]
    pub fn new(ai: Arc<dyn GenAi>, catalog: Catalog, config: RelayConfig) -> Self {
        Self { ai, catalog: Arc::new(catalog), config: Arc::new(config) }
    }
}

// =============================================================================
// TEST HELPERS
// =============================================================================
