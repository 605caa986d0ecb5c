use std::sync::Arc;

use crate::ats::engine::AtsEngine;
use crate::config::Config;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Immutable scoring engine, shared by every request.
    pub engine: Arc<AtsEngine>,
}
