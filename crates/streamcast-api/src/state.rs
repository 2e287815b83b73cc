//! Application state shared across all route handlers.

use std::sync::Arc;
use std::time::Instant;

use streamcast_core::StreamcastConfig;
use streamcast_skill::Skill;

/// Shared application state.
///
/// The skill holds no per-request state, so handlers share it read-only.
#[derive(Clone)]
pub struct AppState {
    pub skill: Arc<Skill>,
    pub config: Arc<StreamcastConfig>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    pub fn new(skill: Skill, config: StreamcastConfig) -> Self {
        Self {
            skill: Arc::new(skill),
            config: Arc::new(config),
            start_time: Instant::now(),
        }
    }
}
