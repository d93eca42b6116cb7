use std::sync::Arc;

use crate::config::Config;
use crate::profiles::ProfileRegistry;
use crate::scoring::ResumeScorer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Read-only profile table, shared with the scorer.
    pub profiles: Arc<ProfileRegistry>,
    /// Pluggable scorer. Default: HeuristicScorer.
    pub scorer: Arc<dyn ResumeScorer>,
}
