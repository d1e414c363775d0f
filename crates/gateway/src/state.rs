use std::sync::Arc;

use ck_concierge::ConciergeEngine;
use ck_domain::config::Config;
use ck_hotel::MockDirectory;
use ck_sessions::InMemoryHistory;

use crate::voice::VoiceClient;

/// Shared application state passed to all API handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// The orchestration core.
    pub engine: Arc<ConciergeEngine>,
    /// The hotel dataset, also used directly by the check-in hardware
    /// simulation routes.
    pub directory: Arc<MockDirectory>,
    /// Session history handle (the engine shares it) for health stats.
    pub history: Arc<InMemoryHistory>,
    /// TTS/STT client. `None` when no voice API key is configured.
    pub voice: Option<Arc<VoiceClient>>,
    /// Provider IDs that initialized, frozen at startup for health checks.
    pub providers: Arc<Vec<String>>,
}
