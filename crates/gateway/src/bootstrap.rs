//! AppState construction shared by `serve` and the one-shot `run` command.

use std::sync::Arc;

use ck_concierge::ConciergeEngine;
use ck_domain::config::Config;
use ck_hotel::MockDirectory;
use ck_providers::ProviderRegistry;
use ck_sessions::InMemoryHistory;

use crate::state::AppState;
use crate::voice::VoiceClient;

/// Initialize every subsystem and return a fully-wired [`AppState`].
pub fn build_app_state(config: Arc<Config>) -> AppState {
    // Providers resolve their API keys here, once. Whatever fails to
    // initialize is skipped; the engine degrades accordingly at runtime.
    let registry = ProviderRegistry::from_config(&config.llm);
    let providers = registry.list_providers();

    let directory = Arc::new(MockDirectory::new());
    let history = Arc::new(InMemoryHistory::new());

    let engine = ConciergeEngine::new(
        registry,
        directory.clone(),
        history.clone(),
        config.hotel.name.clone(),
    )
    .with_sampling(config.llm.temperature, config.llm.max_tokens);

    let voice = match VoiceClient::from_config(&config.voice) {
        Some(client) => Some(Arc::new(client)),
        None => {
            tracing::warn!(
                key_env = %config.voice.api_key_env,
                "voice API key not set; TTS/STT routes will answer 503"
            );
            None
        }
    };

    tracing::info!(
        hotel = %config.hotel.name,
        providers = ?providers,
        voice = voice.is_some(),
        "kiosk state ready"
    );

    AppState {
        config,
        engine: Arc::new(engine),
        directory,
        history,
        voice,
        providers: Arc::new(providers),
    }
}
