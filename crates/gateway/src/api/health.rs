//! `GET /api/health` — liveness plus a summary of what initialized.

use axum::extract::State;
use axum::response::{IntoResponse, Json};

use crate::state::AppState;

pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "hotel": state.config.hotel.name,
        "aiProviders": &*state.providers,
        "voice": state.voice.is_some(),
        "activeSessions": state.history.session_count(),
    }))
}
