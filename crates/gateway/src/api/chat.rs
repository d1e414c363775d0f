//! Chat API — the kiosk's conversational entry point.
//!
//! - `POST   /api/chat`              — run one concierge turn
//! - `DELETE /api/chat/:session_id`  — clear conversation history

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::Deserialize;

use ck_concierge::SessionContext;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatBody {
    /// The guest's message (typed or transcribed).
    pub message: String,
    /// Conversation key. Minted server-side when absent.
    #[serde(default)]
    pub session_id: Option<String>,
    /// Whatever the kiosk UI already knows about this check-in.
    #[serde(default)]
    pub context: Option<SessionContext>,
}

/// Run one concierge turn. The reply is always present — provider
/// failures degrade inside the engine, never into a 5xx here.
pub async fn chat(
    State(state): State<AppState>,
    Json(body): Json<ChatBody>,
) -> impl IntoResponse {
    if body.message.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Message is required" })),
        )
            .into_response();
    }

    let session_id = body
        .session_id
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| format!("anonymous-{}", uuid::Uuid::new_v4()));

    let context = body.context.unwrap_or_default();
    let outcome = state.engine.chat(&body.message, &session_id, &context).await;

    Json(serde_json::json!({
        "reply": outcome.reply,
        "actions": outcome.actions,
        "sessionId": session_id,
    }))
    .into_response()
}

/// Clear conversation history for a session. Idempotent.
pub async fn clear_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> impl IntoResponse {
    state.engine.clear_session(&session_id);
    Json(serde_json::json!({ "success": true }))
}
