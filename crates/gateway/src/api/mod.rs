pub mod chat;
pub mod checkin;
pub mod health;
pub mod hotel;
pub mod voice;

use axum::routing::{delete, get, post};
use axum::Router;

use crate::state::AppState;

/// Build the full API router, mirroring the kiosk frontend's contract.
pub fn router() -> Router<AppState> {
    Router::new()
        // Chat (core orchestration)
        .route("/api/chat", post(chat::chat))
        .route("/api/chat/:session_id", delete(chat::clear_session))
        // Hotel data
        .route("/api/hotel/info", get(hotel::info))
        .route("/api/hotel/rooms", get(hotel::rooms))
        .route("/api/hotel/upgrades", get(hotel::upgrades))
        // Check-in hardware simulation
        .route("/api/checkin/lookup", get(checkin::lookup))
        .route("/api/checkin/lookup-passport", get(checkin::lookup_passport))
        .route("/api/checkin/scan-passport", post(checkin::scan_passport))
        .route("/api/checkin/process-payment", post(checkin::process_payment))
        .route("/api/checkin/complete", post(checkin::complete))
        // Voice
        .route("/api/voice/tts", post(voice::tts))
        .route("/api/voice/stt", post(voice::stt))
        // Health
        .route("/api/health", get(health::health))
}
