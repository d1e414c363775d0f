//! Hotel data endpoints — read-only pass-throughs to the directory.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::Deserialize;

use ck_hotel::HotelDirectory;

use crate::state::AppState;

/// `GET /api/hotel/info`
pub async fn info(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.directory.hotel_info().await)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomsQuery {
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub check_out: Option<String>,
}

/// `GET /api/hotel/rooms?checkIn&checkOut`
pub async fn rooms(
    State(state): State<AppState>,
    Query(q): Query<RoomsQuery>,
) -> impl IntoResponse {
    let rooms = state
        .directory
        .available_rooms(q.check_in.as_deref(), q.check_out.as_deref())
        .await;
    Json(rooms)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradesQuery {
    #[serde(default)]
    pub room_type: Option<String>,
}

/// `GET /api/hotel/upgrades?roomType`
pub async fn upgrades(
    State(state): State<AppState>,
    Query(q): Query<UpgradesQuery>,
) -> impl IntoResponse {
    let Some(room_type) = q.room_type.filter(|r| !r.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "roomType query parameter is required" })),
        )
            .into_response();
    };
    Json(state.directory.room_upgrades(&room_type).await).into_response()
}
