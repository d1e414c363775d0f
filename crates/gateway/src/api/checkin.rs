//! Check-in hardware simulation — the scanner, payment terminal, and key
//! card encoder the kiosk drives in mock mode. Each handler waits a
//! plausible amount of time, then answers deterministically from the
//! mock dataset.

use std::time::Duration;

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use serde::Deserialize;

use ck_hotel::HotelDirectory;

use crate::state::AppState;

/// Passport number of the demo guest the mock scanner always "reads".
const MOCK_SCAN_PASSPORT: &str = "E1234567A";

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    #[serde(default)]
    pub query: Option<String>,
}

/// `GET /api/checkin/lookup?query` — reservation by code or id.
pub async fn lookup(
    State(state): State<AppState>,
    Query(q): Query<LookupQuery>,
) -> impl IntoResponse {
    let Some(query) = q.query.filter(|q| !q.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Query parameter is required" })),
        )
            .into_response();
    };
    Json(state.directory.reservation_by_code(&query).await).into_response()
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassportQuery {
    #[serde(default)]
    pub passport_number: Option<String>,
}

/// `GET /api/checkin/lookup-passport?passportNumber`
pub async fn lookup_passport(
    State(state): State<AppState>,
    Query(q): Query<PassportQuery>,
) -> impl IntoResponse {
    let Some(passport) = q.passport_number.filter(|p| !p.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "passportNumber query parameter is required" })),
        )
            .into_response();
    };
    Json(state.directory.reservation_by_passport(&passport).await).into_response()
}

/// `POST /api/checkin/scan-passport` — simulated scan: short delay, then
/// the demo guest's passport fields.
pub async fn scan_passport(State(state): State<AppState>) -> impl IntoResponse {
    tokio::time::sleep(Duration::from_millis(1500)).await;

    match state.directory.guest_by_passport(MOCK_SCAN_PASSPORT) {
        Some(guest) => Json(serde_json::json!({
            "success": true,
            "data": {
                "firstName": guest.first_name,
                "lastName": guest.last_name,
                "nationality": guest.nationality,
                "passportNumber": guest.passport_number,
                "dateOfBirth": guest.date_of_birth,
                "expiryDate": "2028-03-14",
                "gender": "M",
            },
        })),
        None => Json(serde_json::json!({ "success": false, "error": "Scanner error" })),
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentBody {
    pub reservation_id: String,
    pub amount: f64,
    pub currency: String,
}

/// `POST /api/checkin/process-payment` — always succeeds in mock mode.
pub async fn process_payment(Json(body): Json<PaymentBody>) -> impl IntoResponse {
    tokio::time::sleep(Duration::from_millis(2000)).await;

    let suffix = uuid::Uuid::new_v4().simple().to_string()[..8].to_uppercase();
    Json(serde_json::json!({
        "success": true,
        "transactionId": format!("TXN-{suffix}"),
        "amount": body.amount,
        "currency": body.currency,
        "last4": "4242",
        "reservationId": body.reservation_id,
    }))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompleteBody {
    pub reservation_id: String,
    pub room_id: String,
}

/// `POST /api/checkin/complete` — encode a key card and finish check-in.
pub async fn complete(
    State(state): State<AppState>,
    Json(body): Json<CompleteBody>,
) -> impl IntoResponse {
    tokio::time::sleep(Duration::from_millis(1000)).await;

    let key_suffix = uuid::Uuid::new_v4().simple().to_string()[..10].to_uppercase();
    let room_number = state
        .directory
        .room_by_id(&body.room_id)
        .map(|r| r.room_number.clone())
        .unwrap_or_else(|| "1204".into());

    Json(serde_json::json!({
        "success": true,
        "keyCardNumber": format!("KC-{key_suffix}"),
        "roomNumber": room_number,
        "reservationId": body.reservation_id,
        "checkedInAt": chrono::Utc::now().to_rfc3339(),
    }))
}
