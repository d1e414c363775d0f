//! Voice endpoints.
//!
//! - `POST /api/voice/tts` — JSON `{text, voice?}` → `audio/mpeg` bytes
//! - `POST /api/voice/stt` — multipart `audio` field → `{text}`

use axum::extract::{Multipart, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Json};
use serde::Deserialize;

use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct TtsBody {
    pub text: String,
    #[serde(default)]
    pub voice: Option<String>,
}

pub async fn tts(
    State(state): State<AppState>,
    Json(body): Json<TtsBody>,
) -> impl IntoResponse {
    if body.text.trim().is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Text is required" })),
        )
            .into_response();
    }

    let Some(voice) = &state.voice else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": "TTS service not available" })),
        )
            .into_response();
    };

    match voice.synthesize(&body.text, body.voice.as_deref()).await {
        Ok(audio) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "audio/mpeg")],
            audio,
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, "TTS synthesis failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to synthesize speech" })),
            )
                .into_response()
        }
    }
}

pub async fn stt(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let Some(voice) = &state.voice else {
        return (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(serde_json::json!({ "error": "STT service not available" })),
        )
            .into_response();
    };

    // Pull the `audio` field out of the upload.
    let mut audio: Option<(Vec<u8>, String)> = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("audio") {
            let filename = field
                .file_name()
                .unwrap_or("recording.webm")
                .to_owned();
            match field.bytes().await {
                Ok(bytes) => {
                    audio = Some((bytes.to_vec(), filename));
                    break;
                }
                Err(e) => {
                    tracing::warn!(error = %e, "failed to read audio upload");
                }
            }
        }
    }

    let Some((bytes, filename)) = audio else {
        return (
            StatusCode::BAD_REQUEST,
            Json(serde_json::json!({ "error": "Audio file is required" })),
        )
            .into_response();
    };

    match voice.transcribe(bytes, &filename).await {
        Ok(text) => Json(serde_json::json!({ "text": text })).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "STT transcription failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(serde_json::json!({ "error": "Failed to transcribe audio" })),
            )
                .into_response()
        }
    }
}
