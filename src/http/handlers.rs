use super::state::AppState;
use crate::error::StreamError;
use crate::session::{Role, StreamConfig, StreamConfigUpdate};
use crate::speech::SubtitleOptions;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use tracing::info;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct ExpressionRequest {
    pub expression: String,
}

#[derive(Debug, Deserialize)]
pub struct GestureRequest {
    pub gesture: String,
}

#[derive(Debug, Deserialize)]
pub struct VoiceCommandRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct SpeakRequest {
    pub text: String,
}

#[derive(Debug, Deserialize)]
pub struct JoinParticipantRequest {
    pub name: String,
    #[serde(default = "default_role")]
    pub role: Role,
}

fn default_role() -> Role {
    Role::Viewer
}

#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub session_id: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Map a core error to an HTTP status code
fn error_response(e: StreamError) -> Response {
    let status = match &e {
        StreamError::InvalidConfig(_)
        | StreamError::UnknownGesture(_)
        | StreamError::FeatureDisabled(_) => StatusCode::BAD_REQUEST,
        StreamError::SessionNotFound(_) => StatusCode::NOT_FOUND,
        StreamError::SessionTerminated { .. } => StatusCode::GONE,
        StreamError::InvalidTransition { .. }
        | StreamError::SessionNotLive(_)
        | StreamError::SubtitlesActive(_) => StatusCode::CONFLICT,
        StreamError::AvatarResolutionFailed(_)
        | StreamError::TransportFailure(_)
        | StreamError::RecognizerFailure(_) => StatusCode::BAD_GATEWAY,
    };

    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
        .into_response()
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /streams
/// Initialize a new broadcast session
pub async fn initialize_stream(
    State(state): State<AppState>,
    Json(config): Json<StreamConfig>,
) -> Response {
    info!("Initializing stream: \"{}\"", config.title);

    match state.manager.initialize_stream(config).await {
        Ok(view) => (StatusCode::CREATED, Json(view)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /streams/:session_id/start
pub async fn start_stream(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.manager.start_stream(&session_id).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /streams/:session_id/stop
pub async fn stop_stream(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.manager.stop_stream(&session_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(AckResponse {
                session_id,
                status: "ended".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /streams/:session_id/pause
pub async fn pause_stream(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.manager.pause_stream(&session_id).await {
        Ok(()) => (
            StatusCode::OK,
            Json(AckResponse {
                session_id,
                status: "paused".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// PATCH /streams/:session_id/settings
pub async fn update_settings(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(update): Json<StreamConfigUpdate>,
) -> Response {
    match state.manager.update_stream_settings(&session_id, update).await {
        Ok(()) => (
            StatusCode::OK,
            Json(AckResponse {
                session_id,
                status: "updated".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /streams/:session_id/expression
pub async fn update_expression(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<ExpressionRequest>,
) -> Response {
    match state
        .manager
        .update_avatar_expression(&session_id, &req.expression)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /streams/:session_id/gesture
pub async fn trigger_gesture(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<GestureRequest>,
) -> Response {
    match state
        .manager
        .trigger_avatar_gesture(&session_id, &req.gesture)
        .await
    {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /streams/:session_id/subtitles
pub async fn enable_subtitles(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(options): Json<SubtitleOptions>,
) -> Response {
    match state.manager.enable_subtitles(&session_id, options).await {
        Ok(()) => (
            StatusCode::OK,
            Json(AckResponse {
                session_id,
                status: "subtitles enabled".to_string(),
            }),
        )
            .into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /streams/:session_id/subtitles
pub async fn get_subtitles(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.manager.subtitle_history(&session_id).await {
        Ok(lines) => (StatusCode::OK, Json(lines)).into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /streams/:session_id/voice-command
///
/// Always 200: an unrecognized command is a successful response with
/// `success: false`, not an HTTP error.
pub async fn process_voice_command(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<VoiceCommandRequest>,
) -> Response {
    let result = state
        .manager
        .process_voice_command(&session_id, &req.text)
        .await;

    (StatusCode::OK, Json(result)).into_response()
}

/// POST /streams/:session_id/speak
pub async fn speak(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<SpeakRequest>,
) -> Response {
    match state.manager.speak(&session_id, &req.text).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => error_response(e),
    }
}

/// POST /streams/:session_id/participants
pub async fn join_participant(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    Json(req): Json<JoinParticipantRequest>,
) -> Response {
    match state
        .manager
        .join_participant(&session_id, req.name, req.role)
        .await
    {
        Ok(participant) => (StatusCode::CREATED, Json(participant)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /streams/:session_id
pub async fn get_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.manager.session_view(&session_id).await {
        Ok(view) => (StatusCode::OK, Json(view)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /streams/:session_id/status
pub async fn get_status(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Response {
    match state.manager.stream_status(&session_id).await {
        Ok(status) => (StatusCode::OK, Json(status)).into_response(),
        Err(e) => error_response(e),
    }
}

/// GET /health
/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}
