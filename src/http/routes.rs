use super::handlers;
use super::state::AppState;
use axum::{
    routing::{get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

/// Create the HTTP router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))
        // Session lifecycle
        .route("/streams", post(handlers::initialize_stream))
        .route("/streams/:session_id/start", post(handlers::start_stream))
        .route("/streams/:session_id/stop", post(handlers::stop_stream))
        .route("/streams/:session_id/pause", post(handlers::pause_stream))
        .route(
            "/streams/:session_id/settings",
            patch(handlers::update_settings),
        )
        // Avatar control
        .route(
            "/streams/:session_id/expression",
            post(handlers::update_expression),
        )
        .route(
            "/streams/:session_id/gesture",
            post(handlers::trigger_gesture),
        )
        // Subtitles and voice
        .route(
            "/streams/:session_id/subtitles",
            post(handlers::enable_subtitles).get(handlers::get_subtitles),
        )
        .route(
            "/streams/:session_id/voice-command",
            post(handlers::process_voice_command),
        )
        .route("/streams/:session_id/speak", post(handlers::speak))
        // Participants
        .route(
            "/streams/:session_id/participants",
            post(handlers::join_participant),
        )
        // Queries
        .route("/streams/:session_id", get(handlers::get_session))
        .route("/streams/:session_id/status", get(handlers::get_status))
        // Add tracing middleware for request logging
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
