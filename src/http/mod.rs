//! HTTP API server for external control (studio front-end)
//!
//! This module provides a REST API over the session orchestration core:
//! - POST /streams - Initialize a new session
//! - POST /streams/:id/start | stop | pause - Lifecycle control
//! - PATCH /streams/:id/settings - Pre-live settings update
//! - POST /streams/:id/expression | gesture - Avatar control
//! - POST /streams/:id/subtitles, GET /streams/:id/subtitles - Subtitles
//! - POST /streams/:id/voice-command | speak - Voice features
//! - GET /streams/:id, GET /streams/:id/status - Queries
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
