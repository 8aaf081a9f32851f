//! Session orchestration core
//!
//! This module owns the authoritative session registry and the per-session
//! lifecycle state machine:
//! - `StreamConfig` / `FeatureFlags` / `VoiceProfile` — session configuration
//! - `StreamSession` — one broadcast, its bound collaborators and status
//! - `SessionManager` — registry plus every public operation
//! - `SubtitleHistory` — bounded window over recognizer output

mod config;
mod manager;
mod session;
mod status;

pub use config::{
    FeatureFlags, StreamConfig, StreamConfigUpdate, Visibility, VoiceProfile, VoiceSettings,
};
pub use manager::{CollaboratorRegistry, SessionManager};
pub use session::{StreamSession, StreamSessionView};
pub use status::{
    Participant, Role, StreamQuality, StreamState, StreamStatus, SubtitleHistory,
};
