use thiserror::Error;

/// Errors surfaced by the session orchestration core.
///
/// Collaborator failures (`AvatarResolutionFailed`, `TransportFailure`,
/// `RecognizerFailure`) drive the session to its terminal `error` state when
/// they are structural; local failures such as a single synthesis call are
/// logged and recovered internally and never appear here.
#[derive(Debug, Error)]
pub enum StreamError {
    #[error("invalid stream config: {0}")]
    InvalidConfig(String),

    #[error("session not found: {0}")]
    SessionNotFound(String),

    #[error("session {id} is terminated ({state})")]
    SessionTerminated { id: String, state: &'static str },

    #[error("cannot {op} while session is {state}")]
    InvalidTransition {
        op: &'static str,
        state: &'static str,
    },

    #[error("session {0} is not live")]
    SessionNotLive(String),

    #[error("unknown gesture: {0}")]
    UnknownGesture(String),

    #[error("avatar resolution failed: {0}")]
    AvatarResolutionFailed(String),

    #[error("transport failure: {0}")]
    TransportFailure(String),

    #[error("speech recognizer failure: {0}")]
    RecognizerFailure(String),

    #[error("subtitles already active for session {0}")]
    SubtitlesActive(String),

    #[error("feature not enabled for this session: {0}")]
    FeatureDisabled(&'static str),
}

pub type Result<T> = std::result::Result<T, StreamError>;
