//! Voice command interpreter
//!
//! Deterministic keyword matching over free-text input. Interpretation is a
//! pure function of the text and the fixed rule table; routing the resolved
//! action against a session happens in the session manager.

use serde::Serialize;

/// Action resolved from a voice command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoiceAction {
    Gesture(&'static str),
    Expression(&'static str),
    Unknown,
}

/// Keyword rules evaluated in priority order; the first rule whose keyword
/// appears in the input wins.
const RULES: &[(&[&str], VoiceAction)] = &[
    (&["wave", "hello"], VoiceAction::Gesture("wave")),
    (&["smile"], VoiceAction::Expression("smile")),
    (&["thumbs up"], VoiceAction::Gesture("thumbs-up")),
];

/// Case-insensitive interpretation of a free-text voice command.
pub fn interpret(text: &str) -> VoiceAction {
    let lower = text.to_lowercase();

    for (keywords, action) in RULES {
        if keywords.iter().any(|k| lower.contains(k)) {
            return *action;
        }
    }

    VoiceAction::Unknown
}

/// Outcome of processing a voice command. A non-match is a successful result
/// with `success: false`, never an error.
#[derive(Debug, Clone, Serialize)]
pub struct CommandResult {
    pub success: bool,
    pub action: String,
    pub payload: Option<String>,
    pub error: Option<String>,
}

impl CommandResult {
    pub fn resolved(action: &str, payload: &str) -> Self {
        Self {
            success: true,
            action: action.to_string(),
            payload: Some(payload.to_string()),
            error: None,
        }
    }

    pub fn failed(action: &str, payload: &str, error: String) -> Self {
        Self {
            success: false,
            action: action.to_string(),
            payload: Some(payload.to_string()),
            error: Some(error),
        }
    }

    pub fn unknown() -> Self {
        Self {
            success: false,
            action: "unknown".to_string(),
            payload: None,
            error: Some("Command not recognized".to_string()),
        }
    }
}
