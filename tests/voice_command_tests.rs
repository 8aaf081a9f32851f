// Integration tests for the voice command interpreter and its routing
//
// Interpretation is a pure keyword match; processing a command never returns
// an error, only a result describing what happened.

mod support;

use avatarcast::{interpret, VoiceAction};
use support::{harness, sample_config};

#[test]
fn test_interpret_keywords() {
    assert_eq!(interpret("please wave to everyone"), VoiceAction::Gesture("wave"));
    assert_eq!(interpret("say hello"), VoiceAction::Gesture("wave"));
    assert_eq!(interpret("give me a smile"), VoiceAction::Expression("smile"));
    assert_eq!(interpret("thumbs up for that"), VoiceAction::Gesture("thumbs-up"));
    assert_eq!(interpret("do a backflip"), VoiceAction::Unknown);
    assert_eq!(interpret(""), VoiceAction::Unknown);
}

#[test]
fn test_interpret_is_case_insensitive() {
    assert_eq!(interpret("WAVE"), VoiceAction::Gesture("wave"));
    assert_eq!(interpret("Thumbs Up"), VoiceAction::Gesture("thumbs-up"));
    assert_eq!(interpret("SMILE!"), VoiceAction::Expression("smile"));
}

#[test]
fn test_interpret_rule_priority() {
    // The wave rule is evaluated first, so it wins over smile and thumbs up
    // when multiple keywords appear in one command.
    assert_eq!(interpret("smile and wave"), VoiceAction::Gesture("wave"));
    assert_eq!(interpret("hello, thumbs up"), VoiceAction::Gesture("wave"));
    // Without a wave keyword, smile outranks thumbs up.
    assert_eq!(interpret("smile and thumbs up"), VoiceAction::Expression("smile"));
}

#[tokio::test]
async fn test_command_routes_gesture_on_live_session() {
    let h = harness();
    let view = h.manager.initialize_stream(sample_config()).await.unwrap();
    h.manager.start_stream(&view.id).await.unwrap();

    let result = h.manager.process_voice_command(&view.id, "wave hello").await;

    assert!(result.success);
    assert_eq!(result.action, "gesture");
    assert_eq!(result.payload.as_deref(), Some("wave"));
    assert!(result.error.is_none());
    assert_eq!(h.agent.gestures(), vec!["Wave"]);
}

#[tokio::test]
async fn test_command_routes_expression_on_live_session() {
    let h = harness();
    let view = h.manager.initialize_stream(sample_config()).await.unwrap();
    h.manager.start_stream(&view.id).await.unwrap();

    let result = h.manager.process_voice_command(&view.id, "smile please").await;

    assert!(result.success);
    assert_eq!(result.action, "expression");
    assert_eq!(result.payload.as_deref(), Some("smile"));
    assert_eq!(h.agent.expressions(), vec!["smile"]);
}

#[tokio::test]
async fn test_unrecognized_command_is_not_an_error() {
    let h = harness();
    let view = h.manager.initialize_stream(sample_config()).await.unwrap();
    h.manager.start_stream(&view.id).await.unwrap();

    let result = h.manager.process_voice_command(&view.id, "open the pod bay doors").await;

    assert!(!result.success);
    assert_eq!(result.action, "unknown");
    assert!(result.payload.is_none());
    assert!(result.error.is_some());
    assert!(h.agent.gestures().is_empty());
    assert!(h.agent.expressions().is_empty());
}

#[tokio::test]
async fn test_command_on_non_live_session_reports_failure() {
    let h = harness();
    let view = h.manager.initialize_stream(sample_config()).await.unwrap();

    let result = h.manager.process_voice_command(&view.id, "wave").await;

    assert!(!result.success);
    assert_eq!(result.action, "gesture");
    assert_eq!(result.payload.as_deref(), Some("wave"));
    assert!(result.error.is_some(), "Routing failure comes back in the result");
    assert!(h.agent.gestures().is_empty());
}

#[tokio::test]
async fn test_command_on_unknown_session_reports_failure() {
    let h = harness();

    let result = h.manager.process_voice_command("session-missing", "wave").await;

    assert!(!result.success);
    assert_eq!(result.action, "gesture");
    assert!(result.error.is_some());
}
