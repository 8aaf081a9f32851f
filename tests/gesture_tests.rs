// Integration tests for gesture and expression routing
//
// Gestures map to avatar animations through a fixed table and require a live
// session; unknown gesture ids are rejected in every state.

mod support;

use avatarcast::{GestureRouter, StreamError};
use support::{harness, sample_config};

#[test]
fn test_gesture_animation_table() {
    let router = GestureRouter;

    for (gesture, animation) in [
        ("wave", "Wave"),
        ("thumbs-up", "ThumbsUp"),
        ("heart", "Heart"),
        ("excited", "Excited"),
        ("smile", "Smile"),
    ] {
        assert_eq!(router.animation_for(gesture).unwrap(), animation);
    }
}

#[test]
fn test_unknown_gesture_id() {
    let err = GestureRouter.animation_for("backflip").unwrap_err();
    assert!(matches!(err, StreamError::UnknownGesture(_)));
}

#[tokio::test]
async fn test_gesture_reaches_agent_when_live() {
    let h = harness();
    let view = h.manager.initialize_stream(sample_config()).await.unwrap();
    h.manager.start_stream(&view.id).await.unwrap();

    h.manager.trigger_avatar_gesture(&view.id, "wave").await.unwrap();
    h.manager.trigger_avatar_gesture(&view.id, "heart").await.unwrap();

    assert_eq!(h.agent.gestures(), vec!["Wave", "Heart"]);
}

#[tokio::test]
async fn test_gesture_requires_live_session() {
    let h = harness();
    let view = h.manager.initialize_stream(sample_config()).await.unwrap();

    let err = h
        .manager
        .trigger_avatar_gesture(&view.id, "wave")
        .await
        .unwrap_err();

    assert!(matches!(err, StreamError::SessionNotLive(_)));
    assert!(h.agent.gestures().is_empty());
}

#[tokio::test]
async fn test_unknown_gesture_rejected_in_any_state() {
    let h = harness();
    let view = h.manager.initialize_stream(sample_config()).await.unwrap();

    // Before start, while live, and after stop: same error.
    let err = h
        .manager
        .trigger_avatar_gesture(&view.id, "moonwalk")
        .await
        .unwrap_err();
    assert!(matches!(err, StreamError::UnknownGesture(_)));

    h.manager.start_stream(&view.id).await.unwrap();
    let err = h
        .manager
        .trigger_avatar_gesture(&view.id, "moonwalk")
        .await
        .unwrap_err();
    assert!(matches!(err, StreamError::UnknownGesture(_)));

    h.manager.stop_stream(&view.id).await.unwrap();
    let err = h
        .manager
        .trigger_avatar_gesture(&view.id, "moonwalk")
        .await
        .unwrap_err();
    assert!(matches!(err, StreamError::UnknownGesture(_)));
}

#[tokio::test]
async fn test_unknown_gesture_beats_unknown_session() {
    let h = harness();

    let err = h
        .manager
        .trigger_avatar_gesture("session-missing", "moonwalk")
        .await
        .unwrap_err();

    assert!(matches!(err, StreamError::UnknownGesture(_)));
}

#[tokio::test]
async fn test_expression_reaches_agent_when_live() {
    let h = harness();
    let view = h.manager.initialize_stream(sample_config()).await.unwrap();
    h.manager.start_stream(&view.id).await.unwrap();

    h.manager
        .update_avatar_expression(&view.id, "thinking")
        .await
        .unwrap();

    assert_eq!(h.agent.expressions(), vec!["thinking"]);
}

#[tokio::test]
async fn test_expression_rejected_while_paused() {
    let h = harness();
    let view = h.manager.initialize_stream(sample_config()).await.unwrap();
    h.manager.start_stream(&view.id).await.unwrap();
    h.manager.pause_stream(&view.id).await.unwrap();

    let err = h
        .manager
        .update_avatar_expression(&view.id, "smile")
        .await
        .unwrap_err();

    assert!(matches!(err, StreamError::SessionNotLive(_)));
}
