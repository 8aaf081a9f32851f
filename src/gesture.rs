//! Gesture/expression routing
//!
//! Translates semantic gesture ids into avatar animation names against a
//! static table. Unknown ids are rejected here rather than forwarded to the
//! avatar agent.

use crate::avatar::AvatarAgent;
use crate::error::{Result, StreamError};
use tracing::warn;

/// Canonical gesture ids mapped to avatar animation names.
const GESTURES: &[(&str, &str)] = &[
    ("wave", "Wave"),
    ("thumbs-up", "ThumbsUp"),
    ("heart", "Heart"),
    ("excited", "Excited"),
    ("smile", "Smile"),
];

/// Routes gesture and expression commands to a session's avatar agent.
pub struct GestureRouter;

impl GestureRouter {
    /// Look up the animation for a gesture id; `UnknownGesture` otherwise.
    pub fn animation_for(&self, gesture_id: &str) -> Result<&'static str> {
        GESTURES
            .iter()
            .find(|(id, _)| *id == gesture_id)
            .map(|(_, animation)| *animation)
            .ok_or_else(|| StreamError::UnknownGesture(gesture_id.to_string()))
    }

    /// Fire a gesture at the agent. A rejected command is logged and
    /// swallowed: gesture playback is cosmetic and never aborts a session.
    pub async fn trigger_gesture(&self, agent: &dyn AvatarAgent, gesture_id: &str) -> Result<()> {
        let animation = self.animation_for(gesture_id)?;

        if let Err(e) = agent.trigger_gesture(animation).await {
            warn!("Avatar agent rejected gesture {}: {}", gesture_id, e);
        }

        Ok(())
    }

    /// Update the avatar's persistent expression.
    pub async fn update_expression(&self, agent: &dyn AvatarAgent, expression: &str) -> Result<()> {
        if let Err(e) = agent.update_expression(expression).await {
            warn!("Avatar agent rejected expression {}: {}", expression, e);
        }

        Ok(())
    }
}
