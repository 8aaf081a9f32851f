use super::AvatarModel;
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Command handle for the live avatar of one session.
///
/// Calls are fire-and-forget from the caller's point of view: they return
/// once the command is accepted, never waiting for animation playback.
#[async_trait::async_trait]
pub trait AvatarAgent: Send + Sync {
    async fn update_expression(&self, expression: &str) -> Result<()>;

    async fn trigger_gesture(&self, animation: &str) -> Result<()>;

    async fn set_lip_sync(&self, active: bool) -> Result<()>;
}

/// Creates an agent for a resolved avatar model.
pub trait AvatarAgentFactory: Send + Sync {
    fn agent_for(&self, model: &AvatarModel) -> Arc<dyn AvatarAgent>;
}

/// Agent that accepts every command and logs it, standing in for a real
/// rendering backend.
pub struct LoggingAgent {
    avatar_id: String,
}

impl LoggingAgent {
    pub fn new(avatar_id: String) -> Self {
        Self { avatar_id }
    }
}

#[async_trait::async_trait]
impl AvatarAgent for LoggingAgent {
    async fn update_expression(&self, expression: &str) -> Result<()> {
        info!("Avatar {} expression -> {}", self.avatar_id, expression);
        Ok(())
    }

    async fn trigger_gesture(&self, animation: &str) -> Result<()> {
        info!("Avatar {} gesture -> {}", self.avatar_id, animation);
        Ok(())
    }

    async fn set_lip_sync(&self, active: bool) -> Result<()> {
        info!("Avatar {} lip sync -> {}", self.avatar_id, active);
        Ok(())
    }
}

pub struct LoggingAgentFactory;

impl AvatarAgentFactory for LoggingAgentFactory {
    fn agent_for(&self, model: &AvatarModel) -> Arc<dyn AvatarAgent> {
        Arc::new(LoggingAgent::new(model.id.clone()))
    }
}
