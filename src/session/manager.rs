use super::config::{StreamConfig, StreamConfigUpdate};
use super::session::{StreamSession, StreamSessionView};
use super::status::{Participant, Role, StreamQuality, StreamStatus};
use crate::avatar::{AvatarAgentFactory, AvatarCatalog};
use crate::command::{self, CommandResult, VoiceAction};
use crate::config::StreamDefaults;
use crate::error::{Result, StreamError};
use crate::gesture::GestureRouter;
use crate::speech::{RecognizerFactory, SubtitleLine, SubtitleOptions, VoiceSynthesizer};
use crate::telemetry::MetricsFeed;
use crate::transport::{TransportCapabilities, TransportFactory};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{info, warn};

/// Every external collaborator the orchestrator depends on, constructed once
/// and passed in — never reached through process-wide singletons.
pub struct CollaboratorRegistry {
    pub catalog: Arc<dyn AvatarCatalog>,
    pub transports: Arc<dyn TransportFactory>,
    pub recognizers: Arc<dyn RecognizerFactory>,
    pub synthesizer: Arc<dyn VoiceSynthesizer>,
    pub agents: Arc<dyn AvatarAgentFactory>,
    pub metrics: Arc<dyn MetricsFeed>,
}

impl CollaboratorRegistry {
    /// Registry wired with the simulated collaborators: built-in avatar
    /// catalog (cached), in-process transport, scripted recognizer, logging
    /// synthesizer and agent, random-walk telemetry.
    pub fn simulated() -> Self {
        use crate::avatar::{BuiltinCatalog, CachedCatalog, LoggingAgentFactory};
        use crate::speech::{LocalSynthesizer, ScriptedRecognizerFactory};
        use crate::telemetry::RandomWalkFeed;
        use crate::transport::SimulatedTransportFactory;

        Self {
            catalog: Arc::new(CachedCatalog::new(Arc::new(BuiltinCatalog))),
            transports: Arc::new(SimulatedTransportFactory),
            recognizers: Arc::new(ScriptedRecognizerFactory::default()),
            synthesizer: Arc::new(LocalSynthesizer),
            agents: Arc::new(LoggingAgentFactory),
            metrics: Arc::new(RandomWalkFeed),
        }
    }
}

/// Owns the authoritative session registry and drives every session through
/// its lifecycle. One instance per process.
///
/// The registry lock is held only for lookups and inserts; per-session
/// serialization lives inside [`StreamSession`], so operations on different
/// session ids never contend.
pub struct SessionManager {
    registry: Arc<CollaboratorRegistry>,
    sessions: RwLock<HashMap<String, Arc<StreamSession>>>,
    defaults: StreamDefaults,
    router: GestureRouter,
}

impl SessionManager {
    pub fn new(registry: Arc<CollaboratorRegistry>, defaults: StreamDefaults) -> Self {
        Self {
            registry,
            sessions: RwLock::new(HashMap::new()),
            defaults,
            router: GestureRouter,
        }
    }

    // ------------------------------------------------------------------
    // Lifecycle operations
    // ------------------------------------------------------------------

    /// Validate the config, resolve the avatar, provision the transport and
    /// feature-flagged collaborators, and store the session as
    /// `initializing`. Nothing publishes until `start_stream`.
    pub async fn initialize_stream(&self, config: StreamConfig) -> Result<StreamSessionView> {
        config.validate()?;

        let avatar = self
            .registry
            .catalog
            .resolve(&config.avatar_id)
            .await
            .map_err(|e| StreamError::AvatarResolutionFailed(format!("{e:#}")))?;

        let id = format!("session-{}", uuid::Uuid::new_v4());

        let capabilities = TransportCapabilities {
            recording: config.features.recording,
            screen_sharing: config.features.screen_sharing,
        };
        let transport = self
            .registry
            .transports
            .connect(&id, capabilities)
            .map_err(|e| StreamError::TransportFailure(format!("{e:#}")))?;

        let agent = self.registry.agents.agent_for(&avatar);

        let wants_subtitles = config.features.subtitles;

        let session = Arc::new(StreamSession::new(
            id.clone(),
            config,
            avatar,
            transport,
            agent,
            Arc::clone(&self.registry),
            self.quality(),
            Duration::from_secs(self.defaults.telemetry_interval_secs),
            self.defaults.subtitle_window,
        ));

        if wants_subtitles {
            // A recognizer that fails to bind degrades the session to
            // subtitle-less rather than failing initialization.
            if let Err(e) = session.bind_subtitles(SubtitleOptions::default()).await {
                warn!("Subtitle binding failed during init for {}: {}", id, e);
            }
        }

        {
            let mut sessions = self.sessions.write().await;
            sessions.insert(id.clone(), Arc::clone(&session));
        }

        info!("Initialized session {}", id);

        Ok(session.view().await)
    }

    pub async fn start_stream(&self, session_id: &str) -> Result<StreamStatus> {
        let session = self.get(session_id).await?;
        session.start().await
    }

    pub async fn stop_stream(&self, session_id: &str) -> Result<()> {
        let session = self.get(session_id).await?;
        session.stop().await
    }

    pub async fn pause_stream(&self, session_id: &str) -> Result<()> {
        let session = self.get(session_id).await?;
        session.pause().await
    }

    pub async fn update_stream_settings(
        &self,
        session_id: &str,
        update: StreamConfigUpdate,
    ) -> Result<()> {
        let session = self.get(session_id).await?;
        session.update_settings(update).await
    }

    // ------------------------------------------------------------------
    // Gesture / expression routing
    // ------------------------------------------------------------------

    /// Update the avatar's persistent expression; requires a live session.
    pub async fn update_avatar_expression(
        &self,
        session_id: &str,
        expression: &str,
    ) -> Result<()> {
        let session = self.get(session_id).await?;
        session.require_live().await?;

        let agent = session.agent().await;
        self.router.update_expression(agent.as_ref(), expression).await
    }

    /// Trigger a short-lived avatar gesture; requires a live session.
    /// Unknown gesture ids are rejected regardless of session state.
    pub async fn trigger_avatar_gesture(&self, session_id: &str, gesture_id: &str) -> Result<()> {
        // Validate the gesture id before anything else so an unknown id is
        // reported the same way in every session state.
        self.router.animation_for(gesture_id)?;

        let session = self.get(session_id).await?;
        session.require_live().await?;

        let agent = session.agent().await;
        self.router.trigger_gesture(agent.as_ref(), gesture_id).await
    }

    // ------------------------------------------------------------------
    // Voice commands
    // ------------------------------------------------------------------

    /// Interpret free text and route the resolved action. Never errors: a
    /// non-match or a routing failure comes back inside the result.
    pub async fn process_voice_command(&self, session_id: &str, text: &str) -> CommandResult {
        match command::interpret(text) {
            VoiceAction::Gesture(gesture) => {
                match self.trigger_avatar_gesture(session_id, gesture).await {
                    Ok(()) => CommandResult::resolved("gesture", gesture),
                    Err(e) => CommandResult::failed("gesture", gesture, e.to_string()),
                }
            }
            VoiceAction::Expression(expression) => {
                match self.update_avatar_expression(session_id, expression).await {
                    Ok(()) => CommandResult::resolved("expression", expression),
                    Err(e) => CommandResult::failed("expression", expression, e.to_string()),
                }
            }
            VoiceAction::Unknown => CommandResult::unknown(),
        }
    }

    // ------------------------------------------------------------------
    // Subtitles / synthesis / participants
    // ------------------------------------------------------------------

    pub async fn enable_subtitles(&self, session_id: &str, options: SubtitleOptions) -> Result<()> {
        let session = self.get(session_id).await?;
        session.bind_subtitles(options).await
    }

    pub async fn subtitle_history(&self, session_id: &str) -> Result<Vec<SubtitleLine>> {
        let session = self.get(session_id).await?;
        Ok(session.subtitles().await)
    }

    pub async fn speak(&self, session_id: &str, text: &str) -> Result<()> {
        let session = self.get(session_id).await?;
        session.speak(text).await
    }

    pub async fn join_participant(
        &self,
        session_id: &str,
        name: String,
        role: Role,
    ) -> Result<Participant> {
        let session = self.get(session_id).await?;
        Ok(session.join_participant(name, role).await)
    }

    pub async fn leave_participant(&self, session_id: &str, participant_id: &str) -> Result<bool> {
        let session = self.get(session_id).await?;
        Ok(session.leave_participant(participant_id).await)
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub async fn stream_status(&self, session_id: &str) -> Result<StreamStatus> {
        let session = self.get(session_id).await?;
        Ok(session.status().await)
    }

    pub async fn session_view(&self, session_id: &str) -> Result<StreamSessionView> {
        let session = self.get(session_id).await?;
        Ok(session.view().await)
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    async fn get(&self, session_id: &str) -> Result<Arc<StreamSession>> {
        let sessions = self.sessions.read().await;
        sessions
            .get(session_id)
            .cloned()
            .ok_or_else(|| StreamError::SessionNotFound(session_id.to_string()))
    }

    fn quality(&self) -> StreamQuality {
        StreamQuality {
            resolution: self.defaults.resolution.clone(),
            bitrate: self.defaults.bitrate,
            fps: self.defaults.fps,
            latency_ms: self.defaults.latency_ms,
        }
    }
}
