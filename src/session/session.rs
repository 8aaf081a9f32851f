use super::config::{StreamConfig, StreamConfigUpdate};
use super::manager::CollaboratorRegistry;
use super::status::{
    Lifecycle, Participant, Role, StreamQuality, StreamState, StreamStatus, SubtitleHistory,
};
use crate::avatar::{AvatarAgent, AvatarModel};
use crate::error::{Result, StreamError};
use crate::speech::{RecognizerHandle, SubtitleLine, SubtitleOptions, VoiceSynthesizer};
use crate::transport::RealtimeTransport;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Collaborators bound to a session for its lifetime.
///
/// The synthesizer and recognizer slots are populated iff the corresponding
/// feature flag was set at initialization (or subtitles were enabled later).
struct Bindings {
    transport: Arc<dyn RealtimeTransport>,
    agent: Arc<dyn AvatarAgent>,
    synthesizer: Option<Arc<dyn VoiceSynthesizer>>,
    subscription: Option<RecognizerHandle>,
}

/// Serializable snapshot of a session returned to callers.
#[derive(Debug, Clone, Serialize)]
pub struct StreamSessionView {
    pub id: String,
    pub config: StreamConfig,
    pub avatar: AvatarModel,
    pub status: StreamStatus,
    pub participants: Vec<Participant>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One live avatar broadcast, from initialization through termination.
///
/// Lifecycle operations (`start`, `stop`, `pause`, `update_settings`) are
/// serialized per session through `op_lock`; the state lock itself is never
/// held across a collaborator call — state is validated, the external call
/// awaited, then the transition committed.
pub struct StreamSession {
    pub id: String,

    registry: Arc<CollaboratorRegistry>,

    created_at: DateTime<Utc>,
    updated_at: RwLock<DateTime<Utc>>,

    config: RwLock<StreamConfig>,
    avatar: AvatarModel,

    lifecycle: RwLock<Lifecycle>,
    participants: RwLock<Vec<Participant>>,
    subtitles: Arc<Mutex<SubtitleHistory>>,

    bindings: Mutex<Bindings>,

    /// Serializes lifecycle transitions on this session
    op_lock: Mutex<()>,

    /// Telemetry tick task, alive only while live
    tick: Mutex<Option<JoinHandle<()>>>,

    /// Consumer task draining recognizer lines into the history
    subtitle_task: Mutex<Option<JoinHandle<()>>>,

    /// Whether the transport has ever published this session
    published: AtomicBool,

    quality: StreamQuality,
    tick_interval: Duration,
}

impl StreamSession {
    pub(crate) fn new(
        id: String,
        config: StreamConfig,
        avatar: AvatarModel,
        transport: Arc<dyn RealtimeTransport>,
        agent: Arc<dyn AvatarAgent>,
        registry: Arc<CollaboratorRegistry>,
        quality: StreamQuality,
        tick_interval: Duration,
        subtitle_window: usize,
    ) -> Self {
        let now = Utc::now();

        let synthesizer = if config.features.voice_synthesis {
            Some(Arc::clone(&registry.synthesizer))
        } else {
            None
        };

        let host = Participant {
            id: "host".to_string(),
            name: avatar.name.clone(),
            role: Role::Host,
            joined_at: now,
            active: true,
        };

        Self {
            id,
            registry,
            created_at: now,
            updated_at: RwLock::new(now),
            config: RwLock::new(config),
            avatar,
            lifecycle: RwLock::new(Lifecycle::new()),
            participants: RwLock::new(vec![host]),
            subtitles: Arc::new(Mutex::new(SubtitleHistory::new(subtitle_window))),
            bindings: Mutex::new(Bindings {
                transport,
                agent,
                synthesizer,
                subscription: None,
            }),
            op_lock: Mutex::new(()),
            tick: Mutex::new(None),
            subtitle_task: Mutex::new(None),
            published: AtomicBool::new(false),
            quality,
            tick_interval,
        }
    }

    // ------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------

    pub async fn state(&self) -> StreamState {
        self.lifecycle.read().await.state
    }

    pub async fn status(&self) -> StreamStatus {
        let lc = self.lifecycle.read().await;
        self.build_status(&lc)
    }

    pub async fn view(&self) -> StreamSessionView {
        StreamSessionView {
            id: self.id.clone(),
            config: self.config.read().await.clone(),
            avatar: self.avatar.clone(),
            status: self.status().await,
            participants: self.participants.read().await.clone(),
            created_at: self.created_at,
            updated_at: *self.updated_at.read().await,
        }
    }

    pub async fn subtitles(&self) -> Vec<SubtitleLine> {
        self.subtitles.lock().await.lines()
    }

    pub(crate) async fn agent(&self) -> Arc<dyn AvatarAgent> {
        Arc::clone(&self.bindings.lock().await.agent)
    }

    pub(crate) async fn require_live(&self) -> Result<()> {
        match self.state().await {
            StreamState::Live => Ok(()),
            _ => Err(StreamError::SessionNotLive(self.id.clone())),
        }
    }

    fn build_status(&self, lc: &Lifecycle) -> StreamStatus {
        StreamStatus {
            state: lc.state,
            viewer_count: lc.telemetry.viewer_count,
            connection_quality: lc.telemetry.connection_quality,
            duration_secs: lc.duration_secs(),
            quality: self.quality.clone(),
            url: lc.url.clone(),
        }
    }

    async fn touch(&self) {
        *self.updated_at.write().await = Utc::now();
    }

    // ------------------------------------------------------------------
    // Lifecycle transitions
    // ------------------------------------------------------------------

    /// Flip the session live and begin publishing.
    ///
    /// Idempotent on an already-live session: returns the current status
    /// without a second publish. Resuming from `Paused` does not re-publish
    /// either; the transport connection stays up across a pause.
    pub async fn start(self: &Arc<Self>) -> Result<StreamStatus> {
        let _op = self.op_lock.lock().await;

        {
            let lc = self.lifecycle.read().await;
            match lc.state {
                StreamState::Live => return Ok(self.build_status(&lc)),
                StreamState::Ended | StreamState::Error => {
                    return Err(StreamError::SessionTerminated {
                        id: self.id.clone(),
                        state: lc.state.as_str(),
                    })
                }
                StreamState::Initializing | StreamState::Paused => {}
            }
        }

        if !self.published.load(Ordering::SeqCst) {
            let config = self.config.read().await.clone();
            let transport = Arc::clone(&self.bindings.lock().await.transport);

            // Publish without holding any session lock besides op_lock.
            match transport.publish(&config).await {
                Ok(stream) => {
                    self.published.store(true, Ordering::SeqCst);
                    let mut lc = self.lifecycle.write().await;
                    lc.state = StreamState::Live;
                    lc.url = Some(stream.url);
                    lc.live_since = Some(std::time::Instant::now());
                }
                Err(e) => {
                    warn!("Transport publish failed for session {}: {:#}", self.id, e);
                    {
                        let mut lc = self.lifecycle.write().await;
                        lc.state = StreamState::Error;
                    }
                    self.release_bindings().await;
                    self.touch().await;
                    return Err(StreamError::TransportFailure(format!("{e:#}")));
                }
            }
        } else {
            let mut lc = self.lifecycle.write().await;
            lc.state = StreamState::Live;
            lc.live_since = Some(std::time::Instant::now());
        }

        self.spawn_tick().await;
        self.touch().await;

        info!("Session {} is live", self.id);

        Ok(self.status().await)
    }

    /// Tear the session down into terminal `Ended`.
    ///
    /// A no-op on an already-terminal session. Unpublishes only if a publish
    /// ever happened; every bound collaborator is released even when earlier
    /// bindings failed, and the telemetry tick is cancelled before return.
    pub async fn stop(&self) -> Result<()> {
        let _op = self.op_lock.lock().await;

        {
            let mut lc = self.lifecycle.write().await;
            if lc.state.is_terminal() {
                return Ok(());
            }
            if let Some(since) = lc.live_since.take() {
                lc.accumulated += since.elapsed();
            }
            lc.state = StreamState::Ended;
        }

        // State is committed; a racing tick now observes non-live and
        // leaves the status untouched.
        self.cancel_tasks().await;

        let transport = {
            let mut bindings = self.bindings.lock().await;
            if let Some(subscription) = bindings.subscription.take() {
                subscription.cancel();
            }
            bindings.synthesizer = None;
            Arc::clone(&bindings.transport)
        };

        if self.published.swap(false, Ordering::SeqCst) {
            if let Err(e) = transport.unpublish().await {
                warn!("Unpublish failed for session {}: {:#}", self.id, e);
            }
        }

        self.touch().await;

        info!("Session {} ended", self.id);

        Ok(())
    }

    /// Suspend a live session without dropping the transport connection.
    pub async fn pause(&self) -> Result<()> {
        let _op = self.op_lock.lock().await;

        {
            let mut lc = self.lifecycle.write().await;
            match lc.state {
                StreamState::Live => {
                    if let Some(since) = lc.live_since.take() {
                        lc.accumulated += since.elapsed();
                    }
                    lc.state = StreamState::Paused;
                }
                StreamState::Ended | StreamState::Error => {
                    return Err(StreamError::SessionTerminated {
                        id: self.id.clone(),
                        state: lc.state.as_str(),
                    })
                }
                other => {
                    return Err(StreamError::InvalidTransition {
                        op: "pause",
                        state: other.as_str(),
                    })
                }
            }
        }

        if let Some(handle) = self.tick.lock().await.take() {
            handle.abort();
        }

        self.touch().await;

        info!("Session {} paused", self.id);

        Ok(())
    }

    /// Merge a partial settings update; only valid before the first start.
    pub async fn update_settings(&self, update: StreamConfigUpdate) -> Result<()> {
        let _op = self.op_lock.lock().await;

        let state = self.state().await;
        if state.is_terminal() {
            return Err(StreamError::SessionTerminated {
                id: self.id.clone(),
                state: state.as_str(),
            });
        }
        if state != StreamState::Initializing {
            return Err(StreamError::InvalidTransition {
                op: "update settings",
                state: state.as_str(),
            });
        }

        let mut config = self.config.write().await;
        let mut merged = config.clone();
        merged.merge(update);
        merged.validate()?;
        *config = merged;
        drop(config);

        self.touch().await;

        Ok(())
    }

    // ------------------------------------------------------------------
    // Feature bindings
    // ------------------------------------------------------------------

    /// Bind the speech recognizer and drain its lines into the bounded
    /// history. Rejected while another subscription is active.
    pub async fn bind_subtitles(&self, options: SubtitleOptions) -> Result<()> {
        let state = self.state().await;
        if state.is_terminal() {
            return Err(StreamError::SessionTerminated {
                id: self.id.clone(),
                state: state.as_str(),
            });
        }

        let mut bindings = self.bindings.lock().await;
        if bindings.subscription.is_some() {
            return Err(StreamError::SubtitlesActive(self.id.clone()));
        }

        let recognizer = self.registry.recognizers.recognizer_for(&self.id);
        let (tx, mut rx) = mpsc::channel::<SubtitleLine>(64);

        let handle = recognizer
            .start(options, tx)
            .await
            .map_err(|e| StreamError::RecognizerFailure(format!("{e:#}")))?;

        let history = Arc::clone(&self.subtitles);
        let consumer = tokio::spawn(async move {
            while let Some(line) = rx.recv().await {
                history.lock().await.push(line);
            }
        });

        bindings.subscription = Some(handle);
        drop(bindings);

        *self.subtitle_task.lock().await = Some(consumer);

        info!("Subtitles bound for session {}", self.id);

        Ok(())
    }

    /// Route text through the bound synthesizer with the session's voice
    /// profile. A failed synthesis call is logged, never fatal.
    pub async fn speak(&self, text: &str) -> Result<()> {
        let synthesizer = self
            .bindings
            .lock()
            .await
            .synthesizer
            .clone()
            .ok_or(StreamError::FeatureDisabled("voice_synthesis"))?;

        let profile = self.config.read().await.voice.clone();

        if let Err(e) = synthesizer.speak(text, &profile).await {
            warn!("Synthesis failed for session {}: {:#}", self.id, e);
        }

        Ok(())
    }

    // ------------------------------------------------------------------
    // Participants
    // ------------------------------------------------------------------

    pub async fn join_participant(&self, name: String, role: Role) -> Participant {
        let participant = Participant {
            id: format!("participant-{}", uuid::Uuid::new_v4()),
            name,
            role,
            joined_at: Utc::now(),
            active: true,
        };

        self.participants.write().await.push(participant.clone());
        self.touch().await;

        participant
    }

    pub async fn leave_participant(&self, participant_id: &str) -> bool {
        let mut participants = self.participants.write().await;
        match participants
            .iter_mut()
            .find(|p| p.id == participant_id && p.active)
        {
            Some(participant) => {
                participant.active = false;
                true
            }
            None => false,
        }
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    async fn spawn_tick(self: &Arc<Self>) {
        let session = Arc::clone(self);

        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(session.tick_interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            // interval fires immediately; skip the zeroth tick
            ticker.tick().await;

            loop {
                ticker.tick().await;

                let mut lc = session.lifecycle.write().await;
                if lc.state != StreamState::Live {
                    break;
                }
                lc.telemetry = session.registry.metrics.sample(lc.telemetry);
            }
        });

        *self.tick.lock().await = Some(handle);
    }

    async fn cancel_tasks(&self) {
        if let Some(handle) = self.tick.lock().await.take() {
            handle.abort();
        }
        if let Some(handle) = self.subtitle_task.lock().await.take() {
            handle.abort();
        }
    }

    /// Release collaborator bindings after a fatal provisioning failure.
    /// Order-independent and tolerant of bindings that never existed.
    async fn release_bindings(&self) {
        self.cancel_tasks().await;

        let mut bindings = self.bindings.lock().await;
        if let Some(subscription) = bindings.subscription.take() {
            subscription.cancel();
        }
        bindings.synthesizer = None;
    }
}
