// Shared in-memory collaborator doubles for integration tests.

#![allow(dead_code)]

use anyhow::{bail, Result};
use avatarcast::avatar::{
    AvatarAgent, AvatarAgentFactory, AvatarCatalog, AvatarModel, BuiltinCatalog, CachedCatalog,
};
use avatarcast::speech::{
    LocalSynthesizer, RecognizerFactory, RecognizerHandle, SpeechRecognizer, SubtitleLine,
    SubtitleOptions,
};
use avatarcast::telemetry::{MetricsFeed, RandomWalkFeed, StreamTelemetry};
use avatarcast::transport::{
    PublishedStream, RealtimeTransport, TransportCapabilities, TransportFactory,
};
use avatarcast::{
    CollaboratorRegistry, FeatureFlags, SessionManager, StreamConfig, StreamDefaults, Visibility,
    VoiceProfile, VoiceSettings,
};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

/// Transport double that counts publish/unpublish calls and can be told to
/// refuse publishing.
#[derive(Default)]
pub struct RecordingTransport {
    pub publishes: AtomicUsize,
    pub unpublishes: AtomicUsize,
    pub fail_publish: AtomicBool,
}

impl RecordingTransport {
    pub fn publish_count(&self) -> usize {
        self.publishes.load(Ordering::SeqCst)
    }

    pub fn unpublish_count(&self) -> usize {
        self.unpublishes.load(Ordering::SeqCst)
    }

    pub fn refuse_publish(&self) {
        self.fail_publish.store(true, Ordering::SeqCst);
    }
}

#[async_trait::async_trait]
impl RealtimeTransport for RecordingTransport {
    async fn publish(&self, _config: &StreamConfig) -> Result<PublishedStream> {
        if self.fail_publish.load(Ordering::SeqCst) {
            bail!("publish refused");
        }
        self.publishes.fetch_add(1, Ordering::SeqCst);
        Ok(PublishedStream {
            url: "https://streams.test/live".to_string(),
        })
    }

    async fn unpublish(&self) -> Result<()> {
        self.unpublishes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

pub struct SharedTransportFactory(pub Arc<RecordingTransport>);

impl TransportFactory for SharedTransportFactory {
    fn connect(
        &self,
        _session_id: &str,
        _capabilities: TransportCapabilities,
    ) -> Result<Arc<dyn RealtimeTransport>> {
        Ok(Arc::clone(&self.0) as Arc<dyn RealtimeTransport>)
    }
}

/// Avatar agent double that records every accepted command.
#[derive(Default)]
pub struct RecordingAgent {
    pub gestures: Mutex<Vec<String>>,
    pub expressions: Mutex<Vec<String>>,
}

impl RecordingAgent {
    pub fn gestures(&self) -> Vec<String> {
        self.gestures.lock().unwrap().clone()
    }

    pub fn expressions(&self) -> Vec<String> {
        self.expressions.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl AvatarAgent for RecordingAgent {
    async fn update_expression(&self, expression: &str) -> Result<()> {
        self.expressions.lock().unwrap().push(expression.to_string());
        Ok(())
    }

    async fn trigger_gesture(&self, animation: &str) -> Result<()> {
        self.gestures.lock().unwrap().push(animation.to_string());
        Ok(())
    }

    async fn set_lip_sync(&self, _active: bool) -> Result<()> {
        Ok(())
    }
}

pub struct SharedAgentFactory(pub Arc<RecordingAgent>);

impl AvatarAgentFactory for SharedAgentFactory {
    fn agent_for(&self, _model: &AvatarModel) -> Arc<dyn AvatarAgent> {
        Arc::clone(&self.0) as Arc<dyn AvatarAgent>
    }
}

/// Recognizer double: captures the sink so tests can feed lines by hand.
/// Enforces the single-subscriber contract the same way real backends do.
#[derive(Default)]
pub struct ManualRecognizer {
    active: Arc<AtomicBool>,
    sink: Mutex<Option<mpsc::Sender<SubtitleLine>>>,
    pub fail_start: AtomicBool,
}

impl ManualRecognizer {
    pub fn sender(&self) -> Option<mpsc::Sender<SubtitleLine>> {
        self.sink.lock().unwrap().clone()
    }

    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl SpeechRecognizer for ManualRecognizer {
    async fn start(
        &self,
        _options: SubtitleOptions,
        sink: mpsc::Sender<SubtitleLine>,
    ) -> Result<RecognizerHandle> {
        if self.fail_start.load(Ordering::SeqCst) {
            bail!("recognizer offline");
        }
        if self.active.swap(true, Ordering::SeqCst) {
            bail!("already subscribed");
        }

        *self.sink.lock().unwrap() = Some(sink);

        let task = tokio::spawn(std::future::pending::<()>());
        Ok(RecognizerHandle::new(Arc::clone(&self.active), task))
    }
}

pub struct SharedRecognizerFactory(pub Arc<ManualRecognizer>);

impl RecognizerFactory for SharedRecognizerFactory {
    fn recognizer_for(&self, _session_id: &str) -> Arc<dyn SpeechRecognizer> {
        Arc::clone(&self.0) as Arc<dyn SpeechRecognizer>
    }
}

/// Deterministic feed: one extra viewer per tick, fixed quality.
pub struct StepFeed;

impl MetricsFeed for StepFeed {
    fn sample(&self, current: StreamTelemetry) -> StreamTelemetry {
        StreamTelemetry {
            viewer_count: current.viewer_count + 1,
            connection_quality: 90,
        }
    }
}

/// Catalog double that counts how often the inner catalog is hit.
pub struct CountingCatalog {
    pub resolves: AtomicUsize,
}

#[async_trait::async_trait]
impl AvatarCatalog for CountingCatalog {
    async fn resolve(&self, avatar_id: &str) -> Result<AvatarModel> {
        self.resolves.fetch_add(1, Ordering::SeqCst);
        BuiltinCatalog.resolve(avatar_id).await
    }
}

pub struct Harness {
    pub manager: SessionManager,
    pub transport: Arc<RecordingTransport>,
    pub agent: Arc<RecordingAgent>,
    pub recognizer: Arc<ManualRecognizer>,
}

pub fn harness() -> Harness {
    harness_with_feed(Arc::new(RandomWalkFeed))
}

pub fn harness_with_feed(metrics: Arc<dyn MetricsFeed>) -> Harness {
    let transport = Arc::new(RecordingTransport::default());
    let agent = Arc::new(RecordingAgent::default());
    let recognizer = Arc::new(ManualRecognizer::default());

    let registry = CollaboratorRegistry {
        catalog: Arc::new(CachedCatalog::new(Arc::new(BuiltinCatalog))),
        transports: Arc::new(SharedTransportFactory(Arc::clone(&transport))),
        recognizers: Arc::new(SharedRecognizerFactory(Arc::clone(&recognizer))),
        synthesizer: Arc::new(LocalSynthesizer),
        agents: Arc::new(SharedAgentFactory(Arc::clone(&agent))),
        metrics,
    };

    let defaults = StreamDefaults {
        telemetry_interval_secs: 1,
        ..StreamDefaults::default()
    };

    Harness {
        manager: SessionManager::new(Arc::new(registry), defaults),
        transport,
        agent,
        recognizer,
    }
}

pub fn sample_config() -> StreamConfig {
    StreamConfig {
        title: "Physics 101".to_string(),
        description: "Introductory lecture".to_string(),
        visibility: Visibility::Public,
        avatar_id: "avatar-1".to_string(),
        voice: VoiceProfile {
            voice_id: "aria".to_string(),
            provider: "elevenlabs".to_string(),
            settings: VoiceSettings::default(),
        },
        features: FeatureFlags::default(),
    }
}

pub fn config_with(adjust: impl FnOnce(&mut StreamConfig)) -> StreamConfig {
    let mut config = sample_config();
    adjust(&mut config);
    config
}
