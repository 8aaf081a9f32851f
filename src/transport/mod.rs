//! Realtime transport collaborator boundary
//!
//! The transport owns the audio/video connection and the livestream
//! publish/unpublish operation. The core only sees the trait below plus the
//! capability flags it forwards from the session's feature set.

use crate::session::StreamConfig;
use anyhow::Result;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tracing::info;

/// Capability flags consumed by the transport adapter; opaque to the core.
#[derive(Debug, Clone, Copy, Default)]
pub struct TransportCapabilities {
    pub recording: bool,
    pub screen_sharing: bool,
}

/// Result of a successful publish.
#[derive(Debug, Clone)]
pub struct PublishedStream {
    pub url: String,
}

#[async_trait::async_trait]
pub trait RealtimeTransport: Send + Sync {
    /// Start publishing the session. Returns the public stream URL.
    async fn publish(&self, config: &StreamConfig) -> Result<PublishedStream>;

    /// Stop publishing. Must tolerate being called when nothing is live.
    async fn unpublish(&self) -> Result<()>;
}

/// Creates one transport connection per session.
pub trait TransportFactory: Send + Sync {
    fn connect(
        &self,
        session_id: &str,
        capabilities: TransportCapabilities,
    ) -> Result<Arc<dyn RealtimeTransport>>;
}

/// In-process transport that serves a deterministic URL, standing in for a
/// real RTMP/WebRTC backend.
pub struct SimulatedTransport {
    session_id: String,
    capabilities: TransportCapabilities,
    publishing: AtomicBool,
}

impl SimulatedTransport {
    pub fn new(session_id: String, capabilities: TransportCapabilities) -> Self {
        Self {
            session_id,
            capabilities,
            publishing: AtomicBool::new(false),
        }
    }
}

#[async_trait::async_trait]
impl RealtimeTransport for SimulatedTransport {
    async fn publish(&self, config: &StreamConfig) -> Result<PublishedStream> {
        self.publishing.store(true, Ordering::SeqCst);

        info!(
            "Publishing session {} (\"{}\", recording={}, screen_sharing={})",
            self.session_id, config.title, self.capabilities.recording, self.capabilities.screen_sharing
        );

        Ok(PublishedStream {
            url: format!("https://streams.avatarcast.dev/live/{}", self.session_id),
        })
    }

    async fn unpublish(&self) -> Result<()> {
        if self.publishing.swap(false, Ordering::SeqCst) {
            info!("Unpublished session {}", self.session_id);
        }
        Ok(())
    }
}

pub struct SimulatedTransportFactory;

impl TransportFactory for SimulatedTransportFactory {
    fn connect(
        &self,
        session_id: &str,
        capabilities: TransportCapabilities,
    ) -> Result<Arc<dyn RealtimeTransport>> {
        Ok(Arc::new(SimulatedTransport::new(
            session_id.to_string(),
            capabilities,
        )))
    }
}
