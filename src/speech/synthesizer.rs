use crate::session::VoiceProfile;
use anyhow::Result;
use std::sync::Arc;
use tracing::{info, warn};

/// Text-to-speech collaborator. `speak` returns once the utterance has been
/// handed to the synthesis backend, not when playback finishes.
#[async_trait::async_trait]
pub trait VoiceSynthesizer: Send + Sync {
    async fn speak(&self, text: &str, profile: &VoiceProfile) -> Result<()>;

    /// Backend name for logging
    fn name(&self) -> &str;
}

/// Synthesizer that logs utterances instead of producing audio, standing in
/// for a real provider.
pub struct LocalSynthesizer;

#[async_trait::async_trait]
impl VoiceSynthesizer for LocalSynthesizer {
    async fn speak(&self, text: &str, profile: &VoiceProfile) -> Result<()> {
        info!(
            "Speaking with voice {} ({}): \"{}\"",
            profile.voice_id, profile.provider, text
        );
        Ok(())
    }

    fn name(&self) -> &str {
        "local"
    }
}

/// Primary synthesizer with an internal fallback: a failed primary call is
/// logged and retried against the fallback, never surfaced to the session.
pub struct FallbackSynthesizer {
    primary: Arc<dyn VoiceSynthesizer>,
    fallback: Arc<dyn VoiceSynthesizer>,
}

impl FallbackSynthesizer {
    pub fn new(primary: Arc<dyn VoiceSynthesizer>, fallback: Arc<dyn VoiceSynthesizer>) -> Self {
        Self { primary, fallback }
    }
}

#[async_trait::async_trait]
impl VoiceSynthesizer for FallbackSynthesizer {
    async fn speak(&self, text: &str, profile: &VoiceProfile) -> Result<()> {
        match self.primary.speak(text, profile).await {
            Ok(()) => Ok(()),
            Err(e) => {
                warn!(
                    "Synthesis via {} failed ({}), falling back to {}",
                    self.primary.name(),
                    e,
                    self.fallback.name()
                );
                self.fallback.speak(text, profile).await
            }
        }
    }

    fn name(&self) -> &str {
        "fallback"
    }
}
