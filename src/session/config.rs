use crate::error::{Result, StreamError};
use serde::{Deserialize, Serialize};

/// Configuration for a broadcast session. Fixed once the session goes live,
/// except through `update_stream_settings` before the first start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    pub title: String,

    #[serde(default)]
    pub description: String,

    pub visibility: Visibility,

    /// Avatar to host the broadcast, resolved through the catalog
    pub avatar_id: String,

    pub voice: VoiceProfile,

    #[serde(default)]
    pub features: FeatureFlags,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Public,
    Private,
    Unlisted,
}

/// Feature flags that drive collaborator wiring at initialization.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FeatureFlags {
    pub subtitles: bool,
    pub ai_chat: bool,
    pub gesture_control: bool,
    pub voice_synthesis: bool,
    pub screen_sharing: bool,
    pub recording: bool,
}

/// Parameter set controlling synthesized speech timbre and delivery.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoiceProfile {
    pub voice_id: String,

    /// Provider tag (e.g. "elevenlabs", "browser")
    pub provider: String,

    #[serde(default)]
    pub settings: VoiceSettings,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct VoiceSettings {
    /// [0, 1]
    pub stability: f32,

    /// [0, 1]
    pub clarity: f32,

    /// Positive speed multiplier
    pub speed: f32,

    /// Positive pitch multiplier
    pub pitch: f32,
}

impl Default for VoiceSettings {
    fn default() -> Self {
        Self {
            stability: 0.5,
            clarity: 0.75,
            speed: 1.0,
            pitch: 1.0,
        }
    }
}

/// Partial settings update, merged field-by-field into a pre-live config.
/// Feature flags and the avatar id are deliberately absent: flags are wired
/// at initialization and the avatar cannot be swapped without re-resolution.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StreamConfigUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub visibility: Option<Visibility>,
    pub voice: Option<VoiceProfile>,
}

impl StreamConfig {
    /// Local validation; never reaches a collaborator.
    pub fn validate(&self) -> Result<()> {
        if self.avatar_id.trim().is_empty() {
            return Err(StreamError::InvalidConfig(
                "avatar id must not be empty".to_string(),
            ));
        }

        let s = &self.voice.settings;
        if !(0.0..=1.0).contains(&s.stability) {
            return Err(StreamError::InvalidConfig(format!(
                "voice stability {} outside [0, 1]",
                s.stability
            )));
        }
        if !(0.0..=1.0).contains(&s.clarity) {
            return Err(StreamError::InvalidConfig(format!(
                "voice clarity {} outside [0, 1]",
                s.clarity
            )));
        }
        if s.speed <= 0.0 {
            return Err(StreamError::InvalidConfig(format!(
                "voice speed {} must be positive",
                s.speed
            )));
        }
        if s.pitch <= 0.0 {
            return Err(StreamError::InvalidConfig(format!(
                "voice pitch {} must be positive",
                s.pitch
            )));
        }

        Ok(())
    }

    pub fn merge(&mut self, update: StreamConfigUpdate) {
        if let Some(title) = update.title {
            self.title = title;
        }
        if let Some(description) = update.description {
            self.description = description;
        }
        if let Some(visibility) = update.visibility {
            self.visibility = visibility;
        }
        if let Some(voice) = update.voice {
            self.voice = voice;
        }
    }
}
