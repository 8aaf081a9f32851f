use anyhow::Result;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct Config {
    pub service: ServiceConfig,
    #[serde(default)]
    pub stream: StreamDefaults,
}

#[derive(Debug, Deserialize)]
pub struct ServiceConfig {
    pub name: String,
    pub http: HttpConfig,
}

#[derive(Debug, Deserialize)]
pub struct HttpConfig {
    pub bind: String,
    pub port: u16,
}

/// Process-wide defaults applied to every new session.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct StreamDefaults {
    /// Output resolution label reported in the quality descriptor
    pub resolution: String,

    /// Target bitrate in kbps
    pub bitrate: u32,

    /// Target frames per second
    pub fps: u32,

    /// Expected end-to-end latency in milliseconds
    pub latency_ms: u32,

    /// How often the telemetry tick pushes viewer/quality samples
    pub telemetry_interval_secs: u64,

    /// How many subtitle lines each session retains
    pub subtitle_window: usize,
}

impl Default for StreamDefaults {
    fn default() -> Self {
        Self {
            resolution: "1080p".to_string(),
            bitrate: 2500,
            fps: 30,
            latency_ms: 100,
            telemetry_interval_secs: 3,
            subtitle_window: 5,
        }
    }
}

impl Config {
    pub fn load(path: &str) -> Result<Self> {
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .build()?;

        Ok(settings.try_deserialize()?)
    }
}
