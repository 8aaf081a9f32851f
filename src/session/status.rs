use crate::speech::SubtitleLine;
use crate::telemetry::StreamTelemetry;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Lifecycle state of a session.
///
/// `Ended` and `Error` are terminal: no further transitions are accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StreamState {
    Initializing,
    Live,
    Paused,
    Ended,
    Error,
}

impl StreamState {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamState::Initializing => "initializing",
            StreamState::Live => "live",
            StreamState::Paused => "paused",
            StreamState::Ended => "ended",
            StreamState::Error => "error",
        }
    }

    pub fn is_terminal(self) -> bool {
        matches!(self, StreamState::Ended | StreamState::Error)
    }
}

/// Static quality descriptor for a session's output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamQuality {
    pub resolution: String,
    pub bitrate: u32,
    pub fps: u32,
    pub latency_ms: u32,
}

/// Point-in-time status of a session.
#[derive(Debug, Clone, Serialize)]
pub struct StreamStatus {
    pub state: StreamState,
    pub viewer_count: u32,
    pub connection_quality: u8,

    /// Elapsed live time; monotonic non-decreasing while live
    pub duration_secs: f64,

    pub quality: StreamQuality,

    /// Present only once the session has gone live
    pub url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Host,
    Moderator,
    Viewer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub role: Role,
    pub joined_at: DateTime<Utc>,
    pub active: bool,
}

/// Bounded window over recent subtitle lines, keyed by id.
///
/// A line whose id matches an existing entry replaces it in place, so an
/// interim line is superseded by its final counterpart instead of appearing
/// twice. Oldest lines fall off once the window is full.
#[derive(Debug)]
pub struct SubtitleHistory {
    window: usize,
    lines: VecDeque<SubtitleLine>,
}

impl SubtitleHistory {
    pub fn new(window: usize) -> Self {
        Self {
            window,
            lines: VecDeque::with_capacity(window),
        }
    }

    pub fn push(&mut self, line: SubtitleLine) {
        if let Some(existing) = self.lines.iter_mut().find(|l| l.id == line.id) {
            *existing = line;
            return;
        }

        self.lines.push_back(line);
        while self.lines.len() > self.window {
            self.lines.pop_front();
        }
    }

    pub fn lines(&self) -> Vec<SubtitleLine> {
        self.lines.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Internal lifecycle record guarded by the session's state lock.
#[derive(Debug)]
pub(crate) struct Lifecycle {
    pub state: StreamState,
    pub url: Option<String>,
    pub telemetry: StreamTelemetry,
    pub accumulated: std::time::Duration,
    pub live_since: Option<std::time::Instant>,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            state: StreamState::Initializing,
            url: None,
            telemetry: StreamTelemetry::default(),
            accumulated: std::time::Duration::ZERO,
            live_since: None,
        }
    }

    pub fn duration_secs(&self) -> f64 {
        let mut total = self.accumulated;
        if let Some(since) = self.live_since {
            total += since.elapsed();
        }
        total.as_secs_f64()
    }
}
