//! Telemetry feed contract
//!
//! Viewer count and connection quality are pushed into session status on a
//! periodic tick while the session is live. The random-walk feed below is an
//! explicit placeholder; a production deployment swaps in a real metrics
//! source behind the same trait.

use rand::Rng;
use serde::Serialize;

/// One telemetry sample pushed into a session's status.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StreamTelemetry {
    pub viewer_count: u32,

    /// Connection health score, kept within [60, 100]
    pub connection_quality: u8,
}

impl Default for StreamTelemetry {
    fn default() -> Self {
        Self {
            viewer_count: 0,
            connection_quality: 85,
        }
    }
}

/// Source of telemetry samples. Implementations derive the next sample from
/// the current one; the orchestrator never special-cases any implementation.
pub trait MetricsFeed: Send + Sync {
    fn sample(&self, current: StreamTelemetry) -> StreamTelemetry;
}

/// Bounded random walk: viewer count moves by -2..=3 and is clamped at zero,
/// quality moves by -10..=10 and is clamped to [60, 100].
pub struct RandomWalkFeed;

impl MetricsFeed for RandomWalkFeed {
    fn sample(&self, current: StreamTelemetry) -> StreamTelemetry {
        let mut rng = rand::thread_rng();

        let viewer_delta: i64 = rng.gen_range(-2..=3);
        let viewer_count = (current.viewer_count as i64 + viewer_delta).max(0) as u32;

        let quality_delta: i32 = rng.gen_range(-10..=10);
        let connection_quality =
            (current.connection_quality as i32 + quality_delta).clamp(60, 100) as u8;

        StreamTelemetry {
            viewer_count,
            connection_quality,
        }
    }
}
