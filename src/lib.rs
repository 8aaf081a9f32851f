pub mod avatar;
pub mod command;
pub mod config;
pub mod error;
pub mod gesture;
pub mod http;
pub mod session;
pub mod speech;
pub mod telemetry;
pub mod transport;

pub use avatar::{AvatarAgent, AvatarAgentFactory, AvatarCatalog, AvatarModel};
pub use command::{interpret, CommandResult, VoiceAction};
pub use config::{Config, StreamDefaults};
pub use error::{Result, StreamError};
pub use gesture::GestureRouter;
pub use http::{create_router, AppState};
pub use session::{
    CollaboratorRegistry, FeatureFlags, Participant, Role, SessionManager, StreamConfig,
    StreamConfigUpdate, StreamQuality, StreamSession, StreamSessionView, StreamState,
    StreamStatus, SubtitleHistory, Visibility, VoiceProfile, VoiceSettings,
};
pub use speech::{
    RecognizerFactory, RecognizerHandle, SpeechRecognizer, SubtitleLine, SubtitleOptions,
    VoiceSynthesizer,
};
pub use telemetry::{MetricsFeed, RandomWalkFeed, StreamTelemetry};
pub use transport::{
    PublishedStream, RealtimeTransport, TransportCapabilities, TransportFactory,
};
