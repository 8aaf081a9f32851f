//! Speech collaborator boundaries: recognition (subtitles in) and synthesis
//! (avatar voice out).

mod recognizer;
mod synthesizer;

pub use recognizer::{
    RecognizerFactory, RecognizerHandle, ScriptedRecognizer, ScriptedRecognizerFactory,
    SpeechRecognizer, SubtitleLine, SubtitleOptions,
};
pub use synthesizer::{FallbackSynthesizer, LocalSynthesizer, VoiceSynthesizer};
