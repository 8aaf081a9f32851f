use anyhow::{bail, Result};
use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::info;

/// One transcript unit from the recognizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleLine {
    /// Stable id; an interim line and its final counterpart share one id
    pub id: String,

    pub text: String,

    pub timestamp: DateTime<Utc>,

    /// Confidence score (0.0 to 1.0)
    pub confidence: f32,

    /// Whether this is a partial (interim) result
    pub interim: bool,
}

/// Options supplied when binding the recognizer to a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubtitleOptions {
    pub language: String,

    /// Deliver interim lines before the final version
    pub interim_results: bool,

    /// Lines below this confidence are dropped at the source
    pub min_confidence: f32,
}

impl Default for SubtitleOptions {
    fn default() -> Self {
        Self {
            language: "en-US".to_string(),
            interim_results: true,
            min_confidence: 0.0,
        }
    }
}

/// Cancellable subscription to a recognizer.
///
/// Dropping the handle (or calling [`RecognizerHandle::cancel`]) guarantees
/// no further line deliveries.
pub struct RecognizerHandle {
    active: Arc<AtomicBool>,
    task: JoinHandle<()>,
}

impl RecognizerHandle {
    pub fn new(active: Arc<AtomicBool>, task: JoinHandle<()>) -> Self {
        Self { active, task }
    }

    pub fn cancel(&self) {
        self.active.store(false, Ordering::SeqCst);
        self.task.abort();
    }
}

impl Drop for RecognizerHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Speech-to-text collaborator.
///
/// Single-subscriber: a recognizer with an active subscription rejects a
/// second `start` until the first handle is cancelled.
#[async_trait::async_trait]
pub trait SpeechRecognizer: Send + Sync {
    async fn start(
        &self,
        options: SubtitleOptions,
        sink: mpsc::Sender<SubtitleLine>,
    ) -> Result<RecognizerHandle>;
}

/// Creates one recognizer per session.
pub trait RecognizerFactory: Send + Sync {
    fn recognizer_for(&self, session_id: &str) -> Arc<dyn SpeechRecognizer>;
}

/// Recognizer that emits a scripted rotation of phrases on a timer, standing
/// in for a real speech-to-text engine.
pub struct ScriptedRecognizer {
    session_id: String,
    interval: Duration,
    listening: Arc<AtomicBool>,
}

const SCRIPTED_PHRASES: &[&str] = &[
    "Welcome to today's lesson on quantum physics.",
    "Let's explore the fascinating world of wave-particle duality.",
    "This concept revolutionized our understanding of nature.",
    "Questions are welcome in the chat at any time.",
    "Now let's look at some practical applications.",
];

impl ScriptedRecognizer {
    pub fn new(session_id: String, interval: Duration) -> Self {
        Self {
            session_id,
            interval,
            listening: Arc::new(AtomicBool::new(false)),
        }
    }
}

#[async_trait::async_trait]
impl SpeechRecognizer for ScriptedRecognizer {
    async fn start(
        &self,
        options: SubtitleOptions,
        sink: mpsc::Sender<SubtitleLine>,
    ) -> Result<RecognizerHandle> {
        if self.listening.swap(true, Ordering::SeqCst) {
            bail!(
                "recognizer for session {} already has an active subscriber",
                self.session_id
            );
        }

        info!(
            "Starting scripted recognition for session {} (lang={})",
            self.session_id, options.language
        );

        let listening = Arc::clone(&self.listening);
        let interval = self.interval;

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            let mut index: usize = 0;

            loop {
                ticker.tick().await;

                if !listening.load(Ordering::SeqCst) {
                    break;
                }

                let phrase = SCRIPTED_PHRASES[index % SCRIPTED_PHRASES.len()];
                let id = format!("line-{}", index);
                let confidence = rand::thread_rng().gen_range(0.85..=0.99);

                if confidence < options.min_confidence {
                    index += 1;
                    continue;
                }

                if options.interim_results {
                    // Emit a truncated interim line first, then the final one
                    // under the same id, mirroring continuous recognition.
                    let cut = phrase.len() / 2;
                    let interim = SubtitleLine {
                        id: id.clone(),
                        text: phrase[..cut].to_string(),
                        timestamp: Utc::now(),
                        confidence,
                        interim: true,
                    };
                    if sink.send(interim).await.is_err() {
                        break;
                    }
                }

                let line = SubtitleLine {
                    id,
                    text: phrase.to_string(),
                    timestamp: Utc::now(),
                    confidence,
                    interim: false,
                };
                if sink.send(line).await.is_err() {
                    break;
                }

                index += 1;
            }
        });

        Ok(RecognizerHandle::new(Arc::clone(&self.listening), task))
    }
}

pub struct ScriptedRecognizerFactory {
    pub interval: Duration,
}

impl Default for ScriptedRecognizerFactory {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(8),
        }
    }
}

impl RecognizerFactory for ScriptedRecognizerFactory {
    fn recognizer_for(&self, session_id: &str) -> Arc<dyn SpeechRecognizer> {
        Arc::new(ScriptedRecognizer::new(session_id.to_string(), self.interval))
    }
}
