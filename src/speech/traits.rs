use super::{SpeechError, SpeechOptions};

/// Host speech-to-text capability
///
/// Results are delivered back to the assistant through
/// `VoiceAssistant::handle_recognition`, in arrival order.
pub trait SpeechRecognizer: Send + Sync {
    /// Begin delivering recognition events
    fn start(&self, language: &str) -> Result<(), SpeechError>;

    /// Stop delivering recognition events
    fn stop(&self);
}

/// Host text-to-speech capability
///
/// Start/end of an utterance is reported back through
/// `VoiceAssistant::handle_synthesis_event`.
pub trait SpeechSynthesizer: Send + Sync {
    /// Queue `text` for speaking
    fn speak(&self, text: &str, options: &SpeechOptions) -> Result<(), SpeechError>;

    /// Cancel the in-flight utterance and anything queued behind it
    fn cancel(&self);
}
