use serde::Serialize;

/// Failures reported by the speech recognition or synthesis backend
///
/// A recognizer failure disables the assistant; nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SpeechError {
    /// Microphone or speech permission was refused
    #[error("Speech permission denied")]
    PermissionDenied,
    /// The platform has no recognition/synthesis capability
    #[error("Speech capability not supported on this platform")]
    NotSupported,
    /// Any other backend failure
    #[error("Speech backend error: {0}")]
    Backend(String),
}
