//! Speech capability boundary: recognition events in, spoken text out.

mod error;
pub use error::SpeechError;

mod traits;
pub use traits::{SpeechRecognizer, SpeechSynthesizer};

#[cfg(any(test, feature = "mock"))]
mod mock;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MockRecognizer, MockSynthesizer};

use crate::constants::{
    DEFAULT_LANGUAGE, DEFAULT_SPEECH_PITCH, DEFAULT_SPEECH_RATE, DEFAULT_SPEECH_VOLUME,
};
use serde::{Deserialize, Serialize};

/// One result from the speech recognizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionEvent {
    pub utterance: String,
    /// Recognizer certainty (0.0 - 1.0)
    pub confidence: f64,
    /// Interim results only update the live display
    pub is_final: bool,
}

impl RecognitionEvent {
    pub fn final_result(utterance: impl Into<String>, confidence: f64) -> Self {
        Self {
            utterance: utterance.into(),
            confidence,
            is_final: true,
        }
    }

    pub fn interim(utterance: impl Into<String>, confidence: f64) -> Self {
        Self {
            utterance: utterance.into(),
            confidence,
            is_final: false,
        }
    }

    /// Confidence clamped to [0, 1]; NaN counts as 0
    pub fn clamped_confidence(&self) -> f64 {
        if self.confidence.is_nan() {
            0.0
        } else {
            self.confidence.clamp(0.0, 1.0)
        }
    }
}

/// Progress reports from the speech synthesizer
#[derive(Debug, Clone, PartialEq)]
pub enum SynthesisEvent {
    Started,
    Finished,
    Failed(SpeechError),
}

/// Voice settings passed to the synthesizer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SpeechOptions {
    pub language: String,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
    /// Platform voice name; None uses the platform default
    pub voice: Option<String>,
}

impl Default for SpeechOptions {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            rate: DEFAULT_SPEECH_RATE,
            pitch: DEFAULT_SPEECH_PITCH,
            volume: DEFAULT_SPEECH_VOLUME,
            voice: None,
        }
    }
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
