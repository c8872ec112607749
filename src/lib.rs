// Context-aware voice command engine: command registry, matching, training
// sessions and the listening/speaking lifecycle. Speech capabilities and
// host effects are supplied by the embedding application.

// Enable coverage attribute on nightly for explicit exclusions
#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

pub mod assistant;
pub mod config;
pub mod constants;
pub mod context;
pub mod events;
pub mod speech;
pub mod training;
pub mod voice_commands;

// Re-export log macros for use throughout the crate
pub use log::{debug, error, info, trace, warn};

pub use assistant::{AssistantStatus, DispatchOutcome, VoiceAssistant, VoiceAssistantBuilder};
pub use config::{AssistantConfig, ConfigError};
pub use speech::{RecognitionEvent, SpeechError, SpeechOptions, SynthesisEvent};
pub use voice_commands::{Effect, VoiceCommand};
