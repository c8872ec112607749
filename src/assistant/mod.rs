// Voice assistant engine: lifecycle, dispatch and training in one handle

mod builtins;
mod controller;
mod state;

pub use builtins::{END_TRAINING_COMMAND, HELP_COMMAND, STOP_LISTENING_COMMAND};
pub use controller::{DispatchOutcome, VoiceAssistant, VoiceAssistantBuilder};
pub use state::AssistantStatus;
