// Shared-state block owned by the assistant: lifecycle flags, the command
// registry and the training manager. Always accessed under one lock.

use crate::training::TrainingSessionManager;
use crate::voice_commands::CommandRegistry;
use serde::Serialize;

pub(crate) struct AssistantState {
    pub enabled: bool,
    pub listening: bool,
    pub speaking: bool,
    pub current_context: String,
    /// Name of the most recently matched command
    pub last_command: Option<String>,
    /// Confidence of the most recent recognition result (interim or final)
    pub confidence: f64,
    /// Live transcript from interim results; cleared on each final result
    pub interim_transcript: String,
    pub last_spoken: Option<String>,
    pub registry: CommandRegistry,
    pub training: TrainingSessionManager,
}

impl AssistantState {
    pub fn new(enabled: bool, training: TrainingSessionManager) -> Self {
        Self {
            enabled,
            listening: false,
            speaking: false,
            current_context: String::new(),
            last_command: None,
            confidence: 0.0,
            interim_transcript: String::new(),
            last_spoken: None,
            registry: CommandRegistry::new(),
            training,
        }
    }

    pub fn snapshot(&self) -> AssistantStatus {
        AssistantStatus {
            enabled: self.enabled,
            listening: self.listening,
            speaking: self.speaking,
            training: self.training.is_active(),
            current_context: self.current_context.clone(),
            last_command: self.last_command.clone(),
            confidence: self.confidence,
            interim_transcript: self.interim_transcript.clone(),
            training_context: self.training.active_context().map(str::to_string),
            training_progress: self.training.progress(),
            training_accuracy: self.training.accuracy(),
            session_count: self.training.history().len(),
            command_count: self.registry.len(),
        }
    }
}

/// Read-only snapshot of the assistant's observables
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantStatus {
    pub enabled: bool,
    pub listening: bool,
    pub speaking: bool,
    /// Whether a training session is active
    pub training: bool,
    pub current_context: String,
    pub last_command: Option<String>,
    pub confidence: f64,
    pub interim_transcript: String,
    pub training_context: Option<String>,
    pub training_progress: u32,
    pub training_accuracy: f64,
    /// Number of archived training sessions
    pub session_count: usize,
    /// Number of host-registered commands
    pub command_count: usize,
}
