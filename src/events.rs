// Assistant events for host notification
// Defines event payloads and emission traits for testability

use serde::Serialize;

/// Command-related event names
pub mod command_events {
    pub const COMMAND_MATCHED: &str = "command_matched";
    pub const COMMAND_EXECUTED: &str = "command_executed";
    pub const COMMAND_FAILED: &str = "command_failed";
    pub const COMMAND_NOT_RECOGNIZED: &str = "command_not_recognized";
}

/// Training-related event names
pub mod training_events {
    pub const TRAINING_STARTED: &str = "training_started";
    pub const TRAINING_FEEDBACK: &str = "training_feedback";
    pub const TRAINING_ENDED: &str = "training_ended";
}

/// Lifecycle-related event names
pub mod assistant_events {
    pub const LISTENING_CHANGED: &str = "listening_changed";
    pub const ASSISTANT_ERROR: &str = "assistant_error";
    pub const NOTIFICATION: &str = "notification";
}

/// Payload for command_matched event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommandMatchedPayload {
    /// The final utterance that was matched
    pub utterance: String,
    /// Name of the matched command
    pub command_name: String,
    /// Which matcher rule hit: "exact", "alias", "training_phrase" or "similar"
    pub match_kind: String,
    /// Recognizer confidence (0.0 - 1.0)
    pub confidence: f64,
    /// Match strength (1.0 for rule hits)
    pub score: f64,
}

/// Payload for command_executed event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommandExecutedPayload {
    pub command_name: String,
    /// Result message from the effect handler
    pub message: String,
}

/// Payload for command_failed event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommandFailedPayload {
    pub command_name: String,
    /// Error code (e.g., "NOT_FOUND")
    pub error_code: String,
    pub error_message: String,
}

/// Payload for command_not_recognized event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CommandNotRecognizedPayload {
    pub utterance: String,
    pub confidence: f64,
    /// Closest command phrase, if one was similar enough
    pub suggestion: Option<String>,
}

/// Payload for training_started event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingStartedPayload {
    pub session_id: String,
    pub context: String,
    /// ISO 8601 timestamp when the session started
    pub timestamp: String,
}

/// Payload for training_feedback event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingFeedbackPayload {
    pub session_id: String,
    pub utterance: String,
    /// Command the utterance resolved to, if any
    pub matched_command: Option<String>,
    pub accuracy: f64,
    /// Session progress (0 - 100)
    pub progress: u32,
    /// Qualitative bucket: "excellent", "good" or "needs clarity"
    pub feedback: String,
}

/// Why a training session was finalized
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SessionEndReason {
    /// Explicit end request
    Completed,
    /// The session timeout elapsed
    Timeout,
    /// The current context changed away from the session's context
    ContextChanged,
    /// A new session was started over it
    Replaced,
    /// Training was reset
    Reset,
}

/// Payload for training_ended event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingEndedPayload {
    pub session_id: String,
    pub context: String,
    pub reason: SessionEndReason,
    pub utterance_count: usize,
    pub accuracy: f64,
    /// ISO 8601 timestamp when the session ended
    pub timestamp: String,
}

/// Payload for listening_changed event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ListeningChangedPayload {
    pub listening: bool,
    /// What caused the change (e.g., "started", "stopped", "disabled")
    pub reason: String,
}

/// Payload for assistant_error event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AssistantErrorPayload {
    /// Failing capability: "recognition" or "synthesis"
    pub source: String,
    pub message: String,
}

/// Severity of a user-visible notification
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    Info,
    Success,
    Warning,
    Error,
}

/// Payload for notification event
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NotificationPayload {
    pub kind: NotificationKind,
    pub title: String,
    pub message: String,
}

impl NotificationPayload {
    pub fn new(kind: NotificationKind, title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Trait for emitting command events
/// Allows mocking in tests while the host bridges to its own event bus
pub trait CommandEventEmitter: Send + Sync {
    /// Emit command_matched event
    fn emit_command_matched(&self, payload: CommandMatchedPayload);

    /// Emit command_executed event
    fn emit_command_executed(&self, payload: CommandExecutedPayload);

    /// Emit command_failed event
    fn emit_command_failed(&self, payload: CommandFailedPayload);

    /// Emit command_not_recognized event
    fn emit_command_not_recognized(&self, payload: CommandNotRecognizedPayload);
}

/// Trait for emitting training events
pub trait TrainingEventEmitter: Send + Sync {
    /// Emit training_started event
    fn emit_training_started(&self, payload: TrainingStartedPayload);

    /// Emit training_feedback event
    fn emit_training_feedback(&self, payload: TrainingFeedbackPayload);

    /// Emit training_ended event
    fn emit_training_ended(&self, payload: TrainingEndedPayload);
}

/// Trait for emitting lifecycle events and user notifications
pub trait AssistantEventEmitter: Send + Sync {
    /// Emit listening_changed event
    fn emit_listening_changed(&self, payload: ListeningChangedPayload);

    /// Emit assistant_error event
    fn emit_assistant_error(&self, payload: AssistantErrorPayload);

    /// Emit notification event (toast/log surface)
    fn emit_notification(&self, payload: NotificationPayload);
}

/// Get the current timestamp in ISO 8601 format
pub fn current_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

#[cfg(test)]
#[path = "events_test.rs"]
pub(crate) mod tests;
