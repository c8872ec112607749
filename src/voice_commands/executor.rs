// Effect executor - hands matched command effects to the host

use crate::voice_commands::registry::{Effect, VoiceCommand};
use serde::Serialize;
use std::sync::Arc;

/// Result of an effect execution
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EffectResult {
    /// Description of what was done
    pub message: String,
    /// Optional additional data
    pub data: Option<serde_json::Value>,
}

impl EffectResult {
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            data: None,
        }
    }
}

/// Typed error codes for effect execution failures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EffectErrorCode {
    /// Missing required parameter
    MissingParam,
    /// Invalid parameter value
    InvalidParameter,
    /// Target (route, custom handler) not found
    NotFound,
    /// The host refused the effect
    PermissionDenied,
    /// The handler does not support this effect
    Unsupported,
    /// General execution error
    ExecutionError,
}

impl std::fmt::Display for EffectErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            EffectErrorCode::MissingParam => "MISSING_PARAM",
            EffectErrorCode::InvalidParameter => "INVALID_PARAMETER",
            EffectErrorCode::NotFound => "NOT_FOUND",
            EffectErrorCode::PermissionDenied => "PERMISSION_DENIED",
            EffectErrorCode::Unsupported => "UNSUPPORTED",
            EffectErrorCode::ExecutionError => "EXECUTION_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Error during effect execution
#[derive(Debug, Clone, PartialEq, Serialize, thiserror::Error)]
#[error("{code}: {message}")]
pub struct EffectError {
    /// Typed error code for categorization
    pub code: EffectErrorCode,
    /// Human-readable error message
    pub message: String,
}

impl EffectError {
    pub fn new(code: EffectErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Host capability that performs command effects (navigation, toasts, ...)
pub trait EffectHandler: Send + Sync {
    /// Execute a host effect
    fn execute(&self, effect: &Effect) -> Result<EffectResult, EffectError>;
}

/// Handler that only logs effects; useful before the host is wired up
pub struct LoggingEffectHandler;

impl EffectHandler for LoggingEffectHandler {
    fn execute(&self, effect: &Effect) -> Result<EffectResult, EffectError> {
        crate::info!("[executor] Effect requested without a host handler: {:?}", effect);
        Ok(EffectResult::message("Effect logged"))
    }
}

/// Routes command effects to the host handler
///
/// Built-in effects belong to the engine and are rejected here.
pub struct EffectDispatcher {
    handler: Arc<dyn EffectHandler>,
}

impl Default for EffectDispatcher {
    fn default() -> Self {
        Self::new(Arc::new(LoggingEffectHandler))
    }
}

impl EffectDispatcher {
    pub fn new(handler: Arc<dyn EffectHandler>) -> Self {
        Self { handler }
    }

    /// Execute a command's effect
    pub fn execute(&self, command: &VoiceCommand) -> Result<EffectResult, EffectError> {
        match &command.effect {
            Effect::None => Ok(EffectResult::message(format!(
                "Command '{}' has no effect",
                command.name
            ))),
            Effect::Builtin { action } => Err(EffectError::new(
                EffectErrorCode::Unsupported,
                format!("Built-in action {:?} must be handled by the assistant", action),
            )),
            Effect::Navigate { path } if path.trim().is_empty() => Err(EffectError::new(
                EffectErrorCode::MissingParam,
                "Navigate effect has an empty path",
            )),
            effect => self.handler.execute(effect),
        }
    }
}

#[cfg(test)]
#[path = "executor_test.rs"]
pub(crate) mod tests;
