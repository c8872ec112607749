//! Centralized constants for command matching and training sessions.
//!
//! Defaults for `AssistantConfig` live here so that the matcher, the
//! training manager and the configuration layer agree on a single value.

// =============================================================================
// TRAINING SESSIONS
// =============================================================================

/// Wall-clock lifetime of a training session before it is auto-finalized.
///
/// Measured from session start, independent of activity.
pub const DEFAULT_SESSION_TIMEOUT_SECS: u64 = 10 * 60;

/// Longest accepted session timeout (one day).
pub const MAX_SESSION_TIMEOUT_SECS: u64 = 24 * 60 * 60;

/// Progress added per scored utterance, in percentage points.
pub const DEFAULT_PROGRESS_STEP: u32 = 10;

/// Upper bound for session progress (percent).
pub const MAX_PROGRESS: u32 = 100;

// =============================================================================
// MATCHING THRESHOLDS
// =============================================================================

/// Word-overlap similarity at which a close utterance counts as a match
/// during training (0.0 - 1.0).
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.7;

/// Minimum normalized Levenshtein score for a "did you mean" suggestion
/// (0.0 - 1.0).
pub const DEFAULT_SUGGESTION_THRESHOLD: f64 = 0.6;

// =============================================================================
// FEEDBACK BUCKETS
// =============================================================================

/// Accuracy strictly above this is reported as "excellent".
pub const EXCELLENT_ACCURACY: f64 = 0.8;

/// Accuracy strictly above this (and not excellent) is reported as "good".
pub const GOOD_ACCURACY: f64 = 0.6;

// =============================================================================
// SPEECH
// =============================================================================

/// Default recognition and synthesis language.
pub const DEFAULT_LANGUAGE: &str = "en-US";

/// Neutral speech rate multiplier.
pub const DEFAULT_SPEECH_RATE: f32 = 1.0;

/// Neutral speech pitch multiplier.
pub const DEFAULT_SPEECH_PITCH: f32 = 1.0;

/// Full synthesizer volume (0.0 - 1.0).
pub const DEFAULT_SPEECH_VOLUME: f32 = 1.0;

#[cfg(test)]
#[path = "constants_test.rs"]
mod tests;
