//! Assistant configuration.
//!
//! `AssistantConfig` is plain serde data. Every field has a default, so a
//! partial JSON file only overrides what it names.

use crate::constants::{
    DEFAULT_PROGRESS_STEP, DEFAULT_SESSION_TIMEOUT_SECS, DEFAULT_SIMILARITY_THRESHOLD,
    DEFAULT_SUGGESTION_THRESHOLD, MAX_PROGRESS, MAX_SESSION_TIMEOUT_SECS,
};
use crate::speech::SpeechOptions;
use crate::training::NoMatchPolicy;
use crate::voice_commands::MatcherConfig;
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::Write;
use std::path::Path;
use std::time::Duration;

/// Error types for configuration loading and validation
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Reading or writing the config file failed
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// The config file is not valid JSON for `AssistantConfig`
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
    /// A value is out of range
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
}

/// Tunables for the voice assistant engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AssistantConfig {
    /// Training session lifetime, measured from its start
    pub session_timeout_secs: u64,
    /// Progress added per scored utterance (percentage points)
    pub progress_step: u32,
    /// Word-overlap score that promotes a close utterance during training
    pub similarity_threshold: f64,
    /// Minimum score for a "did you mean" suggestion
    pub suggestion_threshold: f64,
    /// Also treat commands whose name overlaps the context as eligible
    pub legacy_context_name_match: bool,
    pub no_match_policy: NoMatchPolicy,
    /// Restart the recognizer when it stops on its own while listening
    pub continuous_listening: bool,
    pub enabled_on_start: bool,
    /// Register the engine's own help / stop listening / end training commands
    pub builtin_commands: bool,
    /// Speak a short message when training starts and ends
    pub announce_training: bool,
    pub speech: SpeechOptions,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            session_timeout_secs: DEFAULT_SESSION_TIMEOUT_SECS,
            progress_step: DEFAULT_PROGRESS_STEP,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
            suggestion_threshold: DEFAULT_SUGGESTION_THRESHOLD,
            legacy_context_name_match: true,
            no_match_policy: NoMatchPolicy::default(),
            continuous_listening: true,
            enabled_on_start: true,
            builtin_commands: true,
            announce_training: true,
            speech: SpeechOptions::default(),
        }
    }
}

impl AssistantConfig {
    /// Load from a JSON file; a missing file yields the defaults
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            crate::debug!("[config] No config at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        config.validate()?;

        crate::info!("[config] Loaded assistant config from {:?}", path);
        Ok(config)
    }

    /// Write as pretty JSON (temp file + rename)
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        let temp_path = path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)?;
            file.write_all(content.as_bytes())?;
            file.sync_all()?;
        }

        if let Err(e) = fs::rename(&temp_path, path) {
            let _ = fs::remove_file(&temp_path);
            return Err(e.into());
        }
        Ok(())
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_unit_range("similarityThreshold", self.similarity_threshold)?;
        check_unit_range("suggestionThreshold", self.suggestion_threshold)?;

        if self.session_timeout_secs == 0 || self.session_timeout_secs > MAX_SESSION_TIMEOUT_SECS {
            return Err(ConfigError::Invalid {
                field: "sessionTimeoutSecs",
                reason: format!("must be between 1 and {}", MAX_SESSION_TIMEOUT_SECS),
            });
        }
        if self.progress_step == 0 || self.progress_step > MAX_PROGRESS {
            return Err(ConfigError::Invalid {
                field: "progressStep",
                reason: format!("must be between 1 and {}", MAX_PROGRESS),
            });
        }
        if !(self.speech.rate > 0.0) {
            return Err(ConfigError::Invalid {
                field: "speech.rate",
                reason: "must be positive".to_string(),
            });
        }
        Ok(())
    }

    pub fn session_timeout(&self) -> Duration {
        Duration::from_secs(self.session_timeout_secs)
    }

    pub fn matcher_config(&self) -> MatcherConfig {
        MatcherConfig {
            similarity_threshold: self.similarity_threshold,
            suggestion_threshold: self.suggestion_threshold,
        }
    }
}

fn check_unit_range(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("{} is outside 0.0 - 1.0", value),
        })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
