// Session history store - persists archived training sessions as JSON

use super::session::TrainingSession;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Error types for history persistence
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StoreError {
    /// Failed to write sessions
    #[error("Failed to persist training history: {0}")]
    Persist(String),
    /// Failed to read sessions
    #[error("Failed to load training history: {0}")]
    Load(String),
}

/// File-backed list of archived training sessions
#[derive(Debug, Clone)]
pub struct SessionHistoryStore {
    path: PathBuf,
}

impl SessionHistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load archived sessions; a missing file is an empty history
    pub fn load(&self) -> Result<Vec<TrainingSession>, StoreError> {
        if !self.path.exists() {
            crate::debug!("[training] No history file at {:?}", self.path);
            return Ok(Vec::new());
        }

        let content =
            fs::read_to_string(&self.path).map_err(|e| StoreError::Load(e.to_string()))?;
        let sessions: Vec<TrainingSession> =
            serde_json::from_str(&content).map_err(|e| StoreError::Load(e.to_string()))?;

        crate::info!("[training] Loaded {} archived sessions", sessions.len());
        Ok(sessions)
    }

    /// Replace the stored history (temp file + rename)
    pub fn save(&self, sessions: &[TrainingSession]) -> Result<(), StoreError> {
        crate::debug!(
            "[training] Persisting {} sessions to {:?}",
            sessions.len(),
            self.path
        );

        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| StoreError::Persist(e.to_string()))?;
        }

        let content = serde_json::to_string_pretty(sessions)
            .map_err(|e| StoreError::Persist(e.to_string()))?;

        let temp_path = self.path.with_extension("tmp");
        {
            let mut file = File::create(&temp_path)
                .map_err(|e| StoreError::Persist(format!("Failed to create temp file: {}", e)))?;
            file.write_all(content.as_bytes())
                .map_err(|e| StoreError::Persist(format!("Failed to write: {}", e)))?;
            file.sync_all()
                .map_err(|e| StoreError::Persist(format!("Failed to sync: {}", e)))?;
        }

        fs::rename(&temp_path, &self.path).map_err(|e| {
            let _ = fs::remove_file(&temp_path);
            StoreError::Persist(format!("Failed to rename: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
