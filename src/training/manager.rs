// Training session state machine
//
// Idle -> Active -> Idle. Starting while Active finalizes and archives the
// running session first. Misuse (ending while idle, stale timeouts) is a
// no-op, never an error.

use super::scheduler::TimerHandle;
use super::session::{TrainingFeedback, TrainingSession};
use crate::constants::{DEFAULT_PROGRESS_STEP, MAX_PROGRESS};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How an unrecognized utterance affects the session score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum NoMatchPolicy {
    /// Record the utterance and give feedback; score and progress unchanged
    #[default]
    FeedbackOnly,
    /// Score the utterance with confidence 0 and advance progress
    Penalize,
}

/// Whether a scored utterance resolved to a command
#[derive(Debug, Clone, PartialEq)]
pub enum UtteranceOutcome {
    Matched,
    Unmatched { suggestion: Option<String> },
}

/// Session state after an utterance was recorded
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingUpdate {
    pub session_id: Uuid,
    pub accuracy: f64,
    pub progress: u32,
    /// False when the utterance was recorded without touching the score
    pub scored: bool,
}

/// Result of starting a session
#[derive(Debug)]
pub struct StartOutcome {
    pub session_id: Uuid,
    /// Session that was running and got archived by this start
    pub replaced: Option<TrainingSession>,
}

struct ActiveSession {
    session: TrainingSession,
    timeout: Option<TimerHandle>,
}

/// Manager for training session state
pub struct TrainingSessionManager {
    active: Option<ActiveSession>,
    history: Vec<TrainingSession>,
    progress: u32,
    accuracy: f64,
    progress_step: u32,
    no_match_policy: NoMatchPolicy,
}

impl Default for TrainingSessionManager {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRESS_STEP, NoMatchPolicy::default())
    }
}

impl TrainingSessionManager {
    pub fn new(progress_step: u32, no_match_policy: NoMatchPolicy) -> Self {
        Self {
            active: None,
            history: Vec::new(),
            progress: 0,
            accuracy: 0.0,
            progress_step,
            no_match_policy,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_session(&self) -> Option<&TrainingSession> {
        self.active.as_ref().map(|a| &a.session)
    }

    pub fn active_context(&self) -> Option<&str> {
        self.active_session().map(|s| s.context.as_str())
    }

    /// Progress of the current (or most recent) session, in percent
    pub fn progress(&self) -> u32 {
        self.progress
    }

    /// Accuracy of the current (or most recent) session
    pub fn accuracy(&self) -> f64 {
        self.accuracy
    }

    /// Archived sessions, oldest first
    pub fn history(&self) -> &[TrainingSession] {
        &self.history
    }

    /// Seed the archive with previously persisted sessions
    pub fn restore_history(&mut self, sessions: Vec<TrainingSession>) {
        self.history = sessions;
    }

    pub fn feedback(&self) -> TrainingFeedback {
        TrainingFeedback::from_accuracy(self.accuracy)
    }

    /// Idle -> Active, archiving a running session first
    pub fn start(&mut self, context: &str, now: DateTime<Utc>) -> StartOutcome {
        let replaced = self.active.take().map(|active| {
            crate::info!(
                "[training] Replacing active session {} ({})",
                active.session.id,
                active.session.context
            );
            self.finish(active, now)
        });

        let session = TrainingSession::new(context, now);
        let session_id = session.id;
        self.active = Some(ActiveSession {
            session,
            timeout: None,
        });
        self.progress = 0;
        self.accuracy = 0.0;

        crate::info!("[training] Session {} started for '{}'", session_id, context);
        StartOutcome {
            session_id,
            replaced,
        }
    }

    /// Attach the auto-finalize timer to the active session
    ///
    /// A timer for a session that is no longer active is cancelled right
    /// away, and any timer already attached is replaced (and cancelled).
    pub fn arm_timeout(&mut self, session_id: Uuid, handle: TimerHandle) {
        match self.active.as_mut() {
            Some(active) if active.session.id == session_id => {
                if let Some(previous) = active.timeout.replace(handle) {
                    previous.cancel();
                }
            }
            _ => {
                crate::debug!("[training] Timeout for inactive session {} cancelled", session_id);
                handle.cancel();
            }
        }
    }

    /// Record a final utterance; returns None while idle
    pub fn record_utterance(
        &mut self,
        utterance: &str,
        confidence: f64,
        outcome: UtteranceOutcome,
    ) -> Option<TrainingUpdate> {
        let active = self.active.as_mut()?;
        let session = &mut active.session;
        session.utterances.push(utterance.to_string());

        let scored_confidence = match &outcome {
            UtteranceOutcome::Matched => Some(confidence),
            UtteranceOutcome::Unmatched { suggestion } => {
                let note = match suggestion {
                    Some(phrase) => format!("'{}' was not recognized; try '{}'", utterance, phrase),
                    None => format!("'{}' was not recognized", utterance),
                };
                session.improvements.push(note);
                match self.no_match_policy {
                    NoMatchPolicy::FeedbackOnly => None,
                    NoMatchPolicy::Penalize => Some(0.0),
                }
            }
        };

        if let Some(confidence) = scored_confidence {
            self.accuracy = session.fold_accuracy(confidence);
            self.progress = self.progress.saturating_add(self.progress_step).min(MAX_PROGRESS);
        }

        crate::debug!(
            "[training] Recorded '{}' (accuracy {:.2}, progress {})",
            utterance,
            self.accuracy,
            self.progress
        );

        Some(TrainingUpdate {
            session_id: session.id,
            accuracy: self.accuracy,
            progress: self.progress,
            scored: scored_confidence.is_some(),
        })
    }

    /// Append a coaching note to the active session
    pub fn add_improvement(&mut self, note: impl Into<String>) {
        if let Some(active) = self.active.as_mut() {
            active.session.improvements.push(note.into());
        }
    }

    /// Active -> Idle; no-op while idle
    pub fn end(&mut self, now: DateTime<Utc>) -> Option<TrainingSession> {
        match self.active.take() {
            Some(active) => Some(self.finish(active, now)),
            None => {
                crate::debug!("[training] End requested while idle; ignoring");
                None
            }
        }
    }

    /// Timeout path: ends the session only if it is still the active one
    pub fn expire(&mut self, session_id: Uuid, now: DateTime<Utc>) -> Option<TrainingSession> {
        match &self.active {
            Some(active) if active.session.id == session_id => {
                crate::info!("[training] Session {} timed out", session_id);
                self.end(now)
            }
            _ => {
                crate::debug!("[training] Stale timeout for session {} ignored", session_id);
                None
            }
        }
    }

    /// End any active session and clear history and scores
    ///
    /// Returns the session that was active, if any (already finalized).
    pub fn reset(&mut self, now: DateTime<Utc>) -> Option<TrainingSession> {
        let ended = self.end(now);
        self.history.clear();
        self.progress = 0;
        self.accuracy = 0.0;
        crate::info!("[training] Training history reset");
        ended
    }

    fn finish(&mut self, active: ActiveSession, now: DateTime<Utc>) -> TrainingSession {
        if let Some(timeout) = active.timeout {
            timeout.cancel();
        }
        let mut session = active.session;
        session.end_time = Some(now);
        crate::info!(
            "[training] Session {} ended: {} utterances, accuracy {:.2}",
            session.id,
            session.utterances.len(),
            session.accuracy
        );
        self.history.push(session.clone());
        session
    }
}

#[cfg(test)]
#[path = "manager_test.rs"]
mod tests;
