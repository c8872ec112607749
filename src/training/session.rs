// Training session records and qualitative feedback

use crate::constants::{EXCELLENT_ACCURACY, GOOD_ACCURACY};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One guided-practice run
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TrainingSession {
    pub id: Uuid,
    pub start_time: DateTime<Utc>,
    /// Absent while the session is active
    pub end_time: Option<DateTime<Utc>>,
    /// Usage context the session was started for
    pub context: String,
    /// Raw final utterances, append-only
    pub utterances: Vec<String>,
    /// Recency-weighted running accuracy (0.0 - 1.0)
    pub accuracy: f64,
    /// Free-form coaching notes
    pub improvements: Vec<String>,
}

impl TrainingSession {
    pub fn new(context: impl Into<String>, start_time: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4(),
            start_time,
            end_time: None,
            context: context.into(),
            utterances: Vec::new(),
            accuracy: 0.0,
            improvements: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.end_time.is_none()
    }

    /// Fold a new confidence into the running accuracy: (old + new) / 2
    pub(crate) fn fold_accuracy(&mut self, confidence: f64) -> f64 {
        self.accuracy = (self.accuracy + confidence) / 2.0;
        self.accuracy
    }
}

/// Qualitative bucket for the current training accuracy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrainingFeedback {
    Excellent,
    Good,
    NeedsClarity,
}

impl TrainingFeedback {
    /// Bucket an accuracy: > 0.8 excellent, > 0.6 good, else needs clarity
    pub fn from_accuracy(accuracy: f64) -> Self {
        if accuracy > EXCELLENT_ACCURACY {
            TrainingFeedback::Excellent
        } else if accuracy > GOOD_ACCURACY {
            TrainingFeedback::Good
        } else {
            TrainingFeedback::NeedsClarity
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TrainingFeedback::Excellent => "excellent",
            TrainingFeedback::Good => "good",
            TrainingFeedback::NeedsClarity => "needs clarity",
        }
    }

    /// Sentence suitable for speaking back to the user
    pub fn message(&self) -> &'static str {
        match self {
            TrainingFeedback::Excellent => "Excellent! Your commands are recognized reliably.",
            TrainingFeedback::Good => "Good progress. Keep practicing to improve recognition.",
            TrainingFeedback::NeedsClarity => {
                "Try speaking more clearly and using the exact command phrases."
            }
        }
    }
}

impl std::fmt::Display for TrainingFeedback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
