// Training sessions: guided practice with accuracy scoring and auto-timeout

mod manager;
mod scheduler;
mod session;
mod store;

pub use manager::{
    NoMatchPolicy, StartOutcome, TrainingSessionManager, TrainingUpdate, UtteranceOutcome,
};
pub use scheduler::{ManualScheduler, ScheduledTask, Scheduler, TimerHandle, TokioScheduler};
pub use session::{TrainingFeedback, TrainingSession};
pub use store::{SessionHistoryStore, StoreError};
