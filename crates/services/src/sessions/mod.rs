mod grading;
mod plan;
mod progress;
mod service;
mod setup;
mod shuffle;
mod workflow;

// Public API of the session subsystem.
pub use crate::error::{QuizError, SetupError};
pub use grading::{Score, is_exact_match};
pub use plan::{SessionBuilder, SessionPlan, build_session};
pub use progress::QuizProgress;
pub use service::{Advance, AnswerRecord, QuizSession, QuizState, SubmitOutcome};
pub use setup::{
    ClampNotice, PoolSummary, PreparedSession, prepare_session, prepare_session_with_rng,
    summarize_pool,
};
pub use shuffle::{shuffle, shuffle_in_place};
pub use workflow::PracticeService;
