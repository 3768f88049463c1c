#![forbid(unsafe_code)]

pub mod admin_gate;
pub mod app_services;
pub mod catalog;
pub mod category_service;
pub mod error;
pub mod question_service;
pub mod sessions;

pub use quiz_core::Clock;
pub use storage::repository::StorageError;

pub use admin_gate::AdminGate;
pub use app_services::AppServices;
pub use catalog::CatalogState;
pub use category_service::{CategoryService, DeleteRequirement, NewCategory};
pub use error::{AppServicesError, CatalogError, QuizError, SetupError};
pub use question_service::QuestionService;

pub use sessions::{
    Advance, AnswerRecord, ClampNotice, PoolSummary, PracticeService, PreparedSession,
    QuizProgress, QuizSession, QuizState, Score, SessionBuilder, SessionPlan, SubmitOutcome,
};
