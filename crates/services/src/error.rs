//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{CategoryError, OptionId, QuestionError, TypeFilter};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by a running `QuizSession`.
///
/// Every rejected operation leaves the session state unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum QuizError {
    #[error("session has no questions")]
    EmptySession,
    #[error("select at least one option before submitting")]
    NoSelection,
    #[error("question already answered")]
    AlreadyAnswered,
    #[error("answer the current question before moving on")]
    NotAnswered,
    #[error("session already finished")]
    Finished,
    #[error("option {id} does not belong to the current question")]
    UnknownOption { id: OptionId },
}

/// Errors emitted while preparing a practice session.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SetupError {
    #[error("no {filter} questions available in category {category}")]
    EmptyPool { category: String, filter: TypeFilter },
    #[error("question count must be at least 1")]
    NothingRequested,
    #[error("category not found")]
    CategoryNotFound,
    #[error(transparent)]
    Quiz(#[from] QuizError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CategoryService`, `QuestionService` and `CatalogState`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogError {
    #[error(transparent)]
    Question(#[from] QuestionError),
    #[error(transparent)]
    Category(#[from] CategoryError),
    #[error("category still has {question_count} questions; admin password required")]
    PasswordRequired { question_count: u32 },
    #[error("admin password rejected")]
    PasswordRejected,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}
