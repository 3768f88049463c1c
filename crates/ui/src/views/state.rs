use dioxus::prelude::*;
use services::{CatalogError, QuizError, SetupError, StorageError};

/// User-facing failure of a screen action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ViewError {
    EmptyPool { category: String },
    NothingRequested,
    NoSelection,
    InvalidInput(String),
    PasswordRequired { question_count: u32 },
    PasswordRejected,
    Duplicate,
    Missing,
    Unknown,
}

impl ViewError {
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            ViewError::EmptyPool { category } => {
                format!("No matching questions in {category}. Try another type or category.")
            }
            ViewError::NothingRequested => "Ask for at least one question.".to_string(),
            ViewError::NoSelection => "Select at least one answer.".to_string(),
            ViewError::InvalidInput(reason) => reason.clone(),
            ViewError::PasswordRequired { question_count } => format!(
                "This category still has {question_count} questions. Enter the admin password."
            ),
            ViewError::PasswordRejected => "Wrong admin password.".to_string(),
            ViewError::Duplicate => "An entry with that name already exists.".to_string(),
            ViewError::Missing => "That item no longer exists.".to_string(),
            ViewError::Unknown => "Something went wrong. Please try again.".to_string(),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(ViewError),
}

#[must_use]
pub fn view_state_from_resource<T: Clone>(
    resource: &Resource<Result<T, ViewError>>,
) -> ViewState<T> {
    match resource.state().cloned() {
        UseResourceState::Pending => ViewState::Loading,
        UseResourceState::Ready => match resource.value().read().as_ref() {
            Some(Ok(data)) => ViewState::Ready(data.clone()),
            Some(Err(err)) => ViewState::Error(err.clone()),
            None => ViewState::Error(ViewError::Unknown),
        },
        UseResourceState::Paused | UseResourceState::Stopped => ViewState::Idle,
    }
}

fn from_storage(err: &StorageError) -> ViewError {
    match err {
        StorageError::Conflict => ViewError::Duplicate,
        StorageError::NotFound => ViewError::Missing,
        other => {
            tracing::warn!(error = %other, "storage failure");
            ViewError::Unknown
        }
    }
}

impl From<QuizError> for ViewError {
    fn from(err: QuizError) -> Self {
        match err {
            QuizError::NoSelection => ViewError::NoSelection,
            QuizError::UnknownOption { .. } => {
                ViewError::InvalidInput("No such option.".to_string())
            }
            other => ViewError::InvalidInput(other.to_string()),
        }
    }
}

impl From<SetupError> for ViewError {
    fn from(err: SetupError) -> Self {
        match err {
            SetupError::EmptyPool { category, .. } => ViewError::EmptyPool { category },
            SetupError::NothingRequested => ViewError::NothingRequested,
            SetupError::CategoryNotFound => ViewError::Missing,
            SetupError::Storage(e) => from_storage(&e),
            other => {
                tracing::warn!(error = %other, "session setup failed");
                ViewError::Unknown
            }
        }
    }
}

impl From<CatalogError> for ViewError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::Question(e) => ViewError::InvalidInput(e.to_string()),
            CatalogError::Category(e) => ViewError::InvalidInput(e.to_string()),
            CatalogError::PasswordRequired { question_count } => {
                ViewError::PasswordRequired { question_count }
            }
            CatalogError::PasswordRejected => ViewError::PasswordRejected,
            CatalogError::Storage(e) => from_storage(&e),
            _ => ViewError::Unknown,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::TypeFilter;

    #[test]
    fn setup_errors_map_to_screen_messages() {
        let err = ViewError::from(SetupError::EmptyPool {
            category: "Art".into(),
            filter: TypeFilter::Single,
        });
        assert_eq!(err, ViewError::EmptyPool { category: "Art".into() });
        assert!(err.message().contains("Art"));

        let err = ViewError::from(SetupError::Storage(StorageError::Connection("down".into())));
        assert_eq!(err, ViewError::Unknown);
    }

    #[test]
    fn catalog_conflict_is_duplicate() {
        let err = ViewError::from(CatalogError::Storage(StorageError::Conflict));
        assert_eq!(err, ViewError::Duplicate);
        assert_eq!(ViewError::from(QuizError::NoSelection), ViewError::NoSelection);
    }
}
