use std::sync::Arc;

use quiz_core::model::{Category, CategoryId, SessionConfig, TypeFilter};
use storage::repository::{CategoryRepository, QuestionRepository};

use super::setup::{PoolSummary, PreparedSession, prepare_session, summarize_pool};
use crate::error::SetupError;

/// Loads a category's questions from storage and prepares practice sessions.
///
/// The returned session no longer depends on storage.
#[derive(Clone)]
pub struct PracticeService {
    categories: Arc<dyn CategoryRepository>,
    questions: Arc<dyn QuestionRepository>,
}

impl PracticeService {
    #[must_use]
    pub fn new(
        categories: Arc<dyn CategoryRepository>,
        questions: Arc<dyn QuestionRepository>,
    ) -> Self {
        Self {
            categories,
            questions,
        }
    }

    /// Resolve the category a learner picked on the home screen.
    ///
    /// # Errors
    ///
    /// Returns `SetupError::CategoryNotFound` for an unknown id, or storage errors.
    pub async fn category(&self, id: &CategoryId) -> Result<Category, SetupError> {
        self.categories
            .get_category(id)
            .await?
            .ok_or(SetupError::CategoryNotFound)
    }

    /// Counts for the setup screen.
    ///
    /// # Errors
    ///
    /// Returns `SetupError::Storage` if the questions cannot be loaded.
    pub async fn pool_summary(
        &self,
        category: &str,
        filter: TypeFilter,
    ) -> Result<PoolSummary, SetupError> {
        let questions = self.questions.list_questions_by_category(category).await?;
        Ok(summarize_pool(&questions, category, filter))
    }

    /// Start a session for `category` with the learner's choices.
    ///
    /// # Errors
    ///
    /// Returns `SetupError` when storage fails or no question is eligible.
    pub async fn start(
        &self,
        category: &str,
        config: &SessionConfig,
    ) -> Result<PreparedSession, SetupError> {
        let questions = self
            .questions
            .list_questions_by_category(category)
            .await
            .inspect_err(|e| {
                tracing::warn!(category, error = %e, "failed to load questions");
            })?;
        // Storage lists newest first; sequential practice follows the same order.
        let prepared = prepare_session(&questions, category, config)?;
        tracing::debug!(
            category,
            mode = %config.mode,
            count = prepared.session.questions().len(),
            "practice session started"
        );
        Ok(prepared)
    }
}
