use std::sync::Arc;

use quiz_core::model::{Question, QuestionDraft, QuestionId};
use storage::repository::{NewQuestionRecord, QuestionRepository, StorageError};

use crate::Clock;
use crate::error::CatalogError;

/// Orchestrates question authoring and persistence.
#[derive(Clone)]
pub struct QuestionService {
    clock: Clock,
    questions: Arc<dyn QuestionRepository>,
}

impl QuestionService {
    #[must_use]
    pub fn new(clock: Clock, questions: Arc<dyn QuestionRepository>) -> Self {
        Self { clock, questions }
    }

    /// List all questions, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn list_questions(&self) -> Result<Vec<Question>, CatalogError> {
        Ok(self.questions.list_questions().await?)
    }

    /// List the questions owned by the category named `category`, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn list_by_category(&self, category: &str) -> Result<Vec<Question>, CatalogError> {
        Ok(self.questions.list_questions_by_category(category).await?)
    }

    /// Fetch a question by ID.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn get_question(&self, id: &QuestionId) -> Result<Option<Question>, CatalogError> {
        Ok(self.questions.get_question(id).await?)
    }

    /// Validate `draft` under a fresh id and persist it.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Question` for validation failures.
    /// Returns `CatalogError::Storage` if persistence fails.
    pub async fn create_question(&self, draft: QuestionDraft) -> Result<Question, CatalogError> {
        let question = draft.validate(QuestionId::generate(), self.clock.now())?;
        let created = self
            .questions
            .insert_question(NewQuestionRecord::from_question(&question))
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "question insert failed"))?;
        tracing::info!(id = %created.id(), category = created.category(), "question created");
        Ok(created)
    }

    /// Replace the content of an existing question, keeping its creation time.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Question` for validation failures.
    /// Returns `StorageError::NotFound` (as `CatalogError::Storage`) for an unknown id.
    pub async fn update_question(
        &self,
        id: &QuestionId,
        draft: QuestionDraft,
    ) -> Result<Question, CatalogError> {
        let existing = self
            .questions
            .get_question(id)
            .await?
            .ok_or(StorageError::NotFound)?;
        let question = draft.validate(id.clone(), existing.created_at())?;
        let updated = self.questions.update_question(&question).await?;
        tracing::info!(id = %id, "question updated");
        Ok(updated)
    }

    /// Delete a question by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` (as `CatalogError::Storage`) for an unknown id.
    pub async fn delete_question(&self, id: &QuestionId) -> Result<(), CatalogError> {
        self.questions.delete_question(id).await?;
        tracing::info!(id = %id, "question deleted");
        Ok(())
    }
}
