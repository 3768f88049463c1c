//! Locally held copy of the category and question lists.
//!
//! Mutations go to storage first; the local lists change only when storage
//! accepted the change, so a failed call never leaves them out of sync.

use std::sync::Arc;

use quiz_core::model::{Category, CategoryId, Question, QuestionDraft, QuestionId};

use crate::category_service::{CategoryService, DeleteRequirement, NewCategory};
use crate::error::CatalogError;
use crate::question_service::QuestionService;

#[derive(Clone)]
pub struct CatalogState {
    category_service: Arc<CategoryService>,
    question_service: Arc<QuestionService>,
    categories: Vec<Category>,
    questions: Vec<Question>,
}

impl CatalogState {
    /// An empty projection; call [`CatalogState::refresh`] to load it.
    #[must_use]
    pub fn new(category_service: Arc<CategoryService>, question_service: Arc<QuestionService>) -> Self {
        Self {
            category_service,
            question_service,
            categories: Vec::new(),
            questions: Vec::new(),
        }
    }

    /// Reload both lists from storage.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` and keeps the previous lists when loading fails.
    pub async fn refresh(&mut self) -> Result<(), CatalogError> {
        let categories = self.category_service.list_categories().await?;
        let questions = self.question_service.list_questions().await?;
        self.categories = categories;
        self.questions = questions;
        Ok(())
    }

    #[must_use]
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn category(&self, id: &CategoryId) -> Option<&Category> {
        self.categories.iter().find(|c| c.id() == id)
    }

    /// Questions owned by the category named `name`, in list order.
    pub fn questions_in<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a Question> + 'a {
        self.questions.iter().filter(move |q| q.category() == name)
    }

    /// Create a category and put it at the front of the local list.
    ///
    /// # Errors
    ///
    /// Returns the service error unchanged; the local list is untouched.
    pub async fn add_category(&mut self, input: NewCategory) -> Result<&Category, CatalogError> {
        let created = self.category_service.create_category(input).await?;
        self.categories.insert(0, created);
        Ok(&self.categories[0])
    }

    /// How deleting the category must be confirmed.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if the question count cannot be read.
    pub async fn delete_requirement(
        &self,
        category: &Category,
    ) -> Result<DeleteRequirement, CatalogError> {
        self.category_service.delete_requirement(category).await
    }

    /// Delete a category in storage, then drop it from the local list.
    ///
    /// # Errors
    ///
    /// Returns the service error unchanged; the local list is untouched.
    pub async fn remove_category(
        &mut self,
        id: &CategoryId,
        password: Option<&str>,
    ) -> Result<(), CatalogError> {
        self.category_service.delete_category(id, password).await?;
        self.categories.retain(|c| c.id() != id);
        Ok(())
    }

    /// Create a question and put it at the front of the local list.
    ///
    /// # Errors
    ///
    /// Returns the service error unchanged; the local list is untouched.
    pub async fn add_question(&mut self, draft: QuestionDraft) -> Result<&Question, CatalogError> {
        let created = self.question_service.create_question(draft).await?;
        self.questions.insert(0, created);
        Ok(&self.questions[0])
    }

    /// Delete a question in storage, then drop it from the local list.
    ///
    /// # Errors
    ///
    /// Returns the service error unchanged; the local list is untouched.
    pub async fn remove_question(&mut self, id: &QuestionId) -> Result<(), CatalogError> {
        self.question_service.delete_question(id).await?;
        self.questions.retain(|q| q.id() != id);
        Ok(())
    }
}
