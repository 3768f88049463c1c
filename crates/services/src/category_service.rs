use std::sync::Arc;

use quiz_core::model::{Category, CategoryColor, CategoryIcon, CategoryId};
use storage::repository::{CategoryRepository, NewCategoryRecord, QuestionRepository, StorageError};

use crate::Clock;
use crate::admin_gate::AdminGate;
use crate::error::CatalogError;

/// What the admin screen must ask for before deleting a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteRequirement {
    /// The category is empty; a plain yes/no is enough.
    Confirm,
    /// The category still owns questions; the admin password is required.
    Password { question_count: u32 },
}

/// Fields collected by the admin "new category" form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub icon: CategoryIcon,
    pub color: CategoryColor,
    pub description: Option<String>,
}

/// Orchestrates category creation, listing and guarded deletion.
#[derive(Clone)]
pub struct CategoryService {
    clock: Clock,
    categories: Arc<dyn CategoryRepository>,
    questions: Arc<dyn QuestionRepository>,
    gate: AdminGate,
}

impl CategoryService {
    #[must_use]
    pub fn new(
        clock: Clock,
        categories: Arc<dyn CategoryRepository>,
        questions: Arc<dyn QuestionRepository>,
        gate: AdminGate,
    ) -> Self {
        Self {
            clock,
            categories,
            questions,
            gate,
        }
    }

    /// List categories, newest first.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn list_categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.categories.list_categories().await?)
    }

    /// Fetch a category by ID.
    ///
    /// Returns `Ok(None)` when the category does not exist.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn get_category(&self, id: &CategoryId) -> Result<Option<Category>, CatalogError> {
        Ok(self.categories.get_category(id).await?)
    }

    /// Validate and persist a new category. The store assigns the timestamp.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Category` for validation failures.
    /// Returns `CatalogError::Storage` if persistence fails, including name conflicts.
    pub async fn create_category(&self, input: NewCategory) -> Result<Category, CatalogError> {
        let category = Category::new(
            CategoryId::generate(),
            input.name,
            input.icon.name(),
            input.color.token(),
            input.description,
            self.clock.now(),
        )?;
        let created = self
            .categories
            .insert_category(NewCategoryRecord::from_category(&category))
            .await
            .inspect_err(|e| {
                tracing::warn!(name = category.name(), error = %e, "category insert failed");
            })?;
        tracing::info!(id = %created.id(), name = created.name(), "category created");
        Ok(created)
    }

    /// Number of stored questions owned by the category named `name`.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn question_count(&self, name: &str) -> Result<u32, CatalogError> {
        Ok(self.questions.count_questions_by_category(name).await?)
    }

    /// Decide how deleting `category` must be confirmed.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Storage` if repository access fails.
    pub async fn delete_requirement(
        &self,
        category: &Category,
    ) -> Result<DeleteRequirement, CatalogError> {
        let question_count = self.question_count(category.name()).await?;
        Ok(if question_count == 0 {
            DeleteRequirement::Confirm
        } else {
            DeleteRequirement::Password { question_count }
        })
    }

    /// Delete a category, checking `password` when it still owns questions.
    ///
    /// Questions of the deleted category are kept.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::PasswordRequired` or `CatalogError::PasswordRejected`
    /// when the gate refuses, `StorageError::NotFound` for an unknown id.
    pub async fn delete_category(
        &self,
        id: &CategoryId,
        password: Option<&str>,
    ) -> Result<(), CatalogError> {
        let category = self
            .categories
            .get_category(id)
            .await?
            .ok_or(StorageError::NotFound)?;

        if let DeleteRequirement::Password { question_count } =
            self.delete_requirement(&category).await?
        {
            match password {
                None => return Err(CatalogError::PasswordRequired { question_count }),
                Some(attempt) if !self.gate.verify(attempt) => {
                    tracing::warn!(id = %id, "category delete refused: wrong password");
                    return Err(CatalogError::PasswordRejected);
                }
                Some(_) => {}
            }
        }

        self.categories.delete_category(id).await?;
        tracing::info!(id = %id, name = category.name(), "category deleted");
        Ok(())
    }
}
