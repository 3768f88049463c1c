use async_trait::async_trait;
use chrono::{DateTime, Utc};
use quiz_core::Clock;
use quiz_core::model::{
    AnswerOption, Category, CategoryId, OptionId, Question, QuestionId, QuestionType,
};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

//
// ─── RECORDS ───────────────────────────────────────────────────────────────────
//

/// Insert shape for a question. The store assigns `created_at`.
#[derive(Debug, Clone)]
pub struct NewQuestionRecord {
    pub id: QuestionId,
    pub category: String,
    pub question_type: QuestionType,
    pub text: String,
    pub options: Vec<AnswerOption>,
    pub correct_option_ids: Vec<OptionId>,
    pub explanation: Option<String>,
}

impl NewQuestionRecord {
    #[must_use]
    pub fn from_question(question: &Question) -> Self {
        Self {
            id: question.id().clone(),
            category: question.category().to_owned(),
            question_type: question.question_type(),
            text: question.text().to_owned(),
            options: question.options().to_vec(),
            correct_option_ids: question.correct_option_ids().iter().cloned().collect(),
            explanation: question.explanation().map(str::to_owned),
        }
    }

    /// Convert the record into a domain `Question` stamped with `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the record violates question invariants.
    pub fn into_question(self, created_at: DateTime<Utc>) -> Result<Question, StorageError> {
        Question::from_persisted(
            self.id,
            self.category,
            self.question_type,
            self.text,
            self.options,
            self.correct_option_ids,
            self.explanation,
            created_at,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

/// Insert shape for a category. The store assigns `created_at`.
#[derive(Debug, Clone)]
pub struct NewCategoryRecord {
    pub id: CategoryId,
    pub name: String,
    pub icon: String,
    pub color: String,
    pub description: Option<String>,
}

impl NewCategoryRecord {
    #[must_use]
    pub fn from_category(category: &Category) -> Self {
        Self {
            id: category.id().clone(),
            name: category.name().to_owned(),
            icon: category.icon_name().to_owned(),
            color: category.color_token().to_owned(),
            description: category.description().map(str::to_owned),
        }
    }

    /// Convert the record into a domain `Category` stamped with `created_at`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the record violates category invariants.
    pub fn into_category(self, created_at: DateTime<Utc>) -> Result<Category, StorageError> {
        Category::new(
            self.id,
            self.name,
            self.icon,
            self.color,
            self.description,
            created_at,
        )
        .map_err(|e| StorageError::Serialization(e.to_string()))
    }
}

//
// ─── CONTRACTS ─────────────────────────────────────────────────────────────────
//

/// Repository contract for questions.
///
/// List operations return the newest question first.
#[async_trait]
pub trait QuestionRepository: Send + Sync {
    /// List every stored question.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport or decoding failures.
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError>;

    /// List the questions of one category, by category name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport or decoding failures.
    async fn list_questions_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Question>, StorageError>;

    /// Count the questions of one category, by category name.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport failures.
    async fn count_questions_by_category(&self, category: &str) -> Result<u32, StorageError>;

    /// Fetch a question by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport or decoding failures.
    async fn get_question(&self, id: &QuestionId) -> Result<Option<Question>, StorageError>;

    /// Insert a question and return it with the store-assigned timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id already exists.
    async fn insert_question(&self, record: NewQuestionRecord) -> Result<Question, StorageError>;

    /// Replace the content of an existing question, keeping its timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the question does not exist.
    async fn update_question(&self, question: &Question) -> Result<Question, StorageError>;

    /// Delete a question by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the question does not exist.
    async fn delete_question(&self, id: &QuestionId) -> Result<(), StorageError>;
}

/// Repository contract for categories.
///
/// List operations return the newest category first.
#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// List every stored category.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport or decoding failures.
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError>;

    /// Fetch a category by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on transport or decoding failures.
    async fn get_category(&self, id: &CategoryId) -> Result<Option<Category>, StorageError>;

    /// Insert a category and return it with the store-assigned timestamp.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Conflict` if the id or the name already exists.
    async fn insert_category(&self, record: NewCategoryRecord) -> Result<Category, StorageError>;

    /// Delete a category by ID. Questions that reference it are left in place.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the category does not exist.
    async fn delete_category(&self, id: &CategoryId) -> Result<(), StorageError>;
}

//
// ─── IN-MEMORY ─────────────────────────────────────────────────────────────────
//

/// Simple in-memory repository implementation for testing and prototyping.
///
/// Rows are kept in insertion order; listings sort by `created_at` descending
/// and break ties by the most recent insertion.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    clock: Clock,
    questions: Arc<Mutex<Vec<Question>>>,
    categories: Arc<Mutex<Vec<Category>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Use the given clock to stamp inserted rows.
    #[must_use]
    pub fn with_clock(mut self, clock: Clock) -> Self {
        self.clock = clock;
        self
    }

    fn lock_err<E: std::fmt::Display>(e: E) -> StorageError {
        StorageError::Connection(e.to_string())
    }
}

fn newest_first<T: Clone>(rows: &[T], created_at: impl Fn(&T) -> DateTime<Utc>) -> Vec<T> {
    let mut out: Vec<T> = rows.iter().rev().cloned().collect();
    out.sort_by_key(|row| std::cmp::Reverse(created_at(row)));
    out
}

#[async_trait]
impl QuestionRepository for InMemoryRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let guard = self.questions.lock().map_err(Self::lock_err)?;
        Ok(newest_first(&guard, Question::created_at))
    }

    async fn list_questions_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Question>, StorageError> {
        let guard = self.questions.lock().map_err(Self::lock_err)?;
        let matching: Vec<Question> = guard
            .iter()
            .filter(|q| q.category() == category)
            .cloned()
            .collect();
        Ok(newest_first(&matching, Question::created_at))
    }

    async fn count_questions_by_category(&self, category: &str) -> Result<u32, StorageError> {
        let guard = self.questions.lock().map_err(Self::lock_err)?;
        let count = guard.iter().filter(|q| q.category() == category).count();
        u32::try_from(count).map_err(|_| StorageError::Serialization("count overflow".into()))
    }

    async fn get_question(&self, id: &QuestionId) -> Result<Option<Question>, StorageError> {
        let guard = self.questions.lock().map_err(Self::lock_err)?;
        Ok(guard.iter().find(|q| q.id() == id).cloned())
    }

    async fn insert_question(&self, record: NewQuestionRecord) -> Result<Question, StorageError> {
        let question = record.into_question(self.clock.now())?;
        let mut guard = self.questions.lock().map_err(Self::lock_err)?;
        if guard.iter().any(|q| q.id() == question.id()) {
            return Err(StorageError::Conflict);
        }
        guard.push(question.clone());
        Ok(question)
    }

    async fn update_question(&self, question: &Question) -> Result<Question, StorageError> {
        let mut guard = self.questions.lock().map_err(Self::lock_err)?;
        let slot = guard
            .iter_mut()
            .find(|q| q.id() == question.id())
            .ok_or(StorageError::NotFound)?;
        let updated = question.with_created_at(slot.created_at());
        *slot = updated.clone();
        Ok(updated)
    }

    async fn delete_question(&self, id: &QuestionId) -> Result<(), StorageError> {
        let mut guard = self.questions.lock().map_err(Self::lock_err)?;
        let before = guard.len();
        guard.retain(|q| q.id() != id);
        if guard.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let guard = self.categories.lock().map_err(Self::lock_err)?;
        Ok(newest_first(&guard, Category::created_at))
    }

    async fn get_category(&self, id: &CategoryId) -> Result<Option<Category>, StorageError> {
        let guard = self.categories.lock().map_err(Self::lock_err)?;
        Ok(guard.iter().find(|c| c.id() == id).cloned())
    }

    async fn insert_category(&self, record: NewCategoryRecord) -> Result<Category, StorageError> {
        let category = record.into_category(self.clock.now())?;
        let mut guard = self.categories.lock().map_err(Self::lock_err)?;
        if guard
            .iter()
            .any(|c| c.id() == category.id() || c.name() == category.name())
        {
            return Err(StorageError::Conflict);
        }
        guard.push(category.clone());
        Ok(category)
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<(), StorageError> {
        let mut guard = self.categories.lock().map_err(Self::lock_err)?;
        let before = guard.len();
        guard.retain(|c| c.id() != id);
        if guard.len() == before {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}

/// Aggregates question and category repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub questions: Arc<dyn QuestionRepository>,
    pub categories: Arc<dyn CategoryRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        Self::from_in_memory(InMemoryRepository::new())
    }

    #[must_use]
    pub fn from_in_memory(repo: InMemoryRepository) -> Self {
        let questions: Arc<dyn QuestionRepository> = Arc::new(repo.clone());
        let categories: Arc<dyn CategoryRepository> = Arc::new(repo);
        Self {
            questions,
            categories,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quiz_core::model::QuestionDraft;
    use quiz_core::time::{fixed_clock, fixed_now};

    fn build_question(id: &str, category: &str) -> Question {
        QuestionDraft {
            category: category.into(),
            question_type: QuestionType::SingleChoice,
            text: format!("Question {id}"),
            options: vec![
                AnswerOption::new(OptionId::new("a"), "A").unwrap(),
                AnswerOption::new(OptionId::new("b"), "B").unwrap(),
            ],
            correct_option_ids: vec![OptionId::new("b")],
            explanation: None,
        }
        .validate(QuestionId::new(id), fixed_now())
        .unwrap()
    }

    fn build_category(id: &str, name: &str) -> Category {
        Category::new(CategoryId::new(id), name, "Cpu", "bg-blue-100 text-blue-600", None, fixed_now())
            .unwrap()
    }

    #[tokio::test]
    async fn insert_stamps_store_time() {
        let later = fixed_now() + Duration::hours(1);
        let repo = InMemoryRepository::new().with_clock(Clock::fixed(later));

        let stored = repo
            .insert_question(NewQuestionRecord::from_question(&build_question("q1", "Rust")))
            .await
            .unwrap();
        assert_eq!(stored.created_at(), later);
    }

    #[tokio::test]
    async fn lists_newest_first_with_insertion_tiebreak() {
        let clock = fixed_clock();
        let repo = InMemoryRepository::new().with_clock(clock);
        repo.insert_question(NewQuestionRecord::from_question(&build_question("q1", "Rust")))
            .await
            .unwrap();
        repo.insert_question(NewQuestionRecord::from_question(&build_question("q2", "Rust")))
            .await
            .unwrap();

        let repo_later = repo.clone().with_clock(clock.later(Duration::minutes(1)));
        repo_later
            .insert_question(NewQuestionRecord::from_question(&build_question("q3", "Go")))
            .await
            .unwrap();

        let ids: Vec<String> = repo
            .list_questions()
            .await
            .unwrap()
            .iter()
            .map(|q| q.id().to_string())
            .collect();
        assert_eq!(ids, vec!["q3", "q2", "q1"]);

        let rust = repo.list_questions_by_category("Rust").await.unwrap();
        assert_eq!(rust.len(), 2);
        assert_eq!(repo.count_questions_by_category("Go").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn duplicate_ids_and_names_conflict() {
        let repo = InMemoryRepository::new();
        let question = build_question("q1", "Rust");
        repo.insert_question(NewQuestionRecord::from_question(&question))
            .await
            .unwrap();
        let err = repo
            .insert_question(NewQuestionRecord::from_question(&question))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict));

        repo.insert_category(NewCategoryRecord::from_category(&build_category("c1", "Rust")))
            .await
            .unwrap();
        let err = repo
            .insert_category(NewCategoryRecord::from_category(&build_category("c2", "Rust")))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::Conflict));
    }

    #[tokio::test]
    async fn delete_missing_is_not_found() {
        let repo = InMemoryRepository::new();
        let err = repo
            .delete_question(&QuestionId::new("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
        let err = repo
            .delete_category(&CategoryId::new("nope"))
            .await
            .unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[tokio::test]
    async fn update_keeps_original_timestamp() {
        let repo = InMemoryRepository::new().with_clock(fixed_clock());
        let stored = repo
            .insert_question(NewQuestionRecord::from_question(&build_question("q1", "Rust")))
            .await
            .unwrap();

        let edited = QuestionDraft {
            category: "Rust".into(),
            question_type: QuestionType::MultipleChoice,
            text: "Edited".into(),
            options: stored.options().to_vec(),
            correct_option_ids: vec![OptionId::new("a"), OptionId::new("b")],
            explanation: Some("both".into()),
        }
        .validate(stored.id().clone(), fixed_now() + Duration::days(3))
        .unwrap();

        let updated = repo.update_question(&edited).await.unwrap();
        assert_eq!(updated.created_at(), stored.created_at());
        assert_eq!(updated.text(), "Edited");

        let fetched = repo.get_question(stored.id()).await.unwrap().unwrap();
        assert_eq!(fetched.question_type(), QuestionType::MultipleChoice);
    }
}
