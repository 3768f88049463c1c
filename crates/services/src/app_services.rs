use std::sync::Arc;

use storage::repository::Storage;

use crate::Clock;
use crate::admin_gate::AdminGate;
use crate::catalog::CatalogState;
use crate::category_service::CategoryService;
use crate::error::AppServicesError;
use crate::question_service::QuestionService;
use crate::sessions::PracticeService;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    practice: Arc<PracticeService>,
    category_service: Arc<CategoryService>,
    question_service: Arc<QuestionService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, running migrations first.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        clock: Clock,
        gate: AdminGate,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        tracing::info!(db_url, "storage ready");
        Ok(Self::from_storage(&storage, clock, gate))
    }

    /// Build services backed by a fresh in-memory store.
    #[must_use]
    pub fn new_in_memory(clock: Clock, gate: AdminGate) -> Self {
        Self::from_storage(&Storage::in_memory(), clock, gate)
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock, gate: AdminGate) -> Self {
        let practice = Arc::new(PracticeService::new(
            Arc::clone(&storage.categories),
            Arc::clone(&storage.questions),
        ));
        let category_service = Arc::new(CategoryService::new(
            clock,
            Arc::clone(&storage.categories),
            Arc::clone(&storage.questions),
            gate,
        ));
        let question_service = Arc::new(QuestionService::new(clock, Arc::clone(&storage.questions)));

        Self {
            practice,
            category_service,
            question_service,
        }
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }

    #[must_use]
    pub fn category_service(&self) -> Arc<CategoryService> {
        Arc::clone(&self.category_service)
    }

    #[must_use]
    pub fn question_service(&self) -> Arc<QuestionService> {
        Arc::clone(&self.question_service)
    }

    /// A fresh, unloaded catalog projection over these services.
    #[must_use]
    pub fn catalog(&self) -> CatalogState {
        CatalogState::new(self.category_service(), self.question_service())
    }
}
