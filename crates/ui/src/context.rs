use std::sync::Arc;

use dioxus::prelude::*;
use quiz_core::model::{Category, CategoryId, TypeFilter};
use services::{CatalogState, PracticeService};

use crate::views::ViewError;
use crate::vm::{QuizVm, ResultsVm, SetupVm, clamp_notice_text, map_results};

pub trait UiApp: Send + Sync {
    fn practice(&self) -> Arc<PracticeService>;
    fn catalog(&self) -> CatalogState;
    fn default_question_count(&self) -> usize;
}

#[derive(Clone)]
pub struct AppContext {
    practice: Arc<PracticeService>,
    app: Arc<dyn UiApp>,
    default_question_count: usize,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            practice: app.practice(),
            app: Arc::clone(app),
            default_question_count: app.default_question_count(),
        }
    }

    #[must_use]
    pub fn practice(&self) -> Arc<PracticeService> {
        Arc::clone(&self.practice)
    }

    /// A fresh, unloaded catalog projection.
    #[must_use]
    pub fn catalog(&self) -> CatalogState {
        self.app.catalog()
    }

    #[must_use]
    pub fn default_question_count(&self) -> usize {
        self.default_question_count
    }

    /// Load the setup screen for the chosen category.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::Missing` for an unknown category, or storage failures.
    pub async fn open_setup(&self, category_id: &CategoryId) -> Result<SetupVm, ViewError> {
        let category = self.practice.category(category_id).await?;
        let summary = self
            .practice
            .pool_summary(category.name(), TypeFilter::All)
            .await?;
        Ok(SetupVm::new(category, self.default_question_count, summary))
    }
}

/// The practice run in progress.
///
/// Lives in the [`PracticeSlot`]: filled when the learner starts practicing,
/// emptied when they return home.
#[derive(Clone)]
pub struct PracticeContext {
    category: Category,
    quiz: QuizVm,
    notice: Option<String>,
}

impl PracticeContext {
    /// Start a session with the setup screen's choices.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::EmptyPool` when nothing matches, or storage failures.
    pub async fn start(app: &AppContext, setup: &SetupVm) -> Result<Self, ViewError> {
        let prepared = app
            .practice
            .start(setup.category().name(), &setup.config())
            .await?;
        Ok(Self {
            category: setup.category().clone(),
            quiz: QuizVm::new(prepared.session),
            notice: prepared.clamp.map(clamp_notice_text),
        })
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn quiz(&self) -> &QuizVm {
        &self.quiz
    }

    pub fn quiz_mut(&mut self) -> &mut QuizVm {
        &mut self.quiz
    }

    /// The clamp notice, until the learner dismisses it.
    #[must_use]
    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn dismiss_notice(&mut self) {
        self.notice = None;
    }

    /// Results for a finished run; `None` while questions remain.
    #[must_use]
    pub fn results(&self) -> Option<ResultsVm> {
        let session = self.quiz.session();
        session.is_finished().then(|| map_results(session))
    }
}

/// Shared slot for the current practice run, provided next to [`AppContext`].
pub type PracticeSlot = Signal<Option<PracticeContext>>;

/// Provide an empty [`PracticeSlot`] to the component tree below.
pub fn provide_practice_slot() -> PracticeSlot {
    use_context_provider(|| Signal::new(None::<PracticeContext>))
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
