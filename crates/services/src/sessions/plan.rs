use rand::Rng;

use quiz_core::model::{Question, QuizMode, TypeFilter};

use super::shuffle::shuffle_in_place;

/// Selection result for a session build.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionPlan {
    pub questions: Vec<Question>,
    /// Questions left after the type filter, before truncation.
    pub available: usize,
    pub requested: usize,
}

impl SessionPlan {
    /// Total number of questions in this plan.
    #[must_use]
    pub fn total(&self) -> usize {
        self.questions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// True when fewer questions were available than requested.
    #[must_use]
    pub fn was_clamped(&self) -> bool {
        self.requested > self.available
    }
}

/// Turns a question pool into the ordered list a session runs through.
#[derive(Debug, Clone, Copy)]
pub struct SessionBuilder {
    mode: QuizMode,
    type_filter: TypeFilter,
    requested: usize,
}

impl SessionBuilder {
    #[must_use]
    pub fn new(requested: usize) -> Self {
        Self {
            mode: QuizMode::Sequential,
            type_filter: TypeFilter::All,
            requested,
        }
    }

    #[must_use]
    pub fn with_mode(mut self, mode: QuizMode) -> Self {
        self.mode = mode;
        self
    }

    #[must_use]
    pub fn with_type_filter(mut self, type_filter: TypeFilter) -> Self {
        self.type_filter = type_filter;
        self
    }

    /// Build a plan using the thread-local generator.
    pub fn build<'a>(self, pool: impl IntoIterator<Item = &'a Question>) -> SessionPlan {
        self.build_with_rng(pool, &mut rand::rng())
    }

    /// Build a plan from `pool` without touching it.
    ///
    /// - Questions are filtered by type, keeping the caller's order.
    /// - `Random` shuffles the filtered questions, then shuffles each kept
    ///   question's options independently.
    /// - The result is truncated to `min(requested, available)`; zero yields
    ///   an empty plan.
    pub fn build_with_rng<'a, R: Rng + ?Sized>(
        self,
        pool: impl IntoIterator<Item = &'a Question>,
        rng: &mut R,
    ) -> SessionPlan {
        let mut questions: Vec<Question> = pool
            .into_iter()
            .filter(|q| self.type_filter.matches(q.question_type()))
            .cloned()
            .collect();
        let available = questions.len();

        if self.mode.is_random() {
            shuffle_in_place(&mut questions, rng);
        }
        questions.truncate(self.requested.min(available));

        if self.mode.is_random() {
            questions = questions
                .iter()
                .map(|q| q.with_options_reordered(|options| shuffle_in_place(options, rng)))
                .collect();
        }

        tracing::debug!(
            mode = %self.mode,
            filter = %self.type_filter,
            available,
            requested = self.requested,
            selected = questions.len(),
            "session built"
        );

        SessionPlan {
            questions,
            available,
            requested: self.requested,
        }
    }
}

/// Filter, order and truncate `pool` for a session.
#[must_use]
pub fn build_session(
    pool: &[Question],
    type_filter: TypeFilter,
    mode: QuizMode,
    requested_count: usize,
) -> Vec<Question> {
    SessionBuilder::new(requested_count)
        .with_mode(mode)
        .with_type_filter(type_filter)
        .build(pool)
        .questions
}
