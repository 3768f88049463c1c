use rand::Rng;

use quiz_core::model::{Question, SessionConfig, TypeFilter};

use super::plan::SessionBuilder;
use super::service::QuizSession;
use crate::error::SetupError;

/// Question counts shown on the setup screen for one category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PoolSummary {
    /// Questions stored for the category, regardless of type.
    pub category_total: usize,
    /// Questions left after the type filter.
    pub available: usize,
}

/// Raised when the learner asked for more questions than are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClampNotice {
    pub requested: usize,
    pub available: usize,
}

/// A session ready to run, plus what the setup screen should tell the learner.
#[derive(Debug, Clone)]
pub struct PreparedSession {
    pub session: QuizSession,
    pub summary: PoolSummary,
    pub clamp: Option<ClampNotice>,
}

/// Count the questions of `category` and those matching `filter`.
#[must_use]
pub fn summarize_pool(questions: &[Question], category: &str, filter: TypeFilter) -> PoolSummary {
    let in_category = questions.iter().filter(|q| q.category() == category);
    let (category_total, available) = in_category.fold((0, 0), |(total, matching), q| {
        (
            total + 1,
            matching + usize::from(filter.matches(q.question_type())),
        )
    });
    PoolSummary {
        category_total,
        available,
    }
}

/// Restrict `questions` to `category` and build a session from `config`.
///
/// # Errors
///
/// Returns `SetupError::EmptyPool` when no question matches, or
/// `SetupError::NothingRequested` for a requested count of zero.
pub fn prepare_session(
    questions: &[Question],
    category: &str,
    config: &SessionConfig,
) -> Result<PreparedSession, SetupError> {
    prepare_session_with_rng(questions, category, config, &mut rand::rng())
}

/// Same as [`prepare_session`] with an explicit random source.
///
/// # Errors
///
/// See [`prepare_session`].
pub fn prepare_session_with_rng<R: Rng + ?Sized>(
    questions: &[Question],
    category: &str,
    config: &SessionConfig,
    rng: &mut R,
) -> Result<PreparedSession, SetupError> {
    let summary = summarize_pool(questions, category, config.type_filter);
    if summary.available == 0 {
        tracing::warn!(category, filter = %config.type_filter, "no eligible questions");
        return Err(SetupError::EmptyPool {
            category: category.to_owned(),
            filter: config.type_filter,
        });
    }
    if config.requested_count == 0 {
        return Err(SetupError::NothingRequested);
    }

    let plan = SessionBuilder::new(config.requested_count)
        .with_mode(config.mode)
        .with_type_filter(config.type_filter)
        .build_with_rng(
            questions.iter().filter(|q| q.category() == category),
            rng,
        );

    let clamp = plan.was_clamped().then_some(ClampNotice {
        requested: plan.requested,
        available: plan.available,
    });
    let session = QuizSession::new(plan.questions)?;

    Ok(PreparedSession {
        session,
        summary,
        clamp,
    })
}
