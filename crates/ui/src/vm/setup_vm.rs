use quiz_core::model::{Category, QuizMode, SessionConfig, TypeFilter};
use services::{ClampNotice, PoolSummary, PracticeService};

use crate::views::ViewError;

/// State of the setup screen for one category.
#[derive(Clone, Debug, PartialEq)]
pub struct SetupVm {
    category: Category,
    config: SessionConfig,
    summary: PoolSummary,
}

impl SetupVm {
    #[must_use]
    pub fn new(category: Category, default_count: usize, summary: PoolSummary) -> Self {
        Self {
            category,
            config: SessionConfig {
                requested_count: default_count,
                ..SessionConfig::default()
            },
            summary,
        }
    }

    #[must_use]
    pub fn category(&self) -> &Category {
        &self.category
    }

    #[must_use]
    pub fn config(&self) -> SessionConfig {
        self.config
    }

    #[must_use]
    pub fn summary(&self) -> PoolSummary {
        self.summary
    }

    pub fn set_mode(&mut self, mode: QuizMode) {
        self.config.mode = mode;
    }

    /// Change the type filter and reload the available count.
    ///
    /// # Errors
    ///
    /// Returns `ViewError` if the pool cannot be counted.
    pub async fn set_type_filter(
        &mut self,
        practice: &PracticeService,
        filter: TypeFilter,
    ) -> Result<(), ViewError> {
        self.summary = practice.pool_summary(self.category.name(), filter).await?;
        self.config.type_filter = filter;
        Ok(())
    }

    /// Parse the question count typed by the learner.
    ///
    /// # Errors
    ///
    /// Returns `ViewError::InvalidInput` unless the input is a positive whole number.
    pub fn set_count_input(&mut self, input: &str) -> Result<(), ViewError> {
        self.config.requested_count = parse_count(input)?;
        Ok(())
    }

    #[must_use]
    pub fn can_start(&self) -> bool {
        self.summary.available > 0
    }

    #[must_use]
    pub fn availability_label(&self) -> String {
        match self.config.type_filter {
            TypeFilter::All => format!("{} questions available", self.summary.available),
            filter => format!(
                "{} of {} questions are {filter}",
                self.summary.available, self.summary.category_total
            ),
        }
    }

    #[must_use]
    pub fn mode_label(&self) -> &'static str {
        match self.config.mode {
            QuizMode::Sequential => "In order",
            QuizMode::Random => "Shuffled",
        }
    }
}

/// Parse a requested question count.
///
/// # Errors
///
/// Returns `ViewError::InvalidInput` for blank, non-numeric or zero input.
pub fn parse_count(input: &str) -> Result<usize, ViewError> {
    match input.trim().parse::<usize>() {
        Ok(0) | Err(_) => Err(ViewError::InvalidInput(
            "Enter a whole number of questions (at least 1).".to_string(),
        )),
        Ok(count) => Ok(count),
    }
}

/// Text shown when fewer questions exist than were asked for.
#[must_use]
pub fn clamp_notice_text(notice: ClampNotice) -> String {
    let noun = if notice.available == 1 { "question" } else { "questions" };
    format!(
        "Only {} {noun} available; starting with {} instead of {}.",
        notice.available, notice.available, notice.requested
    )
}
