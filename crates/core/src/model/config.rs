use std::fmt;

use serde::{Deserialize, Serialize};

use crate::model::question::QuestionType;

/// Question count offered by the setup screen before the learner changes it.
pub const DEFAULT_QUESTION_COUNT: usize = 5;

/// Order in which a session presents questions and options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuizMode {
    /// Stored order for both questions and options.
    #[default]
    Sequential,
    /// Shuffled questions, and shuffled options within each question.
    Random,
}

impl QuizMode {
    #[must_use]
    pub fn is_random(self) -> bool {
        matches!(self, QuizMode::Random)
    }
}

impl fmt::Display for QuizMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuizMode::Sequential => f.write_str("sequential"),
            QuizMode::Random => f.write_str("random"),
        }
    }
}

/// Restricts a pool to one question type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TypeFilter {
    #[default]
    All,
    Single,
    Multiple,
}

impl TypeFilter {
    #[must_use]
    pub fn matches(self, question_type: QuestionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Single => question_type == QuestionType::SingleChoice,
            TypeFilter::Multiple => question_type == QuestionType::MultipleChoice,
        }
    }
}

impl fmt::Display for TypeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeFilter::All => f.write_str("all types"),
            TypeFilter::Single => f.write_str("single choice"),
            TypeFilter::Multiple => f.write_str("multiple choice"),
        }
    }
}

/// Learner choices collected before a practice session starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionConfig {
    pub mode: QuizMode,
    pub type_filter: TypeFilter,
    pub requested_count: usize,
}

impl SessionConfig {
    #[must_use]
    pub fn new(mode: QuizMode, type_filter: TypeFilter, requested_count: usize) -> Self {
        Self {
            mode,
            type_filter,
            requested_count,
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self::new(QuizMode::Sequential, TypeFilter::All, DEFAULT_QUESTION_COUNT)
    }
}
