use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::ids::{OptionId, QuestionId};
use crate::model::option::AnswerOption;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum QuestionError {
    #[error("question text cannot be empty")]
    EmptyText,

    #[error("question category cannot be empty")]
    EmptyCategory,

    #[error("a question needs at least 2 options, got {len}")]
    TooFewOptions { len: usize },

    #[error("option {id} has empty text")]
    EmptyOptionText { id: OptionId },

    #[error("duplicate option id {id}")]
    DuplicateOptionId { id: OptionId },

    #[error("at least one correct option is required")]
    NoCorrectOption,

    #[error("correct option {id} is not one of the question's options")]
    UnknownCorrectOption { id: OptionId },

    #[error("single-choice questions need exactly one correct option, got {count}")]
    SingleChoiceCorrectCount { count: usize },

    #[error("unknown question type: {raw}")]
    UnknownType { raw: String },
}

//
// ─── TYPE ──────────────────────────────────────────────────────────────────────
//

/// How many options a learner may pick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum QuestionType {
    /// Exactly one correct option; selecting replaces the previous pick.
    SingleChoice,
    /// One or more correct options; selecting toggles.
    MultipleChoice,
}

impl QuestionType {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            QuestionType::SingleChoice => "SINGLE_CHOICE",
            QuestionType::MultipleChoice => "MULTIPLE_CHOICE",
        }
    }
}

impl fmt::Display for QuestionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for QuestionType {
    type Err = QuestionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SINGLE_CHOICE" => Ok(QuestionType::SingleChoice),
            "MULTIPLE_CHOICE" => Ok(QuestionType::MultipleChoice),
            other => Err(QuestionError::UnknownType {
                raw: other.to_owned(),
            }),
        }
    }
}

//
// ─── DRAFT ─────────────────────────────────────────────────────────────────────
//

/// Unvalidated question input, as collected by an admin form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionDraft {
    pub category: String,
    pub question_type: QuestionType,
    pub text: String,
    pub options: Vec<AnswerOption>,
    pub correct_option_ids: Vec<OptionId>,
    pub explanation: Option<String>,
}

impl QuestionDraft {
    /// Validate the draft into a `Question`.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` if any question invariant is violated.
    pub fn validate(
        self,
        id: QuestionId,
        created_at: DateTime<Utc>,
    ) -> Result<Question, QuestionError> {
        Question::from_persisted(
            id,
            self.category,
            self.question_type,
            self.text,
            self.options,
            self.correct_option_ids,
            self.explanation,
            created_at,
        )
    }
}

//
// ─── QUESTION ──────────────────────────────────────────────────────────────────
//

/// A stored quiz question with its options and answer key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Question {
    id: QuestionId,
    category: String,
    question_type: QuestionType,
    text: String,
    options: Vec<AnswerOption>,
    correct_option_ids: BTreeSet<OptionId>,
    explanation: Option<String>,
    created_at: DateTime<Utc>,
}

impl Question {
    /// Rehydrate a question, enforcing all invariants.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError` for empty text/category, fewer than two options,
    /// duplicate option ids, an empty or dangling answer key, or a
    /// single-choice question with more than one correct option.
    #[allow(clippy::too_many_arguments)]
    pub fn from_persisted(
        id: QuestionId,
        category: impl Into<String>,
        question_type: QuestionType,
        text: impl Into<String>,
        options: Vec<AnswerOption>,
        correct_option_ids: impl IntoIterator<Item = OptionId>,
        explanation: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, QuestionError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(QuestionError::EmptyText);
        }
        let category = category.into();
        if category.trim().is_empty() {
            return Err(QuestionError::EmptyCategory);
        }
        if options.len() < 2 {
            return Err(QuestionError::TooFewOptions { len: options.len() });
        }

        let mut seen = HashSet::with_capacity(options.len());
        for option in &options {
            if option.text().trim().is_empty() {
                return Err(QuestionError::EmptyOptionText {
                    id: option.id().clone(),
                });
            }
            if !seen.insert(option.id()) {
                return Err(QuestionError::DuplicateOptionId {
                    id: option.id().clone(),
                });
            }
        }

        let correct_option_ids: BTreeSet<OptionId> = correct_option_ids.into_iter().collect();
        if correct_option_ids.is_empty() {
            return Err(QuestionError::NoCorrectOption);
        }
        if let Some(missing) = correct_option_ids.iter().find(|id| !seen.contains(id)) {
            return Err(QuestionError::UnknownCorrectOption {
                id: missing.clone(),
            });
        }
        if question_type == QuestionType::SingleChoice && correct_option_ids.len() != 1 {
            return Err(QuestionError::SingleChoiceCorrectCount {
                count: correct_option_ids.len(),
            });
        }

        let explanation = explanation
            .map(|e| e.trim().to_owned())
            .filter(|e| !e.is_empty());

        Ok(Self {
            id,
            category: category.trim().to_owned(),
            question_type,
            text: text.trim().to_owned(),
            options,
            correct_option_ids,
            explanation,
            created_at,
        })
    }

    /// Returns a copy whose options were reordered in place by `permute`.
    ///
    /// `permute` receives a mutable slice and must only reorder it.
    #[must_use]
    pub fn with_options_reordered(&self, permute: impl FnOnce(&mut [AnswerOption])) -> Self {
        let mut copy = self.clone();
        permute(copy.options.as_mut_slice());
        copy
    }

    /// Returns a copy with the same content and a new creation timestamp.
    #[must_use]
    pub fn with_created_at(&self, created_at: DateTime<Utc>) -> Self {
        Self {
            created_at,
            ..self.clone()
        }
    }

    // Accessors
    #[must_use]
    pub fn id(&self) -> &QuestionId {
        &self.id
    }

    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }

    #[must_use]
    pub fn question_type(&self) -> QuestionType {
        self.question_type
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn options(&self) -> &[AnswerOption] {
        &self.options
    }

    #[must_use]
    pub fn option(&self, id: &OptionId) -> Option<&AnswerOption> {
        self.options.iter().find(|o| o.id() == id)
    }

    #[must_use]
    pub fn has_option(&self, id: &OptionId) -> bool {
        self.option(id).is_some()
    }

    #[must_use]
    pub fn correct_option_ids(&self) -> &BTreeSet<OptionId> {
        &self.correct_option_ids
    }

    #[must_use]
    pub fn explanation(&self) -> Option<&str> {
        self.explanation.as_deref()
    }

    #[must_use]
    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
