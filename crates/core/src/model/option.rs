use serde::{Deserialize, Serialize};

use crate::model::ids::OptionId;
use crate::model::question::QuestionError;

/// One selectable answer of a question.
///
/// Identity is the `id`; two options with the same text are still distinct.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnswerOption {
    id: OptionId,
    text: String,
}

impl AnswerOption {
    /// Creates an option with trimmed, non-blank text.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyOptionText` if `text` is blank.
    pub fn new(id: OptionId, text: impl Into<String>) -> Result<Self, QuestionError> {
        let text = text.into();
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(QuestionError::EmptyOptionText { id });
        }
        Ok(Self {
            id,
            text: trimmed.to_owned(),
        })
    }

    /// Creates an option with a freshly generated id.
    ///
    /// # Errors
    ///
    /// Returns `QuestionError::EmptyOptionText` if `text` is blank.
    pub fn with_generated_id(text: impl Into<String>) -> Result<Self, QuestionError> {
        Self::new(OptionId::generate(), text)
    }

    #[must_use]
    pub fn id(&self) -> &OptionId {
        &self.id
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn option_trims_text() {
        let option = AnswerOption::new(OptionId::new("a"), "  Paris ").unwrap();
        assert_eq!(option.text(), "Paris");
        assert_eq!(option.id(), &OptionId::new("a"));
    }

    #[test]
    fn option_rejects_blank_text() {
        let err = AnswerOption::new(OptionId::new("a"), " ").unwrap_err();
        assert_eq!(
            err,
            QuestionError::EmptyOptionText {
                id: OptionId::new("a")
            }
        );
    }
}
