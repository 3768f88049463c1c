use std::collections::BTreeSet;

use quiz_core::model::{OptionId, Question, QuestionId, QuestionType};

use super::grading::{Score, is_exact_match};
use super::progress::QuizProgress;
use crate::error::QuizError;

//
// ─── OUTCOMES ──────────────────────────────────────────────────────────────────
//

/// What the learner answered for one question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnswerRecord {
    pub question_id: QuestionId,
    pub selected: BTreeSet<OptionId>,
    pub is_correct: bool,
}

/// Feedback returned by a successful `submit`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitOutcome {
    pub is_correct: bool,
    pub correct_option_ids: BTreeSet<OptionId>,
    pub explanation: Option<String>,
    /// Running count of correct answers, including this one.
    pub correct_so_far: u32,
}

/// Result of moving past an answered question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next { index: usize },
    Finished(Score),
}

/// Observable state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuizState<'a> {
    Active {
        index: usize,
        selected: &'a BTreeSet<OptionId>,
        answered: bool,
    },
    Finished(Score),
}

//
// ─── SESSION ───────────────────────────────────────────────────────────────────
//

/// One run through a finalized question list.
///
/// Starts at the first question with nothing selected. Each question is
/// answered once; the session finishes when the last answered question is
/// advanced past. Rejected operations leave the state unchanged.
#[derive(Debug, Clone)]
pub struct QuizSession {
    questions: Vec<Question>,
    current: usize,
    selected: BTreeSet<OptionId>,
    answered: bool,
    correct: u32,
    answers: Vec<AnswerRecord>,
    finished: bool,
}

impl QuizSession {
    /// Create a session over `questions`, which are presented as given.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::EmptySession` if no questions are provided.
    pub fn new(questions: Vec<Question>) -> Result<Self, QuizError> {
        if questions.is_empty() {
            return Err(QuizError::EmptySession);
        }
        Ok(Self {
            questions,
            current: 0,
            selected: BTreeSet::new(),
            answered: false,
            correct: 0,
            answers: Vec::new(),
            finished: false,
        })
    }

    /// Select or deselect `option_id` on the current question.
    ///
    /// Single choice replaces the selection; multiple choice toggles membership.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::Finished`, `QuizError::AlreadyAnswered`, or
    /// `QuizError::UnknownOption` when the id is not an option of the current question.
    pub fn toggle_selection(&mut self, option_id: &OptionId) -> Result<(), QuizError> {
        let question = self.active_question()?;
        if self.answered {
            return Err(QuizError::AlreadyAnswered);
        }
        if !question.has_option(option_id) {
            return Err(QuizError::UnknownOption {
                id: option_id.clone(),
            });
        }

        match question.question_type() {
            QuestionType::SingleChoice => {
                self.selected.clear();
                self.selected.insert(option_id.clone());
            }
            QuestionType::MultipleChoice => {
                if !self.selected.remove(option_id) {
                    self.selected.insert(option_id.clone());
                }
            }
        }
        Ok(())
    }

    /// Grade the current selection.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NoSelection` on an empty selection,
    /// `QuizError::AlreadyAnswered` on a second submit, or `QuizError::Finished`.
    pub fn submit(&mut self) -> Result<SubmitOutcome, QuizError> {
        let question = self.active_question()?;
        if self.answered {
            return Err(QuizError::AlreadyAnswered);
        }
        if self.selected.is_empty() {
            return Err(QuizError::NoSelection);
        }

        let is_correct = is_exact_match(question.correct_option_ids(), &self.selected);
        let outcome = SubmitOutcome {
            is_correct,
            correct_option_ids: question.correct_option_ids().clone(),
            explanation: question.explanation().map(str::to_owned),
            correct_so_far: self.correct + u32::from(is_correct),
        };
        let record = AnswerRecord {
            question_id: question.id().clone(),
            selected: self.selected.clone(),
            is_correct,
        };

        tracing::debug!(
            question_id = %record.question_id,
            index = self.current,
            is_correct,
            "answer graded"
        );

        self.answered = true;
        self.correct = outcome.correct_so_far;
        self.answers.push(record);
        Ok(outcome)
    }

    /// Move to the next question, or finish after the last one.
    ///
    /// # Errors
    ///
    /// Returns `QuizError::NotAnswered` before the current question is
    /// submitted, or `QuizError::Finished`.
    pub fn advance(&mut self) -> Result<Advance, QuizError> {
        self.active_question()?;
        if !self.answered {
            return Err(QuizError::NotAnswered);
        }

        if self.current + 1 >= self.questions.len() {
            self.finished = true;
            let score = self.score();
            tracing::debug!(
                correct = score.correct(),
                total = score.total(),
                "session finished"
            );
            return Ok(Advance::Finished(score));
        }

        self.current += 1;
        self.selected.clear();
        self.answered = false;
        Ok(Advance::Next {
            index: self.current,
        })
    }

    #[must_use]
    pub fn state(&self) -> QuizState<'_> {
        if self.finished {
            QuizState::Finished(self.score())
        } else {
            QuizState::Active {
                index: self.current,
                selected: &self.selected,
                answered: self.answered,
            }
        }
    }

    /// The question being answered, or `None` once finished.
    #[must_use]
    pub fn current_question(&self) -> Option<&Question> {
        if self.finished {
            None
        } else {
            self.questions.get(self.current)
        }
    }

    #[must_use]
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    #[must_use]
    pub fn selected(&self) -> &BTreeSet<OptionId> {
        &self.selected
    }

    #[must_use]
    pub fn is_selected(&self, option_id: &OptionId) -> bool {
        self.selected.contains(option_id)
    }

    #[must_use]
    pub fn is_answered(&self) -> bool {
        self.answered
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    #[must_use]
    pub fn answers(&self) -> &[AnswerRecord] {
        &self.answers
    }

    #[must_use]
    pub fn score(&self) -> Score {
        let total = u32::try_from(self.questions.len()).unwrap_or(u32::MAX);
        Score::new(self.correct, total)
    }

    #[must_use]
    pub fn progress(&self) -> QuizProgress {
        QuizProgress {
            index: self.current,
            total: self.questions.len(),
            answered: self.answers.len(),
            correct: self.correct,
            is_complete: self.finished,
        }
    }

    fn active_question(&self) -> Result<&Question, QuizError> {
        if self.finished {
            return Err(QuizError::Finished);
        }
        self.questions
            .get(self.current)
            .ok_or(QuizError::EmptySession)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sessions::plan::fixtures::question;
    use quiz_core::model::QuestionType::{MultipleChoice, SingleChoice};

    fn opt(id: &str) -> OptionId {
        OptionId::new(id)
    }

    fn session(types: &[QuestionType]) -> QuizSession {
        let questions = types
            .iter()
            .enumerate()
            .map(|(i, t)| question(&format!("q{}", i + 1), *t))
            .collect();
        QuizSession::new(questions).unwrap()
    }

    #[test]
    fn empty_session_is_rejected() {
        assert_eq!(
            QuizSession::new(Vec::new()).unwrap_err(),
            QuizError::EmptySession
        );
    }

    #[test]
    fn starts_active_on_first_question() {
        let session = session(&[SingleChoice, SingleChoice]);
        assert_eq!(
            session.state(),
            QuizState::Active {
                index: 0,
                selected: &BTreeSet::new(),
                answered: false,
            }
        );
        assert_eq!(session.current_question().unwrap().id().as_str(), "q1");
    }

    #[test]
    fn single_choice_replaces_selection() {
        let mut session = session(&[SingleChoice]);
        session.toggle_selection(&opt("a")).unwrap();
        session.toggle_selection(&opt("b")).unwrap();
        assert_eq!(session.selected(), &BTreeSet::from([opt("b")]));

        session.toggle_selection(&opt("b")).unwrap();
        assert_eq!(session.selected(), &BTreeSet::from([opt("b")]));
    }

    #[test]
    fn multiple_choice_toggles_membership() {
        let mut session = session(&[MultipleChoice]);
        session.toggle_selection(&opt("a")).unwrap();
        session.toggle_selection(&opt("c")).unwrap();
        session.toggle_selection(&opt("d")).unwrap();
        session.toggle_selection(&opt("d")).unwrap();
        assert_eq!(session.selected(), &BTreeSet::from([opt("a"), opt("c")]));
    }

    #[test]
    fn unknown_option_is_rejected() {
        let mut session = session(&[SingleChoice]);
        let err = session.toggle_selection(&opt("zz")).unwrap_err();
        assert_eq!(err, QuizError::UnknownOption { id: opt("zz") });
        assert!(session.selected().is_empty());
    }

    #[test]
    fn submit_with_empty_selection_changes_nothing() {
        let mut session = session(&[SingleChoice]);
        assert_eq!(session.submit().unwrap_err(), QuizError::NoSelection);
        assert!(!session.is_answered());
        assert_eq!(session.score().correct(), 0);
        assert!(session.answers().is_empty());
    }

    #[test]
    fn multiple_choice_subset_or_superset_is_wrong() {
        let mut subset = session(&[MultipleChoice]);
        subset.toggle_selection(&opt("a")).unwrap();
        assert!(!subset.submit().unwrap().is_correct);

        let mut superset = session(&[MultipleChoice]);
        for id in ["a", "b", "c"] {
            superset.toggle_selection(&opt(id)).unwrap();
        }
        assert!(!superset.submit().unwrap().is_correct);

        let mut exact = session(&[MultipleChoice]);
        exact.toggle_selection(&opt("c")).unwrap();
        exact.toggle_selection(&opt("a")).unwrap();
        let outcome = exact.submit().unwrap();
        assert!(outcome.is_correct);
        assert_eq!(outcome.correct_so_far, 1);
        assert_eq!(outcome.explanation.as_deref(), Some("Explanation q1"));
    }

    #[test]
    fn answered_question_is_locked() {
        let mut session = session(&[SingleChoice, SingleChoice]);
        session.toggle_selection(&opt("b")).unwrap();
        let outcome = session.submit().unwrap();
        assert!(!outcome.is_correct);
        assert_eq!(outcome.correct_option_ids, BTreeSet::from([opt("a")]));

        assert_eq!(
            session.toggle_selection(&opt("a")).unwrap_err(),
            QuizError::AlreadyAnswered
        );
        assert_eq!(session.submit().unwrap_err(), QuizError::AlreadyAnswered);
        assert_eq!(session.selected(), &BTreeSet::from([opt("b")]));
    }

    #[test]
    fn advance_requires_an_answer_and_resets_selection() {
        let mut session = session(&[SingleChoice, MultipleChoice]);
        assert_eq!(session.advance().unwrap_err(), QuizError::NotAnswered);

        session.toggle_selection(&opt("a")).unwrap();
        session.submit().unwrap();
        assert_eq!(session.advance().unwrap(), Advance::Next { index: 1 });
        assert!(session.selected().is_empty());
        assert!(!session.is_answered());
        assert_eq!(session.current_question().unwrap().id().as_str(), "q2");
    }

    #[test]
    fn last_advance_finishes_with_score() {
        let mut session = session(&[SingleChoice, SingleChoice, SingleChoice]);
        for answer in ["a", "b", "b"] {
            session.toggle_selection(&opt(answer)).unwrap();
            session.submit().unwrap();
            let _ = session.advance().unwrap();
        }

        assert!(session.is_finished());
        let score = Score::new(1, 3);
        assert_eq!(session.state(), QuizState::Finished(score));
        assert_eq!(score.percentage(), 33);
        assert!(session.current_question().is_none());
        assert_eq!(session.answers().len(), 3);
        assert!(session.progress().is_complete);
    }

    #[test]
    fn finished_session_rejects_everything() {
        let mut session = session(&[SingleChoice]);
        session.toggle_selection(&opt("a")).unwrap();
        session.submit().unwrap();
        assert_eq!(
            session.advance().unwrap(),
            Advance::Finished(Score::new(1, 1))
        );

        assert_eq!(
            session.toggle_selection(&opt("a")).unwrap_err(),
            QuizError::Finished
        );
        assert_eq!(session.submit().unwrap_err(), QuizError::Finished);
        assert_eq!(session.advance().unwrap_err(), QuizError::Finished);
    }

    #[test]
    fn progress_tracks_position() {
        let mut session = session(&[SingleChoice, SingleChoice]);
        let progress = session.progress();
        assert_eq!(progress.position(), 1);
        assert!(!progress.is_last());

        session.toggle_selection(&opt("a")).unwrap();
        session.submit().unwrap();
        session.advance().unwrap();
        let progress = session.progress();
        assert_eq!(progress.position(), 2);
        assert_eq!(progress.answered, 1);
        assert_eq!(progress.correct, 1);
        assert!(progress.is_last());
    }
}
