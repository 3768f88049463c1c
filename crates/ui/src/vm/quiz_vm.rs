use quiz_core::model::{Question, QuestionType};
use services::{Advance, QuizSession, Score, SubmitOutcome};

use crate::views::ViewError;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizIntent {
    /// Toggle the option at this zero-based position.
    Toggle(usize),
    Submit,
    Next,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum QuizOutcome {
    Continue,
    Finished(Score),
}

/// How an option row is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OptionMark {
    Idle,
    Selected,
    /// Part of the answer key, shown after submitting.
    Correct,
    /// Selected but not in the answer key.
    Wrong,
    Dimmed,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OptionRowVm {
    pub label: char,
    pub text: String,
    pub mark: OptionMark,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedbackVm {
    pub headline: &'static str,
    pub explanation: String,
    pub next_label: &'static str,
}

/// Drives one question screen at a time over a `QuizSession`.
#[derive(Clone)]
pub struct QuizVm {
    session: QuizSession,
    last_outcome: Option<SubmitOutcome>,
}

impl QuizVm {
    #[must_use]
    pub fn new(session: QuizSession) -> Self {
        Self {
            session,
            last_outcome: None,
        }
    }

    #[must_use]
    pub fn session(&self) -> &QuizSession {
        &self.session
    }

    /// # Errors
    ///
    /// Returns `ViewError` when the session rejects the intent.
    pub fn apply(&mut self, intent: QuizIntent) -> Result<QuizOutcome, ViewError> {
        match intent {
            QuizIntent::Toggle(position) => {
                let option_id = self
                    .current()
                    .and_then(|q| q.options().get(position))
                    .map(|o| o.id().clone())
                    .ok_or_else(|| ViewError::InvalidInput("No such option.".to_string()))?;
                self.session.toggle_selection(&option_id)?;
            }
            QuizIntent::Submit => {
                self.last_outcome = Some(self.session.submit()?);
            }
            QuizIntent::Next => {
                let advance = self.session.advance()?;
                self.last_outcome = None;
                if let Advance::Finished(score) = advance {
                    return Ok(QuizOutcome::Finished(score));
                }
            }
        }
        Ok(QuizOutcome::Continue)
    }

    fn current(&self) -> Option<&Question> {
        self.session.current_question()
    }

    /// "Question 2 of 5"
    #[must_use]
    pub fn position_label(&self) -> String {
        let progress = self.session.progress();
        format!("Question {} of {}", progress.position(), progress.total)
    }

    /// Share of questions already left behind, in whole percent.
    #[must_use]
    pub fn progress_percent(&self) -> usize {
        let progress = self.session.progress();
        if progress.total == 0 {
            return 0;
        }
        progress.index * 100 / progress.total
    }

    #[must_use]
    pub fn badge_label(&self) -> String {
        self.current().map_or_else(String::new, |q| {
            let kind = match q.question_type() {
                QuestionType::SingleChoice => "single choice",
                QuestionType::MultipleChoice => "multiple choice",
            };
            format!("{} - {kind}", q.category())
        })
    }

    #[must_use]
    pub fn question_text(&self) -> &str {
        self.current().map_or("", Question::text)
    }

    #[must_use]
    pub fn hint(&self) -> &'static str {
        match self.current().map(Question::question_type) {
            Some(QuestionType::MultipleChoice) => "Select all that apply, then submit.",
            _ => "Select one answer, then submit.",
        }
    }

    #[must_use]
    pub fn option_rows(&self) -> Vec<OptionRowVm> {
        let Some(question) = self.current() else {
            return Vec::new();
        };
        let answered = self.session.is_answered();

        ('A'..='Z')
            .zip(question.options())
            .map(|(label, option)| {
                let selected = self.session.is_selected(option.id());
                let correct = question.correct_option_ids().contains(option.id());
                let mark = match (answered, selected, correct) {
                    (false, true, _) => OptionMark::Selected,
                    (false, false, _) => OptionMark::Idle,
                    (true, _, true) => OptionMark::Correct,
                    (true, true, false) => OptionMark::Wrong,
                    (true, false, false) => OptionMark::Dimmed,
                };
                OptionRowVm {
                    label,
                    text: option.text().to_string(),
                    mark,
                }
            })
            .collect()
    }

    /// Feedback for the submitted question, if any.
    #[must_use]
    pub fn feedback(&self) -> Option<FeedbackVm> {
        let outcome = self.last_outcome.as_ref()?;
        let is_last = self.session.progress().is_last();
        Some(FeedbackVm {
            headline: if outcome.is_correct { "Correct!" } else { "Incorrect" },
            explanation: outcome
                .explanation
                .clone()
                .unwrap_or_else(|| "No explanation provided.".to_string()),
            next_label: if is_last { "Finish" } else { "Next question" },
        })
    }

    #[must_use]
    pub fn score_label(&self) -> String {
        format!("Score: {}", self.session.progress().correct)
    }
}

/// Map a key pressed on the quiz screen to an intent.
///
/// Letters pick options (`a`, `B`), `s` or Enter (an empty string) submits,
/// `n` or Enter moves on after answering.
#[must_use]
pub fn parse_quiz_input(input: &str, answered: bool) -> Option<QuizIntent> {
    let trimmed = input.trim();
    if answered {
        return match trimmed.to_ascii_lowercase().as_str() {
            "" | "n" | "next" => Some(QuizIntent::Next),
            _ => None,
        };
    }
    match trimmed.to_ascii_lowercase().as_str() {
        "" | "s" | "submit" => Some(QuizIntent::Submit),
        other => {
            let mut chars = other.chars();
            match (chars.next(), chars.next()) {
                (Some(ch @ 'a'..='z'), None) => Some(QuizIntent::Toggle(usize::from(ch as u8 - b'a'))),
                _ => None,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{AnswerOption, OptionId, QuestionDraft, QuestionId};
    use quiz_core::time::fixed_now;

    fn question(id: &str, question_type: QuestionType, explanation: Option<&str>) -> Question {
        let correct = match question_type {
            QuestionType::SingleChoice => vec![OptionId::new("x")],
            QuestionType::MultipleChoice => vec![OptionId::new("x"), OptionId::new("z")],
        };
        QuestionDraft {
            category: "Music".into(),
            question_type,
            text: format!("Prompt {id}"),
            options: vec![
                AnswerOption::new(OptionId::new("x"), "Ex").unwrap(),
                AnswerOption::new(OptionId::new("y"), "Why").unwrap(),
                AnswerOption::new(OptionId::new("z"), "Zed").unwrap(),
            ],
            correct_option_ids: correct,
            explanation: explanation.map(str::to_owned),
        }
        .validate(QuestionId::new(id), fixed_now())
        .unwrap()
    }

    fn vm() -> QuizVm {
        QuizVm::new(
            QuizSession::new(vec![
                question("q1", QuestionType::MultipleChoice, Some("X and Z")),
                question("q2", QuestionType::SingleChoice, None),
            ])
            .unwrap(),
        )
    }

    fn marks(vm: &QuizVm) -> Vec<OptionMark> {
        vm.option_rows().iter().map(|row| row.mark).collect()
    }

    #[test]
    fn labels_and_selection_marks() {
        let mut vm = vm();
        assert_eq!(vm.position_label(), "Question 1 of 2");
        assert_eq!(vm.badge_label(), "Music - multiple choice");
        assert_eq!(vm.progress_percent(), 0);

        vm.apply(QuizIntent::Toggle(0)).unwrap();
        let rows = vm.option_rows();
        assert_eq!(rows[0].label, 'A');
        assert_eq!(rows[2].text, "Zed");
        assert_eq!(
            marks(&vm),
            vec![OptionMark::Selected, OptionMark::Idle, OptionMark::Idle]
        );
    }

    #[test]
    fn feedback_after_wrong_answer() {
        let mut vm = vm();
        vm.apply(QuizIntent::Toggle(0)).unwrap();
        vm.apply(QuizIntent::Toggle(1)).unwrap();
        assert_eq!(vm.apply(QuizIntent::Submit).unwrap(), QuizOutcome::Continue);

        assert_eq!(
            marks(&vm),
            vec![OptionMark::Correct, OptionMark::Wrong, OptionMark::Correct]
        );
        let feedback = vm.feedback().unwrap();
        assert_eq!(feedback.headline, "Incorrect");
        assert_eq!(feedback.explanation, "X and Z");
        assert_eq!(feedback.next_label, "Next question");
        assert_eq!(vm.score_label(), "Score: 0");
    }

    #[test]
    fn runs_to_finish() {
        let mut vm = vm();
        assert_eq!(
            vm.apply(QuizIntent::Submit).unwrap_err(),
            ViewError::NoSelection
        );
        vm.apply(QuizIntent::Toggle(0)).unwrap();
        vm.apply(QuizIntent::Toggle(2)).unwrap();
        vm.apply(QuizIntent::Submit).unwrap();
        vm.apply(QuizIntent::Next).unwrap();
        assert!(vm.feedback().is_none());
        assert_eq!(vm.progress_percent(), 50);

        assert!(vm.apply(QuizIntent::Toggle(7)).is_err());
        vm.apply(QuizIntent::Toggle(0)).unwrap();
        vm.apply(QuizIntent::Submit).unwrap();
        let feedback = vm.feedback().unwrap();
        assert_eq!(feedback.headline, "Correct!");
        assert_eq!(feedback.explanation, "No explanation provided.");
        assert_eq!(feedback.next_label, "Finish");

        assert_eq!(
            vm.apply(QuizIntent::Next).unwrap(),
            QuizOutcome::Finished(Score::new(2, 2))
        );
    }

    #[test]
    fn parses_shortcut_keys() {
        assert_eq!(parse_quiz_input("b", false), Some(QuizIntent::Toggle(1)));
        assert_eq!(parse_quiz_input(" A ", false), Some(QuizIntent::Toggle(0)));
        assert_eq!(parse_quiz_input("", false), Some(QuizIntent::Submit));
        assert_eq!(parse_quiz_input("submit", false), Some(QuizIntent::Submit));
        assert_eq!(parse_quiz_input("ab", false), None);
        assert_eq!(parse_quiz_input("7", false), None);
        assert_eq!(parse_quiz_input("", true), Some(QuizIntent::Next));
        assert_eq!(parse_quiz_input("a", true), None);
    }
}
