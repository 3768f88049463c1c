use quiz_core::model::{OptionId, Question};
use services::{AnswerRecord, QuizSession, Score};

/// One line of the answer review under the final score.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AnswerReviewVm {
    pub number: usize,
    pub question: String,
    pub your_answer: String,
    pub correct_answer: String,
    pub is_correct: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResultsVm {
    pub headline: &'static str,
    pub percentage_label: String,
    pub tally_label: String,
    pub review: Vec<AnswerReviewVm>,
}

/// Texts of the options matching `wanted`, in the order the question shows them.
fn option_texts(question: &Question, wanted: impl Fn(&OptionId) -> bool) -> String {
    let texts: Vec<&str> = question
        .options()
        .iter()
        .filter(|option| wanted(option.id()))
        .map(|option| option.text())
        .collect();
    if texts.is_empty() {
        "-".to_string()
    } else {
        texts.join(", ")
    }
}

fn map_review(number: usize, question: &Question, record: &AnswerRecord) -> AnswerReviewVm {
    AnswerReviewVm {
        number,
        question: question.text().to_string(),
        your_answer: option_texts(question, |id| record.selected.contains(id)),
        correct_answer: option_texts(question, |id| question.correct_option_ids().contains(id)),
        is_correct: record.is_correct,
    }
}

fn headline(score: Score) -> &'static str {
    if score.is_perfect() {
        return "Perfect score!";
    }
    match score.percentage() {
        70..=100 => "Well done!",
        40..=69 => "Practice complete",
        _ => "Keep practicing",
    }
}

/// Final score plus a per-question review of a finished session.
#[must_use]
pub fn map_results(session: &QuizSession) -> ResultsVm {
    let score = session.score();
    let review = session
        .answers()
        .iter()
        .enumerate()
        .filter_map(|(i, record)| {
            session
                .questions()
                .iter()
                .find(|q| q.id() == &record.question_id)
                .map(|question| map_review(i + 1, question, record))
        })
        .collect();

    ResultsVm {
        headline: headline(score),
        percentage_label: format!("{}%", score.percentage()),
        tally_label: format!("{score} correct"),
        review,
    }
}
