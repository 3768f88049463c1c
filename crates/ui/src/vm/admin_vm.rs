use quiz_core::model::{
    AnswerOption, Category, CategoryColor, CategoryIcon, Question, QuestionDraft, QuestionType,
};
use services::NewCategory;

use crate::views::ViewError;

/// Raw text collected by the "new question" form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuestionFormInput {
    pub category: String,
    /// `s`/`single` or `m`/`multiple`.
    pub question_type: String,
    pub text: String,
    /// One option per line; blank lines are skipped.
    pub options: String,
    /// One-based option numbers, separated by commas or spaces.
    pub correct: String,
    pub explanation: String,
}

/// Raw text collected by the "new category" form.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryFormInput {
    pub name: String,
    /// One-based index into [`CategoryIcon::CHOICES`].
    pub icon: String,
    /// One-based index into [`CategoryColor::CHOICES`].
    pub color: String,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AdminQuestionRowVm {
    pub text: String,
    pub kind_label: &'static str,
    pub answer_label: String,
}

fn invalid(reason: impl Into<String>) -> ViewError {
    ViewError::InvalidInput(reason.into())
}

/// Resolve a one-based menu number to an element of `choices`.
fn pick<'a, T>(choices: &'a [T], raw: &str, what: &str) -> Result<&'a T, ViewError> {
    raw.trim()
        .parse::<usize>()
        .ok()
        .and_then(|n| n.checked_sub(1))
        .and_then(|i| choices.get(i))
        .ok_or_else(|| invalid(format!("Pick a {what} between 1 and {}.", choices.len())))
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Turn the category form into service input.
///
/// # Errors
///
/// Returns `ViewError::InvalidInput` for an out-of-range icon or color choice.
pub fn parse_category_form(input: &CategoryFormInput) -> Result<NewCategory, ViewError> {
    Ok(NewCategory {
        name: input.name.clone(),
        icon: *pick(&CategoryIcon::CHOICES, &input.icon, "icon")?,
        color: *pick(&CategoryColor::CHOICES, &input.color, "color")?,
        description: non_blank(&input.description),
    })
}

/// Turn the question form into a draft with freshly generated option ids.
///
/// # Errors
///
/// Returns `ViewError::InvalidInput` for an unknown type, an unparsable or
/// out-of-range answer number, or option text the model rejects.
pub fn parse_question_form(input: &QuestionFormInput) -> Result<QuestionDraft, ViewError> {
    let question_type = match input.question_type.trim().to_ascii_lowercase().as_str() {
        "s" | "single" => QuestionType::SingleChoice,
        "m" | "multiple" => QuestionType::MultipleChoice,
        other => other
            .to_ascii_uppercase()
            .parse::<QuestionType>()
            .map_err(quiz_core::Error::from)
            .map_err(|e| invalid(e.to_string()))?,
    };

    let options = input
        .options
        .lines()
        .filter_map(non_blank)
        .map(|text| AnswerOption::with_generated_id(text))
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| invalid(quiz_core::Error::from(e).to_string()))?;

    let correct_option_ids = input
        .correct
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|part| !part.is_empty())
        .map(|part| {
            pick(&options, part, "correct option number").map(|option| option.id().clone())
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(QuestionDraft {
        category: input.category.clone(),
        question_type,
        text: input.text.clone(),
        options,
        correct_option_ids,
        explanation: non_blank(&input.explanation),
    })
}

/// Picker entries as `(value, label)`; the value is what the form sends back.
#[must_use]
pub fn icon_choices() -> Vec<(String, String)> {
    CategoryIcon::CHOICES
        .iter()
        .enumerate()
        .map(|(i, icon)| ((i + 1).to_string(), format!("{} {}", icon.glyph(), icon.name())))
        .collect()
}

#[must_use]
pub fn color_choices() -> Vec<(String, String)> {
    CategoryColor::CHOICES
        .iter()
        .enumerate()
        .map(|(i, color)| ((i + 1).to_string(), color.label().to_string()))
        .collect()
}

#[must_use]
pub fn map_question_row(question: &Question) -> AdminQuestionRowVm {
    let answers: Vec<String> = question
        .options()
        .iter()
        .filter(|o| question.correct_option_ids().contains(o.id()))
        .map(|o| o.text().to_string())
        .collect();
    AdminQuestionRowVm {
        text: question.text().to_string(),
        kind_label: match question.question_type() {
            QuestionType::SingleChoice => "single",
            QuestionType::MultipleChoice => "multiple",
        },
        answer_label: answers.join(", "),
    }
}

/// Prompt shown before deleting `category`.
#[must_use]
pub fn delete_prompt(category: &Category, question_count: Option<u32>) -> String {
    match question_count {
        Some(count) if count > 0 => format!(
            "{} still has {count} questions. Enter the admin password to delete it.",
            category.name()
        ),
        _ => format!("Delete {}?", category.name()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{CategoryId, QuestionId};
    use quiz_core::time::fixed_now;

    fn form() -> QuestionFormInput {
        QuestionFormInput {
            category: "Chemistry".into(),
            question_type: "m".into(),
            text: "Which are noble gases?".into(),
            options: "Neon\n  \nIron\nArgon\n".into(),
            correct: "1, 3".into(),
            explanation: "  ".into(),
        }
    }

    #[test]
    fn question_form_builds_a_valid_draft() {
        let draft = parse_question_form(&form()).unwrap();
        assert_eq!(draft.question_type, QuestionType::MultipleChoice);
        let texts: Vec<&str> = draft.options.iter().map(AnswerOption::text).collect();
        assert_eq!(texts, vec!["Neon", "Iron", "Argon"]);
        assert_eq!(
            draft.correct_option_ids,
            vec![draft.options[0].id().clone(), draft.options[2].id().clone()]
        );
        assert_eq!(draft.explanation, None);

        let question = draft.validate(QuestionId::new("q1"), fixed_now()).unwrap();
        let row = map_question_row(&question);
        assert_eq!(row.answer_label, "Neon, Argon");
        assert_eq!(row.kind_label, "multiple");
    }

    #[test]
    fn question_form_accepts_wire_type_names() {
        let mut input = form();
        input.question_type = "single_choice".into();
        input.correct = "2".into();
        let draft = parse_question_form(&input).unwrap();
        assert_eq!(draft.question_type, QuestionType::SingleChoice);
    }

    #[test]
    fn question_form_rejects_bad_input() {
        let mut input = form();
        input.question_type = "essay".into();
        assert!(matches!(
            parse_question_form(&input),
            Err(ViewError::InvalidInput(_))
        ));

        let mut input = form();
        input.correct = "4".into();
        assert!(parse_question_form(&input).is_err());

        let mut input = form();
        input.correct = "0".into();
        assert!(parse_question_form(&input).is_err());
    }

    #[test]
    fn category_form_picks_choices() {
        let input = CategoryFormInput {
            name: "Space".into(),
            icon: "7".into(),
            color: " 1 ".into(),
            description: String::new(),
        };
        let parsed = parse_category_form(&input).unwrap();
        assert_eq!(parsed.icon, CategoryIcon::CHOICES[6]);
        assert_eq!(parsed.color, CategoryColor::CHOICES[0]);
        assert!(parsed.description.is_none());

        let bad = CategoryFormInput {
            icon: "9".into(),
            ..input
        };
        assert!(parse_category_form(&bad).is_err());
        assert_eq!(icon_choices().len(), 8);
        assert_eq!(color_choices()[0], ("1".to_string(), "purple".to_string()));
    }

    #[test]
    fn delete_prompt_depends_on_question_count() {
        let category = Category::new(CategoryId::new("c1"), "Space", "Rocket", "x", None, fixed_now())
            .unwrap();
        assert_eq!(delete_prompt(&category, Some(0)), "Delete Space?");
        assert_eq!(delete_prompt(&category, None), "Delete Space?");
        assert!(delete_prompt(&category, Some(3)).contains("still has 3 questions"));
    }
}
