use quiz_core::model::{AnswerOption, CategoryColor, CategoryIcon, QuestionDraft, QuestionType};
use services::{AppServices, CatalogError, NewCategory, StorageError};

struct SampleQuestion {
    question_type: QuestionType,
    text: &'static str,
    options: &'static [&'static str],
    correct: &'static [usize],
    explanation: Option<&'static str>,
}

struct SampleCategory {
    name: &'static str,
    icon: CategoryIcon,
    color: CategoryColor,
    description: &'static str,
    questions: &'static [SampleQuestion],
}

const SAMPLES: &[SampleCategory] = &[
    SampleCategory {
        name: "Science",
        icon: CategoryIcon::Beaker,
        color: CategoryColor::Green,
        description: "Everyday physics and chemistry",
        questions: &[
            SampleQuestion {
                question_type: QuestionType::SingleChoice,
                text: "What is the chemical symbol for gold?",
                options: &["Ag", "Au", "Gd", "Go"],
                correct: &[1],
                explanation: Some("Au comes from the Latin word aurum."),
            },
            SampleQuestion {
                question_type: QuestionType::MultipleChoice,
                text: "Which of these are noble gases?",
                options: &["Neon", "Nitrogen", "Argon", "Oxygen"],
                correct: &[0, 2],
                explanation: None,
            },
            SampleQuestion {
                question_type: QuestionType::SingleChoice,
                text: "At sea level, water boils at how many degrees Celsius?",
                options: &["90", "100", "110"],
                correct: &[1],
                explanation: None,
            },
        ],
    },
    SampleCategory {
        name: "Geography",
        icon: CategoryIcon::Earth,
        color: CategoryColor::Blue,
        description: "Countries, capitals and rivers",
        questions: &[
            SampleQuestion {
                question_type: QuestionType::SingleChoice,
                text: "What is the capital of Australia?",
                options: &["Sydney", "Melbourne", "Canberra", "Perth"],
                correct: &[2],
                explanation: Some("Canberra was purpose-built as a compromise between Sydney and Melbourne."),
            },
            SampleQuestion {
                question_type: QuestionType::MultipleChoice,
                text: "Which rivers flow through Europe?",
                options: &["Danube", "Amazon", "Rhine", "Mekong"],
                correct: &[0, 2],
                explanation: None,
            },
        ],
    },
];

/// Insert the sample catalog. Categories that already exist are left alone
/// and their questions are not added again.
///
/// # Errors
///
/// Returns `CatalogError` for anything but a duplicate category.
pub async fn seed_samples(services: &AppServices) -> Result<usize, CatalogError> {
    let categories = services.category_service();
    let questions = services.question_service();
    let mut inserted = 0;

    for sample in SAMPLES {
        let created = categories
            .create_category(NewCategory {
                name: sample.name.to_string(),
                icon: sample.icon,
                color: sample.color,
                description: Some(sample.description.to_string()),
            })
            .await;
        match created {
            Ok(_) => {}
            Err(CatalogError::Storage(StorageError::Conflict)) => {
                tracing::info!(name = sample.name, "sample category exists, skipping");
                continue;
            }
            Err(e) => return Err(e),
        }

        for question in sample.questions {
            let options = question
                .options
                .iter()
                .map(|text| AnswerOption::with_generated_id(*text))
                .collect::<Result<Vec<_>, _>>()?;
            let correct_option_ids = question
                .correct
                .iter()
                .filter_map(|&i| options.get(i).map(|o| o.id().clone()))
                .collect();
            questions
                .create_question(QuestionDraft {
                    category: sample.name.to_string(),
                    question_type: question.question_type,
                    text: question.text.to_string(),
                    options,
                    correct_option_ids,
                    explanation: question.explanation.map(str::to_string),
                })
                .await?;
            inserted += 1;
        }
    }
    Ok(inserted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_clock;
    use services::AdminGate;

    #[tokio::test]
    async fn seeding_twice_adds_nothing_new() {
        let services = AppServices::new_in_memory(fixed_clock(), AdminGate::default());
        assert_eq!(seed_samples(&services).await.unwrap(), 5);
        assert_eq!(seed_samples(&services).await.unwrap(), 0);

        let stored = services.question_service().list_questions().await.unwrap();
        assert_eq!(stored.len(), 5);
        assert_eq!(
            services
                .category_service()
                .question_count("Geography")
                .await
                .unwrap(),
            2
        );
    }
}
