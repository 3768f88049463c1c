use chrono::Duration;
use quiz_core::Clock;
use quiz_core::model::{
    AnswerOption, Category, CategoryId, OptionId, Question, QuestionDraft, QuestionId,
    QuestionType,
};
use quiz_core::time::fixed_now;
use storage::repository::{
    CategoryRepository, NewCategoryRecord, NewQuestionRecord, QuestionRepository, StorageError,
};
use storage::sqlite::SqliteRepository;

async fn connect(name: &str) -> SqliteRepository {
    let url = format!("sqlite:file:{name}?mode=memory&cache=shared");
    let repo = SqliteRepository::connect(&url).await.expect("connect");
    repo.migrate().await.expect("migrate");
    repo.with_clock(Clock::fixed(fixed_now()))
}

fn build_question(id: &str, category: &str, question_type: QuestionType) -> Question {
    let correct = match question_type {
        QuestionType::SingleChoice => vec![OptionId::new("c")],
        QuestionType::MultipleChoice => vec![OptionId::new("a"), OptionId::new("c")],
    };
    QuestionDraft {
        category: category.into(),
        question_type,
        text: format!("Question {id}"),
        options: vec![
            AnswerOption::new(OptionId::new("c"), "Gamma").unwrap(),
            AnswerOption::new(OptionId::new("a"), "Alpha").unwrap(),
            AnswerOption::new(OptionId::new("b"), "Beta").unwrap(),
        ],
        correct_option_ids: correct,
        explanation: Some("because".into()),
    }
    .validate(QuestionId::new(id), fixed_now())
    .unwrap()
}

#[tokio::test]
async fn sqlite_roundtrips_question_with_option_order() {
    let repo = connect("memdb_question_roundtrip").await;
    let question = build_question("q1", "Greek", QuestionType::MultipleChoice);

    let stored = repo
        .insert_question(NewQuestionRecord::from_question(&question))
        .await
        .unwrap();
    assert_eq!(stored.created_at(), fixed_now());

    let fetched = repo
        .get_question(&QuestionId::new("q1"))
        .await
        .unwrap()
        .expect("question stored");
    let order: Vec<&str> = fetched.options().iter().map(|o| o.id().as_str()).collect();
    assert_eq!(order, vec!["c", "a", "b"]);
    assert_eq!(fetched.correct_option_ids(), question.correct_option_ids());
    assert_eq!(fetched.question_type(), QuestionType::MultipleChoice);
    assert_eq!(fetched.explanation(), Some("because"));
}

#[tokio::test]
async fn sqlite_lists_newest_first_and_filters_by_category() {
    let base = connect("memdb_question_listing").await;

    for (offset, id, category) in [(0, "q1", "Greek"), (1, "q2", "Latin"), (2, "q3", "Greek")] {
        let repo = base
            .clone()
            .with_clock(Clock::fixed(fixed_now() + Duration::minutes(offset)));
        repo.insert_question(NewQuestionRecord::from_question(&build_question(
            id,
            category,
            QuestionType::SingleChoice,
        )))
        .await
        .unwrap();
    }

    let all: Vec<String> = base
        .list_questions()
        .await
        .unwrap()
        .iter()
        .map(|q| q.id().to_string())
        .collect();
    assert_eq!(all, vec!["q3", "q2", "q1"]);

    let greek: Vec<String> = base
        .list_questions_by_category("Greek")
        .await
        .unwrap()
        .iter()
        .map(|q| q.id().to_string())
        .collect();
    assert_eq!(greek, vec!["q3", "q1"]);
    assert_eq!(base.count_questions_by_category("Greek").await.unwrap(), 2);
    assert_eq!(base.count_questions_by_category("Klingon").await.unwrap(), 0);
}

#[tokio::test]
async fn sqlite_update_and_delete_question() {
    let repo = connect("memdb_question_update").await;
    let question = build_question("q1", "Greek", QuestionType::SingleChoice);
    repo.insert_question(NewQuestionRecord::from_question(&question))
        .await
        .unwrap();

    let edited = QuestionDraft {
        category: "Greek".into(),
        question_type: QuestionType::SingleChoice,
        text: "Edited".into(),
        options: question.options().to_vec(),
        correct_option_ids: vec![OptionId::new("b")],
        explanation: None,
    }
    .validate(question.id().clone(), fixed_now() + Duration::days(1))
    .unwrap();

    let updated = repo.update_question(&edited).await.unwrap();
    assert_eq!(updated.text(), "Edited");
    assert_eq!(updated.created_at(), fixed_now());

    repo.delete_question(question.id()).await.unwrap();
    let err = repo.delete_question(question.id()).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
    let err = repo.update_question(&edited).await.unwrap_err();
    assert!(matches!(err, StorageError::NotFound));
}

#[tokio::test]
async fn sqlite_category_conflicts_and_delete() {
    let repo = connect("memdb_categories").await;
    let rust = Category::new(
        CategoryId::new("c1"),
        "Rust",
        "Code",
        "bg-blue-100 text-blue-600",
        Some("ownership and borrowing".into()),
        fixed_now(),
    )
    .unwrap();
    repo.insert_category(NewCategoryRecord::from_category(&rust))
        .await
        .unwrap();

    let same_name = Category::new(
        CategoryId::new("c2"),
        "Rust",
        "Cpu",
        "bg-red-100 text-red-600",
        None,
        fixed_now(),
    )
    .unwrap();
    let err = repo
        .insert_category(NewCategoryRecord::from_category(&same_name))
        .await
        .unwrap_err();
    assert!(matches!(err, StorageError::Conflict));

    let listed = repo.list_categories().await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].description(), Some("ownership and borrowing"));

    repo.delete_category(rust.id()).await.unwrap();
    assert!(repo.get_category(rust.id()).await.unwrap().is_none());
}
