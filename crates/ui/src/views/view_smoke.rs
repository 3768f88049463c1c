use std::sync::Arc;

use quiz_core::model::{Category, CategoryId, Question, QuestionId};
use storage::repository::{
    CategoryRepository, NewCategoryRecord, NewQuestionRecord, QuestionRepository, Storage,
    StorageError,
};

use super::test_harness::{
    CATEGORY, QUESTIONS, ViewKind, answer_current, seeded_services, setup_view_harness,
    setup_view_harness_with_practice, setup_view_harness_with_storage, start_practice,
    test_context,
};

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_lists_categories_with_counts() {
    let mut harness = setup_view_harness(ViewKind::Home).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains(CATEGORY), "missing category in {html}");
    assert!(html.contains("3 questions"), "missing count in {html}");
    assert!(html.contains("Planets and moons"), "missing description in {html}");
    assert!(html.contains("bg-blue-100 text-blue-600"), "missing color in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_empty_state() {
    let mut harness = setup_view_harness_with_storage(ViewKind::Home, &Storage::in_memory());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No categories yet"), "missing empty state in {html}");
}

struct FailingRepo;

fn down() -> StorageError {
    StorageError::Connection("fail".to_string())
}

#[async_trait::async_trait]
impl QuestionRepository for FailingRepo {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        Err(down())
    }

    async fn list_questions_by_category(
        &self,
        _category: &str,
    ) -> Result<Vec<Question>, StorageError> {
        Err(down())
    }

    async fn count_questions_by_category(&self, _category: &str) -> Result<u32, StorageError> {
        Err(down())
    }

    async fn get_question(&self, _id: &QuestionId) -> Result<Option<Question>, StorageError> {
        Err(down())
    }

    async fn insert_question(&self, _record: NewQuestionRecord) -> Result<Question, StorageError> {
        Err(down())
    }

    async fn update_question(&self, _question: &Question) -> Result<Question, StorageError> {
        Err(down())
    }

    async fn delete_question(&self, _id: &QuestionId) -> Result<(), StorageError> {
        Err(down())
    }
}

#[async_trait::async_trait]
impl CategoryRepository for FailingRepo {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        Err(down())
    }

    async fn get_category(&self, _id: &CategoryId) -> Result<Option<Category>, StorageError> {
        Err(down())
    }

    async fn insert_category(&self, _record: NewCategoryRecord) -> Result<Category, StorageError> {
        Err(down())
    }

    async fn delete_category(&self, _id: &CategoryId) -> Result<(), StorageError> {
        Err(down())
    }
}

fn failing_storage() -> Storage {
    let repo = Arc::new(FailingRepo);
    Storage {
        questions: repo.clone(),
        categories: repo,
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_view_smoke_renders_error_state() {
    let mut harness = setup_view_harness_with_storage(ViewKind::Home, &failing_storage());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn setup_view_smoke_shows_availability_and_choices() {
    let mut harness = setup_view_harness(ViewKind::Setup).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains(CATEGORY), "missing title in {html}");
    assert!(html.contains("3 questions available"), "missing availability in {html}");
    assert!(html.contains("In order"), "missing mode in {html}");
    assert!(html.contains("single choice"), "missing type filter in {html}");
    assert!(html.contains("Start practice"), "missing start in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn setup_view_smoke_reports_unknown_category() {
    let mut harness = setup_view_harness_with_storage(ViewKind::Setup, &Storage::in_memory());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("no longer exists"), "missing error in {html}");
    assert!(html.contains("Back to categories"), "missing link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_question_and_notice() {
    let mut harness = setup_view_harness(ViewKind::Quiz).await;
    harness.settle().await;
    let html = harness.render();
    assert!(
        html.contains("Only 3 questions available; starting with 3 instead of 5."),
        "missing clamp notice in {html}"
    );
    assert!(html.contains("Question 1 of 3"), "missing position in {html}");
    assert!(
        QUESTIONS.iter().any(|q| html.contains(q)),
        "missing question text in {html}"
    );
    assert!(html.contains("Right"), "missing option in {html}");
    assert!(html.contains("Select one answer, then submit."), "missing hint in {html}");
    assert!(html.contains("Submit"), "missing submit in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_renders_feedback_after_answer() {
    let storage = Storage::in_memory();
    let (services, category_id) = seeded_services(&storage).await;
    let mut run = start_practice(&test_context(&services), &category_id).await;
    answer_current(&mut run, false);

    let mut harness =
        setup_view_harness_with_practice(ViewKind::Quiz, services, category_id, Some(run));
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Incorrect"), "missing verdict in {html}");
    assert!(html.contains("Explanation: Look it up."), "missing explanation in {html}");
    assert!(html.contains("Next question"), "missing next in {html}");
    assert!(html.contains("option--wrong"), "missing wrong mark in {html}");
    assert!(html.contains("option--correct"), "missing correct mark in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn quiz_view_smoke_without_run() {
    let mut harness = setup_view_harness_with_storage(ViewKind::Quiz, &Storage::in_memory());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No quiz in progress."), "missing placeholder in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_renders_score_and_review() {
    let mut harness = setup_view_harness(ViewKind::Results).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("Keep practicing"), "missing headline in {html}");
    assert!(html.contains("Your score: 33%"), "missing percentage in {html}");
    assert!(html.contains("1 / 3 correct"), "missing tally in {html}");
    assert!(html.contains("Your answer: Wrong"), "missing answer in {html}");
    assert!(html.contains("Correct answer: Right"), "missing correction in {html}");
    assert_eq!(html.matches("review--wrong").count(), 2, "wrong rows in {html}");
    assert_eq!(html.matches("review--correct").count(), 1, "right rows in {html}");
    assert!(html.contains("Practice again"), "missing restart in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn results_view_smoke_without_finished_run() {
    let mut harness = setup_view_harness_with_storage(ViewKind::Results, &Storage::in_memory());
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains("No finished quiz to show."), "missing placeholder in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn admin_view_smoke_lists_categories_and_questions() {
    let mut harness = setup_view_harness(ViewKind::Admin).await;
    harness.settle().await;
    let html = harness.render();
    assert!(html.contains(CATEGORY), "missing category in {html}");
    assert!(html.contains("Delete category"), "missing delete in {html}");
    assert!(html.contains("[single]"), "missing kind in {html}");
    assert!(html.contains(QUESTIONS[0]), "missing question in {html}");
    assert!(html.contains("Answer: Right"), "missing answer in {html}");
    assert!(html.contains("Add question"), "missing form in {html}");
}
