use quiz_core::model::{AnswerOption, Category, CategoryId, OptionId, Question, QuestionId, QuestionType};
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

use crate::repository::StorageError;

pub(crate) fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

/// Maps a write failure, turning unique-key violations into `Conflict`.
pub(crate) fn write_err(e: sqlx::Error) -> StorageError {
    match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => StorageError::Conflict,
        _ => StorageError::Connection(e.to_string()),
    }
}

pub(crate) fn read_err(e: sqlx::Error) -> StorageError {
    StorageError::Connection(e.to_string())
}

pub(crate) fn options_to_json(options: &[AnswerOption]) -> Result<String, StorageError> {
    serde_json::to_string(options).map_err(ser)
}

pub(crate) fn option_ids_to_json<'a>(
    ids: impl IntoIterator<Item = &'a OptionId>,
) -> Result<String, StorageError> {
    let ids: Vec<&OptionId> = ids.into_iter().collect();
    serde_json::to_string(&ids).map_err(ser)
}

pub(crate) fn map_question_row(row: &SqliteRow) -> Result<Question, StorageError> {
    let type_str: String = row.try_get("type").map_err(ser)?;
    let question_type: QuestionType = type_str.parse().map_err(ser)?;

    let options_json: String = row.try_get("options").map_err(ser)?;
    let options: Vec<AnswerOption> = serde_json::from_str(&options_json).map_err(ser)?;

    let correct_json: String = row.try_get("correct_option_ids").map_err(ser)?;
    let correct: Vec<OptionId> = serde_json::from_str(&correct_json).map_err(ser)?;

    Question::from_persisted(
        QuestionId::new(row.try_get::<String, _>("id").map_err(ser)?),
        row.try_get::<String, _>("category").map_err(ser)?,
        question_type,
        row.try_get::<String, _>("text").map_err(ser)?,
        options,
        correct,
        row.try_get::<Option<String>, _>("explanation").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}

pub(crate) fn map_category_row(row: &SqliteRow) -> Result<Category, StorageError> {
    Category::new(
        CategoryId::new(row.try_get::<String, _>("id").map_err(ser)?),
        row.try_get::<String, _>("name").map_err(ser)?,
        row.try_get::<String, _>("icon").map_err(ser)?,
        row.try_get::<String, _>("color").map_err(ser)?,
        row.try_get::<Option<String>, _>("description").map_err(ser)?,
        row.try_get("created_at").map_err(ser)?,
    )
    .map_err(ser)
}
