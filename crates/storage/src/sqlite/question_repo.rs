use quiz_core::model::{Question, QuestionId};
use sqlx::Row;

use super::SqliteRepository;
use super::mapping::{map_question_row, option_ids_to_json, options_to_json, read_err, ser, write_err};
use crate::repository::{NewQuestionRecord, QuestionRepository, StorageError};

const SELECT_QUESTION: &str = r"
    SELECT id, category, type, text, options, correct_option_ids, explanation, created_at
    FROM questions
";

#[async_trait::async_trait]
impl QuestionRepository for SqliteRepository {
    async fn list_questions(&self) -> Result<Vec<Question>, StorageError> {
        let sql = format!("{SELECT_QUESTION} ORDER BY created_at DESC, rowid DESC");
        let rows = sqlx::query(&sql)
            .fetch_all(&self.pool)
            .await
            .map_err(read_err)?;

        rows.iter().map(map_question_row).collect()
    }

    async fn list_questions_by_category(
        &self,
        category: &str,
    ) -> Result<Vec<Question>, StorageError> {
        let sql =
            format!("{SELECT_QUESTION} WHERE category = ?1 ORDER BY created_at DESC, rowid DESC");
        let rows = sqlx::query(&sql)
            .bind(category)
            .fetch_all(&self.pool)
            .await
            .map_err(read_err)?;

        rows.iter().map(map_question_row).collect()
    }

    async fn count_questions_by_category(&self, category: &str) -> Result<u32, StorageError> {
        let row = sqlx::query("SELECT COUNT(*) AS n FROM questions WHERE category = ?1")
            .bind(category)
            .fetch_one(&self.pool)
            .await
            .map_err(read_err)?;
        let n: i64 = row.try_get("n").map_err(ser)?;
        u32::try_from(n).map_err(|_| StorageError::Serialization(format!("invalid count: {n}")))
    }

    async fn get_question(&self, id: &QuestionId) -> Result<Option<Question>, StorageError> {
        let sql = format!("{SELECT_QUESTION} WHERE id = ?1");
        let row = sqlx::query(&sql)
            .bind(id.as_str())
            .fetch_optional(&self.pool)
            .await
            .map_err(read_err)?;

        row.as_ref().map(map_question_row).transpose()
    }

    async fn insert_question(&self, record: NewQuestionRecord) -> Result<Question, StorageError> {
        let question = record.into_question(self.clock.now())?;
        let options = options_to_json(question.options())?;
        let correct = option_ids_to_json(question.correct_option_ids())?;

        sqlx::query(
            r"
            INSERT INTO questions (id, category, type, text, options, correct_option_ids, explanation, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
            ",
        )
        .bind(question.id().as_str())
        .bind(question.category())
        .bind(question.question_type().as_str())
        .bind(question.text())
        .bind(options)
        .bind(correct)
        .bind(question.explanation())
        .bind(question.created_at())
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        Ok(question)
    }

    async fn update_question(&self, question: &Question) -> Result<Question, StorageError> {
        let options = options_to_json(question.options())?;
        let correct = option_ids_to_json(question.correct_option_ids())?;

        let res = sqlx::query(
            r"
            UPDATE questions SET
                category = ?2,
                type = ?3,
                text = ?4,
                options = ?5,
                correct_option_ids = ?6,
                explanation = ?7
            WHERE id = ?1
            ",
        )
        .bind(question.id().as_str())
        .bind(question.category())
        .bind(question.question_type().as_str())
        .bind(question.text())
        .bind(options)
        .bind(correct)
        .bind(question.explanation())
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }

        self.get_question(question.id())
            .await?
            .ok_or(StorageError::NotFound)
    }

    async fn delete_question(&self, id: &QuestionId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM questions WHERE id = ?1")
            .bind(id.as_str())
            .execute(&self.pool)
            .await
            .map_err(write_err)?;

        if res.rows_affected() == 0 {
            return Err(StorageError::NotFound);
        }
        Ok(())
    }
}
