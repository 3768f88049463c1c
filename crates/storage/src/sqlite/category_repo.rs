use quiz_core::model::{Category, CategoryId};

use super::SqliteRepository;
use super::mapping::{map_category_row, read_err, write_err};
use crate::repository::{CategoryRepository, NewCategoryRecord, StorageError};

#[async_trait::async_trait]
impl CategoryRepository for SqliteRepository {
    async fn list_categories(&self) -> Result<Vec<Category>, StorageError> {
        let rows = sqlx::query(
            r"
            SELECT id, name, icon, color, description, created_at
            FROM categories
            ORDER BY created_at DESC, rowid DESC
            ",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(read_err)?;

        rows.iter().map(map_category_row).collect()
    }

    async fn get_category(&self, id: &CategoryId) -> Result<Option<Category>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT id, name, icon, color, description, created_at
            FROM categories WHERE id = ?1
            ",
        )
        .bind(id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(read_err)?;

        row.as_ref().map(map_category_row).transpose()
    }

    async fn insert_category(&self, record: NewCategoryRecord) -> Result<Category, StorageError> {
        let category = record.into_category(self.clock.now())?;

        sqlx::query(
            r"
            INSERT INTO categories (id, name, icon, color, description, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            ",
        )
        .bind(category.id().as_str())
        .bind(category.name())
        .bind(category.icon_name())
        .bind(category.color_token())
        .bind(category.description())
        .bind(category.created_at())
        .execute(&self.pool)
        .await
        .map_err(write_err)?;

        Ok(category)
    }

    async fn delete_category(&self, id: &CategoryId) -> Result<(), StorageError> {
        let res = sqlx::query("DELETE FROM categories WHERE id = ?1")
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
