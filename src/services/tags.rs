use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::Tag;
use crate::error::{ServiceError, ServiceResult};

#[derive(Clone)]
pub struct TagService {
    pool: SqlitePool,
}

impl TagService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Tag>> {
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM tags
            ORDER BY name
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(tags)
    }

    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<Tag> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM tags
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        tag.ok_or_else(|| ServiceError::NotFound(format!("tag {id}")))
    }

    /// Create a tag; a duplicate name surfaces as `UniqueConstraint`.
    pub async fn create(&self, name: &str) -> ServiceResult<Tag> {
        let tag = sqlx::query_as::<_, Tag>(
            r#"
            INSERT INTO tags (id, name, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(name)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(tag)
    }

    /// Rename a tag; a collision with an existing name surfaces as
    /// `UniqueConstraint`.
    pub async fn rename(&self, id: Uuid, name: &str) -> ServiceResult<()> {
        self.get_by_id(id).await?;

        sqlx::query(
            r#"
            UPDATE tags
            SET name = $1, updated_at = $2
            WHERE id = $3
            "#,
        )
        .bind(name)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Delete a tag and every junction row referencing it in one
    /// transaction - either both disappear or neither does.
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let mut tx = self.pool.begin().await?;

        let affected = sqlx::query("DELETE FROM tags WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        if affected == 0 {
            // dropped transaction rolls back
            return Err(ServiceError::NotFound(format!("tag {id}")));
        }

        sqlx::query("DELETE FROM video_tags WHERE tag_id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        Ok(())
    }
}
