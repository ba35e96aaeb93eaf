use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::Author;
use crate::error::{ServiceError, ServiceResult};

/// Fields for creating an author
#[derive(Debug, Clone, Deserialize)]
pub struct NewAuthor {
    pub name: String,
    pub icon_url: String,
    pub bio: Option<String>,
}

/// Partial update for an author; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AuthorUpdate {
    pub name: Option<String>,
    pub icon_url: Option<String>,
    pub bio: Option<String>,
}

#[derive(Clone)]
pub struct AuthorService {
    pool: SqlitePool,
}

impl AuthorService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, name, icon_url, bio, created_at, updated_at
            FROM authors
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, name, icon_url, bio, created_at, updated_at
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        author.ok_or_else(|| ServiceError::NotFound(format!("author {id}")))
    }

    pub async fn create(&self, new: NewAuthor) -> ServiceResult<Author> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            INSERT INTO authors (id, name, icon_url, bio, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, name, icon_url, bio, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.name)
        .bind(&new.icon_url)
        .bind(&new.bio)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(author)
    }

    /// Partial update; unspecified fields keep their stored value, and
    /// `updated_at` is stamped unconditionally.
    pub async fn update(&self, id: Uuid, patch: AuthorUpdate) -> ServiceResult<()> {
        let existing = self.get_by_id(id).await?;

        let name = patch.name.unwrap_or(existing.name);
        let icon_url = patch.icon_url.unwrap_or(existing.icon_url);
        let bio = patch.bio.or(existing.bio);

        sqlx::query(
            r#"
            UPDATE authors
            SET name = $1, icon_url = $2, bio = $3, updated_at = $4
            WHERE id = $5
            "#,
        )
        .bind(&name)
        .bind(&icon_url)
        .bind(&bio)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Hard delete. Follow edges and bookmarks referencing the author
    /// cascade at the store; their videos and playlists stay behind.
    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let affected = sqlx::query("DELETE FROM authors WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(ServiceError::NotFound(format!("author {id}")));
        }
        Ok(())
    }
}
