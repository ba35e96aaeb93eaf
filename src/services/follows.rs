use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::Author;
use crate::error::{ServiceError, ServiceResult};
use crate::services::authors::AuthorService;

#[derive(Clone)]
pub struct FollowService {
    pool: SqlitePool,
    authors: AuthorService,
}

impl FollowService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            authors: AuthorService::new(pool.clone()),
            pool,
        }
    }

    /// Idempotent create follow; returns true if a new edge was inserted.
    /// Both endpoints must exist and self-follow is rejected outright.
    pub async fn follow(&self, follower_id: Uuid, following_id: Uuid) -> ServiceResult<bool> {
        if follower_id == following_id {
            return Err(ServiceError::InvalidOperation(
                "authors cannot follow themselves".to_string(),
            ));
        }

        self.authors.get_by_id(follower_id).await?;
        self.authors.get_by_id(following_id).await?;

        let affected = sqlx::query(
            r#"
            INSERT INTO follows (follower_id, following_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (follower_id, following_id) DO NOTHING
            "#,
        )
        .bind(follower_id)
        .bind(following_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    /// Idempotent delete; returns true if an edge was removed.
    pub async fn unfollow(&self, follower_id: Uuid, following_id: Uuid) -> ServiceResult<bool> {
        let affected = sqlx::query(
            r#"
            DELETE FROM follows
            WHERE follower_id = $1 AND following_id = $2
            "#,
        )
        .bind(follower_id)
        .bind(following_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(affected > 0)
    }

    pub async fn is_following(&self, follower_id: Uuid, following_id: Uuid) -> ServiceResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM follows
                WHERE follower_id = $1 AND following_id = $2
            )
            "#,
        )
        .bind(follower_id)
        .bind(following_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    /// Authors following the given author, most recent edge first
    pub async fn followers(&self, author_id: Uuid) -> ServiceResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT a.id, a.name, a.icon_url, a.bio, a.created_at, a.updated_at
            FROM follows f
            JOIN authors a ON a.id = f.follower_id
            WHERE f.following_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }

    /// Authors the given author follows, most recent edge first
    pub async fn following(&self, author_id: Uuid) -> ServiceResult<Vec<Author>> {
        let authors = sqlx::query_as::<_, Author>(
            r#"
            SELECT a.id, a.name, a.icon_url, a.bio, a.created_at, a.updated_at
            FROM follows f
            JOIN authors a ON a.id = f.following_id
            WHERE f.follower_id = $1
            ORDER BY f.created_at DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(authors)
    }
}
