use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::Video;
use crate::error::{ServiceError, ServiceResult};
use crate::services::authors::AuthorService;

/// Fields for creating a video clip
#[derive(Debug, Clone, Deserialize)]
pub struct NewVideo {
    pub title: String,
    pub url: String,
    pub start_sec: i64,
    pub end_sec: i64,
    pub author_id: Uuid,
}

/// Partial update for a video; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct VideoUpdate {
    pub title: Option<String>,
    pub url: Option<String>,
    pub start_sec: Option<i64>,
    pub end_sec: Option<i64>,
    pub author_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct VideoService {
    pool: SqlitePool,
    authors: AuthorService,
}

impl VideoService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            authors: AuthorService::new(pool.clone()),
            pool,
        }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, title, url, start_sec, end_sec, author_id, created_at, updated_at
            FROM videos
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }

    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<Video> {
        let video = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, title, url, start_sec, end_sec, author_id, created_at, updated_at
            FROM videos
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        video.ok_or_else(|| ServiceError::NotFound(format!("video {id}")))
    }

    /// Create a clip. The referenced author is loaded first; the check is a
    /// separate read from the insert and is not atomic with it.
    pub async fn create(&self, new: NewVideo) -> ServiceResult<Video> {
        check_clip_range(new.start_sec, new.end_sec)?;
        self.authors.get_by_id(new.author_id).await?;

        let video = sqlx::query_as::<_, Video>(
            r#"
            INSERT INTO videos (id, title, url, start_sec, end_sec, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $7)
            RETURNING id, title, url, start_sec, end_sec, author_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(&new.url)
        .bind(new.start_sec)
        .bind(new.end_sec)
        .bind(new.author_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(video)
    }

    pub async fn update(&self, id: Uuid, patch: VideoUpdate) -> ServiceResult<()> {
        let existing = self.get_by_id(id).await?;

        if let Some(author_id) = patch.author_id {
            self.authors.get_by_id(author_id).await?;
        }

        let title = patch.title.unwrap_or(existing.title);
        let url = patch.url.unwrap_or(existing.url);
        let start_sec = patch.start_sec.unwrap_or(existing.start_sec);
        let end_sec = patch.end_sec.unwrap_or(existing.end_sec);
        let author_id = patch.author_id.unwrap_or(existing.author_id);
        check_clip_range(start_sec, end_sec)?;

        sqlx::query(
            r#"
            UPDATE videos
            SET title = $1, url = $2, start_sec = $3, end_sec = $4, author_id = $5, updated_at = $6
            WHERE id = $7
            "#,
        )
        .bind(&title)
        .bind(&url)
        .bind(start_sec)
        .bind(end_sec)
        .bind(author_id)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let affected = sqlx::query("DELETE FROM videos WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(ServiceError::NotFound(format!("video {id}")));
        }
        Ok(())
    }

    /// Associate a tag with a video (idempotent - repeat tagging is a no-op)
    pub async fn add_tag(&self, video_id: Uuid, tag_id: Uuid) -> ServiceResult<()> {
        self.get_by_id(video_id).await?;

        let tag_exists: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tags WHERE id = $1)")
            .bind(tag_id)
            .fetch_one(&self.pool)
            .await?;
        if !tag_exists {
            return Err(ServiceError::NotFound(format!("tag {tag_id}")));
        }

        sqlx::query(
            r#"
            INSERT INTO video_tags (video_id, tag_id, created_at)
            VALUES ($1, $2, $3)
            ON CONFLICT (video_id, tag_id) DO NOTHING
            "#,
        )
        .bind(video_id)
        .bind(tag_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn remove_tag(&self, video_id: Uuid, tag_id: Uuid) -> ServiceResult<()> {
        let affected = sqlx::query("DELETE FROM video_tags WHERE video_id = $1 AND tag_id = $2")
            .bind(video_id)
            .bind(tag_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "video {video_id} is not tagged {tag_id}"
            )));
        }
        Ok(())
    }
}

fn check_clip_range(start_sec: i64, end_sec: i64) -> ServiceResult<()> {
    if start_sec >= end_sec {
        return Err(ServiceError::InvalidOperation(format!(
            "clip start ({start_sec}s) must precede end ({end_sec}s)"
        )));
    }
    Ok(())
}
