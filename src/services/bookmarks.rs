/// Bookmark services for videos and playlists.
///
/// Create is idempotent: a repeat create for the same (author, target) pair
/// returns the existing row. The insert and the duplicate check are one
/// storage statement, so a racing create loses cleanly to the winner's row.
/// Delete is not idempotent: removing an absent bookmark is `NotFound`.
use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::{Playlist, PlaylistBookmark, Video, VideoBookmark};
use crate::error::{ServiceError, ServiceResult};

#[derive(Clone)]
pub struct VideoBookmarkService {
    pool: SqlitePool,
}

impl VideoBookmarkService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Never fails for a missing author or video; simply false.
    pub async fn has_bookmarked(&self, author_id: Uuid, video_id: Uuid) -> ServiceResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM video_bookmarks
                WHERE author_id = $1 AND video_id = $2
            )
            "#,
        )
        .bind(author_id)
        .bind(video_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create(&self, author_id: Uuid, video_id: Uuid) -> ServiceResult<VideoBookmark> {
        ensure_exists(&self.pool, "authors", "author", author_id).await?;
        ensure_exists(&self.pool, "videos", "video", video_id).await?;

        let inserted = sqlx::query_as::<_, VideoBookmark>(
            r#"
            INSERT INTO video_bookmarks (id, author_id, video_id, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (author_id, video_id) DO NOTHING
            RETURNING id, author_id, video_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(author_id)
        .bind(video_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(bookmark) => Ok(bookmark),
            // already bookmarked (or lost a racing create): the stored row wins
            None => {
                let existing = sqlx::query_as::<_, VideoBookmark>(
                    r#"
                    SELECT id, author_id, video_id, created_at
                    FROM video_bookmarks
                    WHERE author_id = $1 AND video_id = $2
                    "#,
                )
                .bind(author_id)
                .bind(video_id)
                .fetch_one(&self.pool)
                .await?;
                Ok(existing)
            }
        }
    }

    pub async fn delete(&self, author_id: Uuid, video_id: Uuid) -> ServiceResult<()> {
        let affected =
            sqlx::query("DELETE FROM video_bookmarks WHERE author_id = $1 AND video_id = $2")
                .bind(author_id)
                .bind(video_id)
                .execute(&self.pool)
                .await?
                .rows_affected();

        if affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "no bookmark by author {author_id} for video {video_id}"
            )));
        }
        Ok(())
    }

    /// Videos the author has bookmarked, most recent bookmark first
    pub async fn bookmarks_of(&self, author_id: Uuid) -> ServiceResult<Vec<Video>> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT v.id, v.title, v.url, v.start_sec, v.end_sec, v.author_id,
                   v.created_at, v.updated_at
            FROM video_bookmarks b
            JOIN videos v ON v.id = b.video_id
            WHERE b.author_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(videos)
    }
}

#[derive(Clone)]
pub struct PlaylistBookmarkService {
    pool: SqlitePool,
}

impl PlaylistBookmarkService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Never fails for a missing author or playlist; simply false.
    pub async fn has_bookmarked(&self, author_id: Uuid, playlist_id: Uuid) -> ServiceResult<bool> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM playlist_bookmarks
                WHERE author_id = $1 AND playlist_id = $2
            )
            "#,
        )
        .bind(author_id)
        .bind(playlist_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    pub async fn create(
        &self,
        author_id: Uuid,
        playlist_id: Uuid,
    ) -> ServiceResult<PlaylistBookmark> {
        ensure_exists(&self.pool, "authors", "author", author_id).await?;
        ensure_exists(&self.pool, "playlists", "playlist", playlist_id).await?;

        let inserted = sqlx::query_as::<_, PlaylistBookmark>(
            r#"
            INSERT INTO playlist_bookmarks (id, author_id, playlist_id, created_at)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (author_id, playlist_id) DO NOTHING
            RETURNING id, author_id, playlist_id, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(author_id)
        .bind(playlist_id)
        .bind(Utc::now())
        .fetch_optional(&self.pool)
        .await?;

        match inserted {
            Some(bookmark) => Ok(bookmark),
            None => {
                let existing = sqlx::query_as::<_, PlaylistBookmark>(
                    r#"
                    SELECT id, author_id, playlist_id, created_at
                    FROM playlist_bookmarks
                    WHERE author_id = $1 AND playlist_id = $2
                    "#,
                )
                .bind(author_id)
                .bind(playlist_id)
                .fetch_one(&self.pool)
                .await?;
                Ok(existing)
            }
        }
    }

    pub async fn delete(&self, author_id: Uuid, playlist_id: Uuid) -> ServiceResult<()> {
        let affected =
            sqlx::query("DELETE FROM playlist_bookmarks WHERE author_id = $1 AND playlist_id = $2")
                .bind(author_id)
                .bind(playlist_id)
                .execute(&self.pool)
                .await?
                .rows_affected();

        if affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "no bookmark by author {author_id} for playlist {playlist_id}"
            )));
        }
        Ok(())
    }

    /// Playlists the author has bookmarked, most recent bookmark first
    pub async fn bookmarks_of(&self, author_id: Uuid) -> ServiceResult<Vec<Playlist>> {
        let playlists = sqlx::query_as::<_, Playlist>(
            r#"
            SELECT p.id, p.title, p.author_id, p.created_at, p.updated_at
            FROM playlist_bookmarks b
            JOIN playlists p ON p.id = b.playlist_id
            WHERE b.author_id = $1
            ORDER BY b.created_at DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(playlists)
    }
}

/// Existence probe shared by both bookmark services. The table name is one
/// of our own literals, never caller input.
async fn ensure_exists(
    pool: &SqlitePool,
    table: &str,
    entity: &str,
    id: Uuid,
) -> ServiceResult<()> {
    let sql = format!("SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1)");
    let exists: bool = sqlx::query_scalar(&sql).bind(id).fetch_one(pool).await?;

    if !exists {
        return Err(ServiceError::NotFound(format!("{entity} {id}")));
    }
    Ok(())
}
