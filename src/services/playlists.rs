use chrono::Utc;
use serde::Deserialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::{Playlist, PlaylistVideo};
use crate::error::{ServiceError, ServiceResult};
use crate::services::authors::AuthorService;
use crate::services::videos::VideoService;

/// Fields for creating a playlist
#[derive(Debug, Clone, Deserialize)]
pub struct NewPlaylist {
    pub title: String,
    pub author_id: Uuid,
}

/// Partial update for a playlist; `None` fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PlaylistUpdate {
    pub title: Option<String>,
    pub author_id: Option<Uuid>,
}

#[derive(Clone)]
pub struct PlaylistService {
    pool: SqlitePool,
    authors: AuthorService,
    videos: VideoService,
}

impl PlaylistService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            authors: AuthorService::new(pool.clone()),
            videos: VideoService::new(pool.clone()),
            pool,
        }
    }

    pub async fn list(&self) -> ServiceResult<Vec<Playlist>> {
        let playlists = sqlx::query_as::<_, Playlist>(
            r#"
            SELECT id, title, author_id, created_at, updated_at
            FROM playlists
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(playlists)
    }

    pub async fn get_by_id(&self, id: Uuid) -> ServiceResult<Playlist> {
        let playlist = sqlx::query_as::<_, Playlist>(
            r#"
            SELECT id, title, author_id, created_at, updated_at
            FROM playlists
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        playlist.ok_or_else(|| ServiceError::NotFound(format!("playlist {id}")))
    }

    /// Create a playlist. The referenced author is loaded first; the check
    /// is a separate read from the insert and is not atomic with it.
    pub async fn create(&self, new: NewPlaylist) -> ServiceResult<Playlist> {
        self.authors.get_by_id(new.author_id).await?;

        let playlist = sqlx::query_as::<_, Playlist>(
            r#"
            INSERT INTO playlists (id, title, author_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $4)
            RETURNING id, title, author_id, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new.title)
        .bind(new.author_id)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(playlist)
    }

    pub async fn update(&self, id: Uuid, patch: PlaylistUpdate) -> ServiceResult<()> {
        let existing = self.get_by_id(id).await?;

        if let Some(author_id) = patch.author_id {
            self.authors.get_by_id(author_id).await?;
        }

        let title = patch.title.unwrap_or(existing.title);
        let author_id = patch.author_id.unwrap_or(existing.author_id);

        sqlx::query(
            r#"
            UPDATE playlists
            SET title = $1, author_id = $2, updated_at = $3
            WHERE id = $4
            "#,
        )
        .bind(&title)
        .bind(author_id)
        .bind(Utc::now())
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    pub async fn delete(&self, id: Uuid) -> ServiceResult<()> {
        let affected = sqlx::query("DELETE FROM playlists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        if affected == 0 {
            return Err(ServiceError::NotFound(format!("playlist {id}")));
        }
        Ok(())
    }

    /// Insert a video into a playlist at a caller-supplied position.
    /// Positions are arbitrary integers, never compacted; a video can
    /// appear at most once per playlist.
    pub async fn add_video(
        &self,
        playlist_id: Uuid,
        video_id: Uuid,
        position: i64,
    ) -> ServiceResult<PlaylistVideo> {
        self.get_by_id(playlist_id).await?;
        self.videos.get_by_id(video_id).await?;

        let row = sqlx::query_as::<_, PlaylistVideo>(
            r#"
            INSERT INTO playlist_videos (id, playlist_id, video_id, position, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, playlist_id, video_id, position, created_at, updated_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(playlist_id)
        .bind(video_id)
        .bind(position)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await?;

        Ok(row)
    }

    pub async fn remove_video(&self, playlist_id: Uuid, video_id: Uuid) -> ServiceResult<()> {
        let affected =
            sqlx::query("DELETE FROM playlist_videos WHERE playlist_id = $1 AND video_id = $2")
                .bind(playlist_id)
                .bind(video_id)
                .execute(&self.pool)
                .await?
                .rows_affected();

        if affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "video {video_id} is not in playlist {playlist_id}"
            )));
        }
        Ok(())
    }

    pub async fn set_position(
        &self,
        playlist_id: Uuid,
        video_id: Uuid,
        position: i64,
    ) -> ServiceResult<()> {
        let affected = sqlx::query(
            r#"
            UPDATE playlist_videos
            SET position = $1, updated_at = $2
            WHERE playlist_id = $3 AND video_id = $4
            "#,
        )
        .bind(position)
        .bind(Utc::now())
        .bind(playlist_id)
        .bind(video_id)
        .execute(&self.pool)
        .await?
        .rows_affected();

        if affected == 0 {
            return Err(ServiceError::NotFound(format!(
                "video {video_id} is not in playlist {playlist_id}"
            )));
        }
        Ok(())
    }
}
