/// Top-level read aggregators combining relations, bookmark and counter
/// queries into one payload per author.
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::{AuthorProfile, AuthorWithCounts};
use crate::error::ServiceResult;
use crate::services::authors::AuthorService;
use crate::services::bookmarks::{PlaylistBookmarkService, VideoBookmarkService};
use crate::services::relations::RelationsService;

#[derive(Clone)]
pub struct AggregateService {
    pool: SqlitePool,
    authors: AuthorService,
    relations: RelationsService,
    video_bookmarks: VideoBookmarkService,
    playlist_bookmarks: PlaylistBookmarkService,
}

impl AggregateService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            authors: AuthorService::new(pool.clone()),
            relations: RelationsService::new(pool.clone()),
            video_bookmarks: VideoBookmarkService::new(pool.clone()),
            playlist_bookmarks: PlaylistBookmarkService::new(pool.clone()),
            pool,
        }
    }

    /// Author plus follower/video/playlist counts. One count query each;
    /// fine at this fan-out, a grouped aggregation once authors are listed
    /// in bulk.
    pub async fn author_with_counts(&self, id: Uuid) -> ServiceResult<AuthorWithCounts> {
        let author = self.authors.get_by_id(id).await?;

        let follower_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM follows WHERE following_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        let video_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM videos WHERE author_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        let playlist_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM playlists WHERE author_id = $1")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(AuthorWithCounts {
            author,
            follower_count,
            video_count,
            playlist_count,
        })
    }

    /// Full author payload: own videos and playlists plus bookmarked ones.
    /// A missing author short-circuits the whole call, and any relation
    /// failure propagates - no per-item isolation at this level.
    pub async fn author_with_videos_playlists_and_bookmarks(
        &self,
        id: Uuid,
    ) -> ServiceResult<AuthorProfile> {
        let author = self.authors.get_by_id(id).await?;

        let videos = self.relations.videos_of(author.id).await?;
        let playlists = self.relations.playlists_of(author.id).await?;
        let bookmarked_videos = self.video_bookmarks.bookmarks_of(author.id).await?;
        let bookmarked_playlists = self.playlist_bookmarks.bookmarks_of(author.id).await?;

        Ok(AuthorProfile {
            author,
            videos,
            playlists,
            bookmarked_videos,
            bookmarked_playlists,
        })
    }
}
