/// Relations services: compose a primary entity with its neighbors.
///
/// Join logic lives here once. Author aggregations delegate to the same
/// video/playlist enrichment used by the single-entity reads.
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::{
    Author, AuthorWithPlaylists, AuthorWithVideos, AuthorWithVideosAndPlaylists, Playlist,
    PlaylistEntry, PlaylistVideo, PlaylistWithVideos, Tag, Video, VideoWithDetail,
};
use crate::error::ServiceResult;
use crate::services::authors::AuthorService;
use crate::services::playlists::PlaylistService;
use crate::services::videos::VideoService;

#[derive(Clone)]
pub struct RelationsService {
    pool: SqlitePool,
    authors: AuthorService,
    videos: VideoService,
    playlists: PlaylistService,
}

impl RelationsService {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            authors: AuthorService::new(pool.clone()),
            videos: VideoService::new(pool.clone()),
            playlists: PlaylistService::new(pool.clone()),
            pool,
        }
    }

    /// A video with its author and tag set
    pub async fn video_with_tags(&self, id: Uuid) -> ServiceResult<VideoWithDetail> {
        let video = self.videos.get_by_id(id).await?;
        self.enrich_video(video).await
    }

    /// A playlist with its author and entries ascending by position.
    /// Equal positions keep storage iteration order.
    pub async fn playlist_with_videos_by_id(&self, id: Uuid) -> ServiceResult<PlaylistWithVideos> {
        let playlist = self.playlists.get_by_id(id).await?;
        self.assemble_playlist(playlist).await
    }

    pub async fn author_with_videos(&self, id: Uuid) -> ServiceResult<AuthorWithVideos> {
        let author = self.authors.get_by_id(id).await?;
        let videos = self.videos_of(author.id).await?;
        Ok(AuthorWithVideos { author, videos })
    }

    pub async fn author_with_playlists(&self, id: Uuid) -> ServiceResult<AuthorWithPlaylists> {
        let author = self.authors.get_by_id(id).await?;
        let playlists = self.playlists_of(author.id).await?;
        Ok(AuthorWithPlaylists { author, playlists })
    }

    pub async fn author_with_videos_and_playlists(
        &self,
        id: Uuid,
    ) -> ServiceResult<AuthorWithVideosAndPlaylists> {
        let author = self.authors.get_by_id(id).await?;
        let videos = self.videos_of(author.id).await?;
        let playlists = self.playlists_of(author.id).await?;
        Ok(AuthorWithVideosAndPlaylists {
            author,
            videos,
            playlists,
        })
    }

    /// Every playlist with its entries, with per-item failure isolation:
    /// a playlist whose enrichment fails is still returned, entry list
    /// empty, and the batch goes on.
    pub async fn all_playlists_with_videos(&self) -> ServiceResult<Vec<PlaylistWithVideos>> {
        let playlists = self.playlists.list().await?;

        let mut out = Vec::with_capacity(playlists.len());
        for playlist in playlists {
            match self.assemble_playlist(playlist.clone()).await {
                Ok(view) => out.push(view),
                Err(err) => {
                    tracing::warn!(
                        playlist_id = %playlist.id,
                        "playlist enrichment failed, returning it without entries: {err}"
                    );
                    let author = self.author_of(playlist.author_id).await.ok().flatten();
                    out.push(PlaylistWithVideos {
                        playlist,
                        author,
                        entries: Vec::new(),
                    });
                }
            }
        }
        Ok(out)
    }

    /// Enriched videos owned by an author, newest first
    pub async fn videos_of(&self, author_id: Uuid) -> ServiceResult<Vec<VideoWithDetail>> {
        let videos = sqlx::query_as::<_, Video>(
            r#"
            SELECT id, title, url, start_sec, end_sec, author_id, created_at, updated_at
            FROM videos
            WHERE author_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(videos.len());
        for video in videos {
            out.push(self.enrich_video(video).await?);
        }
        Ok(out)
    }

    /// Assembled playlists owned by an author, newest first
    pub async fn playlists_of(&self, author_id: Uuid) -> ServiceResult<Vec<PlaylistWithVideos>> {
        let playlists = sqlx::query_as::<_, Playlist>(
            r#"
            SELECT id, title, author_id, created_at, updated_at
            FROM playlists
            WHERE author_id = $1
            ORDER BY created_at DESC
            "#,
        )
        .bind(author_id)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(playlists.len());
        for playlist in playlists {
            out.push(self.assemble_playlist(playlist).await?);
        }
        Ok(out)
    }

    /// The author reference on videos/playlists is unenforced at the store,
    /// so a missing author decodes to `None` rather than an error.
    async fn author_of(&self, author_id: Uuid) -> ServiceResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            r#"
            SELECT id, name, icon_url, bio, created_at, updated_at
            FROM authors
            WHERE id = $1
            "#,
        )
        .bind(author_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(author)
    }

    async fn enrich_video(&self, video: Video) -> ServiceResult<VideoWithDetail> {
        let author = self.author_of(video.author_id).await?;
        let tags = sqlx::query_as::<_, Tag>(
            r#"
            SELECT t.id, t.name, t.created_at, t.updated_at
            FROM video_tags vt
            JOIN tags t ON t.id = vt.tag_id
            WHERE vt.video_id = $1
            ORDER BY t.name
            "#,
        )
        .bind(video.id)
        .fetch_all(&self.pool)
        .await?;

        Ok(VideoWithDetail {
            video,
            author,
            tags,
        })
    }

    async fn assemble_playlist(&self, playlist: Playlist) -> ServiceResult<PlaylistWithVideos> {
        let author = self.author_of(playlist.author_id).await?;

        let rows = sqlx::query_as::<_, PlaylistVideo>(
            r#"
            SELECT id, playlist_id, video_id, position, created_at, updated_at
            FROM playlist_videos
            WHERE playlist_id = $1
            ORDER BY position ASC
            "#,
        )
        .bind(playlist.id)
        .fetch_all(&self.pool)
        .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            // a junction row left behind by a deleted video surfaces here
            // as NotFound; list callers decide whether to isolate it
            let video = self.videos.get_by_id(row.video_id).await?;
            let video = self.enrich_video(video).await?;
            entries.push(PlaylistEntry {
                position: row.position,
                video,
            });
        }

        Ok(PlaylistWithVideos {
            playlist,
            author,
            entries,
        })
    }
}
