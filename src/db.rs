/// Pool construction and schema bootstrap
use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;
use crate::error::ServiceResult;

/// Schema for the catalogue tables.
///
/// `videos.author_id` and `playlists.author_id` are intentionally not
/// foreign keys: deleting an author leaves their videos and playlists in
/// place (see DESIGN.md). Follow edges and bookmarks do cascade on author
/// or target removal. Junction rows (playlist_videos, video_tags) carry no
/// foreign keys either; tag removal clears its junction rows transactionally
/// in the service layer instead.
const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS authors (
    id          BLOB PRIMARY KEY,
    name        TEXT NOT NULL,
    icon_url    TEXT NOT NULL,
    bio         TEXT,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS videos (
    id          BLOB PRIMARY KEY,
    title       TEXT NOT NULL,
    url         TEXT NOT NULL,
    start_sec   INTEGER NOT NULL,
    end_sec     INTEGER NOT NULL,
    author_id   BLOB NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS playlists (
    id          BLOB PRIMARY KEY,
    title       TEXT NOT NULL,
    author_id   BLOB NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS tags (
    id          BLOB PRIMARY KEY,
    name        TEXT NOT NULL UNIQUE,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS playlist_videos (
    id          BLOB PRIMARY KEY,
    playlist_id BLOB NOT NULL,
    video_id    BLOB NOT NULL,
    position    INTEGER NOT NULL,
    created_at  TEXT NOT NULL,
    updated_at  TEXT NOT NULL,
    UNIQUE (playlist_id, video_id)
);

CREATE TABLE IF NOT EXISTS video_tags (
    video_id    BLOB NOT NULL,
    tag_id      BLOB NOT NULL,
    created_at  TEXT NOT NULL,
    PRIMARY KEY (video_id, tag_id)
);

CREATE TABLE IF NOT EXISTS follows (
    follower_id  BLOB NOT NULL REFERENCES authors(id) ON DELETE CASCADE,
    following_id BLOB NOT NULL REFERENCES authors(id) ON DELETE CASCADE,
    created_at   TEXT NOT NULL,
    PRIMARY KEY (follower_id, following_id)
);

CREATE TABLE IF NOT EXISTS video_bookmarks (
    id          BLOB PRIMARY KEY,
    author_id   BLOB NOT NULL REFERENCES authors(id) ON DELETE CASCADE,
    video_id    BLOB NOT NULL REFERENCES videos(id) ON DELETE CASCADE,
    created_at  TEXT NOT NULL,
    UNIQUE (author_id, video_id)
);

CREATE TABLE IF NOT EXISTS playlist_bookmarks (
    id          BLOB PRIMARY KEY,
    author_id   BLOB NOT NULL REFERENCES authors(id) ON DELETE CASCADE,
    playlist_id BLOB NOT NULL REFERENCES playlists(id) ON DELETE CASCADE,
    created_at  TEXT NOT NULL,
    UNIQUE (author_id, playlist_id)
);

CREATE INDEX IF NOT EXISTS idx_videos_author ON videos(author_id);
CREATE INDEX IF NOT EXISTS idx_playlists_author ON playlists(author_id);
CREATE INDEX IF NOT EXISTS idx_playlist_videos_playlist ON playlist_videos(playlist_id);
CREATE INDEX IF NOT EXISTS idx_video_tags_tag ON video_tags(tag_id);
CREATE INDEX IF NOT EXISTS idx_follows_following ON follows(following_id);
"#;

/// Open a pool against the configured database.
pub async fn connect(config: &DatabaseConfig) -> ServiceResult<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Create the catalogue tables if they do not exist. Idempotent.
pub async fn init_schema(pool: &SqlitePool) -> ServiceResult<()> {
    sqlx::raw_sql(SCHEMA).execute(pool).await?;
    Ok(())
}
