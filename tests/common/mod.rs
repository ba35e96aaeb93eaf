#![allow(dead_code)]

use std::str::FromStr;
use std::sync::Once;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use clipshelf::db;
use clipshelf::domain::{Author, Playlist, Tag, Video};
use clipshelf::services::authors::{AuthorService, NewAuthor};
use clipshelf::services::playlists::{NewPlaylist, PlaylistService};
use clipshelf::services::tags::TagService;
use clipshelf::services::videos::{NewVideo, VideoService};

static TRACING: Once = Once::new();

/// Honors RUST_LOG when set; quiet otherwise
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .try_init();
    });
}

/// One in-memory database per test. A single connection keeps the database
/// alive for the pool's whole lifetime.
pub async fn test_pool() -> SqlitePool {
    init_tracing();
    let options = SqliteConnectOptions::from_str("sqlite::memory:")
        .expect("valid sqlite url")
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await
        .expect("open in-memory database");

    db::init_schema(&pool).await.expect("schema bootstrap");
    pool
}

pub async fn seed_author(pool: &SqlitePool, name: &str) -> Author {
    AuthorService::new(pool.clone())
        .create(NewAuthor {
            name: name.to_string(),
            icon_url: format!("https://cdn.example/{name}.png"),
            bio: None,
        })
        .await
        .expect("create author")
}

pub async fn seed_video(pool: &SqlitePool, author: &Author, title: &str) -> Video {
    VideoService::new(pool.clone())
        .create(NewVideo {
            title: title.to_string(),
            url: "https://videos.example/watch?v=xyz".to_string(),
            start_sec: 5,
            end_sec: 42,
            author_id: author.id,
        })
        .await
        .expect("create video")
}

pub async fn seed_playlist(pool: &SqlitePool, author: &Author, title: &str) -> Playlist {
    PlaylistService::new(pool.clone())
        .create(NewPlaylist {
            title: title.to_string(),
            author_id: author.id,
        })
        .await
        .expect("create playlist")
}

pub async fn seed_tag(pool: &SqlitePool, name: &str) -> Tag {
    TagService::new(pool.clone())
        .create(name)
        .await
        .expect("create tag")
}

pub async fn count_rows(pool: &SqlitePool, table: &str) -> i64 {
    let sql = format!("SELECT COUNT(*) FROM {table}");
    sqlx::query_scalar(&sql)
        .fetch_one(pool)
        .await
        .expect("count rows")
}
