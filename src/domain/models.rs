use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Author entity - the root identity that owns videos and playlists
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Author {
    pub id: Uuid,
    pub name: String,
    pub icon_url: String,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Video entity - a clipped segment [start_sec, end_sec) of an external video
///
/// `author_id` references an author but the store does not enforce it;
/// the service validates it on create/update.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Video {
    pub id: Uuid,
    pub title: String,
    pub url: String,
    pub start_sec: i64,
    pub end_sec: i64,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Playlist entity - an ordered collection of videos
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Playlist {
    pub id: Uuid,
    pub title: String,
    pub author_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Tag entity - name is unique at the storage level
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Tag {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// PlaylistVideo junction row - one per (playlist, video)
///
/// `position` is a caller-supplied integer, never compacted; reads order
/// ascending by it and leave ties in storage iteration order.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlaylistVideo {
    pub id: Uuid,
    pub playlist_id: Uuid,
    pub video_id: Uuid,
    pub position: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Follow edge - composite key (follower_id, following_id)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Follow {
    pub follower_id: Uuid,
    pub following_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Video bookmark - unique per (author_id, video_id)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct VideoBookmark {
    pub id: Uuid,
    pub author_id: Uuid,
    pub video_id: Uuid,
    pub created_at: DateTime<Utc>,
}

/// Playlist bookmark - unique per (author_id, playlist_id)
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct PlaylistBookmark {
    pub id: Uuid,
    pub author_id: Uuid,
    pub playlist_id: Uuid,
    pub created_at: DateTime<Utc>,
}
