/// Aggregate views composed by the relations and aggregate services.
///
/// These are read-side payloads handed to the routing layer; they are never
/// stored. An `Option<Author>` inside a view reflects the unenforced
/// author reference on videos and playlists: a deleted author shows up as
/// `None`, not as an error.
use serde::{Deserialize, Serialize};

use crate::domain::models::{Author, Playlist, Tag, Video};

/// A video enriched with its author and tag set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoWithDetail {
    #[serde(flatten)]
    pub video: Video,
    pub author: Option<Author>,
    pub tags: Vec<Tag>,
}

/// One slot of a playlist: the junction's position plus the enriched video
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistEntry {
    pub position: i64,
    pub video: VideoWithDetail,
}

/// A playlist with its author and its entries, ascending by position
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistWithVideos {
    #[serde(flatten)]
    pub playlist: Playlist,
    pub author: Option<Author>,
    pub entries: Vec<PlaylistEntry>,
}

/// Author plus their enriched videos
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorWithVideos {
    #[serde(flatten)]
    pub author: Author,
    pub videos: Vec<VideoWithDetail>,
}

/// Author plus their playlists, each with ordered entries
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorWithPlaylists {
    #[serde(flatten)]
    pub author: Author,
    pub playlists: Vec<PlaylistWithVideos>,
}

/// Author plus both videos and playlists
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorWithVideosAndPlaylists {
    #[serde(flatten)]
    pub author: Author,
    pub videos: Vec<VideoWithDetail>,
    pub playlists: Vec<PlaylistWithVideos>,
}

/// Author plus derived counters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorWithCounts {
    #[serde(flatten)]
    pub author: Author,
    pub follower_count: i64,
    pub video_count: i64,
    pub playlist_count: i64,
}

/// Full author payload: own content plus bookmarked content
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthorProfile {
    #[serde(flatten)]
    pub author: Author,
    pub videos: Vec<VideoWithDetail>,
    pub playlists: Vec<PlaylistWithVideos>,
    pub bookmarked_videos: Vec<Video>,
    pub bookmarked_playlists: Vec<Playlist>,
}
