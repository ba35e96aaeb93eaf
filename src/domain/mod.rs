pub mod models;
pub mod views;

pub use models::{
    Author, Follow, Playlist, PlaylistBookmark, PlaylistVideo, Tag, Video, VideoBookmark,
};
pub use views::{
    AuthorProfile, AuthorWithCounts, AuthorWithPlaylists, AuthorWithVideos,
    AuthorWithVideosAndPlaylists, PlaylistEntry, PlaylistWithVideos, VideoWithDetail,
};
