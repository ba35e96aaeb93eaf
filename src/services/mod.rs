pub mod aggregates;
pub mod authors;
pub mod bookmarks;
pub mod follows;
pub mod playlists;
pub mod relations;
pub mod search;
pub mod tags;
pub mod videos;

pub use aggregates::AggregateService;
pub use authors::AuthorService;
pub use bookmarks::{PlaylistBookmarkService, VideoBookmarkService};
pub use follows::FollowService;
pub use playlists::PlaylistService;
pub use relations::RelationsService;
pub use search::TagSearchService;
pub use tags::TagService;
pub use videos::VideoService;
