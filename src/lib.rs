/// Clipshelf service layer
///
/// Composes the catalogue's entities (authors, videos, playlists, tags,
/// follow edges, bookmarks) into consistent aggregate views over a relational
/// store. This crate is a library boundary only: request routing, payload
/// validation and identity live above it, the SQL store below it.
///
/// # Modules
///
/// - `config`: environment-driven configuration
/// - `db`: pool construction and schema bootstrap
/// - `domain`: row entities and composed aggregate views
/// - `services`: business logic, layered base -> relations -> aggregates
/// - `error`: error types and storage error translation
pub mod config;
pub mod db;
pub mod domain;
pub mod error;
pub mod services;

pub use config::Config;
pub use error::{ServiceError, ServiceResult};
pub use services::{
    AggregateService, AuthorService, FollowService, PlaylistBookmarkService, PlaylistService,
    RelationsService, TagSearchService, TagService, VideoBookmarkService, VideoService,
};
