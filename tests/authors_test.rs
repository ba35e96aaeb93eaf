mod common;

use clipshelf::services::authors::{AuthorService, AuthorUpdate, NewAuthor};
use clipshelf::services::videos::{NewVideo, VideoService, VideoUpdate};
use clipshelf::{RelationsService, ServiceError};
use uuid::Uuid;

#[tokio::test]
async fn creating_a_video_for_a_missing_author_leaves_no_row() {
    let pool = common::test_pool().await;
    let videos = VideoService::new(pool.clone());

    let err = videos
        .create(NewVideo {
            title: "orphan".to_string(),
            url: "https://videos.example/watch?v=xyz".to_string(),
            start_sec: 0,
            end_sec: 10,
            author_id: Uuid::new_v4(),
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::NotFound(_)));
    assert_eq!(common::count_rows(&pool, "videos").await, 0);
}

#[tokio::test]
async fn update_preserves_unspecified_fields() {
    let pool = common::test_pool().await;
    let authors = AuthorService::new(pool.clone());
    let author = authors
        .create(NewAuthor {
            name: "ren".to_string(),
            icon_url: "https://cdn.example/ren.png".to_string(),
            bio: Some("clips all day".to_string()),
        })
        .await
        .unwrap();

    authors
        .update(
            author.id,
            AuthorUpdate {
                name: Some("ren2".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let updated = authors.get_by_id(author.id).await.unwrap();
    assert_eq!(updated.name, "ren2");
    assert_eq!(updated.icon_url, author.icon_url);
    assert_eq!(updated.bio.as_deref(), Some("clips all day"));
    assert_eq!(updated.created_at, author.created_at);
    assert!(updated.updated_at >= author.updated_at);
}

#[tokio::test]
async fn video_update_checks_the_new_author_and_clip_range() {
    let pool = common::test_pool().await;
    let author = common::seed_author(&pool, "creator").await;
    let video = common::seed_video(&pool, &author, "clip").await;
    let videos = VideoService::new(pool.clone());

    let err = videos
        .update(
            video.id,
            VideoUpdate {
                author_id: Some(Uuid::new_v4()),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::NotFound(_)));

    // merged range is validated: end moved below the stored start
    let err = videos
        .update(
            video.id,
            VideoUpdate {
                end_sec: Some(video.start_sec),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ServiceError::InvalidOperation(_)));

    let unchanged = videos.get_by_id(video.id).await.unwrap();
    assert_eq!(unchanged.end_sec, video.end_sec);
    assert_eq!(unchanged.author_id, author.id);
}

#[tokio::test]
async fn inverted_clip_range_is_rejected() {
    let pool = common::test_pool().await;
    let author = common::seed_author(&pool, "creator").await;
    let videos = VideoService::new(pool.clone());

    let err = videos
        .create(NewVideo {
            title: "backwards".to_string(),
            url: "https://videos.example/watch?v=xyz".to_string(),
            start_sec: 30,
            end_sec: 10,
            author_id: author.id,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ServiceError::InvalidOperation(_)));
    assert_eq!(common::count_rows(&pool, "videos").await, 0);
}

#[tokio::test]
async fn missing_rows_surface_as_not_found() {
    let pool = common::test_pool().await;
    let authors = AuthorService::new(pool.clone());

    let id = Uuid::new_v4();
    assert!(matches!(
        authors.get_by_id(id).await.unwrap_err(),
        ServiceError::NotFound(_)
    ));
    assert!(matches!(
        authors.update(id, AuthorUpdate::default()).await.unwrap_err(),
        ServiceError::NotFound(_)
    ));
    assert!(matches!(
        authors.delete(id).await.unwrap_err(),
        ServiceError::NotFound(_)
    ));
}

#[tokio::test]
async fn deleting_an_author_orphans_their_videos() {
    let pool = common::test_pool().await;
    let author = common::seed_author(&pool, "creator").await;
    let video = common::seed_video(&pool, &author, "clip").await;

    AuthorService::new(pool.clone())
        .delete(author.id)
        .await
        .unwrap();

    // the video row stays; its author reference now resolves to nothing
    let orphan = VideoService::new(pool.clone())
        .get_by_id(video.id)
        .await
        .unwrap();
    assert_eq!(orphan.author_id, author.id);

    let detail = RelationsService::new(pool.clone())
        .video_with_tags(video.id)
        .await
        .unwrap();
    assert!(detail.author.is_none());
}

#[tokio::test]
async fn list_returns_every_author() {
    let pool = common::test_pool().await;
    common::seed_author(&pool, "a").await;
    common::seed_author(&pool, "b").await;
    common::seed_author(&pool, "c").await;

    let listed = AuthorService::new(pool.clone()).list().await.unwrap();
    assert_eq!(listed.len(), 3);
}
