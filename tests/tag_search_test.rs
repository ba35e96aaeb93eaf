mod common;

use std::collections::HashSet;

use clipshelf::services::videos::VideoService;
use clipshelf::TagSearchService;
use uuid::Uuid;

fn as_set(ids: Vec<Uuid>) -> HashSet<Uuid> {
    ids.into_iter().collect()
}

#[tokio::test]
async fn union_matches_any_tag_and_intersection_matches_all() {
    let pool = common::test_pool().await;
    let author = common::seed_author(&pool, "creator").await;
    let v1 = common::seed_video(&pool, &author, "one").await;
    let v2 = common::seed_video(&pool, &author, "two").await;
    let v3 = common::seed_video(&pool, &author, "three").await;

    let tag_a = common::seed_tag(&pool, "speedrun").await;
    let tag_b = common::seed_tag(&pool, "music").await;

    let videos = VideoService::new(pool.clone());
    videos.add_tag(v1.id, tag_a.id).await.unwrap();
    videos.add_tag(v2.id, tag_a.id).await.unwrap();
    videos.add_tag(v1.id, tag_b.id).await.unwrap();
    videos.add_tag(v3.id, tag_b.id).await.unwrap();

    let search = TagSearchService::new(pool.clone());

    let union = search
        .videos_by_tag_ids(&[tag_a.id, tag_b.id])
        .await
        .unwrap();
    assert_eq!(as_set(union), as_set(vec![v1.id, v2.id, v3.id]));

    let intersection = search
        .videos_by_all_tags(&[tag_a.id, tag_b.id])
        .await
        .unwrap();
    assert_eq!(as_set(intersection), as_set(vec![v1.id]));
}

#[tokio::test]
async fn empty_tag_input_yields_empty_results() {
    let pool = common::test_pool().await;
    let author = common::seed_author(&pool, "creator").await;
    let video = common::seed_video(&pool, &author, "clip").await;
    let tag = common::seed_tag(&pool, "anything").await;
    VideoService::new(pool.clone())
        .add_tag(video.id, tag.id)
        .await
        .unwrap();

    let search = TagSearchService::new(pool.clone());
    assert!(search.videos_by_tag_ids(&[]).await.unwrap().is_empty());
    assert!(search.videos_by_all_tags(&[]).await.unwrap().is_empty());
}

#[tokio::test]
async fn repeated_tag_ids_behave_like_a_single_mention() {
    let pool = common::test_pool().await;
    let author = common::seed_author(&pool, "creator").await;
    let v1 = common::seed_video(&pool, &author, "one").await;
    let v2 = common::seed_video(&pool, &author, "two").await;
    let tag = common::seed_tag(&pool, "speedrun").await;

    let videos = VideoService::new(pool.clone());
    videos.add_tag(v1.id, tag.id).await.unwrap();
    videos.add_tag(v2.id, tag.id).await.unwrap();

    let search = TagSearchService::new(pool.clone());

    // intersecting a tag with itself must not shrink the result
    let intersection = search
        .videos_by_all_tags(&[tag.id, tag.id, tag.id])
        .await
        .unwrap();
    assert_eq!(as_set(intersection), as_set(vec![v1.id, v2.id]));

    let union = search.videos_by_tag_ids(&[tag.id, tag.id]).await.unwrap();
    assert_eq!(as_set(union), as_set(vec![v1.id, v2.id]));
}

#[tokio::test]
async fn disjoint_tags_intersect_to_empty_without_error() {
    let pool = common::test_pool().await;
    let author = common::seed_author(&pool, "creator").await;
    let v1 = common::seed_video(&pool, &author, "one").await;
    let v2 = common::seed_video(&pool, &author, "two").await;

    let tag_a = common::seed_tag(&pool, "speedrun").await;
    let tag_b = common::seed_tag(&pool, "music").await;

    let videos = VideoService::new(pool.clone());
    videos.add_tag(v1.id, tag_a.id).await.unwrap();
    videos.add_tag(v2.id, tag_b.id).await.unwrap();

    let search = TagSearchService::new(pool.clone());
    let intersection = search
        .videos_by_all_tags(&[tag_a.id, tag_b.id])
        .await
        .unwrap();
    assert!(intersection.is_empty());

    // an unknown tag id just contributes an empty set
    let union = search
        .videos_by_tag_ids(&[tag_a.id, Uuid::new_v4()])
        .await
        .unwrap();
    assert_eq!(as_set(union), as_set(vec![v1.id]));
}
