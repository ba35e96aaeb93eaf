/// Tag-based video lookup: union and intersection over the video_tags
/// junction. Empty tag input means an empty result for both operations,
/// never "no filter"; callers wanting unfiltered listings use
/// `VideoService::list`.
use std::collections::HashSet;

use sqlx::{QueryBuilder, Sqlite, SqlitePool};
use uuid::Uuid;

use crate::error::ServiceResult;

#[derive(Clone)]
pub struct TagSearchService {
    pool: SqlitePool,
}

impl TagSearchService {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Distinct ids of videos carrying *any* of the given tags
    pub async fn videos_by_tag_ids(&self, tag_ids: &[Uuid]) -> ServiceResult<Vec<Uuid>> {
        let tag_ids = dedupe(tag_ids);
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query: QueryBuilder<Sqlite> =
            QueryBuilder::new("SELECT DISTINCT video_id FROM video_tags WHERE tag_id IN (");
        let mut in_list = query.separated(", ");
        for tag_id in &tag_ids {
            in_list.push_bind(*tag_id);
        }
        in_list.push_unseparated(")");

        let video_ids = query
            .build_query_scalar::<Uuid>()
            .fetch_all(&self.pool)
            .await?;

        Ok(video_ids)
    }

    /// Ids of videos carrying *all* of the given tags: each tag's video set
    /// is loaded and folded with set intersection. No common video is an
    /// empty result, not an error.
    pub async fn videos_by_all_tags(&self, tag_ids: &[Uuid]) -> ServiceResult<Vec<Uuid>> {
        let tag_ids = dedupe(tag_ids);
        if tag_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut common: Option<HashSet<Uuid>> = None;
        for tag_id in &tag_ids {
            let ids: Vec<Uuid> =
                sqlx::query_scalar("SELECT video_id FROM video_tags WHERE tag_id = $1")
                    .bind(*tag_id)
                    .fetch_all(&self.pool)
                    .await?;
            let set: HashSet<Uuid> = ids.into_iter().collect();

            common = Some(match common {
                None => set,
                Some(acc) => acc.intersection(&set).copied().collect(),
            });

            if common.as_ref().is_some_and(|s| s.is_empty()) {
                break;
            }
        }

        Ok(common.map(|s| s.into_iter().collect()).unwrap_or_default())
    }
}

/// Drop repeated tag ids, keeping first-seen order
fn dedupe(ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dedupe_keeps_first_seen_order() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(dedupe(&[a, b, a, b, a]), vec![a, b]);
        assert!(dedupe(&[]).is_empty());
    }
}
