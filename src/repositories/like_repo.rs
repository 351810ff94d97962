//! Like repository for async database operations.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::db_error;
use super::user_repo::ensure_live_users;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Like, ListParams, NewLike, Page};
use crate::schema::likes;

#[async_trait]
pub trait LikeRepository: Send + Sync {
    /// Fails with `Duplicate` when the user already liked the tweet.
    async fn create(&self, new_like: NewLike) -> AppResult<Uuid>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Like>;

    /// Filters by `tweet_id` and/or `user_id`.
    async fn get_list(&self, params: &ListParams) -> AppResult<Page<Like>>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

pub(crate) fn duplicate_like(new_like: &NewLike) -> AppError {
    AppError::duplicate(
        "likes",
        "tweet_id, user_id",
        format!("{}, {}", new_like.tweet_id, new_like.user_id),
    )
}

fn filtered(params: &ListParams) -> likes::BoxedQuery<'static, Pg> {
    let mut query = likes::table.into_boxed();
    if let Some(tweet_id) = params.tweet_id {
        query = query.filter(likes::tweet_id.eq(tweet_id));
    }
    if let Some(user_id) = params.user_id {
        query = query.filter(likes::user_id.eq(user_id));
    }
    query
}

fn page_query(params: &ListParams) -> likes::BoxedQuery<'static, Pg> {
    filtered(params)
        .order((likes::created_at.desc(), likes::like_id.desc()))
        .limit(params.limit())
        .offset(params.offset())
}

#[derive(Clone)]
pub struct PgLikeRepository {
    pool: AsyncDbPool,
}

impl PgLikeRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LikeRepository for PgLikeRepository {
    async fn create(&self, new_like: NewLike) -> AppResult<Uuid> {
        let mut conn = self.pool.get().await?;
        ensure_live_users(&mut conn, &[new_like.user_id]).await?;

        // The unique index still decides races between concurrent likes.
        let exists = diesel::select(diesel::dsl::exists(
            likes::table
                .filter(likes::tweet_id.eq(new_like.tweet_id))
                .filter(likes::user_id.eq(new_like.user_id)),
        ))
        .get_result::<bool>(&mut conn)
        .await
        .map_err(db_error("check like"))?;

        if exists {
            return Err(duplicate_like(&new_like));
        }

        diesel::insert_into(likes::table)
            .values((likes::like_id.eq(Uuid::new_v4()), &new_like))
            .returning(likes::like_id)
            .get_result::<Uuid>(&mut conn)
            .await
            .map_err(db_error("insert like"))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Like> {
        let mut conn = self.pool.get().await?;

        likes::table
            .find(id)
            .select(Like::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(db_error("select like"))?
            .ok_or_else(|| AppError::not_found("like", "id", id))
    }

    async fn get_list(&self, params: &ListParams) -> AppResult<Page<Like>> {
        let mut conn = self.pool.get().await?;

        let count = filtered(params)
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(db_error("count likes"))?;

        let items = page_query(params)
            .select(Like::as_select())
            .load(&mut conn)
            .await
            .map_err(db_error("list likes"))?;

        Ok(Page::new(items, count))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(likes::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(db_error("delete like"))?;

        if affected == 0 {
            return Err(AppError::not_found("like", "id", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_tweet() {
        let tweet = Uuid::new_v4();
        let params = ListParams::default().with_tweet_id(tweet);
        let sql = diesel::debug_query::<Pg, _>(&page_query(&params)).to_string();
        assert!(sql.contains(r#""likes"."tweet_id" = $1"#));
        assert!(!sql.contains(r#""likes"."user_id" = "#));
        assert!(sql.contains(&tweet.to_string()));
    }

    #[test]
    fn test_search_is_ignored_for_likes() {
        let params = ListParams::default().with_search("anything");
        let sql = diesel::debug_query::<Pg, _>(&filtered(&params)).to_string();
        assert!(!sql.contains("ILIKE"));
    }

    #[test]
    fn test_duplicate_like_error_names_pair() {
        let like = NewLike {
            tweet_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
        };
        match duplicate_like(&like) {
            AppError::Duplicate { entity, field, value } => {
                assert_eq!(entity, "likes");
                assert_eq!(field, "tweet_id, user_id");
                assert_eq!(value, format!("{}, {}", like.tweet_id, like.user_id));
            }
            other => panic!("Expected Duplicate error, got {other:?}"),
        }
    }
}
