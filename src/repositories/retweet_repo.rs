//! Retweet repository for async database operations.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::db_error;
use super::user_repo::ensure_live_users;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{ListParams, NewRetweet, Page, Retweet};
use crate::schema::retweets;

#[async_trait]
pub trait RetweetRepository: Send + Sync {
    async fn create(&self, new_retweet: NewRetweet) -> AppResult<Uuid>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Retweet>;

    /// Filters by `user_id` and/or the original tweet (`tweet_id`).
    async fn get_list(&self, params: &ListParams) -> AppResult<Page<Retweet>>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

fn filtered(params: &ListParams) -> retweets::BoxedQuery<'static, Pg> {
    let mut query = retweets::table.into_boxed();
    if let Some(user_id) = params.user_id {
        query = query.filter(retweets::user_id.eq(user_id));
    }
    if let Some(tweet_id) = params.tweet_id {
        query = query.filter(retweets::original_tweet_id.eq(tweet_id));
    }
    query
}

fn page_query(params: &ListParams) -> retweets::BoxedQuery<'static, Pg> {
    filtered(params)
        .order((retweets::created_at.desc(), retweets::retweet_id.desc()))
        .limit(params.limit())
        .offset(params.offset())
}

#[derive(Clone)]
pub struct PgRetweetRepository {
    pool: AsyncDbPool,
}

impl PgRetweetRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RetweetRepository for PgRetweetRepository {
    async fn create(&self, new_retweet: NewRetweet) -> AppResult<Uuid> {
        let mut conn = self.pool.get().await?;
        ensure_live_users(&mut conn, &[new_retweet.user_id]).await?;

        diesel::insert_into(retweets::table)
            .values((retweets::retweet_id.eq(Uuid::new_v4()), &new_retweet))
            .returning(retweets::retweet_id)
            .get_result::<Uuid>(&mut conn)
            .await
            .map_err(db_error("insert retweet"))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Retweet> {
        let mut conn = self.pool.get().await?;

        retweets::table
            .find(id)
            .select(Retweet::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(db_error("select retweet"))?
            .ok_or_else(|| AppError::not_found("retweet", "id", id))
    }

    async fn get_list(&self, params: &ListParams) -> AppResult<Page<Retweet>> {
        let mut conn = self.pool.get().await?;

        let count = filtered(params)
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(db_error("count retweets"))?;

        let items = page_query(params)
            .select(Retweet::as_select())
            .load(&mut conn)
            .await
            .map_err(db_error("list retweets"))?;

        Ok(Page::new(items, count))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(retweets::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(db_error("delete retweet"))?;

        if affected == 0 {
            return Err(AppError::not_found("retweet", "id", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_by_original_tweet() {
        let tweet = Uuid::new_v4();
        let params = ListParams::default().with_tweet_id(tweet);
        let sql = diesel::debug_query::<Pg, _>(&filtered(&params)).to_string();
        assert!(sql.contains(r#""retweets"."original_tweet_id" = $1"#));
    }
}
