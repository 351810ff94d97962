//! Tweet repository for async database operations.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::db_error;
use super::user_repo::ensure_live_users;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{ListParams, NewTweet, Page, Tweet, UpdateTweet};
use crate::schema::tweets;

#[async_trait]
pub trait TweetRepository: Send + Sync {
    async fn create(&self, new_tweet: NewTweet) -> AppResult<Uuid>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Tweet>;

    /// Searches `content`, optionally restricted to one author.
    async fn get_list(&self, params: &ListParams) -> AppResult<Page<Tweet>>;

    async fn update(&self, id: Uuid, changes: UpdateTweet) -> AppResult<Uuid>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

fn filtered(params: &ListParams) -> tweets::BoxedQuery<'static, Pg> {
    let mut query = tweets::table.into_boxed();
    if let Some(pattern) = params.search_pattern() {
        query = query.filter(tweets::content.ilike(pattern));
    }
    if let Some(user_id) = params.user_id {
        query = query.filter(tweets::user_id.eq(user_id));
    }
    query
}

fn page_query(params: &ListParams) -> tweets::BoxedQuery<'static, Pg> {
    filtered(params)
        .order((tweets::created_at.desc(), tweets::tweet_id.desc()))
        .limit(params.limit())
        .offset(params.offset())
}

#[derive(Clone)]
pub struct PgTweetRepository {
    pool: AsyncDbPool,
}

impl PgTweetRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TweetRepository for PgTweetRepository {
    async fn create(&self, new_tweet: NewTweet) -> AppResult<Uuid> {
        let mut conn = self.pool.get().await?;
        ensure_live_users(&mut conn, &[new_tweet.user_id]).await?;

        diesel::insert_into(tweets::table)
            .values((tweets::tweet_id.eq(Uuid::new_v4()), &new_tweet))
            .returning(tweets::tweet_id)
            .get_result::<Uuid>(&mut conn)
            .await
            .map_err(db_error("insert tweet"))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Tweet> {
        let mut conn = self.pool.get().await?;

        tweets::table
            .find(id)
            .select(Tweet::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(db_error("select tweet"))?
            .ok_or_else(|| AppError::not_found("tweet", "id", id))
    }

    async fn get_list(&self, params: &ListParams) -> AppResult<Page<Tweet>> {
        let mut conn = self.pool.get().await?;

        let count = filtered(params)
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(db_error("count tweets"))?;

        let items = page_query(params)
            .select(Tweet::as_select())
            .load(&mut conn)
            .await
            .map_err(db_error("list tweets"))?;

        Ok(Page::new(items, count))
    }

    async fn update(&self, id: Uuid, changes: UpdateTweet) -> AppResult<Uuid> {
        let mut conn = self.pool.get().await?;

        diesel::update(tweets::table.find(id))
            .set((&changes, tweets::updated_at.eq(diesel::dsl::now)))
            .returning(tweets::tweet_id)
            .get_result::<Uuid>(&mut conn)
            .await
            .optional()
            .map_err(db_error("update tweet"))?
            .ok_or_else(|| AppError::not_found("tweet", "id", id))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(tweets::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(db_error("delete tweet"))?;

        if affected == 0 {
            return Err(AppError::not_found("tweet", "id", id));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unfiltered_list_has_no_where_clause() {
        let sql = diesel::debug_query::<Pg, _>(&filtered(&ListParams::default())).to_string();
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_count_and_page_share_filters() {
        let author = Uuid::new_v4();
        let params = ListParams::new(1, 10).with_search("rust").with_user_id(author);

        let count = filtered(&params).count();
        let count_sql = diesel::debug_query::<Pg, _>(&count).to_string();
        let page_sql = diesel::debug_query::<Pg, _>(&page_query(&params)).to_string();

        for sql in [&count_sql, &page_sql] {
            assert!(sql.contains(r#""tweets"."content" ILIKE $1"#));
            assert!(sql.contains(r#""tweets"."user_id" = $2"#));
            assert!(sql.contains("%rust%"));
            assert!(sql.contains(&author.to_string()));
        }
        assert!(count_sql.contains("COUNT(*)"));
        assert!(page_sql.contains(r#"ORDER BY "tweets"."created_at" DESC"#));
        assert!(page_sql.contains("LIMIT $3 OFFSET $4"));
    }
}
