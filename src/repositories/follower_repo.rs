//! Follower repository for async database operations.

use async_trait::async_trait;
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use super::db_error;
use super::user_repo::ensure_live_users;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{Follower, ListParams, NewFollower, Page, ensure_not_self_follow};
use crate::schema::followers;

#[async_trait]
pub trait FollowerRepository: Send + Sync {
    /// Fails with `Validation` for a self-follow and `Duplicate` for an existing edge.
    async fn create(&self, new_follower: NewFollower) -> AppResult<Uuid>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<Follower>;

    /// Filters by the followed `user_id`.
    async fn get_list(&self, params: &ListParams) -> AppResult<Page<Follower>>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

fn filtered(params: &ListParams) -> followers::BoxedQuery<'static, Pg> {
    let mut query = followers::table.into_boxed();
    if let Some(user_id) = params.user_id {
        query = query.filter(followers::user_id.eq(user_id));
    }
    query
}

fn page_query(params: &ListParams) -> followers::BoxedQuery<'static, Pg> {
    filtered(params)
        .order((followers::created_at.desc(), followers::follower_id.desc()))
        .limit(params.limit())
        .offset(params.offset())
}

#[derive(Clone)]
pub struct PgFollowerRepository {
    pool: AsyncDbPool,
}

impl PgFollowerRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FollowerRepository for PgFollowerRepository {
    async fn create(&self, new_follower: NewFollower) -> AppResult<Uuid> {
        ensure_not_self_follow(&new_follower)?;
        let mut conn = self.pool.get().await?;
        ensure_live_users(
            &mut conn,
            &[new_follower.user_id, new_follower.follower_user_id],
        )
        .await?;

        diesel::insert_into(followers::table)
            .values((followers::follower_id.eq(Uuid::new_v4()), &new_follower))
            .returning(followers::follower_id)
            .get_result::<Uuid>(&mut conn)
            .await
            .map_err(db_error("insert follower"))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Follower> {
        let mut conn = self.pool.get().await?;

        followers::table
            .find(id)
            .select(Follower::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(db_error("select follower"))?
            .ok_or_else(|| AppError::not_found("follower", "id", id))
    }

    async fn get_list(&self, params: &ListParams) -> AppResult<Page<Follower>> {
        let mut conn = self.pool.get().await?;

        let count = filtered(params)
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(db_error("count followers"))?;

        let items = page_query(params)
            .select(Follower::as_select())
            .load(&mut conn)
            .await
            .map_err(db_error("list followers"))?;

        Ok(Page::new(items, count))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let affected = diesel::delete(followers::table.find(id))
            .execute(&mut conn)
            .await
            .map_err(db_error("delete follower"))?;

        if affected == 0 {
            return Err(AppError::not_found("follower", "id", id));
        }
        Ok(())
    }
}
