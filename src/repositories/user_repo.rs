//! User repository for async database operations.
//!
//! Users are soft-deleted: every query here only sees rows whose
//! `deleted_at` is NULL.

use async_trait::async_trait;
use diesel::dsl::{Filter, IsNull};
use diesel::pg::Pg;
use diesel::prelude::*;
use diesel_async::{AsyncPgConnection, RunQueryDsl};
use uuid::Uuid;

use super::db_error;
use crate::db::AsyncDbPool;
use crate::error::{AppError, AppResult};
use crate::models::{ListParams, NewUser, Page, UpdateUser, User, UserCredentials};
use crate::schema::users;

#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Inserts a user and returns its generated id.
    async fn create(&self, new_user: NewUser) -> AppResult<Uuid>;

    async fn get_by_id(&self, id: Uuid) -> AppResult<User>;

    /// Searches `username` and `name`.
    async fn get_list(&self, params: &ListParams) -> AppResult<Page<User>>;

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<Uuid>;

    /// Marks the user deleted.
    async fn delete(&self, id: Uuid) -> AppResult<()>;

    async fn get_password_hash(&self, id: Uuid) -> AppResult<String>;

    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()>;

    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> AppResult<Option<UserCredentials>>;
}

type LiveUser =
    Filter<Filter<users::table, diesel::dsl::Eq<users::user_id, Uuid>>, IsNull<users::deleted_at>>;

/// The row for `id`, unless it has been soft-deleted. Target of every
/// single-user read and write.
fn live_user(id: Uuid) -> LiveUser {
    users::table
        .filter(users::user_id.eq(id))
        .filter(users::deleted_at.is_null())
}

/// Ids among `ids` that belong to soft-deleted users.
fn deleted_users(ids: Vec<Uuid>) -> users::BoxedQuery<'static, Pg, diesel::sql_types::Uuid> {
    users::table
        .select(users::user_id)
        .filter(users::user_id.eq_any(ids))
        .filter(users::deleted_at.is_not_null())
        .into_boxed()
}

/// Rejects a write made on behalf of a soft-deleted user with `NotFound`,
/// matching what `GET /user/{id}` answers for that user. Unknown ids are left
/// to the foreign keys.
pub(super) async fn ensure_live_users(
    conn: &mut AsyncPgConnection,
    ids: &[Uuid],
) -> AppResult<()> {
    let deleted = deleted_users(ids.to_vec())
        .first::<Uuid>(conn)
        .await
        .optional()
        .map_err(db_error("check user is live"))?;

    match deleted {
        Some(id) => Err(AppError::not_found("user", "id", id)),
        None => Ok(()),
    }
}

/// Live users matching the search term. Shared by the count and page queries.
fn filtered(params: &ListParams) -> users::BoxedQuery<'static, Pg> {
    let mut query = users::table.filter(users::deleted_at.is_null()).into_boxed();
    if let Some(pattern) = params.search_pattern() {
        query = query.filter(
            users::username
                .ilike(pattern.clone())
                .or(users::name.ilike(pattern)),
        );
    }
    query
}

fn page_query(params: &ListParams) -> users::BoxedQuery<'static, Pg> {
    filtered(params)
        .order((users::created_at.desc(), users::user_id.desc()))
        .limit(params.limit())
        .offset(params.offset())
}

/// User repository holding an async connection pool.
///
/// Since `AsyncDbPool` (bb8::Pool) internally uses `Arc`, cloning is cheap.
#[derive(Clone)]
pub struct PgUserRepository {
    pool: AsyncDbPool,
}

impl PgUserRepository {
    pub fn new(pool: AsyncDbPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn create(&self, new_user: NewUser) -> AppResult<Uuid> {
        let mut conn = self.pool.get().await?;
        let id = Uuid::new_v4();

        diesel::insert_into(users::table)
            .values((users::user_id.eq(id), &new_user))
            .returning(users::user_id)
            .get_result::<Uuid>(&mut conn)
            .await
            .map_err(db_error("insert user"))
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<User> {
        let mut conn = self.pool.get().await?;

        live_user(id)
            .select(User::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(db_error("select user"))?
            .ok_or_else(|| AppError::not_found("user", "id", id))
    }

    async fn get_list(&self, params: &ListParams) -> AppResult<Page<User>> {
        let mut conn = self.pool.get().await?;

        let count = filtered(params)
            .count()
            .get_result::<i64>(&mut conn)
            .await
            .map_err(db_error("count users"))?;

        let items = page_query(params)
            .select(User::as_select())
            .load(&mut conn)
            .await
            .map_err(db_error("list users"))?;

        Ok(Page::new(items, count))
    }

    async fn update(&self, id: Uuid, changes: UpdateUser) -> AppResult<Uuid> {
        let mut conn = self.pool.get().await?;

        diesel::update(live_user(id))
            .set((&changes, users::updated_at.eq(diesel::dsl::now)))
            .returning(users::user_id)
            .get_result::<Uuid>(&mut conn)
            .await
            .optional()
            .map_err(db_error("update user"))?
            .ok_or_else(|| AppError::not_found("user", "id", id))
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let affected = diesel::update(live_user(id))
            .set(users::deleted_at.eq(diesel::dsl::now))
            .execute(&mut conn)
            .await
            .map_err(db_error("soft delete user"))?;

        if affected == 0 {
            return Err(AppError::not_found("user", "id", id));
        }
        Ok(())
    }

    async fn get_password_hash(&self, id: Uuid) -> AppResult<String> {
        let mut conn = self.pool.get().await?;

        live_user(id)
            .select(users::password_hash)
            .first::<String>(&mut conn)
            .await
            .optional()
            .map_err(db_error("select password hash"))?
            .ok_or_else(|| AppError::not_found("user", "id", id))
    }

    async fn update_password(&self, id: Uuid, password_hash: String) -> AppResult<()> {
        let mut conn = self.pool.get().await?;

        let affected = diesel::update(live_user(id))
            .set((
                users::password_hash.eq(password_hash),
                users::updated_at.eq(diesel::dsl::now),
            ))
            .execute(&mut conn)
            .await
            .map_err(db_error("update password"))?;

        if affected == 0 {
            return Err(AppError::not_found("user", "id", id));
        }
        Ok(())
    }

    async fn find_credentials_by_username(
        &self,
        username: &str,
    ) -> AppResult<Option<UserCredentials>> {
        let mut conn = self.pool.get().await?;

        users::table
            .filter(users::username.eq(username))
            .filter(users::deleted_at.is_null())
            .select(UserCredentials::as_select())
            .first(&mut conn)
            .await
            .optional()
            .map_err(db_error("select credentials"))
    }
}
