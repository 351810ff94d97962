use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

use crate::error::{AppError, AppResult};

/// `follower_user_id` follows `user_id`.
#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::followers)]
pub struct Follower {
    pub follower_id: Uuid,
    pub user_id: Uuid,
    pub follower_user_id: Uuid,
    pub created_at: Timestamp,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::followers)]
pub struct NewFollower {
    pub user_id: Uuid,
    pub follower_user_id: Uuid,
}

/// Rejects a follow edge pointing back at its own user.
pub fn ensure_not_self_follow(follow: &NewFollower) -> AppResult<()> {
    if follow.user_id == follow.follower_user_id {
        return Err(AppError::validation(
            "follower_user_id",
            "a user cannot follow themselves",
        ));
    }
    Ok(())
}
