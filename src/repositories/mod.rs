//! Repository layer for data access operations.
//!
//! One trait per table with a PostgreSQL implementation. Handlers never see
//! these directly; services receive them through [`Repositories`].

mod follower_repo;
mod like_repo;
#[cfg(test)]
mod memory;
mod retweet_repo;
mod tweet_repo;
mod user_repo;

use std::sync::Arc;

pub use follower_repo::{FollowerRepository, PgFollowerRepository};
pub use like_repo::{LikeRepository, PgLikeRepository};
pub use retweet_repo::{PgRetweetRepository, RetweetRepository};
pub use tweet_repo::{PgTweetRepository, TweetRepository};
pub use user_repo::{PgUserRepository, UserRepository};

use crate::db::AsyncDbPool;
use crate::error::AppError;

/// Aggregates all repositories for convenient access.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Repositories {
    pub users: Arc<dyn UserRepository>,
    pub tweets: Arc<dyn TweetRepository>,
    pub likes: Arc<dyn LikeRepository>,
    pub followers: Arc<dyn FollowerRepository>,
    pub retweets: Arc<dyn RetweetRepository>,
}

impl Repositories {
    /// Creates the PostgreSQL repositories sharing one connection pool.
    pub fn new(pool: AsyncDbPool) -> Self {
        Self {
            users: Arc::new(PgUserRepository::new(pool.clone())),
            tweets: Arc::new(PgTweetRepository::new(pool.clone())),
            likes: Arc::new(PgLikeRepository::new(pool.clone())),
            followers: Arc::new(PgFollowerRepository::new(pool.clone())),
            retweets: Arc::new(PgRetweetRepository::new(pool)),
        }
    }
}

/// Converts a diesel error for `operation`, logging anything but a missing row.
fn db_error(operation: &'static str) -> impl FnOnce(diesel::result::Error) -> AppError {
    move |error| {
        let error = AppError::database(operation, error);
        if !error.is_not_found() {
            tracing::error!(operation, error = %error.detail(), "Repository operation failed");
        }
        error
    }
}
