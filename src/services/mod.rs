//! Service layer between handlers and repositories.
//!
//! Services log every call with its input, re-read rows after writes so
//! callers always get the persisted state, and own the few business rules
//! (password hashing, old-password checks).

mod follower_service;
mod like_service;
mod retweet_service;
mod tweet_service;
mod user_service;

pub use follower_service::FollowerService;
pub use like_service::LikeService;
pub use retweet_service::RetweetService;
pub use tweet_service::TweetService;
pub use user_service::UserService;

use crate::error::AppError;
use crate::repositories::Repositories;

/// Aggregates all services; this is what handlers reach through `AppState`.
///
/// Cloning only bumps reference counts.
#[derive(Clone)]
pub struct Services {
    pub users: UserService,
    pub tweets: TweetService,
    pub likes: LikeService,
    pub followers: FollowerService,
    pub retweets: RetweetService,
}

impl Services {
    pub fn new(repos: Repositories) -> Self {
        Self {
            users: UserService::new(repos.users),
            tweets: TweetService::new(repos.tweets),
            likes: LikeService::new(repos.likes),
            followers: FollowerService::new(repos.followers),
            retweets: RetweetService::new(repos.retweets),
        }
    }
}

/// Logs a failed service call. Missing rows are expected traffic and only
/// reach the debug level.
fn log_failure(operation: &'static str) -> impl Fn(&AppError) {
    move |error| {
        if error.is_not_found() {
            tracing::debug!(operation, error = %error, "Service call found no row");
        } else {
            tracing::error!(operation, error = %error.detail(), "Service call failed");
        }
    }
}
