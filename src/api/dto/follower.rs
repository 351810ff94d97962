//! Follower DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Follower, NewFollower, Page};

/// `follower_user_id` follows `user_id`.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateFollowerRequest {
    pub user_id: Uuid,
    pub follower_user_id: Uuid,
}

impl From<CreateFollowerRequest> for NewFollower {
    fn from(request: CreateFollowerRequest) -> Self {
        NewFollower {
            user_id: request.user_id,
            follower_user_id: request.follower_user_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FollowerResponse {
    pub follower_id: Uuid,
    pub user_id: Uuid,
    pub follower_user_id: Uuid,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
}

impl From<Follower> for FollowerResponse {
    fn from(follower: Follower) -> Self {
        Self {
            follower_id: follower.follower_id,
            user_id: follower.user_id,
            follower_user_id: follower.follower_user_id,
            created_at: follower.created_at.to_jiff(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FollowersResponse {
    pub followers: Vec<FollowerResponse>,
    pub count: i64,
}

impl From<Page<Follower>> for FollowersResponse {
    fn from(page: Page<Follower>) -> Self {
        Self {
            followers: page.items.into_iter().map(FollowerResponse::from).collect(),
            count: page.count,
        }
    }
}
