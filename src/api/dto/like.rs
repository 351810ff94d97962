//! Like DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{Like, NewLike, Page};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateLikeRequest {
    pub tweet_id: Uuid,
    pub user_id: Uuid,
}

impl From<CreateLikeRequest> for NewLike {
    fn from(request: CreateLikeRequest) -> Self {
        NewLike {
            tweet_id: request.tweet_id,
            user_id: request.user_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LikeResponse {
    pub like_id: Uuid,
    pub tweet_id: Uuid,
    pub user_id: Uuid,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
}

impl From<Like> for LikeResponse {
    fn from(like: Like) -> Self {
        Self {
            like_id: like.like_id,
            tweet_id: like.tweet_id,
            user_id: like.user_id,
            created_at: like.created_at.to_jiff(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LikesResponse {
    pub likes: Vec<LikeResponse>,
    pub count: i64,
}

impl From<Page<Like>> for LikesResponse {
    fn from(page: Page<Like>) -> Self {
        Self {
            likes: page.items.into_iter().map(LikeResponse::from).collect(),
            count: page.count,
        }
    }
}
