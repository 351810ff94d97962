//! Retweet DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{NewRetweet, Page, Retweet};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateRetweetRequest {
    pub original_tweet_id: Uuid,
    pub user_id: Uuid,
}

impl From<CreateRetweetRequest> for NewRetweet {
    fn from(request: CreateRetweetRequest) -> Self {
        NewRetweet {
            original_tweet_id: request.original_tweet_id,
            user_id: request.user_id,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RetweetResponse {
    pub retweet_id: Uuid,
    pub original_tweet_id: Uuid,
    pub user_id: Uuid,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
}

impl From<Retweet> for RetweetResponse {
    fn from(retweet: Retweet) -> Self {
        Self {
            retweet_id: retweet.retweet_id,
            original_tweet_id: retweet.original_tweet_id,
            user_id: retweet.user_id,
            created_at: retweet.created_at.to_jiff(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RetweetsResponse {
    pub retweets: Vec<RetweetResponse>,
    pub count: i64,
}

impl From<Page<Retweet>> for RetweetsResponse {
    fn from(page: Page<Retweet>) -> Self {
        Self {
            retweets: page.items.into_iter().map(RetweetResponse::from).collect(),
            count: page.count,
        }
    }
}
