//! Tweet DTOs.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{NewTweet, Page, Tweet, UpdateTweet};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateTweetRequest {
    pub user_id: Uuid,

    #[validate(length(min = 1, max = 280, message = "content must be between 1 and 280 characters"))]
    #[schema(example = "hello", min_length = 1, max_length = 280)]
    pub content: String,

    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: Option<String>,

    #[validate(url(message = "video_url must be a valid URL"))]
    pub video_url: Option<String>,
}

impl CreateTweetRequest {
    pub fn into_new_tweet(self) -> NewTweet {
        NewTweet {
            user_id: self.user_id,
            content: self.content,
            image_url: self.image_url,
            video_url: self.video_url,
        }
    }
}

/// Omitted fields keep their stored value.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateTweetRequest {
    #[validate(length(min = 1, max = 280, message = "content must be between 1 and 280 characters"))]
    pub content: Option<String>,

    #[validate(url(message = "image_url must be a valid URL"))]
    pub image_url: Option<String>,

    #[validate(url(message = "video_url must be a valid URL"))]
    pub video_url: Option<String>,
}

impl UpdateTweetRequest {
    pub fn into_update_tweet(self) -> UpdateTweet {
        UpdateTweet {
            content: self.content,
            image_url: self.image_url,
            video_url: self.video_url,
        }
    }
}

/// Media URLs are serialised as `null` when absent.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TweetResponse {
    pub id: Uuid,
    pub user_id: Uuid,
    pub content: String,
    pub image_url: Option<String>,
    pub video_url: Option<String>,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<Tweet> for TweetResponse {
    fn from(tweet: Tweet) -> Self {
        Self {
            id: tweet.id,
            user_id: tweet.user_id,
            content: tweet.content,
            image_url: tweet.image_url,
            video_url: tweet.video_url,
            created_at: tweet.created_at.to_jiff(),
            updated_at: tweet.updated_at.to_jiff(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TweetsResponse {
    pub tweets: Vec<TweetResponse>,
    pub count: i64,
}

impl From<Page<Tweet>> for TweetsResponse {
    fn from(page: Page<Tweet>) -> Self {
        Self {
            tweets: page.items.into_iter().map(TweetResponse::from).collect(),
            count: page.count,
        }
    }
}
