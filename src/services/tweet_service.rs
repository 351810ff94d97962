//! Tweet service.

use std::sync::Arc;

use uuid::Uuid;

use super::log_failure;
use crate::error::AppResult;
use crate::models::{ListParams, NewTweet, Page, Tweet, UpdateTweet};
use crate::repositories::TweetRepository;

#[derive(Clone)]
pub struct TweetService {
    repo: Arc<dyn TweetRepository>,
}

impl TweetService {
    pub fn new(repo: Arc<dyn TweetRepository>) -> Self {
        Self { repo }
    }

    /// Inserts the tweet and returns it as stored, timestamps included.
    pub async fn create(&self, new_tweet: NewTweet) -> AppResult<Tweet> {
        tracing::info!(user_id = %new_tweet.user_id, tweet = ?new_tweet, "Creating tweet");

        let id = self
            .repo
            .create(new_tweet)
            .await
            .inspect_err(log_failure("create tweet"))?;

        self.repo
            .get_by_id(id)
            .await
            .inspect_err(log_failure("get created tweet"))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Tweet> {
        tracing::debug!(tweet_id = %id, "Getting tweet");
        self.repo
            .get_by_id(id)
            .await
            .inspect_err(log_failure("get tweet"))
    }

    /// Newest first; `search` matches content, `user_id` restricts to one author.
    pub async fn list(&self, params: ListParams) -> AppResult<Page<Tweet>> {
        let params = params.normalized();
        tracing::info!(params = ?params, "Listing tweets");
        self.repo
            .get_list(&params)
            .await
            .inspect_err(log_failure("list tweets"))
    }

    pub async fn update(&self, id: Uuid, changes: UpdateTweet) -> AppResult<Tweet> {
        tracing::info!(tweet_id = %id, changes = ?changes, "Updating tweet");

        self.repo
            .update(id, changes)
            .await
            .inspect_err(log_failure("update tweet"))?;

        self.repo
            .get_by_id(id)
            .await
            .inspect_err(log_failure("get updated tweet"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        tracing::info!(tweet_id = %id, "Deleting tweet");
        self.repo
            .delete(id)
            .await
            .inspect_err(log_failure("delete tweet"))
    }
}
