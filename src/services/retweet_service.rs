//! Retweet service.

use std::sync::Arc;

use uuid::Uuid;

use super::log_failure;
use crate::error::AppResult;
use crate::models::{ListParams, NewRetweet, Page, Retweet};
use crate::repositories::RetweetRepository;

#[derive(Clone)]
pub struct RetweetService {
    repo: Arc<dyn RetweetRepository>,
}

impl RetweetService {
    pub fn new(repo: Arc<dyn RetweetRepository>) -> Self {
        Self { repo }
    }

    pub async fn create(&self, new_retweet: NewRetweet) -> AppResult<Retweet> {
        tracing::info!(
            original_tweet_id = %new_retweet.original_tweet_id,
            user_id = %new_retweet.user_id,
            "Creating retweet"
        );

        let id = self
            .repo
            .create(new_retweet)
            .await
            .inspect_err(log_failure("create retweet"))?;

        self.repo
            .get_by_id(id)
            .await
            .inspect_err(log_failure("get created retweet"))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Retweet> {
        tracing::debug!(retweet_id = %id, "Getting retweet");
        self.repo
            .get_by_id(id)
            .await
            .inspect_err(log_failure("get retweet"))
    }

    /// Filters: `user_id` (who retweeted) and `tweet_id` (the original tweet).
    pub async fn list(&self, params: ListParams) -> AppResult<Page<Retweet>> {
        let params = params.normalized();
        tracing::info!(params = ?params, "Listing retweets");
        self.repo
            .get_list(&params)
            .await
            .inspect_err(log_failure("list retweets"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        tracing::info!(retweet_id = %id, "Deleting retweet");
        self.repo
            .delete(id)
            .await
            .inspect_err(log_failure("delete retweet"))
    }
}
