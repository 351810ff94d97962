//! Like service.

use std::sync::Arc;

use uuid::Uuid;

use super::log_failure;
use crate::error::AppResult;
use crate::models::{Like, ListParams, NewLike, Page};
use crate::repositories::LikeRepository;

#[derive(Clone)]
pub struct LikeService {
    repo: Arc<dyn LikeRepository>,
}

impl LikeService {
    pub fn new(repo: Arc<dyn LikeRepository>) -> Self {
        Self { repo }
    }

    /// Records the like; a second like of the same tweet by the same user is `Duplicate`.
    pub async fn create(&self, new_like: NewLike) -> AppResult<Like> {
        tracing::info!(
            tweet_id = %new_like.tweet_id,
            user_id = %new_like.user_id,
            "Creating like"
        );

        let id = self
            .repo
            .create(new_like)
            .await
            .inspect_err(log_failure("create like"))?;

        self.repo
            .get_by_id(id)
            .await
            .inspect_err(log_failure("get created like"))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Like> {
        tracing::debug!(like_id = %id, "Getting like");
        self.repo
            .get_by_id(id)
            .await
            .inspect_err(log_failure("get like"))
    }

    pub async fn list(&self, params: ListParams) -> AppResult<Page<Like>> {
        let params = params.normalized();
        tracing::info!(params = ?params, "Listing likes");
        self.repo
            .get_list(&params)
            .await
            .inspect_err(log_failure("list likes"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        tracing::info!(like_id = %id, "Deleting like");
        self.repo
            .delete(id)
            .await
            .inspect_err(log_failure("delete like"))
    }
}
