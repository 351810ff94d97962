//! Follower service.

use std::sync::Arc;

use uuid::Uuid;

use super::log_failure;
use crate::error::AppResult;
use crate::models::{Follower, ListParams, NewFollower, Page};
use crate::repositories::FollowerRepository;

#[derive(Clone)]
pub struct FollowerService {
    repo: Arc<dyn FollowerRepository>,
}

impl FollowerService {
    pub fn new(repo: Arc<dyn FollowerRepository>) -> Self {
        Self { repo }
    }

    /// `follower_user_id` starts following `user_id`.
    ///
    /// Following yourself is a `Validation` error, following twice is `Duplicate`.
    pub async fn create(&self, new_follower: NewFollower) -> AppResult<Follower> {
        tracing::info!(
            user_id = %new_follower.user_id,
            follower_user_id = %new_follower.follower_user_id,
            "Creating follower"
        );

        let id = self
            .repo
            .create(new_follower)
            .await
            .inspect_err(log_failure("create follower"))?;

        self.repo
            .get_by_id(id)
            .await
            .inspect_err(log_failure("get created follower"))
    }

    pub async fn get(&self, id: Uuid) -> AppResult<Follower> {
        tracing::debug!(follower_id = %id, "Getting follower");
        self.repo
            .get_by_id(id)
            .await
            .inspect_err(log_failure("get follower"))
    }

    /// `user_id` narrows the list to the followers of one user.
    pub async fn list(&self, params: ListParams) -> AppResult<Page<Follower>> {
        let params = params.normalized();
        tracing::info!(params = ?params, "Listing followers");
        self.repo
            .get_list(&params)
            .await
            .inspect_err(log_failure("list followers"))
    }

    pub async fn delete(&self, id: Uuid) -> AppResult<()> {
        tracing::info!(follower_id = %id, "Deleting follower");
        self.repo
            .delete(id)
            .await
            .inspect_err(log_failure("delete follower"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use crate::repositories::Repositories;

    fn service() -> FollowerService {
        FollowerService::new(Repositories::in_memory().followers)
    }

    #[tokio::test]
    async fn self_follow_is_rejected_and_nothing_is_stored() {
        let service = service();
        let me = Uuid::new_v4();

        let err = service
            .create(NewFollower {
                user_id: me,
                follower_user_id: me,
            })
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Validation { .. }));

        let page = service.list(ListParams::default()).await.unwrap();
        assert_eq!(page.count, 0);
    }

    #[tokio::test]
    async fn follow_pair_is_unique() {
        let service = service();
        let pair = NewFollower {
            user_id: Uuid::new_v4(),
            follower_user_id: Uuid::new_v4(),
        };

        let created = service.create(pair.clone()).await.unwrap();
        assert_eq!(created.follower_user_id, pair.follower_user_id);
        assert!(matches!(
            service.create(pair).await,
            Err(AppError::Duplicate { .. })
        ));
    }

    #[tokio::test]
    async fn list_by_followee_and_unfollow() {
        let service = service();
        let star = Uuid::new_v4();
        let mut ids = Vec::new();
        for _ in 0..3 {
            let f = service
                .create(NewFollower {
                    user_id: star,
                    follower_user_id: Uuid::new_v4(),
                })
                .await
                .unwrap();
            ids.push(f.follower_id);
        }

        let page = service
            .list(ListParams::default().with_user_id(star))
            .await
            .unwrap();
        assert_eq!(page.count, 3);

        service.delete(ids[0]).await.unwrap();
        let page = service
            .list(ListParams::default().with_user_id(star))
            .await
            .unwrap();
        assert_eq!(page.count, 2);
        assert!(service.delete(ids[0]).await.unwrap_err().is_not_found());
    }
}
