//! User service: registration, profile updates, password changes and login.

use std::sync::Arc;

use uuid::Uuid;

use super::log_failure;
use crate::error::{AppError, AppResult};
use crate::models::{CreateUser, ListParams, NewUser, Page, UpdateUser, User};
use crate::repositories::UserRepository;
use crate::utils::{hash_password, verify_password};

const MIN_PASSWORD_LEN: usize = 8;
const MAX_PASSWORD_LEN: usize = 64;

#[derive(Clone)]
pub struct UserService {
    repo: Arc<dyn UserRepository>,
}

impl UserService {
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }

    /// Hashes the password, inserts the user and returns the stored row.
    ///
    /// Fails with `Duplicate` when the username is taken, including by a
    /// deleted account.
    pub async fn create_user(&self, create: CreateUser) -> AppResult<User> {
        tracing::info!(username = %create.username, name = %create.name, "Creating user");

        let password_hash = hash_password(&create.password).inspect_err(log_failure("hash password"))?;
        let id = self
            .repo
            .create(NewUser {
                username: create.username,
                password_hash,
                name: create.name,
                bio: create.bio,
                profile_picture: create.profile_picture,
            })
            .await
            .inspect_err(log_failure("create user"))?;

        self.repo
            .get_by_id(id)
            .await
            .inspect_err(log_failure("get created user"))
    }

    /// Soft-deleted users are reported as `NotFound`.
    pub async fn get_user(&self, id: Uuid) -> AppResult<User> {
        tracing::debug!(user_id = %id, "Getting user");
        self.repo
            .get_by_id(id)
            .await
            .inspect_err(log_failure("get user"))
    }

    pub async fn list_users(&self, params: ListParams) -> AppResult<Page<User>> {
        let params = params.normalized();
        tracing::info!(
            page = params.page,
            limit = params.limit,
            search = ?params.search,
            "Listing users"
        );
        self.repo
            .get_list(&params)
            .await
            .inspect_err(log_failure("list users"))
    }

    /// Applies the provided fields and returns the stored row.
    pub async fn update_user(&self, id: Uuid, changes: UpdateUser) -> AppResult<User> {
        tracing::info!(user_id = %id, changes = ?changes, "Updating user");

        self.repo
            .update(id, changes)
            .await
            .inspect_err(log_failure("update user"))?;

        self.repo
            .get_by_id(id)
            .await
            .inspect_err(log_failure("get updated user"))
    }

    /// Marks the user as deleted.
    pub async fn delete_user(&self, id: Uuid) -> AppResult<()> {
        tracing::info!(user_id = %id, "Deleting user");
        self.repo
            .delete(id)
            .await
            .inspect_err(log_failure("delete user"))
    }

    /// Replaces the password after checking the current one.
    ///
    /// A wrong `old_password` or a weak `new_password` is a `Validation` error.
    pub async fn update_password(
        &self,
        id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> AppResult<()> {
        tracing::info!(user_id = %id, "Updating user password");

        let current_hash = self
            .repo
            .get_password_hash(id)
            .await
            .inspect_err(log_failure("get password hash"))?;

        if !verify_password(old_password, &current_hash)? {
            tracing::warn!(user_id = %id, "Old password did not match");
            return Err(AppError::validation(
                "old_password",
                "old password did not match",
            ));
        }

        check_password_strength(new_password)
            .inspect_err(|_| tracing::warn!(user_id = %id, "New password is weak"))?;

        let new_hash = hash_password(new_password).inspect_err(log_failure("hash password"))?;
        self.repo
            .update_password(id, new_hash)
            .await
            .inspect_err(log_failure("update password"))
    }

    /// Returns the user owning these credentials.
    ///
    /// Unknown usernames, deleted users and wrong passwords all yield the
    /// same `Unauthorized` error.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<User> {
        tracing::info!(username, "Authenticating user");

        let rejected = || AppError::Unauthorized {
            message: "invalid username or password".to_string(),
        };

        let credentials = self
            .repo
            .find_credentials_by_username(username)
            .await
            .inspect_err(log_failure("find credentials"))?
            .ok_or_else(rejected)?;

        if !verify_password(password, &credentials.password_hash)? {
            tracing::warn!(username, "Login rejected");
            return Err(rejected());
        }

        self.repo
            .get_by_id(credentials.id)
            .await
            .inspect_err(log_failure("get authenticated user"))
    }
}

/// 8 to 64 characters with at least one letter and one digit.
fn check_password_strength(password: &str) -> AppResult<()> {
    let len = password.chars().count();
    if !(MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&len) {
        return Err(AppError::validation(
            "new_password",
            format!("must be between {MIN_PASSWORD_LEN} and {MAX_PASSWORD_LEN} characters"),
        ));
    }
    if !password.chars().any(char::is_alphabetic) || !password.chars().any(|c| c.is_ascii_digit())
    {
        return Err(AppError::validation(
            "new_password",
            "must contain at least one letter and one digit",
        ));
    }
    Ok(())
}
