//! User DTOs. Password hashes never leave the service layer.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::models::{CreateUser, Page, UpdateUser, User};

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateUserRequest {
    #[validate(length(min = 3, max = 64, message = "username must be between 3 and 64 characters"))]
    #[schema(example = "alice", min_length = 3, max_length = 64)]
    pub username: String,

    #[validate(length(min = 8, max = 64, message = "password must be between 8 and 64 characters"))]
    #[schema(format = "password", min_length = 8, max_length = 64)]
    pub password: String,

    #[validate(length(min = 1, max = 128, message = "name must be between 1 and 128 characters"))]
    #[schema(example = "Alice Liddell")]
    pub name: String,

    #[serde(default)]
    #[validate(length(max = 500, message = "bio must be at most 500 characters"))]
    pub bio: String,

    #[serde(default)]
    #[schema(example = "https://img.example/alice.png")]
    pub profile_picture: String,
}

impl CreateUserRequest {
    pub fn into_create_user(self) -> CreateUser {
        CreateUser {
            username: self.username,
            password: self.password,
            name: self.name,
            bio: self.bio,
            profile_picture: self.profile_picture,
        }
    }
}

/// Omitted fields keep their stored value.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 1, max = 128, message = "name must be between 1 and 128 characters"))]
    pub name: Option<String>,

    #[validate(length(max = 500, message = "bio must be at most 500 characters"))]
    pub bio: Option<String>,

    pub profile_picture: Option<String>,
}

impl UpdateUserRequest {
    pub fn into_update_user(self) -> UpdateUser {
        UpdateUser {
            name: self.name,
            bio: self.bio,
            profile_picture: self.profile_picture,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdatePasswordRequest {
    #[validate(length(min = 1, message = "old_password is required"))]
    #[schema(format = "password")]
    pub old_password: String,

    #[validate(length(min = 1, message = "new_password is required"))]
    #[schema(format = "password")]
    pub new_password: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub id: Uuid,
    pub username: String,
    pub name: String,
    pub bio: String,
    pub profile_picture: String,
    #[schema(value_type = String, format = DateTime)]
    pub created_at: jiff::Timestamp,
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: jiff::Timestamp,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            name: user.name,
            bio: user.bio,
            profile_picture: user.profile_picture,
            created_at: user.created_at.to_jiff(),
            updated_at: user.updated_at.to_jiff(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
    pub count: i64,
}

impl From<Page<User>> for UsersResponse {
    fn from(page: Page<User>) -> Self {
        Self {
            users: page.items.into_iter().map(UserResponse::from).collect(),
            count: page.count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff_diesel::ToDiesel;

    #[test]
    fn response_omits_password_hash() {
        let now = jiff::Timestamp::now().to_diesel();
        let user = User {
            id: Uuid::new_v4(),
            username: "alice".to_string(),
            password_hash: "$argon2id$secret".to_string(),
            name: "Alice".to_string(),
            bio: String::new(),
            profile_picture: String::new(),
            created_at: now,
            updated_at: now,
        };

        let json = serde_json::to_string(&UserResponse::from(user)).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
    }

    #[test]
    fn create_request_defaults_optional_profile_fields() {
        let request: CreateUserRequest = serde_json::from_str(
            r#"{"username":"alice","password":"wonderland1","name":"Alice"}"#,
        )
        .unwrap();
        assert!(request.validate().is_ok());
        assert_eq!(request.bio, "");
        assert_eq!(request.profile_picture, "");
    }

    #[test]
    fn short_username_fails_validation() {
        let request: CreateUserRequest = serde_json::from_str(
            r#"{"username":"al","password":"wonderland1","name":"Alice"}"#,
        )
        .unwrap();
        let errors = request.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }
}
