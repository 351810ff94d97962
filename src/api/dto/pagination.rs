//! List query parameters shared by every collection endpoint.

use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;
use validator::{Validate, ValidationError};

use crate::models::ListParams;

/// `?page=&limit=&search=&user_id=&tweet_id=`
///
/// Out-of-range page and limit values are clamped rather than rejected;
/// only values that are not numbers or ids fail with 400.
#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ListQuery {
    /// 1-based page number, default 1
    #[param(example = 1)]
    pub page: Option<i64>,

    /// Page size, default 10, at most 100
    #[param(example = 10)]
    pub limit: Option<i64>,

    /// Case-insensitive substring filter
    #[validate(
        length(max = 128, message = "search must be at most 128 characters"),
        custom(
            function = "validate_no_control_chars",
            message = "search must not contain control characters"
        )
    )]
    pub search: Option<String>,

    /// Restrict to rows owned by this user
    pub user_id: Option<Uuid>,

    /// Restrict to rows about this tweet
    pub tweet_id: Option<Uuid>,
}

/// Postgres rejects NUL in text parameters, so such terms never reach SQL.
fn validate_no_control_chars(s: &str) -> Result<(), ValidationError> {
    if s.chars().any(char::is_control) {
        return Err(ValidationError::new("control_character"));
    }
    Ok(())
}

impl ListQuery {
    pub fn into_list_params(self) -> ListParams {
        let mut params = ListParams::default();
        if let Some(page) = self.page {
            params.page = page;
        }
        if let Some(limit) = self.limit {
            params.limit = limit;
        }
        if let Some(search) = self.search {
            params = params.with_search(search);
        }
        if let Some(user_id) = self.user_id {
            params = params.with_user_id(user_id);
        }
        if let Some(tweet_id) = self.tweet_id {
            params = params.with_tweet_id(tweet_id);
        }
        params.normalized()
    }
}
