//! Request and response bodies, grouped by resource.

mod auth;
mod follower;
mod health;
mod like;
mod pagination;
mod response;
mod retweet;
mod tweet;
mod user;

pub use auth::LoginRequest;
pub use follower::{CreateFollowerRequest, FollowerResponse, FollowersResponse};
pub use health::{ComponentHealth, HealthResponse, HealthStatus};
pub use like::{CreateLikeRequest, LikeResponse, LikesResponse};
pub use pagination::ListQuery;
pub use response::ApiResponse;
pub use retweet::{CreateRetweetRequest, RetweetResponse, RetweetsResponse};
pub use tweet::{CreateTweetRequest, TweetResponse, TweetsResponse, UpdateTweetRequest};
pub use user::{
    CreateUserRequest, UpdatePasswordRequest, UpdateUserRequest, UserResponse, UsersResponse,
};
