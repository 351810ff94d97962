use utoipa::OpenApi;

pub const USER_TAG: &str = "User";
pub const TWEET_TAG: &str = "Tweet";
pub const LIKE_TAG: &str = "Like";
pub const FOLLOWER_TAG: &str = "Follower";
pub const RETWEET_TAG: &str = "Retweet";
pub const AUTH_TAG: &str = "Auth";
pub const HEALTH_TAG: &str = "Health";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Flock",
        description = "Micro-blogging API: users, tweets, likes, followers and retweets",
    ),
    tags(
        (name = USER_TAG, description = "User accounts"),
        (name = TWEET_TAG, description = "Tweets"),
        (name = LIKE_TAG, description = "Likes"),
        (name = FOLLOWER_TAG, description = "Follow relationships"),
        (name = RETWEET_TAG, description = "Retweets"),
        (name = AUTH_TAG, description = "Login"),
        (name = HEALTH_TAG, description = "Liveness and readiness probes"),
    )
)]
pub struct ApiDoc;
