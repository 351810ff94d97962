mod follower;
mod like;
mod pagination;
mod retweet;
mod tweet;
mod user;

pub use follower::{Follower, NewFollower, ensure_not_self_follow};
pub use like::{Like, NewLike};
pub use pagination::{DEFAULT_LIMIT, DEFAULT_PAGE, ListParams, MAX_LIMIT, Page};
pub use retweet::{NewRetweet, Retweet};
pub use tweet::{NewTweet, Tweet, UpdateTweet};
pub use user::{CreateUser, NewUser, UpdateUser, User, UserCredentials};
