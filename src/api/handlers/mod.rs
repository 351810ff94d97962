//! Request handlers, one module per resource.

pub mod auth;
pub mod followers;
pub mod health;
pub mod likes;
pub mod retweets;
pub mod tweets;
pub mod users;
