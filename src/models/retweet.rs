use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::retweets)]
pub struct Retweet {
    pub retweet_id: Uuid,
    pub original_tweet_id: Uuid,
    pub user_id: Uuid,
    pub created_at: Timestamp,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::retweets)]
pub struct NewRetweet {
    pub original_tweet_id: Uuid,
    pub user_id: Uuid,
}
