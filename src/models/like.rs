use diesel::prelude::*;
use jiff_diesel::Timestamp;
use uuid::Uuid;

#[derive(Debug, Queryable, Selectable, Clone)]
#[diesel(table_name = crate::schema::likes)]
pub struct Like {
    pub like_id: Uuid,
    pub tweet_id: Uuid,
    pub user_id: Uuid,
    pub created_at: Timestamp,
}

#[derive(Debug, Insertable, Clone)]
#[diesel(table_name = crate::schema::likes)]
pub struct NewLike {
    pub tweet_id: Uuid,
    pub user_id: Uuid,
}
